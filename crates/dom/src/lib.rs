//! Arena-backed DOM tree for content fragments.
//!
//! Fragments of authored HTML are parsed into an [`DomTree`] and decorated in
//! place by structural queries and re-parenting operations. The tree is the
//! only DOM surface in the workspace: there is no style computation and no
//! rendering, so class names written here are the finished product.

pub mod parser;
pub mod printing;
pub mod query;
pub mod tree;

pub use parser::parse_document;
pub use tree::{DomTree, ElementData, NodeData, NodeId};
