//! Content-block decorators.
//!
//! Each decorator takes a mounted block element and enhances its authored
//! child structure in place. Decorators are synchronous and have no failure
//! modes: missing pieces (no picture in a card, no links in a hero) are
//! ordinary content, not errors. The header is decorated separately (see the
//! `header` crate) because it performs fragment I/O.

use dom::{DomTree, NodeId};
use log::debug;

pub mod cards;
pub mod columns;
pub mod hero;

/// Decorate `block` according to its block kind (the element's first class
/// name). Returns whether a decorator ran.
pub fn decorate_block(tree: &mut DomTree, block: NodeId) -> bool {
    let Some(kind) = tree
        .element(block)
        .and_then(dom::ElementData::first_class)
        .map(str::to_string)
    else {
        return false;
    };
    match kind.as_str() {
        "cards" => cards::init(tree, block),
        "columns" => columns::init(tree, block),
        "hero" => hero::init(tree, block),
        _ => {
            debug!("no decorator for block kind {kind}");
            return false;
        }
    }
    true
}

/// Decorate every recognized block under `root`.
pub fn decorate_all(tree: &mut DomTree, root: NodeId) {
    let blocks: Vec<NodeId> = tree
        .descendants(root)
        .into_iter()
        .filter(|node| {
            tree.element(*node)
                .and_then(dom::ElementData::first_class)
                .is_some_and(|kind| matches!(kind, "cards" | "columns" | "hero"))
        })
        .collect();
    for block in blocks {
        decorate_block(tree, block);
    }
}

/// Immediate `div` children of a block, the authored row structure.
pub(crate) fn rows(tree: &DomTree, block: NodeId) -> Vec<NodeId> {
    tree.child_elements(block)
        .into_iter()
        .filter(|child| tree.tag_name(*child) == Some("div"))
        .collect()
}
