//! Columns block.

use crate::rows;
use dom::{DomTree, NodeId};

pub fn init(tree: &mut DomTree, block: NodeId) {
    for (index, column) in rows(tree, block).into_iter().enumerate() {
        tree.add_class(column, "column");
        tree.add_class(column, &format!("column-{}", index + 1));
    }
}
