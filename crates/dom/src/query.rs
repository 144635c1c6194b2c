//! Structural queries over the tree.
//!
//! Decorators read authored content purely structurally: child order, tag
//! names, class names, attribute substrings. Nothing here validates content
//! against a schema; a query that matches nothing is an ordinary outcome.

use crate::tree::{DomTree, NodeId};

/// Tags treated as headings when promoting hero copy.
pub const HEADING_TAGS: [&str; 6] = ["h1", "h2", "h3", "h4", "h5", "h6"];

/// The `body` element of a parsed document. Fragment content lives under it.
pub fn body(tree: &DomTree) -> Option<NodeId> {
    find_by_tag(tree, tree.document(), "body")
}

/// First element under `root` (preorder, excluding `root`) matching the
/// predicate.
pub fn find<F>(tree: &DomTree, root: NodeId, predicate: F) -> Option<NodeId>
where
    F: Fn(&DomTree, NodeId) -> bool,
{
    tree.descendants(root)
        .into_iter()
        .find(|node| tree.is_element(*node) && predicate(tree, *node))
}

/// All elements under `root` (preorder, excluding `root`) matching the
/// predicate.
pub fn find_all<F>(tree: &DomTree, root: NodeId, predicate: F) -> Vec<NodeId>
where
    F: Fn(&DomTree, NodeId) -> bool,
{
    tree.descendants(root)
        .into_iter()
        .filter(|node| tree.is_element(*node) && predicate(tree, *node))
        .collect()
}

pub fn find_by_tag(tree: &DomTree, root: NodeId, tag: &str) -> Option<NodeId> {
    find(tree, root, |t, node| t.tag_name(node) == Some(tag))
}

pub fn find_all_by_tag(tree: &DomTree, root: NodeId, tag: &str) -> Vec<NodeId> {
    find_all(tree, root, |t, node| t.tag_name(node) == Some(tag))
}

pub fn find_by_class(tree: &DomTree, root: NodeId, class_name: &str) -> Option<NodeId> {
    find(tree, root, |t, node| t.has_class(node, class_name))
}

pub fn find_all_by_class(tree: &DomTree, root: NodeId, class_name: &str) -> Vec<NodeId> {
    find_all(tree, root, |t, node| t.has_class(node, class_name))
}

/// First element whose attribute `name` contains `needle`, the moral
/// equivalent of an `[attr*="needle"]` selector.
pub fn find_by_attr_contains(
    tree: &DomTree,
    root: NodeId,
    name: &str,
    needle: &str,
) -> Option<NodeId> {
    find(tree, root, |t, node| {
        t.attr(node, name).is_some_and(|value| value.contains(needle))
    })
}

/// Nearest element matching the predicate, starting from `node` itself and
/// walking up through its ancestors.
pub fn closest<F>(tree: &DomTree, node: NodeId, predicate: F) -> Option<NodeId>
where
    F: Fn(&DomTree, NodeId) -> bool,
{
    let mut current = Some(node);
    while let Some(candidate) = current {
        if tree.is_element(candidate) && predicate(tree, candidate) {
            return Some(candidate);
        }
        current = tree.parent(candidate);
    }
    None
}

pub fn previous_element_sibling(tree: &DomTree, node: NodeId) -> Option<NodeId> {
    let mut current = tree.previous_sibling(node);
    while let Some(candidate) = current {
        if tree.is_element(candidate) {
            return Some(candidate);
        }
        current = tree.previous_sibling(candidate);
    }
    None
}

pub fn next_element_sibling(tree: &DomTree, node: NodeId) -> Option<NodeId> {
    let mut current = tree.next_sibling(node);
    while let Some(candidate) = current {
        if tree.is_element(candidate) {
            return Some(candidate);
        }
        current = tree.next_sibling(candidate);
    }
    None
}

pub fn is_heading(tree: &DomTree, node: NodeId) -> bool {
    tree.tag_name(node)
        .is_some_and(|tag| HEADING_TAGS.contains(&tag))
}
