//! Brand section decoration.

use dom::{DomTree, NodeId, query};

/// Tag the section and split the brand link's label into icon and text
/// parts. A link with a single child node is left untouched.
pub fn decorate(tree: &mut DomTree, section: NodeId) {
    tree.add_class(section, "brands-section");
    let Some(brand_link) = query::find_by_tag(tree, section, "a") else {
        return;
    };
    let children = tree.children(brand_link);
    if children.len() > 1 {
        let text = children[1];
        let span = tree.create_element("span");
        tree.set_attr(span, "class", "brand-text");
        tree.append(span, text);
        tree.append(brand_link, span);
    }
}
