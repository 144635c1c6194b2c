//! Cards block.
//!
//! Every immediate child is a card. A card with a picture gets the picture
//! moved into a dedicated wrapper at the front so styling can pin the image
//! above the copy.

use crate::rows;
use dom::{DomTree, NodeId, query};

pub fn init(tree: &mut DomTree, block: NodeId) {
    for card in rows(tree, block) {
        tree.add_class(card, "card");
        if let Some(picture) = query::find_by_tag(tree, card, "picture") {
            let wrapper = tree.create_element("div");
            tree.set_attr(wrapper, "class", "card-picture");
            tree.append(wrapper, picture);
            tree.prepend(card, wrapper);
        }
    }
}
