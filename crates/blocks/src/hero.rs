//! Hero block.
//!
//! The last authored row is the foreground (heading plus call-to-action
//! links); an optional preceding row is the background (image, or a video
//! when the image is wrapped in a link to a video resource).

use crate::rows;
use dom::{DomTree, NodeId, query};

pub fn init(tree: &mut DomTree, block: NodeId) {
    let mut remaining = rows(tree, block);
    let Some(foreground) = remaining.pop() else {
        return;
    };
    tree.add_class(foreground, "hero-foreground");
    decorate_foreground(tree, foreground);
    if let Some(background) = remaining.pop() {
        tree.add_class(background, "hero-background");
        decorate_background(tree, background);
    }

    tree.add_class(block, "dark-overlay");
    tree.add_class(block, "large");
}

/// Swap a video-linked background picture for an inline autoplaying video.
/// The picture stays in place as a fallback until playback actually starts;
/// call [`notify_video_playing`] at that point to drop it.
fn decorate_background(tree: &mut DomTree, background: NodeId) {
    let Some(picture) = query::find_by_tag(tree, background, "picture") else {
        return;
    };
    let Some(link) = query::closest(tree, picture, |t, node| t.tag_name(node) == Some("a")) else {
        return;
    };
    let Some(href) = tree.attr(link, "href").map(str::to_string) else {
        return;
    };
    if !href.contains(".mp4") {
        return;
    }

    let video = tree.create_element("video");
    tree.set_attr(video, "muted", "true");
    tree.set_attr(video, "autoplay", "true");
    tree.set_attr(video, "playsinline", "true");
    tree.set_attr(video, "loop", "true");
    tree.set_attr(video, "src", &href);

    if let Some(parent) = tree.parent(link) {
        tree.append(parent, video);
        tree.append(parent, picture);
        tree.detach(link);
    }
}

/// Remove the fallback picture next to `video` once playback has started.
pub fn notify_video_playing(tree: &mut DomTree, video: NodeId) {
    let Some(parent) = tree.parent(video) else {
        return;
    };
    if let Some(picture) = tree
        .child_elements(parent)
        .into_iter()
        .find(|sibling| tree.tag_name(*sibling) == Some("picture"))
    {
        tree.detach(picture);
    }
}

fn decorate_foreground(tree: &mut DomTree, foreground: NodeId) {
    if let Some(heading) = query::find(tree, foreground, query::is_heading) {
        tree.add_class(heading, "hero-heading");
        if let Some(detail) = query::previous_element_sibling(tree, heading) {
            tree.add_class(detail, "hero-detail");
        }
    }

    let links = query::find_all_by_tag(tree, foreground, "a");
    if links.is_empty() {
        return;
    }

    let wrapper = tree.create_element("div");
    tree.set_attr(wrapper, "class", "button-wrapper");
    for (index, link) in links.iter().enumerate() {
        tree.add_class(*link, "btn");
        if index == 0 {
            tree.add_class(*link, "btn-primary");
        } else {
            tree.add_class(*link, "btn-secondary");
        }
        tree.append(wrapper, *link);
    }

    let last_copy_element = query::find_all(tree, foreground, |t, node| {
        t.tag_name(node) == Some("p") || query::is_heading(t, node)
    })
    .into_iter()
    .last();
    match last_copy_element {
        Some(reference) => tree.insert_after(reference, wrapper),
        None => tree.append(foreground, wrapper),
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, reason = "test assertions")]

    use super::*;
    use dom::parse_document;

    fn hero_block(tree: &DomTree) -> NodeId {
        let body = query::body(tree).expect("body");
        query::find_by_class(tree, body, "hero").expect("hero block")
    }

    #[test]
    fn zero_links_creates_no_button_wrapper() {
        let mut tree = parse_document("<div class=\"hero\"><div><h1>Title</h1></div></div>");
        let block = hero_block(&tree);
        init(&mut tree, block);
        assert!(query::find_by_class(&tree, block, "button-wrapper").is_none());
        let heading = query::find_by_tag(&tree, block, "h1").expect("h1");
        assert!(tree.has_class(heading, "hero-heading"));
    }

    #[test]
    fn two_links_become_primary_then_secondary() {
        let mut tree = parse_document(
            "<div class=\"hero\"><div><h1>Title</h1>\
             <p><a href=\"/a\">First</a></p><p><a href=\"/b\">Second</a></p></div></div>",
        );
        let block = hero_block(&tree);
        init(&mut tree, block);

        let wrapper = query::find_by_class(&tree, block, "button-wrapper").expect("wrapper");
        let buttons = tree.child_elements(wrapper);
        assert_eq!(buttons.len(), 2);
        assert!(tree.has_class(buttons[0], "btn-primary"));
        assert_eq!(tree.text_content(buttons[0]), "First");
        assert!(tree.has_class(buttons[1], "btn-secondary"));
        assert_eq!(tree.text_content(buttons[1]), "Second");
    }

    #[test]
    fn detail_line_is_marked_when_preceding_heading() {
        let mut tree = parse_document(
            "<div class=\"hero\"><div><p>Eyebrow</p><h2>Title</h2></div></div>",
        );
        let block = hero_block(&tree);
        init(&mut tree, block);
        let detail = query::find_by_class(&tree, block, "hero-detail").expect("detail");
        assert_eq!(tree.text_content(detail), "Eyebrow");
    }

    #[test]
    fn video_link_swaps_in_inline_video() {
        let mut tree = parse_document(
            "<div class=\"hero\">\
             <div><p><a href=\"/media/clip.mp4\"><picture><img></picture></a></p></div>\
             <div><h1>Title</h1></div></div>",
        );
        let block = hero_block(&tree);
        init(&mut tree, block);

        let background = query::find_by_class(&tree, block, "hero-background").expect("bg row");
        let video = query::find_by_tag(&tree, background, "video").expect("video");
        for attribute in ["muted", "autoplay", "playsinline", "loop"] {
            assert_eq!(tree.attr(video, attribute), Some("true"));
        }
        assert_eq!(tree.attr(video, "src"), Some("/media/clip.mp4"));
        // Link is gone, picture still present as fallback.
        assert!(query::find_by_tag(&tree, background, "a").is_none());
        assert!(query::find_by_tag(&tree, background, "picture").is_some());

        notify_video_playing(&mut tree, video);
        assert!(query::find_by_tag(&tree, background, "picture").is_none());
    }

    #[test]
    fn plain_image_background_is_unchanged() {
        let mut tree = parse_document(
            "<div class=\"hero\">\
             <div><p><picture><img></picture></p></div>\
             <div><h1>Title</h1></div></div>",
        );
        let block = hero_block(&tree);
        init(&mut tree, block);
        let background = query::find_by_class(&tree, block, "hero-background").expect("bg row");
        assert!(query::find_by_tag(&tree, background, "video").is_none());
        assert!(query::find_by_tag(&tree, background, "picture").is_some());
    }
}
