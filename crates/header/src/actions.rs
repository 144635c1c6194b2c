//! Actions section decoration.
//!
//! Action links are recognized by URL substring. Tool-widget links become
//! real buttons (they never navigate) and are wired to their behavior by the
//! assembler: color-scheme toggle, language menu, mobile nav toggle. Search
//! and contact remain links, restyled with an icon and label so they sit in
//! the same control row. Unrecognized links are left untouched.

use crate::nav::build_mobile_button;
use dom::{DomTree, NodeId, query};

pub(crate) struct ActionParts {
    pub scheme_button: Option<NodeId>,
    pub language_button: Option<NodeId>,
    pub mobile_trigger: Option<NodeId>,
}

pub(crate) fn decorate(tree: &mut DomTree, section: NodeId) -> ActionParts {
    tree.add_class(section, "actions-section");

    let mut parts = ActionParts {
        scheme_button: None,
        language_button: None,
        mobile_trigger: None,
    };

    for link in query::find_all_by_tag(tree, section, "a") {
        let Some(href) = tree.attr(link, "href").map(str::to_string) else {
            continue;
        };
        if href.contains("/tools/widgets/color-scheme") {
            parts.scheme_button = Some(convert_to_button(tree, link, "scheme-toggle-btn", "scheme"));
        } else if href.contains("/tools/widgets/language") {
            parts.language_button = Some(convert_to_button(tree, link, "lang-btn", "language"));
        } else if href.contains("/tools/widgets/mobile-nav") {
            let button = build_mobile_button(tree);
            tree.insert_before(link, button);
            tree.detach(link);
            parts.mobile_trigger = Some(button);
        } else if href.contains("search") {
            style_action_link(tree, link, "search-btn", "search");
        } else if href.contains("contact") {
            style_action_link(tree, link, "contact-btn", "contact");
        }
    }

    parts
}

/// Replace a tool-widget link with a `<button>` carrying icon and label. The
/// original target survives as `data-href` for styling hooks.
fn convert_to_button(tree: &mut DomTree, link: NodeId, class: &str, icon_kind: &str) -> NodeId {
    let label_text = tree.text_content(link).trim().to_string();
    let href = tree.attr(link, "href").unwrap_or_default().to_string();

    let button = tree.create_element("button");
    tree.set_attr(button, "class", class);
    tree.set_attr(button, "data-href", &href);
    append_icon_and_label(tree, button, icon_kind, &label_text);

    tree.insert_before(link, button);
    tree.detach(link);
    button
}

/// Restyle a navigating action link in place with icon and label spans.
fn style_action_link(tree: &mut DomTree, link: NodeId, class: &str, icon_kind: &str) {
    let label_text = tree.text_content(link).trim().to_string();
    for child in tree.children(link) {
        tree.detach(child);
    }
    tree.add_class(link, class);
    append_icon_and_label(tree, link, icon_kind, &label_text);
}

fn append_icon_and_label(tree: &mut DomTree, parent: NodeId, icon_kind: &str, label: &str) {
    let icon = tree.create_element("span");
    tree.set_attr(icon, "class", &format!("icon icon-{icon_kind}"));
    tree.append(parent, icon);

    let label_span = tree.create_element("span");
    tree.set_attr(label_span, "class", "btn-label");
    let text = tree.create_text(label);
    tree.append(label_span, text);
    tree.append(parent, label_span);
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, reason = "test assertions")]

    use super::*;
    use dom::parse_document;

    fn section_of(tree: &DomTree) -> NodeId {
        let body = query::body(tree).expect("body");
        query::find_by_class(tree, body, "section").expect("section")
    }

    #[test]
    fn tool_widget_links_become_buttons() {
        let mut tree = parse_document(
            "<div class=\"section\"><p>\
             <a href=\"/tools/widgets/color-scheme\">Theme</a>\
             <a href=\"/tools/widgets/language\">Language</a>\
             </p></div>",
        );
        let section = section_of(&tree);
        let parts = decorate(&mut tree, section);

        let scheme = parts.scheme_button.expect("scheme button");
        assert_eq!(tree.tag_name(scheme), Some("button"));
        assert!(tree.has_class(scheme, "scheme-toggle-btn"));
        let label = query::find_by_class(&tree, scheme, "btn-label").expect("label");
        assert_eq!(tree.text_content(label), "Theme");

        let language = parts.language_button.expect("lang button");
        assert!(tree.has_class(language, "lang-btn"));
        // The links themselves are gone.
        assert!(query::find_by_tag(&tree, section, "a").is_none());
    }

    #[test]
    fn contact_stays_a_link_with_button_styling() {
        let mut tree = parse_document(
            "<div class=\"section\"><p><a href=\"/contact-us\">Contact</a></p></div>",
        );
        let section = section_of(&tree);
        decorate(&mut tree, section);

        let contact = query::find_by_tag(&tree, section, "a").expect("link survives");
        assert!(tree.has_class(contact, "contact-btn"));
        assert_eq!(tree.attr(contact, "href"), Some("/contact-us"));
        assert!(query::find_by_class(&tree, contact, "icon-contact").is_some());
    }

    #[test]
    fn unrecognized_links_are_untouched() {
        let mut tree = parse_document(
            "<div class=\"section\"><p><a href=\"/pricing\">Pricing</a></p></div>",
        );
        let section = section_of(&tree);
        decorate(&mut tree, section);
        let link = query::find_by_tag(&tree, section, "a").expect("link");
        assert_eq!(tree.attr(link, "class"), None);
    }
}
