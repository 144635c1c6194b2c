//! Navigation section decoration.
//!
//! Top-level item links are cloned out of the authored list, each optionally
//! paired with a sub-navigation panel sourced from its own fragment. Panel
//! fragments are fetched concurrently (one task per item) and each item's
//! panel attaches once its own fetch settles; cross-item order is irrelevant.

use crate::HEADER_PATH;
use crate::menu::{MenuId, MenuKind, MenuRegistry};
use dom::{DomTree, NodeId, query};
use fragments::{FetchCache, FragmentLoader, SiteConfig};
use futures::future::join_all;
use log::debug;

pub(crate) struct NavParts {
    pub nav_area: NodeId,
    pub mobile_button: NodeId,
    /// Normalized item label to the registered sub-menu, for items that got
    /// a panel.
    pub sub_menus: Vec<(String, MenuId)>,
}

/// Lowercased, whitespace-to-hyphen form of a display label; the key for
/// sub-navigation fragment lookups.
pub(crate) fn normalize_label(text: &str) -> String {
    text.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
}

pub(crate) async fn decorate<L: FragmentLoader>(
    tree: &mut DomTree,
    header_root: NodeId,
    section: NodeId,
    loader: &L,
    config: &SiteConfig,
    menus: &mut MenuRegistry,
    cache: &mut FetchCache,
) -> Option<NavParts> {
    tree.add_class(section, "main-nav-section");
    let nav_content = query::find_by_class(tree, section, "default-content")?;

    // Clone the authored item links before the content is rebuilt.
    let items: Vec<(NodeId, String)> = top_level_item_links(tree, nav_content)
        .into_iter()
        .map(|link| {
            let label = normalize_label(&tree.text_content(link));
            (tree.clone_subtree(link), label)
        })
        .collect();

    fetch_missing_panels(loader, config, cache, &items).await;

    let logo_area = tree.create_element("div");
    tree.set_attr(logo_area, "class", "logo-area");
    if let Some(logo) = query::find(tree, nav_content, |t, node| {
        matches!(t.tag_name(node), Some("picture" | "img"))
    }) {
        tree.append(logo_area, logo);
    }

    let nav_area = tree.create_element("div");
    tree.set_attr(nav_area, "class", "nav-area");
    let nav_links = tree.create_element("div");
    tree.set_attr(nav_links, "class", "nav-links");
    let action_links = tree.create_element("div");
    tree.set_attr(action_links, "class", "action-links");

    let mut sub_menus = Vec::new();
    for (link, label) in items {
        let (container, menu) = decorate_nav_item(tree, link, &label, cache, menus);
        tree.append(nav_links, container);
        if let Some(menu) = menu {
            sub_menus.push((label, menu));
        }
    }

    collect_action_links(tree, header_root, section, nav_content, action_links);

    let mobile_button = build_mobile_button(tree);

    tree.append(nav_area, nav_links);
    tree.append(nav_area, action_links);
    tree.append(logo_area, mobile_button);

    for child in tree.children(nav_content) {
        tree.detach(child);
    }
    tree.append(nav_content, logo_area);
    tree.append(nav_content, nav_area);

    Some(NavParts {
        nav_area,
        mobile_button,
        sub_menus,
    })
}

/// Only top-level item links count: `ul > li > p > a` directly under the nav
/// content, excluding anything inside a picture and anything already marked
/// as belonging to a sub-menu.
fn top_level_item_links(tree: &DomTree, nav_content: NodeId) -> Vec<NodeId> {
    let mut links = Vec::new();
    for list in tree.child_elements(nav_content) {
        if tree.tag_name(list) != Some("ul") {
            continue;
        }
        for item in tree.child_elements(list) {
            if tree.tag_name(item) != Some("li") {
                continue;
            }
            for paragraph in tree.child_elements(item) {
                if tree.tag_name(paragraph) != Some("p") {
                    continue;
                }
                for link in tree.child_elements(paragraph) {
                    if tree.tag_name(link) != Some("a") {
                        continue;
                    }
                    let in_picture = query::closest(tree, link, |t, node| {
                        t.tag_name(node) == Some("picture")
                    })
                    .is_some();
                    if !in_picture && !tree.has_class(link, "sub-nav-link") {
                        links.push(link);
                    }
                }
            }
        }
    }
    links
}

/// Fetch every uncached panel fragment concurrently and record the outcomes.
/// A missing fragment is an expected, permanent outcome, not an error.
async fn fetch_missing_panels<L: FragmentLoader>(
    loader: &L,
    config: &SiteConfig,
    cache: &mut FetchCache,
    items: &[(NodeId, String)],
) {
    let mut seen = std::collections::HashSet::new();
    let pending: Vec<String> = items
        .iter()
        .map(|(_, label)| label.clone())
        .filter(|label| !cache.contains(label) && seen.insert(label.clone()))
        .collect();

    let fetches = pending.into_iter().map(|label| {
        let path = config.fragment_path(&format!("{HEADER_PATH}/{label}"));
        async move {
            let outcome = loader.load(&path).await;
            (label, path, outcome)
        }
    });
    for (label, path, outcome) in join_all(fetches).await {
        let outcome = match outcome {
            Ok(fragment) => Some(fragment),
            Err(error) => {
                debug!("no sub-navigation fragment at {path}: {error:#}");
                None
            }
        };
        cache.insert_outcome(label, outcome);
    }
}

fn decorate_nav_item(
    tree: &mut DomTree,
    link: NodeId,
    label: &str,
    cache: &FetchCache,
    menus: &mut MenuRegistry,
) -> (NodeId, Option<MenuId>) {
    let container = tree.create_element("div");
    tree.set_attr(container, "class", "nav-item-container");
    tree.append(container, link);

    let Some(fragment) = cache.get(label) else {
        return (container, None);
    };

    // Dropdown indicator on the link itself.
    let indicator = tree.create_element("span");
    tree.set_attr(indicator, "class", "nav-dropdown-indicator");
    let glyph = tree.create_text(">");
    tree.append(indicator, glyph);
    tree.append(link, indicator);

    let panel = tree.create_element("div");
    tree.set_attr(panel, "class", "sub-nav-menu");
    // Clone the cached fragment into the page so the cache stays pristine.
    for child in fragment.tree().children(fragment.root()) {
        let copy = tree.import(fragment.tree(), child);
        tree.append(panel, copy);
    }

    for section in query::find_all_by_class(tree, panel, "section") {
        split_nav_blocks(tree, section);
    }
    // Exempt panel links from ever being picked up as top-level items.
    for sub_link in query::find_all_by_tag(tree, panel, "a") {
        tree.add_class(sub_link, "sub-nav-link");
    }

    tree.append(container, panel);
    let menu = menus.register(MenuKind::SubNav, container, panel);
    (container, Some(menu))
}

/// A panel section authored with several `<p><strong>` titles is split into
/// one `nav-block` per title, each carrying the list that follows it.
fn split_nav_blocks(tree: &mut DomTree, section: NodeId) {
    let Some(content) = query::find_by_class(tree, section, "default-content") else {
        return;
    };
    let strong_paragraphs: Vec<NodeId> = query::find_all(tree, content, |t, node| {
        t.tag_name(node) == Some("p") && query::find_by_tag(t, node, "strong").is_some()
    });
    if strong_paragraphs.len() <= 1 {
        return;
    }

    let mut blocks = Vec::new();
    for paragraph in &strong_paragraphs {
        let block = tree.create_element("div");
        tree.set_attr(block, "class", "nav-block");
        let title = tree.clone_subtree(*paragraph);
        tree.append(block, title);
        if let Some(list) = query::next_element_sibling(tree, *paragraph)
            && tree.tag_name(list) == Some("ul")
        {
            let list_copy = tree.clone_subtree(list);
            tree.append(block, list_copy);
        }
        blocks.push(block);
    }

    for child in tree.children(content) {
        tree.detach(child);
    }
    for block in blocks {
        tree.append(content, block);
    }
}

/// Search and contact links are surfaced next to the navigation, collected
/// from the nav section first and then from every other section of the
/// header fragment.
fn collect_action_links(
    tree: &mut DomTree,
    header_root: NodeId,
    nav_section: NodeId,
    nav_content: NodeId,
    action_links: NodeId,
) {
    clone_actions_from(tree, nav_content, action_links);

    let sections = query::find_all_by_class(tree, header_root, "section");
    for section in sections {
        if section == nav_section {
            continue;
        }
        if let Some(content) = query::find_by_class(tree, section, "default-content") {
            clone_actions_from(tree, content, action_links);
        }
    }
}

fn clone_actions_from(tree: &mut DomTree, scope: NodeId, action_links: NodeId) {
    if let Some(search) = query::find_by_attr_contains(tree, scope, "href", "search") {
        let copy = tree.clone_subtree(search);
        tree.append(action_links, copy);
    }
    if let Some(contact) = query::find_by_attr_contains(tree, scope, "href", "contact") {
        let copy = tree.clone_subtree(contact);
        tree.add_class(copy, "contact-btn");
        tree.append(action_links, copy);
    }
}

pub(crate) fn build_mobile_button(tree: &mut DomTree) -> NodeId {
    let button = tree.create_element("button");
    tree.set_attr(button, "class", "mobile-menu-btn");
    for _ in 0..3 {
        let line = tree.create_element("span");
        tree.set_attr(line, "class", "hamburger-line");
        tree.append(button, line);
    }
    tree.set_attr(button, "aria-label", "Toggle mobile menu");
    tree.set_attr(button, "aria-expanded", "false");
    button
}
