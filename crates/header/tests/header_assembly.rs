//! End-to-end header assembly tests against an in-memory fragment source.

#![allow(clippy::expect_used, reason = "test assertions")]

use dom::{DomTree, NodeId, parse_document, query};
use fragments::{JsonFileStore, MemoryStore, PreferenceStore as _, SiteConfig, StaticLoader};
use header::{ColorScheme, Header, MenuState, Phase};

const PAGE: &str = "<html><head></head><body><header></header>\
                    <div class=\"section\"></div></body></html>";

const HEADER_FRAGMENT: &str = "\
  <div class=\"section\"><div class=\"default-content\">\
    <p><a href=\"/\"><span class=\"icon\"></span>Acme</a></p>\
  </div></div>\
  <div class=\"section\"><div class=\"default-content\">\
    <picture><img></picture>\
    <ul>\
      <li><p><a href=\"/products\">Products</a></p></li>\
      <li><p><a href=\"/about\">About</a></p></li>\
    </ul>\
  </div></div>\
  <div class=\"section\"><div class=\"default-content\">\
    <p><a href=\"/contact-us\">Contact</a></p>\
  </div></div>";

const PRODUCTS_SUBNAV: &str = "\
  <div class=\"section\"><div class=\"default-content\">\
    <p><strong>Suite</strong></p><ul><li><a href=\"/products/one\">One</a></li></ul>\
  </div></div>";

fn page_and_mount() -> (DomTree, NodeId) {
    env_logger::builder().is_test(true).try_init().ok();
    let tree = parse_document(PAGE);
    let body = query::body(&tree).expect("body");
    let mount = query::find_by_tag(&tree, body, "header").expect("mount");
    (tree, mount)
}

fn loader_with_header() -> StaticLoader {
    let mut loader = StaticLoader::new();
    loader.insert("/fragments/nav/header", HEADER_FRAGMENT);
    loader.insert("/fragments/nav/header/products", PRODUCTS_SUBNAV);
    loader
}

async fn assembled_header() -> (DomTree, Header) {
    let (mut page, mount) = page_and_mount();
    let loader = loader_with_header();
    let header = Header::init(
        &mut page,
        mount,
        &loader,
        SiteConfig::default(),
        Box::new(MemoryStore::new()),
    )
    .await
    .expect("header init");
    (page, header)
}

#[tokio::test]
async fn three_section_fragment_assembles_end_to_end() {
    let (page, header) = assembled_header().await;
    assert_eq!(header.phase(), Phase::Interactive);

    let root = header.root();
    assert!(page.has_class(root, "header-content"));

    // Brand: icon and text split apart.
    let brand_section = query::find_by_class(&page, root, "brands-section").expect("brand");
    let brand_text = query::find_by_class(&page, brand_section, "brand-text").expect("brand-text");
    assert_eq!(page.text_content(brand_text), "Acme");

    // Navigation: two items, only the first has a (closed) panel.
    let nav_links = query::find_by_class(&page, root, "nav-links").expect("nav-links");
    let items = page.child_elements(nav_links);
    assert_eq!(items.len(), 2);
    assert!(query::find_by_class(&page, items[0], "sub-nav-menu").is_some());
    assert!(query::find_by_class(&page, items[1], "sub-nav-menu").is_none());
    assert!(query::find_by_class(&page, root, "is-open").is_none());
    assert_eq!(header.sub_menu_count(), 1);
    let products = header.menu_for_label("products").expect("products menu");
    assert_eq!(header.menu_state(products), Some(MenuState::Closed));

    // The panel's links are marked so they never read as top-level items.
    let panel = query::find_by_class(&page, items[0], "sub-nav-menu").expect("panel");
    for link in query::find_all_by_tag(&page, panel, "a") {
        assert!(page.has_class(link, "sub-nav-link"));
    }
    // And the item link grew a dropdown indicator.
    assert!(query::find_by_class(&page, items[0], "nav-dropdown-indicator").is_some());

    // Actions: the contact link was cloned in as a styled action link.
    let action_links = query::find_by_class(&page, root, "action-links").expect("action-links");
    let contact = query::find_by_class(&page, action_links, "contact-btn").expect("contact");
    assert_eq!(page.tag_name(contact), Some("a"));

    // The startup scheme landed on the body.
    let body = query::body(&page).expect("body");
    assert!(page.has_class(body, "light-scheme"));
}

#[tokio::test]
async fn missing_header_fragment_is_fatal() {
    let (mut page, mount) = page_and_mount();
    let loader = StaticLoader::new();
    let result = Header::init(
        &mut page,
        mount,
        &loader,
        SiteConfig::default(),
        Box::new(MemoryStore::new()),
    )
    .await;
    assert!(result.is_err());
    // The mount stays empty.
    assert!(page.children(mount).is_empty());
}

#[tokio::test]
async fn missing_subnav_fragment_degrades_to_plain_link() {
    // No products fragment registered at all.
    let mut loader = StaticLoader::new();
    loader.insert("/fragments/nav/header", HEADER_FRAGMENT);
    let (mut page, mount) = page_and_mount();
    let header = Header::init(
        &mut page,
        mount,
        &loader,
        SiteConfig::default(),
        Box::new(MemoryStore::new()),
    )
    .await
    .expect("header init");

    assert_eq!(header.sub_menu_count(), 0);
    let root = header.root();
    assert!(query::find_by_class(&page, root, "sub-nav-menu").is_none());
    // Both items still rendered as plain links.
    let nav_links = query::find_by_class(&page, root, "nav-links").expect("nav-links");
    assert_eq!(page.child_elements(nav_links).len(), 2);
}

#[tokio::test]
async fn metadata_override_changes_header_path() {
    let mut page = parse_document(
        "<html><head><meta name=\"header\" content=\"/custom/header\"></head>\
         <body><header></header></body></html>",
    );
    let body = query::body(&page).expect("body");
    let mount = query::find_by_tag(&page, body, "header").expect("mount");
    let mut loader = StaticLoader::new();
    loader.insert("/custom/header", HEADER_FRAGMENT);
    let header = Header::init(
        &mut page,
        mount,
        &loader,
        SiteConfig::default(),
        Box::new(MemoryStore::new()),
    )
    .await
    .expect("header init");
    assert_eq!(header.phase(), Phase::Interactive);
}

#[tokio::test]
async fn locale_prefix_applies_to_every_fragment_path() {
    let mut loader = StaticLoader::new();
    loader.insert("/de/fragments/nav/header", HEADER_FRAGMENT);
    loader.insert("/de/fragments/nav/header/products", PRODUCTS_SUBNAV);
    let (mut page, mount) = page_and_mount();
    let config = SiteConfig {
        locale: fragments::Locale {
            prefix: "/de".to_string(),
        },
        ..SiteConfig::default()
    };
    let header = Header::init(&mut page, mount, &loader, config, Box::new(MemoryStore::new()))
        .await
        .expect("header init");
    assert_eq!(header.sub_menu_count(), 1);
}

#[tokio::test]
async fn scheme_double_toggle_round_trips_and_persists() {
    let dir = tempfile::tempdir().expect("tempdir");
    let prefs_path = dir.path().join("prefs.json");

    let (mut page, mount) = page_and_mount();
    let loader = loader_with_header();
    let store = JsonFileStore::open(&prefs_path).expect("store");
    let mut header = Header::init(
        &mut page,
        mount,
        &loader,
        SiteConfig::default(),
        Box::new(store),
    )
    .await
    .expect("header init");

    let body = query::body(&page).expect("body");
    assert!(page.has_class(body, "light-scheme"));

    let mut recomputed = 0usize;
    let mut delegate = |_: &mut DomTree, _: NodeId| recomputed += 1;
    assert_eq!(
        header.toggle_color_scheme(&mut page, &mut delegate),
        ColorScheme::Dark
    );
    assert!(page.has_class(body, "dark-scheme"));
    assert!(!page.has_class(body, "light-scheme"));

    assert_eq!(
        header.toggle_color_scheme(&mut page, &mut delegate),
        ColorScheme::Light
    );
    assert!(page.has_class(body, "light-scheme"));
    assert!(!page.has_class(body, "dark-scheme"));

    // Every section recomputed on each toggle; the page has the authored
    // section plus the ones imported with the header fragment.
    assert!(recomputed >= 2);

    // The persisted preference matches the final body class.
    let reopened = JsonFileStore::open(&prefs_path).expect("reopen");
    assert_eq!(reopened.get("color-scheme"), Some("light-scheme".to_string()));
}
