//! Site header assembly and interaction.
//!
//! The header is load-bearing UI: its fragment is fetched, split into brand,
//! navigation, and actions sections, decorated, and mounted, after which the
//! returned [`Header`] owns all interactive state (open menus, color scheme).
//! A failed header fragment load aborts initialization; failed secondary
//! fragments (sub-navigation panels, the language menu) only degrade the
//! affected control to a plain link or button.

mod actions;
mod brand;
pub mod menu;
mod nav;
pub mod scheme;
pub mod sections;

use anyhow::{Context as _, Error};
use dom::{DomTree, NodeId, query};
use fragments::{FetchCache, Fragment, FragmentLoader, PreferenceStore, SiteConfig, page_metadata};
use log::info;

pub use menu::{InputEvent, MenuId, MenuKind, MenuRegistry, MenuState, Viewport};
pub use scheme::{ColorScheme, SchemeController, SectionSchemeDelegate};
pub use sections::SectionRole;

/// Default header fragment path, overridable per page via `header` metadata.
pub const HEADER_PATH: &str = "/fragments/nav/header";

/// Fragment backing the language switcher menu.
pub const LANGUAGES_PATH: &str = "/fragments/nav/languages";

/// Lifecycle of a header instance. `Loading` covers the primary fragment
/// fetch (the await inside [`Header::init`]); the constructed header passes
/// through `Assembled` once sections are decorated and mounted, and ends up
/// `Interactive` with menus registered and the color scheme applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Loading,
    Assembled,
    Interactive,
}

pub struct Header {
    root: NodeId,
    phase: Phase,
    config: SiteConfig,
    menus: MenuRegistry,
    cache: FetchCache,
    scheme: SchemeController,
    sub_menus: Vec<(String, MenuId)>,
    mobile_menu: Option<MenuId>,
    language_menu: Option<MenuId>,
    language_button: Option<NodeId>,
    scheme_button: Option<NodeId>,
}

impl Header {
    /// Fetch, decorate, and mount the header, returning it fully
    /// interactive.
    ///
    /// # Errors
    /// Fails when the header fragment itself cannot be loaded; the header is
    /// load-bearing and a missing fragment leaves the mount empty.
    pub async fn init<L: FragmentLoader>(
        page: &mut DomTree,
        mount: NodeId,
        loader: &L,
        config: SiteConfig,
        store: Box<dyn PreferenceStore>,
    ) -> Result<Self, Error> {
        let path = page_metadata(page, "header").unwrap_or_else(|| HEADER_PATH.to_string());
        let fragment = loader
            .load(&config.fragment_path(&path))
            .await
            .context("loading header fragment")?;

        let root = page.create_element("div");
        page.add_class(root, "header-content");
        let scheme = SchemeController::load(store, config.prefers_dark);
        let mut header = Self {
            root,
            phase: Phase::Loading,
            config,
            menus: MenuRegistry::new(),
            cache: FetchCache::new(),
            scheme,
            sub_menus: Vec::new(),
            mobile_menu: None,
            language_menu: None,
            language_button: None,
            scheme_button: None,
        };
        header.assemble(page, mount, loader, &fragment).await;
        header.activate(page);
        Ok(header)
    }

    /// Import the fragment, classify its sections, decorate each, and mount
    /// the result.
    async fn assemble<L: FragmentLoader>(
        &mut self,
        page: &mut DomTree,
        mount: NodeId,
        loader: &L,
        fragment: &Fragment,
    ) {
        for child in fragment.tree().children(fragment.root()) {
            let copy = page.import(fragment.tree(), child);
            page.append(self.root, copy);
        }

        let mut section_nodes: Vec<NodeId> = page
            .child_elements(self.root)
            .into_iter()
            .filter(|section| page.has_class(*section, "section"))
            .collect();
        if section_nodes.is_empty() {
            // Unwrapped fragments: every child row is a candidate section.
            section_nodes = page
                .child_elements(self.root)
                .into_iter()
                .filter(|child| page.tag_name(*child) == Some("div"))
                .collect();
        }
        let assigned = sections::classify(page, &section_nodes);

        if let Some(section) = sections::role_of(&assigned, SectionRole::Brand) {
            brand::decorate(page, section);
        }

        if let Some(section) = sections::role_of(&assigned, SectionRole::Navigation) {
            let parts = nav::decorate(
                page,
                self.root,
                section,
                loader,
                &self.config,
                &mut self.menus,
                &mut self.cache,
            )
            .await;
            if let Some(parts) = parts {
                if let Some(body) = query::body(page) {
                    let mobile = self.menus.register(
                        MenuKind::MobileNav {
                            body,
                            buttons: vec![parts.mobile_button],
                        },
                        parts.nav_area,
                        parts.nav_area,
                    );
                    self.mobile_menu = Some(mobile);
                }
                self.sub_menus = parts.sub_menus;
            }
        }

        if let Some(section) = sections::role_of(&assigned, SectionRole::Actions) {
            let parts = actions::decorate(page, section);
            self.scheme_button = parts.scheme_button;
            self.language_button = parts.language_button;
            if let (Some(mobile), Some(trigger)) = (self.mobile_menu, parts.mobile_trigger) {
                self.menus.add_mobile_trigger(mobile, trigger);
            }
        }

        page.append(mount, self.root);
        self.phase = Phase::Assembled;
    }

    /// Final wiring: project the persisted color scheme onto the page.
    fn activate(&mut self, page: &mut DomTree) {
        self.scheme.apply(page);
        self.phase = Phase::Interactive;
        info!(
            "header interactive: {} sub-menus, mobile nav {}",
            self.sub_menus.len(),
            if self.mobile_menu.is_some() { "on" } else { "off" },
        );
    }

    /// Apply a host input event. Returns whether the event was consumed; an
    /// unconsumed click falls through to normal link navigation.
    pub fn dispatch(&mut self, page: &mut DomTree, event: InputEvent, viewport: Viewport) -> bool {
        match event {
            InputEvent::HoverEnter(id) => {
                self.menus.open(page, id);
                true
            }
            InputEvent::HoverLeave(id) => {
                self.menus.close(page, id);
                true
            }
            InputEvent::MenuClick(id) => {
                let always_toggles =
                    self.mobile_menu == Some(id) || self.language_menu == Some(id);
                if always_toggles || viewport.width <= self.config.mobile_breakpoint {
                    self.menus.toggle(page, id);
                    true
                } else {
                    false
                }
            }
            InputEvent::OutsideClick | InputEvent::Escape => {
                if self.menus.dismissal_active() {
                    self.menus.close_all(page);
                    true
                } else {
                    false
                }
            }
        }
    }

    /// Toggle the language menu, fetching its fragment on first use. A
    /// failed fetch leaves the button panel-less, permanently.
    pub async fn toggle_language_menu<L: FragmentLoader>(
        &mut self,
        page: &mut DomTree,
        loader: &L,
    ) {
        if let Some(id) = self.language_menu {
            self.menus.toggle(page, id);
            return;
        }
        let Some(button) = self.language_button else {
            return;
        };
        let path = self.config.fragment_path(LANGUAGES_PATH);
        let Some(fragment) = self.cache.fetch_once(loader, "languages", &path).await else {
            return;
        };

        let panel = page.create_element("div");
        page.set_attr(panel, "class", "lang-menu");
        let roots: Vec<NodeId> = fragment.tree().children(fragment.root());
        let source = fragment.tree();
        let copies: Vec<NodeId> = roots
            .into_iter()
            .map(|child| page.import(source, child))
            .collect();
        for copy in copies {
            page.append(panel, copy);
        }

        let container = page.parent(button).unwrap_or(self.root);
        page.append(container, panel);
        let id = self.menus.register(MenuKind::Language, container, panel);
        self.language_menu = Some(id);
        self.menus.open(page, id);
    }

    /// Flip the color scheme, persist it, and recompute section styling via
    /// the delegate.
    pub fn toggle_color_scheme(
        &mut self,
        page: &mut DomTree,
        delegate: &mut dyn SectionSchemeDelegate,
    ) -> ColorScheme {
        self.scheme.toggle(page, delegate)
    }

    // ----- accessors -----

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn color_scheme(&self) -> ColorScheme {
        self.scheme.current()
    }

    /// The registered sub-menu for a normalized item label.
    pub fn menu_for_label(&self, label: &str) -> Option<MenuId> {
        self.sub_menus
            .iter()
            .find(|(existing, _)| existing.as_str() == label)
            .map(|(_, id)| *id)
    }

    pub fn sub_menu_count(&self) -> usize {
        self.sub_menus.len()
    }

    pub fn mobile_menu(&self) -> Option<MenuId> {
        self.mobile_menu
    }

    pub fn language_menu(&self) -> Option<MenuId> {
        self.language_menu
    }

    pub fn language_button(&self) -> Option<NodeId> {
        self.language_button
    }

    pub fn scheme_button(&self) -> Option<NodeId> {
        self.scheme_button
    }

    pub fn menu_state(&self, id: MenuId) -> Option<MenuState> {
        self.menus.state(id)
    }

    pub fn any_menu_open(&self) -> bool {
        self.menus.any_open()
    }

    /// Whether the document-level dismissal listener should be installed
    /// right now.
    pub fn dismissal_active(&self) -> bool {
        self.menus.dismissal_active()
    }
}
