//! Color-scheme preference.
//!
//! One persisted value, process-wide. Read once at startup with the OS
//! preference as fallback, written on every toggle. The two scheme classes
//! are mutually exclusive on the page body.

use dom::{DomTree, NodeId, query};
use fragments::PreferenceStore;
use log::warn;

pub const COLOR_SCHEME_KEY: &str = "color-scheme";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColorScheme {
    Dark,
    Light,
}

impl ColorScheme {
    pub fn as_class(self) -> &'static str {
        match self {
            Self::Dark => "dark-scheme",
            Self::Light => "light-scheme",
        }
    }

    pub fn from_class(class: &str) -> Option<Self> {
        match class {
            "dark-scheme" => Some(Self::Dark),
            "light-scheme" => Some(Self::Light),
            _ => None,
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }
}

/// Recomputes a section's scheme-dependent presentation after a toggle.
/// Implemented by the page's section-metadata collaborator.
pub trait SectionSchemeDelegate {
    fn set_color_scheme(&mut self, tree: &mut DomTree, section: NodeId);
}

impl<F: FnMut(&mut DomTree, NodeId)> SectionSchemeDelegate for F {
    fn set_color_scheme(&mut self, tree: &mut DomTree, section: NodeId) {
        self(tree, section);
    }
}

pub struct SchemeController {
    store: Box<dyn PreferenceStore>,
    current: ColorScheme,
}

impl SchemeController {
    /// Read the persisted preference, falling back to the OS-level one.
    pub fn load(store: Box<dyn PreferenceStore>, os_prefers_dark: bool) -> Self {
        let current = store
            .get(COLOR_SCHEME_KEY)
            .as_deref()
            .and_then(ColorScheme::from_class)
            .unwrap_or(if os_prefers_dark {
                ColorScheme::Dark
            } else {
                ColorScheme::Light
            });
        Self { store, current }
    }

    pub fn current(&self) -> ColorScheme {
        self.current
    }

    /// Project the current scheme onto the body, replacing the other class.
    pub fn apply(&self, tree: &mut DomTree) {
        let Some(body) = query::body(tree) else {
            return;
        };
        tree.remove_class(body, self.current.flipped().as_class());
        tree.add_class(body, self.current.as_class());
    }

    /// Flip the scheme, persist it, and recompute every section's
    /// scheme-dependent styling through the delegate.
    pub fn toggle(
        &mut self,
        tree: &mut DomTree,
        delegate: &mut dyn SectionSchemeDelegate,
    ) -> ColorScheme {
        self.current = self.current.flipped();
        self.apply(tree);
        if let Err(error) = self.store.set(COLOR_SCHEME_KEY, self.current.as_class()) {
            warn!("could not persist color scheme: {error:#}");
        }
        let sections = query::find_all_by_class(tree, tree.document(), "section");
        for section in sections {
            delegate.set_color_scheme(tree, section);
        }
        self.current
    }
}
