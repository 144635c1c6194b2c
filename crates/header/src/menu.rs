//! Menu state machine.
//!
//! Every collapsible widget in the header (sub-navigation panels, the
//! language menu, the mobile nav) is registered here with an explicit state.
//! The registry owns the invariants: at most one top-level sub-menu open at a
//! time, and the global dismissal subscription active exactly while any menu
//! is open. Presentation classes are written only when a state actually
//! changes, so the machine is testable without reading the tree.

use dom::{DomTree, NodeId};
use log::debug;

pub type MenuId = usize;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuState {
    Closed,
    Open,
}

/// What kind of widget a registered menu is. Sub-navigation and language
/// menus are mutually exclusive with each other; the mobile nav is
/// independent of both.
#[derive(Clone, Debug)]
pub enum MenuKind {
    SubNav,
    Language,
    MobileNav {
        /// The page body, which carries `mobile-menu-open` while open.
        body: NodeId,
        /// Toggle buttons whose `aria-expanded` mirrors the state.
        buttons: Vec<NodeId>,
    },
}

struct MenuEntry {
    kind: MenuKind,
    state: MenuState,
    /// The element owning the widget (`nav-item-container`, the action
    /// button's parent, or the nav area for the mobile menu).
    container: NodeId,
    /// The collapsible panel itself.
    panel: NodeId,
}

impl MenuEntry {
    fn is_exclusive(&self) -> bool {
        matches!(self.kind, MenuKind::SubNav | MenuKind::Language)
    }
}

/// Host-facing input events, fed in by whatever surface embeds the header.
#[derive(Clone, Copy, Debug)]
pub enum InputEvent {
    HoverEnter(MenuId),
    HoverLeave(MenuId),
    /// Click on the menu's trigger (nav item link or toggle button).
    MenuClick(MenuId),
    /// Click anywhere outside the header.
    OutsideClick,
    Escape,
}

/// Current viewport geometry, supplied with every event dispatch.
#[derive(Clone, Copy, Debug)]
pub struct Viewport {
    pub width: u32,
}

/// Registry of all menu instances of one header.
#[derive(Default)]
pub struct MenuRegistry {
    entries: Vec<MenuEntry>,
    dismissal_active: bool,
}

impl MenuRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, kind: MenuKind, container: NodeId, panel: NodeId) -> MenuId {
        self.entries.push(MenuEntry {
            kind,
            state: MenuState::Closed,
            container,
            panel,
        });
        self.entries.len() - 1
    }

    /// Add another toggle button to a mobile-nav menu. The actions section
    /// may carry its own trigger alongside the one in the logo area.
    pub fn add_mobile_trigger(&mut self, id: MenuId, button: NodeId) {
        if let Some(entry) = self.entries.get_mut(id)
            && let MenuKind::MobileNav { buttons, .. } = &mut entry.kind
        {
            buttons.push(button);
        }
    }

    pub fn state(&self, id: MenuId) -> Option<MenuState> {
        self.entries.get(id).map(|entry| entry.state)
    }

    pub fn any_open(&self) -> bool {
        self.entries
            .iter()
            .any(|entry| entry.state == MenuState::Open)
    }

    /// Whether the document-level dismissal listener should currently be
    /// installed. Owned here so handlers never manage the listener ad hoc.
    pub fn dismissal_active(&self) -> bool {
        self.dismissal_active
    }

    /// Open a menu. Opening an exclusive menu closes every other open
    /// exclusive menu first.
    pub fn open(&mut self, tree: &mut DomTree, id: MenuId) {
        let Some(exclusive) = self.entries.get(id).map(MenuEntry::is_exclusive) else {
            return;
        };
        if exclusive {
            let siblings: Vec<MenuId> = self
                .entries
                .iter()
                .enumerate()
                .filter(|(other, entry)| {
                    *other != id && entry.is_exclusive() && entry.state == MenuState::Open
                })
                .map(|(other, _)| other)
                .collect();
            for sibling in siblings {
                self.set_state(tree, sibling, MenuState::Closed);
            }
        }
        self.set_state(tree, id, MenuState::Open);
    }

    pub fn close(&mut self, tree: &mut DomTree, id: MenuId) {
        self.set_state(tree, id, MenuState::Closed);
    }

    pub fn toggle(&mut self, tree: &mut DomTree, id: MenuId) {
        match self.state(id) {
            Some(MenuState::Closed) => self.open(tree, id),
            Some(MenuState::Open) => self.close(tree, id),
            None => {}
        }
    }

    /// Close every open menu, of every kind.
    pub fn close_all(&mut self, tree: &mut DomTree) {
        let open: Vec<MenuId> = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.state == MenuState::Open)
            .map(|(id, _)| id)
            .collect();
        for id in open {
            self.set_state(tree, id, MenuState::Closed);
        }
    }

    fn set_state(&mut self, tree: &mut DomTree, id: MenuId, state: MenuState) {
        let Some(entry) = self.entries.get_mut(id) else {
            return;
        };
        if entry.state == state {
            return;
        }
        entry.state = state;
        project(tree, entry);
        self.update_dismissal();
    }

    fn update_dismissal(&mut self) {
        let should_be_active = self.any_open();
        if should_be_active == self.dismissal_active {
            return;
        }
        self.dismissal_active = should_be_active;
        if should_be_active {
            debug!("installing global dismissal listener");
        } else {
            debug!("removing global dismissal listener");
        }
    }
}

/// Write a menu's state onto its presentation attributes. This is the only
/// place state touches the tree.
fn project(tree: &mut DomTree, entry: &MenuEntry) {
    let open = entry.state == MenuState::Open;
    match &entry.kind {
        MenuKind::SubNav | MenuKind::Language => {
            if open {
                tree.add_class(entry.panel, "is-open");
                tree.add_class(entry.container, "is-open");
            } else {
                tree.remove_class(entry.panel, "is-open");
                tree.remove_class(entry.container, "is-open");
            }
        }
        MenuKind::MobileNav { body, buttons } => {
            if open {
                tree.add_class(entry.container, "mobile-open");
                tree.add_class(*body, "mobile-menu-open");
            } else {
                tree.remove_class(entry.container, "mobile-open");
                tree.remove_class(*body, "mobile-menu-open");
            }
            let expanded = if open { "true" } else { "false" };
            for button in buttons {
                tree.set_attr(*button, "aria-expanded", expanded);
            }
        }
    }
}
