//! WorkspaceManager: which panel fills the main area, overlay toggles, and the
//! focus ring derived from which drawers are open.

use crate::action::{ComponentId, PanelKind};
use crate::focus::FocusRing;

pub struct WorkspaceManager {
    pub active_panel: PanelKind,
    pub show_help: bool,
    pub show_keys_bar: bool,
    pub focus: FocusRing,
}

impl WorkspaceManager {
    pub fn new() -> Self {
        let mut wm = Self {
            active_panel: PanelKind::default(),
            show_help: false,
            show_keys_bar: true,
            focus: FocusRing::default(),
        };
        wm.rebuild_focus_ring(false, false);
        wm
    }

    /// Ring order follows screen order: nav, main panel, playlist drawer.
    pub fn rebuild_focus_ring(&mut self, nav_open: bool, playlist_open: bool) {
        let mut items = Vec::with_capacity(3);
        if nav_open {
            items.push(ComponentId::SideNav);
        }
        items.push(self.active_panel.component());
        if playlist_open {
            items.push(ComponentId::Playlist);
        }
        self.focus.set_items(items);
    }

    pub fn show_panel(&mut self, kind: PanelKind, nav_open: bool, playlist_open: bool) {
        self.active_panel = kind;
        self.rebuild_focus_ring(nav_open, playlist_open);
        self.focus.set(kind.component());
    }

    pub fn focused(&self) -> Option<ComponentId> {
        self.focus.current()
    }

    pub fn focus_next(&mut self) -> Option<ComponentId> {
        self.focus.next()
    }

    pub fn focus_prev(&mut self) -> Option<ComponentId> {
        self.focus.prev()
    }

    pub fn focus_set(&mut self, id: ComponentId) {
        self.focus.set(id);
    }
}

impl Default for WorkspaceManager {
    fn default() -> Self {
        Self::new()
    }
}
