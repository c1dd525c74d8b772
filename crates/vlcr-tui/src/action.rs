//! Action enum: everything a component can ask the App to do.

use vlcr_core::browser::NodeId;
use vlcr_core::bus::BusEvent;
use vlcr_core::protocol::Command;

use crate::widgets::toast::Severity;

/// Focusable panes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentId {
    SideNav,
    FileBrowser,
    Equalizer,
    TrackSync,
    VlmConsole,
    Playlist,
    HelpOverlay,
}

/// What the main pane shows; picked from the side nav.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PanelKind {
    #[default]
    Files,
    Equalizer,
    TrackSync,
    Vlm,
}

impl PanelKind {
    pub const ALL: [PanelKind; 4] = [
        PanelKind::Files,
        PanelKind::Equalizer,
        PanelKind::TrackSync,
        PanelKind::Vlm,
    ];

    pub fn label(self) -> &'static str {
        match self {
            PanelKind::Files => "file browser",
            PanelKind::Equalizer => "equalizer",
            PanelKind::TrackSync => "track sync",
            PanelKind::Vlm => "vlm console",
        }
    }

    pub fn component(self) -> ComponentId {
        match self {
            PanelKind::Files => ComponentId::FileBrowser,
            PanelKind::Equalizer => ComponentId::Equalizer,
            PanelKind::TrackSync => ComponentId::TrackSync,
            PanelKind::Vlm => ComponentId::VlmConsole,
        }
    }
}

#[derive(Debug, Clone)]
pub enum Action {
    // ── Bus ──────────────────────────────────────────────────────────────────
    Emit(BusEvent),

    // ── Playback ─────────────────────────────────────────────────────────────
    TogglePause,
    VolumeStep(f32),
    Send(Command),
    ToggleLoop,
    EmptyPlaylist,

    // ── File browser ─────────────────────────────────────────────────────────
    Browse { node: NodeId, path: String },

    // ── Drawers / panels ─────────────────────────────────────────────────────
    ToggleNav,
    TogglePlaylist,
    ShowPanel(PanelKind),

    // ── Navigation ───────────────────────────────────────────────────────────
    FocusNext,
    FocusPrev,
    FocusPane(ComponentId),

    // ── Text input ───────────────────────────────────────────────────────────
    OpenFilter,
    CloseFilter,
    OpenCommand,
    CloseCommand,

    // ── UI ───────────────────────────────────────────────────────────────────
    ToggleHelp,
    ToggleKeys,
    CopyToClipboard(String),
    Notify(Severity, String),
    Quit,
    Noop,
}
