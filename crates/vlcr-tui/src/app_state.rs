//! AppState: read-only view handed to every pane.
//!
//! Only the App event loop writes to it.

use chrono::{DateTime, Local};
use vlcr_core::player::MediaSource;
use vlcr_core::protocol::{PlayState, PlayerStatus};

use crate::action::PanelKind;
use crate::widgets::status_bar::InputMode;

#[derive(Debug, Default)]
pub struct AppState {
    // ── Player ─────────────────────────────────────────────────────────────
    pub status: PlayerStatus,
    pub online: bool,
    pub last_error: Option<String>,
    pub polled_at: Option<DateTime<Local>>,
    /// `host:port` shown in the header.
    pub endpoint: String,

    // ── Local transport ────────────────────────────────────────────────────
    pub paused: bool,
    pub volume: f32,
    pub source: Option<MediaSource>,

    // ── Layout ─────────────────────────────────────────────────────────────
    pub narrow: bool,
    pub nav_open: bool,
    pub playlist_open: bool,
    pub active_panel: PanelKind,
    pub input_mode: InputMode,
}

impl AppState {
    pub fn now_playing(&self) -> Option<&str> {
        self.status
            .title()
            .or_else(|| self.source.as_ref().map(|s| s.src.as_str()))
    }

    /// Whether playlist entry `id` is the one VLC is on.
    pub fn is_current(&self, id: &str) -> bool {
        self.status.current_id().as_deref() == Some(id)
    }

    pub fn is_playing(&self) -> bool {
        self.online && self.status.state == PlayState::Playing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_now_playing_falls_back_to_source() {
        let mut state = AppState::default();
        assert_eq!(state.now_playing(), None);
        state.source = Some(MediaSource {
            src: "file:///a.mkv".into(),
            kind: "video/mp4".into(),
        });
        assert_eq!(state.now_playing(), Some("file:///a.mkv"));
        assert!(!state.is_current("4"));
    }
}
