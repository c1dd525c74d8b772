//! Colours and styles for the remote. Accent follows VLC's cone orange.

use ratatui::style::{Color, Modifier, Style};

// ── Palette ───────────────────────────────────────────────────────────────────

pub const C_BG: Color = Color::Rgb(16, 16, 18);
pub const C_ACCENT: Color = Color::Rgb(255, 136, 0);
pub const C_PLAYING: Color = Color::Rgb(110, 200, 110);
pub const C_PAUSED: Color = Color::Rgb(240, 190, 80);
pub const C_OFFLINE: Color = Color::Rgb(235, 85, 75);
pub const C_MUTED: Color = Color::Rgb(78, 76, 84);
pub const C_SEPARATOR: Color = Color::Rgb(44, 42, 48);
pub const C_SECONDARY: Color = Color::Rgb(130, 126, 140);
pub const C_PRIMARY: Color = Color::Rgb(222, 218, 226);
pub const C_SELECTION_BG: Color = Color::Rgb(36, 30, 24);
pub const C_PANEL_BORDER: Color = Color::Rgb(48, 46, 52);
pub const C_PANEL_BORDER_FOCUSED: Color = Color::Rgb(255, 136, 0);
pub const C_NUMBER_HINT: Color = Color::Rgb(100, 96, 110);
pub const C_FILTER_BG: Color = Color::Rgb(24, 22, 28);
pub const C_FILTER_FG: Color = Color::Rgb(255, 200, 110);
pub const C_DIR: Color = Color::Rgb(110, 160, 220);
pub const C_MEDIA: Color = Color::Rgb(200, 200, 210);
pub const C_SLIDER: Color = Color::Rgb(255, 150, 40);
pub const C_TOAST_INFO: Color = Color::Rgb(110, 160, 220);
pub const C_TOAST_SUCCESS: Color = Color::Rgb(110, 200, 110);
pub const C_TOAST_WARNING: Color = Color::Rgb(240, 190, 80);
pub const C_TOAST_ERROR: Color = Color::Rgb(235, 85, 75);
pub const C_MODE_NORMAL: Color = Color::Rgb(130, 126, 140);
pub const C_MODE_FILTER: Color = Color::Rgb(255, 200, 110);
pub const C_MODE_COMMAND: Color = Color::Rgb(255, 136, 0);
pub const C_POPUP_BG: Color = Color::Rgb(20, 18, 24);

// ── Styles ────────────────────────────────────────────────────────────────────

pub fn style_secondary() -> Style {
    Style::default().fg(C_SECONDARY)
}

pub fn style_muted() -> Style {
    Style::default().fg(C_MUTED)
}

pub fn style_selected(focused: bool) -> Style {
    let style = Style::default().bg(C_SELECTION_BG).fg(C_PRIMARY);
    if focused {
        style.add_modifier(Modifier::BOLD)
    } else {
        style
    }
}

pub fn style_focused_border() -> Style {
    Style::default().fg(C_PANEL_BORDER_FOCUSED)
}

pub fn style_unfocused_border() -> Style {
    Style::default().fg(C_PANEL_BORDER)
}
