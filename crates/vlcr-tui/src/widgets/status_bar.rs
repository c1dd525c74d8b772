//! Bottom rows: input mode badge and the key hints for the focused pane.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::action::ComponentId;
use crate::theme::{C_MODE_COMMAND, C_MODE_FILTER, C_MODE_NORMAL, C_MUTED, C_SEPARATOR};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    #[default]
    Normal,
    Filter,
    Command,
}

impl InputMode {
    pub fn label(self) -> &'static str {
        match self {
            Self::Normal => "NORMAL",
            Self::Filter => "FILTER",
            Self::Command => "COMMAND",
        }
    }

    pub fn color(self) -> Color {
        match self {
            Self::Normal => C_MODE_NORMAL,
            Self::Filter => C_MODE_FILTER,
            Self::Command => C_MODE_COMMAND,
        }
    }
}

pub fn key_hints(mode: InputMode, focused: ComponentId) -> &'static str {
    match mode {
        InputMode::Filter => "type to filter  Enter keep  Esc clear+close",
        InputMode::Command => "type a VLM command  Enter run  Esc cancel",
        InputMode::Normal => match focused {
            ComponentId::SideNav => "↑↓ select  Enter open panel  Esc close  Tab next  ? help  q quit",
            ComponentId::FileBrowser => {
                "↑↓ select  Enter/→ open or enqueue  ← collapse  Space pause  +/- vol  n nav  p playlist  ? help"
            }
            ComponentId::Equalizer => "←→ preamp  Enter apply  0 reset  Tab next  ? help",
            ComponentId::TrackSync => "↑↓ field  ←→ adjust  Enter apply  0 reset  Tab next  ? help",
            ComponentId::VlmConsole => ": or Enter type command  c clear  Tab next  ? help",
            ComponentId::Playlist => {
                "Enter play  d delete  D empty  s start  R repeat  z random  L loop  r refresh  y copy  / filter"
            }
            ComponentId::HelpOverlay => "Esc/? close",
        },
    }
}

pub fn draw_keys_bar(frame: &mut Frame, area: Rect, mode: InputMode, focused: ComponentId) {
    let line = Line::from(vec![
        Span::styled(
            format!(" {} ", mode.label()),
            Style::default().fg(mode.color()).add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::styled(key_hints(mode, focused), Style::default().fg(C_MUTED)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

pub fn draw_separator(frame: &mut Frame, area: Rect) {
    let line = Line::from(Span::styled(
        "─".repeat(area.width as usize),
        Style::default().fg(C_SEPARATOR),
    ));
    frame.render_widget(Paragraph::new(line), area);
}
