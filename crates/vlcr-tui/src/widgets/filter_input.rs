//! One-line text input on top of tui-input. Used for the playlist filter
//! and the VLM command prompt.

use ratatui::crossterm::event::{Event, KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use tui_input::{backend::crossterm::EventHandler, Input};

use crate::theme::{C_FILTER_BG, C_FILTER_FG, C_MUTED};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputAction {
    Changed(String),
    Submitted(String),
    Cancelled,
}

pub struct FilterInput {
    input: Input,
    active: bool,
    prompt: char,
    placeholder: String,
}

impl FilterInput {
    pub fn new(prompt: char, placeholder: impl Into<String>) -> Self {
        Self {
            input: Input::default(),
            active: false,
            prompt,
            placeholder: placeholder.into(),
        }
    }

    pub fn activate(&mut self) {
        self.active = true;
    }

    pub fn deactivate(&mut self) {
        self.active = false;
    }

    pub fn clear(&mut self) {
        self.input.reset();
    }

    pub fn text(&self) -> &str {
        self.input.value()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Esc clears text first and closes on an already-empty input.
    /// Enter hands back the text and closes.
    pub fn handle_key(&mut self, key: KeyEvent) -> InputAction {
        match key.code {
            KeyCode::Esc if !self.input.value().is_empty() => {
                self.input.reset();
                InputAction::Changed(String::new())
            }
            KeyCode::Esc => {
                self.deactivate();
                InputAction::Cancelled
            }
            KeyCode::Enter => {
                self.deactivate();
                InputAction::Submitted(self.input.value().to_string())
            }
            _ => {
                self.input.handle_event(&Event::Key(key));
                InputAction::Changed(self.input.value().to_string())
            }
        }
    }

    pub fn draw(&self, frame: &mut Frame, area: Rect) {
        let scroll = self.input.visual_scroll(area.width.saturating_sub(4) as usize);
        let value = self.input.value();
        let span = if value.is_empty() {
            Span::styled(
                format!("{} {}", self.prompt, self.placeholder),
                Style::default().fg(C_MUTED),
            )
        } else {
            let shown: String = value.chars().skip(scroll).collect();
            Span::styled(format!("{} {}", self.prompt, shown), Style::default().fg(C_FILTER_FG))
        };
        frame.render_widget(
            Paragraph::new(Line::from(span)).style(Style::default().bg(C_FILTER_BG)),
            area,
        );

        if self.active && area.width > 0 {
            let cursor_x = area.x + 2 + (self.input.visual_cursor().saturating_sub(scroll)) as u16;
            frame.set_cursor_position((cursor_x.min(area.x + area.width - 1), area.y));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_typing_then_escape_twice() {
        let mut input = FilterInput::new('/', "filter...");
        input.activate();
        assert_eq!(input.handle_key(key(KeyCode::Char('a'))), InputAction::Changed("a".into()));
        assert_eq!(input.handle_key(key(KeyCode::Esc)), InputAction::Changed(String::new()));
        assert!(input.is_active());
        assert_eq!(input.handle_key(key(KeyCode::Esc)), InputAction::Cancelled);
        assert!(!input.is_active());
    }

    #[test]
    fn test_enter_submits_text() {
        let mut input = FilterInput::new(':', "command");
        input.activate();
        for c in "show".chars() {
            input.handle_key(key(KeyCode::Char(c)));
        }
        assert_eq!(input.handle_key(key(KeyCode::Enter)), InputAction::Submitted("show".into()));
        assert!(!input.is_active());
        assert_eq!(input.text(), "show");
    }
}
