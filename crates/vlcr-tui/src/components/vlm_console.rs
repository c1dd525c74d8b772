//! VLM console: type a command, see VLC's answer.

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};
use vlcr_core::panels::VlmConsole as History;

use crate::{
    action::{Action, ComponentId},
    app_state::AppState,
    component::Component,
    theme::{C_ACCENT, C_MUTED, C_OFFLINE, C_SECONDARY},
    widgets::{
        filter_input::{FilterInput, InputAction},
        pane_chrome::pane_chrome,
    },
};

pub struct VlmConsole {
    history: History,
    input: FilterInput,
}

impl Default for VlmConsole {
    fn default() -> Self {
        Self::new()
    }
}

impl VlmConsole {
    pub fn new() -> Self {
        Self {
            history: History::default(),
            input: FilterInput::new(':', "show, help, new ... broadcast ..."),
        }
    }

    pub fn record(&mut self, command: String, answer: Result<String, String>) {
        self.history.record(command, answer);
    }

    pub fn history(&self) -> &History {
        &self.history
    }
}

impl Component for VlmConsole {
    fn id(&self) -> ComponentId {
        ComponentId::VlmConsole
    }

    fn handle_key(&mut self, key: KeyEvent, _state: &AppState) -> Vec<Action> {
        if key.kind == KeyEventKind::Release {
            return vec![];
        }
        if self.input.is_active() {
            return match self.input.handle_key(key) {
                InputAction::Changed(_) => vec![],
                InputAction::Cancelled => vec![Action::CloseCommand],
                InputAction::Submitted(text) => {
                    self.input.clear();
                    let mut actions = vec![Action::CloseCommand];
                    actions.extend(History::submit(&text).map(Action::Emit));
                    actions
                }
            };
        }
        match key.code {
            KeyCode::Char(':') | KeyCode::Enter => {
                self.input.activate();
                vec![Action::OpenCommand]
            }
            KeyCode::Char('c') => {
                self.history.clear();
                vec![]
            }
            _ => vec![],
        }
    }

    fn on_action(&mut self, action: &Action, _state: &AppState) -> Vec<Action> {
        if let Action::CloseCommand = action {
            self.input.deactivate();
        }
        vec![]
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, focused: bool, _state: &AppState) {
        let block = pane_chrome("vlm console", Some('4'), focused, None);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        if inner.height < 2 {
            return;
        }

        let log_area = Rect {
            height: inner.height - 1,
            ..inner
        };
        let input_area = Rect {
            y: inner.y + inner.height - 1,
            height: 1,
            ..inner
        };

        let mut lines = Vec::new();
        for entry in self.history.history() {
            lines.push(Line::from(vec![
                Span::styled("> ", Style::default().fg(C_ACCENT)),
                Span::styled(
                    entry.command.clone(),
                    Style::default().fg(C_ACCENT).add_modifier(Modifier::BOLD),
                ),
            ]));
            let (text, color) = match &entry.answer {
                Ok(text) if text.is_empty() => ("(no output)".to_string(), C_MUTED),
                Ok(text) => (text.clone(), C_SECONDARY),
                Err(e) => (format!("error: {e}"), C_OFFLINE),
            };
            lines.push(Line::from(Span::styled(format!("  {text}"), Style::default().fg(color))));
        }
        // keep the newest lines in view
        let scroll = (lines.len() as u16).saturating_sub(log_area.height);
        frame.render_widget(
            Paragraph::new(lines).wrap(Wrap { trim: false }).scroll((scroll, 0)),
            log_area,
        );
        self.input.draw(frame, input_area);
    }
}
