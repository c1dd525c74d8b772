//! Equalizer pane: pre-amp gain.

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use vlcr_core::panels::EqualizerState;

use crate::{
    action::{Action, ComponentId},
    app_state::AppState,
    component::Component,
    theme::C_MUTED,
    widgets::{pane_chrome::pane_chrome, slider::draw_slider},
};

#[derive(Default)]
pub struct Equalizer {
    pub state: EqualizerState,
}

impl Equalizer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Component for Equalizer {
    fn id(&self) -> ComponentId {
        ComponentId::Equalizer
    }

    fn handle_key(&mut self, key: KeyEvent, _state: &AppState) -> Vec<Action> {
        if key.kind == KeyEventKind::Release {
            return vec![];
        }
        match key.code {
            KeyCode::Left | KeyCode::Char('h') => self.state.preamp.decrement(),
            KeyCode::Right | KeyCode::Char('l') => self.state.preamp.increment(),
            KeyCode::Enter => return vec![Action::Send(self.state.command())],
            KeyCode::Char('0') => {
                self.state = EqualizerState::default();
                return vec![Action::Send(self.state.command())];
            }
            _ => {}
        }
        vec![]
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, focused: bool, _state: &AppState) {
        let block = pane_chrome("equalizer", Some('2'), focused, None);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        if inner.height < 3 {
            return;
        }
        let preamp = &self.state.preamp;
        draw_slider(
            frame,
            Rect { y: inner.y + 1, height: 1, ..inner },
            "Preamp",
            preamp.ratio(),
            &format!("{:+.0} dB", preamp.value()),
            focused,
        );
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                "  ←→ adjust  Enter apply  0 reset",
                Style::default().fg(C_MUTED),
            ))),
            Rect { y: inner.y + 2, height: 1, ..inner },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::crossterm::event::KeyModifiers;
    use vlcr_core::protocol::Command;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_adjust_then_apply() {
        let mut eq = Equalizer::new();
        let state = AppState::default();
        for _ in 0..3 {
            assert!(eq.handle_key(key(KeyCode::Right), &state).is_empty());
        }
        let actions = eq.handle_key(key(KeyCode::Enter), &state);
        assert!(matches!(actions.as_slice(), [Action::Send(Command::Preamp { db })] if *db == 3.0));
        let actions = eq.handle_key(key(KeyCode::Char('0')), &state);
        assert!(matches!(actions.as_slice(), [Action::Send(Command::Preamp { db })] if *db == 0.0));
    }
}
