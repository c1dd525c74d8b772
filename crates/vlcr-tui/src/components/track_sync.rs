//! Track sync pane: playback speed, audio delay, subtitle delay.

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use vlcr_core::panels::{SyncField, TrackSyncState};

use crate::{
    action::{Action, ComponentId},
    app_state::AppState,
    component::Component,
    theme::{C_MUTED, C_SECONDARY},
    widgets::{pane_chrome::pane_chrome, slider::draw_slider},
};

#[derive(Default)]
pub struct TrackSync {
    pub state: TrackSyncState,
    selected: usize,
}

impl TrackSync {
    pub fn new() -> Self {
        Self::default()
    }

    fn field(&self) -> SyncField {
        SyncField::ALL[self.selected]
    }

    fn value_label(&self, field: SyncField) -> String {
        match field {
            SyncField::Playback => format!("{:.2}x", self.state.rate()),
            SyncField::AudioDelay | SyncField::SubDelay => {
                format!("{:+.1} s", self.state.slider(field).value())
            }
        }
    }
}

impl Component for TrackSync {
    fn id(&self) -> ComponentId {
        ComponentId::TrackSync
    }

    fn handle_key(&mut self, key: KeyEvent, _state: &AppState) -> Vec<Action> {
        if key.kind == KeyEventKind::Release {
            return vec![];
        }
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.selected = self.selected.saturating_sub(1),
            KeyCode::Down | KeyCode::Char('j') => {
                self.selected = (self.selected + 1).min(SyncField::ALL.len() - 1)
            }
            KeyCode::Left | KeyCode::Char('h') => {
                let field = self.field();
                self.state.slider_mut(field).decrement();
            }
            KeyCode::Right | KeyCode::Char('l') => {
                let field = self.field();
                self.state.slider_mut(field).increment();
            }
            KeyCode::Enter => {
                return self.state.commands().into_iter().map(Action::Send).collect();
            }
            KeyCode::Char('0') => {
                self.state.reset();
                return self.state.commands().into_iter().map(Action::Send).collect();
            }
            _ => {}
        }
        vec![]
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, focused: bool, state: &AppState) {
        let block = pane_chrome("track sync", Some('3'), focused, None);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let mut y = inner.y + 1;
        for (i, field) in SyncField::ALL.iter().copied().enumerate() {
            if y >= inner.y + inner.height {
                return;
            }
            draw_slider(
                frame,
                Rect { y, height: 1, ..inner },
                field.label(),
                self.state.slider(field).ratio(),
                &self.value_label(field),
                focused && i == self.selected,
            );
            y += 2;
        }

        if y < inner.y + inner.height {
            let s = &state.status;
            let remote = format!(
                "  player: {:.2}x  audio {:+.1} s  subs {:+.1} s",
                s.rate, s.audiodelay, s.subtitledelay
            );
            frame.render_widget(
                Paragraph::new(vec![
                    Line::from(Span::styled(remote, Style::default().fg(C_SECONDARY))),
                    Line::from(Span::styled(
                        "  ↑↓ field  ←→ adjust  Enter apply  0 reset",
                        Style::default().fg(C_MUTED),
                    )),
                ]),
                Rect {
                    y,
                    height: inner.y + inner.height - y,
                    ..inner
                },
            );
        }
    }
}
