//! Side nav drawer: picks what the main pane shows.

use ratatui::crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use vlcr_core::bus::BusEvent;

use crate::{
    action::{Action, ComponentId, PanelKind},
    app_state::AppState,
    component::Component,
    theme::{style_selected, C_ACCENT, C_NUMBER_HINT, C_SECONDARY},
    widgets::pane_chrome::pane_chrome,
};

#[derive(Default)]
pub struct SideNav {
    selected: usize,
}

impl SideNav {
    pub fn new() -> Self {
        Self::default()
    }

    fn open_selected(&self, state: &AppState) -> Vec<Action> {
        let kind = PanelKind::ALL[self.selected];
        let mut actions = vec![Action::ShowPanel(kind)];
        // the drawer covers most of a narrow screen
        if state.narrow {
            actions.push(Action::Emit(BusEvent::CloseNav));
        }
        actions
    }
}

impl Component for SideNav {
    fn id(&self) -> ComponentId {
        ComponentId::SideNav
    }

    fn handle_key(&mut self, key: KeyEvent, state: &AppState) -> Vec<Action> {
        if key.kind == KeyEventKind::Release {
            return vec![];
        }
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.selected = self.selected.saturating_sub(1),
            KeyCode::Down | KeyCode::Char('j') => {
                self.selected = (self.selected + 1).min(PanelKind::ALL.len() - 1)
            }
            KeyCode::Enter | KeyCode::Right => return self.open_selected(state),
            KeyCode::Esc | KeyCode::Char('x') => return vec![Action::Emit(BusEvent::CloseNav)],
            _ => {}
        }
        vec![]
    }

    fn handle_mouse(&mut self, event: MouseEvent, area: Rect, state: &AppState) -> Vec<Action> {
        if let MouseEventKind::Down(MouseButton::Left) = event.kind {
            let row = event.row.saturating_sub(area.y + 1) as usize;
            if row < PanelKind::ALL.len() {
                self.selected = row;
                return self.open_selected(state);
            }
        }
        vec![]
    }

    fn on_action(&mut self, action: &Action, _state: &AppState) -> Vec<Action> {
        if let Action::ShowPanel(kind) = action {
            if let Some(i) = PanelKind::ALL.iter().position(|k| k == kind) {
                self.selected = i;
            }
        }
        vec![]
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, focused: bool, state: &AppState) {
        let block = pane_chrome("menu", Some('n'), focused, None);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let lines: Vec<Line> = PanelKind::ALL
            .iter()
            .enumerate()
            .map(|(i, kind)| {
                let active = *kind == state.active_panel;
                let label_style = if i == self.selected && focused {
                    style_selected(true)
                } else if active {
                    Style::default().fg(C_ACCENT)
                } else {
                    Style::default().fg(C_SECONDARY)
                };
                Line::from(vec![
                    Span::styled(format!(" {} ", i + 1), Style::default().fg(C_NUMBER_HINT)),
                    Span::styled(kind.label(), label_style),
                ])
            })
            .collect();
        frame.render_widget(Paragraph::new(lines), inner);
    }
}
