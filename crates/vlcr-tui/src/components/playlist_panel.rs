//! Playlist drawer: VLC's play queue, filterable.

use ratatui::crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, ListState, Paragraph},
    Frame,
};
use std::time::Instant;
use vlcr_core::bus::BusEvent;
use vlcr_core::protocol::{PlayState, PlaylistItem};

use crate::{
    action::{Action, ComponentId},
    app_state::AppState,
    component::Component,
    theme::{C_ACCENT, C_MUTED, C_PAUSED, C_PLAYING, C_PRIMARY, C_SECONDARY, C_SELECTION_BG},
    widgets::{
        filter_input::{FilterInput, InputAction},
        pane_chrome::{pane_chrome, Badge},
        scrollable_list::{fit_width, search_matches, ScrollableList},
    },
};

pub struct PlaylistPanel {
    pub list: ScrollableList<PlaylistItem>,
    pub filter_input: FilterInput,
    list_state: ListState,
    last_click: Option<(usize, Instant)>,
}

impl Default for PlaylistPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl PlaylistPanel {
    pub fn new() -> Self {
        Self {
            list: ScrollableList::new(|item: &PlaylistItem, q: &str| {
                search_matches(q, &format!("{} {}", item.title, item.src))
            }),
            filter_input: FilterInput::new('/', "title or uri..."),
            list_state: ListState::default(),
            last_click: None,
        }
    }

    pub fn sync(&mut self, items: &[PlaylistItem]) {
        self.list.set_items(items.to_vec());
    }

    fn play_selected(&self) -> Vec<Action> {
        match self.list.selected_item() {
            Some(item) => vec![Action::Emit(BusEvent::Play {
                src: item.src.clone(),
                id: item.id.clone(),
            })],
            None => vec![],
        }
    }

    fn handle_filter_key(&mut self, key: KeyEvent) -> Vec<Action> {
        match key.code {
            KeyCode::Up => {
                self.list.select_up(1);
                return vec![];
            }
            KeyCode::Down => {
                self.list.select_down(1);
                return vec![];
            }
            _ => {}
        }
        match self.filter_input.handle_key(key) {
            InputAction::Changed(q) => {
                self.list.set_filter(&q);
                vec![]
            }
            InputAction::Submitted(_) => vec![Action::CloseFilter],
            InputAction::Cancelled => {
                self.list.set_filter("");
                vec![Action::CloseFilter]
            }
        }
    }
}

impl Component for PlaylistPanel {
    fn id(&self) -> ComponentId {
        ComponentId::Playlist
    }

    fn handle_key(&mut self, key: KeyEvent, _state: &AppState) -> Vec<Action> {
        if key.kind == KeyEventKind::Release {
            return vec![];
        }
        if self.filter_input.is_active() {
            return self.handle_filter_key(key);
        }
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.list.select_up(1),
            KeyCode::Down | KeyCode::Char('j') => self.list.select_down(1),
            KeyCode::PageUp => self.list.select_up(10),
            KeyCode::PageDown => self.list.select_down(10),
            KeyCode::Home | KeyCode::Char('g') => self.list.select_first(),
            KeyCode::End | KeyCode::Char('G') => self.list.select_last(),
            KeyCode::Enter => return self.play_selected(),
            KeyCode::Char('d') | KeyCode::Delete => {
                if let Some(item) = self.list.selected_item() {
                    return vec![Action::Emit(BusEvent::RemoveItem { id: item.id.clone() })];
                }
            }
            KeyCode::Char('s') => return vec![Action::Emit(BusEvent::StartPlaylist)],
            KeyCode::Char('R') => return vec![Action::Emit(BusEvent::ToggleRepeat)],
            KeyCode::Char('z') => return vec![Action::Emit(BusEvent::ToggleRandom)],
            KeyCode::Char('L') => return vec![Action::ToggleLoop],
            KeyCode::Char('D') => return vec![Action::EmptyPlaylist],
            KeyCode::Char('r') => return vec![Action::Emit(BusEvent::RefreshPlaylist)],
            KeyCode::Char('y') => {
                if let Some(item) = self.list.selected_item() {
                    return vec![Action::CopyToClipboard(item.src.clone())];
                }
            }
            KeyCode::Char('/') => {
                self.filter_input.activate();
                return vec![Action::OpenFilter];
            }
            KeyCode::Esc | KeyCode::Char('x') => {
                return vec![Action::Emit(BusEvent::ClosePlaylist)];
            }
            _ => {}
        }
        vec![]
    }

    fn handle_mouse(&mut self, event: MouseEvent, area: Rect, _state: &AppState) -> Vec<Action> {
        let row = event.row.saturating_sub(area.y + 1) as usize;
        match event.kind {
            MouseEventKind::ScrollUp => self.list.select_up(1),
            MouseEventKind::ScrollDown => self.list.select_down(1),
            MouseEventKind::Down(MouseButton::Left) => {
                let double = self
                    .last_click
                    .is_some_and(|(r, t)| r == row && t.elapsed().as_millis() < 400);
                if self.list.handle_click(row) && double {
                    self.last_click = None;
                    return self.play_selected();
                }
                self.last_click = Some((row, Instant::now()));
            }
            _ => {}
        }
        vec![]
    }

    fn on_action(&mut self, action: &Action, _state: &AppState) -> Vec<Action> {
        if let Action::CloseFilter = action {
            self.filter_input.deactivate();
        }
        vec![]
    }

    fn on_event(&mut self, event: &BusEvent, _state: &AppState) {
        // a manual refresh empties the list until the next fetch lands
        if let BusEvent::RefreshPlaylist = event {
            self.list.set_items(Vec::new());
        }
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, focused: bool, state: &AppState) {
        let count = format!("{}", self.list.total_len());
        let badge = (self.list.total_len() > 0).then(|| Badge {
            text: &count,
            color: C_MUTED,
        });
        let block = pane_chrome("playlist", Some('p'), focused, badge);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let mut list_area = inner;
        if self.filter_input.is_active() || !self.list.filter.is_empty() {
            list_area.height = list_area.height.saturating_sub(1);
            let filter_area = Rect {
                y: inner.y + inner.height.saturating_sub(1),
                height: 1,
                ..inner
            };
            self.filter_input.draw(frame, filter_area);
        }

        if self.list.is_empty() {
            let msg = if self.list.total_len() > 0 {
                "  nothing matches the filter"
            } else if state.online {
                "  empty; r refreshes"
            } else {
                "  waiting for the player..."
            };
            frame.render_widget(
                Paragraph::new(Span::styled(msg, Style::default().fg(C_MUTED))),
                list_area,
            );
            return;
        }

        let height = list_area.height as usize;
        let title_w = (list_area.width as usize).saturating_sub(2);
        self.list.ensure_visible(height);
        let selected_row = self.list.selected_in_view();
        let items: Vec<ListItem> = self
            .list
            .visible_items(height)
            .into_iter()
            .enumerate()
            .map(|(row, (_, item))| {
                let selected = row == selected_row;
                let current = state.is_current(&item.id);
                let (icon, icon_color) = match (current, state.status.state) {
                    (true, PlayState::Playing) => ("▶ ", C_PLAYING),
                    (true, PlayState::Paused) => ("⏸ ", C_PAUSED),
                    (true, _) => ("■ ", C_ACCENT),
                    (false, _) => ("  ", C_MUTED),
                };
                let title_style = if current {
                    Style::default().fg(C_ACCENT).add_modifier(Modifier::BOLD)
                } else if selected {
                    Style::default().fg(C_PRIMARY).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(C_SECONDARY)
                };
                let bg = if selected && focused {
                    Style::default().bg(C_SELECTION_BG)
                } else {
                    Style::default()
                };
                ListItem::new(Line::from(vec![
                    Span::styled(icon, Style::default().fg(icon_color)),
                    Span::styled(fit_width(&item.title, title_w), title_style),
                ]))
                .style(bg)
            })
            .collect();

        self.list_state.select(Some(selected_row));
        frame.render_stateful_widget(List::new(items), list_area, &mut self.list_state);
    }
}
