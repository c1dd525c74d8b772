//! File browser pane: the player's file system as a lazily-loaded tree.
//! Choosing a media file enqueues it.

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
use vlcr_core::browser::{FileTree, LoadState, NodeId, ROOT};
use vlcr_core::media::{self, MediaKind};
use vlcr_core::protocol::DirectoryNode;

use crate::{
    action::{Action, ComponentId},
    app_state::AppState,
    component::Component,
    theme::{C_DIR, C_MEDIA, C_MUTED, C_OFFLINE, C_SECONDARY, C_SELECTION_BG},
    widgets::{
        pane_chrome::{pane_chrome, Badge},
        scrollable_list::ScrollableList,
        toast::Severity,
    },
};

pub struct FileBrowser {
    tree: FileTree,
    rows: ScrollableList<NodeId>,
    list_state: ListState,
}

impl Default for FileBrowser {
    fn default() -> Self {
        Self::new()
    }
}

impl FileBrowser {
    pub fn new() -> Self {
        let mut browser = Self {
            tree: FileTree::new(),
            // rows are never text-filtered
            rows: ScrollableList::new(|_: &NodeId, _: &str| true),
            list_state: ListState::default(),
        };
        browser.refresh_rows();
        browser
    }

    pub fn tree(&self) -> &FileTree {
        &self.tree
    }

    fn refresh_rows(&mut self) {
        self.rows.set_items(self.tree.visible_rows());
    }

    /// Open the root; the returned action fetches its listing.
    pub fn open_root(&mut self) -> Option<Action> {
        let path = self.tree.expand(ROOT)?;
        self.refresh_rows();
        Some(Action::Browse { node: ROOT, path })
    }

    /// Install the answer to a `Browse` action.
    pub fn on_listing(&mut self, node: NodeId, result: Result<Vec<DirectoryNode>, String>) -> usize {
        let added = match result {
            Ok(entries) => self.tree.attach_children(node, entries),
            Err(reason) => {
                self.tree.mark_failed(node, reason);
                0
            }
        };
        self.refresh_rows();
        added
    }

    fn selected(&self) -> Option<NodeId> {
        self.rows.selected_item().copied()
    }

    fn activate(&mut self, id: NodeId) -> Vec<Action> {
        let Some(node) = self.tree.node(id) else {
            return vec![];
        };
        if node.is_dir() {
            let fetch = self.tree.toggle(id);
            self.refresh_rows();
            return fetch
                .map(|path| vec![Action::Browse { node: id, path }])
                .unwrap_or_default();
        }
        let name = node.entry.name.clone();
        match self.tree.select(id) {
            Some(event) => vec![
                Action::Emit(event),
                Action::Notify(Severity::Success, format!("enqueued {name}")),
            ],
            None => vec![Action::Notify(
                Severity::Warning,
                format!("not a media file: {name}"),
            )],
        }
    }

    /// Collapse an open directory, otherwise jump to the parent row.
    fn back(&mut self, id: NodeId) {
        let Some(node) = self.tree.node(id) else {
            return;
        };
        if node.is_dir() && node.expanded {
            self.tree.collapse(id);
            self.refresh_rows();
            return;
        }
        if let Some(parent) = node.parent {
            if let Some(row) = self.rows.items.iter().position(|&n| n == parent) {
                self.rows.selected = row;
            }
        }
    }

    fn render_row(&self, id: NodeId, selected: bool, focused: bool) -> ListItem<'static> {
        let Some(node) = self.tree.node(id) else {
            return ListItem::new("");
        };
        let indent = "  ".repeat(node.depth);
        let (marker, color) = if node.is_dir() {
            let marker = match (&node.load, node.expanded) {
                (LoadState::Loading, _) => "… ",
                (LoadState::Failed(_), _) => "✗ ",
                (_, true) => "▾ ",
                (_, false) => "▸ ",
            };
            (marker, C_DIR)
        } else {
            match media::classify(&node.entry.uri) {
                Some(MediaKind::Video) => ("▪ ", C_MEDIA),
                Some(MediaKind::Audio) => ("♪ ", C_MEDIA),
                Some(MediaKind::Playlist) => ("≡ ", C_MEDIA),
                None => ("  ", C_MUTED),
            }
        };
        let mut name_style = Style::default().fg(color);
        if selected {
            name_style = name_style.add_modifier(Modifier::BOLD);
        }
        let mut spans = vec![
            Span::raw(indent),
            Span::styled(marker, Style::default().fg(color)),
            Span::styled(node.entry.name.clone(), name_style),
        ];
        if let LoadState::Failed(reason) = &node.load {
            spans.push(Span::styled(format!("  {reason}"), Style::default().fg(C_OFFLINE)));
        }
        let bg = if selected && focused {
            Style::default().bg(C_SELECTION_BG)
        } else {
            Style::default()
        };
        ListItem::new(Line::from(spans)).style(bg)
    }
}

impl Component for FileBrowser {
    fn id(&self) -> ComponentId {
        ComponentId::FileBrowser
    }

    fn handle_key(&mut self, key: KeyEvent, _state: &AppState) -> Vec<Action> {
        if key.kind == KeyEventKind::Release {
            return vec![];
        }
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.rows.select_up(1),
            KeyCode::Down | KeyCode::Char('j') => self.rows.select_down(1),
            KeyCode::PageUp => self.rows.select_up(10),
            KeyCode::PageDown => self.rows.select_down(10),
            KeyCode::Home | KeyCode::Char('g') => self.rows.select_first(),
            KeyCode::End | KeyCode::Char('G') => self.rows.select_last(),
            KeyCode::Enter | KeyCode::Right | KeyCode::Char('l') => {
                if let Some(id) = self.selected() {
                    return self.activate(id);
                }
            }
            KeyCode::Left | KeyCode::Char('h') => {
                if let Some(id) = self.selected() {
                    self.back(id);
                }
            }
            KeyCode::Char('y') => {
                if let Some(node) = self.selected().and_then(|id| self.tree.node(id)) {
                    return vec![Action::CopyToClipboard(node.entry.uri.clone())];
                }
            }
            _ => {}
        }
        vec![]
    }

    fn handle_mouse(&mut self, event: MouseEvent, area: Rect, _state: &AppState) -> Vec<Action> {
        let row = event.row.saturating_sub(area.y + 1) as usize;
        match event.kind {
            MouseEventKind::ScrollUp => self.rows.select_up(1),
            MouseEventKind::ScrollDown => self.rows.select_down(1),
            MouseEventKind::Down(MouseButton::Left) => {
                if self.rows.handle_click(row) {
                    if let Some(id) = self.selected() {
                        return self.activate(id);
                    }
                }
            }
            _ => {}
        }
        vec![]
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, focused: bool, state: &AppState) {
        let loading = self
            .rows
            .items
            .iter()
            .any(|&id| self.tree.node(id).is_some_and(|n| n.load == LoadState::Loading));
        let badge = loading.then_some(Badge {
            text: "loading",
            color: C_SECONDARY,
        });
        let block = pane_chrome("files", Some('1'), focused, badge);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if !state.online && self.tree.len() == 1 {
            frame.render_widget(
                Paragraph::new(Span::styled("  player unreachable", Style::default().fg(C_MUTED))),
                inner,
            );
            return;
        }

        let height = inner.height as usize;
        self.rows.ensure_visible(height);
        let selected_row = self.rows.selected_in_view();
        let items: Vec<ListItem> = self
            .rows
            .visible_items(height)
            .into_iter()
            .enumerate()
            .map(|(row, (_, &id))| self.render_row(id, row == selected_row, focused))
            .collect();
        self.list_state.select(Some(selected_row));
        frame.render_stateful_widget(List::new(items), inner, &mut self.list_state);
    }
}
