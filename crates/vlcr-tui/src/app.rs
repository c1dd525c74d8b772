//! App: owns the models, the panes and `AppState`, and runs the event loop.
//!
//! - Terminal input, bus events and background results all arrive as
//!   `AppMessage`s on one `tokio::mpsc` channel.
//! - Panes return `Vec<Action>`; `dispatch` shows each action to every pane,
//!   then applies it.
//! - Pane-originated bus events are emitted on the bus and come back in as
//!   `AppMessage::Bus`, the same path events from background tasks take.

use std::io;
use std::sync::Arc;
use std::time::Duration;

use chrono::Local;
use ratatui::crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Paragraph},
    Frame, Terminal,
};
use tokio::sync::mpsc;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, info, warn};

use vlcr_core::browser::NodeId;
use vlcr_core::bus::{AddMode, Bus, BusEvent};
use vlcr_core::config::Config;
use vlcr_core::gateway::{Gateway, Mode};
use vlcr_core::panels::NavLayout;
use vlcr_core::player::PlaybackControl;
use vlcr_core::playlist::Playlist;
use vlcr_core::protocol::{Command, DirectoryNode, Params, PlayerStatus};

use crate::{
    action::{Action, ComponentId, PanelKind},
    app_state::AppState,
    component::Component,
    components::{
        equalizer::Equalizer, file_browser::FileBrowser, header, help_overlay::HelpOverlay,
        playlist_panel::PlaylistPanel, side_nav::SideNav, track_sync::TrackSync,
        vlm_console::VlmConsole,
    },
    theme::{C_BG, C_MUTED, C_SECONDARY},
    widgets::{
        pane_chrome::pane_chrome,
        status_bar::{self, InputMode},
        toast::{Severity, ToastManager},
    },
    workspace::WorkspaceManager,
};

const VOLUME_STEP: f32 = 0.05;

// ── Internal messages ─────────────────────────────────────────────────────────

#[derive(Debug)]
enum AppMessage {
    Event(Event),
    Bus(BusEvent),
    Status(Result<PlayerStatus, String>),
    Listing {
        node: NodeId,
        result: Result<Vec<DirectoryNode>, String>,
    },
    VlmAnswer {
        command: String,
        result: Result<String, String>,
    },
}

/// Where each pane was drawn last frame, for mouse hit-testing.
#[derive(Debug, Default, Clone, Copy)]
struct PaneAreas {
    nav: Rect,
    main: Rect,
    playlist: Rect,
    opener: Rect,
}

pub struct App {
    state: AppState,
    wm: WorkspaceManager,
    toast: ToastManager,

    bus: Arc<Bus>,
    gateway: Gateway,
    playlist: Playlist,
    player: PlaybackControl,
    nav: NavLayout,

    side_nav: SideNav,
    file_browser: FileBrowser,
    equalizer: Equalizer,
    track_sync: TrackSync,
    vlm_console: VlmConsole,
    playlist_panel: PlaylistPanel,
    help_overlay: HelpOverlay,

    pane_areas: PaneAreas,
    tx: mpsc::Sender<AppMessage>,
    rx: Option<mpsc::Receiver<AppMessage>>,
    poll_interval: Duration,
    status_in_flight: bool,
    should_quit: bool,
}

impl App {
    pub fn new(config: &Config, gateway: Gateway) -> Self {
        let (tx, rx) = mpsc::channel::<AppMessage>(1024);
        let bus = Arc::clone(gateway.bus());

        // every bus event is replayed into the loop
        let bus_tx = tx.clone();
        bus.on_all(move |event| {
            if let Err(e) = bus_tx.try_send(AppMessage::Bus(event.clone())) {
                warn!("dropping bus event {:?}: {}", event.topic(), e);
            }
        });

        let state = AppState {
            endpoint: format!("{}:{}", config.vlc.host, config.vlc.port),
            paused: true,
            volume: 1.0,
            ..AppState::default()
        };

        Self {
            state,
            wm: WorkspaceManager::new(),
            toast: ToastManager::new(),
            playlist: Playlist::new(gateway.clone(), config.playlist.refresh_interval()),
            player: PlaybackControl::new(gateway.clone()),
            nav: NavLayout::new(config.ui.narrow_breakpoint_cols),
            bus,
            gateway,
            side_nav: SideNav::new(),
            file_browser: FileBrowser::new(),
            equalizer: Equalizer::new(),
            track_sync: TrackSync::new(),
            vlm_console: VlmConsole::new(),
            playlist_panel: PlaylistPanel::new(),
            help_overlay: HelpOverlay::new(),
            pane_areas: PaneAreas::default(),
            tx,
            rx: Some(rx),
            poll_interval: config.status.poll_interval(),
            status_in_flight: false,
            should_quit: false,
        }
    }

    // ── Main run loop ─────────────────────────────────────────────────────────

    pub async fn run(mut self) -> anyhow::Result<()> {
        let mut rx = self
            .rx
            .take()
            .ok_or_else(|| anyhow::anyhow!("app is already running"))?;

        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        let size = terminal.size()?;
        self.nav.resize(size.width);
        self.sync_layout();
        debug!("terminal ready, size={}x{}", size.width, size.height);

        // ── Background task: keyboard/mouse events ────────────────────────────
        let event_tx = self.tx.clone();
        tokio::task::spawn_blocking(move || {
            while let Ok(ev) = event::read() {
                if event_tx.blocking_send(AppMessage::Event(ev)).is_err() {
                    break;
                }
            }
        });

        // ── Startup: queue polling and the root listing ───────────────────────
        self.playlist.refresh_playlist();
        if let Some(action) = self.file_browser.open_root() {
            self.dispatch(action);
        }
        info!("remote started against {}", self.gateway.base_url());

        // ── Periodic timers ───────────────────────────────────────────────────
        let mut status_poll = interval(self.poll_interval);
        status_poll.set_missed_tick_behavior(MissedTickBehavior::Skip);

        let mut ui_tick = interval(Duration::from_millis(100));
        ui_tick.set_missed_tick_behavior(MissedTickBehavior::Skip);

        // ── Main loop ─────────────────────────────────────────────────────────
        loop {
            terminal.draw(|f| self.draw(f))?;
            if self.should_quit {
                break;
            }

            tokio::select! {
                Some(msg) = rx.recv() => {
                    self.handle_message(msg);
                    // drain whatever queued up behind it before redrawing
                    while let Ok(next) = rx.try_recv() {
                        self.handle_message(next);
                    }
                }
                _ = status_poll.tick() => self.poll_status(),
                _ = ui_tick.tick() => self.tick(),
            }
        }

        // ── Teardown ──────────────────────────────────────────────────────────
        self.playlist.stop_refresh();
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
        terminal.show_cursor()?;
        info!("remote stopped");
        Ok(())
    }

    fn poll_status(&mut self) {
        if self.status_in_flight {
            return;
        }
        self.status_in_flight = true;
        let gateway = self.gateway.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = gateway
                .status(&Params::new())
                .await
                .map_err(|e| e.to_string());
            let _ = tx.send(AppMessage::Status(result)).await;
        });
    }

    fn tick(&mut self) {
        self.toast.tick();
        let mut actions = Vec::new();
        let s = &self.state;
        actions.extend(self.side_nav.tick(s));
        actions.extend(self.file_browser.tick(s));
        actions.extend(self.equalizer.tick(s));
        actions.extend(self.track_sync.tick(s));
        actions.extend(self.vlm_console.tick(s));
        actions.extend(self.playlist_panel.tick(s));
        for action in actions {
            self.dispatch(action);
        }
    }

    // ── Message handler ───────────────────────────────────────────────────────

    fn handle_message(&mut self, msg: AppMessage) {
        match msg {
            AppMessage::Event(ev) => match ev {
                Event::Key(key) => {
                    if key.kind == KeyEventKind::Release {
                        return;
                    }
                    for action in self.handle_key(key) {
                        self.dispatch(action);
                    }
                }
                Event::Mouse(mouse) => {
                    for action in self.handle_mouse(mouse) {
                        self.dispatch(action);
                    }
                }
                Event::Resize(width, _) => {
                    self.nav.resize(width);
                    self.sync_layout();
                }
                _ => {}
            },
            AppMessage::Bus(event) => self.on_bus_event(event),
            AppMessage::Status(result) => self.on_status(result),
            AppMessage::Listing { node, result } => {
                match &result {
                    Ok(_) => self.toast.dismiss_spinner(),
                    Err(e) => self
                        .toast
                        .resolve_spinner(Severity::Error, format!("browse failed: {e}")),
                }
                let added = self.file_browser.on_listing(node, result);
                debug!(node, added, "listing attached");
            }
            AppMessage::VlmAnswer { command, result } => {
                if let Err(e) = &result {
                    self.toast.error(format!("vlm: {e}"));
                }
                self.vlm_console.record(command, result);
            }
        }
    }

    fn on_status(&mut self, result: Result<PlayerStatus, String>) {
        self.status_in_flight = false;
        match result {
            Ok(status) => {
                if !self.state.online {
                    info!("player reachable at {}", self.gateway.base_url());
                    self.toast.success(format!("connected to {}", self.state.endpoint));
                }
                self.player.sync_from_status(&status);
                self.state.status = status;
                self.state.online = true;
                self.state.last_error = None;
                self.state.polled_at = Some(Local::now());
                self.mirror_transport();
            }
            Err(e) => {
                if self.state.online || self.state.last_error.is_none() {
                    warn!("status poll failed: {}", e);
                    self.toast.error("player unreachable");
                }
                self.state.online = false;
                self.state.last_error = Some(e);
            }
        }
    }

    /// Route one bus event to the model that owns it, then show it to the panes.
    fn on_bus_event(&mut self, event: BusEvent) {
        debug!("bus: {:?}", event.topic());
        match &event {
            BusEvent::OpenNav
            | BusEvent::CloseNav
            | BusEvent::OpenPlaylist
            | BusEvent::ClosePlaylist => {
                self.nav.apply(&event);
                self.sync_layout();
            }
            BusEvent::AddItem {
                mode,
                id,
                title,
                src,
            } => {
                self.playlist
                    .add_item(*mode, id.clone(), title.clone(), src.clone());
                if *mode == AddMode::Append {
                    self.playlist_panel.sync(self.playlist.items());
                }
            }
            BusEvent::RemoveItem { id } => {
                self.playlist.remove_item(id);
                self.playlist_panel.sync(self.playlist.items());
            }
            BusEvent::RefreshPlaylist => {
                self.playlist.refresh_playlist();
                self.playlist_panel.sync(self.playlist.items());
            }
            BusEvent::Play { src, id } => {
                self.playlist.play(&mut self.player, src, id);
                self.mirror_transport();
            }
            BusEvent::StartPlaylist => {
                if !self.playlist.start_playlist() {
                    self.toast.warning("playlist is empty");
                }
            }
            BusEvent::ToggleRepeat => {
                self.playlist.toggle_repeat();
            }
            BusEvent::ToggleRandom => {
                self.playlist.toggle_random();
            }
            BusEvent::ExecuteVlm(command) => self.spawn_vlm(command.clone()),
            BusEvent::PopulatePlaylist(tree) => {
                if self.playlist.populate_playlist(tree) {
                    self.playlist_panel.sync(self.playlist.items());
                }
            }
        }

        let s = &self.state;
        self.side_nav.on_event(&event, s);
        self.file_browser.on_event(&event, s);
        self.equalizer.on_event(&event, s);
        self.track_sync.on_event(&event, s);
        self.vlm_console.on_event(&event, s);
        self.playlist_panel.on_event(&event, s);
    }

    fn spawn_vlm(&self, command: String) {
        let gateway = self.gateway.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = gateway.vlm(&command).await.map_err(|e| e.to_string());
            let _ = tx.send(AppMessage::VlmAnswer { command, result }).await;
        });
    }

    fn spawn_browse(&mut self, node: NodeId, path: String) {
        self.toast.spinner(format!("listing {path}"));
        let gateway = self.gateway.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = gateway.browse(&path).await.map_err(|e| e.to_string());
            let _ = tx.send(AppMessage::Listing { node, result }).await;
        });
    }

    fn mirror_transport(&mut self) {
        self.state.paused = self.player.is_paused();
        self.state.volume = self.player.volume();
        self.state.source = self.player.source().cloned();
    }

    fn sync_layout(&mut self) {
        self.state.narrow = self.nav.is_narrow();
        self.state.nav_open = self.nav.nav_open();
        self.state.playlist_open = self.nav.playlist_open();
        self.wm
            .rebuild_focus_ring(self.state.nav_open, self.state.playlist_open);
        if self.state.input_mode == InputMode::Filter && !self.state.playlist_open {
            self.dispatch(Action::CloseFilter);
        }
    }

    // ── Key handling ──────────────────────────────────────────────────────────

    fn handle_key(&mut self, key: KeyEvent) -> Vec<Action> {
        let normal = self.state.input_mode == InputMode::Normal;

        // Global keys
        match key.code {
            KeyCode::Char('c') if key.modifiers == KeyModifiers::CONTROL => {
                return vec![Action::Quit];
            }
            KeyCode::Char('q') if normal && !self.wm.show_help => return vec![Action::Quit],
            KeyCode::Char('?') if normal => return vec![Action::ToggleHelp],
            _ => {}
        }

        // Help overlay captures every key while visible; unknown keys close it
        if self.wm.show_help {
            let actions = self.help_overlay.handle_key(key, &self.state);
            if actions.is_empty() {
                return vec![Action::ToggleHelp];
            }
            return actions;
        }

        // Tab cycles focus in every mode, closing any open input first
        let close_input = match self.state.input_mode {
            InputMode::Normal => None,
            InputMode::Filter => Some(Action::CloseFilter),
            InputMode::Command => Some(Action::CloseCommand),
        };
        match key.code {
            KeyCode::Tab => return close_input.into_iter().chain([Action::FocusNext]).collect(),
            KeyCode::BackTab => {
                return close_input.into_iter().chain([Action::FocusPrev]).collect()
            }
            _ => {}
        }

        if normal {
            match key.code {
                KeyCode::Char(' ') => return vec![Action::TogglePause],
                KeyCode::Char('+') | KeyCode::Char('=') => {
                    return vec![Action::VolumeStep(VOLUME_STEP)]
                }
                KeyCode::Char('-') => return vec![Action::VolumeStep(-VOLUME_STEP)],
                KeyCode::Char('>') => return vec![Action::Send(Command::Next)],
                KeyCode::Char('<') => return vec![Action::Send(Command::Previous)],
                KeyCode::Char('S') => return vec![Action::Send(Command::Stop)],
                KeyCode::Char('n') => return vec![Action::ToggleNav],
                KeyCode::Char('p') => return vec![Action::TogglePlaylist],
                KeyCode::Char('K') => return vec![Action::ToggleKeys],
                KeyCode::Char(c @ '1'..='4') => {
                    let idx = c as usize - '1' as usize;
                    return vec![Action::ShowPanel(PanelKind::ALL[idx])];
                }
                _ => {}
            }
        }

        let s = &self.state;
        match self.wm.focused() {
            Some(ComponentId::SideNav) => self.side_nav.handle_key(key, s),
            Some(ComponentId::FileBrowser) => self.file_browser.handle_key(key, s),
            Some(ComponentId::Equalizer) => self.equalizer.handle_key(key, s),
            Some(ComponentId::TrackSync) => self.track_sync.handle_key(key, s),
            Some(ComponentId::VlmConsole) => self.vlm_console.handle_key(key, s),
            Some(ComponentId::Playlist) => self.playlist_panel.handle_key(key, s),
            Some(ComponentId::HelpOverlay) | None => vec![],
        }
    }

    // ── Mouse handling ────────────────────────────────────────────────────────

    fn handle_mouse(&mut self, event: MouseEvent) -> Vec<Action> {
        let is_click = matches!(event.kind, MouseEventKind::Down(MouseButton::Left));
        let is_scroll = matches!(
            event.kind,
            MouseEventKind::ScrollUp | MouseEventKind::ScrollDown
        );
        if !is_click && !is_scroll {
            return vec![];
        }

        fn hit(r: Rect, col: u16, row: u16) -> bool {
            r.width > 0
                && r.height > 0
                && col >= r.x
                && col < r.x + r.width
                && row >= r.y
                && row < r.y + r.height
        }

        let (col, row) = (event.column, event.row);
        let areas = self.pane_areas;
        let mut actions = Vec::new();

        if is_click && !hit(areas.playlist, col, row) {
            if let Some(close) = self.nav.click_outside_playlist() {
                actions.push(Action::Emit(close));
            }
        }

        if hit(areas.opener, col, row) {
            if is_click {
                actions.push(Action::TogglePlaylist);
            }
            return actions;
        }

        let s = &self.state;
        let (id, area, mut pane_actions) = if hit(areas.nav, col, row) {
            (ComponentId::SideNav, areas.nav, self.side_nav.handle_mouse(event, areas.nav, s))
        } else if hit(areas.playlist, col, row) {
            (
                ComponentId::Playlist,
                areas.playlist,
                self.playlist_panel.handle_mouse(event, areas.playlist, s),
            )
        } else if hit(areas.main, col, row) {
            let area = areas.main;
            let pane_actions = match self.wm.active_panel {
                PanelKind::Files => self.file_browser.handle_mouse(event, area, s),
                PanelKind::Equalizer => self.equalizer.handle_mouse(event, area, s),
                PanelKind::TrackSync => self.track_sync.handle_mouse(event, area, s),
                PanelKind::Vlm => self.vlm_console.handle_mouse(event, area, s),
            };
            (self.wm.active_panel.component(), area, pane_actions)
        } else {
            return actions;
        };
        debug!(?id, ?area, "pane click");

        if is_click && self.wm.focused() != Some(id) {
            actions.push(Action::FocusPane(id));
        }
        actions.append(&mut pane_actions);
        actions
    }

    // ── Action dispatcher ─────────────────────────────────────────────────────

    fn dispatch(&mut self, action: Action) {
        let secondary: Vec<Action> = {
            let s = &self.state;
            let mut out = Vec::new();
            out.extend(self.side_nav.on_action(&action, s));
            out.extend(self.file_browser.on_action(&action, s));
            out.extend(self.equalizer.on_action(&action, s));
            out.extend(self.track_sync.on_action(&action, s));
            out.extend(self.vlm_console.on_action(&action, s));
            out.extend(self.playlist_panel.on_action(&action, s));
            out.extend(self.help_overlay.on_action(&action, s));
            out
        };

        self.apply_action(action);

        // one level deep
        for a in secondary {
            self.apply_action(a);
        }
    }

    fn apply_action(&mut self, action: Action) {
        if !matches!(action, Action::Noop) {
            debug!("apply_action: {:?}", action);
        }
        match action {
            // ── Bus ───────────────────────────────────────────────────────────
            Action::Emit(event) => {
                self.bus.emit(&event);
            }

            // ── Playback ──────────────────────────────────────────────────────
            Action::TogglePause => {
                self.player.toggle();
                self.mirror_transport();
            }
            Action::VolumeStep(delta) => {
                self.player.nudge_volume(delta);
                self.mirror_transport();
            }
            Action::Send(command) => {
                let name = command.name();
                self.gateway.fire(Mode::Status, command.into());
                self.toast.info(format!("sent {name}"));
            }
            Action::ToggleLoop => {
                self.playlist.toggle_loop();
            }
            Action::EmptyPlaylist => {
                self.playlist.empty_playlist();
                self.playlist_panel.sync(self.playlist.items());
                self.toast.info("playlist emptied");
            }

            // ── File browser ──────────────────────────────────────────────────
            Action::Browse { node, path } => self.spawn_browse(node, path),

            // ── Drawers / panels ──────────────────────────────────────────────
            Action::ToggleNav => {
                let events = if self.nav.nav_open() {
                    vec![BusEvent::CloseNav]
                } else {
                    self.nav.request_open_nav()
                };
                for event in &events {
                    self.bus.emit(event);
                }
            }
            Action::TogglePlaylist => {
                let events = if self.nav.playlist_open() {
                    vec![BusEvent::ClosePlaylist]
                } else {
                    self.nav.request_open_playlist()
                };
                for event in &events {
                    self.bus.emit(event);
                }
            }
            Action::ShowPanel(kind) => {
                if self.state.input_mode == InputMode::Command {
                    self.state.input_mode = InputMode::Normal;
                }
                self.wm
                    .show_panel(kind, self.state.nav_open, self.state.playlist_open);
                self.state.active_panel = kind;
            }

            // ── Navigation ────────────────────────────────────────────────────
            Action::FocusNext => {
                self.wm.focus_next();
            }
            Action::FocusPrev => {
                self.wm.focus_prev();
            }
            Action::FocusPane(id) => self.wm.focus_set(id),

            // ── Text input ────────────────────────────────────────────────────
            Action::OpenFilter => self.state.input_mode = InputMode::Filter,
            Action::OpenCommand => self.state.input_mode = InputMode::Command,
            Action::CloseFilter | Action::CloseCommand => {
                self.state.input_mode = InputMode::Normal
            }

            // ── UI ────────────────────────────────────────────────────────────
            Action::ToggleHelp => self.wm.show_help = !self.wm.show_help,
            Action::ToggleKeys => self.wm.show_keys_bar = !self.wm.show_keys_bar,
            Action::CopyToClipboard(text) => {
                match arboard::Clipboard::new().and_then(|mut cb| cb.set_text(text.clone())) {
                    Ok(()) => {
                        let display = if text.chars().count() > 40 {
                            format!("{}…", text.chars().take(40).collect::<String>())
                        } else {
                            text
                        };
                        self.toast.success(format!("copied: {display}"));
                    }
                    Err(e) => {
                        warn!("clipboard error: {}", e);
                        self.toast.error("clipboard unavailable");
                    }
                }
            }
            Action::Notify(severity, message) => self.toast.push(message, severity),
            Action::Quit => self.should_quit = true,
            Action::Noop => {}
        }
    }

    // ── Drawing ───────────────────────────────────────────────────────────────

    fn draw(&mut self, frame: &mut Frame) {
        let area = frame.area();
        frame.render_widget(Block::default().style(Style::default().bg(C_BG)), area);

        let keys_h = if self.wm.show_keys_bar { 1 } else { 0 };
        let outer = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),
                Constraint::Length(1),
                Constraint::Min(0),
                Constraint::Length(keys_h),
            ])
            .split(area);

        header::draw(frame, outer[0], &self.state);
        status_bar::draw_separator(frame, outer[1]);
        self.draw_body(frame, outer[2]);

        if self.wm.show_keys_bar {
            let focused = self.wm.focused().unwrap_or(ComponentId::FileBrowser);
            status_bar::draw_keys_bar(frame, outer[3], self.state.input_mode, focused);
        }

        if self.wm.show_help {
            self.help_overlay.draw(frame, area, true, &self.state);
        }
        self.toast.draw(frame, area);
    }

    fn draw_body(&mut self, frame: &mut Frame, area: Rect) {
        let nav_pct = self.nav.nav_width_pct();
        let right_pct = self.nav.playlist_width_pct() + self.nav.playlist_button_pct();
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(nav_pct),
                Constraint::Min(0),
                Constraint::Percentage(right_pct),
            ])
            .split(area);

        let focused = self.wm.focused();
        let s = &self.state;

        self.pane_areas.nav = if nav_pct > 0 { cols[0] } else { Rect::default() };
        if nav_pct > 0 {
            self.side_nav
                .draw(frame, cols[0], focused == Some(ComponentId::SideNav), s);
        }

        let main = cols[1];
        self.pane_areas.main = main;
        let main_focused = focused == Some(self.wm.active_panel.component());
        match self.wm.active_panel {
            PanelKind::Files => self.file_browser.draw(frame, main, main_focused, s),
            PanelKind::Equalizer => self.equalizer.draw(frame, main, main_focused, s),
            PanelKind::TrackSync => self.track_sync.draw(frame, main, main_focused, s),
            PanelKind::Vlm => self.vlm_console.draw(frame, main, main_focused, s),
        }

        if self.nav.playlist_open() {
            self.pane_areas.playlist = cols[2];
            self.pane_areas.opener = Rect::default();
            self.playlist_panel
                .draw(frame, cols[2], focused == Some(ComponentId::Playlist), s);
        } else {
            self.pane_areas.playlist = Rect::default();
            self.pane_areas.opener = cols[2];
            draw_opener(frame, cols[2], self.playlist.len());
        }
    }
}

/// The strip that stands in for the closed playlist drawer.
fn draw_opener(frame: &mut Frame, area: Rect, count: usize) {
    if area.width == 0 {
        return;
    }
    let block = pane_chrome("◂", Some('p'), false, None);
    let inner = block.inner(area);
    frame.render_widget(block, area);
    let lines = vec![
        Line::from(Span::styled("playlist", Style::default().fg(C_SECONDARY))),
        Line::from(Span::styled(format!("{count} items"), Style::default().fg(C_MUTED))),
    ];
    frame.render_widget(Paragraph::new(lines), inner);
}

#[cfg(test)]
mod tests {
    use super::*;
    use vlcr_core::protocol::PlaylistItem;

    fn app() -> App {
        let config = Config::default();
        let bus = Arc::new(Bus::new());
        // nothing listens on port 9
        let gateway = Gateway::with_client(
            reqwest::Client::new(),
            "http://127.0.0.1:9/".into(),
            "",
            bus,
        );
        App::new(&config, gateway)
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_global_keys_in_normal_mode() {
        let mut app = app();
        assert!(matches!(app.handle_key(key(KeyCode::Char('q'))).as_slice(), [Action::Quit]));
        assert!(matches!(app.handle_key(key(KeyCode::Char(' '))).as_slice(), [Action::TogglePause]));
        assert!(matches!(
            app.handle_key(key(KeyCode::Char('-'))).as_slice(),
            [Action::VolumeStep(d)] if *d < 0.0
        ));
        assert!(matches!(
            app.handle_key(key(KeyCode::Char('3'))).as_slice(),
            [Action::ShowPanel(PanelKind::TrackSync)]
        ));
        assert!(matches!(
            app.handle_key(key(KeyCode::Char('>'))).as_slice(),
            [Action::Send(Command::Next)]
        ));
        assert!(matches!(
            app.handle_key(key(KeyCode::Char('<'))).as_slice(),
            [Action::Send(Command::Previous)]
        ));
        assert!(matches!(
            app.handle_key(key(KeyCode::Char('S'))).as_slice(),
            [Action::Send(Command::Stop)]
        ));
    }

    #[test]
    fn test_typing_mode_keeps_letters_local() {
        let mut app = app();
        app.state.input_mode = InputMode::Command;
        assert!(app.handle_key(key(KeyCode::Char('q'))).is_empty());
        assert!(matches!(
            app.handle_key(key(KeyCode::Tab)).as_slice(),
            [Action::CloseCommand, Action::FocusNext]
        ));
    }

    #[test]
    fn test_bus_events_drive_drawers_and_focus() {
        let mut app = app();
        app.nav.resize(60);
        app.on_bus_event(BusEvent::OpenPlaylist);
        assert!(app.state.playlist_open);
        assert!(app.state.narrow);

        // opening the nav on a narrow screen closes the playlist first
        for event in app.nav.request_open_nav() {
            app.on_bus_event(event);
        }
        assert!(app.state.nav_open);
        assert!(!app.state.playlist_open);
        assert!(app.wm.focus.contains(ComponentId::SideNav));
        assert!(!app.wm.focus.contains(ComponentId::Playlist));
    }

    #[test]
    fn test_populate_syncs_panel() {
        use vlcr_core::protocol::PlaylistNode;
        let mut app = app();
        let leaf = PlaylistNode {
            id: "7".into(),
            name: "seven.mp3".into(),
            kind: "leaf".into(),
            uri: Some("file:///seven.mp3".into()),
            ..Default::default()
        };
        let tree = PlaylistNode {
            children: vec![PlaylistNode {
                children: vec![leaf],
                ..Default::default()
            }],
            ..Default::default()
        };
        app.on_bus_event(BusEvent::PopulatePlaylist(tree));
        assert_eq!(
            app.playlist_panel.list.items,
            vec![PlaylistItem {
                id: "7".into(),
                title: "seven.mp3".into(),
                src: "file:///seven.mp3".into(),
            }]
        );
    }

    #[tokio::test]
    async fn test_refresh_event_clears_model_and_panel() {
        let mut app = app();
        for (id, title) in [("1", "a.mp3"), ("2", "b.mp3")] {
            app.on_bus_event(BusEvent::AddItem {
                mode: AddMode::Append,
                id: id.into(),
                title: title.into(),
                src: format!("file:///{title}"),
            });
        }
        assert_eq!(app.playlist.len(), 2);
        assert_eq!(app.playlist_panel.list.items.len(), 2);

        app.on_bus_event(BusEvent::RefreshPlaylist);
        assert!(app.playlist.is_empty());
        assert!(app.playlist_panel.list.items.is_empty());
        assert!(app.playlist.is_refreshing());
        app.playlist.stop_refresh();
    }

    #[test]
    fn test_status_updates_state() {
        let mut app = app();
        let status: PlayerStatus = serde_json::from_str(
            r#"{"state":"playing","volume":128,"currentplid":3,
                "information":{"category":{"meta":{"title":"Song"}}}}"#,
        )
        .unwrap();
        app.on_status(Ok(status));
        assert!(app.state.online);
        assert!(!app.state.paused);
        assert!(app.state.is_current("3"));
        assert_eq!(app.state.now_playing(), Some("Song"));

        app.on_status(Err("connection refused".into()));
        assert!(!app.state.online);
        assert_eq!(app.state.last_error.as_deref(), Some("connection refused"));
    }
}
