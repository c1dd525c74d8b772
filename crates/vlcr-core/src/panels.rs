//! State behind the side panels: equalizer, track sync, VLM console, and the
//! width rules for the navigation and playlist drawers.

use crate::bus::BusEvent;
use crate::protocol::Command;

// ── Slider ────────────────────────────────────────────────────────────────────

/// A bounded value moved in fixed steps. Always snapped to the step grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Slider {
    value: f64,
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl Slider {
    pub const fn new(min: f64, max: f64, step: f64, value: f64) -> Self {
        Self {
            value,
            min,
            max,
            step,
        }
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn set(&mut self, value: f64) {
        let clamped = value.clamp(self.min, self.max);
        let steps = ((clamped - self.min) / self.step).round();
        self.value = (self.min + steps * self.step).clamp(self.min, self.max);
    }

    pub fn increment(&mut self) {
        self.set(self.value + self.step);
    }

    pub fn decrement(&mut self) {
        self.set(self.value - self.step);
    }

    /// Position in 0..=1, for drawing.
    pub fn ratio(&self) -> f64 {
        if self.max <= self.min {
            return 0.0;
        }
        (self.value - self.min) / (self.max - self.min)
    }
}

// ── Equalizer ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct EqualizerState {
    pub preamp: Slider,
}

impl Default for EqualizerState {
    fn default() -> Self {
        Self {
            preamp: Slider::new(-20.0, 20.0, 1.0, 0.0),
        }
    }
}

impl EqualizerState {
    pub fn command(&self) -> Command {
        Command::Preamp {
            db: self.preamp.value() as f32,
        }
    }
}

// ── Track sync ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncField {
    Playback,
    AudioDelay,
    SubDelay,
}

impl SyncField {
    pub const ALL: [SyncField; 3] = [SyncField::Playback, SyncField::AudioDelay, SyncField::SubDelay];

    pub fn label(self) -> &'static str {
        match self {
            SyncField::Playback => "Playback speed",
            SyncField::AudioDelay => "Audio delay",
            SyncField::SubDelay => "Subtitle delay",
        }
    }
}

/// `playback_offset` is added to normal speed (1.0); delays are seconds.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackSyncState {
    pub playback_offset: Slider,
    pub audio_delay: Slider,
    pub sub_delay: Slider,
}

impl Default for TrackSyncState {
    fn default() -> Self {
        Self {
            playback_offset: Slider::new(-0.75, 3.0, 0.05, 0.0),
            audio_delay: Slider::new(-10.0, 10.0, 0.1, 0.0),
            sub_delay: Slider::new(-10.0, 10.0, 0.1, 0.0),
        }
    }
}

impl TrackSyncState {
    pub fn slider(&self, field: SyncField) -> &Slider {
        match field {
            SyncField::Playback => &self.playback_offset,
            SyncField::AudioDelay => &self.audio_delay,
            SyncField::SubDelay => &self.sub_delay,
        }
    }

    pub fn slider_mut(&mut self, field: SyncField) -> &mut Slider {
        match field {
            SyncField::Playback => &mut self.playback_offset,
            SyncField::AudioDelay => &mut self.audio_delay,
            SyncField::SubDelay => &mut self.sub_delay,
        }
    }

    pub fn rate(&self) -> f64 {
        1.0 + self.playback_offset.value()
    }

    pub fn commands(&self) -> [Command; 3] {
        [
            Command::Rate { rate: self.rate() },
            Command::AudioDelay {
                seconds: self.audio_delay.value(),
            },
            Command::SubDelay {
                seconds: self.sub_delay.value(),
            },
        ]
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

// ── VLM console ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VlmEntry {
    pub command: String,
    pub answer: Result<String, String>,
}

#[derive(Debug, Clone)]
pub struct VlmConsole {
    history: Vec<VlmEntry>,
    capacity: usize,
}

impl Default for VlmConsole {
    fn default() -> Self {
        Self::with_capacity(200)
    }
}

impl VlmConsole {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            history: Vec::new(),
            capacity: capacity.max(1),
        }
    }

    /// The bus event to publish for a typed command; blank input gives none.
    pub fn submit(input: &str) -> Option<BusEvent> {
        let command = input.trim();
        (!command.is_empty()).then(|| BusEvent::ExecuteVlm(command.to_string()))
    }

    pub fn record(&mut self, command: String, answer: Result<String, String>) {
        let answer = answer.map(|xml| strip_markup(&xml));
        self.history.push(VlmEntry { command, answer });
        if self.history.len() > self.capacity {
            let excess = self.history.len() - self.capacity;
            self.history.drain(..excess);
        }
    }

    pub fn history(&self) -> &[VlmEntry] {
        &self.history
    }

    pub fn clear(&mut self) {
        self.history.clear();
    }
}

/// Text content of VLC's XML answer with whitespace runs collapsed.
pub fn strip_markup(xml: &str) -> String {
    let mut text = String::with_capacity(xml.len());
    let mut in_tag = false;
    for ch in xml.chars() {
        match ch {
            '<' => {
                in_tag = true;
                text.push(' ');
            }
            '>' => in_tag = false,
            c if !in_tag => text.push(c),
            _ => {}
        }
    }
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

// ── Drawers ───────────────────────────────────────────────────────────────────

pub const NAV_NARROW_PCT: u16 = 60;
pub const NAV_WIDE_PCT: u16 = 20;
pub const PLAYLIST_OPEN_PCT: u16 = 60;
pub const PLAYLIST_BUTTON_PCT: u16 = 10;

/// Open/closed state of the side nav and playlist drawer plus the viewport
/// width they are laid out against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavLayout {
    nav_open: bool,
    playlist_open: bool,
    viewport: u16,
    breakpoint: u16,
}

impl NavLayout {
    pub fn new(breakpoint: u16) -> Self {
        Self {
            nav_open: false,
            playlist_open: false,
            viewport: u16::MAX,
            breakpoint,
        }
    }

    pub fn resize(&mut self, viewport: u16) {
        self.viewport = viewport;
    }

    pub fn is_narrow(&self) -> bool {
        self.viewport <= self.breakpoint
    }

    pub fn nav_open(&self) -> bool {
        self.nav_open
    }

    pub fn playlist_open(&self) -> bool {
        self.playlist_open
    }

    pub fn nav_width_pct(&self) -> u16 {
        match (self.nav_open, self.is_narrow()) {
            (false, _) => 0,
            (true, true) => NAV_NARROW_PCT,
            (true, false) => NAV_WIDE_PCT,
        }
    }

    pub fn playlist_width_pct(&self) -> u16 {
        if self.playlist_open {
            PLAYLIST_OPEN_PCT
        } else {
            0
        }
    }

    pub fn playlist_button_pct(&self) -> u16 {
        if self.playlist_open {
            0
        } else {
            PLAYLIST_BUTTON_PCT
        }
    }

    /// Events for the nav button. On a narrow viewport with the playlist
    /// open, the playlist is closed first.
    pub fn request_open_nav(&self) -> Vec<BusEvent> {
        if self.is_narrow() && self.playlist_open {
            vec![BusEvent::ClosePlaylist, BusEvent::OpenNav]
        } else {
            vec![BusEvent::OpenNav]
        }
    }

    pub fn request_open_playlist(&self) -> Vec<BusEvent> {
        if self.is_narrow() && self.nav_open {
            vec![BusEvent::CloseNav, BusEvent::OpenPlaylist]
        } else {
            vec![BusEvent::OpenPlaylist]
        }
    }

    /// A click that landed outside the playlist drawer.
    pub fn click_outside_playlist(&self) -> Option<BusEvent> {
        (self.is_narrow() && self.playlist_open).then_some(BusEvent::ClosePlaylist)
    }

    /// Apply a drawer event; returns false for events that are not about drawers.
    pub fn apply(&mut self, event: &BusEvent) -> bool {
        match event {
            BusEvent::OpenNav => self.nav_open = true,
            BusEvent::CloseNav => self.nav_open = false,
            BusEvent::OpenPlaylist => self.playlist_open = true,
            BusEvent::ClosePlaylist => self.playlist_open = false,
            _ => return false,
        }
        true
    }
}
