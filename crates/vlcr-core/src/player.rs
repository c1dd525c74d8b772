//! Local transport model. It mirrors what the player is doing and turns each
//! transport transition into one remote command.

use tokio::task::JoinHandle;
use tracing::debug;

use crate::gateway::{Gateway, Mode};
use crate::protocol::{Command, PlayState, PlayerStatus};

/// Source kind used when a playlist entry is played.
pub const DEFAULT_KIND: &str = "video/mp4";

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TransportEvent {
    Pause,
    Play,
    /// 0..=1; values outside are clamped.
    VolumeChange(f32),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaSource {
    pub src: String,
    pub kind: String,
}

/// `fraction` on the 0..=255 scale VLC's `volume` command is driven with.
pub fn volume_to_remote(fraction: f32) -> u8 {
    (fraction.clamp(0.0, 1.0) * 255.0).round() as u8
}

impl TransportEvent {
    pub fn command(self) -> Command {
        match self {
            TransportEvent::Pause => Command::Pause,
            TransportEvent::Play => Command::Play { id: None },
            TransportEvent::VolumeChange(f) => Command::Volume {
                value: volume_to_remote(f),
            },
        }
    }
}

pub struct PlaybackControl {
    gateway: Gateway,
    source: Option<MediaSource>,
    paused: bool,
    volume: f32,
}

impl PlaybackControl {
    pub fn new(gateway: Gateway) -> Self {
        Self {
            gateway,
            source: None,
            paused: true,
            volume: 1.0,
        }
    }

    pub fn source(&self) -> Option<&MediaSource> {
        self.source.as_ref()
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    pub fn on_transport_event(&mut self, event: TransportEvent) -> JoinHandle<()> {
        match event {
            TransportEvent::Pause => self.paused = true,
            TransportEvent::Play => self.paused = false,
            TransportEvent::VolumeChange(f) => self.volume = f.clamp(0.0, 1.0),
        }
        self.gateway.fire(Mode::Status, event.command().into())
    }

    /// Flip between playing and paused, sending the matching command.
    pub fn toggle(&mut self) -> JoinHandle<()> {
        let event = if self.paused {
            TransportEvent::Play
        } else {
            TransportEvent::Pause
        };
        self.on_transport_event(event)
    }

    pub fn nudge_volume(&mut self, delta: f32) -> JoinHandle<()> {
        self.on_transport_event(TransportEvent::VolumeChange(self.volume + delta))
    }

    pub fn set_video(&mut self, src: &str, kind: &str) {
        debug!(src, kind, "source changed");
        self.source = Some(MediaSource {
            src: src.to_string(),
            kind: kind.to_string(),
        });
    }

    pub fn play_item(&mut self, src: &str, id: &str) -> JoinHandle<()> {
        self.set_video(src, DEFAULT_KIND);
        self.paused = false;
        let command = Command::Play {
            id: Some(id.to_string()),
        };
        self.gateway.fire(Mode::Status, command.into())
    }

    /// Mirror the remote state without sending anything back.
    pub fn sync_from_status(&mut self, status: &PlayerStatus) {
        self.paused = status.state != PlayState::Playing;
        self.volume = status.volume_fraction();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_volume_scaling() {
        assert_eq!(volume_to_remote(1.0), 255);
        assert_eq!(volume_to_remote(0.0), 0);
        assert_eq!(volume_to_remote(0.5), 128);
        assert_eq!(volume_to_remote(1.7), 255);
        assert_eq!(volume_to_remote(-0.2), 0);
    }

    #[test]
    fn test_transport_commands() {
        assert_eq!(TransportEvent::Pause.command(), Command::Pause);
        assert_eq!(TransportEvent::Play.command(), Command::Play { id: None });
        assert_eq!(
            TransportEvent::VolumeChange(1.0).command(),
            Command::Volume { value: 255 }
        );
    }
}
