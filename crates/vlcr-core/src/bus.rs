//! In-process publish/subscribe between the widgets.
//!
//! Handlers run synchronously on the emitting thread, in registration order.
//! The registry lock is released before any handler runs, so a handler may
//! emit or subscribe again.

use parking_lot::RwLock;
use std::sync::Arc;

use crate::protocol::PlaylistNode;

/// How an `AddItem` reaches the playlist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum AddMode {
    /// Append locally only.
    Append = 0,
    /// Ask the player to enqueue, then refresh from it.
    Enqueue = 1,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topic {
    OpenNav,
    CloseNav,
    OpenPlaylist,
    ClosePlaylist,
    AddItem,
    RemoveItem,
    RefreshPlaylist,
    Play,
    StartPlaylist,
    ToggleRepeat,
    ToggleRandom,
    ExecuteVlm,
    PopulatePlaylist,
}

impl Topic {
    pub const ALL: [Topic; 13] = [
        Topic::OpenNav,
        Topic::CloseNav,
        Topic::OpenPlaylist,
        Topic::ClosePlaylist,
        Topic::AddItem,
        Topic::RemoveItem,
        Topic::RefreshPlaylist,
        Topic::Play,
        Topic::StartPlaylist,
        Topic::ToggleRepeat,
        Topic::ToggleRandom,
        Topic::ExecuteVlm,
        Topic::PopulatePlaylist,
    ];
}

#[derive(Debug, Clone, PartialEq)]
pub enum BusEvent {
    OpenNav,
    CloseNav,
    OpenPlaylist,
    ClosePlaylist,
    AddItem {
        mode: AddMode,
        id: String,
        title: String,
        src: String,
    },
    RemoveItem {
        id: String,
    },
    RefreshPlaylist,
    Play {
        src: String,
        id: String,
    },
    StartPlaylist,
    ToggleRepeat,
    ToggleRandom,
    ExecuteVlm(String),
    PopulatePlaylist(PlaylistNode),
}

impl BusEvent {
    pub fn topic(&self) -> Topic {
        match self {
            Self::OpenNav => Topic::OpenNav,
            Self::CloseNav => Topic::CloseNav,
            Self::OpenPlaylist => Topic::OpenPlaylist,
            Self::ClosePlaylist => Topic::ClosePlaylist,
            Self::AddItem { .. } => Topic::AddItem,
            Self::RemoveItem { .. } => Topic::RemoveItem,
            Self::RefreshPlaylist => Topic::RefreshPlaylist,
            Self::Play { .. } => Topic::Play,
            Self::StartPlaylist => Topic::StartPlaylist,
            Self::ToggleRepeat => Topic::ToggleRepeat,
            Self::ToggleRandom => Topic::ToggleRandom,
            Self::ExecuteVlm(_) => Topic::ExecuteVlm,
            Self::PopulatePlaylist(_) => Topic::PopulatePlaylist,
        }
    }
}

pub type Handler = Arc<dyn Fn(&BusEvent) + Send + Sync>;

#[derive(Default)]
pub struct Bus {
    handlers: RwLock<Vec<(Topic, Handler)>>,
}

impl Bus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on<F>(&self, topic: Topic, handler: F)
    where
        F: Fn(&BusEvent) + Send + Sync + 'static,
    {
        self.handlers.write().push((topic, Arc::new(handler)));
    }

    /// Register one handler for every topic.
    pub fn on_all<F>(&self, handler: F)
    where
        F: Fn(&BusEvent) + Send + Sync + 'static,
    {
        let handler: Handler = Arc::new(handler);
        let mut handlers = self.handlers.write();
        for topic in Topic::ALL {
            handlers.push((topic, Arc::clone(&handler)));
        }
    }

    /// Returns the number of handlers that ran.
    pub fn emit(&self, event: &BusEvent) -> usize {
        let topic = event.topic();
        let matching: Vec<Handler> = self
            .handlers
            .read()
            .iter()
            .filter(|(t, _)| *t == topic)
            .map(|(_, h)| Arc::clone(h))
            .collect();

        tracing::trace!(?topic, handlers = matching.len(), "bus emit");
        for handler in &matching {
            handler(event);
        }
        matching.len()
    }

    pub fn handler_count(&self, topic: Topic) -> usize {
        self.handlers.read().iter().filter(|(t, _)| *t == topic).count()
    }
}

impl std::fmt::Debug for Bus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bus")
            .field("handlers", &self.handlers.read().len())
            .finish()
    }
}
