//! The local copy of VLC's play queue and the task that keeps it fresh.

use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::bus::{AddMode, Bus, BusEvent};
use crate::gateway::{Gateway, Mode};
use crate::player::PlaybackControl;
use crate::protocol::{Command, Params, PlaylistItem, PlaylistNode};

/// One playlist fetch; the tree reaches the widgets as `PopulatePlaylist`.
async fn fetch_once(gateway: &Gateway) {
    if let Err(e) = gateway.send_command(Mode::Playlist, &Params::new()).await {
        warn!("playlist fetch failed: {}", e);
    }
}

/// Periodic playlist fetch. Cancelling also drops a fetch in flight, so a
/// stopped task never publishes.
struct RefreshTask {
    token: CancellationToken,
    handle: JoinHandle<()>,
}

impl RefreshTask {
    fn spawn(gateway: Gateway, period: Duration) -> Self {
        let token = CancellationToken::new();
        let shutdown = token.clone();
        let handle = tokio::spawn(async move {
            let mut ticker = interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                tokio::select! {
                    biased;
                    _ = shutdown.cancelled() => break,
                    _ = ticker.tick() => {
                        tokio::select! {
                            biased;
                            _ = shutdown.cancelled() => break,
                            _ = fetch_once(&gateway) => {}
                        }
                    }
                }
            }
            debug!("playlist refresh task stopped");
        });
        Self { token, handle }
    }

    fn is_running(&self) -> bool {
        !self.token.is_cancelled() && !self.handle.is_finished()
    }
}

impl Drop for RefreshTask {
    fn drop(&mut self) {
        self.token.cancel();
        self.handle.abort();
    }
}

pub struct Playlist {
    items: Vec<PlaylistItem>,
    gateway: Gateway,
    refresher: Option<RefreshTask>,
    refresh_interval: Duration,
}

impl Playlist {
    pub fn new(gateway: Gateway, refresh_interval: Duration) -> Self {
        Self {
            items: Vec::new(),
            gateway,
            refresher: None,
            refresh_interval,
        }
    }

    pub fn items(&self) -> &[PlaylistItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn bus(&self) -> &Arc<Bus> {
        self.gateway.bus()
    }

    /// `Append` pushes a local entry. `Enqueue` leaves the local list alone,
    /// asks VLC to enqueue `src` and emits `RefreshPlaylist` once VLC answered.
    pub fn add_item(
        &mut self,
        mode: AddMode,
        id: String,
        title: String,
        src: String,
    ) -> Option<JoinHandle<()>> {
        match mode {
            AddMode::Append => {
                self.items.push(PlaylistItem { id, title, src });
                None
            }
            AddMode::Enqueue => {
                let gateway = self.gateway.clone();
                Some(tokio::spawn(async move {
                    let params = Params::from(Command::Enqueue { input: src });
                    if let Err(e) = gateway.send_command(Mode::Status, &params).await {
                        warn!("enqueue failed: {}", e);
                    }
                    gateway.bus().emit(&BusEvent::RefreshPlaylist);
                }))
            }
        }
    }

    /// Drops every local entry with `id`, then deletes it remotely and refetches.
    pub fn remove_item(&mut self, id: &str) -> JoinHandle<()> {
        self.items.retain(|item| item.id != id);
        let gateway = self.gateway.clone();
        let params = Params::from(Command::Delete { id: id.to_string() });
        tokio::spawn(async move {
            if let Err(e) = gateway.send_command(Mode::Status, &params).await {
                warn!("delete failed: {}", e);
            }
            fetch_once(&gateway).await;
        })
    }

    /// One fetch; the result arrives as `PopulatePlaylist` on the bus.
    pub fn fetch_playlist(&self) -> JoinHandle<()> {
        let gateway = self.gateway.clone();
        tokio::spawn(async move { fetch_once(&gateway).await })
    }

    /// Empties the player's queue, then fetches the (empty) result.
    pub fn empty_playlist(&mut self) -> JoinHandle<()> {
        self.items.clear();
        let gateway = self.gateway.clone();
        tokio::spawn(async move {
            if let Err(e) = gateway.send_command(Mode::Status, &Command::Empty.into()).await {
                warn!("empty failed: {}", e);
            }
            fetch_once(&gateway).await;
        })
    }

    /// Clear and (re)start the periodic fetch. The first fetch is immediate.
    pub fn refresh_playlist(&mut self) {
        self.clear();
        if self.refresher.take().is_some() {
            debug!("restarting playlist refresh");
        }
        self.refresher = Some(RefreshTask::spawn(
            self.gateway.clone(),
            self.refresh_interval,
        ));
    }

    pub fn stop_refresh(&mut self) {
        if self.refresher.take().is_some() {
            info!("playlist refresh stopped");
        }
    }

    pub fn is_refreshing(&self) -> bool {
        self.refresher.as_ref().is_some_and(RefreshTask::is_running)
    }

    /// Rebuild from the play queue (`children[0].children`). A tree without
    /// that shape leaves the list as it was; returns whether it was applied.
    pub fn populate_playlist(&mut self, tree: &PlaylistNode) -> bool {
        let Some(queue) = tree.queue() else {
            warn!("playlist tree has no play queue; keeping {} items", self.items.len());
            return false;
        };
        self.items = queue.iter().map(PlaylistItem::from).collect();
        true
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn play(&self, player: &mut PlaybackControl, src: &str, id: &str) -> JoinHandle<()> {
        player.play_item(src, id)
    }

    /// Emit `Play` for the first entry. Returns false on an empty list.
    pub fn start_playlist(&self) -> bool {
        let Some(first) = self.items.first() else {
            return false;
        };
        self.bus().emit(&BusEvent::Play {
            src: first.src.clone(),
            id: first.id.clone(),
        });
        true
    }

    pub fn toggle_repeat(&self) -> JoinHandle<()> {
        self.gateway.fire(Mode::Status, Command::Repeat.into())
    }

    pub fn toggle_random(&self) -> JoinHandle<()> {
        self.gateway.fire(Mode::Status, Command::Random.into())
    }

    pub fn toggle_loop(&self) -> JoinHandle<()> {
        self.gateway.fire(Mode::Status, Command::Loop.into())
    }

    pub fn position_of(&self, id: &str) -> Option<usize> {
        self.items.iter().position(|item| item.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bus::Topic;
    use parking_lot::Mutex;

    fn playlist() -> (Playlist, Arc<Bus>) {
        let bus = Arc::new(Bus::new());
        // nothing listens on port 9; requests fail fast and are only logged
        let gateway = Gateway::with_client(
            reqwest::Client::new(),
            "http://127.0.0.1:9/".into(),
            "",
            Arc::clone(&bus),
        );
        (Playlist::new(gateway, Duration::from_secs(5)), bus)
    }

    fn leaf(id: &str, name: &str) -> PlaylistNode {
        PlaylistNode {
            id: id.into(),
            name: name.into(),
            kind: "leaf".into(),
            uri: Some(format!("file:///m/{name}")),
            ..Default::default()
        }
    }

    #[test]
    fn test_append_preserves_order() {
        let (mut pl, _) = playlist();
        assert!(pl.add_item(AddMode::Append, "1".into(), "a".into(), "file:///a".into()).is_none());
        pl.add_item(AddMode::Append, "2".into(), "b".into(), "file:///b".into());
        assert_eq!(pl.len(), 2);
        assert_eq!(
            pl.items()[1],
            PlaylistItem {
                id: "2".into(),
                title: "b".into(),
                src: "file:///b".into()
            }
        );
    }

    #[test]
    fn test_populate_maps_queue_in_order() {
        let (mut pl, _) = playlist();
        let tree = PlaylistNode {
            children: vec![
                PlaylistNode {
                    children: vec![leaf("4", "x.mp3"), leaf("9", "y.mkv"), leaf("5", "z.ogg")],
                    ..Default::default()
                },
                PlaylistNode::default(),
            ],
            ..Default::default()
        };
        assert!(pl.populate_playlist(&tree));
        let ids: Vec<_> = pl.items().iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, ["4", "9", "5"]);
        assert_eq!(pl.items()[1].title, "y.mkv");
        assert_eq!(pl.items()[1].src, "file:///m/y.mkv");
        assert_eq!(pl.position_of("5"), Some(2));
    }

    #[test]
    fn test_populate_with_bad_shape_keeps_list() {
        let (mut pl, _) = playlist();
        pl.add_item(AddMode::Append, "1".into(), "a".into(), "file:///a".into());
        assert!(!pl.populate_playlist(&PlaylistNode::default()));
        assert_eq!(pl.len(), 1);
    }

    #[tokio::test]
    async fn test_remove_filters_every_matching_id() {
        let (mut pl, _) = playlist();
        for (id, t) in [("1", "a"), ("2", "b"), ("1", "c")] {
            pl.add_item(AddMode::Append, id.into(), t.into(), String::new());
        }
        let handle = pl.remove_item("1");
        assert_eq!(pl.len(), 1);
        assert_eq!(pl.items()[0].id, "2");
        handle.await.unwrap();
    }

    #[test]
    fn test_start_playlist_emits_first_item() {
        let (mut pl, bus) = playlist();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let s = Arc::clone(&seen);
        bus.on(Topic::Play, move |event| s.lock().push(event.clone()));

        assert!(!pl.start_playlist());
        pl.add_item(AddMode::Append, "3".into(), "a".into(), "file:///a".into());
        pl.add_item(AddMode::Append, "4".into(), "b".into(), "file:///b".into());
        assert!(pl.start_playlist());
        assert_eq!(
            *seen.lock(),
            vec![BusEvent::Play {
                src: "file:///a".into(),
                id: "3".into()
            }]
        );
    }

    #[tokio::test]
    async fn test_refresh_restart_and_stop() {
        let (mut pl, _) = playlist();
        pl.add_item(AddMode::Append, "1".into(), "a".into(), String::new());
        pl.refresh_playlist();
        assert!(pl.is_empty());
        assert!(pl.is_refreshing());
        pl.refresh_playlist();
        assert!(pl.is_refreshing());
        pl.stop_refresh();
        assert!(!pl.is_refreshing());
    }
}
