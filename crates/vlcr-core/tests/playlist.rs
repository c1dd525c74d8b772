mod common;

use common::mock_vlc::{record_bus, wait_until, MockVlc};
use std::sync::Arc;
use std::time::Duration;
use vlcr_core::browser::{FileTree, ROOT};
use vlcr_core::bus::{AddMode, Bus, BusEvent};
use vlcr_core::player::{PlaybackControl, TransportEvent};
use vlcr_core::playlist::Playlist;

fn last_populate(events: &[BusEvent]) -> Option<vlcr_core::protocol::PlaylistNode> {
    events.iter().rev().find_map(|e| match e {
        BusEvent::PopulatePlaylist(tree) => Some(tree.clone()),
        _ => None,
    })
}

#[tokio::test]
async fn enqueue_leaves_list_alone_then_refresh_clears_and_refills() {
    let vlc = MockVlc::start().await;
    let bus = Arc::new(Bus::new());
    let seen = record_bus(&bus);
    let mut playlist = Playlist::new(vlc.gateway(Arc::clone(&bus)), Duration::from_secs(60));

    playlist.add_item(AddMode::Append, "1".into(), "local".into(), "file:///local.mp3".into());
    let handle = playlist
        .add_item(
            AddMode::Enqueue,
            String::new(),
            "file:///music/new.mp3".into(),
            "file:///music/new.mp3".into(),
        )
        .expect("enqueue spawns a request");
    assert_eq!(playlist.len(), 1);
    handle.await.unwrap();
    assert_eq!(playlist.len(), 1);

    let enqueue = &vlc.requests_to("status.json")[0];
    assert_eq!(enqueue.command(), Some("in_enqueue"));
    assert_eq!(enqueue.param("input"), Some("file:///music/new.mp3"));
    assert_eq!(*seen.lock(), vec![BusEvent::RefreshPlaylist]);

    // what the UI does with RefreshPlaylist
    playlist.refresh_playlist();
    assert!(playlist.is_empty());

    assert!(wait_until(|| last_populate(&seen.lock()).is_some()).await);
    let tree = last_populate(&seen.lock()).unwrap();
    assert!(playlist.populate_playlist(&tree));
    let titles: Vec<_> = playlist.items().iter().map(|i| i.title.as_str()).collect();
    assert_eq!(titles, ["first.mp3", "second.mkv", "third.flac"]);
    assert_eq!(playlist.items()[2].id, "6");
    assert_eq!(playlist.items()[2].src, "file:///music/third.flac");
}

#[tokio::test]
async fn remove_deletes_then_refetches() {
    let vlc = MockVlc::start().await;
    let bus = Arc::new(Bus::new());
    let mut playlist = Playlist::new(vlc.gateway(bus), Duration::from_secs(60));
    playlist.add_item(AddMode::Append, "5".into(), "a".into(), String::new());
    playlist.add_item(AddMode::Append, "6".into(), "b".into(), String::new());

    playlist.remove_item("5").await.unwrap();
    assert_eq!(playlist.len(), 1);

    let requests = vlc.requests();
    assert_eq!(requests.len(), 2);
    assert!(requests[0].path.ends_with("status.json"));
    assert_eq!(requests[0].command(), Some("pl_delete"));
    assert_eq!(requests[0].param("id"), Some("5"));
    assert!(requests[1].path.ends_with("playlist.json"));
}

#[tokio::test]
async fn refresh_task_polls_and_stops() {
    let vlc = MockVlc::start().await;
    let mut playlist = Playlist::new(vlc.gateway(Arc::new(Bus::new())), Duration::from_millis(50));

    playlist.refresh_playlist();
    assert!(wait_until(|| vlc.requests_to("playlist.json").len() >= 3).await);

    playlist.stop_refresh();
    assert!(!playlist.is_refreshing());
    let stopped_at = vlc.requests_to("playlist.json").len();
    tokio::time::sleep(Duration::from_millis(250)).await;
    // a request sent just before the stop may still reach the server
    assert!(vlc.requests_to("playlist.json").len() <= stopped_at + 1);
}

#[tokio::test]
async fn restarting_refresh_does_not_stack_timers() {
    let vlc = MockVlc::start().await;
    let mut playlist = Playlist::new(vlc.gateway(Arc::new(Bus::new())), Duration::from_millis(100));

    for _ in 0..4 {
        playlist.refresh_playlist();
    }
    tokio::time::sleep(Duration::from_millis(450)).await;
    drop(playlist);

    // four stacked timers would give ~20 fetches; one gives ~5
    let fetched = vlc.requests_to("playlist.json").len();
    assert!(fetched <= 10, "got {fetched} fetches");
}

fn populate_count(events: &[BusEvent]) -> usize {
    events
        .iter()
        .filter(|e| matches!(e, BusEvent::PopulatePlaylist(_)))
        .count()
}

#[tokio::test]
async fn stopped_refresh_drops_the_fetch_in_flight() {
    let vlc = MockVlc::start().await;
    vlc.delay_playlist(Duration::from_millis(300));
    let bus = Arc::new(Bus::new());
    let seen = record_bus(&bus);
    let mut playlist = Playlist::new(vlc.gateway(Arc::clone(&bus)), Duration::from_secs(60));

    playlist.refresh_playlist();
    assert!(wait_until(|| !vlc.requests_to("playlist.json").is_empty()).await);
    playlist.stop_refresh();
    assert!(!playlist.is_refreshing());

    tokio::time::sleep(Duration::from_millis(600)).await;
    assert_eq!(populate_count(&seen.lock()), 0);
}

#[tokio::test]
async fn restart_discards_the_old_answer() {
    let vlc = MockVlc::start().await;
    vlc.delay_playlist(Duration::from_millis(300));
    let bus = Arc::new(Bus::new());
    let seen = record_bus(&bus);
    let mut playlist = Playlist::new(vlc.gateway(Arc::clone(&bus)), Duration::from_secs(60));

    playlist.refresh_playlist();
    assert!(wait_until(|| !vlc.requests_to("playlist.json").is_empty()).await);
    playlist.refresh_playlist();

    tokio::time::sleep(Duration::from_millis(700)).await;
    // only the restarted task's first fetch lands
    assert_eq!(populate_count(&seen.lock()), 1);
    playlist.stop_refresh();
}

#[tokio::test]
async fn fetch_playlist_publishes_one_tree() {
    let vlc = MockVlc::start().await;
    let bus = Arc::new(Bus::new());
    let seen = record_bus(&bus);
    let mut playlist = Playlist::new(vlc.gateway(Arc::clone(&bus)), Duration::from_secs(60));

    playlist.fetch_playlist().await.unwrap();
    assert_eq!(vlc.requests_to("playlist.json").len(), 1);
    assert_eq!(populate_count(&seen.lock()), 1);

    let tree = last_populate(&seen.lock()).unwrap();
    assert!(playlist.populate_playlist(&tree));
    assert_eq!(playlist.len(), 3);
}

#[tokio::test]
async fn empty_clears_remote_then_refetches() {
    let vlc = MockVlc::start().await;
    let mut playlist = Playlist::new(vlc.gateway(Arc::new(Bus::new())), Duration::from_secs(60));
    playlist.add_item(AddMode::Append, "1".into(), "a".into(), String::new());

    let handle = playlist.empty_playlist();
    assert!(playlist.is_empty());
    handle.await.unwrap();

    let requests = vlc.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].command(), Some("pl_empty"));
    assert!(requests[1].path.ends_with("playlist.json"));
}

#[tokio::test]
async fn toggles_and_start() {
    let vlc = MockVlc::start().await;
    let bus = Arc::new(Bus::new());
    let seen = record_bus(&bus);
    let mut playlist = Playlist::new(vlc.gateway(Arc::clone(&bus)), Duration::from_secs(60));

    playlist.toggle_repeat().await.unwrap();
    playlist.toggle_random().await.unwrap();
    playlist.toggle_loop().await.unwrap();
    let commands: Vec<_> = vlc
        .requests()
        .iter()
        .map(|r| r.command().unwrap_or_default().to_string())
        .collect();
    assert_eq!(commands, ["pl_repeat", "pl_random", "pl_loop"]);

    playlist.add_item(AddMode::Append, "4".into(), "x".into(), "file:///x.mp3".into());
    assert!(playlist.start_playlist());
    assert_eq!(
        seen.lock().last(),
        Some(&BusEvent::Play {
            src: "file:///x.mp3".into(),
            id: "4".into()
        })
    );
}

#[tokio::test]
async fn volume_is_scaled_to_255() {
    let vlc = MockVlc::start().await;
    let mut player = PlaybackControl::new(vlc.gateway(Arc::new(Bus::new())));

    player.on_transport_event(TransportEvent::VolumeChange(1.0)).await.unwrap();
    player.on_transport_event(TransportEvent::VolumeChange(0.0)).await.unwrap();
    player.on_transport_event(TransportEvent::Pause).await.unwrap();
    assert!(player.is_paused());

    let requests = vlc.requests();
    assert_eq!(requests[0].command(), Some("volume"));
    assert_eq!(requests[0].param("val"), Some("255"));
    assert_eq!(requests[1].param("val"), Some("0"));
    assert_eq!(requests[2].command(), Some("pl_pause"));
}

#[tokio::test]
async fn play_sends_one_command_with_id() {
    let vlc = MockVlc::start().await;
    let playlist = Playlist::new(vlc.gateway(Arc::new(Bus::new())), Duration::from_secs(60));
    let mut player = PlaybackControl::new(vlc.gateway(Arc::new(Bus::new())));

    playlist
        .play(&mut player, "file:///video/second.mkv", "5")
        .await
        .unwrap();

    let requests = vlc.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].command(), Some("pl_play"));
    assert_eq!(requests[0].param("id"), Some("5"));
    let source = player.source().unwrap();
    assert_eq!(source.src, "file:///video/second.mkv");
    assert_eq!(source.kind, "video/mp4");
    assert!(!player.is_paused());
}

#[tokio::test]
async fn browsing_to_an_mp3_enqueues_it() {
    let vlc = MockVlc::start().await;
    let bus = Arc::new(Bus::new());
    let seen = record_bus(&bus);
    let gateway = vlc.gateway(Arc::clone(&bus));
    let mut tree = FileTree::new();

    let dir = tree.expand(ROOT).unwrap();
    tree.attach_children(ROOT, gateway.browse(&dir).await.unwrap());
    let rows = tree.visible_rows();
    // root, music/, readme.txt
    assert_eq!(rows.len(), 3);
    assert_eq!(tree.select(rows[2]), None);
    assert_eq!(tree.select(rows[1]), None);

    let music = rows[1];
    let dir = tree.expand(music).unwrap();
    assert_eq!(dir, "/music");
    tree.attach_children(music, gateway.browse(&dir).await.unwrap());
    let rows = tree.visible_rows();
    let event = tree.select(rows[2]).expect("mp3 is enqueued");
    bus.emit(&event);

    assert_eq!(
        *seen.lock(),
        vec![BusEvent::AddItem {
            mode: AddMode::Enqueue,
            id: String::new(),
            title: "file:///music/first.mp3".into(),
            src: "file:///music/first.mp3".into(),
        }]
    );
}
