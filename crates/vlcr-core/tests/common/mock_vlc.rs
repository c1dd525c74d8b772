#![allow(dead_code)]

use axum::extract::{Query, State};
use axum::http::{header, HeaderMap, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Router;
use parking_lot::Mutex;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};
use vlcr_core::bus::{Bus, BusEvent};
use vlcr_core::gateway::Gateway;

pub const PLAYLIST_JSON: &str = r#"{
  "ro":"rw","type":"node","name":"Undefined","id":"1",
  "children":[
    {"ro":"ro","type":"node","name":"Playlist","id":"2","children":[
      {"ro":"rw","type":"leaf","name":"first.mp3","id":"4","duration":215,"uri":"file:///music/first.mp3"},
      {"ro":"rw","type":"leaf","name":"second.mkv","id":"5","duration":3600,"uri":"file:///video/second.mkv","current":"current"},
      {"ro":"rw","type":"leaf","name":"third.flac","id":"6","duration":-1,"uri":"file:///music/third.flac"}
    ]},
    {"ro":"ro","type":"node","name":"Media Library","id":"3","children":[]}
  ]
}"#;

pub const STATUS_JSON: &str = r#"{
  "fullscreen":false,"state":"playing","volume":256,"time":42,"length":215,
  "repeat":false,"random":true,"loop":false,"rate":1,"audiodelay":0,"subtitledelay":0.5,
  "currentplid":4,
  "information":{"category":{"meta":{"title":"First Song","artist":"Somebody","filename":"first.mp3"}}}
}"#;

pub const BROWSE_ROOT_JSON: &str = r#"{"element":[
  {"type":"dir","path":"/..","name":"..","uri":"file:///"},
  {"type":"dir","path":"/music","name":"music","uri":"file:///music"},
  {"type":"file","path":"/readme.txt","name":"readme.txt","uri":"file:///readme.txt","size":12}
]}"#;

pub const BROWSE_MUSIC_JSON: &str = r#"{"element":[
  {"type":"dir","path":"/music/..","name":"..","uri":"file:///"},
  {"type":"file","path":"/music/first.mp3","name":"first.mp3","uri":"file:///music/first.mp3"}
]}"#;

/// One request as the mock saw it.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub path: String,
    pub query: Vec<(String, String)>,
    pub authorization: Option<String>,
}

impl Recorded {
    pub fn param(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn command(&self) -> Option<&str> {
        self.param("command")
    }
}

#[derive(Clone, Default)]
struct MockState {
    requests: Arc<Mutex<Vec<Recorded>>>,
    failure: Arc<Mutex<Option<StatusCode>>>,
    playlist: Arc<Mutex<Option<String>>>,
    playlist_delay: Arc<Mutex<Option<Duration>>>,
}

/// In-process stand-in for VLC's HTTP interface.
pub struct MockVlc {
    pub addr: SocketAddr,
    state: MockState,
}

impl MockVlc {
    pub async fn start() -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind mock vlc");
        let addr = listener.local_addr().expect("mock addr");
        let state = MockState::default();
        let app = Router::new().fallback(handle).with_state(state.clone());
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("mock vlc server");
        });
        Self { addr, state }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}/", self.addr)
    }

    pub fn gateway(&self, bus: Arc<Bus>) -> Gateway {
        self.gateway_with_password(bus, "")
    }

    pub fn gateway_with_password(&self, bus: Arc<Bus>, password: &str) -> Gateway {
        Gateway::with_client(reqwest::Client::new(), self.base_url(), password, bus)
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.state.requests.lock().clone()
    }

    pub fn requests_to(&self, endpoint: &str) -> Vec<Recorded> {
        self.requests()
            .into_iter()
            .filter(|r| r.path.ends_with(endpoint))
            .collect()
    }

    pub fn fail_with(&self, status: StatusCode) {
        *self.state.failure.lock() = Some(status);
    }

    /// Hold every `playlist.json` answer back by `delay`.
    pub fn delay_playlist(&self, delay: Duration) {
        *self.state.playlist_delay.lock() = Some(delay);
    }

    pub fn serve_playlist(&self, body: &str) {
        *self.state.playlist.lock() = Some(body.to_string());
    }
}

async fn handle(
    State(state): State<MockState>,
    uri: Uri,
    headers: HeaderMap,
    Query(query): Query<Vec<(String, String)>>,
) -> Response {
    let path = uri.path().to_string();
    let authorization = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    state.requests.lock().push(Recorded {
        path: path.clone(),
        query: query.clone(),
        authorization,
    });

    if let Some(status) = *state.failure.lock() {
        return (status, "forced failure").into_response();
    }

    let delay = *state.playlist_delay.lock();
    if let (Some(delay), "/requests/playlist.json") = (delay, path.as_str()) {
        tokio::time::sleep(delay).await;
    }

    let dir = query
        .iter()
        .find(|(k, _)| k == "dir")
        .map(|(_, v)| v.clone())
        .unwrap_or_default();
    let body = match path.as_str() {
        "/requests/status.json" => STATUS_JSON.to_string(),
        "/requests/playlist.json" => state
            .playlist
            .lock()
            .clone()
            .unwrap_or_else(|| PLAYLIST_JSON.to_string()),
        "/requests/browse.json" if dir == "/music" => BROWSE_MUSIC_JSON.to_string(),
        "/requests/browse.json" => BROWSE_ROOT_JSON.to_string(),
        "/requests/vlm_cmd.xml" => {
            return (
                [(header::CONTENT_TYPE, "text/xml")],
                "<?xml version=\"1.0\"?><vlm/>",
            )
                .into_response()
        }
        _ => return (StatusCode::NOT_FOUND, "no such endpoint").into_response(),
    };
    ([(header::CONTENT_TYPE, "application/json")], body).into_response()
}

/// Collects every bus event, in order.
pub fn record_bus(bus: &Bus) -> Arc<Mutex<Vec<BusEvent>>> {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    bus.on_all(move |event| sink.lock().push(event.clone()));
    seen
}

/// Poll `check` until it holds or two seconds pass.
pub async fn wait_until(mut check: impl FnMut() -> bool) -> bool {
    let deadline = Instant::now() + Duration::from_secs(2);
    while Instant::now() < deadline {
        if check() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    check()
}
