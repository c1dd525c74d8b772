//! Wire types for VLC's HTTP interface (`requests/*.json`) and the commands we
//! send to it.

use serde::{Deserialize, Deserializer, Serialize};

// ── Playlist tree ─────────────────────────────────────────────────────────────

/// One node of the `playlist.json` tree. The root's first child is the play
/// queue ("Playlist"), the second the media library.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlaylistNode {
    #[serde(default, deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub uri: Option<String>,
    /// Seconds; -1 when unknown.
    #[serde(default)]
    pub duration: Option<i64>,
    /// Present (as `"current"`) on the entry being played.
    #[serde(default)]
    pub current: Option<String>,
    #[serde(default)]
    pub children: Vec<PlaylistNode>,
}

impl PlaylistNode {
    /// Entries of the play queue: `children[0].children`.
    pub fn queue(&self) -> Option<&[PlaylistNode]> {
        self.children.first().map(|node| node.children.as_slice())
    }

    pub fn is_current(&self) -> bool {
        self.current.is_some()
    }
}

/// A playable entry as the playlist panel holds it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaylistItem {
    pub id: String,
    pub title: String,
    pub src: String,
}

impl From<&PlaylistNode> for PlaylistItem {
    fn from(node: &PlaylistNode) -> Self {
        Self {
            id: node.id.clone(),
            title: node.name.clone(),
            src: node.uri.clone().unwrap_or_default(),
        }
    }
}

// ── Browse ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeKind {
    #[serde(rename = "file")]
    File,
    #[serde(rename = "dir", alias = "directory")]
    Directory,
}

/// One entry of a `browse.json` listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectoryNode {
    pub name: String,
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub uri: String,
    #[serde(rename = "type")]
    pub kind: NodeKind,
}

impl DirectoryNode {
    pub fn is_dir(&self) -> bool {
        self.kind == NodeKind::Directory
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct BrowseListing {
    #[serde(default)]
    pub element: Vec<DirectoryNode>,
}

// ── Status ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayState {
    Playing,
    Paused,
    #[default]
    Stopped,
    #[serde(other)]
    Unknown,
}

/// The parts of `status.json` the remote displays.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlayerStatus {
    #[serde(default)]
    pub state: PlayState,
    /// Raw VLC volume, 256 = 100 %.
    #[serde(default)]
    pub volume: f64,
    #[serde(default)]
    pub time: i64,
    #[serde(default)]
    pub length: i64,
    #[serde(default)]
    pub repeat: bool,
    #[serde(default)]
    pub random: bool,
    #[serde(default, rename = "loop")]
    pub looping: bool,
    #[serde(default = "default_rate")]
    pub rate: f64,
    #[serde(default)]
    pub audiodelay: f64,
    #[serde(default)]
    pub subtitledelay: f64,
    #[serde(default = "no_plid")]
    pub currentplid: i64,
    #[serde(default)]
    pub information: Option<Information>,
}

fn default_rate() -> f64 {
    1.0
}

fn no_plid() -> i64 {
    -1
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Information {
    #[serde(default)]
    pub category: Category,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Category {
    #[serde(default)]
    pub meta: Meta,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Meta {
    pub title: Option<String>,
    pub filename: Option<String>,
    pub artist: Option<String>,
}

impl PlayerStatus {
    /// Best display title: tag title, then file name.
    pub fn title(&self) -> Option<&str> {
        let meta = &self.information.as_ref()?.category.meta;
        meta.title.as_deref().or(meta.filename.as_deref())
    }

    pub fn artist(&self) -> Option<&str> {
        self.information.as_ref()?.category.meta.artist.as_deref()
    }

    /// Volume as a 0..=1 fraction of the 0..=255 command scale.
    pub fn volume_fraction(&self) -> f32 {
        (self.volume / 255.0).clamp(0.0, 1.0) as f32
    }

    pub fn current_id(&self) -> Option<String> {
        (self.currentplid >= 0).then(|| self.currentplid.to_string())
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Text(String),
        Number(i64),
    }
    Ok(match Id::deserialize(deserializer)? {
        Id::Text(s) => s,
        Id::Number(n) => n.to_string(),
    })
}

// ── Commands ──────────────────────────────────────────────────────────────────

/// Commands understood by `status.json?command=...`.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Play { id: Option<String> },
    Pause,
    Stop,
    Next,
    Previous,
    Enqueue { input: String },
    Delete { id: String },
    Empty,
    Repeat,
    Random,
    Loop,
    /// 0..=255 on the remote-control scale.
    Volume { value: u8 },
    Preamp { db: f32 },
    AudioDelay { seconds: f64 },
    SubDelay { seconds: f64 },
    Rate { rate: f64 },
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Play { .. } => "pl_play",
            Self::Pause => "pl_pause",
            Self::Stop => "pl_stop",
            Self::Next => "pl_next",
            Self::Previous => "pl_previous",
            Self::Enqueue { .. } => "in_enqueue",
            Self::Delete { .. } => "pl_delete",
            Self::Empty => "pl_empty",
            Self::Repeat => "pl_repeat",
            Self::Random => "pl_random",
            Self::Loop => "pl_loop",
            Self::Volume { .. } => "volume",
            Self::Preamp { .. } => "preamp",
            Self::AudioDelay { .. } => "audiodelay",
            Self::SubDelay { .. } => "subdelay",
            Self::Rate { .. } => "rate",
        }
    }
}

/// Query parameters for one request. Values are encoded by the HTTP client,
/// never spliced into the URL by hand.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Params(Vec<(&'static str, String)>);

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.0.push((key, value.into()));
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn pairs(&self) -> &[(&'static str, String)] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// `vlm_cmd.xml?command=<raw>`; the whole command line is one value.
    pub fn vlm(command: &str) -> Self {
        Self::new().with("command", command)
    }

    pub fn browse(dir: &str) -> Self {
        Self::new().with("dir", dir)
    }
}

impl From<&Command> for Params {
    fn from(cmd: &Command) -> Self {
        let params = Params::new().with("command", cmd.name());
        match cmd {
            Command::Play { id: Some(id) } | Command::Delete { id } => params.with("id", id.clone()),
            Command::Enqueue { input } => params.with("input", input.clone()),
            Command::Volume { value } => params.with("val", value.to_string()),
            Command::Preamp { db } => params.with("val", db.to_string()),
            Command::AudioDelay { seconds } | Command::SubDelay { seconds } => {
                params.with("val", seconds.to_string())
            }
            Command::Rate { rate } => params.with("val", rate.to_string()),
            _ => params,
        }
    }
}

impl From<Command> for Params {
    fn from(cmd: Command) -> Self {
        Params::from(&cmd)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PLAYLIST: &str = r#"{
        "ro":"rw","type":"node","name":"Undefined","id":"1",
        "children":[
            {"ro":"ro","type":"node","name":"Playlist","id":"2","children":[
                {"ro":"rw","type":"leaf","name":"intro.mp3","id":"4","duration":215,
                 "uri":"file:///music/intro.mp3","current":"current"},
                {"ro":"rw","type":"leaf","name":"outro.ogg","id":5,"duration":-1,
                 "uri":"file:///music/outro.ogg"}
            ]},
            {"ro":"ro","type":"node","name":"Media Library","id":"3","children":[]}
        ]}"#;

    #[test]
    fn test_playlist_tree_parses_queue() {
        let tree: PlaylistNode = serde_json::from_str(PLAYLIST).unwrap();
        let queue = tree.queue().unwrap();
        assert_eq!(queue.len(), 2);
        assert_eq!(queue[0].id, "4");
        assert!(queue[0].is_current());
        // numeric ids from older interfaces are accepted
        assert_eq!(queue[1].id, "5");

        let item = PlaylistItem::from(&queue[1]);
        assert_eq!(item.title, "outro.ogg");
        assert_eq!(item.src, "file:///music/outro.ogg");
    }

    #[test]
    fn test_browse_listing_kinds() {
        let raw = r#"{"element":[
            {"type":"dir","path":"/home/me/..","name":"..","uri":"file:///home"},
            {"type":"dir","path":"/home/me/Music","name":"Music","uri":"file:///home/me/Music"},
            {"type":"file","path":"/home/me/a.mkv","name":"a.mkv","uri":"file:///home/me/a.mkv","size":10}
        ]}"#;
        let listing: BrowseListing = serde_json::from_str(raw).unwrap();
        assert_eq!(listing.element.len(), 3);
        assert!(listing.element[1].is_dir());
        assert_eq!(listing.element[2].kind, NodeKind::File);
    }

    #[test]
    fn test_status_parses_meta_and_defaults() {
        let raw = r#"{"state":"paused","volume":128,"time":12,"length":300,
            "repeat":true,"random":false,"loop":false,"currentplid":4,
            "information":{"category":{"meta":{"filename":"intro.mp3"}}}}"#;
        let status: PlayerStatus = serde_json::from_str(raw).unwrap();
        assert_eq!(status.state, PlayState::Paused);
        assert_eq!(status.title(), Some("intro.mp3"));
        assert_eq!(status.current_id().as_deref(), Some("4"));
        assert_eq!(status.rate, 1.0);

        let weird: PlayerStatus = serde_json::from_str(r#"{"state":"opening"}"#).unwrap();
        assert_eq!(weird.state, PlayState::Unknown);
        assert_eq!(weird.current_id(), None);
    }

    #[test]
    fn test_command_params() {
        let p = Params::from(Command::Enqueue {
            input: "file:///a b&c.mp3".into(),
        });
        assert_eq!(p.get("command"), Some("in_enqueue"));
        assert_eq!(p.get("input"), Some("file:///a b&c.mp3"));

        let p = Params::from(Command::Play { id: None });
        assert_eq!(p.pairs().len(), 1);

        let p = Params::from(Command::Volume { value: 255 });
        assert_eq!(p.get("val"), Some("255"));
    }

    #[test]
    fn test_vlm_command_is_a_single_value() {
        let p = Params::vlm("new ch1 broadcast enabled&command=pl_empty");
        assert_eq!(p.pairs().len(), 1);
        assert_eq!(p.get("command"), Some("new ch1 broadcast enabled&command=pl_empty"));
    }
}
