//! Extension allow-lists deciding which browsed files can be enqueued.

pub const VIDEO_EXTENSIONS: &[&str] = &[
    "asf", "avi", "bik", "bin", "divx", "drc", "dv", "f4v", "flv", "gxf", "iso", "m1v", "m2v",
    "m2t", "m2ts", "m4v", "mkv", "mov", "mp2", "mp4", "mpeg", "mpeg1", "mpeg2", "mpeg4", "mpg",
    "mts", "mtv", "mxf", "mxg", "nuv", "ogg", "ogm", "ogv", "ogx", "ps", "rec", "rm", "rmvb",
    "rpl", "thp", "ts", "txd", "vob", "wmv", "xesc",
];

pub const AUDIO_EXTENSIONS: &[&str] = &[
    "3ga", "a52", "aac", "ac3", "ape", "awb", "dts", "flac", "it", "m4a", "m4p", "mka", "mlp",
    "mod", "mp1", "mp2", "mp3", "oga", "ogg", "oma", "s3m", "spx", "thd", "tta", "wav", "wma",
    "wv", "xm",
];

pub const PLAYLIST_EXTENSIONS: &[&str] = &[
    "asx", "b4s", "cue", "ifo", "m3u", "m3u8", "pls", "ram", "rar", "sdp", "vlc", "xspf", "zip",
    "conf",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Video,
    Audio,
    Playlist,
}

/// Lower-cased text after the last `.`, or `None` if there is no dot.
pub fn extension(uri: &str) -> Option<String> {
    uri.rsplit_once('.').map(|(_, ext)| ext.to_ascii_lowercase())
}

/// Video wins over audio for the containers both lists carry (`ogg`, `mp2`).
pub fn classify(uri: &str) -> Option<MediaKind> {
    let ext = extension(uri)?;
    let ext = ext.as_str();
    if VIDEO_EXTENSIONS.contains(&ext) {
        Some(MediaKind::Video)
    } else if AUDIO_EXTENSIONS.contains(&ext) {
        Some(MediaKind::Audio)
    } else if PLAYLIST_EXTENSIONS.contains(&ext) {
        Some(MediaKind::Playlist)
    } else {
        None
    }
}

pub fn is_media_uri(uri: &str) -> bool {
    classify(uri).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_is_lowercased_suffix() {
        assert_eq!(extension("file:///x/Song.MP3").as_deref(), Some("mp3"));
        assert_eq!(extension("file:///a.b/c.tar.gz").as_deref(), Some("gz"));
        assert_eq!(extension("file:///README"), None);
    }

    #[test]
    fn test_classify() {
        assert_eq!(classify("file:///a.mkv"), Some(MediaKind::Video));
        assert_eq!(classify("file:///a.flac"), Some(MediaKind::Audio));
        assert_eq!(classify("file:///a.m3u8"), Some(MediaKind::Playlist));
        assert_eq!(classify("file:///a.ogg"), Some(MediaKind::Video));
        assert_eq!(classify("file:///notes.txt"), None);
        assert!(is_media_uri("file:///Music/track.Mp3"));
        assert!(!is_media_uri("file:///Music/cover.jpg"));
    }
}
