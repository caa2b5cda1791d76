use serde::{Deserialize, Serialize};

pub const UNKNOWN_TITLE: &str = "Unknown title";
pub const UNKNOWN_ARTIST: &str = "Unknown artist";

/// One playable item. Identity is the position in the loaded list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Track {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub artist: String,
    #[serde(default)]
    pub cover: String,
    #[serde(default)]
    pub src: String,
    /// Length in seconds, when the playlist document carries it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
}

impl Track {
    pub fn display_title(&self) -> &str {
        non_blank(&self.title).unwrap_or(UNKNOWN_TITLE)
    }

    pub fn display_artist(&self) -> &str {
        non_blank(&self.artist).unwrap_or(UNKNOWN_ARTIST)
    }

    pub fn is_playable(&self) -> bool {
        non_blank(&self.src).is_some()
    }
}

fn non_blank(s: &str) -> Option<&str> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s)
    }
}

/// Accepted shapes of a playlist document: `{ "songs": [...] }` or a bare array.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum PlaylistDocument {
    Wrapped { songs: Vec<Track> },
    Bare(Vec<Track>),
}

impl PlaylistDocument {
    pub fn into_tracks(self) -> Vec<Track> {
        match self {
            PlaylistDocument::Wrapped { songs } => songs,
            PlaylistDocument::Bare(songs) => songs,
        }
    }
}

/// Read-only copy of the controller's state handed to renderers.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct PlayerSnapshot {
    pub index: usize,
    pub playing: bool,
    pub track_count: usize,
}

impl PlayerSnapshot {
    pub fn has_tracks(&self) -> bool {
        self.track_count > 0
    }
}
