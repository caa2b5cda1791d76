use crate::model::Track;
use serde::{Deserialize, Serialize};

fn default_schema_version() -> u32 {
    1
}

/// What the playlist loader hands back when the fetch produced no tracks.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum FallbackPolicy {
    #[default]
    Empty,
    Placeholder,
}

/// Which list entry carries the "active" mark.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum HighlightPolicy {
    /// The entry at the current index, playing or not.
    #[default]
    Index,
    /// The entry at the current index, only while playing.
    Playing,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaylistConfig {
    pub source: String,
    pub media_base: String,
    pub fallback: FallbackPolicy,
    pub placeholder: Track,
}

impl Default for PlaylistConfig {
    fn default() -> Self {
        Self {
            source: "assets/music/playlist.json".to_string(),
            media_base: "assets/music/".to_string(),
            fallback: FallbackPolicy::Empty,
            placeholder: Track {
                title: "No music available".to_string(),
                artist: "jukelet".to_string(),
                cover: "assets/images/placeholder.png".to_string(),
                src: String::new(),
                duration: None,
            },
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SnippetConfig {
    pub source: String,
    pub interval_secs: u64,
    pub default_message: String,
}

impl Default for SnippetConfig {
    fn default() -> Self {
        Self {
            source: "assets/data/message.txt".to_string(),
            interval_secs: 30,
            default_message: "Could not load message.".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub highlight: HighlightPolicy,
    pub tick_ms: u64,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            highlight: HighlightPolicy::Index,
            tick_ms: 250,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
    pub log_level: String,
    #[serde(default)]
    pub playlist: PlaylistConfig,
    #[serde(default)]
    pub snippet: SnippetConfig,
    #[serde(default)]
    pub player: PlayerConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            log_level: "info".to_string(),
            playlist: PlaylistConfig::default(),
            snippet: SnippetConfig::default(),
            player: PlayerConfig::default(),
        }
    }
}
