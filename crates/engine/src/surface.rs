use jukelet_core::MediaItem;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum PlayIcon {
    Play,
    Pause,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NowPlayingView {
    pub title: String,
    pub artist: String,
    pub cover: String,
    pub icon: PlayIcon,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ListEntry {
    pub index: usize,
    pub title: String,
    pub artist: String,
    pub cover: String,
    pub active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum ListView {
    Empty { message: String },
    Tracks(Vec<ListEntry>),
}

impl ListView {
    pub fn len(&self) -> usize {
        match self {
            ListView::Empty { .. } => 0,
            ListView::Tracks(entries) => entries.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn active_indices(&self) -> Vec<usize> {
        match self {
            ListView::Empty { .. } => Vec::new(),
            ListView::Tracks(entries) => entries
                .iter()
                .filter(|e| e.active)
                .map(|e| e.index)
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProgressView {
    pub percent: f64,
    pub current: String,
    pub total: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SnippetView {
    pub text: String,
    pub media: Vec<MediaItem>,
    pub is_default: bool,
}

/// Where views end up. Each call replaces the whole region it names.
pub trait Surface {
    fn show_now_playing(&mut self, view: &NowPlayingView);
    fn show_list(&mut self, view: &ListView);
    /// `None` clears the region: no track, or its duration is unknown.
    fn show_progress(&mut self, view: Option<&ProgressView>);
    fn show_snippet(&mut self, view: &SnippetView);
}

/// Keeps the latest view of every region. Used by `status` output and tests.
#[derive(Debug, Default, Clone)]
pub struct MemorySurface {
    pub now_playing: Option<NowPlayingView>,
    pub list: Option<ListView>,
    pub progress: Option<ProgressView>,
    pub snippet: Option<SnippetView>,
    pub list_renders: usize,
}

impl Surface for MemorySurface {
    fn show_now_playing(&mut self, view: &NowPlayingView) {
        self.now_playing = Some(view.clone());
    }

    fn show_list(&mut self, view: &ListView) {
        self.list = Some(view.clone());
        self.list_renders += 1;
    }

    fn show_progress(&mut self, view: Option<&ProgressView>) {
        self.progress = view.cloned();
    }

    fn show_snippet(&mut self, view: &SnippetView) {
        self.snippet = Some(view.clone());
    }
}
