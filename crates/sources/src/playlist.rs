use crate::TextSource;
use jukelet_core::{urls, FallbackPolicy, PlaylistConfig, PlaylistDocument, Track, WidgetError};
use std::sync::Arc;
use tracing::{info, warn};

/// Result of one playlist load. `tracks` may be empty; `error` records why.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadOutcome {
    pub source: String,
    pub tracks: Vec<Track>,
    pub error: Option<WidgetError>,
}

impl LoadOutcome {
    pub fn loaded(source: impl Into<String>, tracks: Vec<Track>) -> Self {
        Self {
            source: source.into(),
            tracks,
            error: None,
        }
    }

    pub fn failed(source: impl Into<String>, err: WidgetError) -> Self {
        Self {
            source: source.into(),
            tracks: Vec::new(),
            error: Some(err),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}

pub struct PlaylistLoader {
    source: Arc<dyn TextSource>,
    media_base: String,
    fallback: FallbackPolicy,
    placeholder: Track,
}

impl PlaylistLoader {
    pub fn new(source: Arc<dyn TextSource>, cfg: &PlaylistConfig) -> Self {
        Self {
            source,
            media_base: cfg.media_base.clone(),
            fallback: cfg.fallback,
            placeholder: cfg.placeholder.clone(),
        }
    }

    /// One attempt, never fails: errors end up in `LoadOutcome::error`.
    pub async fn load(&self) -> LoadOutcome {
        let location = self.source.location().to_string();
        let parsed = match self.source.fetch().await {
            Ok(body) => parse_playlist(&body, &self.media_base),
            Err(err) => Err(err),
        };

        match parsed {
            Ok(tracks) => {
                info!(source = %location, count = tracks.len(), "playlist loaded");
                LoadOutcome::loaded(location, tracks)
            }
            Err(err) => {
                warn!(source = %location, error = %err, "playlist load failed");
                let mut outcome = LoadOutcome::failed(location, err);
                if self.fallback == FallbackPolicy::Placeholder {
                    outcome.tracks.push(self.placeholder.clone());
                }
                outcome
            }
        }
    }
}

/// Parses a playlist document, drops tracks without a source and resolves
/// relative sources against `media_base`.
pub fn parse_playlist(body: &str, media_base: &str) -> Result<Vec<Track>, WidgetError> {
    let doc: PlaylistDocument =
        serde_json::from_str(body).map_err(|err| WidgetError::ParseFailed(err.to_string()))?;

    let tracks: Vec<Track> = doc
        .into_tracks()
        .into_iter()
        .filter(Track::is_playable)
        .map(|mut track| {
            track.src = urls::resolve_src(&track.src, media_base);
            track
        })
        .collect();

    if tracks.is_empty() {
        return Err(WidgetError::EmptyResult);
    }
    Ok(tracks)
}
