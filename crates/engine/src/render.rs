use crate::surface::{ListEntry, ListView, NowPlayingView, PlayIcon};
use jukelet_core::{HighlightPolicy, PlayerSnapshot, Track, WidgetError};

/// Builds the whole list from scratch. With tracks present the entry at
/// `snapshot.index` is the only active one, subject to `policy`.
pub fn render_list(
    tracks: &[Track],
    snapshot: PlayerSnapshot,
    policy: HighlightPolicy,
    empty_message: &str,
) -> ListView {
    if tracks.is_empty() {
        return ListView::Empty {
            message: empty_message.to_string(),
        };
    }

    let highlight = match policy {
        HighlightPolicy::Index => true,
        HighlightPolicy::Playing => snapshot.playing,
    };

    ListView::Tracks(
        tracks
            .iter()
            .enumerate()
            .map(|(index, track)| ListEntry {
                index,
                title: track.display_title().to_string(),
                artist: track.display_artist().to_string(),
                cover: track.cover.clone(),
                active: highlight && index == snapshot.index,
            })
            .collect(),
    )
}

pub fn render_now_playing(
    track: Option<&Track>,
    snapshot: PlayerSnapshot,
    error: Option<&WidgetError>,
    empty_message: &str,
) -> NowPlayingView {
    let icon = if snapshot.playing {
        PlayIcon::Pause
    } else {
        PlayIcon::Play
    };
    let error = error.map(ToString::to_string);

    match track {
        Some(track) => NowPlayingView {
            title: track.display_title().to_string(),
            artist: track.display_artist().to_string(),
            cover: track.cover.clone(),
            icon,
            error,
        },
        None => NowPlayingView {
            title: empty_message.to_string(),
            artist: String::new(),
            cover: String::new(),
            icon,
            error,
        },
    }
}
