//! Status-message parsing.
//!
//! A snippet is plain text in which any `http(s)://` token is treated as a
//! media link. Links are stripped from the text and classified so a surface
//! knows whether to show an image, a video or an embedded player.

use crate::urls::{is_remote, youtube_embed_url, youtube_video_id};
use serde::{Deserialize, Serialize};
use url::Url;

const IMAGE_EXTENSIONS: [&str; 8] = ["png", "jpg", "jpeg", "gif", "webp", "svg", "bmp", "avif"];
const VIDEO_EXTENSIONS: [&str; 6] = ["mp4", "webm", "ogv", "ogg", "mov", "m4v"];

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MediaKind {
    Image,
    Video,
    Embed { video_id: String, embed_url: String },
    Ignored,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MediaItem {
    pub url: String,
    pub kind: MediaKind,
}

impl MediaItem {
    pub fn is_renderable(&self) -> bool {
        !matches!(self.kind, MediaKind::Ignored)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Snippet {
    pub text: String,
    pub media: Vec<MediaItem>,
}

impl Snippet {
    pub fn renderable_media(&self) -> impl Iterator<Item = &MediaItem> {
        self.media.iter().filter(|m| m.is_renderable())
    }

    /// True when there is nothing worth showing: no text and no media that a
    /// surface would draw.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty() && self.renderable_media().next().is_none()
    }
}

/// Splits raw snippet text into display text and classified media links.
/// Whitespace inside a line collapses to single spaces; blank lines are kept
/// out of the result.
pub fn parse_snippet(raw: &str) -> Snippet {
    let mut lines = Vec::new();
    let mut media = Vec::new();

    for line in raw.lines() {
        let mut words = Vec::new();
        for token in line.split_whitespace() {
            let link = strip_prose_punctuation(token);
            if is_remote(link) {
                media.push(MediaItem {
                    url: link.to_string(),
                    kind: classify(link),
                });
            } else {
                words.push(token);
            }
        }
        if !words.is_empty() {
            lines.push(words.join(" "));
        }
    }

    Snippet {
        text: lines.join("\n"),
        media,
    }
}

/// Drops a leading `(` and trailing sentence punctuation around a link. A
/// closing `)` stays when it balances an opening one inside the link.
fn strip_prose_punctuation(token: &str) -> &str {
    let mut link = token.strip_prefix('(').unwrap_or(token);
    loop {
        let Some(last) = link.chars().last() else {
            return link;
        };
        let strip = match last {
            '.' | ',' | ';' | ':' | '!' | '?' => true,
            ')' => link.matches(')').count() > link.matches('(').count(),
            _ => false,
        };
        if !strip {
            return link;
        }
        link = &link[..link.len() - last.len_utf8()];
    }
}

/// First match wins: image extension, video extension, YouTube id, else ignored.
pub fn classify(raw: &str) -> MediaKind {
    let Ok(url) = Url::parse(raw) else {
        return MediaKind::Ignored;
    };

    let path = url.path().to_ascii_lowercase();
    let ext = path.rsplit_once('.').map(|(_, ext)| ext).unwrap_or("");
    if !ext.contains('/') {
        if IMAGE_EXTENSIONS.contains(&ext) {
            return MediaKind::Image;
        }
        if VIDEO_EXTENSIONS.contains(&ext) {
            return MediaKind::Video;
        }
    }

    match youtube_video_id(&url) {
        Some(video_id) => MediaKind::Embed {
            embed_url: youtube_embed_url(&video_id),
            video_id,
        },
        None => MediaKind::Ignored,
    }
}
