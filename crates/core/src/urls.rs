use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use url::Url;

/// Characters escaped when a relative media path is joined onto a URL base.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

const YOUTUBE_HOSTS: [&str; 5] = [
    "youtube.com",
    "www.youtube.com",
    "m.youtube.com",
    "youtube-nocookie.com",
    "www.youtube-nocookie.com",
];

pub fn is_remote(location: &str) -> bool {
    let lower = location.trim_start().to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Absolute `http(s)` sources are kept; anything else is placed under `base`,
/// which may itself be a URL or a directory path.
pub fn resolve_src(src: &str, base: &str) -> String {
    let src = src.trim();
    if is_remote(src) || base.is_empty() {
        return src.to_string();
    }

    if is_remote(base) {
        let encoded = src
            .split('/')
            .map(|seg| utf8_percent_encode(seg, PATH_SEGMENT).to_string())
            .collect::<Vec<_>>()
            .join("/");
        if let Ok(joined) = Url::parse(&with_trailing_slash(base)).and_then(|b| b.join(&encoded))
        {
            return joined.to_string();
        }
    }

    format!("{}{}", with_trailing_slash(base), src.trim_start_matches('/'))
}

fn with_trailing_slash(base: &str) -> String {
    if base.ends_with('/') {
        base.to_string()
    } else {
        format!("{base}/")
    }
}

/// Appends `t=<stamp>` so intermediaries cannot serve a cached copy.
pub fn cache_bust(location: &str, stamp: u64) -> Result<String, url::ParseError> {
    let mut url = Url::parse(location)?;
    url.query_pairs_mut().append_pair("t", &stamp.to_string());
    Ok(url.to_string())
}

pub fn is_youtube_host(host: &str) -> bool {
    let host = host.to_ascii_lowercase();
    host == "youtu.be" || YOUTUBE_HOSTS.contains(&host.as_str())
}

/// Pulls the 11-character video id out of the usual YouTube URL shapes:
/// `watch?v=`, `youtu.be/<id>`, `/embed/<id>`, `/shorts/<id>`, `/live/<id>`.
pub fn youtube_video_id(url: &Url) -> Option<String> {
    let host = url.host_str()?;
    if !is_youtube_host(host) {
        return None;
    }

    if let Some((_, v)) = url.query_pairs().find(|(k, _)| k == "v") {
        if let Some(id) = take_video_id(&v) {
            return Some(id);
        }
    }

    let mut segments = url.path_segments()?;
    let candidate = if host.eq_ignore_ascii_case("youtu.be") {
        segments.next()
    } else {
        match segments.next() {
            Some("embed") | Some("shorts") | Some("live") | Some("v") => segments.next(),
            _ => None,
        }
    }?;
    take_video_id(candidate)
}

fn take_video_id(raw: &str) -> Option<String> {
    let id: String = raw
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
        .collect();
    if id.len() == 11 {
        Some(id)
    } else {
        None
    }
}

pub fn youtube_embed_url(video_id: &str) -> String {
    format!("https://www.youtube.com/embed/{video_id}")
}

#[cfg(test)]
mod tests {
    use super::{cache_bust, resolve_src, youtube_video_id};
    use url::Url;

    #[test]
    fn resolves_relative_sources_against_base() {
        assert_eq!(
            resolve_src("song one.mp3", "https://cdn.test/music"),
            "https://cdn.test/music/song%20one.mp3"
        );
        assert_eq!(resolve_src("a.mp3", "assets/music/"), "assets/music/a.mp3");
        assert_eq!(
            resolve_src("https://x.test/a.mp3", "assets/music/"),
            "https://x.test/a.mp3"
        );
    }

    #[test]
    fn cache_bust_appends_stamp() {
        let busted = cache_bust("https://gist.test/raw?x=1", 42).unwrap();
        assert_eq!(busted, "https://gist.test/raw?x=1&t=42");
        assert!(cache_bust("not a url", 1).is_err());
    }

    #[test]
    fn extracts_youtube_ids() {
        let cases = [
            ("https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=10", Some("dQw4w9WgXcQ")),
            ("https://youtu.be/dQw4w9WgXcQ", Some("dQw4w9WgXcQ")),
            ("https://www.youtube.com/embed/dQw4w9WgXcQ", Some("dQw4w9WgXcQ")),
            ("https://youtube.com/shorts/dQw4w9WgXcQ?feature=share", Some("dQw4w9WgXcQ")),
            ("https://www.youtube.com/watch?v=short", None),
            ("https://vimeo.com/dQw4w9WgXcQ", None),
        ];
        for (raw, expected) in cases {
            let url = Url::parse(raw).unwrap();
            assert_eq!(youtube_video_id(&url).as_deref(), expected, "{raw}");
        }
    }
}
