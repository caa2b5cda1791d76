use async_trait::async_trait;
use jukelet_core::{urls, WidgetResult};
use std::sync::Arc;

mod file;
mod http;
pub mod playlist;
pub mod snippet;

pub use file::FileSource;
pub use http::{CacheBuster, HttpSource};
pub use playlist::{LoadOutcome, PlaylistLoader};
pub use snippet::fetch_snippet;

/// Something that yields a text body on demand: a remote URL or a local file.
#[async_trait]
pub trait TextSource: Send + Sync {
    fn name(&self) -> &'static str;
    fn location(&self) -> &str;
    async fn fetch(&self) -> WidgetResult<String>;
}

/// Picks the source implementation from the shape of `location`.
/// `cache_bust` only applies to remote sources.
pub fn build_source(location: &str, cache_bust: bool) -> Arc<dyn TextSource> {
    if urls::is_remote(location) {
        let source = HttpSource::new(location.trim());
        if cache_bust {
            Arc::new(source.with_cache_bust())
        } else {
            Arc::new(source)
        }
    } else {
        Arc::new(FileSource::new(location))
    }
}
