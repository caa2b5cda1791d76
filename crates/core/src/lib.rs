pub mod config;
pub mod error;
pub mod model;
pub mod snippet;
pub mod time;
pub mod urls;

pub use config::{
    AppConfig, FallbackPolicy, HighlightPolicy, PlayerConfig, PlaylistConfig, SnippetConfig,
};
pub use error::{WidgetError, WidgetResult};
pub use model::{PlayerSnapshot, PlaylistDocument, Track};
pub use snippet::{parse_snippet, MediaItem, MediaKind, Snippet};
pub use time::format_time;
