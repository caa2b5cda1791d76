use thiserror::Error;

/// Every failure the widget knows about. None of these escape to the top
/// level; each is turned into a degraded view where it happens.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum WidgetError {
    #[error("fetch failed: {0}")]
    FetchFailed(String),

    #[error("parse failed: {0}")]
    ParseFailed(String),

    #[error("no usable content")]
    EmptyResult,

    #[error("playback rejected: {0}")]
    PlaybackRejected(String),

    #[error("track index {index} out of range for {len} tracks")]
    InvalidIndex { index: usize, len: usize },
}

pub type WidgetResult<T> = Result<T, WidgetError>;
