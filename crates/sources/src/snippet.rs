use crate::TextSource;
use jukelet_core::{parse_snippet, Snippet, WidgetError, WidgetResult};
use tracing::debug;

/// Fetches and parses one snippet. Blank content counts as `EmptyResult` so
/// callers can treat it like any other failure.
pub async fn fetch_snippet(source: &dyn TextSource) -> WidgetResult<Snippet> {
    let body = source.fetch().await?;
    if body.trim().is_empty() {
        return Err(WidgetError::EmptyResult);
    }

    let snippet = parse_snippet(&body);
    if snippet.is_blank() {
        return Err(WidgetError::EmptyResult);
    }
    debug!(
        source = source.location(),
        media = snippet.media.len(),
        "snippet fetched"
    );
    Ok(snippet)
}
