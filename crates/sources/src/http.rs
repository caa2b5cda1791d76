use crate::TextSource;
use async_trait::async_trait;
use jukelet_core::{urls, WidgetError, WidgetResult};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tracing::debug;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Hands out strictly increasing stamps seeded from the wall clock, so two
/// polls inside the same millisecond still get distinct query strings.
#[derive(Debug, Default)]
pub struct CacheBuster {
    last: AtomicU64,
}

impl CacheBuster {
    pub fn next_stamp(&self) -> u64 {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);
        let prev = self
            .last
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |last| {
                Some(now.max(last + 1))
            })
            .unwrap_or(0);
        now.max(prev + 1)
    }
}

pub struct HttpSource {
    client: reqwest::Client,
    url: String,
    buster: Option<CacheBuster>,
}

impl HttpSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), url)
    }

    pub fn with_client(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
            buster: None,
        }
    }

    pub fn with_cache_bust(mut self) -> Self {
        self.buster = Some(CacheBuster::default());
        self
    }

    fn request_url(&self) -> WidgetResult<String> {
        match &self.buster {
            Some(buster) => urls::cache_bust(&self.url, buster.next_stamp())
                .map_err(|err| WidgetError::FetchFailed(format!("invalid url {}: {err}", self.url))),
            None => Ok(self.url.clone()),
        }
    }
}

#[async_trait]
impl TextSource for HttpSource {
    fn name(&self) -> &'static str {
        "http"
    }

    fn location(&self) -> &str {
        &self.url
    }

    async fn fetch(&self) -> WidgetResult<String> {
        let url = self.request_url()?;
        debug!(%url, "fetching");

        let response = self
            .client
            .get(&url)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|err| WidgetError::FetchFailed(err.to_string()))?;

        response
            .text()
            .await
            .map_err(|err| WidgetError::ParseFailed(err.to_string()))
    }
}
