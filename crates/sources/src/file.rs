use crate::TextSource;
use async_trait::async_trait;
use jukelet_core::{WidgetError, WidgetResult};
use std::path::PathBuf;

pub struct FileSource {
    path: PathBuf,
    display: String,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let display = path.display().to_string();
        Self { path, display }
    }
}

#[async_trait]
impl TextSource for FileSource {
    fn name(&self) -> &'static str {
        "file"
    }

    fn location(&self) -> &str {
        &self.display
    }

    async fn fetch(&self) -> WidgetResult<String> {
        let bytes = tokio::fs::read(&self.path)
            .await
            .map_err(|err| WidgetError::FetchFailed(format!("{}: {err}", self.display)))?;
        String::from_utf8(bytes)
            .map_err(|err| WidgetError::ParseFailed(format!("{}: {err}", self.display)))
    }
}
