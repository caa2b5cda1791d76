use jukelet_core::{urls, WidgetError, WidgetResult};
use jukelet_engine::{AudioOutput, Event};
use std::time::Duration;

const SUPPORTED_EXTENSIONS: [&str; 7] = ["mp3", "ogg", "oga", "wav", "flac", "m4a", "aac"];

/// A transport clock standing in for a real audio element. It knows the
/// duration only when the playlist supplied one, exactly like an element
/// whose metadata never loaded.
#[derive(Debug, Default)]
pub struct HeadlessAudio {
    src: Option<String>,
    duration: Option<f64>,
    position: f64,
    running: bool,
}

impl HeadlessAudio {
    /// Moves the clock forward by `elapsed` and reports what an audio element
    /// would have signalled.
    pub fn advance(&mut self, elapsed: Duration) -> Option<Event> {
        if !self.running {
            return None;
        }
        self.position += elapsed.as_secs_f64();
        match self.duration {
            Some(d) if self.position >= d => {
                self.position = d;
                self.running = false;
                Some(Event::TrackEnded)
            }
            _ => Some(Event::TimeAdvanced),
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }
}

impl AudioOutput for HeadlessAudio {
    fn load(&mut self, src: &str, duration_hint: Option<f64>) {
        self.src = Some(src.to_string());
        self.duration = duration_hint.filter(|d| d.is_finite() && *d > 0.0);
        self.position = 0.0;
        self.running = false;
    }

    fn play(&mut self) -> WidgetResult<()> {
        let src = self
            .src
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| WidgetError::PlaybackRejected("no source loaded".to_string()))?;

        if src.contains("://") && !urls::is_remote(src) {
            return Err(WidgetError::PlaybackRejected(format!(
                "unsupported scheme: {src}"
            )));
        }

        let path = src.split(['?', '#']).next().unwrap_or(src);
        let ext = path
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .unwrap_or_default();
        if !SUPPORTED_EXTENSIONS.contains(&ext.as_str()) {
            return Err(WidgetError::PlaybackRejected(format!(
                "unsupported format: {src}"
            )));
        }

        self.running = true;
        Ok(())
    }

    fn pause(&mut self) {
        self.running = false;
    }

    fn current_time(&self) -> f64 {
        self.position
    }

    fn duration(&self) -> Option<f64> {
        self.duration
    }

    fn set_current_time(&mut self, seconds: f64) {
        let upper = self.duration.unwrap_or(f64::MAX);
        self.position = seconds.clamp(0.0, upper);
    }
}
