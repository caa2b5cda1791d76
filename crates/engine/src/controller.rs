use crate::audio::AudioOutput;
use jukelet_core::{PlayerSnapshot, Track, WidgetError, WidgetResult};
use tracing::{debug, warn};

/// Owns the track list and the (index, playing) pair. Every index-bearing
/// operation treats an empty list as a no-op.
pub struct PlaybackController<A> {
    audio: A,
    tracks: Vec<Track>,
    index: usize,
    playing: bool,
    last_error: Option<WidgetError>,
}

impl<A: AudioOutput> PlaybackController<A> {
    pub fn new(audio: A) -> Self {
        Self {
            audio,
            tracks: Vec::new(),
            index: 0,
            playing: false,
            last_error: None,
        }
    }

    pub fn snapshot(&self) -> PlayerSnapshot {
        PlayerSnapshot {
            index: self.index,
            playing: self.playing,
            track_count: self.tracks.len(),
        }
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn current_track(&self) -> Option<&Track> {
        self.tracks.get(self.index)
    }

    pub fn has_tracks(&self) -> bool {
        !self.tracks.is_empty()
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn last_error(&self) -> Option<&WidgetError> {
        self.last_error.as_ref()
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    pub fn audio_mut(&mut self) -> &mut A {
        &mut self.audio
    }

    /// Installs a freshly fetched list. The current index survives when it is
    /// still in range; playback resumes on the reloaded track if it was on.
    pub fn reconcile(&mut self, tracks: Vec<Track>) {
        let was_playing = self.playing;
        self.tracks = tracks;

        if self.tracks.is_empty() {
            self.index = 0;
            if self.playing {
                self.audio.pause();
            }
            self.playing = false;
            return;
        }

        if self.index >= self.tracks.len() {
            self.index = 0;
        }
        self.load_current();
        if was_playing {
            let _ = self.play();
        }
    }

    /// Points the output at track `index` and rewinds it. Leaves `playing`
    /// alone.
    pub fn load(&mut self, index: usize) -> WidgetResult<()> {
        if index >= self.tracks.len() {
            return Err(WidgetError::InvalidIndex {
                index,
                len: self.tracks.len(),
            });
        }
        self.index = index;
        self.load_current();
        Ok(())
    }

    fn load_current(&mut self) {
        let Some(track) = self.tracks.get(self.index) else {
            return;
        };
        debug!(index = self.index, src = %track.src, "loading track");
        self.audio.load(&track.src, track.duration);
        self.audio.set_current_time(0.0);
        self.last_error = None;
    }

    pub fn play(&mut self) -> WidgetResult<()> {
        if self.tracks.is_empty() {
            return Ok(());
        }
        match self.audio.play() {
            Ok(()) => {
                self.playing = true;
                self.last_error = None;
                Ok(())
            }
            Err(err) => {
                warn!(index = self.index, error = %err, "playback rejected");
                self.playing = false;
                self.last_error = Some(err.clone());
                Err(err)
            }
        }
    }

    pub fn pause(&mut self) {
        self.playing = false;
        self.audio.pause();
    }

    pub fn toggle(&mut self) -> WidgetResult<()> {
        if self.playing {
            self.pause();
            Ok(())
        } else {
            self.play()
        }
    }

    pub fn next(&mut self) {
        let len = self.tracks.len();
        if len == 0 {
            return;
        }
        self.step((self.index + 1) % len);
    }

    pub fn previous(&mut self) {
        let len = self.tracks.len();
        if len == 0 {
            return;
        }
        self.step((self.index + len - 1) % len);
    }

    pub fn on_track_ended(&mut self) {
        self.next();
    }

    fn step(&mut self, index: usize) {
        let was_playing = self.playing;
        self.index = index;
        self.load_current();
        if was_playing {
            let _ = self.play();
        }
    }

    /// List click: load `index` then start it.
    pub fn select(&mut self, index: usize) -> WidgetResult<()> {
        self.load(index)?;
        self.play()
    }

    /// Seeks to `fraction` of the track, clamped into `[0, 1]`. Returns the
    /// new position, or `None` when nothing happened (no tracks, unknown
    /// duration, NaN fraction).
    pub fn seek(&mut self, fraction: f64) -> Option<f64> {
        if self.tracks.is_empty() || fraction.is_nan() {
            return None;
        }
        let duration = self.audio.duration().filter(|d| d.is_finite() && *d > 0.0)?;
        let target = fraction.clamp(0.0, 1.0) * duration;
        self.audio.set_current_time(target);
        Some(target)
    }

    /// Progress-bar click at `offset_x` on a bar `width` wide.
    pub fn seek_click(&mut self, offset_x: f64, width: f64) -> Option<f64> {
        if width.is_nan() || width <= 0.0 {
            return None;
        }
        self.seek(offset_x / width)
    }
}
