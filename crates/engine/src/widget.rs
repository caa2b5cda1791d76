use crate::audio::AudioOutput;
use crate::controller::PlaybackController;
use crate::events::{Event, EventQueue, FetchKind, Generations, Ticket};
use crate::progress::progress_view;
use crate::render::{render_list, render_now_playing};
use crate::surface::{SnippetView, Surface};
use jukelet_core::{AppConfig, HighlightPolicy, PlayerSnapshot, Snippet, WidgetResult};
use jukelet_sources::LoadOutcome;
use tracing::{debug, info, warn};

pub const NO_TRACKS_MESSAGE: &str = "No tracks available.";

#[derive(Debug, Clone)]
pub struct WidgetConfig {
    pub highlight: HighlightPolicy,
    pub default_message: String,
    pub no_tracks_message: String,
}

impl WidgetConfig {
    pub fn from_app_config(cfg: &AppConfig) -> Self {
        Self {
            highlight: cfg.player.highlight,
            default_message: cfg.snippet.default_message.clone(),
            no_tracks_message: NO_TRACKS_MESSAGE.to_string(),
        }
    }
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self::from_app_config(&AppConfig::default())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    Applied,
    Stale,
}

/// The single owner of player state. Events go in through [`Widget::enqueue`]
/// (or straight to [`Widget::dispatch`]); every handled event ends with a
/// full re-render of the regions it touched.
pub struct Widget<A, S> {
    cfg: WidgetConfig,
    controller: PlaybackController<A>,
    surface: S,
    queue: EventQueue,
    playlist_gen: Generations,
    snippet_gen: Generations,
    shut_down: bool,
}

impl<A: AudioOutput, S: Surface> Widget<A, S> {
    pub fn new(cfg: WidgetConfig, audio: A, surface: S) -> Self {
        Self {
            cfg,
            controller: PlaybackController::new(audio),
            surface,
            queue: EventQueue::new(),
            playlist_gen: Generations::default(),
            snippet_gen: Generations::default(),
            shut_down: false,
        }
    }

    pub fn snapshot(&self) -> PlayerSnapshot {
        self.controller.snapshot()
    }

    pub fn controller(&self) -> &PlaybackController<A> {
        &self.controller
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn audio_mut(&mut self) -> &mut A {
        self.controller.audio_mut()
    }

    /// Stamps a new fetch of `kind`. `None` once the widget is shut down.
    pub fn begin_fetch(&mut self, kind: FetchKind) -> Option<Ticket> {
        if self.shut_down {
            return None;
        }
        let generation = match kind {
            FetchKind::Playlist => self.playlist_gen.issue(),
            FetchKind::Snippet => self.snippet_gen.issue(),
        };
        Some(Ticket { kind, generation })
    }

    /// After this every in-flight result is stale and queued events are
    /// dropped.
    pub fn shutdown(&mut self) {
        self.shut_down = true;
        self.queue.clear();
        self.controller.pause();
    }

    pub fn enqueue(&mut self, event: Event) {
        if !self.shut_down {
            self.queue.push(event);
        }
    }

    /// Handles queued events in arrival order; returns how many were applied.
    pub fn process_pending(&mut self) -> usize {
        let mut applied = 0;
        while let Some(event) = self.queue.pop() {
            if self.dispatch(event) == Dispatch::Applied {
                applied += 1;
            }
        }
        applied
    }

    pub fn dispatch(&mut self, event: Event) -> Dispatch {
        if self.shut_down {
            return Dispatch::Stale;
        }

        match event {
            Event::Play => {
                let _ = self.controller.play();
                self.render_player();
            }
            Event::Pause => {
                self.controller.pause();
                self.render_player();
            }
            Event::TogglePlay => {
                let _ = self.controller.toggle();
                self.render_player();
            }
            Event::Next => {
                self.controller.next();
                self.render_player();
            }
            Event::Previous => {
                self.controller.previous();
                self.render_player();
            }
            Event::TrackEnded => {
                debug!("track ended");
                self.controller.on_track_ended();
                self.render_player();
            }
            Event::Select(index) => {
                if let Err(err) = self.controller.select(index) {
                    warn!(index, error = %err, "select failed");
                }
                self.render_player();
            }
            Event::Seek(fraction) => {
                if self.controller.seek(fraction).is_some() {
                    self.render_progress();
                }
            }
            Event::SeekClick { offset_x, width } => {
                if self.controller.seek_click(offset_x, width).is_some() {
                    self.render_progress();
                }
            }
            Event::TimeAdvanced => self.render_progress(),
            Event::PlaylistLoaded { ticket, outcome } => {
                if !self.accept(ticket) {
                    return Dispatch::Stale;
                }
                self.apply_playlist(outcome);
            }
            Event::SnippetFetched { ticket, result } => {
                if !self.accept(ticket) {
                    return Dispatch::Stale;
                }
                self.apply_snippet(result);
            }
        }
        Dispatch::Applied
    }

    fn accept(&mut self, ticket: Ticket) -> bool {
        let fresh = match ticket.kind {
            FetchKind::Playlist => self.playlist_gen.accept(ticket.generation),
            FetchKind::Snippet => self.snippet_gen.accept(ticket.generation),
        };
        if !fresh {
            debug!(kind = ?ticket.kind, generation = ticket.generation, "discarding stale result");
        }
        fresh
    }

    fn apply_playlist(&mut self, outcome: LoadOutcome) {
        if let Some(err) = &outcome.error {
            warn!(source = %outcome.source, error = %err, "playlist unavailable");
        }
        if outcome.tracks.is_empty() {
            warn!(source = %outcome.source, "no tracks found");
        } else {
            info!(source = %outcome.source, count = outcome.tracks.len(), "playlist applied");
        }
        self.controller.reconcile(outcome.tracks);
        self.render_player();
    }

    fn apply_snippet(&mut self, result: WidgetResult<Snippet>) {
        let view = match result {
            Ok(snippet) if !snippet.is_blank() => SnippetView {
                text: snippet.text.clone(),
                media: snippet.renderable_media().cloned().collect(),
                is_default: false,
            },
            Ok(_) => self.default_snippet(),
            Err(err) => {
                warn!(error = %err, "snippet unavailable; showing default message");
                self.default_snippet()
            }
        };
        self.surface.show_snippet(&view);
    }

    fn default_snippet(&self) -> SnippetView {
        SnippetView {
            text: self.cfg.default_message.clone(),
            media: Vec::new(),
            is_default: true,
        }
    }

    /// Re-renders now-playing, the list and progress from current state.
    pub fn render_player(&mut self) {
        let snapshot = self.controller.snapshot();
        let now_playing = render_now_playing(
            self.controller.current_track(),
            snapshot,
            self.controller.last_error(),
            &self.cfg.no_tracks_message,
        );
        let list = render_list(
            self.controller.tracks(),
            snapshot,
            self.cfg.highlight,
            &self.cfg.no_tracks_message,
        );
        self.surface.show_now_playing(&now_playing);
        self.surface.show_list(&list);
        self.render_progress();
    }

    fn render_progress(&mut self) {
        let view = if self.controller.has_tracks() {
            let audio = self.controller.audio();
            progress_view(audio.current_time(), audio.duration())
        } else {
            None
        };
        self.surface.show_progress(view.as_ref());
    }
}

#[cfg(test)]
mod tests {
    use super::{Dispatch, Widget, WidgetConfig};
    use crate::controller::tests::{tracks, FakeAudio};
    use crate::events::{Event, FetchKind};
    use crate::surface::{ListView, MemorySurface, PlayIcon};
    use jukelet_core::{parse_snippet, HighlightPolicy, MediaKind, WidgetError};
    use jukelet_sources::LoadOutcome;

    fn widget() -> Widget<FakeAudio, MemorySurface> {
        Widget::new(
            WidgetConfig::default(),
            FakeAudio::default(),
            MemorySurface::default(),
        )
    }

    fn loaded(w: &mut Widget<FakeAudio, MemorySurface>, n: usize) {
        let ticket = w.begin_fetch(FetchKind::Playlist).unwrap();
        let outcome = LoadOutcome::loaded("test", tracks(n));
        assert_eq!(
            w.dispatch(Event::PlaylistLoaded { ticket, outcome }),
            Dispatch::Applied
        );
    }

    #[test]
    fn failed_playlist_shows_no_tracks() {
        let mut w = widget();
        let ticket = w.begin_fetch(FetchKind::Playlist).unwrap();
        let outcome =
            LoadOutcome::failed("test", WidgetError::FetchFailed("connection refused".into()));
        w.dispatch(Event::PlaylistLoaded { ticket, outcome });

        assert!(!w.snapshot().has_tracks());
        assert_eq!(
            w.surface().list,
            Some(ListView::Empty {
                message: "No tracks available.".to_string()
            })
        );

        w.dispatch(Event::Next);
        w.dispatch(Event::Play);
        assert!(!w.snapshot().playing);
    }

    #[test]
    fn queued_events_apply_in_order() {
        let mut w = widget();
        loaded(&mut w, 4);

        w.enqueue(Event::Select(2));
        w.enqueue(Event::Next);
        w.enqueue(Event::Next);
        w.enqueue(Event::Pause);
        assert_eq!(w.process_pending(), 4);

        let snap = w.snapshot();
        assert_eq!(snap.index, 0);
        assert!(!snap.playing);
        assert_eq!(w.surface().list.as_ref().unwrap().active_indices(), vec![0]);
        assert_eq!(
            w.surface().now_playing.as_ref().unwrap().icon,
            PlayIcon::Play
        );
    }

    #[test]
    fn rerender_with_same_state_is_idempotent() {
        let mut w = widget();
        loaded(&mut w, 3);
        w.dispatch(Event::Select(1));

        let first = w.surface().list.clone().unwrap();
        let renders = w.surface().list_renders;
        w.render_player();
        let second = w.surface().list.clone().unwrap();

        assert_eq!(w.surface().list_renders, renders + 1);
        assert_eq!(first, second);
        assert_eq!(first.len(), second.len());
        assert_eq!(second.len(), 3);
        assert_eq!(second.active_indices(), vec![1]);
    }

    #[test]
    fn stale_playlist_result_is_discarded() {
        let mut w = widget();
        let old = w.begin_fetch(FetchKind::Playlist).unwrap();
        let new = w.begin_fetch(FetchKind::Playlist).unwrap();

        w.dispatch(Event::PlaylistLoaded {
            ticket: new,
            outcome: LoadOutcome::loaded("new", tracks(2)),
        });
        let stale = w.dispatch(Event::PlaylistLoaded {
            ticket: old,
            outcome: LoadOutcome::loaded("old", tracks(7)),
        });

        assert_eq!(stale, Dispatch::Stale);
        assert_eq!(w.snapshot().track_count, 2);
    }

    #[test]
    fn older_playlist_arriving_first_is_discarded() {
        let mut w = widget();
        let old = w.begin_fetch(FetchKind::Playlist).unwrap();
        let new = w.begin_fetch(FetchKind::Playlist).unwrap();

        let early = w.dispatch(Event::PlaylistLoaded {
            ticket: old,
            outcome: LoadOutcome::loaded("old", tracks(7)),
        });
        assert_eq!(early, Dispatch::Stale);
        assert_eq!(w.snapshot().track_count, 0);

        w.dispatch(Event::PlaylistLoaded {
            ticket: new,
            outcome: LoadOutcome::loaded("new", tracks(2)),
        });
        assert_eq!(w.snapshot().track_count, 2);
    }

    #[test]
    fn results_after_shutdown_are_dropped() {
        let mut w = widget();
        let ticket = w.begin_fetch(FetchKind::Snippet).unwrap();
        w.shutdown();

        assert!(w.begin_fetch(FetchKind::Snippet).is_none());
        let out = w.dispatch(Event::SnippetFetched {
            ticket,
            result: Ok(parse_snippet("late")),
        });
        assert_eq!(out, Dispatch::Stale);
        assert!(w.surface().snippet.is_none());
    }

    #[test]
    fn snippet_failure_and_blank_fall_back_to_default() {
        let mut w = widget();

        let t1 = w.begin_fetch(FetchKind::Snippet).unwrap();
        w.dispatch(Event::SnippetFetched {
            ticket: t1,
            result: Err(WidgetError::FetchFailed("timeout".into())),
        });
        let view = w.surface().snippet.clone().unwrap();
        assert!(view.is_default);
        assert_eq!(view.text, "Could not load message.");

        let t2 = w.begin_fetch(FetchKind::Snippet).unwrap();
        w.dispatch(Event::SnippetFetched {
            ticket: t2,
            result: Ok(parse_snippet("   ")),
        });
        assert!(w.surface().snippet.as_ref().unwrap().is_default);
    }

    #[test]
    fn snippet_replaces_previous_content() {
        let mut w = widget();
        let t1 = w.begin_fetch(FetchKind::Snippet).unwrap();
        w.dispatch(Event::SnippetFetched {
            ticket: t1,
            result: Ok(parse_snippet("hello https://x.test/a.png world https://x.test/page")),
        });
        let view = w.surface().snippet.clone().unwrap();
        assert_eq!(view.text, "hello world");
        assert_eq!(view.media.len(), 1);
        assert_eq!(view.media[0].kind, MediaKind::Image);

        let t2 = w.begin_fetch(FetchKind::Snippet).unwrap();
        w.dispatch(Event::SnippetFetched {
            ticket: t2,
            result: Ok(parse_snippet("plain")),
        });
        let view = w.surface().snippet.clone().unwrap();
        assert_eq!(view.text, "plain");
        assert!(view.media.is_empty());
    }

    #[test]
    fn progress_follows_time_and_seek() {
        let mut w = widget();
        loaded(&mut w, 1);
        w.dispatch(Event::Play);

        w.audio_mut().position = 65.0;
        w.dispatch(Event::TimeAdvanced);
        let progress = w.surface().progress.clone().unwrap();
        assert_eq!(progress.current, "1:05");
        assert_eq!(progress.total, "2:00");

        w.dispatch(Event::SeekClick {
            offset_x: 300.0,
            width: 400.0,
        });
        assert_eq!(w.surface().progress.as_ref().unwrap().current, "1:30");
    }

    #[test]
    fn progress_clears_when_next_track_has_no_duration() {
        let mut w = widget();
        let mut list = tracks(2);
        list[1].duration = None;
        let ticket = w.begin_fetch(FetchKind::Playlist).unwrap();
        w.dispatch(Event::PlaylistLoaded {
            ticket,
            outcome: LoadOutcome::loaded("test", list),
        });
        w.dispatch(Event::Play);
        w.audio_mut().position = 65.0;
        w.dispatch(Event::TimeAdvanced);
        assert!(w.surface().progress.is_some());

        w.dispatch(Event::Next);
        assert_eq!(w.snapshot().index, 1);
        assert!(w.surface().progress.is_none());
    }

    #[test]
    fn progress_clears_when_list_becomes_empty() {
        let mut w = widget();
        loaded(&mut w, 1);
        w.dispatch(Event::Play);
        assert!(w.surface().progress.is_some());

        let ticket = w.begin_fetch(FetchKind::Playlist).unwrap();
        w.dispatch(Event::PlaylistLoaded {
            ticket,
            outcome: LoadOutcome::loaded("test", Vec::new()),
        });
        assert!(w.surface().progress.is_none());
    }

    #[test]
    fn playing_highlight_policy_tracks_pause() {
        let cfg = WidgetConfig {
            highlight: HighlightPolicy::Playing,
            ..WidgetConfig::default()
        };
        let mut w = Widget::new(cfg, FakeAudio::default(), MemorySurface::default());
        loaded(&mut w, 3);

        assert!(w.surface().list.as_ref().unwrap().active_indices().is_empty());
        w.dispatch(Event::TogglePlay);
        assert_eq!(w.surface().list.as_ref().unwrap().active_indices(), vec![0]);
        w.dispatch(Event::TogglePlay);
        assert!(w.surface().list.as_ref().unwrap().active_indices().is_empty());
    }

    #[test]
    fn rejected_playback_surfaces_error() {
        let mut w = widget();
        loaded(&mut w, 2);
        w.audio_mut().reject = true;
        w.dispatch(Event::Select(1));

        let view = w.surface().now_playing.clone().unwrap();
        assert_eq!(view.icon, PlayIcon::Play);
        assert!(view.error.unwrap().starts_with("playback rejected"));
        assert_eq!(w.snapshot().index, 1);
    }
}
