//! Playback state, rendering and event handling for the player widget.
//!
//! Everything here is synchronous and runs on whichever task owns the
//! [`Widget`]. Async fetches happen elsewhere and come back as [`Event`]s
//! stamped with a [`Ticket`].

pub mod audio;
pub mod controller;
pub mod events;
pub mod progress;
pub mod render;
pub mod surface;
pub mod widget;

pub use audio::AudioOutput;
pub use controller::PlaybackController;
pub use events::{Event, EventQueue, FetchKind, Ticket};
pub use progress::progress_view;
pub use render::{render_list, render_now_playing};
pub use surface::{
    ListEntry, ListView, MemorySurface, NowPlayingView, PlayIcon, ProgressView, SnippetView,
    Surface,
};
pub use widget::{Dispatch, Widget, WidgetConfig, NO_TRACKS_MESSAGE};
