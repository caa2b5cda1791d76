use jukelet_core::{Snippet, WidgetResult};
use jukelet_sources::LoadOutcome;
use std::collections::VecDeque;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FetchKind {
    Playlist,
    Snippet,
}

/// Stamp carried by an async fetch from the moment it is issued until its
/// result comes back as an [`Event`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    pub kind: FetchKind,
    pub generation: u64,
}

#[derive(Debug, Clone)]
pub enum Event {
    Play,
    Pause,
    TogglePlay,
    Next,
    Previous,
    Select(usize),
    Seek(f64),
    SeekClick { offset_x: f64, width: f64 },
    TimeAdvanced,
    TrackEnded,
    PlaylistLoaded { ticket: Ticket, outcome: LoadOutcome },
    SnippetFetched { ticket: Ticket, result: WidgetResult<Snippet> },
}

/// FIFO of pending events, drained in arrival order.
#[derive(Debug, Default)]
pub struct EventQueue {
    pending: VecDeque<Event>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: Event) {
        self.pending.push_back(event);
    }

    pub fn pop(&mut self) -> Option<Event> {
        self.pending.pop_front()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }
}

/// Generation bookkeeping for one fetch kind. Only the result of the most
/// recently issued request is applied, once; anything older is stale even if
/// the newer request has not answered yet.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct Generations {
    issued: u64,
    applied: u64,
}

impl Generations {
    pub(crate) fn issue(&mut self) -> u64 {
        self.issued += 1;
        self.issued
    }

    pub(crate) fn accept(&mut self, generation: u64) -> bool {
        if generation == 0 || generation != self.issued || generation <= self.applied {
            return false;
        }
        self.applied = generation;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::{Event, EventQueue, Generations};

    #[test]
    fn queue_is_fifo() {
        let mut q = EventQueue::new();
        q.push(Event::Next);
        q.push(Event::Select(3));
        q.push(Event::Pause);
        assert_eq!(q.len(), 3);
        assert!(matches!(q.pop(), Some(Event::Next)));
        assert!(matches!(q.pop(), Some(Event::Select(3))));
        assert!(matches!(q.pop(), Some(Event::Pause)));
        assert!(q.is_empty());
    }

    #[test]
    fn generations_reject_stale_and_unknown() {
        let mut g = Generations::default();
        let first = g.issue();
        let second = g.issue();

        assert!(g.accept(second));
        assert!(!g.accept(first));
        assert!(!g.accept(second));
        assert!(!g.accept(99));

        let third = g.issue();
        assert!(g.accept(third));
    }

    #[test]
    fn older_result_is_stale_while_newer_is_in_flight() {
        let mut g = Generations::default();
        let old = g.issue();
        let new = g.issue();

        assert!(!g.accept(old));
        assert!(g.accept(new));
    }
}
