//! Working sequence plus event recorder for a single run.
//!
//! Algorithms never touch the sequence directly: every mutation goes through
//! a [`Tracer`] method, which applies the change and queues the matching
//! event with a fresh snapshot. This keeps the event stream and the working
//! sequence in lockstep by construction.

use std::collections::VecDeque;

use super::event::{EventKind, Indices, TraceEvent};

/// Private working state of one run.
#[derive(Debug, Clone)]
pub(crate) struct Tracer {
    working: Vec<i64>,
    next_sequence: u64,
    pending: VecDeque<TraceEvent>,
    emit_compares: bool,
}

impl Tracer {
    pub(crate) fn new(initial: Vec<i64>, emit_compares: bool) -> Self {
        Self {
            working: initial,
            next_sequence: 0,
            pending: VecDeque::new(),
            emit_compares,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.working.len()
    }

    pub(crate) fn value(&self, index: usize) -> i64 {
        self.working[index]
    }

    pub(crate) fn working(&self) -> &[i64] {
        &self.working
    }

    pub(crate) fn into_working(self) -> Vec<i64> {
        self.working
    }

    /// Number of events produced so far, queued or delivered.
    pub(crate) const fn produced(&self) -> u64 {
        self.next_sequence
    }

    pub(crate) fn pop(&mut self) -> Option<TraceEvent> {
        self.pending.pop_front()
    }

    fn record(&mut self, kind: EventKind, indices: Indices) {
        let event = TraceEvent::new(self.next_sequence, kind, indices, &self.working);
        self.next_sequence += 1;
        self.pending.push_back(event);
    }

    /// Record a comparison of `a` against `b` (only when compares are traced).
    pub(crate) fn compare(&mut self, a: usize, b: usize) {
        if self.emit_compares {
            self.record(EventKind::Compare, Indices::Pair(a, b));
        }
    }

    /// Record that `index` was examined (only when compares are traced).
    pub(crate) fn highlight(&mut self, index: usize) {
        if self.emit_compares {
            self.record(EventKind::HighlightOnly, Indices::One(index));
        }
    }

    /// Exchange two positions. Self-swaps are still recorded.
    pub(crate) fn swap(&mut self, a: usize, b: usize) {
        self.working.swap(a, b);
        self.record(EventKind::Swap, Indices::Pair(a, b));
    }

    /// Copy the value left of `into` one slot to the right.
    pub(crate) fn shift(&mut self, into: usize) {
        self.working[into] = self.working[into - 1];
        self.record(EventKind::Shift, Indices::One(into));
    }

    /// Write a held value into `index`.
    pub(crate) fn set(&mut self, index: usize, value: i64) {
        self.working[index] = value;
        self.record(EventKind::Set, Indices::One(index));
    }

    /// Record the completion event.
    pub(crate) fn complete(&mut self) {
        self.record(EventKind::Complete, Indices::Whole);
    }
}
