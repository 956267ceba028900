//! Insertion sort.
//!
//! ```text
//! for i in 1..n:
//!     key = a[i]; slot = i
//!     while slot > 0 and a[slot-1] > key:   Shift(slot)
//!         a[slot] = a[slot-1]; slot -= 1
//!     a[slot] = key                          Set(slot)
//! ```
//!
//! The key is held outside the sequence while predecessors shift, so the
//! snapshot after a shift shows the shifted value twice. Equal elements are
//! never shifted.

use super::{Progress, Stepper};
use crate::engine::tracer::Tracer;

/// Insertion sort loop state.
#[derive(Debug, Clone)]
pub(crate) struct InsertionSort {
    /// Next index whose value will be picked up as the key.
    next: usize,
    /// Vacated slot the key will eventually land in.
    slot: usize,
    key: i64,
    holding: bool,
}

impl InsertionSort {
    pub(crate) const fn new() -> Self {
        Self {
            next: 1,
            slot: 0,
            key: 0,
            holding: false,
        }
    }
}

impl Stepper for InsertionSort {
    fn advance(&mut self, tracer: &mut Tracer) -> Progress {
        if !self.holding {
            if self.next >= tracer.len() {
                return Progress::Done;
            }
            self.key = tracer.value(self.next);
            self.slot = self.next;
            self.holding = true;
        }

        if self.slot > 0 {
            tracer.compare(self.slot - 1, self.slot);
            if tracer.value(self.slot - 1) > self.key {
                tracer.shift(self.slot);
                self.slot -= 1;
                return Progress::Continue;
            }
        }

        tracer.set(self.slot, self.key);
        self.holding = false;
        self.next += 1;
        Progress::Continue
    }
}
