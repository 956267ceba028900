//! Selection sort.
//!
//! One `Swap(i, min_index)` per outer pass, emitted even when the minimum is
//! already in place. Those self-swaps are observable no-ops a renderer can
//! use to show the pass boundary.

use super::{Progress, Stepper};
use crate::engine::tracer::Tracer;

/// Selection sort loop state.
#[derive(Debug, Clone)]
pub(crate) struct SelectionSort {
    pass: usize,
    probe: usize,
    min_index: usize,
}

impl SelectionSort {
    pub(crate) const fn new() -> Self {
        Self {
            pass: 0,
            probe: 1,
            min_index: 0,
        }
    }
}

impl Stepper for SelectionSort {
    fn advance(&mut self, tracer: &mut Tracer) -> Progress {
        let n = tracer.len();
        if self.pass >= n {
            return Progress::Done;
        }

        if self.probe < n {
            tracer.compare(self.probe, self.min_index);
            if tracer.value(self.probe) < tracer.value(self.min_index) {
                self.min_index = self.probe;
                tracer.highlight(self.probe);
            }
            self.probe += 1;
            return Progress::Continue;
        }

        tracer.swap(self.pass, self.min_index);
        self.pass += 1;
        self.probe = self.pass + 1;
        self.min_index = self.pass;
        Progress::Continue
    }
}
