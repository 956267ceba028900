//! Heap sort with an iterative sift-down.
//!
//! ```text
//! build:   for root in (0..n/2).rev(): sift_down(root, n)
//! extract: for end in (1..n).rev():    Swap(end, 0); sift_down(0, end)
//! ```
//!
//! Sift-down picks the largest of a node and its children `2i+1`, `2i+2`
//! using strict `>`, left before right, so ties keep the parent. Each call to
//! [`Stepper::advance`] descends at most one level, which bounds the work
//! between events by a constant and keeps the stack flat.

use super::{Progress, Stepper};
use crate::engine::tracer::Tracer;

/// One in-progress sift-down.
#[derive(Debug, Clone, Copy)]
struct SiftDown {
    node: usize,
    heap_size: usize,
}

impl SiftDown {
    /// Descend one level. Returns `false` once the heap property holds.
    fn step(&mut self, tracer: &mut Tracer) -> bool {
        let left = 2 * self.node + 1;
        let right = left + 1;
        let mut largest = self.node;

        if left < self.heap_size {
            tracer.compare(left, largest);
            if tracer.value(left) > tracer.value(largest) {
                largest = left;
            }
        }
        if right < self.heap_size {
            tracer.compare(right, largest);
            if tracer.value(right) > tracer.value(largest) {
                largest = right;
            }
        }

        if largest == self.node {
            return false;
        }
        tracer.swap(self.node, largest);
        self.node = largest;
        true
    }
}

#[derive(Debug, Clone, Copy)]
enum Phase {
    /// Roots `0..remaining` still need a sift, processed high to low.
    Build { remaining: usize },
    /// `0..=end` is the unsorted heap.
    Extract { end: usize },
}

/// Heap sort loop state.
#[derive(Debug, Clone)]
pub(crate) struct HeapSort {
    phase: Phase,
    sift: Option<SiftDown>,
}

impl HeapSort {
    pub(crate) const fn new(len: usize) -> Self {
        Self {
            phase: Phase::Build { remaining: len / 2 },
            sift: None,
        }
    }
}

impl Stepper for HeapSort {
    fn advance(&mut self, tracer: &mut Tracer) -> Progress {
        if let Some(sift) = self.sift.as_mut() {
            if !sift.step(tracer) {
                self.sift = None;
            }
            return Progress::Continue;
        }

        let n = tracer.len();
        match self.phase {
            Phase::Build { remaining: 0 } => {
                if n < 2 {
                    return Progress::Done;
                }
                self.phase = Phase::Extract { end: n - 1 };
            }
            Phase::Build { remaining } => {
                self.sift = Some(SiftDown {
                    node: remaining - 1,
                    heap_size: n,
                });
                self.phase = Phase::Build {
                    remaining: remaining - 1,
                };
            }
            Phase::Extract { end: 0 } => return Progress::Done,
            Phase::Extract { end } => {
                tracer.swap(end, 0);
                self.sift = Some(SiftDown {
                    node: 0,
                    heap_size: end,
                });
                self.phase = Phase::Extract { end: end - 1 };
            }
        }
        Progress::Continue
    }
}

#[cfg(test)]
mod tests {
    use crate::algorithms::Algorithm;
    use crate::engine::{run, run_with, EventKind, Indices, RunOptions};

    #[test]
    fn test_build_phase_then_first_extraction() {
        let events: Vec<_> = run(vec![4, 10, 3, 5, 1], Algorithm::Heap).collect();

        // Build: Swap(0,1) -> [10,4,3,5,1], Swap(1,3) -> [10,5,3,4,1].
        assert_eq!(events[0].indices, Indices::Pair(0, 1));
        assert_eq!(events[1].indices, Indices::Pair(1, 3));
        assert_eq!(events[1].snapshot, vec![10, 5, 3, 4, 1]);
        assert_eq!(events[1].snapshot[0], 10);

        // First extraction moves the root to the end.
        assert_eq!(events[2].kind, EventKind::Swap);
        assert_eq!(events[2].indices, Indices::Pair(4, 0));
        assert_eq!(events[2].snapshot, vec![1, 5, 3, 4, 10]);

        let last = events.last().expect("completion");
        assert_eq!(last.snapshot, vec![1, 3, 4, 5, 10]);
    }

    #[test]
    fn test_two_elements() {
        let events: Vec<_> = run(vec![1, 2], Algorithm::Heap).collect();
        // Build swaps 2 to the root, extraction moves it back.
        assert_eq!(events.len(), 3);
        assert_eq!(events[0].indices, Indices::Pair(0, 1));
        assert_eq!(events[1].indices, Indices::Pair(1, 0));
        assert_eq!(events[2].snapshot, vec![1, 2]);
    }

    #[test]
    fn test_ties_keep_parent() {
        let options = RunOptions {
            emit_compares: true,
            ..RunOptions::default()
        };
        let events: Vec<_> = run_with(vec![7, 7, 7], Algorithm::Heap, options).collect();
        // Only the two extraction swaps; no sift ever moves an equal child up.
        let swaps: Vec<_> = events
            .iter()
            .filter(|e| e.kind == EventKind::Swap)
            .map(|e| e.indices)
            .collect();
        assert_eq!(swaps, vec![Indices::Pair(2, 0), Indices::Pair(1, 0)]);
    }

    #[test]
    fn test_large_input_sorted() {
        let input: Vec<i64> = (0..2_000).map(|i| (i * 7_919) % 2_003 - 1_000).collect();
        let mut expected = input.clone();
        expected.sort_unstable();
        let last = run(input, Algorithm::Heap).last().expect("completion");
        assert_eq!(last.snapshot, expected);
    }
}
