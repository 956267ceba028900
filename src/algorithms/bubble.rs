//! Bubble sort.
//!
//! Every outer pass scans its full inner range whether or not the previous
//! pass swapped anything. [`crate::engine::RunOptions::bubble_early_exit`]
//! opts into stopping after a clean pass; the event stream up to that point
//! is identical to the full-pass variant.

use super::{Progress, Stepper};
use crate::engine::tracer::Tracer;

/// Bubble sort loop state.
#[derive(Debug, Clone)]
pub(crate) struct BubbleSort {
    pass: usize,
    j: usize,
    swapped: bool,
    early_exit: bool,
}

impl BubbleSort {
    pub(crate) const fn new(early_exit: bool) -> Self {
        Self {
            pass: 0,
            j: 0,
            swapped: false,
            early_exit,
        }
    }
}

impl Stepper for BubbleSort {
    fn advance(&mut self, tracer: &mut Tracer) -> Progress {
        let n = tracer.len();
        if self.pass >= n {
            return Progress::Done;
        }

        // Inner range is 0..n-pass-1; pass < n so n - pass >= 1.
        if self.j + 1 < n - self.pass {
            let j = self.j;
            tracer.compare(j, j + 1);
            if tracer.value(j) > tracer.value(j + 1) {
                tracer.swap(j, j + 1);
                self.swapped = true;
            }
            self.j += 1;
            return Progress::Continue;
        }

        if self.early_exit && !self.swapped {
            return Progress::Done;
        }
        self.pass += 1;
        self.j = 0;
        self.swapped = false;
        Progress::Continue
    }
}

#[cfg(test)]
mod tests {
    use crate::algorithms::Algorithm;
    use crate::engine::{run, run_with, EventKind, Indices, RunOptions};

    #[test]
    fn test_first_swap_and_final_sequence() {
        let events: Vec<_> = run(vec![5, 3, 8, 1], Algorithm::Bubble).collect();
        let first = events
            .iter()
            .find(|e| e.kind == EventKind::Swap)
            .expect("at least one swap");
        assert_eq!(first.indices, Indices::Pair(0, 1));
        assert_eq!(first.snapshot, vec![3, 5, 8, 1]);

        let last = events.last().expect("completion");
        assert!(last.is_complete());
        assert_eq!(last.snapshot, vec![1, 3, 5, 8]);
    }

    #[test]
    fn test_sorted_input_emits_no_swaps() {
        let events: Vec<_> = run(vec![1, 2, 3, 4], Algorithm::Bubble).collect();
        assert_eq!(events.len(), 1);
        assert!(events[0].is_complete());
    }

    #[test]
    fn test_full_passes_compare_count() {
        // Without early exit every pass scans its whole range: 3 + 2 + 1 + 0.
        let options = RunOptions {
            emit_compares: true,
            ..RunOptions::default()
        };
        let compares = run_with(vec![1, 2, 3, 4], Algorithm::Bubble, options)
            .filter(|e| e.kind == EventKind::Compare)
            .count();
        assert_eq!(compares, 6);
    }

    #[test]
    fn test_early_exit_stops_after_clean_pass() {
        let options = RunOptions {
            emit_compares: true,
            bubble_early_exit: true,
        };
        let compares = run_with(vec![1, 2, 3, 4], Algorithm::Bubble, options)
            .filter(|e| e.kind == EventKind::Compare)
            .count();
        assert_eq!(compares, 3);
    }

    #[test]
    fn test_early_exit_same_mutations() {
        let input = vec![9, -2, 7, 7, 0, 3];
        let full: Vec<_> = run(input.clone(), Algorithm::Bubble)
            .filter(|e| e.is_mutation())
            .collect();
        let options = RunOptions {
            bubble_early_exit: true,
            ..RunOptions::default()
        };
        let early: Vec<_> = run_with(input, Algorithm::Bubble, options)
            .filter(|e| e.is_mutation())
            .collect();
        assert_eq!(full, early);
    }
}
