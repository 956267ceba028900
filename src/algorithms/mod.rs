//! Sorting algorithms as resumable steppers.
//!
//! Each algorithm keeps its loop counters in a small struct and advances by
//! one unit of work per call: one inner-loop iteration, one sift-down level,
//! one pass boundary. The surrounding [`crate::engine::Run`] pulls steps
//! until an event is queued, which is what makes the trace lazy.
//!
//! # Algorithms
//!
//! 1. [`Algorithm::Insertion`] - shift larger predecessors right, then set the key
//! 2. [`Algorithm::Bubble`] - adjacent swaps, full passes (optional early exit)
//! 3. [`Algorithm::Selection`] - one swap per pass, self-swaps included
//! 4. [`Algorithm::Heap`] - bottom-up max-heap build, then root extraction

pub mod bubble;
pub mod heap;
pub mod insertion;
pub mod selection;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::engine::tracer::Tracer;
use crate::engine::RunOptions;
use crate::error::SortError;

use bubble::BubbleSort;
use heap::HeapSort;
use insertion::InsertionSort;
use selection::SelectionSort;

/// Which sort to trace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    /// Insertion sort.
    #[default]
    Insertion,
    /// Bubble sort.
    Bubble,
    /// Selection sort.
    Selection,
    /// Heap sort.
    Heap,
}

impl Algorithm {
    /// Every supported algorithm, in menu order.
    pub const ALL: [Self; 4] = [Self::Bubble, Self::Selection, Self::Heap, Self::Insertion];

    /// Lowercase identifier used in configuration files.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::Insertion => "insertion",
            Self::Bubble => "bubble",
            Self::Selection => "selection",
            Self::Heap => "heap",
        }
    }

    /// Human-readable name for titles.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Insertion => "Insertion Sort",
            Self::Bubble => "Bubble Sort",
            Self::Selection => "Selection Sort",
            Self::Heap => "Heap Sort",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Algorithm {
    type Err = SortError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|a| a.id() == wanted || a.display_name().to_ascii_lowercase() == wanted)
            .ok_or_else(|| SortError::config(format!("unknown algorithm '{}'", s.trim())))
    }
}

/// Outcome of one unit of work.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Progress {
    /// More work remains.
    Continue,
    /// The sequence is sorted; no further steps will be taken.
    Done,
}

/// A sort that advances one bounded unit of work at a time.
pub(crate) trait Stepper {
    /// Perform the next unit of work, recording events through `tracer`.
    fn advance(&mut self, tracer: &mut Tracer) -> Progress;
}

/// Static dispatch over the four steppers.
#[derive(Debug, Clone)]
pub(crate) enum AlgorithmState {
    Insertion(InsertionSort),
    Bubble(BubbleSort),
    Selection(SelectionSort),
    Heap(HeapSort),
}

impl AlgorithmState {
    pub(crate) fn new(algorithm: Algorithm, len: usize, options: &RunOptions) -> Self {
        match algorithm {
            Algorithm::Insertion => Self::Insertion(InsertionSort::new()),
            Algorithm::Bubble => Self::Bubble(BubbleSort::new(options.bubble_early_exit)),
            Algorithm::Selection => Self::Selection(SelectionSort::new()),
            Algorithm::Heap => Self::Heap(HeapSort::new(len)),
        }
    }
}

impl Stepper for AlgorithmState {
    fn advance(&mut self, tracer: &mut Tracer) -> Progress {
        match self {
            Self::Insertion(s) => s.advance(tracer),
            Self::Bubble(s) => s.advance(tracer),
            Self::Selection(s) => s.advance(tracer),
            Self::Heap(s) => s.advance(tracer),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_algorithm_default() {
        assert_eq!(Algorithm::default(), Algorithm::Insertion);
    }

    #[test]
    fn test_algorithm_from_str() {
        assert_eq!("heap".parse::<Algorithm>().ok(), Some(Algorithm::Heap));
        assert_eq!(" Bubble ".parse::<Algorithm>().ok(), Some(Algorithm::Bubble));
        assert_eq!(
            "selection sort".parse::<Algorithm>().ok(),
            Some(Algorithm::Selection)
        );
        let err = "quick".parse::<Algorithm>().expect_err("unknown");
        assert!(err.to_string().contains("unknown algorithm 'quick'"));
    }

    #[test]
    fn test_algorithm_serialization() {
        let yaml = serde_yaml::to_string(&Algorithm::Heap).expect("serialize");
        assert_eq!(yaml.trim(), "heap");
        let back: Algorithm = serde_yaml::from_str("insertion").expect("deserialize");
        assert_eq!(back, Algorithm::Insertion);
    }

    #[test]
    fn test_display_names() {
        for algorithm in Algorithm::ALL {
            assert!(algorithm.to_string().ends_with("Sort"));
        }
    }
}
