//! Trace event vocabulary.
//!
//! A [`TraceEvent`] is one observable step of a sort run. Events are plain
//! data: they own a copy of the full sequence so that a consumer buffering
//! them for later replay is never affected by mutations that happen after
//! the event was produced.

use serde::{Deserialize, Serialize};

/// What happened at a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// Two positions were compared; nothing changed.
    Compare,
    /// Two positions exchanged values.
    Swap,
    /// The value left of the index was copied into the index.
    Shift,
    /// A held value was written into the index.
    Set,
    /// Positions were examined without any change.
    HighlightOnly,
    /// The run finished; the snapshot is the final sorted sequence.
    Complete,
}

impl EventKind {
    /// True for kinds that change the sequence.
    #[must_use]
    pub const fn is_mutation(self) -> bool {
        matches!(self, Self::Swap | Self::Shift | Self::Set)
    }

    /// Number of positions an event of this kind carries.
    #[must_use]
    pub const fn arity(self) -> usize {
        match self {
            Self::Compare | Self::Swap => 2,
            Self::Shift | Self::Set | Self::HighlightOnly => 1,
            Self::Complete => 0,
        }
    }
}

/// Positions touched by an event.
///
/// No algorithm touches more than two positions in one step, so this is a
/// closed set rather than a vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Indices {
    /// The whole sequence (completion).
    Whole,
    /// A single position.
    One(usize),
    /// Two positions, in the order the algorithm named them.
    Pair(usize, usize),
}

impl Indices {
    /// Number of explicit positions.
    #[must_use]
    pub const fn len(&self) -> usize {
        match self {
            Self::Whole => 0,
            Self::One(_) => 1,
            Self::Pair(_, _) => 2,
        }
    }

    /// True for [`Indices::Whole`].
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Whole)
    }

    /// Check whether `index` is one of the explicit positions.
    #[must_use]
    pub const fn contains(&self, index: usize) -> bool {
        match *self {
            Self::Whole => false,
            Self::One(a) => a == index,
            Self::Pair(a, b) => a == index || b == index,
        }
    }

    /// Iterate over the explicit positions.
    pub fn iter(&self) -> impl Iterator<Item = usize> {
        let (first, second) = match *self {
            Self::Whole => (None, None),
            Self::One(a) => (Some(a), None),
            Self::Pair(a, b) => (Some(a), Some(b)),
        };
        first.into_iter().chain(second)
    }

    /// Largest explicit position, if any.
    #[must_use]
    pub fn max(&self) -> Option<usize> {
        self.iter().max()
    }
}

/// One observable step of a sort run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceEvent {
    /// Position of this event in the run, starting at zero with no gaps.
    pub sequence_number: u64,
    /// What happened.
    pub kind: EventKind,
    /// Positions involved.
    pub indices: Indices,
    /// Full sequence after the event was applied.
    pub snapshot: Vec<i64>,
}

impl TraceEvent {
    /// Build an event, copying the sequence into an owned snapshot.
    #[must_use]
    pub fn new(sequence_number: u64, kind: EventKind, indices: Indices, sequence: &[i64]) -> Self {
        Self {
            sequence_number,
            kind,
            indices,
            snapshot: sequence.to_vec(),
        }
    }

    /// True if the event changed the sequence.
    #[must_use]
    pub const fn is_mutation(&self) -> bool {
        self.kind.is_mutation()
    }

    /// True for the final event of a run.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.kind == EventKind::Complete
    }

    /// Check whether the event highlights `index`.
    #[must_use]
    pub const fn touches(&self, index: usize) -> bool {
        self.indices.contains(index)
    }
}
