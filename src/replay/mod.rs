//! Trace replay and verification.
//!
//! Implements:
//! - Mutation replay: rebuild the final sequence from `Swap`/`Shift`/`Set`
//! - Contract verification: gap-free numbering, index arity, held values,
//!   snapshot agreement, single trailing completion, preserved values
//! - Trace digests: blake3 over bincode-encoded events, for comparing runs
//!   across threads or processes without shipping every snapshot

use serde::{Deserialize, Serialize};
use tracing::{info_span, warn};

use crate::engine::{EventKind, Indices, TraceEvent};
use crate::error::{SortError, SortResult};

/// Apply a single event's mutation to `sequence`.
///
/// Non-mutating events leave the sequence untouched. A `Set` takes its
/// value from the event snapshot because the held key is not otherwise
/// recorded.
///
/// # Errors
///
/// Returns [`SortError::InvalidIndices`] if the event's positions do not fit
/// its kind or fall outside `sequence`.
pub fn apply(sequence: &mut [i64], event: &TraceEvent) -> SortResult<()> {
    let invalid = || SortError::InvalidIndices {
        sequence_number: event.sequence_number,
    };
    if event.indices.max().is_some_and(|max| max >= sequence.len()) {
        return Err(invalid());
    }

    match (event.kind, event.indices) {
        (EventKind::Swap, Indices::Pair(a, b)) => sequence.swap(a, b),
        (EventKind::Shift, Indices::One(into)) if into > 0 => {
            sequence[into] = sequence[into - 1];
        }
        (EventKind::Set, Indices::One(index)) => {
            let value = event.snapshot.get(index).copied().ok_or_else(invalid)?;
            sequence[index] = value;
        }
        (EventKind::Compare, Indices::Pair(_, _))
        | (EventKind::HighlightOnly, Indices::One(_))
        | (EventKind::Complete, Indices::Whole) => {}
        _ => return Err(invalid()),
    }
    Ok(())
}

/// Replay the mutations of `events` against a copy of `initial`.
///
/// # Errors
///
/// Returns an error if any event fails [`apply`].
pub fn replay<'a, I>(initial: &[i64], events: I) -> SortResult<Vec<i64>>
where
    I: IntoIterator<Item = &'a TraceEvent>,
{
    let mut sequence = initial.to_vec();
    for event in events {
        apply(&mut sequence, event)?;
    }
    Ok(sequence)
}

/// Check a complete trace against its initial sequence.
///
/// Verifies, in order of the events:
/// 1. sequence numbers run 0, 1, 2, ... without gaps
/// 2. each event names exactly the positions its kind requires
/// 3. each `Set` writes back the value its insertion pass held
/// 4. each snapshot equals the replayed sequence at that point
/// 5. the trace ends with exactly one completion event
/// 6. the final sequence is a permutation of `initial`
///
/// Returns the final sequence on success.
///
/// # Errors
///
/// Returns the first violated property as a trace error.
pub fn verify(initial: &[i64], events: &[TraceEvent]) -> SortResult<Vec<i64>> {
    let _span = info_span!("trace.verify", len = initial.len(), events = events.len()).entered();

    let result = verify_inner(initial, events);
    if let Err(err) = &result {
        warn!(error = %err, "trace verification failed");
    }
    result
}

fn verify_inner(initial: &[i64], events: &[TraceEvent]) -> SortResult<Vec<i64>> {
    let mut sequence = initial.to_vec();
    let mut completions = 0usize;
    // Value lifted out by the first `Shift` of an insertion pass.
    let mut held: Option<i64> = None;

    for (expected, event) in (0u64..).zip(events) {
        if event.sequence_number != expected {
            return Err(SortError::TraceGap {
                expected,
                found: event.sequence_number,
            });
        }
        if event.indices.len() != event.kind.arity() {
            return Err(SortError::InvalidIndices {
                sequence_number: event.sequence_number,
            });
        }
        check_held_value(&sequence, event, &mut held)?;
        apply(&mut sequence, event)?;
        if event.snapshot != sequence {
            return Err(SortError::SnapshotMismatch {
                sequence_number: event.sequence_number,
            });
        }
        if event.is_complete() {
            completions += 1;
        }
    }

    match events.last() {
        Some(last) if last.is_complete() && completions == 1 => {}
        _ => return Err(SortError::MissingCompletion),
    }

    let mut before = initial.to_vec();
    let mut after = sequence.clone();
    before.sort_unstable();
    after.sort_unstable();
    if before != after {
        return Err(SortError::ValuesChanged);
    }
    Ok(sequence)
}

/// A `Set` must write back the value its pass held: the value overwritten
/// by the pass's first `Shift`, or the value already in place when nothing
/// shifted.
fn check_held_value(
    sequence: &[i64],
    event: &TraceEvent,
    held: &mut Option<i64>,
) -> SortResult<()> {
    match (event.kind, event.indices) {
        (EventKind::Shift, Indices::One(into)) if held.is_none() => {
            *held = sequence.get(into).copied();
        }
        (EventKind::Set, Indices::One(index)) => {
            let expected = held.take().or_else(|| sequence.get(index).copied());
            if event.snapshot.get(index).copied() != expected {
                return Err(SortError::HeldValueMismatch {
                    sequence_number: event.sequence_number,
                });
            }
        }
        _ => {}
    }
    Ok(())
}

/// Content digest of a trace.
///
/// Two runs with the same input and algorithm must produce the same digest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TraceDigest {
    /// Blake3 hash of the encoded events.
    pub hash: [u8; 32],
    /// Number of events hashed.
    pub events: u64,
}

impl TraceDigest {
    /// Hash every event of a trace in order.
    ///
    /// # Errors
    ///
    /// Returns error if an event cannot be encoded.
    pub fn compute<'a, I>(events: I) -> SortResult<Self>
    where
        I: IntoIterator<Item = &'a TraceEvent>,
    {
        let mut builder = DigestBuilder::new();
        for event in events {
            builder.push(event)?;
        }
        Ok(builder.finish())
    }

    /// Hex rendering of the hash.
    #[must_use]
    pub fn to_hex(&self) -> String {
        self.hash.iter().map(|b| format!("{b:02x}")).collect()
    }
}

/// Incremental digest for consumers that see events one at a time.
#[derive(Debug, Clone, Default)]
pub struct DigestBuilder {
    hasher: blake3::Hasher,
    events: u64,
}

impl DigestBuilder {
    /// Start an empty digest.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the next event.
    ///
    /// # Errors
    ///
    /// Returns error if the event cannot be encoded.
    pub fn push(&mut self, event: &TraceEvent) -> SortResult<()> {
        let bytes = bincode::serialize(event).map_err(|e| SortError::serialization(e.to_string()))?;
        self.hasher.update(&bytes);
        self.events += 1;
        Ok(())
    }

    /// Finish the digest.
    #[must_use]
    pub fn finish(&self) -> TraceDigest {
        TraceDigest {
            hash: *self.hasher.finalize().as_bytes(),
            events: self.events,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::Algorithm;
    use crate::engine::{run, run_with, RunOptions};

    fn trace(initial: &[i64], algorithm: Algorithm) -> Vec<TraceEvent> {
        run(initial.to_vec(), algorithm).collect()
    }

    #[test]
    fn test_replay_reproduces_final_sequence() {
        let initial = [9, 4, -1, 4, 7, 0];
        for algorithm in Algorithm::ALL {
            let events = trace(&initial, algorithm);
            let replayed = replay(&initial, &events).expect("replay");
            assert_eq!(replayed, vec![-1, 0, 4, 4, 7, 9], "{algorithm}");
        }
    }

    #[test]
    fn test_verify_accepts_engine_traces() {
        let initial = [3, 3, 1, 8, -5];
        let options = RunOptions {
            emit_compares: true,
            bubble_early_exit: false,
        };
        for algorithm in Algorithm::ALL {
            let events: Vec<_> = run_with(initial.to_vec(), algorithm, options).collect();
            let sorted = verify(&initial, &events).expect("valid trace");
            assert_eq!(sorted, vec![-5, 1, 3, 3, 8]);
        }
    }

    #[test]
    fn test_verify_detects_gap() {
        let initial = [5, 3, 8, 1];
        let mut events = trace(&initial, Algorithm::Bubble);
        events.remove(1);
        let err = verify(&initial, &events).expect_err("gap");
        assert!(matches!(err, SortError::TraceGap { expected: 1, found: 2 }));
    }

    #[test]
    fn test_verify_detects_snapshot_tampering() {
        let initial = [2, 1];
        let mut events = trace(&initial, Algorithm::Insertion);
        events[0].snapshot = vec![1, 1];
        let err = verify(&initial, &events).expect_err("tampered");
        assert!(matches!(err, SortError::SnapshotMismatch { sequence_number: 0 }));
    }

    #[test]
    fn test_verify_detects_invented_set_value() {
        let initial = [2, 1];
        let mut events = trace(&initial, Algorithm::Insertion);
        events[1].snapshot = vec![7, 2];
        events[2].snapshot = vec![7, 2];
        let err = verify(&initial, &events).expect_err("forged set");
        assert!(matches!(err, SortError::HeldValueMismatch { sequence_number: 1 }));
    }

    #[test]
    fn test_verify_detects_in_place_set_forgery() {
        let initial = [1, 2];
        let mut events = trace(&initial, Algorithm::Insertion);
        assert_eq!(events[0].kind, EventKind::Set);
        events[0].snapshot = vec![1, 9];
        events[1].snapshot = vec![1, 9];
        let err = verify(&initial, &events).expect_err("forged set");
        assert!(matches!(err, SortError::HeldValueMismatch { sequence_number: 0 }));
    }

    #[test]
    fn test_verify_detects_changed_values() {
        let initial = [2, 1];
        let events = vec![TraceEvent::new(0, EventKind::Complete, Indices::Whole, &[2, 1])];
        assert!(verify(&initial, &events).is_ok());

        let lossy = [
            TraceEvent::new(0, EventKind::Shift, Indices::One(1), &[2, 2]),
            TraceEvent::new(1, EventKind::Complete, Indices::Whole, &[2, 2]),
        ];
        let err = verify(&initial, &lossy).expect_err("value lost");
        assert!(matches!(err, SortError::ValuesChanged));
    }

    #[test]
    fn test_verify_detects_missing_completion() {
        let initial = [2, 1];
        let mut events = trace(&initial, Algorithm::Selection);
        events.pop();
        let err = verify(&initial, &events).expect_err("truncated");
        assert!(matches!(err, SortError::MissingCompletion));
        assert!(matches!(
            verify(&initial, &[]),
            Err(SortError::MissingCompletion)
        ));
    }

    #[test]
    fn test_apply_rejects_out_of_range() {
        let event = TraceEvent::new(0, EventKind::Swap, Indices::Pair(0, 5), &[1, 2]);
        let mut sequence = vec![1, 2];
        let err = apply(&mut sequence, &event).expect_err("out of range");
        assert!(matches!(err, SortError::InvalidIndices { sequence_number: 0 }));
    }

    #[test]
    fn test_apply_rejects_shift_at_zero() {
        let event = TraceEvent::new(0, EventKind::Shift, Indices::One(0), &[1, 2]);
        assert!(apply(&mut [1, 2], &event).is_err());
    }

    #[test]
    fn test_digest_deterministic() {
        let initial = [4, 10, 3, 5, 1];
        let a = TraceDigest::compute(&trace(&initial, Algorithm::Heap)).expect("digest");
        let b = TraceDigest::compute(&trace(&initial, Algorithm::Heap)).expect("digest");
        assert_eq!(a, b);
        assert_eq!(a.to_hex().len(), 64);
    }

    #[test]
    fn test_digest_differs_between_algorithms() {
        let initial = [4, 10, 3, 5, 1];
        let heap = TraceDigest::compute(&trace(&initial, Algorithm::Heap)).expect("digest");
        let bubble = TraceDigest::compute(&trace(&initial, Algorithm::Bubble)).expect("digest");
        assert_ne!(heap, bubble);
    }

    #[test]
    fn test_incremental_digest_matches_batch() {
        let events = trace(&[3, 1, 2], Algorithm::Insertion);
        let mut builder = DigestBuilder::new();
        for event in &events {
            builder.push(event).expect("push");
        }
        let batch = TraceDigest::compute(&events).expect("digest");
        assert_eq!(builder.finish(), batch);
        assert_eq!(batch.events, events.len() as u64);
    }
}
