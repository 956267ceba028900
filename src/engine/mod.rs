//! Sorting step-trace engine.
//!
//! Turns a sort over a private working sequence into an ordered stream of
//! [`TraceEvent`]s:
//! - Lazy: sorting advances only as events are pulled
//! - Deterministic: same input and algorithm, same events
//! - Renderer-free: no drawing, no sleeping, no shared state
//!
//! ```text
//! initial ──► Run (Tracer + Stepper) ──► TraceEvent ──► renderer (any pace)
//! ```

pub mod event;
pub(crate) mod tracer;
mod run;

pub use event::{EventKind, Indices, TraceEvent};
pub use run::{Run, RunOptions};

use crate::algorithms::Algorithm;

/// Trace `algorithm` over `initial` with the minimal event set.
///
/// Never fails: empty and single-element inputs yield exactly one
/// completion event.
///
/// # Example
///
/// ```rust
/// use sortrace::prelude::*;
///
/// let last = run(vec![5, 3, 8, 1], Algorithm::Bubble)
///     .last()
///     .map(|e| e.snapshot);
/// assert_eq!(last, Some(vec![1, 3, 5, 8]));
/// ```
#[must_use]
pub fn run(initial: Vec<i64>, algorithm: Algorithm) -> Run {
    Run::new(initial, algorithm, RunOptions::default())
}

/// Trace `algorithm` over `initial` with explicit [`RunOptions`].
#[must_use]
pub fn run_with(initial: Vec<i64>, algorithm: Algorithm, options: RunOptions) -> Run {
    Run::new(initial, algorithm, options)
}
