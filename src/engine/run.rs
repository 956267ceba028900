//! Lazy event stream for one sort execution.

use std::iter::FusedIterator;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::event::TraceEvent;
use super::tracer::Tracer;
use crate::algorithms::{Algorithm, AlgorithmState, Progress, Stepper};

/// Optional behaviors of a run.
///
/// The defaults produce the minimal event set: mutations plus the final
/// completion event, with bubble sort running every pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunOptions {
    /// Also emit `Compare` and `HighlightOnly` events.
    pub emit_compares: bool,
    /// Stop bubble sort after a pass without swaps.
    pub bubble_early_exit: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Sorting,
    Finished,
}

/// One execution of one algorithm over one initial sequence.
///
/// `Run` is an [`Iterator`] of [`TraceEvent`]s. Each call to `next` performs
/// only as much sorting as needed to produce the next event, and the last
/// event is always [`super::EventKind::Complete`]. After that the iterator
/// is exhausted for good; a run cannot be restarted.
///
/// All state is private to the run, so dropping it part-way is a clean
/// cancellation and independent runs may live on different threads.
#[derive(Debug, Clone)]
pub struct Run {
    algorithm: Algorithm,
    tracer: Tracer,
    /// `None` for inputs shorter than two elements.
    stepper: Option<AlgorithmState>,
    phase: Phase,
}

impl Run {
    pub(crate) fn new(initial: Vec<i64>, algorithm: Algorithm, options: RunOptions) -> Self {
        let len = initial.len();
        debug!(
            algorithm = algorithm.id(),
            len,
            emit_compares = options.emit_compares,
            "trace run started"
        );
        let stepper = (len >= 2).then(|| AlgorithmState::new(algorithm, len, &options));
        Self {
            algorithm,
            tracer: Tracer::new(initial, options.emit_compares),
            stepper,
            phase: Phase::Sorting,
        }
    }

    /// Algorithm this run executes.
    #[must_use]
    pub const fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Current working sequence.
    ///
    /// Reflects every event handed out so far, plus at most the events still
    /// queued from the last unit of work.
    #[must_use]
    pub fn working(&self) -> &[i64] {
        self.tracer.working()
    }

    /// Number of events produced so far.
    #[must_use]
    pub const fn produced(&self) -> u64 {
        self.tracer.produced()
    }

    /// True once the completion event has been produced.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.phase == Phase::Finished
    }

    /// Drain any remaining events and return the sorted sequence.
    #[must_use]
    pub fn finish(mut self) -> Vec<i64> {
        self.by_ref().for_each(drop);
        self.tracer.into_working()
    }

    fn produce(&mut self) {
        let done = self
            .stepper
            .as_mut()
            .map_or(true, |stepper| stepper.advance(&mut self.tracer) == Progress::Done);
        if done {
            self.tracer.complete();
            self.phase = Phase::Finished;
            debug!(
                algorithm = self.algorithm.id(),
                events = self.tracer.produced(),
                "trace run complete"
            );
        }
    }
}

impl Iterator for Run {
    type Item = TraceEvent;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(event) = self.tracer.pop() {
                trace!(
                    seq = event.sequence_number,
                    kind = ?event.kind,
                    indices = ?event.indices,
                    "trace event"
                );
                return Some(event);
            }
            if self.phase == Phase::Finished {
                return None;
            }
            self.produce();
        }
    }
}

impl FusedIterator for Run {}
