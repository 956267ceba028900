//! Renderer contract for trace consumers.
//!
//! The engine hands out events and forgets them; everything about how and
//! when they are shown lives here, on the consumer side.
//!
//! # Architecture
//!
//! ```text
//! Run (engine)
//!     ↓ TraceEvent
//! ┌─────────────────────┐
//! │  play(.., Pacing)   │──► wait(Duration)   (caller decides: sleep,
//! └─────────────────────┘                      timer, frame budget, no-op)
//!     ↓
//! Renderer::draw
//!     ↓           ↓
//! TextRenderer   GUI canvas / test harness
//! ```

pub mod text;

pub use text::{RenderFrame, TextRenderer};

use std::time::Duration;

use serde::Serialize;
use tracing::{debug, info_span};

use crate::config::PacingConfig;
use crate::engine::{EventKind, TraceEvent};

/// Anything that can show a trace event.
pub trait Renderer {
    /// Redraw for `event`: the full `snapshot` with `indices` highlighted.
    fn draw(&mut self, event: &TraceEvent);

    /// Called once after the completion event was drawn.
    fn finish(&mut self) {}
}

/// Renderer-side delay policy.
///
/// Maps each event to how long the renderer should hold the frame. The
/// defaults give the classic cadence: one second per swap or shift, a short
/// settle after an insertion `Set`, no hold for comparisons or completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pacing {
    mutation: Duration,
    settle: Duration,
}

impl Default for Pacing {
    fn default() -> Self {
        Self::from_config(&PacingConfig::default())
    }
}

impl Pacing {
    /// Build from configuration.
    #[must_use]
    pub const fn from_config(config: &PacingConfig) -> Self {
        Self {
            mutation: Duration::from_millis(config.mutation_delay_ms),
            settle: Duration::from_millis(config.settle_delay_ms),
        }
    }

    /// No delays at all, for tests and batch export.
    #[must_use]
    pub const fn instant() -> Self {
        Self {
            mutation: Duration::ZERO,
            settle: Duration::ZERO,
        }
    }

    /// Hold time after drawing `event`.
    #[must_use]
    pub fn delay_for(&self, event: &TraceEvent) -> Duration {
        match event.kind {
            EventKind::Swap | EventKind::Shift => self.mutation,
            EventKind::Set => self.settle,
            EventKind::Compare | EventKind::HighlightOnly | EventKind::Complete => Duration::ZERO,
        }
    }
}

/// What a playback did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PlaybackSummary {
    /// Events drawn.
    pub events: u64,
    /// Events that changed the sequence.
    pub mutations: u64,
    /// Sum of all requested waits.
    pub total_delay: Duration,
    /// Whether the completion event was reached.
    pub completed: bool,
}

/// Drive `renderer` through `events`, asking `wait` to hold each frame.
///
/// `wait` receives the pacing delay after each draw; pass
/// `std::thread::sleep` for a blocking animation or a no-op closure to
/// render as fast as possible. Stops after the completion event.
pub fn play<I, R, W>(events: I, renderer: &mut R, pacing: &Pacing, mut wait: W) -> PlaybackSummary
where
    I: IntoIterator<Item = TraceEvent>,
    R: Renderer + ?Sized,
    W: FnMut(Duration),
{
    let _span = info_span!("trace.play").entered();
    let mut summary = PlaybackSummary::default();

    for event in events {
        renderer.draw(&event);
        summary.events += 1;
        if event.is_mutation() {
            summary.mutations += 1;
        }

        let delay = pacing.delay_for(&event);
        if !delay.is_zero() {
            summary.total_delay += delay;
            wait(delay);
        }

        if event.is_complete() {
            summary.completed = true;
            renderer.finish();
            break;
        }
    }

    debug!(
        events = summary.events,
        mutations = summary.mutations,
        completed = summary.completed,
        "playback finished"
    );
    summary
}
