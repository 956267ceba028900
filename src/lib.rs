//! # sortrace
//!
//! Deterministic step-trace engine for classic sorting algorithms.
//!
//! Sorts a sequence of integers with insertion, bubble, selection or heap
//! sort and exposes every step as an ordered, self-contained event:
//! - Lazy: the sort advances only as events are pulled
//! - Renderer-independent: each event carries a full snapshot
//! - Verifiable: traces replay, verify and digest deterministically
//!
//! ## Example
//!
//! ```rust
//! use sortrace::prelude::*;
//!
//! let events: Vec<TraceEvent> = run(vec![2, 1], Algorithm::Insertion).collect();
//! assert_eq!(events[0].kind, EventKind::Shift);
//! assert_eq!(events[0].snapshot, vec![2, 2]);
//! assert!(events.last().is_some_and(TraceEvent::is_complete));
//!
//! let sorted = verify(&[2, 1], &events).expect("engine traces verify");
//! assert_eq!(sorted, vec![1, 2]);
//! ```

#![forbid(unsafe_code)]
#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![warn(clippy::pedantic, clippy::nursery)]
#![allow(
    clippy::module_name_repetitions,
    clippy::similar_names,
    clippy::cast_possible_truncation,
    clippy::must_use_candidate,
    clippy::too_many_lines,
    clippy::missing_const_for_fn,  // Many functions can't be const in stable Rust
    clippy::needless_range_loop,   // Index loops mirror the textbook algorithms
)]

pub mod algorithms;
pub mod config;
pub mod demos;
pub mod engine;
pub mod error;
pub mod input;
pub mod renderers;
pub mod replay;

/// Crate version, embedded by the build script.
pub const VERSION: &str = match option_env!("SORTRACE_VERSION") {
    Some(version) => version,
    None => env!("CARGO_PKG_VERSION"),
};

/// Git revision of the build, when built from a checkout.
pub const GIT_HASH: Option<&str> = option_env!("SORTRACE_GIT_HASH");

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::algorithms::Algorithm;
    pub use crate::config::{PacingConfig, TraceConfig, TraceConfigBuilder};
    pub use crate::demos::{DemoEngine, DeterministicReplay, SortEngine, SortState};
    pub use crate::engine::{run, run_with, EventKind, Indices, Run, RunOptions, TraceEvent};
    pub use crate::error::{SortError, SortResult};
    pub use crate::input::{format_sequence, parse_sequence};
    pub use crate::renderers::{play, Pacing, PlaybackSummary, Renderer, TextRenderer};
    pub use crate::replay::{replay, verify, TraceDigest};
}

/// Re-export for public API
pub use error::{SortError, SortResult};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_matches_manifest() {
        assert_eq!(VERSION, env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn test_git_hash_is_trimmed() {
        if let Some(hash) = GIT_HASH {
            assert_eq!(hash, hash.trim());
        }
    }
}
