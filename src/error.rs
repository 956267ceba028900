//! Error types for sortrace.
//!
//! The trace engine itself never fails: input reaching [`crate::engine::run`]
//! is already a validated sequence of integers. Errors live at the edges,
//! in input parsing, configuration loading, and trace verification.

use thiserror::Error;

/// Result type alias for sortrace operations.
pub type SortResult<T> = Result<T, SortError>;

/// Unified error type for all sortrace operations.
#[derive(Debug, Error)]
pub enum SortError {
    // ===== Input Errors =====
    /// The submitted text held no integers at all.
    #[error("Invalid input: no numbers were entered")]
    EmptyInput,

    /// A token could not be parsed as a signed integer.
    #[error("Invalid input: '{token}' at position {position} is not an integer")]
    InvalidInput {
        /// The offending token, trimmed.
        token: String,
        /// Zero-based token position in the submission.
        position: usize,
    },

    // ===== Configuration Errors =====
    /// Invalid configuration parameter.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration error.
        message: String,
    },

    /// YAML parsing error.
    #[error("YAML parsing error: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    /// Validation error.
    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    // ===== Trace Verification Errors =====
    /// Sequence numbers are not contiguous from zero.
    #[error("Trace gap: expected sequence number {expected}, found {found}")]
    TraceGap {
        /// Sequence number the verifier expected next.
        expected: u64,
        /// Sequence number actually observed.
        found: u64,
    },

    /// An event snapshot disagrees with the replayed sequence.
    #[error("Snapshot mismatch at sequence number {sequence_number}")]
    SnapshotMismatch {
        /// Event whose snapshot diverged.
        sequence_number: u64,
    },

    /// An event touches the wrong number of positions or an out-of-range one.
    #[error("Invalid indices at sequence number {sequence_number}")]
    InvalidIndices {
        /// Event carrying the bad index set.
        sequence_number: u64,
    },

    /// A `Set` writes something other than the value held by its pass.
    #[error("Set at sequence number {sequence_number} does not write the held value")]
    HeldValueMismatch {
        /// Event writing the unexpected value.
        sequence_number: u64,
    },

    /// The final sequence is not a permutation of the initial one.
    #[error("Trace created or lost values")]
    ValuesChanged,

    /// The trace does not end with exactly one completion event.
    #[error("Trace does not end with a single completion event")]
    MissingCompletion,

    // ===== Encoding Errors =====
    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl SortError {
    /// Create a configuration error with a message.
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a serialization error.
    #[must_use]
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization(message.into())
    }

    /// Check if this error came from user-submitted input.
    ///
    /// Input errors are surfaced to the user as an "invalid input" notice and
    /// never reach the engine.
    #[must_use]
    pub const fn is_input_error(&self) -> bool {
        matches!(self, Self::EmptyInput | Self::InvalidInput { .. })
    }

    /// Check if this error reports a broken trace contract.
    #[must_use]
    pub const fn is_trace_violation(&self) -> bool {
        matches!(
            self,
            Self::TraceGap { .. }
                | Self::SnapshotMismatch { .. }
                | Self::InvalidIndices { .. }
                | Self::HeldValueMismatch { .. }
                | Self::ValuesChanged
                | Self::MissingCompletion
        )
    }
}
