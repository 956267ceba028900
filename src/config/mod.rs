//! Configuration for a traced sort, with YAML schema and validation.
//!
//! Mistake-proofing happens in three layers:
//! - Type-safe configuration structs (unknown fields rejected)
//! - Declarative field validation via `validator`
//! - Semantic validation of cross-field limits
//!
//! ```yaml
//! schema_version: "1.0"
//! algorithm: heap
//! data: [4, 10, 3, 5, 1]
//! options:
//!   emit_compares: false
//!   bubble_early_exit: false
//! pacing:
//!   mutation_delay_ms: 1000
//!   settle_delay_ms: 50
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use validator::Validate;

use crate::algorithms::Algorithm;
use crate::engine::RunOptions;
use crate::error::{SortError, SortResult};

/// Largest sequence a configuration may carry.
pub const MAX_SEQUENCE_LEN: usize = 4_096;

/// Top-level configuration of one traced sort.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct TraceConfig {
    /// Schema version for forward compatibility.
    #[validate(length(min = 1))]
    #[serde(default = "default_schema_version")]
    pub schema_version: String,

    /// Optional title shown by renderers.
    #[serde(default)]
    pub title: String,

    /// Algorithm to trace.
    #[serde(default)]
    pub algorithm: Algorithm,

    /// Initial sequence. May be empty and supplied later.
    #[serde(default)]
    pub data: Vec<i64>,

    /// Engine options.
    #[serde(default)]
    pub options: RunOptions,

    /// Renderer pacing hints.
    #[validate(nested)]
    #[serde(default)]
    pub pacing: PacingConfig,
}

fn default_schema_version() -> String {
    "1.0".to_string()
}

impl Default for TraceConfig {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            title: String::new(),
            algorithm: Algorithm::default(),
            data: Vec::new(),
            options: RunOptions::default(),
            pacing: PacingConfig::default(),
        }
    }
}

impl TraceConfig {
    /// Load configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - File cannot be read
    /// - YAML parsing fails
    /// - Validation fails
    pub fn load<P: AsRef<Path>>(path: P) -> SortResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| SortError::config(format!("cannot read configuration: {e}")))?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from YAML string.
    ///
    /// # Errors
    ///
    /// Returns error if parsing or validation fails.
    pub fn from_yaml(yaml: &str) -> SortResult<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        config.validate_semantic()?;
        Ok(config)
    }

    /// Serialize configuration back to YAML.
    ///
    /// # Errors
    ///
    /// Returns error if serialization fails.
    pub fn to_yaml(&self) -> SortResult<String> {
        serde_yaml::to_string(self).map_err(|e| SortError::serialization(e.to_string()))
    }

    /// Create a builder for configuration.
    #[must_use]
    pub fn builder() -> TraceConfigBuilder {
        TraceConfigBuilder::default()
    }

    /// Validate semantic constraints beyond schema.
    fn validate_semantic(&self) -> SortResult<()> {
        if self.data.len() > MAX_SEQUENCE_LEN {
            return Err(SortError::config(format!(
                "sequence of {} elements exceeds the limit of {MAX_SEQUENCE_LEN}",
                self.data.len()
            )));
        }
        if self.pacing.settle_delay_ms > self.pacing.mutation_delay_ms {
            return Err(SortError::config(
                "settle delay must not exceed mutation delay",
            ));
        }
        Ok(())
    }
}

/// Configuration builder for programmatic construction.
#[derive(Debug, Default)]
pub struct TraceConfigBuilder {
    title: Option<String>,
    algorithm: Option<Algorithm>,
    data: Option<Vec<i64>>,
    options: Option<RunOptions>,
    pacing: Option<PacingConfig>,
}

impl TraceConfigBuilder {
    /// Set the renderer title.
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the algorithm.
    #[must_use]
    pub const fn algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = Some(algorithm);
        self
    }

    /// Set the initial sequence.
    #[must_use]
    pub fn data(mut self, data: Vec<i64>) -> Self {
        self.data = Some(data);
        self
    }

    /// Set engine options.
    #[must_use]
    pub const fn options(mut self, options: RunOptions) -> Self {
        self.options = Some(options);
        self
    }

    /// Set pacing hints.
    #[must_use]
    pub const fn pacing(mut self, pacing: PacingConfig) -> Self {
        self.pacing = Some(pacing);
        self
    }

    /// Build the configuration.
    #[must_use]
    pub fn build(self) -> TraceConfig {
        let mut config = TraceConfig::default();

        if let Some(title) = self.title {
            config.title = title;
        }
        if let Some(algorithm) = self.algorithm {
            config.algorithm = algorithm;
        }
        if let Some(data) = self.data {
            config.data = data;
        }
        if let Some(options) = self.options {
            config.options = options;
        }
        if let Some(pacing) = self.pacing {
            config.pacing = pacing;
        }

        config
    }
}

/// Delays a renderer should wait after drawing an event.
///
/// The engine never reads these; they travel with the configuration so a
/// renderer can reproduce the classic animation cadence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct PacingConfig {
    /// Delay after a swap or shift, in milliseconds.
    #[validate(range(max = 60_000))]
    #[serde(default = "default_mutation_delay_ms")]
    pub mutation_delay_ms: u64,

    /// Delay after an insertion `Set`, in milliseconds.
    #[validate(range(max = 60_000))]
    #[serde(default = "default_settle_delay_ms")]
    pub settle_delay_ms: u64,
}

const fn default_mutation_delay_ms() -> u64 {
    1_000
}

const fn default_settle_delay_ms() -> u64 {
    50
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            mutation_delay_ms: default_mutation_delay_ms(),
            settle_delay_ms: default_settle_delay_ms(),
        }
    }
}
