//! `SortEngine`: `DemoEngine` implementation for sort traces.
//!
//! # Architecture
//!
//! ```text
//! YAML Config → SortEngine → DemoEngine trait
//!                   ↓
//!             Run (one event per step)
//!                   ↓
//!             SortState (serializable, PartialEq)
//!                   ↓
//!             any renderer (identical states)
//! ```
//!
//! The engine is the stateful cursor a front end holds between frames:
//! submit new data, pick an algorithm, step, re-run, clear.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::engine::{
    CriterionResult, DemoEngine, DemoMeta, DeterministicReplay, FalsificationCriterion,
    MetamorphicRelation, MrResult, Severity,
};
use crate::algorithms::Algorithm;
use crate::config::TraceConfig;
use crate::engine::{run_with, Run, TraceEvent};
use crate::error::SortResult;
use crate::input::parse_sequence;
use crate::replay::{DigestBuilder, TraceDigest};

/// Sort demo state snapshot.
///
/// This is the state compared for renderer parity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortState {
    /// Algorithm being traced.
    pub algorithm: Algorithm,
    /// Sequence the run started from.
    pub initial: Vec<i64>,
    /// Working sequence as of the last delivered event.
    pub working: Vec<i64>,
    /// Most recently delivered event.
    pub last_event: Option<TraceEvent>,
    /// Events delivered so far.
    pub step_count: u64,
    /// Whether the completion event has been delivered.
    pub is_complete: bool,
}

impl SortState {
    /// Compute hash for quick comparison.
    #[must_use]
    pub fn compute_hash(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.algorithm.hash(&mut hasher);
        self.initial.hash(&mut hasher);
        self.working.hash(&mut hasher);
        self.step_count.hash(&mut hasher);
        self.is_complete.hash(&mut hasher);
        hasher.finish()
    }
}

/// Stateful sort demo implementing [`DemoEngine`].
#[derive(Debug, Clone)]
pub struct SortEngine {
    config: TraceConfig,
    run: Run,
    last_event: Option<TraceEvent>,
    step_count: u64,
    /// Sequence numbers seen so far were 0, 1, 2, ...
    gap_free: bool,
    digest: DigestBuilder,
    demo_meta: DemoMeta,
}

impl SortEngine {
    fn make_meta(config: &TraceConfig) -> DemoMeta {
        DemoMeta {
            id: format!("SORT-{}", config.algorithm.id().to_ascii_uppercase()),
            version: crate::VERSION.to_string(),
            demo_type: "sort".to_string(),
            description: if config.title.is_empty() {
                config.algorithm.display_name().to_string()
            } else {
                config.title.clone()
            },
        }
    }

    /// Replace the data with parsed user input and restart.
    ///
    /// On error the engine is left untouched.
    ///
    /// # Errors
    ///
    /// Returns the parse error for empty or non-numeric input.
    pub fn submit(&mut self, text: &str) -> SortResult<()> {
        let data = parse_sequence(text)?;
        self.load(data);
        Ok(())
    }

    /// Replace the data and restart.
    pub fn load(&mut self, data: Vec<i64>) {
        self.config.data = data;
        self.reset();
    }

    /// Drop the data; the next run completes immediately.
    pub fn clear(&mut self) {
        self.load(Vec::new());
    }

    /// Switch algorithm and restart on the same data.
    pub fn set_algorithm(&mut self, algorithm: Algorithm) {
        self.config.algorithm = algorithm;
        self.demo_meta = Self::make_meta(&self.config);
        self.reset();
    }

    /// Digest of the events delivered so far.
    #[must_use]
    pub fn digest(&self) -> TraceDigest {
        self.digest.finish()
    }

    /// Most recently delivered event.
    #[must_use]
    pub fn last_event(&self) -> Option<&TraceEvent> {
        self.last_event.as_ref()
    }

    fn final_sequence(&self) -> Option<&[i64]> {
        self.last_event
            .as_ref()
            .filter(|e| e.is_complete())
            .map(|e| e.snapshot.as_slice())
    }

    /// Sort `data` from scratch with `algorithm`.
    fn sorted_with(&self, algorithm: Algorithm, data: Vec<i64>) -> Vec<i64> {
        run_with(data, algorithm, self.config.options).finish()
    }
}

fn is_non_decreasing(values: &[i64]) -> bool {
    values.windows(2).all(|w| w[0] <= w[1])
}

fn same_multiset(a: &[i64], b: &[i64]) -> bool {
    let mut a = a.to_vec();
    let mut b = b.to_vec();
    a.sort_unstable();
    b.sort_unstable();
    a == b
}

impl DemoEngine for SortEngine {
    type Config = TraceConfig;
    type State = SortState;
    type StepResult = Option<TraceEvent>;

    fn from_yaml(yaml: &str) -> SortResult<Self> {
        let config = TraceConfig::from_yaml(yaml)?;
        Ok(Self::from_config(config))
    }

    fn from_config(config: Self::Config) -> Self {
        let run = run_with(config.data.clone(), config.algorithm, config.options);
        let demo_meta = Self::make_meta(&config);
        Self {
            config,
            run,
            last_event: None,
            step_count: 0,
            gap_free: true,
            digest: DigestBuilder::new(),
            demo_meta,
        }
    }

    fn config(&self) -> &Self::Config {
        &self.config
    }

    fn reset(&mut self) {
        debug!(
            algorithm = self.config.algorithm.id(),
            len = self.config.data.len(),
            "sort demo reset"
        );
        self.run = run_with(
            self.config.data.clone(),
            self.config.algorithm,
            self.config.options,
        );
        self.last_event = None;
        self.step_count = 0;
        self.gap_free = true;
        self.digest = DigestBuilder::new();
    }

    fn step(&mut self) -> Self::StepResult {
        let event = self.run.next()?;
        if event.sequence_number != self.step_count {
            self.gap_free = false;
        }
        if let Err(err) = self.digest.push(&event) {
            warn!(
                seq = event.sequence_number,
                error = %err,
                "event left out of trace digest"
            );
        }
        self.step_count += 1;
        self.last_event = Some(event.clone());
        Some(event)
    }

    fn is_complete(&self) -> bool {
        self.final_sequence().is_some()
    }

    fn state(&self) -> Self::State {
        SortState {
            algorithm: self.config.algorithm,
            initial: self.config.data.clone(),
            working: self
                .last_event
                .as_ref()
                .map_or_else(|| self.config.data.clone(), |e| e.snapshot.clone()),
            last_event: self.last_event.clone(),
            step_count: self.step_count,
            is_complete: self.is_complete(),
        }
    }

    fn step_count(&self) -> u64 {
        self.step_count
    }

    fn meta(&self) -> &DemoMeta {
        &self.demo_meta
    }

    fn falsification_criteria(&self) -> Vec<FalsificationCriterion> {
        vec![
            FalsificationCriterion {
                id: "SORT-ORDER-001".to_string(),
                name: "Ascending result".to_string(),
                condition: "final sequence is non-decreasing".to_string(),
                severity: Severity::Critical,
            },
            FalsificationCriterion {
                id: "SORT-PERM-001".to_string(),
                name: "Values preserved".to_string(),
                condition: "final multiset equals initial multiset".to_string(),
                severity: Severity::Critical,
            },
            FalsificationCriterion {
                id: "SORT-SEQ-001".to_string(),
                name: "Gap-free numbering".to_string(),
                condition: "sequence numbers run 0, 1, 2, ...".to_string(),
                severity: Severity::Major,
            },
        ]
    }

    fn evaluate_criteria(&self) -> Vec<CriterionResult> {
        let (ordered, preserved) = self.final_sequence().map_or((None, None), |done| {
            (
                Some(is_non_decreasing(done)),
                Some(same_multiset(done, &self.config.data)),
            )
        });
        let complete = self.is_complete();
        let pending = "run in progress".to_string();

        vec![
            CriterionResult {
                id: "SORT-ORDER-001".to_string(),
                passed: ordered == Some(true),
                message: match ordered {
                    Some(true) => "sequence is ascending".to_string(),
                    Some(false) => "sequence is out of order".to_string(),
                    None => pending.clone(),
                },
                severity: Severity::Critical,
            },
            CriterionResult {
                id: "SORT-PERM-001".to_string(),
                passed: preserved == Some(true),
                message: match preserved {
                    Some(true) => format!("{} values preserved", self.config.data.len()),
                    Some(false) => "values were created or lost".to_string(),
                    None => pending.clone(),
                },
                severity: Severity::Critical,
            },
            CriterionResult {
                id: "SORT-SEQ-001".to_string(),
                passed: complete && self.gap_free,
                message: match (complete, self.gap_free) {
                    (true, true) => format!("{} events numbered", self.step_count),
                    (_, false) => "sequence numbers skipped".to_string(),
                    (false, true) => pending.clone(),
                },
                severity: Severity::Major,
            },
        ]
    }

    fn metamorphic_relations(&self) -> Vec<MetamorphicRelation> {
        vec![
            MetamorphicRelation {
                id: "MR-REVERSAL".to_string(),
                description: "Reversing the input does not change the sorted output".to_string(),
                source_transform: "reverse_input".to_string(),
                expected_relation: "output_unchanged".to_string(),
            },
            MetamorphicRelation {
                id: "MR-AGREEMENT".to_string(),
                description: "Every algorithm sorts the input to the same output".to_string(),
                source_transform: "switch_algorithm".to_string(),
                expected_relation: "output_unchanged".to_string(),
            },
        ]
    }

    fn verify_mr(&self, mr: &MetamorphicRelation) -> MrResult {
        let data = self.config.data.clone();
        let source = self.sorted_with(self.config.algorithm, data.clone());

        match mr.id.as_str() {
            "MR-REVERSAL" => {
                let reversed: Vec<i64> = data.into_iter().rev().collect();
                let followup = self.sorted_with(self.config.algorithm, reversed);
                let passed = source == followup;
                MrResult {
                    id: mr.id.clone(),
                    passed,
                    message: if passed {
                        "reversed input sorts identically".to_string()
                    } else {
                        format!("source {source:?} != reversed {followup:?}")
                    },
                }
            }
            "MR-AGREEMENT" => {
                let disagreeing: Vec<Algorithm> = Algorithm::ALL
                    .into_iter()
                    .filter(|&a| self.sorted_with(a, data.clone()) != source)
                    .collect();
                MrResult {
                    id: mr.id.clone(),
                    passed: disagreeing.is_empty(),
                    message: if disagreeing.is_empty() {
                        "all algorithms agree".to_string()
                    } else {
                        format!("disagreeing algorithms: {disagreeing:?}")
                    },
                }
            }
            _ => MrResult {
                id: mr.id.clone(),
                passed: false,
                message: format!("Unknown metamorphic relation: {}", mr.id),
            },
        }
    }
}

impl DeterministicReplay for SortEngine {
    fn state_checksum(&self) -> u64 {
        self.state().compute_hash()
    }
}
