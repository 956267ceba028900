//! Unified demo engine trait.
//!
//! Every interactive demo implements [`DemoEngine`], which guarantees:
//! - YAML-first configuration
//! - Deterministic replay (same config, same state sequence)
//! - Renderer independence (any front end sees identical states)
//! - Self-checking through falsification criteria and metamorphic relations

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::fmt::Debug;

use crate::error::SortResult;

/// Severity levels for falsification criteria.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Must pass - the run is invalid if this fails.
    Critical,
    /// Should pass - indicates a problem but the run continues.
    #[default]
    Major,
    /// Informational only.
    Minor,
}

/// A single falsification criterion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FalsificationCriterion {
    /// Unique criterion ID (e.g., "SORT-ORDER-001").
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Condition that must hold.
    pub condition: String,
    /// Severity level.
    #[serde(default)]
    pub severity: Severity,
}

/// Result of evaluating a falsification criterion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriterionResult {
    /// Criterion ID.
    pub id: String,
    /// Whether the criterion passed.
    pub passed: bool,
    /// Human-readable message.
    pub message: String,
    /// Severity of this criterion.
    pub severity: Severity,
}

/// A metamorphic relation: a transformed input whose output must relate to
/// the source output in a known way.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetamorphicRelation {
    /// Unique relation ID (e.g., "MR-REVERSAL").
    pub id: String,
    /// Human-readable description.
    pub description: String,
    /// Transform applied to the source input.
    pub source_transform: String,
    /// Expected relation between source and follow-up outputs.
    pub expected_relation: String,
}

/// Result of verifying a metamorphic relation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MrResult {
    /// Relation ID.
    pub id: String,
    /// Whether the relation held.
    pub passed: bool,
    /// Detailed message.
    pub message: String,
}

/// Demo metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DemoMeta {
    /// Unique identifier (e.g., "SORT-HEAP").
    pub id: String,
    /// Semantic version.
    pub version: String,
    /// Demo type (e.g., "sort").
    pub demo_type: String,
    /// Human-readable description.
    #[serde(default)]
    pub description: String,
}

/// Mandatory trait for all demos.
pub trait DemoEngine: Sized + Clone {
    /// Configuration type loaded from YAML.
    type Config: DeserializeOwned + Debug;

    /// State snapshot for replay and parity checks.
    type State: Clone + Serialize + DeserializeOwned + PartialEq + Debug;

    /// Result of a single step.
    type StepResult: Debug;

    // === Lifecycle ===

    /// Create engine from YAML configuration string.
    ///
    /// # Errors
    ///
    /// Returns error if the YAML is invalid or fails validation.
    fn from_yaml(yaml: &str) -> SortResult<Self>;

    /// Create engine from config struct.
    fn from_config(config: Self::Config) -> Self;

    /// Get the current configuration.
    fn config(&self) -> &Self::Config;

    /// Reset to initial state.
    fn reset(&mut self);

    // === Execution ===

    /// Execute one step.
    fn step(&mut self) -> Self::StepResult;

    /// Execute N steps.
    fn run(&mut self, n: usize) -> Vec<Self::StepResult> {
        (0..n).map(|_| self.step()).collect()
    }

    /// Check if the demo has finished.
    fn is_complete(&self) -> bool;

    // === State Access ===

    /// Get current state snapshot.
    fn state(&self) -> Self::State;

    /// Get current step number.
    fn step_count(&self) -> u64;

    /// Get demo metadata.
    fn meta(&self) -> &DemoMeta;

    // === Self-checks ===

    /// Criteria this demo must satisfy.
    fn falsification_criteria(&self) -> Vec<FalsificationCriterion>;

    /// Evaluate all criteria against current state.
    fn evaluate_criteria(&self) -> Vec<CriterionResult>;

    /// Check if all critical criteria pass.
    fn is_verified(&self) -> bool {
        self.evaluate_criteria()
            .iter()
            .filter(|r| r.severity == Severity::Critical)
            .all(|r| r.passed)
    }

    /// Get metamorphic relations for this demo.
    fn metamorphic_relations(&self) -> Vec<MetamorphicRelation>;

    /// Verify a specific metamorphic relation.
    fn verify_mr(&self, mr: &MetamorphicRelation) -> MrResult;

    /// Verify all metamorphic relations.
    fn verify_all_mrs(&self) -> Vec<MrResult> {
        self.metamorphic_relations()
            .iter()
            .map(|mr| self.verify_mr(mr))
            .collect()
    }
}

/// Helper trait for demos that support deterministic replay.
///
/// Given identical configuration, two independent runs must produce
/// identical state sequences.
pub trait DeterministicReplay: DemoEngine {
    /// Verify that two engines are in the same state.
    fn verify_determinism(&self, other: &Self) -> bool {
        self.state() == other.state()
    }

    /// Get a checksum of the current state for quick comparison.
    fn state_checksum(&self) -> u64;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_default() {
        assert_eq!(Severity::default(), Severity::Major);
    }

    #[test]
    fn test_severity_serialization() {
        let json = serde_json::to_string(&Severity::Critical).expect("serialize");
        assert_eq!(json, "\"critical\"");

        let back: Severity = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, Severity::Critical);
    }

    #[test]
    fn test_criterion_deserialization_defaults() {
        let yaml = r#"
id: "SORT-ORDER-001"
name: "Ascending"
condition: "a[i] <= a[i+1]"
"#;
        let criterion: FalsificationCriterion = serde_yaml::from_str(yaml).expect("deserialize");
        assert_eq!(criterion.id, "SORT-ORDER-001");
        assert_eq!(criterion.severity, Severity::Major);
    }

    #[test]
    fn test_demo_meta_defaults() {
        let yaml = r#"
id: "SORT-HEAP"
version: "0.1.0"
demo_type: "sort"
"#;
        let meta: DemoMeta = serde_yaml::from_str(yaml).expect("deserialize");
        assert_eq!(meta.demo_type, "sort");
        assert!(meta.description.is_empty());
    }

    #[test]
    fn test_mr_result_serialization() {
        let result = MrResult {
            id: "MR-REVERSAL".to_string(),
            passed: true,
            message: "same output".to_string(),
        };
        let json = serde_json::to_string(&result).expect("serialize");
        assert!(json.contains("MR-REVERSAL"));
        assert!(json.contains("true"));
    }
}
