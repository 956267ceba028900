//! Interactive sort demo.
//!
//! Wraps a trace [`Run`](crate::engine::Run) in the stateful, self-checking
//! [`DemoEngine`] contract a front end drives frame by frame:
//!
//! 1. **Configure** - YAML or builder, validated up front
//! 2. **Step** - one trace event per call
//! 3. **Check** - falsification criteria on the finished sequence
//! 4. **Relate** - metamorphic relations across inputs and algorithms

pub mod engine;
pub mod sort_engine;

pub use engine::{
    CriterionResult, DemoEngine, DemoMeta, DeterministicReplay, FalsificationCriterion,
    MetamorphicRelation, MrResult, Severity,
};
pub use sort_engine::{SortEngine, SortState};
