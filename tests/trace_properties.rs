//! Property tests over whole traces: replay, verification, demo criteria.

use proptest::prelude::*;
use sortrace::prelude::*;

fn sequences() -> impl Strategy<Value = Vec<i64>> {
    prop::collection::vec(any::<i64>(), 0..48)
}

fn algorithms() -> impl Strategy<Value = Algorithm> {
    prop::sample::select(Algorithm::ALL.to_vec())
}

proptest! {
    /// Falsification test: replaying the mutations yields a sorted permutation.
    #[test]
    fn prop_replay_sorted_permutation(data in sequences(), algorithm in algorithms()) {
        let events: Vec<TraceEvent> = run(data.clone(), algorithm).collect();
        let replayed = replay(&data, &events).unwrap();

        let mut expected = data;
        expected.sort_unstable();
        prop_assert_eq!(replayed, expected);
    }

    /// Falsification test: every engine trace passes verification.
    #[test]
    fn prop_engine_traces_verify(
        data in sequences(),
        algorithm in algorithms(),
        emit_compares in any::<bool>(),
        bubble_early_exit in any::<bool>(),
    ) {
        let options = RunOptions { emit_compares, bubble_early_exit };
        let events: Vec<TraceEvent> = run_with(data.clone(), algorithm, options).collect();
        prop_assert!(verify(&data, &events).is_ok());
    }

    /// Falsification test: completed demos satisfy every criterion and relation.
    #[test]
    fn prop_demo_verified_at_completion(data in prop::collection::vec(-20i64..20, 0..24), algorithm in algorithms()) {
        let config = TraceConfig::builder().algorithm(algorithm).data(data).build();
        let mut engine = SortEngine::from_config(config);
        while engine.step().is_some() {}

        prop_assert!(engine.is_complete());
        prop_assert!(engine.evaluate_criteria().iter().all(|r| r.passed));
        prop_assert!(engine.verify_all_mrs().iter().all(|r| r.passed));
    }
}
