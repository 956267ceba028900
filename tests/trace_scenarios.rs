//! End-to-end trace scenarios for each algorithm.

use sortrace::prelude::*;

fn mutations(initial: &[i64], algorithm: Algorithm) -> Vec<TraceEvent> {
    run(initial.to_vec(), algorithm)
        .filter(TraceEvent::is_mutation)
        .collect()
}

#[test]
fn degenerate_inputs_emit_only_completion() {
    for initial in [vec![], vec![42]] {
        for algorithm in Algorithm::ALL {
            let events: Vec<TraceEvent> = run(initial.clone(), algorithm).collect();
            assert_eq!(events.len(), 1, "{algorithm} on {initial:?}");
            assert_eq!(events[0].kind, EventKind::Complete);
            assert_eq!(events[0].indices, Indices::Whole);
            assert_eq!(events[0].sequence_number, 0);
            assert_eq!(events[0].snapshot, initial);
        }
    }
}

#[test]
fn bubble_first_swap_and_result() {
    let events = mutations(&[5, 3, 8, 1], Algorithm::Bubble);
    assert_eq!(events[0].kind, EventKind::Swap);
    assert_eq!(events[0].indices, Indices::Pair(0, 1));
    assert_eq!(events[0].snapshot, vec![3, 5, 8, 1]);
    assert_eq!(events.last().unwrap().snapshot, vec![1, 3, 5, 8]);
}

#[test]
fn insertion_shift_then_set() {
    let events: Vec<TraceEvent> = run(vec![2, 1], Algorithm::Insertion).collect();
    assert_eq!(events.len(), 3);
    assert_eq!(events[0].kind, EventKind::Shift);
    assert_eq!(events[0].snapshot, vec![2, 2]);
    assert_eq!(events[1].kind, EventKind::Set);
    assert_eq!(events[1].indices, Indices::One(0));
    assert_eq!(events[1].snapshot, vec![1, 2]);
    assert!(events[2].is_complete());
}

#[test]
fn heap_builds_max_heap_then_extracts_root() {
    let events = mutations(&[4, 10, 3, 5, 1], Algorithm::Heap);
    let extraction = events
        .iter()
        .position(|e| e.indices == Indices::Pair(4, 0))
        .unwrap();
    assert_eq!(events[extraction - 1].snapshot[0], 10);
    assert_eq!(events[extraction].snapshot[4], 10);
    assert_eq!(events.last().unwrap().snapshot, vec![1, 3, 4, 5, 10]);
}

#[test]
fn selection_emits_self_swaps() {
    let events = mutations(&[3, 3, 1], Algorithm::Selection);
    let pairs: Vec<Indices> = events.iter().map(|e| e.indices).collect();
    assert_eq!(
        pairs,
        vec![Indices::Pair(0, 2), Indices::Pair(1, 1), Indices::Pair(2, 2)]
    );
    assert_eq!(events[0].snapshot, vec![1, 3, 3]);
}

#[test]
fn submitted_text_drives_a_full_demo() {
    let mut engine = SortEngine::from_config(TraceConfig::default());
    engine.submit("5, 3,8 1").unwrap();

    let mut renderer = TextRenderer::new("Insertion Sort", 8);
    let mut steps = Vec::new();
    while let Some(event) = engine.step() {
        renderer.draw(&event);
        steps.push(event);
    }

    assert!(engine.is_verified());
    assert_eq!(format_sequence(&engine.state().working), "1, 3, 5, 8");
    assert_eq!(renderer.frames().len(), steps.len());
    assert_eq!(verify(&[5, 3, 8, 1], &steps).unwrap(), vec![1, 3, 5, 8]);
}

#[test]
fn yaml_configuration_feeds_playback() {
    let yaml = r#"
algorithm: bubble
data: [5, 3, 8, 1]
pacing:
  mutation_delay_ms: 10
  settle_delay_ms: 1
"#;
    let config = TraceConfig::from_yaml(yaml).unwrap();
    let pacing = Pacing::from_config(&config.pacing);
    let mut renderer = TextRenderer::new(config.algorithm.display_name(), 10);
    let mut slept = Vec::new();

    let summary = play(
        run_with(config.data.clone(), config.algorithm, config.options),
        &mut renderer,
        &pacing,
        |d| slept.push(d),
    );

    assert!(summary.completed);
    assert_eq!(slept.len() as u64, summary.mutations);
    assert_eq!(summary.total_delay.as_millis(), 10 * u128::from(summary.mutations));
}
