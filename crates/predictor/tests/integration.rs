// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Integration tests: the full predict path end to end.
//!
//! These exercise the complete flow — binding resolution → device staging →
//! execution → timeline recording → result encoding — against the stub
//! engine, proving the crates compose and the caller-visible contracts
//! hold: result ordering, buffer release on every error path, and timeline
//! monotonicity across executions.

use device_memory::{DeviceAllocator, HostDevice};
use engine_api::{StubEngine, StubLayer, TensorShape};
use predictor::{Prediction, Predictor, PredictorConfig, PredictorError};
use std::sync::Arc;

// ── Helpers ────────────────────────────────────────────────────

struct Harness {
    host: Arc<HostDevice>,
    predictor: Predictor,
}

fn harness(input: TensorShape, classes: usize, layers: Vec<StubLayer>) -> Harness {
    harness_with(input, classes, layers, |e| e)
}

fn harness_with(
    input: TensorShape,
    classes: usize,
    layers: Vec<StubLayer>,
    engine_mods: impl FnOnce(StubEngine) -> StubEngine,
) -> Harness {
    let host = Arc::new(HostDevice::new());
    let engine = engine_mods(
        StubEngine::new(host.clone(), input, TensorShape::flat(classes)).with_layers(layers),
    );
    let device: Arc<dyn DeviceAllocator> = host.clone();
    let predictor = Predictor::new(Box::new(engine), device, PredictorConfig::default());
    Harness { host, predictor }
}

fn layers_1_2_05() -> Vec<StubLayer> {
    vec![
        StubLayer::new("conv1", 1.0),
        StubLayer::new("pool1", 2.0),
        StubLayer::new("prob", 0.5),
    ]
}

// ── Result contract ────────────────────────────────────────────

#[test]
fn imagenet_scenario_batch_two() {
    // Input (3, 224, 224), 1000 classes, batch 2 → 2000 records,
    // entries 0..999 for example 0, 1000..1999 for example 1.
    let mut h = harness(TensorShape::new(3, 224, 224), 1000, Vec::new());
    let input = vec![0.5f32; 2 * 3 * 224 * 224];

    let records = h.predictor.predict(&input, "data", "prob", 2).unwrap();
    assert_eq!(records.len(), 2000);
    for example in 0..2 {
        for class in 0..1000 {
            assert_eq!(records[example * 1000 + class].index, class);
        }
    }
    // Per-example distributions are normalized.
    let first: f32 = records[..1000].iter().map(|r| r.probability).sum();
    assert!((first - 1.0).abs() < 1e-3);

    // Nothing device-side survives the call.
    assert_eq!(h.host.live_regions(), 0);
}

#[test]
fn predict_json_is_ordered_array_of_objects() {
    let mut h = harness(TensorShape::new(1, 2, 2), 3, Vec::new());
    let text = h
        .predictor
        .predict_json(&[0.0; 4], "data", "prob", 1)
        .unwrap();

    let records: Vec<Prediction> = serde_json::from_str(&text).unwrap();
    assert_eq!(records.len(), 3);
    assert_eq!(records[0].index, 0);
    assert!(text.starts_with(r#"[{"index":0,"probability":"#));
}

// ── Configuration failures perform no device work ──────────────

#[test]
fn wrong_binding_count_allocates_nothing() {
    let mut h = harness_with(TensorShape::new(1, 2, 2), 4, Vec::new(), |e| {
        e.with_extra_binding("aux", TensorShape::flat(1))
    });

    let err = h.predictor.predict(&[0.0; 4], "data", "prob", 1).unwrap_err();
    assert!(matches!(err, PredictorError::Binding(_)));
    assert_eq!(h.host.stats().total_allocations, 0);
}

#[test]
fn unknown_binding_name_allocates_nothing() {
    let mut h = harness(TensorShape::new(1, 2, 2), 4, Vec::new());

    let err = h
        .predictor
        .predict(&[0.0; 4], "data", "logits", 1)
        .unwrap_err();
    assert!(matches!(err, PredictorError::Binding(_)));
    assert_eq!(h.host.stats().total_allocations, 0);
}

// ── Resource failures release everything ───────────────────────

#[test]
fn output_allocation_failure_releases_input_region() {
    let mut h = harness(TensorShape::new(1, 2, 2), 4, Vec::new());
    h.host.fail_allocations_after(1);

    let err = h.predictor.predict(&[0.0; 4], "data", "prob", 1).unwrap_err();
    assert!(matches!(err, PredictorError::Device(_)));
    assert_eq!(h.host.live_regions(), 0);
    assert_eq!(h.host.bytes_in_use(), 0);
}

#[test]
fn execution_failure_releases_both_regions_and_recovers() {
    let mut h = harness_with(TensorShape::new(1, 2, 2), 4, Vec::new(), |e| {
        e.with_execution_failure()
    });

    let err = h.predictor.predict(&[0.0; 4], "data", "prob", 1).unwrap_err();
    assert!(matches!(err, PredictorError::Engine(_)));
    assert_eq!(h.host.live_regions(), 0);
}

#[test]
fn partial_output_is_zero_filled_not_stale() {
    let mut h = harness_with(TensorShape::new(1, 2, 2), 4, Vec::new(), |e| {
        e.with_truncated_output(1)
    });

    let records = h.predictor.predict(&[1.0; 8], "data", "prob", 2).unwrap();
    assert_eq!(records.len(), 8);
    assert!(records[..4].iter().any(|r| r.probability != 0.0));
    assert!(records[4..].iter().all(|r| r.probability == 0.0));
}

// ── Profiling timeline ─────────────────────────────────────────

#[test]
fn profile_scenario_three_layers() {
    // start_profiling("run1", "") then one execute with layers of
    // 1.0 ms, 2.0 ms, 0.5 ms → three chained entries.
    let mut h = harness(TensorShape::new(1, 2, 2), 4, layers_1_2_05());

    h.predictor.start_profiling("run1", "");
    h.predictor.predict(&[0.0; 4], "data", "prob", 1).unwrap();

    let profile = h.predictor.profile().unwrap();
    let entries = profile.entries();
    assert_eq!(entries.len(), 3);

    assert_eq!(entries[0].start_ns, profile.start_ns());
    assert_eq!(entries[0].duration_ns(), 1_000_000);
    assert_eq!(entries[1].duration_ns(), 2_000_000);
    assert_eq!(entries[2].duration_ns(), 500_000);

    // Strictly increasing, non-overlapping.
    assert_eq!(entries[0].end_ns, entries[1].start_ns);
    assert_eq!(entries[1].end_ns, entries[2].start_ns);
    assert!(entries.windows(2).all(|w| w[0].start_ns < w[1].start_ns));

    let text = h.predictor.read_profile().unwrap();
    assert!(text.contains("conv1"));
    assert!(text.contains("pool1"));
    assert!(text.contains("prob"));
}

#[test]
fn profile_spans_multiple_executions() {
    // Entries accumulate across calls in one session, chaining
    // continuously: call two's first entry starts where call one ended.
    let mut h = harness(TensorShape::new(1, 2, 2), 4, layers_1_2_05());

    h.predictor.start_profiling("run1", "");
    h.predictor.predict(&[0.0; 4], "data", "prob", 1).unwrap();
    h.predictor.predict(&[0.0; 4], "data", "prob", 1).unwrap();

    let entries = h.predictor.profile().unwrap().entries();
    assert_eq!(entries.len(), 6);
    assert_eq!(entries[2].end_ns, entries[3].start_ns);
    assert!(entries.windows(2).all(|w| w[0].end_ns == w[1].start_ns));
}

#[test]
fn restart_discards_earlier_entries() {
    let mut h = harness(TensorShape::new(1, 2, 2), 4, layers_1_2_05());

    h.predictor.start_profiling("run1", "");
    h.predictor.predict(&[0.0; 4], "data", "prob", 1).unwrap();
    let first_start = h.predictor.profile().unwrap().start_ns();

    h.predictor.start_profiling("run2", "");
    h.predictor.predict(&[0.0; 4], "data", "prob", 1).unwrap();

    let profile = h.predictor.profile().unwrap();
    assert_eq!(profile.entries().len(), 3);
    assert!(profile.start_ns() >= first_start);
    assert_eq!(profile.entries()[0].start_ns, profile.start_ns());
}

#[test]
fn end_then_disable_never_fault() {
    let mut h = harness(TensorShape::new(1, 2, 2), 4, Vec::new());

    // Without a session.
    h.predictor.end_profiling();
    h.predictor.disable_profiling();
    assert_eq!(h.predictor.read_profile().unwrap(), "[]");

    // With a closed session.
    h.predictor.start_profiling("run1", "");
    h.predictor.end_profiling();
    h.predictor.end_profiling();
    h.predictor.disable_profiling();
    assert_eq!(h.predictor.read_profile().unwrap(), "[]");
}

#[test]
fn disabled_session_reads_empty_until_restarted() {
    let mut h = harness(TensorShape::new(1, 2, 2), 4, layers_1_2_05());

    h.predictor.start_profiling("run1", "");
    h.predictor.predict(&[0.0; 4], "data", "prob", 1).unwrap();
    assert_ne!(h.predictor.read_profile().unwrap(), "[]");

    h.predictor.disable_profiling();
    assert_eq!(h.predictor.read_profile().unwrap(), "[]");

    // Executions while disabled record nothing.
    h.predictor.predict(&[0.0; 4], "data", "prob", 1).unwrap();
    assert_eq!(h.predictor.read_profile().unwrap(), "[]");

    h.predictor.start_profiling("run1", "");
    h.predictor.predict(&[0.0; 4], "data", "prob", 1).unwrap();
    assert_eq!(h.predictor.profile().unwrap().entries().len(), 3);
}

// ── Handle lifecycle ───────────────────────────────────────────

#[test]
fn drop_releases_engine_and_profile() {
    let h = harness(TensorShape::new(1, 2, 2), 4, Vec::new());
    let host = h.host.clone();
    drop(h);
    assert_eq!(host.live_regions(), 0);
}

#[test]
fn successive_calls_reuse_one_engine() {
    let mut h = harness(TensorShape::new(1, 2, 2), 4, Vec::new());
    for batch in 1..=4 {
        let input = vec![0.25f32; batch * 4];
        let records = h
            .predictor
            .predict(&input, "data", "prob", batch)
            .unwrap();
        assert_eq!(records.len(), batch * 4);
    }
    assert_eq!(h.host.live_regions(), 0);
    // Two regions per call, all freed.
    assert_eq!(h.host.stats().total_allocations, 8);
    assert_eq!(h.host.stats().total_frees, 8);
}
