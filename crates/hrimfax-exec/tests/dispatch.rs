//! End-to-end dispatch tests against the local backends.

use std::sync::Arc;

use hrimfax_adapter_sim::FakeBackend;
use hrimfax_exec::{Dispatcher, initialize};
use hrimfax_hal::{BackendRegistry, HalError};
use hrimfax_ir::CircuitBuilder;
use hrimfax_templates::{bell_state, ghz_state};

/// Registry with a single fake backend, plus a handle kept for spying on
/// submission counts.
fn spy_registry() -> (Dispatcher, Arc<FakeBackend>) {
    let fake = Arc::new(FakeBackend::new());
    let mut registry = BackendRegistry::new();
    registry.register(fake.clone());
    (Dispatcher::new(registry), fake)
}

#[tokio::test]
async fn test_zero_shots_rejected_before_any_backend_call() {
    let (dispatcher, fake) = spy_registry();
    let circuit = bell_state(true).unwrap();

    let err = dispatcher
        .run(&circuit, "fake_backend", 0, 1)
        .await
        .unwrap_err();

    assert!(matches!(err, HalError::InvalidShots(_)));
    assert_eq!(fake.submission_count(), 0);
}

#[tokio::test]
async fn test_negative_shots_rejected_before_any_backend_call() {
    let (dispatcher, fake) = spy_registry();
    let circuit = bell_state(true).unwrap();

    let err = dispatcher
        .run(&circuit, "fake_backend", -5, 1)
        .await
        .unwrap_err();

    assert!(matches!(err, HalError::InvalidShots(msg) if msg.contains("-5")));
    assert_eq!(fake.submission_count(), 0);
}

#[tokio::test]
async fn test_invalid_shots_beats_unknown_backend() {
    // shots <= 0 must fail before the registry lookup.
    let (dispatcher, _) = spy_registry();
    let circuit = bell_state(true).unwrap();

    let err = dispatcher
        .run(&circuit, "no_such_backend", 0, 1)
        .await
        .unwrap_err();
    assert!(matches!(err, HalError::InvalidShots(_)));
}

#[tokio::test]
async fn test_unknown_backend_lists_known_names() {
    let dispatcher = Dispatcher::new(initialize().await);
    let circuit = bell_state(true).unwrap();

    let err = dispatcher
        .run(&circuit, "missing", 100, 1)
        .await
        .unwrap_err();

    let msg = err.to_string();
    assert!(msg.contains("'missing'"));
    assert!(msg.contains("aer_simulator"));
    assert!(msg.contains("fake_backend"));
}

#[tokio::test]
async fn test_unbound_parameter_named_in_error() {
    let dispatcher = Dispatcher::new(initialize().await);
    let mut b = CircuitBuilder::new("sym", 1, 1);
    b.ry(0, "theta").unwrap();
    b.measure(0, 0).unwrap();

    let err = dispatcher
        .run(&b.build(), "aer_simulator", 100, 1)
        .await
        .unwrap_err();

    assert!(matches!(err, HalError::UnboundParameter(name) if name == "theta"));
}

#[tokio::test]
async fn test_bell_end_to_end() {
    let dispatcher = Dispatcher::new(initialize().await);
    let circuit = bell_state(true).unwrap();

    let result = dispatcher
        .run(&circuit, "aer_simulator", 1000, 1)
        .await
        .unwrap();

    assert_eq!(result.counts.total_shots(), 1000);
    for (bitstring, _) in result.counts.iter() {
        assert!(bitstring == "00" || bitstring == "11", "got {bitstring}");
    }
}

#[tokio::test]
async fn test_ghz_end_to_end_on_statevector_simulator() {
    let dispatcher = Dispatcher::new(initialize().await);
    let circuit = ghz_state(4, true).unwrap();

    let result = dispatcher
        .run(&circuit, "statevector_simulator", 500, 2)
        .await
        .unwrap();

    assert_eq!(result.counts.total_shots(), 500);
    for (bitstring, _) in result.counts.iter() {
        assert!(bitstring == "0000" || bitstring == "1111", "got {bitstring}");
    }
}

#[tokio::test]
async fn test_oversized_circuit_rejected_by_lowering() {
    let dispatcher = Dispatcher::new(initialize().await);
    let b = CircuitBuilder::new("big", 25, 0);

    let err = dispatcher
        .run(&b.build(), "aer_simulator", 10, 0)
        .await
        .unwrap_err();
    assert!(matches!(err, HalError::CircuitTooLarge(_)));
}
