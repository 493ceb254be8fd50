//! Hrimfax Local Simulator Adapter
//!
//! In-process execution backends over a dense statevector engine:
//!
//! - [`SimulatorBackend`] — full [`Backend`](hrimfax_hal::Backend)
//!   lifecycle with sampled counts, registered under several logical
//!   simulator names.
//! - [`FakeBackend`] — deterministic all-zeros backend for wiring tests.
//! - [`StatevectorEstimator`] — exact expectation values for the
//!   variational drivers.

pub mod estimator;
pub mod fake;
pub mod simulator;
pub mod statevector;

pub use estimator::StatevectorEstimator;
pub use fake::FakeBackend;
pub use simulator::{SimulationMethod, SimulatorBackend};
pub use statevector::{Statevector, outcome_to_bitstring};
