//! Exact expectation values from the statevector engine.

use async_trait::async_trait;
use tracing::debug;

use hrimfax_algo::hamiltonian::Hamiltonian;
use hrimfax_algo::{AlgoError, AlgoResult, Estimator};
use hrimfax_ir::Circuit;

use crate::simulator::MAX_QUBITS;
use crate::statevector::Statevector;

/// Shot-noise-free [`Estimator`]: evolves the circuit once and reads
/// ⟨ψ|H|ψ⟩ directly off the amplitudes, term by term.
#[derive(Debug, Default)]
pub struct StatevectorEstimator;

impl StatevectorEstimator {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Estimator for StatevectorEstimator {
    async fn expectation(&self, circuit: &Circuit, observable: &Hamiltonian) -> AlgoResult<f64> {
        if let Some(name) = circuit.first_unbound() {
            return Err(AlgoError::UnboundParameter(name));
        }
        if circuit.num_qubits() > MAX_QUBITS {
            return Err(AlgoError::Estimation(format!(
                "circuit has {} qubits, statevector limit is {MAX_QUBITS}",
                circuit.num_qubits()
            )));
        }
        if observable.min_qubits() > circuit.num_qubits() {
            return Err(AlgoError::Estimation(format!(
                "observable acts on {} qubits but the circuit has {}",
                observable.min_qubits(),
                circuit.num_qubits()
            )));
        }

        let mut state = Statevector::new(circuit.num_qubits() as usize);
        for op in circuit.ops() {
            state
                .apply(op)
                .map_err(|e| AlgoError::Estimation(e.to_string()))?;
        }

        let value = observable
            .terms()
            .iter()
            .map(|term| term.coeff * state.expectation(&term.pauli))
            .sum();
        debug!(terms = observable.n_terms(), value, "evaluated expectation");
        Ok(value)
    }
}
