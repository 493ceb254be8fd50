//! Expectation-value estimation seam.

use async_trait::async_trait;

use hrimfax_ir::Circuit;

use crate::error::AlgoResult;
use crate::hamiltonian::Hamiltonian;

/// Evaluates ⟨ψ(θ)|H|ψ(θ)⟩ for a fully bound circuit.
///
/// This is the one operation variational drivers consume from the
/// execution layer. The statevector adapter provides the local
/// implementation; a hardware-backed estimator would sample Pauli bases
/// instead.
#[async_trait]
pub trait Estimator: Send + Sync {
    /// The expectation value of `observable` on the state prepared by
    /// `circuit`.
    ///
    /// `circuit` MUST be fully bound; implementations reject circuits
    /// with symbolic parameters.
    async fn expectation(&self, circuit: &Circuit, observable: &Hamiltonian) -> AlgoResult<f64>;
}
