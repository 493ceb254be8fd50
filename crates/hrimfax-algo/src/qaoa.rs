//! Quantum Approximate Optimization Algorithm driver.

use std::sync::Arc;

use tracing::info;

use hrimfax_ir::{Circuit, CircuitBuilder};

use crate::error::{AlgoError, AlgoResult};
use crate::estimator::Estimator;
use crate::hamiltonian::{Hamiltonian, PauliOp};
use crate::optimizer::Optimizer;
use crate::vqe::{AlgoState, VariationalOutcome};

/// Build one QAOA state-preparation circuit for a diagonal cost
/// Hamiltonian: uniform superposition, then per layer a cost-phase block
/// (Rz / CX–Rz–CX per term, angle 2·γ·coeff) and an Rx(2·β) mixer.
///
/// # Errors
///
/// Rejects Hamiltonians with X or Y terms — QAOA cost layers require a
/// computational-basis-diagonal objective.
pub fn qaoa_circuit(
    hamiltonian: &Hamiltonian,
    gammas: &[f64],
    betas: &[f64],
) -> AlgoResult<Circuit> {
    if gammas.len() != betas.len() {
        return Err(AlgoError::InvalidConfiguration(format!(
            "{} gamma angles vs {} beta angles",
            gammas.len(),
            betas.len()
        )));
    }
    let n = hamiltonian.min_qubits();
    if n == 0 {
        return Err(AlgoError::InvalidConfiguration(
            "cost Hamiltonian acts on no qubits".into(),
        ));
    }

    let mut b = CircuitBuilder::new("qaoa", n, 0);
    for q in 0..n {
        b.h(q)?;
    }

    for (&gamma, &beta) in gammas.iter().zip(betas) {
        for term in hamiltonian.terms() {
            let ops = term.pauli.ops();
            if ops.iter().any(|(_, p)| matches!(p, PauliOp::X | PauliOp::Y)) {
                return Err(AlgoError::InvalidConfiguration(
                    "QAOA cost Hamiltonian must be diagonal (Z/I terms only)".into(),
                ));
            }
            let angle = 2.0 * gamma * term.coeff;
            match ops {
                [] => {} // constant offset: global phase only
                [(q, _)] => {
                    b.rz(*q, angle)?;
                }
                [(q0, _), (q1, _)] => {
                    b.cx(*q0, *q1)?;
                    b.rz(*q1, angle)?;
                    b.cx(*q0, *q1)?;
                }
                _ => {
                    return Err(AlgoError::InvalidConfiguration(
                        "QAOA cost layers support at most two-body terms".into(),
                    ));
                }
            }
        }
        for q in 0..n {
            b.rx(q, 2.0 * beta)?;
        }
    }
    Ok(b.build())
}

/// QAOA driver: same ask/tell loop as VQE, but the trial point is the
/// concatenated `[γ₀..γₚ₋₁, β₀..βₚ₋₁]` schedule and the circuit is
/// rebuilt per evaluation.
pub struct Qaoa {
    hamiltonian: Hamiltonian,
    layers: usize,
    estimator: Arc<dyn Estimator>,
    state: AlgoState,
}

impl Qaoa {
    /// Configure a QAOA instance with `layers` cost/mixer repetitions.
    pub fn new(
        hamiltonian: Hamiltonian,
        layers: usize,
        estimator: Arc<dyn Estimator>,
    ) -> AlgoResult<Self> {
        if layers == 0 {
            return Err(AlgoError::InvalidConfiguration(
                "QAOA needs at least one layer".into(),
            ));
        }
        Ok(Self {
            hamiltonian,
            layers,
            estimator,
            state: AlgoState::Configured,
        })
    }

    /// Current lifecycle state.
    pub fn state(&self) -> AlgoState {
        self.state
    }

    /// Minimize the cost expectation over the angle schedule.
    pub async fn run<F>(
        &mut self,
        mut optimizer: Box<dyn Optimizer>,
        mut on_evaluation: F,
    ) -> AlgoResult<VariationalOutcome>
    where
        F: FnMut(usize, f64) + Send,
    {
        self.state = AlgoState::Configured;
        let mut trace = Vec::new();
        let mut eval_index = 0usize;

        while !optimizer.is_done() {
            let point = optimizer.propose();
            if point.len() != 2 * self.layers {
                return Err(AlgoError::InvalidConfiguration(format!(
                    "optimizer proposed {} angles, schedule needs {}",
                    point.len(),
                    2 * self.layers
                )));
            }
            let (gammas, betas) = point.split_at(self.layers);
            let circuit = qaoa_circuit(&self.hamiltonian, gammas, betas)?;
            let value = self
                .estimator
                .expectation(&circuit, &self.hamiltonian)
                .await?;
            optimizer.accept(value);
            on_evaluation(eval_index, value);
            trace.push((eval_index, value));
            eval_index += 1;
        }

        if trace.is_empty() {
            return Err(AlgoError::InvalidConfiguration(
                "optimizer finished without a single evaluation".into(),
            ));
        }

        let (best_point, best_value) = optimizer.best();
        info!(
            evaluations = eval_index,
            optimal_value = best_value,
            "QAOA run complete"
        );

        let names = (0..self.layers)
            .map(|l| format!("gamma_{l}"))
            .chain((0..self.layers).map(|l| format!("beta_{l}")))
            .collect::<Vec<_>>();

        self.state = AlgoState::Completed;
        Ok(VariationalOutcome {
            optimal_value: best_value,
            optimal_parameters: names.into_iter().zip(best_point).collect(),
            trace,
            evaluations: eval_index,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hamiltonian::HamiltonianTerm;
    use hrimfax_ir::Gate;

    fn maxcut_triangle() -> Hamiltonian {
        Hamiltonian::from_terms(vec![
            HamiltonianTerm::zz(0, 1, 0.5),
            HamiltonianTerm::zz(1, 2, 0.5),
            HamiltonianTerm::zz(0, 2, 0.5),
        ])
    }

    #[test]
    fn test_circuit_shape_single_layer() {
        let c = qaoa_circuit(&maxcut_triangle(), &[0.3], &[0.7]).unwrap();
        assert_eq!(c.num_qubits(), 3);
        // 3 H + 3×(CX,RZ,CX) + 3 RX
        assert_eq!(c.num_ops(), 3 + 9 + 3);
        let rx_count = c
            .ops()
            .iter()
            .filter(|op| matches!(op.as_gate(), Some(Gate::Rx(_))))
            .count();
        assert_eq!(rx_count, 3);
    }

    #[test]
    fn test_non_diagonal_hamiltonian_rejected() {
        let h = Hamiltonian::from_terms(vec![HamiltonianTerm::x(0, 1.0)]);
        let err = qaoa_circuit(&h, &[0.1], &[0.1]).unwrap_err();
        assert!(matches!(err, AlgoError::InvalidConfiguration(_)));
    }

    #[test]
    fn test_mismatched_schedule_rejected() {
        let err = qaoa_circuit(&maxcut_triangle(), &[0.1, 0.2], &[0.1]).unwrap_err();
        assert!(matches!(err, AlgoError::InvalidConfiguration(_)));
    }
}
