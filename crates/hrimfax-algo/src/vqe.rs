//! Variational Quantum Eigensolver driver.

use std::sync::Arc;

use tracing::{debug, info};

use hrimfax_ir::Circuit;

use crate::error::{AlgoError, AlgoResult};
use crate::estimator::Estimator;
use crate::hamiltonian::Hamiltonian;
use crate::optimizer::Optimizer;

/// Driver lifecycle: `Configured` until a run finishes, `Completed` after.
///
/// `run()` is re-entrant — invoking it again re-executes from scratch
/// with whatever optimizer is passed in; nothing is incremental.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlgoState {
    /// Ready to run.
    Configured,
    /// A run has finished; results were returned to the caller.
    Completed,
}

/// Result of a variational minimization.
#[derive(Debug, Clone)]
pub struct VariationalOutcome {
    /// Best objective value observed.
    pub optimal_value: f64,
    /// Parameter binding achieving it, in the ansatz's first-use order.
    pub optimal_parameters: Vec<(String, f64)>,
    /// Full (evaluation index, objective value) trace.
    pub trace: Vec<(usize, f64)>,
    /// Total objective evaluations consumed.
    pub evaluations: usize,
}

/// Variational Quantum Eigensolver.
///
/// Composes an ansatz circuit, a Hamiltonian objective, and an
/// [`Estimator`]; `run()` drives an external [`Optimizer`] that owns the
/// termination policy. A trace callback fires once per evaluation.
pub struct Vqe {
    ansatz: Circuit,
    hamiltonian: Hamiltonian,
    estimator: Arc<dyn Estimator>,
    state: AlgoState,
}

impl std::fmt::Debug for Vqe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Vqe")
            .field("ansatz", &self.ansatz)
            .field("hamiltonian", &self.hamiltonian)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl Vqe {
    /// Configure a VQE instance.
    ///
    /// # Errors
    ///
    /// Returns [`AlgoError::InvalidConfiguration`] if the ansatz register
    /// is smaller than the Hamiltonian requires.
    pub fn new(
        ansatz: Circuit,
        hamiltonian: Hamiltonian,
        estimator: Arc<dyn Estimator>,
    ) -> AlgoResult<Self> {
        if ansatz.num_qubits() < hamiltonian.min_qubits() {
            return Err(AlgoError::InvalidConfiguration(format!(
                "ansatz has {} qubits but the Hamiltonian acts on {}",
                ansatz.num_qubits(),
                hamiltonian.min_qubits()
            )));
        }
        Ok(Self {
            ansatz,
            hamiltonian,
            estimator,
            state: AlgoState::Configured,
        })
    }

    /// Current lifecycle state.
    pub fn state(&self) -> AlgoState {
        self.state
    }

    /// Minimize ⟨ψ(θ)|H|ψ(θ)⟩ over the ansatz parameters.
    ///
    /// The optimizer is consumed: a fresh run takes a fresh optimizer,
    /// which is what makes re-running start from scratch. `on_evaluation`
    /// is invoked exactly once per objective evaluation with the
    /// evaluation index and value.
    ///
    /// # Errors
    ///
    /// Estimator failures propagate unchanged; there is no partial-result
    /// contract for an interrupted run.
    pub async fn run<F>(
        &mut self,
        mut optimizer: Box<dyn Optimizer>,
        mut on_evaluation: F,
    ) -> AlgoResult<VariationalOutcome>
    where
        F: FnMut(usize, f64) + Send,
    {
        self.state = AlgoState::Configured;
        let names = self.ansatz.parameters();
        debug!(parameters = names.len(), "starting VQE run");

        let mut trace = Vec::new();
        let mut eval_index = 0usize;

        while !optimizer.is_done() {
            let point = optimizer.propose();
            let bound = self.ansatz.bind_values(&point)?;
            let value = self
                .estimator
                .expectation(&bound, &self.hamiltonian)
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
            "VQE run complete"
        );

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
    use crate::hamiltonian::{HamiltonianTerm, h2_molecule};
    use crate::optimizer::Spsa;
    use async_trait::async_trait;
    use hrimfax_ir::CircuitBuilder;

    /// Test double: reads the first bound Ry angle θ and scores (θ − 0.5)².
    struct AngleEstimator;

    #[async_trait]
    impl Estimator for AngleEstimator {
        async fn expectation(
            &self,
            circuit: &Circuit,
            _observable: &Hamiltonian,
        ) -> AlgoResult<f64> {
            let theta = circuit
                .ops()
                .iter()
                .find_map(|op| op.as_gate().and_then(|g| g.param()).and_then(|p| p.as_f64()))
                .ok_or_else(|| AlgoError::Estimation("no bound angle".into()))?;
            Ok((theta - 0.5) * (theta - 0.5))
        }
    }

    fn one_param_ansatz() -> Circuit {
        let mut b = CircuitBuilder::new("ansatz", 2, 0);
        b.ry(0, "t").unwrap();
        b.cx(0, 1).unwrap();
        b.build()
    }

    #[tokio::test]
    async fn test_trace_and_callback_fire_per_evaluation() {
        let mut vqe = Vqe::new(
            one_param_ansatz(),
            h2_molecule(),
            Arc::new(AngleEstimator),
        )
        .unwrap();
        assert_eq!(vqe.state(), AlgoState::Configured);

        let optimizer = Box::new(Spsa::new(vec![0.0], 20).with_seed(11));
        let mut callback_hits = Vec::new();
        let outcome = vqe
            .run(optimizer, |i, v| callback_hits.push((i, v)))
            .await
            .unwrap();

        assert_eq!(vqe.state(), AlgoState::Completed);
        assert_eq!(outcome.evaluations, 20);
        assert_eq!(outcome.trace.len(), 20);
        assert_eq!(callback_hits, outcome.trace);
        assert_eq!(outcome.optimal_parameters.len(), 1);
        assert_eq!(outcome.optimal_parameters[0].0, "t");
    }

    #[tokio::test]
    async fn test_rerun_starts_from_scratch() {
        let mut vqe = Vqe::new(
            one_param_ansatz(),
            h2_molecule(),
            Arc::new(AngleEstimator),
        )
        .unwrap();

        let first = vqe
            .run(Box::new(Spsa::new(vec![0.0], 10).with_seed(1)), |_, _| {})
            .await
            .unwrap();
        let second = vqe
            .run(Box::new(Spsa::new(vec![0.0], 10).with_seed(1)), |_, _| {})
            .await
            .unwrap();

        // Same seed, same fresh start → identical traces.
        assert_eq!(first.trace, second.trace);
    }

    #[test]
    fn test_undersized_ansatz_rejected() {
        let mut b = CircuitBuilder::new("tiny", 1, 0);
        b.ry(0, "t").unwrap();
        let err = Vqe::new(
            b.build(),
            Hamiltonian::from_terms(vec![HamiltonianTerm::zz(0, 1, 1.0)]),
            Arc::new(AngleEstimator),
        )
        .unwrap_err();
        assert!(matches!(err, AlgoError::InvalidConfiguration(_)));
    }
}
