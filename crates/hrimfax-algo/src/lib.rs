//! Hrimfax Quantum Algorithm Library
//!
//! Variational drivers (VQE, QAOA, a binary classifier) built around an
//! external ask/tell [`Optimizer`], plus Grover search assembly.
//! Algorithms never talk to backends directly; expectation values come
//! through the [`Estimator`] seam so the same driver runs against a
//! statevector simulator or a sampling backend.
//!
//! ```no_run
//! use std::sync::Arc;
//! use hrimfax_algo::{Estimator, Spsa, Vqe, h2_molecule};
//! use hrimfax_templates::hardware_efficient_ansatz;
//!
//! # async fn demo(estimator: Arc<dyn Estimator>) -> hrimfax_algo::AlgoResult<()> {
//! let ansatz = hardware_efficient_ansatz(2, 1)?;
//! let mut vqe = Vqe::new(ansatz, h2_molecule(), estimator)?;
//! let outcome = vqe
//!     .run(Box::new(Spsa::new(vec![0.0; 2], 100)), |i, v| {
//!         println!("eval {i}: {v:.6}");
//!     })
//!     .await?;
//! println!("ground state estimate: {:.6}", outcome.optimal_value);
//! # Ok(())
//! # }
//! ```

pub mod classifier;
pub mod error;
pub mod estimator;
pub mod grover;
pub mod hamiltonian;
pub mod optimizer;
pub mod qaoa;
pub mod vqe;

pub use classifier::QuantumClassifier;
pub use error::{AlgoError, AlgoResult};
pub use estimator::Estimator;
pub use grover::{grover_circuit, optimal_iterations, top_candidates};
pub use hamiltonian::{Hamiltonian, HamiltonianTerm, PauliOp, PauliString, h2_molecule};
pub use optimizer::{Optimizer, Spsa};
pub use qaoa::{Qaoa, qaoa_circuit};
pub use vqe::{AlgoState, VariationalOutcome, Vqe};
