//! Hrimfax Circuit Intermediate Representation
//!
//! Core data structures for representing quantum circuits in Hrimfax: a
//! fluent [`CircuitBuilder`] accumulating an ordered operation list, and the
//! immutable [`Circuit`] it produces.
//!
//! # Core Components
//!
//! - **Qubits and Classical Bits**: [`QubitId`], [`ClbitId`] for addressing
//!   quantum and classical registers
//! - **Gates**: [`Gate`] covering the standard set (H, X, CX, rotations,
//!   controlled phases, Toffoli, multi-controlled X)
//! - **Parameters**: [`ParamExpr`] for symbolic angles in variational circuits
//! - **Operations**: [`Op`] combining gates with their operands, plus
//!   measurements and barriers
//! - **Builder**: [`CircuitBuilder`] with per-call index validation
//!
//! # Example: Building a Bell State
//!
//! ```rust
//! use hrimfax_ir::CircuitBuilder;
//!
//! let mut b = CircuitBuilder::new("bell", 2, 2);
//! b.h(0).unwrap();
//! b.cx(0, 1).unwrap();
//! b.measure_all().unwrap();
//!
//! let circuit = b.build();
//! assert_eq!(circuit.num_qubits(), 2);
//! assert_eq!(circuit.num_ops(), 4); // h, cx, two measures
//! ```
//!
//! # Example: Parameterized Circuit
//!
//! ```rust
//! use hrimfax_ir::CircuitBuilder;
//! use std::f64::consts::PI;
//!
//! let mut b = CircuitBuilder::new("variational", 1, 0);
//! b.rx(0, "theta").unwrap();
//!
//! let circuit = b.build();
//! assert_eq!(circuit.parameters(), vec!["theta".to_string()]);
//!
//! let bound = circuit.bind("theta", PI / 4.0).unwrap();
//! assert!(!bound.is_parameterized());
//! ```

pub mod builder;
pub mod circuit;
pub mod error;
pub mod gate;
pub mod op;
pub mod parameter;
pub mod qubit;

pub use builder::CircuitBuilder;
pub use circuit::Circuit;
pub use error::{IrError, IrResult};
pub use gate::Gate;
pub use op::Op;
pub use parameter::ParamExpr;
pub use qubit::{ClbitId, QubitId};
