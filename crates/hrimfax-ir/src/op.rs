//! Circuit operations: gates, measurements, barriers.

use serde::{Deserialize, Serialize};

use crate::gate::Gate;
use crate::qubit::{ClbitId, QubitId};

/// One entry in a circuit's ordered operation list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Op {
    /// A gate applied to the listed qubits (control wires first).
    Gate {
        /// The gate.
        gate: Gate,
        /// Target wires; length must equal `gate.num_qubits()`.
        qubits: Vec<QubitId>,
    },
    /// Projective measurement of one qubit into one classical bit.
    Measure {
        /// Measured qubit.
        qubit: QubitId,
        /// Destination classical bit.
        clbit: ClbitId,
    },
    /// Scheduling barrier across the listed qubits.
    Barrier(Vec<QubitId>),
}

impl Op {
    /// The operation name as it appears in diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            Op::Gate { gate, .. } => gate.name(),
            Op::Measure { .. } => "measure",
            Op::Barrier(_) => "barrier",
        }
    }

    /// The gate, if this is a gate operation.
    pub fn as_gate(&self) -> Option<&Gate> {
        match self {
            Op::Gate { gate, .. } => Some(gate),
            _ => None,
        }
    }

    /// True for measurement operations.
    pub fn is_measure(&self) -> bool {
        matches!(self, Op::Measure { .. })
    }

    /// True for barrier operations.
    pub fn is_barrier(&self) -> bool {
        matches!(self, Op::Barrier(_))
    }

    /// All qubits this operation touches.
    pub fn qubits(&self) -> &[QubitId] {
        match self {
            Op::Gate { qubits, .. } => qubits,
            Op::Measure { qubit, .. } => std::slice::from_ref(qubit),
            Op::Barrier(qubits) => qubits,
        }
    }
}
