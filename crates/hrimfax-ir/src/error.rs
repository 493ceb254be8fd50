//! Error types for circuit construction and manipulation.

use thiserror::Error;

/// Errors raised while building or transforming circuits.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum IrError {
    /// A gate referenced a qubit outside the declared register.
    #[error("qubit index {index} out of range for '{gate}' (register has {num_qubits} qubits)")]
    QubitOutOfRange {
        /// The offending index.
        index: u32,
        /// The operation that referenced it.
        gate: String,
        /// Declared quantum register size.
        num_qubits: u32,
    },

    /// A measurement referenced a classical bit outside the declared register.
    #[error("classical bit index {index} out of range (register has {num_clbits} bits)")]
    ClbitOutOfRange {
        /// The offending index.
        index: u32,
        /// Declared classical register size.
        num_clbits: u32,
    },

    /// The same qubit appeared twice in one multi-qubit gate.
    #[error("duplicate qubit q{qubit} in '{gate}'")]
    DuplicateQubit {
        /// The repeated index.
        qubit: u32,
        /// The operation.
        gate: String,
    },

    /// A gate was given the wrong number of qubits.
    #[error("'{gate}' expects {expected} qubits, got {got}")]
    QubitCountMismatch {
        /// The gate name.
        gate: String,
        /// Required arity.
        expected: u32,
        /// Provided wire count.
        got: u32,
    },

    /// Binding referenced a symbol the circuit does not contain.
    #[error("unknown parameter '{0}'")]
    UnknownParameter(String),

    /// A parameter vector did not match the circuit's parameter count.
    #[error("parameter vector has {got} entries, circuit expects {expected}")]
    ParameterCountMismatch {
        /// Number of distinct symbols in the circuit.
        expected: usize,
        /// Provided vector length.
        got: usize,
    },

    /// A classical bitstring did not match the register it describes.
    #[error("invalid bitstring '{bitstring}': {reason}")]
    InvalidBitstring {
        /// The offending string.
        bitstring: String,
        /// What was wrong with it.
        reason: String,
    },

    /// Structural inversion hit an operation with no inverse.
    #[error("cannot invert operation '{0}'")]
    NotInvertible(String),
}

/// Result alias for IR operations.
pub type IrResult<T> = Result<T, IrError>;
