//! Error types for algorithm drivers.

use thiserror::Error;

/// Errors raised while driving variational algorithms.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AlgoError {
    /// Circuit construction or binding failed.
    #[error("Circuit error: {0}")]
    Ir(#[from] hrimfax_ir::IrError),

    /// A circuit reached the estimator with symbolic parameters left.
    #[error("Unbound parameter '{0}' at evaluation time")]
    UnboundParameter(String),

    /// The algorithm was configured inconsistently.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// The expectation-value evaluation failed.
    #[error("Estimation failed: {0}")]
    Estimation(String),
}

/// Result alias for algorithm drivers.
pub type AlgoResult<T> = Result<T, AlgoError>;
