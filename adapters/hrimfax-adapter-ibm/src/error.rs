//! Error types for the IBM Quantum adapter.

use thiserror::Error;

/// Result type for IBM operations.
pub type IbmResult<T> = Result<T, IbmError>;

/// Errors from the IBM Quantum API or adapter plumbing.
#[derive(Debug, Error)]
pub enum IbmError {
    /// Missing API token.
    #[error("IBM Quantum API token not found. Set the IBM_QUANTUM_TOKEN environment variable.")]
    MissingToken,

    /// Token could not be encoded into an Authorization header.
    #[error("Invalid IBM Quantum API token")]
    InvalidToken,

    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error body.
    #[error("IBM Quantum API error: {message}")]
    Api {
        /// Error code from the API, when present.
        code: Option<String>,
        /// Error message.
        message: String,
    },

    /// Job not found.
    #[error("Job not found: {0}")]
    JobNotFound(String),

    /// Job failed on the backend.
    #[error("Job failed: {0}")]
    JobFailed(String),

    /// Session could not be opened or closed.
    #[error("Session error: {0}")]
    Session(String),

    /// Backend not available.
    #[error("Backend not available: {0}")]
    BackendUnavailable(String),

    /// Circuit too large for the target device.
    #[error("Circuit requires {required} qubits but backend only has {available}")]
    TooManyQubits {
        /// Qubits needed.
        required: u32,
        /// Qubits available.
        available: u32,
    },

    /// JSON parsing error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<IbmError> for hrimfax_hal::HalError {
    fn from(e: IbmError) -> Self {
        match e {
            IbmError::MissingToken | IbmError::InvalidToken => {
                hrimfax_hal::HalError::Configuration(e.to_string())
            }
            IbmError::Http(e) => hrimfax_hal::HalError::Network(e),
            IbmError::Json(e) => hrimfax_hal::HalError::Serialization(e),
            IbmError::JobNotFound(id) => hrimfax_hal::HalError::JobNotFound(id),
            IbmError::JobFailed(msg) => hrimfax_hal::HalError::JobFailed(msg),
            IbmError::BackendUnavailable(msg) => hrimfax_hal::HalError::BackendUnavailable(msg),
            IbmError::TooManyQubits {
                required,
                available,
            } => hrimfax_hal::HalError::CircuitTooLarge(format!(
                "circuit requires {required} qubits but backend only has {available}"
            )),
            _ => hrimfax_hal::HalError::Backend(e.to_string()),
        }
    }
}
