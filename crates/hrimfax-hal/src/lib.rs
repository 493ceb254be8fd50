//! Hrimfax Hardware Abstraction Layer
//!
//! Defines the contract between circuit construction and execution:
//!
//! - **[`Backend`]**: the async lifecycle trait every execution target
//!   implements (capabilities, validation, submission, polling, results,
//!   scoped sessions)
//! - **[`BackendRegistry`]**: process-scoped, insertion-ordered name →
//!   backend mapping with a documented name-based simulator heuristic
//! - **[`Capabilities`]** / [`GateSet`]: static backend descriptors
//! - **[`Counts`]** / [`ExecutionResult`]: measurement histograms
//! - **[`Job`]** / [`JobId`] / [`JobStatus`]: submission lifecycle
//! - **[`HalError`]**: the error surface shared by adapters and the
//!   dispatcher

pub mod backend;
pub mod capability;
pub mod error;
pub mod job;
pub mod registry;
pub mod result;

pub use backend::{Backend, BackendAvailability, BackendConfig, SessionHandle, ValidationResult};
pub use capability::{Capabilities, GateSet};
pub use error::{HalError, HalResult};
pub use job::{Job, JobId, JobStatus};
pub use registry::{BackendRegistry, BackendSummary, classify_name};
pub use result::{Counts, ExecutionResult};
