//! Job identifiers and lifecycle status.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Opaque identifier for a submitted job.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JobId(pub String);

impl JobId {
    /// Wrap an existing identifier (e.g. one assigned by a remote service).
    pub fn new(id: impl Into<String>) -> Self {
        JobId(id.into())
    }

    /// Generate a fresh random identifier for locally executed jobs.
    pub fn generate() -> Self {
        JobId(Uuid::new_v4().to_string())
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle status of a job.
///
/// `Queued → Running → {Completed, Failed, Cancelled}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobStatus {
    /// Accepted, waiting to execute.
    Queued,
    /// Currently executing.
    Running,
    /// Finished successfully; results are available.
    Completed,
    /// Finished with an error.
    Failed(String),
    /// Cancelled before completion.
    Cancelled,
}

impl JobStatus {
    /// True once the job can no longer change state.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            JobStatus::Completed | JobStatus::Failed(_) | JobStatus::Cancelled
        )
    }

    /// True while the job is queued or running.
    pub fn is_pending(&self) -> bool {
        !self.is_terminal()
    }
}

/// A submitted job with its metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    /// The job identifier.
    pub id: JobId,
    /// Current status.
    pub status: JobStatus,
    /// Requested shot count.
    pub shots: u32,
    /// Backend the job ran on, if known.
    pub backend: Option<String>,
    /// Submission time.
    pub created_at: DateTime<Utc>,
    /// Last status change.
    pub updated_at: DateTime<Utc>,
}

impl Job {
    /// Create a freshly queued job.
    pub fn new(id: JobId, shots: u32) -> Self {
        let now = Utc::now();
        Self {
            id,
            status: JobStatus::Queued,
            shots,
            backend: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Attach the backend name.
    pub fn with_backend(mut self, backend: impl Into<String>) -> Self {
        self.backend = Some(backend.into());
        self
    }

    /// Transition to a new status, refreshing the update timestamp.
    pub fn with_status(mut self, status: JobStatus) -> Self {
        self.status = status;
        self.updated_at = Utc::now();
        self
    }
}
