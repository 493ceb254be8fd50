//! Deterministic fake backend for tests and dry runs.

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use async_trait::async_trait;
use rustc_hash::FxHashMap;
use tokio::sync::Mutex;

use hrimfax_hal::{
    Backend, BackendAvailability, Capabilities, Counts, ExecutionResult, HalError, HalResult,
    JobId, JobStatus, ValidationResult,
};
use hrimfax_ir::Circuit;

/// A backend that never simulates anything: every shot reads out all
/// zeros. Fixed 27-qubit capability, instant completion.
///
/// Useful in two roles: a stand-in for hardware in demos, and a call spy
/// in tests — [`submission_count`](Self::submission_count) reports how many
/// times `submit` was reached, which lets a test assert that fail-fast
/// validation really happened before any backend call.
pub struct FakeBackend {
    capabilities: Capabilities,
    submissions: AtomicU32,
    results: Arc<Mutex<FxHashMap<String, ExecutionResult>>>,
}

impl FakeBackend {
    /// Create a fake backend under the standard `fake_backend` name.
    pub fn new() -> Self {
        Self {
            capabilities: Capabilities::simulator("fake_backend", 27),
            submissions: AtomicU32::new(0),
            results: Arc::new(Mutex::new(FxHashMap::default())),
        }
    }

    /// Number of times `submit` has been called on this instance.
    pub fn submission_count(&self) -> u32 {
        self.submissions.load(Ordering::SeqCst)
    }

    fn all_zeros(circuit: &Circuit, shots: u32) -> Counts {
        let width = if circuit.has_measurements() {
            circuit.num_clbits()
        } else {
            circuit.num_qubits()
        } as usize;
        let mut counts = Counts::new();
        counts.insert("0".repeat(width), u64::from(shots));
        counts
    }
}

impl Default for FakeBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Backend for FakeBackend {
    fn name(&self) -> &str {
        &self.capabilities.name
    }

    fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }

    async fn availability(&self) -> HalResult<BackendAvailability> {
        Ok(BackendAvailability::always_available())
    }

    async fn validate(&self, circuit: &Circuit) -> HalResult<ValidationResult> {
        if circuit.num_qubits() > self.capabilities.num_qubits {
            return Ok(ValidationResult::Invalid {
                reasons: vec![format!(
                    "Circuit has {} qubits but fake backend supports {}",
                    circuit.num_qubits(),
                    self.capabilities.num_qubits
                )],
            });
        }
        Ok(ValidationResult::Valid)
    }

    async fn submit(&self, circuit: &Circuit, shots: u32) -> HalResult<JobId> {
        self.submissions.fetch_add(1, Ordering::SeqCst);
        let job_id = JobId::generate();
        let result = ExecutionResult::new(Self::all_zeros(circuit, shots), shots)
            .with_execution_time(0);
        self.results.lock().await.insert(job_id.0.clone(), result);
        Ok(job_id)
    }

    async fn status(&self, job_id: &JobId) -> HalResult<JobStatus> {
        let results = self.results.lock().await;
        if results.contains_key(&job_id.0) {
            Ok(JobStatus::Completed)
        } else {
            Err(HalError::JobNotFound(job_id.0.clone()))
        }
    }

    async fn result(&self, job_id: &JobId) -> HalResult<ExecutionResult> {
        let results = self.results.lock().await;
        results
            .get(&job_id.0)
            .cloned()
            .ok_or_else(|| HalError::JobNotFound(job_id.0.clone()))
    }

    async fn cancel(&self, job_id: &JobId) -> HalResult<()> {
        let results = self.results.lock().await;
        if results.contains_key(&job_id.0) {
            Ok(())
        } else {
            Err(HalError::JobNotFound(job_id.0.clone()))
        }
    }
}
