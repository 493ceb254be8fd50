//! Local statevector simulator backend.

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use rustc_hash::FxHashMap;
use tokio::sync::Mutex;
use tracing::{debug, instrument};

use hrimfax_hal::{
    Backend, BackendAvailability, Capabilities, Counts, ExecutionResult, HalError, HalResult, Job,
    JobId, JobStatus, ValidationResult,
};
use hrimfax_ir::{Circuit, Op};

use crate::statevector::{Statevector, outcome_to_bitstring};

/// Maximum qubits before the 2^n amplitude vector becomes unreasonable.
pub(crate) const MAX_QUBITS: u32 = 20;

/// How the simulator evolves the state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimulationMethod {
    /// Pick a method from the circuit; currently always statevector.
    Automatic,
    /// Dense statevector evolution.
    Statevector,
}

struct CachedJob {
    job: Job,
    result: Option<ExecutionResult>,
}

/// A local simulator implementing the full [`Backend`] lifecycle inline:
/// `submit` runs the circuit to completion before returning, so `status`
/// is immediately `Completed`.
pub struct SimulatorBackend {
    capabilities: Capabilities,
    method: SimulationMethod,
    jobs: Arc<Mutex<FxHashMap<String, CachedJob>>>,
}

impl SimulatorBackend {
    /// Create a simulator under the default `aer_simulator` name.
    pub fn new() -> Self {
        Self::named("aer_simulator", SimulationMethod::Automatic)
    }

    /// Create a simulator registered under a specific logical name.
    ///
    /// The registry exposes several names (`aer_simulator`,
    /// `statevector_simulator`, `qasm_simulator`) over the same engine;
    /// only the configured method differs.
    pub fn named(name: impl Into<String>, method: SimulationMethod) -> Self {
        Self {
            capabilities: Capabilities::simulator(name, MAX_QUBITS),
            method,
            jobs: Arc::new(Mutex::new(FxHashMap::default())),
        }
    }

    /// The configured simulation method.
    pub fn method(&self) -> SimulationMethod {
        self.method
    }

    /// Evolve the circuit once and sample `shots` outcomes.
    ///
    /// Measurements in this IR are terminal (no mid-circuit collapse
    /// feeding back into gates), so one evolution followed by repeated
    /// sampling of the final state is exact.
    fn run_simulation(circuit: &Circuit, shots: u32) -> HalResult<Counts> {
        let mut state = Statevector::new(circuit.num_qubits() as usize);
        for op in circuit.ops() {
            state.apply(op)?;
        }

        // Measured qubit → classical bit mapping. Without measurements the
        // whole register is read out directly.
        let mapping: Vec<(usize, usize)> = circuit
            .ops()
            .iter()
            .filter_map(|op| match op {
                Op::Measure { qubit, clbit } => Some((qubit.0 as usize, clbit.0 as usize)),
                _ => None,
            })
            .collect();

        let mut counts = Counts::new();
        for _ in 0..shots {
            let outcome = state.sample();
            let bitstring = if mapping.is_empty() {
                outcome_to_bitstring(outcome, circuit.num_qubits() as usize)
            } else {
                let width = circuit.num_clbits() as usize;
                let mut bits = vec![b'0'; width];
                for &(qubit, clbit) in &mapping {
                    if (outcome >> qubit) & 1 == 1 {
                        bits[width - 1 - clbit] = b'1';
                    }
                }
                String::from_utf8(bits).unwrap_or_default()
            };
            counts.record(bitstring);
        }
        Ok(counts)
    }
}

impl Default for SimulatorBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Backend for SimulatorBackend {
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
        let mut reasons = Vec::new();
        if circuit.num_qubits() > self.capabilities.num_qubits {
            reasons.push(format!(
                "Circuit has {} qubits but simulator supports {}",
                circuit.num_qubits(),
                self.capabilities.num_qubits
            ));
        }
        if let Some(name) = circuit.first_unbound() {
            reasons.push(format!("Unbound parameter '{name}'"));
        }
        if reasons.is_empty() {
            Ok(ValidationResult::Valid)
        } else {
            Ok(ValidationResult::Invalid { reasons })
        }
    }

    #[instrument(skip(self, circuit), fields(backend = %self.name()))]
    async fn submit(&self, circuit: &Circuit, shots: u32) -> HalResult<JobId> {
        if circuit.num_qubits() > self.capabilities.num_qubits {
            return Err(HalError::CircuitTooLarge(format!(
                "{} qubits exceeds simulator limit of {}",
                circuit.num_qubits(),
                self.capabilities.num_qubits
            )));
        }
        if let Some(name) = circuit.first_unbound() {
            return Err(HalError::UnboundParameter(name));
        }

        let job_id = JobId::generate();
        debug!(job = %job_id, shots, "running circuit inline");

        let start = Instant::now();
        let counts = Self::run_simulation(circuit, shots)?;
        let elapsed_ms = start.elapsed().as_millis() as u64;

        let result = ExecutionResult::new(counts, shots).with_execution_time(elapsed_ms);
        let job = Job::new(job_id.clone(), shots)
            .with_backend(self.name())
            .with_status(JobStatus::Completed);

        let mut jobs = self.jobs.lock().await;
        jobs.insert(
            job_id.0.clone(),
            CachedJob {
                job,
                result: Some(result),
            },
        );
        Ok(job_id)
    }

    async fn status(&self, job_id: &JobId) -> HalResult<JobStatus> {
        let jobs = self.jobs.lock().await;
        jobs.get(&job_id.0)
            .map(|cached| cached.job.status.clone())
            .ok_or_else(|| HalError::JobNotFound(job_id.0.clone()))
    }

    async fn result(&self, job_id: &JobId) -> HalResult<ExecutionResult> {
        let jobs = self.jobs.lock().await;
        let cached = jobs
            .get(&job_id.0)
            .ok_or_else(|| HalError::JobNotFound(job_id.0.clone()))?;
        cached
            .result
            .clone()
            .ok_or_else(|| HalError::JobFailed("No result available".into()))
    }

    async fn cancel(&self, job_id: &JobId) -> HalResult<()> {
        // Inline execution: by the time a job id exists the job is done.
        let jobs = self.jobs.lock().await;
        if jobs.contains_key(&job_id.0) {
            Ok(())
        } else {
            Err(HalError::JobNotFound(job_id.0.clone()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hrimfax_ir::CircuitBuilder;
    use hrimfax_templates::{bell_state, ghz_state};

    #[tokio::test]
    async fn test_bell_counts_are_correlated() {
        let backend = SimulatorBackend::new();
        let circuit = bell_state(true).unwrap();

        let job_id = backend.submit(&circuit, 1000).await.unwrap();
        let result = backend.wait(&job_id).await.unwrap();

        assert_eq!(result.counts.get("00") + result.counts.get("11"), 1000);
        assert_eq!(result.counts.get("01"), 0);
        assert_eq!(result.counts.get("10"), 0);
    }

    #[tokio::test]
    async fn test_ghz_counts() {
        let backend = SimulatorBackend::new();
        let circuit = ghz_state(3, true).unwrap();

        let job_id = backend.submit(&circuit, 500).await.unwrap();
        let result = backend.result(&job_id).await.unwrap();

        assert_eq!(result.counts.get("000") + result.counts.get("111"), 500);
    }

    #[tokio::test]
    async fn test_unmeasured_circuit_reads_full_register() {
        let backend = SimulatorBackend::new();
        let mut b = CircuitBuilder::new("x", 2, 0);
        b.x(0).unwrap();
        let circuit = b.build();

        let job_id = backend.submit(&circuit, 100).await.unwrap();
        let result = backend.result(&job_id).await.unwrap();
        // qubit 0 set → bitstring "01" big-endian
        assert_eq!(result.counts.get("01"), 100);
    }

    #[tokio::test]
    async fn test_partial_measurement_maps_clbits() {
        let backend = SimulatorBackend::new();
        let mut b = CircuitBuilder::new("partial", 3, 1);
        b.x(2).unwrap();
        b.measure(2, 0).unwrap();
        let circuit = b.build();

        let job_id = backend.submit(&circuit, 50).await.unwrap();
        let result = backend.result(&job_id).await.unwrap();
        assert_eq!(result.counts.get("1"), 50);
    }

    #[tokio::test]
    async fn test_too_large_circuit_rejected() {
        let backend = SimulatorBackend::new();
        let circuit = ghz_state(MAX_QUBITS + 1, false).unwrap();
        let err = backend.submit(&circuit, 10).await.unwrap_err();
        assert!(matches!(err, HalError::CircuitTooLarge(_)));
    }

    #[tokio::test]
    async fn test_unbound_parameter_rejected() {
        let backend = SimulatorBackend::new();
        let mut b = CircuitBuilder::new("var", 1, 0);
        b.rx(0, "theta").unwrap();
        let err = backend.submit(&b.build(), 10).await.unwrap_err();
        assert!(matches!(err, HalError::UnboundParameter(name) if name == "theta"));
    }

    #[tokio::test]
    async fn test_unknown_job() {
        let backend = SimulatorBackend::new();
        let err = backend.status(&JobId::new("nope")).await.unwrap_err();
        assert!(matches!(err, HalError::JobNotFound(_)));
    }
}
