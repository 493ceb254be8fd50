//! IBM Quantum backend implementation.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::{debug, instrument};

use hrimfax_hal::{
    Backend, BackendAvailability, Capabilities, Counts, ExecutionResult, HalError, HalResult,
    JobId, JobStatus, SessionHandle, ValidationResult,
};
use hrimfax_ir::Circuit;

use crate::api::{DeviceInfo, IbmClient, JobResultResponse};
use crate::error::{IbmError, IbmResult};

/// A single IBM Quantum device, driven through the Runtime API.
///
/// Remote execution is session-scoped: the dispatcher opens a session,
/// submits into it, and closes it on every exit path via the
/// [`Backend::open_session`] / [`Backend::close_session`] overrides. The
/// open session id is kept on the backend so every submission between
/// open and close lands inside it.
pub struct IbmBackend {
    client: Arc<IbmClient>,
    target: String,
    capabilities: Capabilities,
    active_session: Mutex<Option<String>>,
}

impl IbmBackend {
    /// Wrap a discovered device.
    pub fn from_device(client: Arc<IbmClient>, info: &DeviceInfo) -> Self {
        Self {
            capabilities: Capabilities::hardware(
                &info.name,
                info.num_qubits,
                info.max_shots.unwrap_or(100_000),
                info.basis_gates.iter().cloned(),
            ),
            target: info.name.clone(),
            client,
            active_session: Mutex::new(None),
        }
    }

    /// Connect to a named device, reading the token from
    /// `IBM_QUANTUM_TOKEN`.
    pub async fn connect(target: impl Into<String>) -> IbmResult<Self> {
        let client = Arc::new(IbmClient::from_env()?);
        let info = client.get_device(&target.into()).await?;
        Ok(Self::from_device(client, &info))
    }

    /// The targeted device name.
    pub fn target(&self) -> &str {
        &self.target
    }

    /// The id of the currently open execution session, if any.
    pub async fn current_session(&self) -> Option<String> {
        self.active_session.lock().await.clone()
    }

    /// Aggregate per-shot hex samples into counts.
    ///
    /// Bitstring width is inferred from the largest sample, so leading
    /// zeros survive for every outcome the job actually produced.
    fn results_to_counts(results: &JobResultResponse) -> Counts {
        let mut counts = Counts::new();
        if let Some(result) = results.results.first() {
            let width = infer_bit_width(&result.samples);
            let mut aggregated: HashMap<String, u64> = HashMap::new();
            for sample in &result.samples {
                *aggregated.entry(hex_to_binary(sample, width)).or_insert(0) += 1;
            }
            for (bitstring, count) in aggregated {
                counts.insert(bitstring, count);
            }
        }
        counts
    }
}

/// Minimum bits needed to represent the largest sample; 1 when all shots
/// came back zero.
fn infer_bit_width(samples: &[String]) -> usize {
    let max_val = samples
        .iter()
        .filter_map(|s| {
            let hex = s.strip_prefix("0x").unwrap_or(s);
            u64::from_str_radix(hex, 16).ok()
        })
        .max()
        .unwrap_or(0);

    if max_val == 0 {
        1
    } else {
        64 - max_val.leading_zeros() as usize
    }
}

/// Convert a hex sample to a zero-padded binary string of `width` bits.
fn hex_to_binary(hex: &str, width: usize) -> String {
    let hex = hex.strip_prefix("0x").unwrap_or(hex);
    match u64::from_str_radix(hex, 16) {
        Ok(value) => format!("{value:0>width$b}"),
        // Not hex: assume the API already sent binary.
        Err(_) => hex.to_string(),
    }
}

#[async_trait]
impl Backend for IbmBackend {
    fn name(&self) -> &str {
        &self.target
    }

    fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }

    async fn availability(&self) -> HalResult<BackendAvailability> {
        match self.client.get_device(&self.target).await {
            Ok(info) if info.operational => Ok(BackendAvailability {
                is_available: true,
                queue_depth: None,
                estimated_wait: None,
                status_message: None,
            }),
            Ok(_) => Ok(BackendAvailability::unavailable("device offline")),
            Err(e) => {
                tracing::warn!(target = %self.target, "availability check failed: {e}");
                Ok(BackendAvailability::unavailable("failed to query device"))
            }
        }
    }

    async fn validate(&self, circuit: &Circuit) -> HalResult<ValidationResult> {
        let caps = self.capabilities();
        if circuit.num_qubits() > caps.num_qubits {
            return Ok(ValidationResult::Invalid {
                reasons: vec![format!(
                    "circuit requires {} qubits but device has {}",
                    circuit.num_qubits(),
                    caps.num_qubits
                )],
            });
        }

        let foreign: Vec<String> = circuit
            .ops()
            .iter()
            .filter_map(|op| op.as_gate())
            .map(|g| g.name().to_string())
            .filter(|name| !caps.gate_set.contains(name))
            .collect();

        if foreign.is_empty() {
            Ok(ValidationResult::Valid)
        } else {
            Ok(ValidationResult::RequiresLowering {
                details: format!("non-native gates: {}", foreign.join(", ")),
            })
        }
    }

    #[instrument(skip(self, circuit), fields(target = %self.target))]
    async fn submit(&self, circuit: &Circuit, shots: u32) -> HalResult<JobId> {
        if circuit.num_qubits() > self.capabilities.num_qubits {
            return Err(IbmError::TooManyQubits {
                required: circuit.num_qubits(),
                available: self.capabilities.num_qubits,
            }
            .into());
        }

        let session = self.current_session().await;
        let job_id = self
            .client
            .submit_sampler_job(&self.target, circuit, shots, session.as_deref())
            .await
            .map_err(|e| HalError::SubmissionFailed(e.to_string()))?;

        debug!(job_id = %job_id, shots, session = ?session, "submitted sampler job");
        Ok(JobId(job_id))
    }

    async fn status(&self, job_id: &JobId) -> HalResult<JobStatus> {
        let status = self.client.get_job_status(&job_id.0).await?;

        Ok(match status.status.to_uppercase().as_str() {
            "QUEUED" => JobStatus::Queued,
            "COMPLETED" => JobStatus::Completed,
            "FAILED" | "ERROR" => JobStatus::Failed(
                status.reason.unwrap_or_else(|| "unknown error".to_string()),
            ),
            "CANCELLED" => JobStatus::Cancelled,
            // VALIDATING, RUNNING, and anything the API adds later.
            _ => JobStatus::Running,
        })
    }

    async fn result(&self, job_id: &JobId) -> HalResult<ExecutionResult> {
        let status = self.client.get_job_status(&job_id.0).await?;
        if !status.is_completed() {
            if status.is_failed() {
                return Err(HalError::JobFailed(
                    status.reason.unwrap_or_else(|| "job failed".to_string()),
                ));
            }
            if status.is_cancelled() {
                return Err(HalError::JobCancelled);
            }
            return Err(HalError::Backend(format!(
                "job {} not yet completed",
                job_id.0
            )));
        }

        let results = self.client.get_job_results(&job_id.0).await?;
        let counts = Self::results_to_counts(&results);
        let shots = u32::try_from(counts.total_shots()).unwrap_or(u32::MAX);
        Ok(ExecutionResult::new(counts, shots))
    }

    async fn cancel(&self, job_id: &JobId) -> HalResult<()> {
        self.client
            .cancel_job(&job_id.0)
            .await
            .map_err(|e| HalError::Backend(e.to_string()))?;
        Ok(())
    }

    async fn open_session(&self) -> HalResult<Option<SessionHandle>> {
        let id = self
            .client
            .open_session(&self.target)
            .await
            .map_err(|e| HalError::Backend(format!("open session: {e}")))?;
        *self.active_session.lock().await = Some(id.clone());
        debug!(session = %id, target = %self.target, "opened execution session");
        Ok(Some(SessionHandle(id)))
    }

    async fn close_session(&self, session: SessionHandle) -> HalResult<()> {
        // Stop routing submissions into the session before the remote
        // close; a failed close must not leave a stale id behind.
        self.active_session.lock().await.take();
        self.client
            .close_session(&session.0)
            .await
            .map_err(|e| HalError::Backend(format!("close session: {e}")))?;
        debug!(session = %session, "closed execution session");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::SamplerResult;

    fn offline_backend() -> IbmBackend {
        let client = Arc::new(IbmClient::new("https://host.invalid", "token").unwrap());
        let info = DeviceInfo {
            name: "ibm_test".into(),
            num_qubits: 5,
            basis_gates: vec!["cz".into(), "rz".into(), "sx".into(), "x".into()],
            max_shots: Some(4096),
            operational: true,
        };
        IbmBackend::from_device(client, &info)
    }

    #[tokio::test]
    async fn test_open_session_is_visible_to_submission() {
        let backend = offline_backend();
        assert_eq!(backend.current_session().await, None);

        // Submission reads the stored id; seed it the way open_session does.
        *backend.active_session.lock().await = Some("cx-1".into());
        assert_eq!(backend.current_session().await, Some("cx-1".to_string()));
    }

    #[tokio::test]
    async fn test_close_session_clears_stored_id_even_on_failure() {
        let backend = offline_backend();
        *backend.active_session.lock().await = Some("cx-1".into());

        // The remote close cannot be reached; the stored id must still go.
        let outcome = backend.close_session(SessionHandle("cx-1".into())).await;
        assert!(outcome.is_err());
        assert_eq!(backend.current_session().await, None);
    }

    #[test]
    fn test_hex_to_binary_pads_to_width() {
        assert_eq!(hex_to_binary("0x0", 2), "00");
        assert_eq!(hex_to_binary("0x3", 2), "11");
        assert_eq!(hex_to_binary("0x3", 4), "0011");
        assert_eq!(hex_to_binary("0x1", 5), "00001");
    }

    #[test]
    fn test_hex_to_binary_passes_through_non_hex() {
        assert_eq!(hex_to_binary("01z", 3), "01z");
    }

    #[test]
    fn test_infer_bit_width() {
        assert_eq!(infer_bit_width(&["0x0".into(), "0x3".into()]), 2);
        assert_eq!(infer_bit_width(&["0x0".into(), "0x7".into()]), 3);
        assert_eq!(infer_bit_width(&["0x0".into(), "0x0".into()]), 1);
    }

    #[test]
    fn test_results_to_counts_aggregates_samples() {
        let results = JobResultResponse {
            results: vec![SamplerResult {
                samples: vec![
                    "0x0".into(),
                    "0x3".into(),
                    "0x0".into(),
                    "0x3".into(),
                    "0x0".into(),
                ],
            }],
        };
        let counts = IbmBackend::results_to_counts(&results);
        assert_eq!(counts.get("00"), 3);
        assert_eq!(counts.get("11"), 2);
        assert_eq!(counts.total_shots(), 5);
    }

    #[test]
    fn test_results_to_counts_empty() {
        let results = JobResultResponse { results: vec![] };
        let counts = IbmBackend::results_to_counts(&results);
        assert_eq!(counts.total_shots(), 0);
    }
}
