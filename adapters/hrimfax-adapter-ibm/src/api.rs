//! IBM Quantum Platform REST client.
//!
//! Covers the slice of the Qiskit Runtime API the adapter needs: listing
//! devices, reading per-device configuration and status, session
//! open/close, sampler job submission, status polling, and results.

use std::fmt;

use reqwest::{Client, header};
use serde::Deserialize;

use hrimfax_ir::Circuit;

use crate::error::{IbmError, IbmResult};

/// Default IBM Quantum API endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://api.quantum-computing.ibm.com/runtime";

/// User-Agent sent with requests (Cloudflare blocks the default reqwest UA).
const USER_AGENT: &str = "hrimfax/0.4 (quantum-orchestrator)";

/// Authenticated HTTP client for the IBM Quantum API.
pub struct IbmClient {
    client: Client,
    endpoint: String,
    token: String,
}

impl fmt::Debug for IbmClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IbmClient")
            .field("endpoint", &self.endpoint)
            .field("token", &"[REDACTED]")
            .finish()
    }
}

impl IbmClient {
    /// Build a client with a bearer token baked into the default headers.
    pub fn new(endpoint: impl Into<String>, token: impl Into<String>) -> IbmResult<Self> {
        let token = token.into();

        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            header::HeaderValue::from_str(&format!("Bearer {token}"))
                .map_err(|_| IbmError::InvalidToken)?,
        );
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(60))
            .connect_timeout(std::time::Duration::from_secs(10))
            .build()?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
            token,
        })
    }

    /// Build a client from the `IBM_QUANTUM_TOKEN` environment variable.
    pub fn from_env() -> IbmResult<Self> {
        let token = std::env::var("IBM_QUANTUM_TOKEN").map_err(|_| IbmError::MissingToken)?;
        Self::new(DEFAULT_ENDPOINT, token)
    }

    /// List available device names.
    pub async fn list_devices(&self) -> IbmResult<Vec<String>> {
        let url = format!("{}/v1/backends", self.endpoint);
        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(api_error(response, "list backends").await);
        }

        let devices: DevicesResponse = response.json().await?;
        Ok(devices.devices.into_iter().map(|d| d.name).collect())
    }

    /// Fetch configuration and status for one device, merged.
    pub async fn get_device(&self, name: &str) -> IbmResult<DeviceInfo> {
        let config_url = format!("{}/v1/backends/{name}/configuration", self.endpoint);
        let config_response = self.client.get(&config_url).send().await?;

        if config_response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(IbmError::BackendUnavailable(name.to_string()));
        }
        if !config_response.status().is_success() {
            return Err(api_error(config_response, "backend configuration").await);
        }
        let config: DeviceConfigResponse = config_response.json().await?;

        let status_url = format!("{}/v1/backends/{name}/status", self.endpoint);
        let status_response = self.client.get(&status_url).send().await?;
        // A failed status fetch is not fatal; config succeeded, so assume
        // operational and let submission surface any real outage.
        let operational = if status_response.status().is_success() {
            let s: DeviceStatusResponse = status_response.json().await?;
            s.state
        } else {
            true
        };

        Ok(DeviceInfo {
            name: config.backend_name,
            num_qubits: config.n_qubits,
            basis_gates: config.basis_gates,
            max_shots: config.max_shots,
            operational,
        })
    }

    /// Open an execution session on a device.
    pub async fn open_session(&self, backend: &str) -> IbmResult<String> {
        let url = format!("{}/v1/sessions", self.endpoint);
        let body = serde_json::json!({ "backend": backend, "mode": "dedicated" });

        let response = self.client.post(&url).json(&body).send().await?;
        if !response.status().is_success() {
            return Err(api_error(response, "open session").await);
        }

        let session: SessionResponse = response.json().await?;
        Ok(session.id)
    }

    /// Close an execution session.
    pub async fn close_session(&self, session_id: &str) -> IbmResult<()> {
        let url = format!("{}/v1/sessions/{session_id}/close", self.endpoint);
        let response = self.client.delete(&url).send().await?;
        if !response.status().is_success() {
            return Err(api_error(response, "close session").await);
        }
        Ok(())
    }

    /// Submit a sampler job. The circuit travels as serialized IR; the
    /// platform-side transpiler handles physical mapping.
    pub async fn submit_sampler_job(
        &self,
        backend: &str,
        circuit: &Circuit,
        shots: u32,
        session_id: Option<&str>,
    ) -> IbmResult<String> {
        let url = format!("{}/v1/jobs", self.endpoint);
        let body = sampler_job_body(backend, circuit, shots, session_id)?;

        let response = self.client.post(&url).json(&body).send().await?;
        if !response.status().is_success() {
            return Err(api_error(response, "job submission").await);
        }

        let submit: SubmitResponse = response.json().await?;
        Ok(submit.id)
    }

    /// Poll job status.
    pub async fn get_job_status(&self, job_id: &str) -> IbmResult<JobStatusResponse> {
        let url = format!("{}/v1/jobs/{job_id}", self.endpoint);
        let response = self.client.get(&url).send().await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(IbmError::JobNotFound(job_id.to_string()));
        }
        if !response.status().is_success() {
            return Err(api_error(response, "job status").await);
        }

        Ok(response.json().await?)
    }

    /// Fetch results for a completed job.
    pub async fn get_job_results(&self, job_id: &str) -> IbmResult<JobResultResponse> {
        let url = format!("{}/v1/jobs/{job_id}/results", self.endpoint);
        let response = self.client.get(&url).send().await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(IbmError::JobNotFound(job_id.to_string()));
        }
        if !response.status().is_success() {
            return Err(api_error(response, "job results").await);
        }

        Ok(response.json().await?)
    }

    /// Cancel a job.
    pub async fn cancel_job(&self, job_id: &str) -> IbmResult<()> {
        let url = format!("{}/v1/jobs/{job_id}/cancel", self.endpoint);
        let response = self.client.post(&url).send().await?;
        if !response.status().is_success() {
            return Err(api_error(response, "job cancel").await);
        }
        Ok(())
    }
}

/// Build the sampler submission body. Jobs carry their session id so the
/// runtime schedules them inside the reserved window.
fn sampler_job_body(
    backend: &str,
    circuit: &Circuit,
    shots: u32,
    session_id: Option<&str>,
) -> IbmResult<serde_json::Value> {
    let mut body = serde_json::json!({
        "program_id": "sampler",
        "backend": backend,
        "params": {
            "circuit": serde_json::to_value(circuit)?,
            "shots": shots,
        }
    });
    if let Some(session) = session_id {
        body["session_id"] = serde_json::json!(session);
    }
    Ok(body)
}

/// Turn a non-success response into an [`IbmError::Api`], keeping the body
/// text when it is not structured.
async fn api_error(response: reqwest::Response, context: &str) -> IbmError {
    let status = response.status();
    let body = response.text().await.unwrap_or_else(|_| "no body".into());
    match serde_json::from_str::<ApiErrorResponse>(&body) {
        Ok(err) => IbmError::Api {
            code: err.code,
            message: format!("{context}: {}", err.message),
        },
        Err(_) => IbmError::Api {
            code: None,
            message: format!("{context} returned {status}: {body}"),
        },
    }
}

/// Structured API error body.
#[derive(Debug, Deserialize)]
struct ApiErrorResponse {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: String,
}

#[derive(Debug, Deserialize)]
struct DevicesResponse {
    devices: Vec<DeviceEntry>,
}

#[derive(Debug, Deserialize)]
struct DeviceEntry {
    name: String,
}

#[derive(Debug, Deserialize)]
struct DeviceConfigResponse {
    backend_name: String,
    n_qubits: u32,
    #[serde(default)]
    basis_gates: Vec<String>,
    #[serde(default)]
    max_shots: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct DeviceStatusResponse {
    state: bool,
}

#[derive(Debug, Deserialize)]
struct SessionResponse {
    id: String,
}

#[derive(Debug, Deserialize)]
struct SubmitResponse {
    id: String,
}

/// Merged device configuration and status.
#[derive(Debug, Clone)]
pub struct DeviceInfo {
    /// Device name, e.g. `ibm_torino`.
    pub name: String,
    /// Addressable qubits.
    pub num_qubits: u32,
    /// Native gate names.
    pub basis_gates: Vec<String>,
    /// Per-job shot ceiling, when reported.
    pub max_shots: Option<u32>,
    /// Whether the device is accepting jobs.
    pub operational: bool,
}

/// Job status payload.
#[derive(Debug, Clone, Deserialize)]
pub struct JobStatusResponse {
    /// Job ID.
    pub id: String,
    /// Status string; case varies across API revisions.
    pub status: String,
    /// Failure reason, when terminal-failed.
    #[serde(default)]
    pub reason: Option<String>,
}

impl JobStatusResponse {
    fn normalized(&self) -> String {
        self.status.to_uppercase()
    }

    /// True once the job can no longer change state.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self.normalized().as_str(),
            "COMPLETED" | "FAILED" | "CANCELLED" | "ERROR"
        )
    }

    /// True for a successful completion.
    pub fn is_completed(&self) -> bool {
        self.normalized() == "COMPLETED"
    }

    /// True for a failed run.
    pub fn is_failed(&self) -> bool {
        matches!(self.normalized().as_str(), "FAILED" | "ERROR")
    }

    /// True when the job was cancelled.
    pub fn is_cancelled(&self) -> bool {
        self.normalized() == "CANCELLED"
    }
}

/// Job result payload: per-shot samples as hex strings.
#[derive(Debug, Deserialize)]
pub struct JobResultResponse {
    /// One entry per submitted circuit; the adapter submits exactly one.
    pub results: Vec<SamplerResult>,
}

/// Sampler output for one circuit.
#[derive(Debug, Deserialize)]
pub struct SamplerResult {
    /// Raw measurement samples, one hex string per shot (`"0x3"`).
    #[serde(default)]
    pub samples: Vec<String>,
}
