//! The execution dispatcher: one entry point from circuit to counts.

use std::sync::Arc;

use tracing::{debug, instrument, warn};

use hrimfax_hal::{Backend, BackendRegistry, ExecutionResult, HalError, HalResult, JobId};
use hrimfax_ir::Circuit;

use crate::lower::lower;

/// Routes circuits to backends resolved from a registry.
///
/// `run` is strictly sequential: validate, resolve, lower (local targets),
/// submit, wait. There is no retry policy — collaborator failures
/// propagate unchanged to the caller.
pub struct Dispatcher {
    registry: BackendRegistry,
}

impl Dispatcher {
    /// Wrap an initialized registry.
    pub fn new(registry: BackendRegistry) -> Self {
        Self { registry }
    }

    /// The wrapped registry.
    pub fn registry(&self) -> &BackendRegistry {
        &self.registry
    }

    /// Execute `circuit` on the named backend and wait for counts.
    ///
    /// Validation order is part of the contract:
    ///
    /// 1. `shots <= 0` fails with [`HalError::InvalidShots`] before any
    ///    registry or backend call — shots are signed precisely so a
    ///    negative request is representable and rejected, not clamped;
    /// 2. unknown backend name fails with [`HalError::BackendNotFound`]
    ///    listing every registered name;
    /// 3. a symbolic parameter fails with [`HalError::UnboundParameter`]
    ///    naming the first unbound symbol in operation order.
    ///
    /// Local simulators get the lowering pass at `optimization_level`;
    /// remote targets are submitted as-is inside a session that is closed
    /// on every exit path.
    #[instrument(skip(self, circuit), fields(backend = backend_name, shots))]
    pub async fn run(
        &self,
        circuit: &Circuit,
        backend_name: &str,
        shots: i64,
        optimization_level: u8,
    ) -> HalResult<ExecutionResult> {
        if shots <= 0 {
            return Err(HalError::InvalidShots(format!(
                "shots must be positive, got {shots}"
            )));
        }
        let shots = u32::try_from(shots)
            .map_err(|_| HalError::InvalidShots(format!("shots {shots} exceeds {}", u32::MAX)))?;

        let backend = self.registry.get(backend_name)?;

        if let Some(name) = circuit.first_unbound() {
            return Err(HalError::UnboundParameter(name));
        }

        if backend.capabilities().is_simulator {
            let lowered = lower(circuit, backend.capabilities(), optimization_level)?;
            debug!(ops = lowered.num_ops(), "dispatching to local simulator");
            submit_and_wait(backend.as_ref(), &lowered, shots).await
        } else {
            self.run_remote(backend, circuit, shots).await
        }
    }

    /// Remote execution: session open, submit/wait, session close.
    ///
    /// The close runs on success and on failure; a close error after a
    /// successful execution is logged rather than clobbering the result.
    async fn run_remote(
        &self,
        backend: Arc<dyn Backend>,
        circuit: &Circuit,
        shots: u32,
    ) -> HalResult<ExecutionResult> {
        let session = backend.open_session().await?;
        let outcome = submit_and_wait(backend.as_ref(), circuit, shots).await;

        if let Some(handle) = session {
            if let Err(e) = backend.close_session(handle).await {
                warn!("failed to close execution session: {e}");
            }
        }
        outcome
    }
}

async fn submit_and_wait(
    backend: &dyn Backend,
    circuit: &Circuit,
    shots: u32,
) -> HalResult<ExecutionResult> {
    let job_id: JobId = backend.submit(circuit, shots).await?;
    backend.wait(&job_id).await
}
