//! Backend registry: process-scoped name → backend mapping.

use std::sync::Arc;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::backend::Backend;
use crate::error::{HalError, HalResult};

/// Read-only capability summary returned by [`BackendRegistry::describe`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendSummary {
    /// Logical backend name.
    pub name: String,
    /// Number of addressable qubits.
    pub num_qubits: u32,
    /// Maximum shots per submission.
    pub max_shots: u32,
    /// Simulator classification derived from [`classify_name`].
    pub is_simulator: bool,
    /// Native gate names.
    pub native_gates: Vec<String>,
}

/// Classify a backend name as simulator or hardware.
///
/// Labeled simplification: a name containing `"sim"` or `"fake"` counts as
/// a simulator, everything else as hardware. This is a pure function of
/// the string — a renamed simulator will be misclassified, and that is
/// accepted.
pub fn classify_name(name: &str) -> bool {
    name.contains("sim") || name.contains("fake")
}

/// Ordered registry of execution backends.
///
/// Populated once at process start and read-only afterward; mutation only
/// via explicit re-initialization. [`list`](Self::list) preserves
/// registration order so enumeration is reproducible.
#[derive(Default)]
pub struct BackendRegistry {
    order: Vec<String>,
    backends: FxHashMap<String, Arc<dyn Backend>>,
}

impl BackendRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a backend under its own reported name.
    ///
    /// Re-registering a name replaces the backend but keeps its original
    /// position in the listing order.
    pub fn register(&mut self, backend: Arc<dyn Backend>) {
        self.register_named(backend.name().to_string(), backend);
    }

    /// Register a backend under an explicit logical name.
    pub fn register_named(&mut self, name: String, backend: Arc<dyn Backend>) {
        debug!(backend = %name, "registering backend");
        if !self.backends.contains_key(&name) {
            self.order.push(name.clone());
        }
        self.backends.insert(name, backend);
    }

    /// Look up a backend by name.
    ///
    /// # Errors
    ///
    /// Returns [`HalError::BackendNotFound`] listing every registered name
    /// when `name` is absent.
    pub fn get(&self, name: &str) -> HalResult<Arc<dyn Backend>> {
        self.backends
            .get(name)
            .cloned()
            .ok_or_else(|| HalError::BackendNotFound {
                name: name.to_string(),
                known: self.order.join(", "),
            })
    }

    /// All registered names, in registration order.
    pub fn list(&self) -> Vec<String> {
        self.order.clone()
    }

    /// True if `name` is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.backends.contains_key(name)
    }

    /// Number of registered backends.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// True if no backends are registered.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Read-only capability summary for one backend.
    ///
    /// The simulator flag comes from [`classify_name`], not from the
    /// backend's own capabilities — see that function for the caveat.
    pub fn describe(&self, name: &str) -> HalResult<BackendSummary> {
        let backend = self.get(name)?;
        let caps = backend.capabilities();
        Ok(BackendSummary {
            name: name.to_string(),
            num_qubits: caps.num_qubits,
            max_shots: caps.max_shots,
            is_simulator: classify_name(name),
            native_gates: caps.gate_set.native.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{BackendAvailability, ValidationResult};
    use crate::capability::Capabilities;
    use crate::job::{JobId, JobStatus};
    use crate::result::ExecutionResult;
    use async_trait::async_trait;
    use hrimfax_ir::Circuit;

    struct StubBackend {
        caps: Capabilities,
    }

    impl StubBackend {
        fn new(name: &str) -> Self {
            Self {
                caps: Capabilities::simulator(name, 5),
            }
        }
    }

    #[async_trait]
    impl Backend for StubBackend {
        fn name(&self) -> &str {
            &self.caps.name
        }
        fn capabilities(&self) -> &Capabilities {
            &self.caps
        }
        async fn availability(&self) -> HalResult<BackendAvailability> {
            Ok(BackendAvailability::always_available())
        }
        async fn validate(&self, _circuit: &Circuit) -> HalResult<ValidationResult> {
            Ok(ValidationResult::Valid)
        }
        async fn submit(&self, _circuit: &Circuit, _shots: u32) -> HalResult<JobId> {
            Ok(JobId::generate())
        }
        async fn status(&self, _job_id: &JobId) -> HalResult<JobStatus> {
            Ok(JobStatus::Completed)
        }
        async fn result(&self, _job_id: &JobId) -> HalResult<ExecutionResult> {
            Ok(ExecutionResult::new(crate::result::Counts::new(), 0))
        }
        async fn cancel(&self, _job_id: &JobId) -> HalResult<()> {
            Ok(())
        }
    }

    #[test]
    fn test_list_preserves_registration_order() {
        let mut registry = BackendRegistry::new();
        registry.register(Arc::new(StubBackend::new("zeta")));
        registry.register(Arc::new(StubBackend::new("alpha")));
        registry.register(Arc::new(StubBackend::new("mid")));
        assert_eq!(registry.list(), vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_get_unknown_lists_known_names() {
        let mut registry = BackendRegistry::new();
        registry.register(Arc::new(StubBackend::new("aer_simulator")));
        registry.register(Arc::new(StubBackend::new("fake_backend")));

        let err = registry.get("does_not_exist").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("does_not_exist"));
        assert!(msg.contains("aer_simulator"));
        assert!(msg.contains("fake_backend"));
    }

    #[test]
    fn test_classify_name_heuristic() {
        assert!(classify_name("aer_simulator"));
        assert!(classify_name("statevector_simulator"));
        assert!(classify_name("fake_backend"));
        assert!(!classify_name("ibm_torino"));
        assert!(!classify_name("scaleway-garnet-20"));
    }

    #[test]
    fn test_describe_uses_name_heuristic() {
        let mut registry = BackendRegistry::new();
        // A "hardware-named" stub whose capabilities say simulator: the
        // summary still follows the name heuristic.
        registry.register(Arc::new(StubBackend::new("torino")));
        let summary = registry.describe("torino").unwrap();
        assert!(!summary.is_simulator);
        assert_eq!(summary.num_qubits, 5);
    }

    #[test]
    fn test_reregistration_keeps_position() {
        let mut registry = BackendRegistry::new();
        registry.register(Arc::new(StubBackend::new("a")));
        registry.register(Arc::new(StubBackend::new("b")));
        registry.register(Arc::new(StubBackend::new("a")));
        assert_eq!(registry.list(), vec!["a", "b"]);
    }
}
