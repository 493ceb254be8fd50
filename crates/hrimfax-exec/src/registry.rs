//! Registry initialization: the fixed local roster plus optional remote
//! discovery.

use std::sync::Arc;

use tracing::{info, warn};

use hrimfax_adapter_sim::{FakeBackend, SimulationMethod, SimulatorBackend};
use hrimfax_hal::BackendRegistry;

/// Build the process-wide backend registry.
///
/// Local backends are always present, in a fixed order: `aer_simulator`,
/// `statevector_simulator`, `qasm_simulator`, `fake_backend`. Remote IBM
/// devices are appended only when `IBM_QUANTUM_TOKEN` is set, and a failed
/// discovery degrades to a warning — a broken network connection never
/// takes out local simulation.
pub async fn initialize() -> BackendRegistry {
    let mut registry = BackendRegistry::new();

    registry.register(Arc::new(SimulatorBackend::named(
        "aer_simulator",
        SimulationMethod::Automatic,
    )));
    registry.register(Arc::new(SimulatorBackend::named(
        "statevector_simulator",
        SimulationMethod::Statevector,
    )));
    registry.register(Arc::new(SimulatorBackend::named(
        "qasm_simulator",
        SimulationMethod::Automatic,
    )));
    registry.register(Arc::new(FakeBackend::new()));

    if std::env::var("IBM_QUANTUM_TOKEN").is_ok() {
        match hrimfax_adapter_ibm::discover().await {
            Ok(devices) => {
                info!(count = devices.len(), "discovered IBM Quantum devices");
                for device in devices {
                    registry.register(Arc::new(device));
                }
            }
            Err(e) => {
                warn!("IBM Quantum discovery failed, continuing with local backends: {e}");
            }
        }
    }

    info!(backends = registry.len(), "registry initialized");
    registry
}
