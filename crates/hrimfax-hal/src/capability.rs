//! Backend capability descriptors.

use serde::{Deserialize, Serialize};

/// Static description of what a backend can execute.
///
/// Created once at backend construction and read-only for the process
/// lifetime; re-initializing the registry is the only way to refresh it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Capabilities {
    /// Logical backend name.
    pub name: String,
    /// Number of addressable qubits.
    pub num_qubits: u32,
    /// Maximum shots per submission.
    pub max_shots: u32,
    /// True for local simulators, false for hardware.
    pub is_simulator: bool,
    /// Gates the backend executes natively.
    pub gate_set: GateSet,
}

impl Capabilities {
    /// Capabilities for a local simulator with full gate support.
    pub fn simulator(name: impl Into<String>, num_qubits: u32) -> Self {
        Self {
            name: name.into(),
            num_qubits,
            max_shots: 1_000_000,
            is_simulator: true,
            gate_set: GateSet::universal(),
        }
    }

    /// Capabilities for remote hardware with a restricted native gate set.
    pub fn hardware(
        name: impl Into<String>,
        num_qubits: u32,
        max_shots: u32,
        native: impl IntoIterator<Item = String>,
    ) -> Self {
        Self {
            name: name.into(),
            num_qubits,
            max_shots,
            is_simulator: false,
            gate_set: GateSet::new(native),
        }
    }
}

/// The set of gate names a backend executes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GateSet {
    /// Native gate names, lowercase.
    pub native: Vec<String>,
}

impl GateSet {
    /// Build from an iterator of gate names.
    pub fn new(native: impl IntoIterator<Item = String>) -> Self {
        Self {
            native: native.into_iter().collect(),
        }
    }

    /// Every gate the IR can express. Used by simulators.
    pub fn universal() -> Self {
        Self::new(
            [
                "h", "x", "y", "z", "s", "sdg", "t", "tdg", "rx", "ry", "rz", "p", "cx", "cy",
                "cz", "cp", "swap", "ccx", "mcx",
            ]
            .map(String::from),
        )
    }

    /// True if `gate` is in the native set.
    pub fn contains(&self, gate: &str) -> bool {
        self.native.iter().any(|g| g == gate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_universal_covers_multi_controlled() {
        let gs = GateSet::universal();
        assert!(gs.contains("mcx"));
        assert!(gs.contains("cp"));
        assert!(!gs.contains("iswap"));
    }

    #[test]
    fn test_simulator_capabilities() {
        let caps = Capabilities::simulator("aer_simulator", 20);
        assert!(caps.is_simulator);
        assert_eq!(caps.num_qubits, 20);
        assert_eq!(caps.max_shots, 1_000_000);
    }

    #[test]
    fn test_hardware_capabilities() {
        let caps = Capabilities::hardware(
            "ibm_torino",
            133,
            100_000,
            ["cz", "rz", "sx", "x"].map(String::from),
        );
        assert!(!caps.is_simulator);
        assert!(caps.gate_set.contains("cz"));
    }
}
