//! Grover search: iteration count, full circuit assembly, and readout.

use hrimfax_hal::Counts;
use hrimfax_ir::{Circuit, CircuitBuilder};
use hrimfax_templates::{append_diffuser, append_oracle};

use crate::error::{AlgoError, AlgoResult};

/// The iteration count maximizing success probability for `num_marked`
/// marked states in an `num_qubits`-qubit search space:
/// ⌊(π/4)·√(N/M)⌋ with N = 2ⁿ.
///
/// Returns at least 1 so a search always amplifies once, even when the
/// marked set covers most of the space.
pub fn optimal_iterations(num_qubits: u32, num_marked: usize) -> u32 {
    // exp2 rather than an integer shift so wide search spaces stay finite.
    let space = f64::exp2(f64::from(num_qubits));
    let ratio = space / num_marked as f64;
    let k = (std::f64::consts::FRAC_PI_4 * ratio.sqrt()).floor() as u32;
    k.max(1)
}

/// A complete Grover search circuit: uniform superposition, `iterations`
/// oracle+diffuser rounds, full measurement.
///
/// Marked bitstrings are big-endian (leftmost character is the highest
/// qubit), matching the counts keys the simulators produce.
pub fn grover_circuit(num_qubits: u32, marked: &[&str], iterations: u32) -> AlgoResult<Circuit> {
    if num_qubits < 2 {
        return Err(AlgoError::InvalidConfiguration(
            "Grover search needs at least 2 qubits".into(),
        ));
    }
    if marked.is_empty() {
        return Err(AlgoError::InvalidConfiguration(
            "Grover search needs at least one marked bitstring".into(),
        ));
    }

    let mut b = CircuitBuilder::new("grover", num_qubits, num_qubits);
    for q in 0..num_qubits {
        b.h(q)?;
    }
    for _ in 0..iterations {
        append_oracle(&mut b, num_qubits, marked)?;
        append_diffuser(&mut b, num_qubits)?;
    }
    b.measure_all()?;
    Ok(b.build())
}

/// The `k` most frequent outcomes, highest count first.
///
/// Ties break toward the lexicographically smaller bitstring, so the
/// result is deterministic for a given counts table.
pub fn top_candidates(counts: &Counts, k: usize) -> Vec<(String, u64)> {
    counts
        .sorted()
        .into_iter()
        .take(k)
        .map(|(bits, count)| (bits.clone(), *count))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use hrimfax_ir::Gate;

    #[test]
    fn test_optimal_iterations_single_marked() {
        // N=8, M=1: π/4·√8 ≈ 2.22 → 2
        assert_eq!(optimal_iterations(3, 1), 2);
        // N=16, M=1: π/4·4 ≈ 3.14 → 3
        assert_eq!(optimal_iterations(4, 1), 3);
    }

    #[test]
    fn test_optimal_iterations_never_zero() {
        assert_eq!(optimal_iterations(2, 3), 1);
        assert_eq!(optimal_iterations(2, 4), 1);
    }

    #[test]
    fn test_optimal_iterations_wide_search_space() {
        // Spaces past 2^63 must not wrap the count computation.
        assert!(optimal_iterations(64, 1) >= 1);
        assert!(optimal_iterations(100, 1) >= optimal_iterations(64, 1));
    }

    #[test]
    fn test_circuit_shape() {
        let c = grover_circuit(3, &["101"], 2).unwrap();
        assert_eq!(c.num_qubits(), 3);
        assert_eq!(c.num_clbits(), 3);
        // 3 H + 2×(5-op oracle + 15-op diffuser) + 3 measure
        assert_eq!(c.num_ops(), 3 + 2 * (5 + 15) + 3);
        assert!(c.has_measurements());
        assert_eq!(c.ops()[0].as_gate(), Some(&Gate::H));
    }

    #[test]
    fn test_empty_marked_set_rejected() {
        let err = grover_circuit(3, &[], 1).unwrap_err();
        assert!(matches!(err, AlgoError::InvalidConfiguration(_)));
    }

    #[test]
    fn test_bad_bitstring_propagates() {
        let err = grover_circuit(3, &["10"], 1).unwrap_err();
        assert!(matches!(err, AlgoError::Ir(_)));
    }

    #[test]
    fn test_top_candidates_ordering() {
        let counts: Counts = [
            ("000".to_string(), 10u64),
            ("101".to_string(), 80),
            ("110".to_string(), 10),
        ]
        .into_iter()
        .collect();
        let top = top_candidates(&counts, 2);
        assert_eq!(top[0], ("101".to_string(), 80));
        // Tie between 000 and 110 breaks lexicographically.
        assert_eq!(top[1], ("000".to_string(), 10));
    }
}
