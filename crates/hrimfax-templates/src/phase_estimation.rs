//! Quantum phase estimation.

use std::f64::consts::PI;

use hrimfax_ir::{Circuit, CircuitBuilder, IrResult};

use crate::qft::append_qft_inverse;

/// Phase estimation for the phase gate U = P(2π·phase).
///
/// `n_precision` counting qubits (indices 0..n_precision) plus one
/// eigenstate qubit (index n_precision) prepared in |1⟩. Counting qubit k
/// applies its controlled phase 2^k times (binary-weighted kickback), then
/// an inverse Fourier transform runs on the counting register and only the
/// counting register is measured. Reading the counts as a binary fraction
/// recovers `phase` to `n_precision` bits.
pub fn phase_estimation(n_precision: u32, phase: f64) -> IrResult<Circuit> {
    let mut b = CircuitBuilder::new("phase_estimation", n_precision + 1, n_precision);
    let eigenstate = n_precision;

    b.x(eigenstate)?;
    for k in 0..n_precision {
        b.h(k)?;
    }

    let angle = 2.0 * PI * phase;
    for k in 0..n_precision {
        let repetitions = 1u128.checked_shl(k).unwrap_or(u128::MAX);
        for _ in 0..repetitions {
            b.cp(k, eigenstate, angle)?;
        }
    }

    append_qft_inverse(&mut b, n_precision)?;

    for k in 0..n_precision {
        b.measure(k, k)?;
    }
    Ok(b.build())
}

#[cfg(test)]
mod tests {
    use super::*;
    use hrimfax_ir::{Gate, Op};

    #[test]
    fn test_register_sizes() {
        let c = phase_estimation(4, 0.125).unwrap();
        assert_eq!(c.num_qubits(), 5);
        assert_eq!(c.num_clbits(), 4);
    }

    #[test]
    fn test_controlled_phase_repetitions_double() {
        let c = phase_estimation(3, 0.25).unwrap();
        let per_control: Vec<usize> = (0..3)
            .map(|k| {
                c.ops()
                    .iter()
                    .filter(|op| {
                        matches!(op, Op::Gate { gate: Gate::CPhase(_), qubits }
                            if qubits[0].0 == k)
                    })
                    .count()
            })
            .collect();
        assert_eq!(per_control, vec![1, 2, 4]);
    }

    #[test]
    fn test_only_counting_register_measured() {
        let c = phase_estimation(3, 0.5).unwrap();
        let measured: Vec<u32> = c
            .ops()
            .iter()
            .filter_map(|op| match op {
                Op::Measure { qubit, .. } => Some(qubit.0),
                _ => None,
            })
            .collect();
        assert_eq!(measured, vec![0, 1, 2]);
    }
}
