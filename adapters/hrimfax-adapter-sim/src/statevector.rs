//! Statevector simulation engine.

use num_complex::Complex64;
use std::f64::consts::PI;

use hrimfax_algo::hamiltonian::{PauliOp, PauliString};
use hrimfax_hal::{HalError, HalResult};
use hrimfax_ir::{Gate, Op, ParamExpr, QubitId};

/// A statevector representing a quantum state.
pub struct Statevector {
    /// The state amplitudes (2^n complex numbers).
    amplitudes: Vec<Complex64>,
    /// Number of qubits.
    num_qubits: usize,
}

impl Statevector {
    /// Create a new statevector initialized to |0...0⟩.
    pub fn new(num_qubits: usize) -> Self {
        let size = 1 << num_qubits;
        let mut amplitudes = vec![Complex64::new(0.0, 0.0); size];
        amplitudes[0] = Complex64::new(1.0, 0.0);
        Self {
            amplitudes,
            num_qubits,
        }
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Apply one circuit operation.
    ///
    /// Measurements and barriers leave the state untouched; sampling is a
    /// separate step so repeated shots can re-use one evolution.
    ///
    /// # Errors
    ///
    /// Returns [`HalError::UnboundParameter`] for a gate whose angle is
    /// still symbolic. Callers normally reject unbound circuits up front;
    /// this keeps a direct caller from evolving a quietly wrong state.
    pub fn apply(&mut self, op: &Op) -> HalResult<()> {
        match op {
            Op::Gate { gate, qubits } => {
                let q: Vec<usize> = qubits.iter().map(|QubitId(i)| *i as usize).collect();
                self.apply_gate(gate, &q)
            }
            Op::Measure { .. } | Op::Barrier(_) => Ok(()),
        }
    }

    fn apply_gate(&mut self, gate: &Gate, qubits: &[usize]) -> HalResult<()> {
        match gate {
            Gate::X => self.apply_x(qubits[0]),
            Gate::Y => self.apply_y(qubits[0]),
            Gate::Z => self.apply_z(qubits[0]),
            Gate::H => self.apply_h(qubits[0]),
            Gate::S => self.apply_phase(qubits[0], PI / 2.0),
            Gate::Sdg => self.apply_phase(qubits[0], -PI / 2.0),
            Gate::T => self.apply_phase(qubits[0], PI / 4.0),
            Gate::Tdg => self.apply_phase(qubits[0], -PI / 4.0),
            Gate::Rx(theta) => self.apply_rx(qubits[0], bound_angle(theta)?),
            Gate::Ry(theta) => self.apply_ry(qubits[0], bound_angle(theta)?),
            Gate::Rz(theta) => self.apply_rz(qubits[0], bound_angle(theta)?),
            Gate::Phase(theta) => self.apply_phase(qubits[0], bound_angle(theta)?),
            Gate::Cx => self.apply_cx(qubits[0], qubits[1]),
            Gate::Cy => self.apply_cy(qubits[0], qubits[1]),
            Gate::Cz => self.apply_cz(qubits[0], qubits[1]),
            Gate::CPhase(theta) => self.apply_cp(qubits[0], qubits[1], bound_angle(theta)?),
            Gate::Swap => self.apply_swap(qubits[0], qubits[1]),
            Gate::Ccx => self.apply_mcx(&qubits[..2], qubits[2]),
            Gate::Mcx { .. } => {
                let (target, controls) = qubits
                    .split_last()
                    .map(|(t, c)| (*t, c))
                    .unwrap_or((qubits[0], &[]));
                self.apply_mcx(controls, target);
            }
        }
        Ok(())
    }

    fn apply_x(&mut self, qubit: usize) {
        let mask = 1 << qubit;
        for i in 0..(1 << self.num_qubits) {
            if i & mask == 0 {
                let j = i | mask;
                self.amplitudes.swap(i, j);
            }
        }
    }

    fn apply_y(&mut self, qubit: usize) {
        let mask = 1 << qubit;
        let i_val = Complex64::new(0.0, 1.0);
        for i in 0..(1 << self.num_qubits) {
            if i & mask == 0 {
                let j = i | mask;
                let tmp = self.amplitudes[i];
                self.amplitudes[i] = -i_val * self.amplitudes[j];
                self.amplitudes[j] = i_val * tmp;
            }
        }
    }

    fn apply_z(&mut self, qubit: usize) {
        let mask = 1 << qubit;
        for i in 0..(1 << self.num_qubits) {
            if i & mask != 0 {
                self.amplitudes[i] = -self.amplitudes[i];
            }
        }
    }

    fn apply_h(&mut self, qubit: usize) {
        let mask = 1 << qubit;
        let sqrt2_inv = 1.0 / 2.0_f64.sqrt();
        for i in 0..(1 << self.num_qubits) {
            if i & mask == 0 {
                let j = i | mask;
                let a = self.amplitudes[i];
                let b = self.amplitudes[j];
                self.amplitudes[i] = sqrt2_inv * (a + b);
                self.amplitudes[j] = sqrt2_inv * (a - b);
            }
        }
    }

    fn apply_phase(&mut self, qubit: usize, theta: f64) {
        let mask = 1 << qubit;
        let phase = Complex64::from_polar(1.0, theta);
        for i in 0..(1 << self.num_qubits) {
            if i & mask != 0 {
                self.amplitudes[i] *= phase;
            }
        }
    }

    fn apply_rx(&mut self, qubit: usize, theta: f64) {
        let mask = 1 << qubit;
        let c = (theta / 2.0).cos();
        let s = (theta / 2.0).sin();
        let neg_i_s = Complex64::new(0.0, -s);
        for i in 0..(1 << self.num_qubits) {
            if i & mask == 0 {
                let j = i | mask;
                let a = self.amplitudes[i];
                let b = self.amplitudes[j];
                self.amplitudes[i] = c * a + neg_i_s * b;
                self.amplitudes[j] = neg_i_s * a + c * b;
            }
        }
    }

    fn apply_ry(&mut self, qubit: usize, theta: f64) {
        let mask = 1 << qubit;
        let c = (theta / 2.0).cos();
        let s = (theta / 2.0).sin();
        for i in 0..(1 << self.num_qubits) {
            if i & mask == 0 {
                let j = i | mask;
                let a = self.amplitudes[i];
                let b = self.amplitudes[j];
                self.amplitudes[i] = c * a - s * b;
                self.amplitudes[j] = s * a + c * b;
            }
        }
    }

    fn apply_rz(&mut self, qubit: usize, theta: f64) {
        let mask = 1 << qubit;
        let phase_0 = Complex64::from_polar(1.0, -theta / 2.0);
        let phase_1 = Complex64::from_polar(1.0, theta / 2.0);
        for i in 0..(1 << self.num_qubits) {
            if i & mask == 0 {
                self.amplitudes[i] *= phase_0;
            } else {
                self.amplitudes[i] *= phase_1;
            }
        }
    }

    fn apply_cx(&mut self, control: usize, target: usize) {
        let ctrl_mask = 1 << control;
        let tgt_mask = 1 << target;
        for i in 0..(1 << self.num_qubits) {
            if (i & ctrl_mask != 0) && (i & tgt_mask == 0) {
                let j = i | tgt_mask;
                self.amplitudes.swap(i, j);
            }
        }
    }

    fn apply_cy(&mut self, control: usize, target: usize) {
        let ctrl_mask = 1 << control;
        let tgt_mask = 1 << target;
        let i_val = Complex64::new(0.0, 1.0);
        for i in 0..(1 << self.num_qubits) {
            if (i & ctrl_mask != 0) && (i & tgt_mask == 0) {
                let j = i | tgt_mask;
                let tmp = self.amplitudes[i];
                self.amplitudes[i] = -i_val * self.amplitudes[j];
                self.amplitudes[j] = i_val * tmp;
            }
        }
    }

    fn apply_cz(&mut self, control: usize, target: usize) {
        let ctrl_mask = 1 << control;
        let tgt_mask = 1 << target;
        for i in 0..(1 << self.num_qubits) {
            if (i & ctrl_mask != 0) && (i & tgt_mask != 0) {
                self.amplitudes[i] = -self.amplitudes[i];
            }
        }
    }

    fn apply_cp(&mut self, control: usize, target: usize, theta: f64) {
        let ctrl_mask = 1 << control;
        let tgt_mask = 1 << target;
        let phase = Complex64::from_polar(1.0, theta);
        for i in 0..(1 << self.num_qubits) {
            if (i & ctrl_mask != 0) && (i & tgt_mask != 0) {
                self.amplitudes[i] *= phase;
            }
        }
    }

    fn apply_swap(&mut self, q1: usize, q2: usize) {
        let mask1 = 1 << q1;
        let mask2 = 1 << q2;
        for i in 0..(1 << self.num_qubits) {
            let b1 = (i & mask1) != 0;
            let b2 = (i & mask2) != 0;
            if b1 && !b2 {
                let j = (i & !mask1) | mask2;
                self.amplitudes.swap(i, j);
            }
        }
    }

    fn apply_mcx(&mut self, controls: &[usize], target: usize) {
        let ctrl_mask: usize = controls.iter().fold(0, |m, c| m | (1 << c));
        let tgt_mask = 1 << target;
        for i in 0..(1 << self.num_qubits) {
            if (i & ctrl_mask == ctrl_mask) && (i & tgt_mask == 0) {
                let j = i | tgt_mask;
                self.amplitudes.swap(i, j);
            }
        }
    }

    /// Sample a measurement outcome over all qubits.
    pub fn sample(&self) -> usize {
        use rand::Rng;
        let mut rng = rand::thread_rng();
        let r: f64 = rng.r#gen();

        let mut cumulative = 0.0;
        for (i, amp) in self.amplitudes.iter().enumerate() {
            cumulative += amp.norm_sqr();
            if r < cumulative {
                return i;
            }
        }

        // Fallback (shouldn't happen with normalized states)
        self.amplitudes.len() - 1
    }

    /// The expectation value ⟨ψ|P|ψ⟩ for a Pauli string.
    ///
    /// Applies P to a copy of the state and takes the real inner product
    /// with the original; Pauli expectations of a normalized state are
    /// real, so the imaginary part is discarded.
    pub fn expectation(&self, pauli: &PauliString) -> f64 {
        if pauli.is_identity() {
            return 1.0;
        }
        let mut transformed = Statevector {
            amplitudes: self.amplitudes.clone(),
            num_qubits: self.num_qubits,
        };
        for (qubit, op) in pauli.ops() {
            let q = *qubit as usize;
            match op {
                PauliOp::X => transformed.apply_x(q),
                PauliOp::Y => transformed.apply_y(q),
                PauliOp::Z => transformed.apply_z(q),
                PauliOp::I => {}
            }
        }
        self.amplitudes
            .iter()
            .zip(&transformed.amplitudes)
            .map(|(a, b)| (a.conj() * b).re)
            .sum()
    }

    /// Fidelity |⟨ψ|φ⟩|² against another state of the same size.
    pub fn overlap(&self, other: &Statevector) -> f64 {
        self.amplitudes
            .iter()
            .zip(&other.amplitudes)
            .map(|(a, b)| a.conj() * b)
            .sum::<Complex64>()
            .norm_sqr()
    }

    /// Probability of measuring `outcome` over all qubits.
    pub fn probability(&self, outcome: usize) -> f64 {
        self.amplitudes[outcome].norm_sqr()
    }
}

fn bound_angle(theta: &ParamExpr) -> HalResult<f64> {
    match theta.as_f64() {
        Some(value) => Ok(value),
        None => Err(HalError::UnboundParameter(
            theta.symbol_name().unwrap_or("").to_string(),
        )),
    }
}

/// Format an outcome as a big-endian bitstring over `width` bits: leftmost
/// character is the highest bit index.
pub fn outcome_to_bitstring(outcome: usize, width: usize) -> String {
    format!("{outcome:0width$b}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use hrimfax_algo::hamiltonian::PauliString;

    fn approx_eq(a: Complex64, b: Complex64) -> bool {
        (a - b).norm() < 1e-10
    }

    #[test]
    fn test_initial_state() {
        let sv = Statevector::new(2);
        assert!(approx_eq(sv.amplitudes[0], Complex64::new(1.0, 0.0)));
        assert!(approx_eq(sv.amplitudes[1], Complex64::new(0.0, 0.0)));
    }

    #[test]
    fn test_bell_amplitudes() {
        let mut sv = Statevector::new(2);
        sv.apply_h(0);
        sv.apply_cx(0, 1);

        let sqrt2_inv = 1.0 / 2.0_f64.sqrt();
        assert!(approx_eq(sv.amplitudes[0], Complex64::new(sqrt2_inv, 0.0)));
        assert!(approx_eq(sv.amplitudes[1], Complex64::new(0.0, 0.0)));
        assert!(approx_eq(sv.amplitudes[2], Complex64::new(0.0, 0.0)));
        assert!(approx_eq(sv.amplitudes[3], Complex64::new(sqrt2_inv, 0.0)));
    }

    #[test]
    fn test_mcx_flips_only_all_ones() {
        let mut sv = Statevector::new(3);
        sv.apply_x(0);
        sv.apply_x(1);
        sv.apply_mcx(&[0, 1], 2);
        // |011⟩ → |111⟩
        assert!(approx_eq(sv.amplitudes[7], Complex64::new(1.0, 0.0)));
    }

    #[test]
    fn test_sample_deterministic() {
        let mut sv = Statevector::new(1);
        sv.apply_x(0);
        for _ in 0..100 {
            assert_eq!(sv.sample(), 1);
        }
    }

    #[test]
    fn test_z_expectation_ground_and_excited() {
        let sv = Statevector::new(1);
        let z = PauliString::from_ops([(0, PauliOp::Z)]);
        assert!((sv.expectation(&z) - 1.0).abs() < 1e-10);

        let mut flipped = Statevector::new(1);
        flipped.apply_x(0);
        assert!((flipped.expectation(&z) + 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_x_expectation_of_plus_state() {
        let mut sv = Statevector::new(1);
        sv.apply_h(0);
        let x = PauliString::from_ops([(0, PauliOp::X)]);
        assert!((sv.expectation(&x) - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_zz_expectation_of_bell_state() {
        let mut sv = Statevector::new(2);
        sv.apply_h(0);
        sv.apply_cx(0, 1);
        let zz = PauliString::zz([0, 1]);
        assert!((sv.expectation(&zz) - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_symbolic_angle_rejected() {
        let mut sv = Statevector::new(1);
        let op = Op::Gate {
            gate: Gate::Ry(ParamExpr::symbol("theta")),
            qubits: vec![QubitId(0)],
        };
        let err = sv.apply(&op).unwrap_err();
        assert!(matches!(err, HalError::UnboundParameter(name) if name == "theta"));
        // The state is untouched on failure.
        assert!((sv.probability(0) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_bound_rotation_applies() {
        let mut sv = Statevector::new(1);
        let op = Op::Gate {
            gate: Gate::Ry(ParamExpr::value(PI)),
            qubits: vec![QubitId(0)],
        };
        sv.apply(&op).unwrap();
        assert!((sv.probability(1) - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_outcome_to_bitstring_big_endian() {
        assert_eq!(outcome_to_bitstring(5, 4), "0101");
        assert_eq!(outcome_to_bitstring(0, 2), "00");
    }
}
