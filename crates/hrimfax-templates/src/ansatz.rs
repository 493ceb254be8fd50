//! Variational ansatz circuits.

use hrimfax_ir::{Circuit, CircuitBuilder, IrResult};

/// A hardware-efficient ansatz: `depth` layers of per-qubit Ry rotations
/// followed by a nearest-neighbor CNOT chain.
///
/// Each (layer, qubit) pair gets a freshly named parameter
/// `theta_{layer}_{qubit}`, so the full parameter vector has
/// `depth * n` entries in layer-major order. The entangling chain wraps
/// around (qubit n−1 back to qubit 0) only when `n > 2`; on two qubits the
/// wraparound CNOT would just repeat the chain's single link.
pub fn hardware_efficient_ansatz(n: u32, depth: u32) -> IrResult<Circuit> {
    let mut b = CircuitBuilder::new("ansatz", n, 0);
    for layer in 0..depth {
        for q in 0..n {
            b.ry(q, format!("theta_{layer}_{q}"))?;
        }
        for q in 0..n.saturating_sub(1) {
            b.cx(q, q + 1)?;
        }
        if n > 2 {
            b.cx(n - 1, 0)?;
        }
    }
    Ok(b.build())
}

/// The real-amplitudes ansatz: alternating Ry layers and fully connected
/// CNOT entanglement, ending on a final rotation layer.
///
/// `reps` entangling blocks give `reps + 1` rotation layers, so the
/// parameter vector has `(reps + 1) * n` entries named
/// `theta_{layer}_{qubit}` in layer-major order. All rotations are Ry, so
/// the prepared amplitudes stay real.
pub fn real_amplitudes(n: u32, reps: u32) -> IrResult<Circuit> {
    let mut b = CircuitBuilder::new("real_amplitudes", n, 0);
    append_real_amplitudes(&mut b, n, reps)?;
    Ok(b.build())
}

/// Emit the real-amplitudes gate sequence into an existing builder over
/// qubits `0..n`.
pub fn append_real_amplitudes(b: &mut CircuitBuilder, n: u32, reps: u32) -> IrResult<()> {
    for layer in 0..=reps {
        for q in 0..n {
            b.ry(q, format!("theta_{layer}_{q}"))?;
        }
        if layer < reps {
            for i in 0..n {
                for j in (i + 1)..n {
                    b.cx(i, j)?;
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use hrimfax_ir::Gate;

    #[test]
    fn test_parameter_count_and_naming() {
        let c = hardware_efficient_ansatz(3, 2).unwrap();
        let params = c.parameters();
        assert_eq!(params.len(), 6);
        assert_eq!(params[0], "theta_0_0");
        assert_eq!(params[5], "theta_1_2");
    }

    #[test]
    fn test_wraparound_only_above_two_qubits() {
        let two = hardware_efficient_ansatz(2, 1).unwrap();
        // 2 Ry + 1 CX, no wraparound
        assert_eq!(two.num_ops(), 3);

        let three = hardware_efficient_ansatz(3, 1).unwrap();
        // 3 Ry + 2 CX chain + 1 wraparound
        assert_eq!(three.num_ops(), 6);
        let last = &three.ops()[5];
        assert_eq!(last.as_gate(), Some(&Gate::Cx));
        assert_eq!(last.qubits()[0].0, 2);
        assert_eq!(last.qubits()[1].0, 0);
    }

    #[test]
    fn test_layers_use_fresh_parameters() {
        let c = hardware_efficient_ansatz(2, 3).unwrap();
        assert_eq!(c.parameters().len(), 6);
        assert!(!c.bind_values(&[0.0; 6]).unwrap().is_parameterized());
    }

    #[test]
    fn test_real_amplitudes_parameter_layout() {
        let c = real_amplitudes(3, 1).unwrap();
        let params = c.parameters();
        // reps + 1 rotation layers
        assert_eq!(params.len(), 6);
        assert_eq!(params[0], "theta_0_0");
        assert_eq!(params[5], "theta_1_2");
        // 3 Ry + full CX block (0,1)(0,2)(1,2) + 3 Ry
        assert_eq!(c.num_ops(), 9);
    }

    #[test]
    fn test_real_amplitudes_uses_only_ry_rotations() {
        let c = real_amplitudes(2, 2).unwrap();
        assert!(c.ops().iter().all(|op| matches!(
            op.as_gate(),
            Some(Gate::Ry(_)) | Some(Gate::Cx)
        )));
    }

    #[test]
    fn test_real_amplitudes_zero_reps_is_one_layer() {
        let c = real_amplitudes(2, 0).unwrap();
        assert_eq!(c.parameters().len(), 2);
        assert_eq!(c.num_ops(), 2);
    }
}
