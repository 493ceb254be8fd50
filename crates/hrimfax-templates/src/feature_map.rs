//! Data-encoding feature maps for quantum machine learning.

use std::f64::consts::PI;

use hrimfax_ir::{Circuit, CircuitBuilder, IrResult};

/// A second-order Pauli-Z feature map over one classical sample.
///
/// Each repetition layers H on every qubit, a single-qubit phase `2·xᵢ`
/// per feature, and a linear-entanglement pass where neighboring pairs
/// pick up the cross phase `2·(π−xᵢ)(π−xⱼ)` between CNOTs. The sample
/// values are baked in as concrete angles, so the circuit encodes exactly
/// one data point.
pub fn zz_feature_map(features: &[f64], reps: u32) -> IrResult<Circuit> {
    let n = features.len() as u32;
    let mut b = CircuitBuilder::new("zz_feature_map", n, 0);
    append_zz_feature_map(&mut b, features, reps)?;
    Ok(b.build())
}

/// Emit the feature-map gate sequence into an existing builder, using
/// qubits `0..features.len()`.
pub fn append_zz_feature_map(b: &mut CircuitBuilder, features: &[f64], reps: u32) -> IrResult<()> {
    let n = features.len() as u32;
    for _ in 0..reps {
        for q in 0..n {
            b.h(q)?;
        }
        for (q, x) in features.iter().enumerate() {
            b.p(q as u32, 2.0 * x)?;
        }
        for q in 0..n.saturating_sub(1) {
            let (xi, xj) = (features[q as usize], features[q as usize + 1]);
            b.cx(q, q + 1)?;
            b.p(q + 1, 2.0 * (PI - xi) * (PI - xj))?;
            b.cx(q, q + 1)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use hrimfax_ir::{Gate, Op, ParamExpr, QubitId};

    #[test]
    fn test_single_rep_structure() {
        let c = zz_feature_map(&[0.5, 0.25], 1).unwrap();
        // H H, P P, then CX-P-CX on the single neighbor pair
        assert_eq!(c.num_ops(), 7);
        assert_eq!(c.ops()[0].as_gate(), Some(&Gate::H));
        assert_eq!(
            c.ops()[2],
            Op::Gate {
                gate: Gate::Phase(ParamExpr::value(1.0)),
                qubits: vec![QubitId(0)],
            }
        );
        assert_eq!(
            c.ops()[5],
            Op::Gate {
                gate: Gate::Phase(ParamExpr::value(2.0 * (PI - 0.5) * (PI - 0.25))),
                qubits: vec![QubitId(1)],
            }
        );
    }

    #[test]
    fn test_reps_repeat_the_layer() {
        let once = zz_feature_map(&[0.1, 0.2, 0.3], 1).unwrap();
        let twice = zz_feature_map(&[0.1, 0.2, 0.3], 2).unwrap();
        assert_eq!(twice.num_ops(), 2 * once.num_ops());
    }

    #[test]
    fn test_single_feature_has_no_entanglers() {
        let c = zz_feature_map(&[0.7], 2).unwrap();
        assert!(c.ops().iter().all(|op| op.as_gate() != Some(&Gate::Cx)));
    }

    #[test]
    fn test_encoding_is_fully_bound() {
        let c = zz_feature_map(&[0.5, 0.25], 2).unwrap();
        assert!(!c.is_parameterized());
    }
}
