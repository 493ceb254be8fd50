//! Quantum Fourier transform.

use std::f64::consts::PI;

use hrimfax_ir::{Circuit, CircuitBuilder, IrResult};

/// The n-qubit quantum Fourier transform.
///
/// For each target qubit i in ascending order: H(i), then a controlled
/// phase CP(π / 2^(j−i)) from every higher qubit j. A final swap pass
/// reverses the qubit order.
pub fn qft(n: u32) -> IrResult<Circuit> {
    let mut b = CircuitBuilder::new("qft", n, 0);
    append_qft(&mut b, n)?;
    Ok(b.build())
}

/// The structural inverse of [`qft`]: same circuit, reversed with every
/// rotation negated.
pub fn qft_inverse(n: u32) -> IrResult<Circuit> {
    qft(n)?.inverse()
}

/// Emit the QFT gate sequence over qubits 0..n into an existing builder.
pub fn append_qft(b: &mut CircuitBuilder, n: u32) -> IrResult<()> {
    for i in 0..n {
        b.h(i)?;
        for j in (i + 1)..n {
            // Exp2 keeps the angle finite for arbitrarily wide registers;
            // an integer shift would overflow past distance 31.
            let angle = PI * f64::exp2(-f64::from(j - i));
            b.cp(j, i, angle)?;
        }
    }
    for i in 0..n / 2 {
        b.swap(i, n - 1 - i)?;
    }
    Ok(())
}

/// Emit the inverse QFT gate sequence over qubits 0..n into an existing
/// builder: swap pass first, then the rotation/H sequence reversed with
/// negated angles.
pub fn append_qft_inverse(b: &mut CircuitBuilder, n: u32) -> IrResult<()> {
    for i in (0..n / 2).rev() {
        b.swap(i, n - 1 - i)?;
    }
    for i in (0..n).rev() {
        for j in ((i + 1)..n).rev() {
            let angle = -PI * f64::exp2(-f64::from(j - i));
            b.cp(j, i, angle)?;
        }
        b.h(i)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use hrimfax_ir::{Gate, Op, ParamExpr, QubitId};

    #[test]
    fn test_qft_3_structure() {
        let c = qft(3).unwrap();
        // H(0), CP(1,0), CP(2,0), H(1), CP(2,1), H(2), SWAP(0,2)
        assert_eq!(c.num_ops(), 7);
        assert_eq!(c.ops()[0].as_gate(), Some(&Gate::H));
        assert_eq!(
            c.ops()[1],
            Op::Gate {
                gate: Gate::CPhase(ParamExpr::value(PI / 2.0)),
                qubits: vec![QubitId(1), QubitId(0)],
            }
        );
        assert_eq!(
            c.ops()[2],
            Op::Gate {
                gate: Gate::CPhase(ParamExpr::value(PI / 4.0)),
                qubits: vec![QubitId(2), QubitId(0)],
            }
        );
        assert_eq!(
            c.ops()[6],
            Op::Gate {
                gate: Gate::Swap,
                qubits: vec![QubitId(0), QubitId(2)],
            }
        );
    }

    #[test]
    fn test_qft_inverse_matches_structural_inverse() {
        let inv = qft_inverse(3).unwrap();
        let mut b = hrimfax_ir::CircuitBuilder::new("qft", 3, 0);
        append_qft_inverse(&mut b, 3).unwrap();
        assert_eq!(inv.ops(), b.build().ops());
    }

    #[test]
    fn test_qft_wide_register() {
        // Rotation distances past 31 must not wrap; the deepest ladder
        // rung on 40 qubits is CP(π/2^39) from qubit 39 onto qubit 0.
        let c = qft(40).unwrap();
        assert_eq!(
            c.ops()[39],
            Op::Gate {
                gate: Gate::CPhase(ParamExpr::value(PI * f64::exp2(-39.0))),
                qubits: vec![QubitId(39), QubitId(0)],
            }
        );
    }

    #[test]
    fn test_qft_one_qubit_is_single_h() {
        let c = qft(1).unwrap();
        assert_eq!(c.num_ops(), 1);
        assert_eq!(c.ops()[0].as_gate(), Some(&Gate::H));
    }
}
