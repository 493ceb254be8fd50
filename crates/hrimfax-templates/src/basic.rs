//! Entangling state preparation: Bell pairs and GHZ states.

use hrimfax_ir::{Circuit, CircuitBuilder, IrResult};

/// The two-qubit Bell state (|00⟩ + |11⟩)/√2.
///
/// H on qubit 0 followed by CNOT(0, 1); with `measure` set, both qubits
/// are measured into the classical register.
pub fn bell_state(measure: bool) -> IrResult<Circuit> {
    let clbits = if measure { 2 } else { 0 };
    let mut b = CircuitBuilder::new("bell", 2, clbits);
    b.h(0)?.cx(0, 1)?;
    if measure {
        b.measure_all()?;
    }
    Ok(b.build())
}

/// The n-qubit GHZ state (|0…0⟩ + |1…1⟩)/√2.
///
/// One superposition gate on qubit 0, then entangling CNOTs fanning out
/// from qubit 0 to qubits 1..n in ascending order.
pub fn ghz_state(n: u32, measure: bool) -> IrResult<Circuit> {
    let clbits = if measure { n } else { 0 };
    let mut b = CircuitBuilder::new("ghz", n, clbits);
    b.h(0)?;
    for k in 1..n {
        b.cx(0, k)?;
    }
    if measure {
        b.measure_all()?;
    }
    Ok(b.build())
}

#[cfg(test)]
mod tests {
    use super::*;
    use hrimfax_ir::{Gate, Op, QubitId};
    use proptest::prelude::*;

    #[test]
    fn test_bell_without_measurement_is_two_ops() {
        let c = bell_state(false).unwrap();
        assert_eq!(c.num_ops(), 2);
        assert_eq!(c.ops()[0].as_gate(), Some(&Gate::H));
        assert_eq!(
            c.ops()[1],
            Op::Gate {
                gate: Gate::Cx,
                qubits: vec![QubitId(0), QubitId(1)],
            }
        );
    }

    #[test]
    fn test_bell_with_measurement() {
        let c = bell_state(true).unwrap();
        assert_eq!(c.num_ops(), 4);
        assert!(c.ops()[2].is_measure());
        assert!(c.ops()[3].is_measure());
    }

    proptest! {
        // For all n ≥ 2: exactly one superposition op, then n-1 entangling
        // CNOTs from control 0 to targets 1..n in ascending order.
        #[test]
        fn test_ghz_structure(n in 2u32..48) {
            let c = ghz_state(n, false).unwrap();
            prop_assert_eq!(c.num_ops(), n as usize);
            prop_assert_eq!(c.ops()[0].as_gate(), Some(&Gate::H));
            prop_assert_eq!(c.ops()[0].qubits(), &[QubitId(0)]);
            for k in 1..n {
                let op = &c.ops()[k as usize];
                prop_assert_eq!(op.as_gate(), Some(&Gate::Cx));
                prop_assert_eq!(op.qubits(), &[QubitId(0), QubitId(k)]);
            }
        }
    }

    #[test]
    fn test_ghz_matches_builder_sugar() {
        let template = ghz_state(5, false).unwrap();
        let mut b = hrimfax_ir::CircuitBuilder::new("ghz", 5, 0);
        b.create_ghz_state().unwrap();
        assert_eq!(template.ops(), b.build().ops());
    }
}
