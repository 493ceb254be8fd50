//! Grover search circuits: phase-flip oracles and the diffusion operator.

use hrimfax_ir::{Circuit, CircuitBuilder, IrError, IrResult};

fn check_bitstring(bitstring: &str, n: u32) -> IrResult<()> {
    if bitstring.len() as u32 != n {
        return Err(IrError::InvalidBitstring {
            bitstring: bitstring.to_string(),
            reason: format!("expected {n} bits, got {}", bitstring.len()),
        });
    }
    if let Some(c) = bitstring.chars().find(|c| *c != '0' && *c != '1') {
        return Err(IrError::InvalidBitstring {
            bitstring: bitstring.to_string(),
            reason: format!("non-binary character '{c}'"),
        });
    }
    Ok(())
}

/// Append one marked-string phase flip to the builder.
///
/// X-conjugation on every qubit whose bit is 0 turns the all-ones
/// condition of the multi-controlled flip into an equality test against
/// the marked string; the flip itself is the H–MCX–H sandwich on the last
/// qubit (a multi-controlled Z up to basis change).
fn append_phase_flip(b: &mut CircuitBuilder, bitstring: &str, n: u32) -> IrResult<()> {
    // Bitstring is big-endian: leftmost character is qubit n-1, matching
    // the counts-key convention.
    let zero_qubits: Vec<u32> = bitstring
        .chars()
        .rev()
        .enumerate()
        .filter(|(_, c)| *c == '0')
        .map(|(q, _)| q as u32)
        .collect();

    for &q in &zero_qubits {
        b.x(q)?;
    }
    b.h(n - 1)?;
    let controls: Vec<u32> = (0..n - 1).collect();
    b.mcx(&controls, n - 1)?;
    b.h(n - 1)?;
    for &q in &zero_qubits {
        b.x(q)?;
    }
    Ok(())
}

/// Append a phase-flip oracle over qubits `0..n` marking each bitstring
/// in `marked`.
///
/// Oracles for multiple marked strings compose by concatenation; the
/// composite is order-independent up to global phase. Requires `n ≥ 2`.
pub fn append_oracle(b: &mut CircuitBuilder, n: u32, marked: &[&str]) -> IrResult<()> {
    for bitstring in marked {
        check_bitstring(bitstring, n)?;
        append_phase_flip(b, bitstring, n)?;
    }
    Ok(())
}

/// Append the Grover diffusion operator (inversion about the mean) over
/// qubits `0..n`.
pub fn append_diffuser(b: &mut CircuitBuilder, n: u32) -> IrResult<()> {
    for q in 0..n {
        b.h(q)?;
    }
    for q in 0..n {
        b.x(q)?;
    }
    b.h(n - 1)?;
    let controls: Vec<u32> = (0..n - 1).collect();
    b.mcx(&controls, n - 1)?;
    b.h(n - 1)?;
    for q in 0..n {
        b.x(q)?;
    }
    for q in 0..n {
        b.h(q)?;
    }
    Ok(())
}

/// A standalone phase-flip oracle circuit. See [`append_oracle`].
pub fn grover_oracle(n: u32, marked: &[&str]) -> IrResult<Circuit> {
    let mut b = CircuitBuilder::new("grover_oracle", n, 0);
    append_oracle(&mut b, n, marked)?;
    Ok(b.build())
}

/// A standalone diffusion-operator circuit. See [`append_diffuser`].
pub fn grover_diffuser(n: u32) -> IrResult<Circuit> {
    let mut b = CircuitBuilder::new("grover_diffuser", n, 0);
    append_diffuser(&mut b, n)?;
    Ok(b.build())
}

#[cfg(test)]
mod tests {
    use super::*;
    use hrimfax_ir::Gate;

    #[test]
    fn test_all_ones_oracle_has_no_x_conjugation() {
        let c = grover_oracle(3, &["111"]).unwrap();
        // Just the H–MCX–H sandwich.
        assert_eq!(c.num_ops(), 3);
        assert_eq!(c.ops()[0].as_gate(), Some(&Gate::H));
        assert_eq!(c.ops()[1].as_gate(), Some(&Gate::Mcx { controls: 2 }));
        assert_eq!(c.ops()[2].as_gate(), Some(&Gate::H));
    }

    #[test]
    fn test_zero_bits_get_x_conjugated() {
        // "101" big-endian: qubit 1 holds the 0 bit.
        let c = grover_oracle(3, &["101"]).unwrap();
        assert_eq!(c.num_ops(), 5);
        assert_eq!(c.ops()[0].as_gate(), Some(&Gate::X));
        assert_eq!(c.ops()[0].qubits()[0].0, 1);
        assert_eq!(c.ops()[4].as_gate(), Some(&Gate::X));
        assert_eq!(c.ops()[4].qubits()[0].0, 1);
    }

    #[test]
    fn test_multiple_marked_strings_concatenate() {
        let one = grover_oracle(3, &["111"]).unwrap();
        let two = grover_oracle(3, &["111", "000"]).unwrap();
        assert!(two.num_ops() > one.num_ops());
        assert_eq!(&two.ops()[..one.num_ops()], one.ops());
    }

    #[test]
    fn test_wrong_length_rejected() {
        let err = grover_oracle(3, &["01"]).unwrap_err();
        assert!(matches!(err, IrError::InvalidBitstring { .. }));
    }

    #[test]
    fn test_non_binary_rejected() {
        let err = grover_oracle(3, &["01x"]).unwrap_err();
        assert!(matches!(err, IrError::InvalidBitstring { .. }));
    }

    #[test]
    fn test_diffuser_shape() {
        let c = grover_diffuser(3).unwrap();
        // 3 H + 3 X + H + MCX + H + 3 X + 3 H
        assert_eq!(c.num_ops(), 15);
        assert_eq!(c.ops()[7].as_gate(), Some(&Gate::Mcx { controls: 2 }));
    }
}
