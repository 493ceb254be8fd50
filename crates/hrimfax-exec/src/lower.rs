//! Circuit lowering for dispatch.
//!
//! Levels are cumulative:
//!
//! | Level | Effect |
//! |-------|--------|
//! | 0 | validate against capabilities, pass through unchanged |
//! | 1 | strip barriers |
//! | 2+ | cancel adjacent self-inverse gate pairs on identical wires |

use tracing::debug;

use hrimfax_hal::{Capabilities, HalError, HalResult};
use hrimfax_ir::{Circuit, Op};

/// Lower a circuit for a target backend at the given optimization level.
///
/// # Errors
///
/// Returns [`HalError::CircuitTooLarge`] when the circuit needs more
/// qubits than the target exposes.
pub fn lower(circuit: &Circuit, caps: &Capabilities, level: u8) -> HalResult<Circuit> {
    if circuit.num_qubits() > caps.num_qubits {
        return Err(HalError::CircuitTooLarge(format!(
            "circuit requires {} qubits but '{}' has {}",
            circuit.num_qubits(),
            caps.name,
            caps.num_qubits
        )));
    }

    if level == 0 {
        return Ok(circuit.clone());
    }

    let mut lowered = strip_barriers(circuit);
    if level >= 2 {
        lowered = cancel_self_inverse_pairs(&lowered);
    }

    debug!(
        level,
        before = circuit.num_ops(),
        after = lowered.num_ops(),
        "lowered circuit"
    );
    Ok(lowered)
}

fn strip_barriers(circuit: &Circuit) -> Circuit {
    let ops = circuit
        .ops()
        .iter()
        .filter(|op| !op.is_barrier())
        .cloned()
        .collect();
    circuit.with_ops(ops)
}

/// Remove adjacent identical self-inverse gates on identical wires.
///
/// Works as a stack pass, so chains collapse transitively: H H H H on one
/// qubit cancels to nothing.
fn cancel_self_inverse_pairs(circuit: &Circuit) -> Circuit {
    let mut out: Vec<Op> = Vec::with_capacity(circuit.num_ops());
    for op in circuit.ops() {
        let cancels = match (out.last(), op) {
            (
                Some(Op::Gate {
                    gate: prev_gate,
                    qubits: prev_qubits,
                }),
                Op::Gate { gate, qubits },
            ) => prev_gate == gate && prev_qubits == qubits && gate.is_self_inverse(),
            _ => false,
        };
        if cancels {
            out.pop();
        } else {
            out.push(op.clone());
        }
    }
    circuit.with_ops(out)
}
