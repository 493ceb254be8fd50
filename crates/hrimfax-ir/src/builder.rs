//! Fluent circuit builder.
//!
//! Every mutating method validates its indices against the declared
//! register sizes and returns `IrResult<&mut Self>` so calls chain:
//!
//! ```rust
//! use hrimfax_ir::CircuitBuilder;
//!
//! let mut b = CircuitBuilder::new("bell", 2, 2);
//! b.h(0).unwrap().cx(0, 1).unwrap().measure_all().unwrap();
//! let circuit = b.build();
//! assert_eq!(circuit.num_ops(), 4);
//! ```
//!
//! `build()` returns a deep-copy snapshot of everything added so far; the
//! builder stays usable and `build()` can be called again for a fresh
//! snapshot. Circuits already handed out never observe later mutations.

use crate::circuit::Circuit;
use crate::error::{IrError, IrResult};
use crate::gate::Gate;
use crate::op::Op;
use crate::parameter::ParamExpr;
use crate::qubit::{ClbitId, QubitId};

/// Incrementally accumulates operations into a [`Circuit`].
#[derive(Debug, Clone)]
pub struct CircuitBuilder {
    name: String,
    num_qubits: u32,
    num_clbits: u32,
    ops: Vec<Op>,
}

impl CircuitBuilder {
    /// Create a builder over `num_qubits` qubits and `num_clbits` classical bits.
    pub fn new(name: impl Into<String>, num_qubits: u32, num_clbits: u32) -> Self {
        Self {
            name: name.into(),
            num_qubits,
            num_clbits,
            ops: Vec::new(),
        }
    }

    /// Size of the quantum register.
    pub fn num_qubits(&self) -> u32 {
        self.num_qubits
    }

    /// Size of the classical register.
    pub fn num_clbits(&self) -> u32 {
        self.num_clbits
    }

    /// Number of operations accumulated so far.
    pub fn num_ops(&self) -> usize {
        self.ops.len()
    }

    /// Snapshot the accumulated operations into an immutable [`Circuit`].
    ///
    /// Deep copy: the builder may keep mutating and `build()` may be
    /// re-invoked; previously returned circuits are unaffected.
    pub fn build(&self) -> Circuit {
        Circuit::new(
            self.name.clone(),
            self.num_qubits,
            self.num_clbits,
            self.ops.clone(),
        )
    }

    fn check_qubit(&self, index: u32, gate: &str) -> IrResult<QubitId> {
        if index >= self.num_qubits {
            return Err(IrError::QubitOutOfRange {
                index,
                gate: gate.to_string(),
                num_qubits: self.num_qubits,
            });
        }
        Ok(QubitId(index))
    }

    fn check_clbit(&self, index: u32) -> IrResult<ClbitId> {
        if index >= self.num_clbits {
            return Err(IrError::ClbitOutOfRange {
                index,
                num_clbits: self.num_clbits,
            });
        }
        Ok(ClbitId(index))
    }

    fn push_gate(&mut self, gate: Gate, indices: &[u32]) -> IrResult<&mut Self> {
        let expected = gate.num_qubits();
        if indices.len() as u32 != expected {
            return Err(IrError::QubitCountMismatch {
                gate: gate.name().to_string(),
                expected,
                got: indices.len() as u32,
            });
        }
        let mut qubits = Vec::with_capacity(indices.len());
        for &index in indices {
            let q = self.check_qubit(index, gate.name())?;
            if qubits.contains(&q) {
                return Err(IrError::DuplicateQubit {
                    qubit: index,
                    gate: gate.name().to_string(),
                });
            }
            qubits.push(q);
        }
        self.ops.push(Op::Gate { gate, qubits });
        Ok(self)
    }

    // --- single-qubit gates ---

    /// Hadamard on `qubit`.
    pub fn h(&mut self, qubit: u32) -> IrResult<&mut Self> {
        self.push_gate(Gate::H, &[qubit])
    }

    /// Pauli-X on `qubit`.
    pub fn x(&mut self, qubit: u32) -> IrResult<&mut Self> {
        self.push_gate(Gate::X, &[qubit])
    }

    /// Pauli-Y on `qubit`.
    pub fn y(&mut self, qubit: u32) -> IrResult<&mut Self> {
        self.push_gate(Gate::Y, &[qubit])
    }

    /// Pauli-Z on `qubit`.
    pub fn z(&mut self, qubit: u32) -> IrResult<&mut Self> {
        self.push_gate(Gate::Z, &[qubit])
    }

    /// S gate on `qubit`.
    pub fn s(&mut self, qubit: u32) -> IrResult<&mut Self> {
        self.push_gate(Gate::S, &[qubit])
    }

    /// S-dagger on `qubit`.
    pub fn sdg(&mut self, qubit: u32) -> IrResult<&mut Self> {
        self.push_gate(Gate::Sdg, &[qubit])
    }

    /// T gate on `qubit`.
    pub fn t(&mut self, qubit: u32) -> IrResult<&mut Self> {
        self.push_gate(Gate::T, &[qubit])
    }

    /// T-dagger on `qubit`.
    pub fn tdg(&mut self, qubit: u32) -> IrResult<&mut Self> {
        self.push_gate(Gate::Tdg, &[qubit])
    }

    // --- parameterized rotations ---
    //
    // The angle is anything convertible to a ParamExpr: an `f64` for a
    // concrete angle, or a `&str` naming a symbolic parameter. A name seen
    // before refers to the same logical parameter (symbols unify by name).

    /// Rx(θ) on `qubit`.
    pub fn rx(&mut self, qubit: u32, angle: impl Into<ParamExpr>) -> IrResult<&mut Self> {
        self.push_gate(Gate::Rx(angle.into()), &[qubit])
    }

    /// Ry(θ) on `qubit`.
    pub fn ry(&mut self, qubit: u32, angle: impl Into<ParamExpr>) -> IrResult<&mut Self> {
        self.push_gate(Gate::Ry(angle.into()), &[qubit])
    }

    /// Rz(θ) on `qubit`.
    pub fn rz(&mut self, qubit: u32, angle: impl Into<ParamExpr>) -> IrResult<&mut Self> {
        self.push_gate(Gate::Rz(angle.into()), &[qubit])
    }

    /// Phase gate P(λ) on `qubit`.
    pub fn p(&mut self, qubit: u32, angle: impl Into<ParamExpr>) -> IrResult<&mut Self> {
        self.push_gate(Gate::Phase(angle.into()), &[qubit])
    }

    // --- two-qubit gates ---

    /// CNOT with `control` and `target`.
    pub fn cx(&mut self, control: u32, target: u32) -> IrResult<&mut Self> {
        self.push_gate(Gate::Cx, &[control, target])
    }

    /// Controlled-Y.
    pub fn cy(&mut self, control: u32, target: u32) -> IrResult<&mut Self> {
        self.push_gate(Gate::Cy, &[control, target])
    }

    /// Controlled-Z.
    pub fn cz(&mut self, control: u32, target: u32) -> IrResult<&mut Self> {
        self.push_gate(Gate::Cz, &[control, target])
    }

    /// Controlled phase CP(λ).
    pub fn cp(
        &mut self,
        control: u32,
        target: u32,
        angle: impl Into<ParamExpr>,
    ) -> IrResult<&mut Self> {
        self.push_gate(Gate::CPhase(angle.into()), &[control, target])
    }

    /// SWAP two qubits.
    pub fn swap(&mut self, a: u32, b: u32) -> IrResult<&mut Self> {
        self.push_gate(Gate::Swap, &[a, b])
    }

    // --- multi-controlled gates ---

    /// Toffoli (CCNOT).
    pub fn ccx(&mut self, control_a: u32, control_b: u32, target: u32) -> IrResult<&mut Self> {
        self.push_gate(Gate::Ccx, &[control_a, control_b, target])
    }

    /// Multi-controlled X: all of `controls`, then `target`.
    pub fn mcx(&mut self, controls: &[u32], target: u32) -> IrResult<&mut Self> {
        let gate = Gate::Mcx {
            controls: controls.len() as u32,
        };
        let mut indices = controls.to_vec();
        indices.push(target);
        self.push_gate(gate, &indices)
    }

    // --- measurement and barriers ---

    /// Measure `qubit` into classical bit `clbit`.
    pub fn measure(&mut self, qubit: u32, clbit: u32) -> IrResult<&mut Self> {
        let q = self.check_qubit(qubit, "measure")?;
        let c = self.check_clbit(clbit)?;
        self.ops.push(Op::Measure { qubit: q, clbit: c });
        Ok(self)
    }

    /// Measure qubit k into classical bit k for every qubit.
    ///
    /// # Errors
    ///
    /// Fails if the classical register is smaller than the quantum register.
    pub fn measure_all(&mut self) -> IrResult<&mut Self> {
        if self.num_clbits < self.num_qubits {
            return Err(IrError::ClbitOutOfRange {
                index: self.num_qubits - 1,
                num_clbits: self.num_clbits,
            });
        }
        for k in 0..self.num_qubits {
            self.ops.push(Op::Measure {
                qubit: QubitId(k),
                clbit: ClbitId(k),
            });
        }
        Ok(self)
    }

    /// Barrier across the listed qubits.
    pub fn barrier(&mut self, qubits: &[u32]) -> IrResult<&mut Self> {
        let mut ids = Vec::with_capacity(qubits.len());
        for &index in qubits {
            ids.push(self.check_qubit(index, "barrier")?);
        }
        self.ops.push(Op::Barrier(ids));
        Ok(self)
    }

    /// Barrier across the whole register.
    pub fn barrier_all(&mut self) -> IrResult<&mut Self> {
        let ids = (0..self.num_qubits).map(QubitId).collect();
        self.ops.push(Op::Barrier(ids));
        Ok(self)
    }

    // --- convenience composites ---
    //
    // Pure sugar: each expands to exactly the primitive calls a caller
    // would make by hand, so the resulting operation sequences compare
    // equal to manual composition.

    /// H on `a` then CNOT(a, b): a Bell pair on two qubits.
    pub fn create_entangled_pair(&mut self, a: u32, b: u32) -> IrResult<&mut Self> {
        self.h(a)?.cx(a, b)
    }

    /// H on qubit 0 then CNOT(0, k) for every other qubit, ascending.
    pub fn create_ghz_state(&mut self) -> IrResult<&mut Self> {
        self.h(0)?;
        for k in 1..self.num_qubits {
            self.cx(0, k)?;
        }
        Ok(self)
    }
}
