//! The circuit type: an ordered operation list over fixed registers.

use serde::{Deserialize, Serialize};

use crate::error::{IrError, IrResult};
use crate::op::Op;

/// A quantum circuit.
///
/// Circuits are produced by [`CircuitBuilder`](crate::CircuitBuilder) and
/// immutable afterward: every qubit/clbit index in the operation list was
/// validated against the declared register sizes at build time. Operations
/// execute in list order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Circuit {
    name: String,
    num_qubits: u32,
    num_clbits: u32,
    ops: Vec<Op>,
}

impl Circuit {
    pub(crate) fn new(name: String, num_qubits: u32, num_clbits: u32, ops: Vec<Op>) -> Self {
        Self {
            name,
            num_qubits,
            num_clbits,
            ops,
        }
    }

    /// The circuit name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Size of the quantum register.
    pub fn num_qubits(&self) -> u32 {
        self.num_qubits
    }

    /// Size of the classical register.
    pub fn num_clbits(&self) -> u32 {
        self.num_clbits
    }

    /// The ordered operation list.
    pub fn ops(&self) -> &[Op] {
        &self.ops
    }

    /// Number of operations.
    pub fn num_ops(&self) -> usize {
        self.ops.len()
    }

    /// True if the circuit contains no operations.
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// True if the circuit contains any measurement.
    pub fn has_measurements(&self) -> bool {
        self.ops.iter().any(Op::is_measure)
    }

    /// Distinct symbolic parameter names, in first-use order.
    ///
    /// First-use ordering is what keeps an optimizer's parameter vector
    /// stable across rebinds of the same circuit shape.
    pub fn parameters(&self) -> Vec<String> {
        let mut seen = Vec::new();
        for op in &self.ops {
            if let Some(name) = op.as_gate().and_then(|g| g.param()).and_then(|p| p.symbol_name())
            {
                if !seen.iter().any(|s: &String| s == name) {
                    seen.push(name.to_string());
                }
            }
        }
        seen
    }

    /// True if any gate still carries a symbolic parameter.
    pub fn is_parameterized(&self) -> bool {
        self.first_unbound().is_some()
    }

    /// The first symbolic parameter in operation order, if any.
    pub fn first_unbound(&self) -> Option<String> {
        self.ops.iter().find_map(|op| {
            op.as_gate()
                .and_then(|g| g.param())
                .and_then(|p| p.symbol_name())
                .map(str::to_string)
        })
    }

    /// Bind one named parameter to a concrete value across all operations.
    ///
    /// # Errors
    ///
    /// Returns [`IrError::UnknownParameter`] if no gate references `name`.
    pub fn bind(&self, name: &str, value: f64) -> IrResult<Circuit> {
        if !self.parameters().iter().any(|p| p == name) {
            return Err(IrError::UnknownParameter(name.to_string()));
        }
        let ops = self
            .ops
            .iter()
            .map(|op| match op {
                Op::Gate { gate, qubits } => Op::Gate {
                    gate: gate.bind(name, value),
                    qubits: qubits.clone(),
                },
                other => other.clone(),
            })
            .collect();
        Ok(Circuit::new(
            self.name.clone(),
            self.num_qubits,
            self.num_clbits,
            ops,
        ))
    }

    /// Bind a full parameter vector, matched to [`parameters()`](Self::parameters)
    /// in first-use order.
    ///
    /// # Errors
    ///
    /// Returns [`IrError::ParameterCountMismatch`] if `values` does not have
    /// one entry per distinct symbol.
    pub fn bind_values(&self, values: &[f64]) -> IrResult<Circuit> {
        let names = self.parameters();
        if names.len() != values.len() {
            return Err(IrError::ParameterCountMismatch {
                expected: names.len(),
                got: values.len(),
            });
        }
        let mut bound = self.clone();
        for (name, value) in names.iter().zip(values) {
            bound = bound.bind(name, *value)?;
        }
        Ok(bound)
    }

    /// A copy of this circuit with a replacement operation list.
    ///
    /// Register sizes and name carry over; intended for transformation
    /// passes that filter or reorder operations already validated against
    /// these registers.
    pub fn with_ops(&self, ops: Vec<Op>) -> Circuit {
        Circuit::new(self.name.clone(), self.num_qubits, self.num_clbits, ops)
    }

    /// Structural inverse: operations reversed, each gate inverted.
    ///
    /// # Errors
    ///
    /// Returns [`IrError::NotInvertible`] for circuits containing
    /// measurements or gates with symbolic angles.
    pub fn inverse(&self) -> IrResult<Circuit> {
        let mut ops = Vec::with_capacity(self.ops.len());
        for op in self.ops.iter().rev() {
            match op {
                Op::Gate { gate, qubits } => {
                    let inv = gate
                        .inverse()
                        .ok_or_else(|| IrError::NotInvertible(gate.name().to_string()))?;
                    ops.push(Op::Gate {
                        gate: inv,
                        qubits: qubits.clone(),
                    });
                }
                Op::Barrier(qubits) => ops.push(Op::Barrier(qubits.clone())),
                Op::Measure { .. } => {
                    return Err(IrError::NotInvertible("measure".to_string()));
                }
            }
        }
        Ok(Circuit::new(
            format!("{}_inv", self.name),
            self.num_qubits,
            self.num_clbits,
            ops,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::CircuitBuilder;
    use crate::gate::Gate;
    use crate::parameter::ParamExpr;
    use crate::qubit::QubitId;

    fn ansatz() -> Circuit {
        let mut b = CircuitBuilder::new("ansatz", 2, 0);
        b.ry(0, "a").unwrap();
        b.ry(1, "b").unwrap();
        b.cx(0, 1).unwrap();
        b.ry(0, "a").unwrap(); // reused symbol
        b.build()
    }

    #[test]
    fn test_parameters_first_use_order_dedup() {
        let c = ansatz();
        assert_eq!(c.parameters(), vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_bind_resolves_every_use() {
        let c = ansatz().bind("a", 0.3).unwrap();
        assert_eq!(c.parameters(), vec!["b".to_string()]);
        assert_eq!(c.first_unbound(), Some("b".to_string()));
    }

    #[test]
    fn test_bind_unknown_symbol_errors() {
        let err = ansatz().bind("missing", 1.0).unwrap_err();
        assert_eq!(err, IrError::UnknownParameter("missing".to_string()));
    }

    #[test]
    fn test_bind_values_full_vector() {
        let c = ansatz().bind_values(&[0.1, 0.2]).unwrap();
        assert!(!c.is_parameterized());
        // first gate is ry("a") → 0.1
        let Op::Gate { gate, .. } = &c.ops()[0] else {
            panic!("expected gate");
        };
        assert_eq!(*gate, Gate::Ry(ParamExpr::value(0.1)));
    }

    #[test]
    fn test_bind_values_length_mismatch() {
        let err = ansatz().bind_values(&[0.1]).unwrap_err();
        assert_eq!(
            err,
            IrError::ParameterCountMismatch {
                expected: 2,
                got: 1
            }
        );
    }

    #[test]
    fn test_inverse_reverses_and_inverts() {
        let mut b = CircuitBuilder::new("c", 2, 0);
        b.h(0).unwrap();
        b.s(1).unwrap();
        b.cx(0, 1).unwrap();
        let inv = b.build().inverse().unwrap();

        assert_eq!(inv.num_ops(), 3);
        assert_eq!(
            inv.ops()[0],
            Op::Gate {
                gate: Gate::Cx,
                qubits: vec![QubitId(0), QubitId(1)],
            }
        );
        assert_eq!(inv.ops()[1].as_gate(), Some(&Gate::Sdg));
        assert_eq!(inv.ops()[2].as_gate(), Some(&Gate::H));
    }

    #[test]
    fn test_inverse_rejects_measurement() {
        let mut b = CircuitBuilder::new("c", 1, 1);
        b.h(0).unwrap();
        b.measure(0, 0).unwrap();
        let err = b.build().inverse().unwrap_err();
        assert_eq!(err, IrError::NotInvertible("measure".to_string()));
    }
}
