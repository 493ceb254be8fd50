//! Gate definitions.

use serde::{Deserialize, Serialize};

use crate::parameter::ParamExpr;

/// A quantum gate.
///
/// Fixed-arity gates carry no payload; rotation and phase gates carry a
/// [`ParamExpr`] angle; the multi-controlled X carries its control count
/// (arity is `controls + 1`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Gate {
    /// Hadamard.
    H,
    /// Pauli-X.
    X,
    /// Pauli-Y.
    Y,
    /// Pauli-Z.
    Z,
    /// S gate (√Z).
    S,
    /// S-dagger.
    Sdg,
    /// T gate (⁴√Z).
    T,
    /// T-dagger.
    Tdg,
    /// Rotation around X: Rx(θ).
    Rx(ParamExpr),
    /// Rotation around Y: Ry(θ).
    Ry(ParamExpr),
    /// Rotation around Z: Rz(θ).
    Rz(ParamExpr),
    /// Phase gate: P(λ) = diag(1, e^{iλ}).
    Phase(ParamExpr),
    /// Controlled-NOT.
    Cx,
    /// Controlled-Y.
    Cy,
    /// Controlled-Z.
    Cz,
    /// Controlled phase: CP(λ).
    CPhase(ParamExpr),
    /// SWAP.
    Swap,
    /// Toffoli (CCNOT).
    Ccx,
    /// Multi-controlled X with `controls` control qubits.
    Mcx {
        /// Number of control qubits (≥ 1).
        controls: u32,
    },
}

impl Gate {
    /// The canonical lowercase gate name.
    pub fn name(&self) -> &'static str {
        match self {
            Gate::H => "h",
            Gate::X => "x",
            Gate::Y => "y",
            Gate::Z => "z",
            Gate::S => "s",
            Gate::Sdg => "sdg",
            Gate::T => "t",
            Gate::Tdg => "tdg",
            Gate::Rx(_) => "rx",
            Gate::Ry(_) => "ry",
            Gate::Rz(_) => "rz",
            Gate::Phase(_) => "p",
            Gate::Cx => "cx",
            Gate::Cy => "cy",
            Gate::Cz => "cz",
            Gate::CPhase(_) => "cp",
            Gate::Swap => "swap",
            Gate::Ccx => "ccx",
            Gate::Mcx { .. } => "mcx",
        }
    }

    /// Number of qubits this gate acts on.
    pub fn num_qubits(&self) -> u32 {
        match self {
            Gate::H
            | Gate::X
            | Gate::Y
            | Gate::Z
            | Gate::S
            | Gate::Sdg
            | Gate::T
            | Gate::Tdg
            | Gate::Rx(_)
            | Gate::Ry(_)
            | Gate::Rz(_)
            | Gate::Phase(_) => 1,
            Gate::Cx | Gate::Cy | Gate::Cz | Gate::CPhase(_) | Gate::Swap => 2,
            Gate::Ccx => 3,
            Gate::Mcx { controls } => controls + 1,
        }
    }

    /// True if this gate carries an angle parameter.
    pub fn is_parameterized(&self) -> bool {
        self.param().is_some()
    }

    /// The angle parameter, if any.
    pub fn param(&self) -> Option<&ParamExpr> {
        match self {
            Gate::Rx(p) | Gate::Ry(p) | Gate::Rz(p) | Gate::Phase(p) | Gate::CPhase(p) => Some(p),
            _ => None,
        }
    }

    /// Rebuild this gate with `name` bound to `value` in its parameter.
    pub fn bind(&self, name: &str, value: f64) -> Self {
        match self {
            Gate::Rx(p) => Gate::Rx(p.bind(name, value)),
            Gate::Ry(p) => Gate::Ry(p.bind(name, value)),
            Gate::Rz(p) => Gate::Rz(p.bind(name, value)),
            Gate::Phase(p) => Gate::Phase(p.bind(name, value)),
            Gate::CPhase(p) => Gate::CPhase(p.bind(name, value)),
            other => other.clone(),
        }
    }

    /// The structural inverse of this gate.
    ///
    /// Rotations and phases negate their angle; a symbolic angle cannot be
    /// negated structurally and returns `None`.
    pub fn inverse(&self) -> Option<Self> {
        let neg = |p: &ParamExpr| p.as_f64().map(|v| ParamExpr::Value(-v));
        match self {
            Gate::H | Gate::X | Gate::Y | Gate::Z | Gate::Cx | Gate::Cy | Gate::Cz | Gate::Swap
            | Gate::Ccx => Some(self.clone()),
            Gate::Mcx { controls } => Some(Gate::Mcx {
                controls: *controls,
            }),
            Gate::S => Some(Gate::Sdg),
            Gate::Sdg => Some(Gate::S),
            Gate::T => Some(Gate::Tdg),
            Gate::Tdg => Some(Gate::T),
            Gate::Rx(p) => neg(p).map(Gate::Rx),
            Gate::Ry(p) => neg(p).map(Gate::Ry),
            Gate::Rz(p) => neg(p).map(Gate::Rz),
            Gate::Phase(p) => neg(p).map(Gate::Phase),
            Gate::CPhase(p) => neg(p).map(Gate::CPhase),
        }
    }

    /// True if applying the same gate twice on the same wires is identity.
    pub fn is_self_inverse(&self) -> bool {
        matches!(
            self,
            Gate::H
                | Gate::X
                | Gate::Y
                | Gate::Z
                | Gate::Cx
                | Gate::Cy
                | Gate::Cz
                | Gate::Swap
                | Gate::Ccx
                | Gate::Mcx { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arity() {
        assert_eq!(Gate::H.num_qubits(), 1);
        assert_eq!(Gate::CPhase(ParamExpr::value(0.5)).num_qubits(), 2);
        assert_eq!(Gate::Mcx { controls: 4 }.num_qubits(), 5);
    }

    #[test]
    fn test_inverse_rotation_negates() {
        let g = Gate::Rz(ParamExpr::value(0.25));
        assert_eq!(g.inverse(), Some(Gate::Rz(ParamExpr::value(-0.25))));
    }

    #[test]
    fn test_inverse_of_symbolic_rotation_is_none() {
        let g = Gate::Ry(ParamExpr::symbol("theta"));
        assert!(g.inverse().is_none());
    }

    #[test]
    fn test_s_t_daggers() {
        assert_eq!(Gate::S.inverse(), Some(Gate::Sdg));
        assert_eq!(Gate::Tdg.inverse(), Some(Gate::T));
    }

    #[test]
    fn test_bind_reaches_controlled_phase() {
        let g = Gate::CPhase(ParamExpr::symbol("lam"));
        let bound = g.bind("lam", 1.0);
        assert_eq!(bound.param().and_then(ParamExpr::as_f64), Some(1.0));
    }
}
