//! Gate angle parameters: concrete values or named symbolic placeholders.
//!
//! A [`ParamExpr`] is either a concrete `f64` angle or a named symbol that
//! stays unresolved until execution or optimization time. Symbols with the
//! same name refer to the same logical parameter wherever they appear in a
//! circuit, which keeps an optimizer's parameter vector compact: binding
//! `"theta"` resolves every gate that references it.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A gate angle: concrete or symbolic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ParamExpr {
    /// A concrete angle in radians.
    Value(f64),
    /// A named placeholder, resolved at bind time.
    Symbol(String),
}

impl ParamExpr {
    /// Create a concrete value.
    pub fn value(v: f64) -> Self {
        ParamExpr::Value(v)
    }

    /// Create a named symbolic parameter.
    pub fn symbol(name: impl Into<String>) -> Self {
        ParamExpr::Symbol(name.into())
    }

    /// True if this parameter is still symbolic.
    pub fn is_symbolic(&self) -> bool {
        matches!(self, ParamExpr::Symbol(_))
    }

    /// The symbol name, if symbolic.
    pub fn symbol_name(&self) -> Option<&str> {
        match self {
            ParamExpr::Symbol(name) => Some(name),
            ParamExpr::Value(_) => None,
        }
    }

    /// The concrete value, if bound.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ParamExpr::Value(v) => Some(*v),
            ParamExpr::Symbol(_) => None,
        }
    }

    /// Substitute `name` with `value`, leaving other symbols untouched.
    pub fn bind(&self, name: &str, value: f64) -> Self {
        match self {
            ParamExpr::Symbol(n) if n == name => ParamExpr::Value(value),
            other => other.clone(),
        }
    }
}

impl fmt::Display for ParamExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamExpr::Value(v) => write!(f, "{v}"),
            ParamExpr::Symbol(name) => write!(f, "{name}"),
        }
    }
}

impl From<f64> for ParamExpr {
    fn from(v: f64) -> Self {
        ParamExpr::Value(v)
    }
}

impl From<&str> for ParamExpr {
    fn from(name: &str) -> Self {
        ParamExpr::Symbol(name.to_string())
    }
}

impl From<String> for ParamExpr {
    fn from(name: String) -> Self {
        ParamExpr::Symbol(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bind_matching_symbol() {
        let theta = ParamExpr::symbol("theta");
        assert!(theta.is_symbolic());
        let bound = theta.bind("theta", 1.5);
        assert_eq!(bound.as_f64(), Some(1.5));
    }

    #[test]
    fn test_bind_other_symbol_untouched() {
        let phi = ParamExpr::symbol("phi");
        let still = phi.bind("theta", 1.5);
        assert_eq!(still.symbol_name(), Some("phi"));
    }

    #[test]
    fn test_from_conversions() {
        assert_eq!(ParamExpr::from(0.5).as_f64(), Some(0.5));
        assert_eq!(ParamExpr::from("a").symbol_name(), Some("a"));
    }
}
