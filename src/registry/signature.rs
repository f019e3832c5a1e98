//! Function signatures for arity checking and listings

use serde::Serialize;
use std::fmt;

/// Function signature
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct FunctionSignature {
    /// Function name
    pub name: String,
    /// Parameters, in call order
    pub parameters: Vec<ParameterInfo>,
}

/// Parameter information for functions
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ParameterInfo {
    /// Parameter name
    pub name: String,
}

impl ParameterInfo {
    /// Create a parameter
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl FunctionSignature {
    /// Create a new function signature
    pub fn new(name: impl Into<String>, parameters: Vec<ParameterInfo>) -> Self {
        Self {
            name: name.into(),
            parameters,
        }
    }

    /// Create a signature for a one-argument function of `x`
    pub fn unary(name: impl Into<String>) -> Self {
        Self::new(name, vec![ParameterInfo::new("x")])
    }

    /// Number of arguments the function takes
    pub fn arity(&self) -> usize {
        self.parameters.len()
    }
}

impl fmt::Display for FunctionSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.name)?;
        for (i, param) in self.parameters.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            f.write_str(&param.name)?;
        }
        f.write_str(")")
    }
}
