//! Function trait and the name-resolution table

use crate::model::Evaluation;
use crate::registry::signature::FunctionSignature;
use rustc_hash::FxHashMap;
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;

/// Result type for function operations
pub type FunctionResult<T> = Result<T, FunctionError>;

/// Function resolution errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FunctionError {
    /// Invalid number of arguments
    #[error("Function '{name}' expects {expected} argument(s), got {actual}")]
    InvalidArity {
        /// Function name
        name: String,
        /// Expected argument count
        expected: usize,
        /// Actual arguments provided
        actual: usize,
    },
}

/// A pure real function of a fixed number of real arguments
pub trait MathFunction: Send + Sync {
    /// Get the function name
    fn name(&self) -> &str;

    /// Get the human-friendly name for listings
    fn human_friendly_name(&self) -> &str;

    /// Get the function signature
    fn signature(&self) -> &FunctionSignature;

    /// One-line description
    fn documentation(&self) -> &str;

    /// Evaluate on finite arguments. Domain violations yield `Undefined`.
    fn evaluate(&self, args: &[f64]) -> Evaluation;

    /// Check the call-site argument count against the signature
    fn validate_arity(&self, actual: usize) -> FunctionResult<()> {
        let expected = self.signature().arity();
        if actual == expected {
            Ok(())
        } else {
            Err(FunctionError::InvalidArity {
                name: self.name().to_string(),
                expected,
                actual,
            })
        }
    }
}

/// A named numeric constant
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConstantInfo {
    /// Constant name
    pub name: String,
    /// Value
    pub value: f64,
    /// One-line description
    pub documentation: String,
}

/// The set of names an expression may resolve
///
/// Anything not registered here is rejected when an expression is compiled.
#[derive(Clone, Default)]
pub struct FunctionRegistry {
    functions: FxHashMap<String, Arc<dyn MathFunction>>,
    constants: FxHashMap<String, ConstantInfo>,
}

impl FunctionRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a function under its own name
    pub fn register<F: MathFunction + 'static>(&mut self, function: F) {
        let name = function.name().to_string();
        self.functions.insert(name, Arc::new(function));
    }

    /// Make `alias` resolve to the already registered `target`.
    ///
    /// Returns `false` when `target` is unknown.
    pub fn register_alias(&mut self, alias: impl Into<String>, target: &str) -> bool {
        match self.functions.get(target).cloned() {
            Some(function) => {
                self.functions.insert(alias.into(), function);
                true
            }
            None => false,
        }
    }

    /// Register a named constant
    pub fn register_constant(
        &mut self,
        name: impl Into<String>,
        value: f64,
        documentation: impl Into<String>,
    ) {
        let name = name.into();
        self.constants.insert(
            name.clone(),
            ConstantInfo {
                name,
                value,
                documentation: documentation.into(),
            },
        );
    }

    /// Look up a function by name
    pub fn get_function(&self, name: &str) -> Option<&Arc<dyn MathFunction>> {
        self.functions.get(name)
    }

    /// Look up a constant by name
    pub fn get_constant(&self, name: &str) -> Option<&ConstantInfo> {
        self.constants.get(name)
    }

    /// Registered function names (aliases included), sorted
    pub fn function_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.functions.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Registered functions as `(registered name, function)`, sorted by name
    pub fn functions(&self) -> Vec<(&str, &Arc<dyn MathFunction>)> {
        let mut entries: Vec<_> = self
            .functions
            .iter()
            .map(|(name, function)| (name.as_str(), function))
            .collect();
        entries.sort_unstable_by(|a, b| a.0.cmp(b.0));
        entries
    }

    /// Registered constants, sorted by name
    pub fn constants(&self) -> Vec<&ConstantInfo> {
        let mut constants: Vec<_> = self.constants.values().collect();
        constants.sort_unstable_by(|a, b| a.name.cmp(&b.name));
        constants
    }
}

impl std::fmt::Debug for FunctionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FunctionRegistry")
            .field("functions", &self.function_names())
            .field("constants", &self.constants.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::functions::math::SinFunction;

    #[test]
    fn test_register_and_alias() {
        let mut registry = FunctionRegistry::new();
        registry.register(SinFunction);
        assert!(registry.register_alias("sine", "sin"));
        assert!(!registry.register_alias("cosine", "cos"));

        let function = registry.get_function("sine").unwrap();
        assert_eq!(function.name(), "sin");
        assert_eq!(registry.function_names(), vec!["sin", "sine"]);
    }

    #[test]
    fn test_arity_validation() {
        let err = SinFunction.validate_arity(2).unwrap_err();
        assert_eq!(
            err,
            FunctionError::InvalidArity {
                name: "sin".to_string(),
                expected: 1,
                actual: 2,
            }
        );
        assert!(SinFunction.validate_arity(1).is_ok());
    }

    #[test]
    fn test_constants() {
        let mut registry = FunctionRegistry::new();
        registry.register_constant("tau", std::f64::consts::TAU, "Full turn");
        assert_eq!(registry.get_constant("tau").unwrap().value, std::f64::consts::TAU);
        assert!(registry.get_constant("pi").is_none());
    }
}
