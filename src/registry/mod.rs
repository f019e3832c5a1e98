//! Function and constant registry
//!
//! The registry is the sandbox boundary for expressions: the bound variable
//! plus whatever is registered here is the complete set of resolvable names.

pub mod function;
pub mod functions;
pub mod signature;

pub use function::{ConstantInfo, FunctionError, FunctionRegistry, FunctionResult, MathFunction};
pub use signature::{FunctionSignature, ParameterInfo};

use once_cell::sync::Lazy;
use std::sync::Arc;

static STANDARD_REGISTRY: Lazy<Arc<FunctionRegistry>> =
    Lazy::new(|| Arc::new(create_standard_registry()));

/// Create a registry holding the elementary function library and `pi`
pub fn create_standard_registry() -> FunctionRegistry {
    let mut registry = FunctionRegistry::new();
    functions::math::register_math_functions(&mut registry);
    registry.register_constant(
        "pi",
        std::f64::consts::PI,
        "Ratio of a circle's circumference to its diameter",
    );
    registry
}

/// Shared instance of the standard registry
pub fn standard_registry() -> Arc<FunctionRegistry> {
    Arc::clone(&STANDARD_REGISTRY)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_standard_library_is_exactly_the_elementary_set() {
        let registry = create_standard_registry();
        assert_eq!(
            registry.function_names(),
            vec!["abs", "cos", "exp", "floor", "log", "pow", "power", "sin", "sqrt", "tan"]
        );
        let constants: Vec<&str> = registry.constants().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(constants, vec!["pi"]);
    }

    #[test]
    fn test_standard_registry_is_shared() {
        assert!(Arc::ptr_eq(&standard_registry(), &standard_registry()));
    }
}
