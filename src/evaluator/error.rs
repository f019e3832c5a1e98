//! Error types for expression compilation

use crate::parser::ParseError;
use crate::registry::FunctionError;
use thiserror::Error;

/// Result type for compiling expressions
pub type CompileResult<T> = Result<T, EvaluationError>;

/// Errors that make an expression unusable.
///
/// These are raised once, when the expression is compiled. Per-point
/// arithmetic failures are never errors; they evaluate to `Undefined`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvaluationError {
    /// Expression text failed to parse
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    /// Function called with the wrong number of arguments
    #[error("Function error: {0}")]
    Function(#[from] FunctionError),

    /// Name that is neither the variable nor a registered constant
    #[error(
        "Unknown identifier '{name}': only '{variable}' and registered constants may be referenced"
    )]
    UnknownIdentifier {
        /// Identifier name
        name: String,
        /// The bound variable name
        variable: String,
    },

    /// Call to a function that is not registered
    #[error("Unknown function '{name}'")]
    UnknownFunction {
        /// Function name
        name: String,
    },

    /// A function name used without a call
    #[error("'{name}' is a function and must be called with arguments")]
    FunctionUsedAsValue {
        /// Function name
        name: String,
    },

    /// The variable or a constant used as if it were a function
    #[error("'{name}' is not a function")]
    NotCallable {
        /// Name that was called
        name: String,
    },
}
