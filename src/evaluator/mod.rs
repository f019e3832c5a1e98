//! Expression compilation and evaluation
//!
//! Parsed trees are resolved against a [`FunctionRegistry`](crate::registry::FunctionRegistry)
//! once, producing a [`CompiledExpression`] that evaluates totally: every
//! point maps to a finite value or [`Evaluation::Undefined`](crate::model::Evaluation).

mod compiled;
mod error;
mod real_function;

pub use compiled::{CompiledExpression, VARIABLE_NAME, evaluate_str};
pub use error::{CompileResult, EvaluationError};
pub use real_function::RealFunction;
