//! pow() function - exponentiation

use crate::ast::BinaryOperator;
use crate::model::Evaluation;
use crate::registry::function::MathFunction;
use crate::registry::signature::{FunctionSignature, ParameterInfo};

/// pow() function, the call form of the `^` / `**` operator
pub struct PowerFunction;

impl MathFunction for PowerFunction {
    fn name(&self) -> &str {
        "pow"
    }
    fn human_friendly_name(&self) -> &str {
        "Power"
    }
    fn signature(&self) -> &FunctionSignature {
        static SIG: std::sync::LazyLock<FunctionSignature> = std::sync::LazyLock::new(|| {
            FunctionSignature::new(
                "pow",
                vec![ParameterInfo::new("base"), ParameterInfo::new("exponent")],
            )
        });
        &SIG
    }

    fn documentation(&self) -> &str {
        "Returns base raised to exponent. Undefined when the result is not a finite real."
    }

    fn evaluate(&self, args: &[f64]) -> Evaluation {
        let [base, exponent] = *args else {
            return Evaluation::Undefined;
        };
        Evaluation::from_f64(BinaryOperator::Power.apply(base, exponent))
    }
}
