//! abs() function - absolute value

use crate::model::Evaluation;
use crate::registry::function::MathFunction;
use crate::registry::signature::FunctionSignature;

/// abs() function - absolute value
pub struct AbsFunction;

impl MathFunction for AbsFunction {
    fn name(&self) -> &str {
        "abs"
    }
    fn human_friendly_name(&self) -> &str {
        "Absolute Value"
    }
    fn signature(&self) -> &FunctionSignature {
        static SIG: std::sync::LazyLock<FunctionSignature> =
            std::sync::LazyLock::new(|| FunctionSignature::unary("abs"));
        &SIG
    }

    fn documentation(&self) -> &str {
        "Returns the absolute value of x."
    }

    fn evaluate(&self, args: &[f64]) -> Evaluation {
        let [x] = *args else {
            return Evaluation::Undefined;
        };
        Evaluation::from_f64(x.abs())
    }
}
