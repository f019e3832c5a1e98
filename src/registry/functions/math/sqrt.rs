//! sqrt() function - square root

use crate::model::Evaluation;
use crate::registry::function::MathFunction;
use crate::registry::signature::FunctionSignature;

/// sqrt() function - square root
pub struct SqrtFunction;

impl MathFunction for SqrtFunction {
    fn name(&self) -> &str {
        "sqrt"
    }
    fn human_friendly_name(&self) -> &str {
        "Square Root"
    }
    fn signature(&self) -> &FunctionSignature {
        static SIG: std::sync::LazyLock<FunctionSignature> =
            std::sync::LazyLock::new(|| FunctionSignature::unary("sqrt"));
        &SIG
    }

    fn documentation(&self) -> &str {
        "Returns the non-negative square root of x. Undefined for negative x."
    }

    fn evaluate(&self, args: &[f64]) -> Evaluation {
        let [x] = *args else {
            return Evaluation::Undefined;
        };
        if x < 0.0 {
            return Evaluation::Undefined;
        }
        Evaluation::from_f64(x.sqrt())
    }
}
