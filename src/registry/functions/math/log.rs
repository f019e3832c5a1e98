//! log() function - natural logarithm

use crate::model::Evaluation;
use crate::registry::function::MathFunction;
use crate::registry::signature::FunctionSignature;

/// log() function, base e
pub struct LogFunction;

impl MathFunction for LogFunction {
    fn name(&self) -> &str {
        "log"
    }
    fn human_friendly_name(&self) -> &str {
        "Natural Logarithm"
    }
    fn signature(&self) -> &FunctionSignature {
        static SIG: std::sync::LazyLock<FunctionSignature> =
            std::sync::LazyLock::new(|| FunctionSignature::unary("log"));
        &SIG
    }

    fn documentation(&self) -> &str {
        "Returns the natural logarithm of x. Undefined for x <= 0."
    }

    fn evaluate(&self, args: &[f64]) -> Evaluation {
        let [x] = *args else {
            return Evaluation::Undefined;
        };
        if x <= 0.0 {
            return Evaluation::Undefined;
        }
        Evaluation::from_f64(x.ln())
    }
}
