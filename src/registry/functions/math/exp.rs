//! exp() function - natural exponential

use crate::model::Evaluation;
use crate::registry::function::MathFunction;
use crate::registry::signature::FunctionSignature;

/// exp() function
pub struct ExpFunction;

impl MathFunction for ExpFunction {
    fn name(&self) -> &str {
        "exp"
    }
    fn human_friendly_name(&self) -> &str {
        "Exponential"
    }
    fn signature(&self) -> &FunctionSignature {
        static SIG: std::sync::LazyLock<FunctionSignature> =
            std::sync::LazyLock::new(|| FunctionSignature::unary("exp"));
        &SIG
    }

    fn documentation(&self) -> &str {
        "Returns e raised to the power x. Undefined when the result overflows."
    }

    fn evaluate(&self, args: &[f64]) -> Evaluation {
        let [x] = *args else {
            return Evaluation::Undefined;
        };
        Evaluation::from_f64(x.exp())
    }
}
