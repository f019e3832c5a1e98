//! floor() function - round toward negative infinity

use crate::model::Evaluation;
use crate::registry::function::MathFunction;
use crate::registry::signature::FunctionSignature;

/// floor() function
pub struct FloorFunction;

impl MathFunction for FloorFunction {
    fn name(&self) -> &str {
        "floor"
    }
    fn human_friendly_name(&self) -> &str {
        "Floor"
    }
    fn signature(&self) -> &FunctionSignature {
        static SIG: std::sync::LazyLock<FunctionSignature> =
            std::sync::LazyLock::new(|| FunctionSignature::unary("floor"));
        &SIG
    }

    fn documentation(&self) -> &str {
        "Returns the greatest integer less than or equal to x."
    }

    fn evaluate(&self, args: &[f64]) -> Evaluation {
        let [x] = *args else {
            return Evaluation::Undefined;
        };
        Evaluation::from_f64(x.floor())
    }
}
