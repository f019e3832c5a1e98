//! sin(), cos(), tan() functions (radians)

use crate::model::Evaluation;
use crate::registry::function::MathFunction;
use crate::registry::signature::FunctionSignature;

/// sin() function
pub struct SinFunction;

impl MathFunction for SinFunction {
    fn name(&self) -> &str {
        "sin"
    }
    fn human_friendly_name(&self) -> &str {
        "Sine"
    }
    fn signature(&self) -> &FunctionSignature {
        static SIG: std::sync::LazyLock<FunctionSignature> =
            std::sync::LazyLock::new(|| FunctionSignature::unary("sin"));
        &SIG
    }

    fn documentation(&self) -> &str {
        "Returns the sine of x (radians)."
    }

    fn evaluate(&self, args: &[f64]) -> Evaluation {
        let [x] = *args else {
            return Evaluation::Undefined;
        };
        Evaluation::from_f64(x.sin())
    }
}

/// cos() function
pub struct CosFunction;

impl MathFunction for CosFunction {
    fn name(&self) -> &str {
        "cos"
    }
    fn human_friendly_name(&self) -> &str {
        "Cosine"
    }
    fn signature(&self) -> &FunctionSignature {
        static SIG: std::sync::LazyLock<FunctionSignature> =
            std::sync::LazyLock::new(|| FunctionSignature::unary("cos"));
        &SIG
    }

    fn documentation(&self) -> &str {
        "Returns the cosine of x (radians)."
    }

    fn evaluate(&self, args: &[f64]) -> Evaluation {
        let [x] = *args else {
            return Evaluation::Undefined;
        };
        Evaluation::from_f64(x.cos())
    }
}

/// tan() function
///
/// Near odd multiples of pi/2 the result is large but finite, so it is
/// reported as a value rather than `Undefined`.
pub struct TanFunction;

impl MathFunction for TanFunction {
    fn name(&self) -> &str {
        "tan"
    }
    fn human_friendly_name(&self) -> &str {
        "Tangent"
    }
    fn signature(&self) -> &FunctionSignature {
        static SIG: std::sync::LazyLock<FunctionSignature> =
            std::sync::LazyLock::new(|| FunctionSignature::unary("tan"));
        &SIG
    }

    fn documentation(&self) -> &str {
        "Returns the tangent of x (radians)."
    }

    fn evaluate(&self, args: &[f64]) -> Evaluation {
        let [x] = *args else {
            return Evaluation::Undefined;
        };
        Evaluation::from_f64(x.tan())
    }
}
