//! Elementary math functions

mod abs;
mod exp;
mod floor;
mod log;
mod power;
mod sqrt;
mod trigonometric;

pub use abs::AbsFunction;
pub use exp::ExpFunction;
pub use floor::FloorFunction;
pub use log::LogFunction;
pub use power::PowerFunction;
pub use sqrt::SqrtFunction;
pub use trigonometric::{CosFunction, SinFunction, TanFunction};

use crate::registry::function::FunctionRegistry;

/// Register all math functions
pub fn register_math_functions(registry: &mut FunctionRegistry) {
    registry.register(AbsFunction);
    registry.register(CosFunction);
    registry.register(ExpFunction);
    registry.register(FloorFunction);
    registry.register(LogFunction);
    registry.register(PowerFunction);
    registry.register(SinFunction);
    registry.register(SqrtFunction);
    registry.register(TanFunction);
    registry.register_alias("power", "pow");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Evaluation;
    use crate::registry::function::MathFunction;
    use rstest::rstest;

    #[rstest]
    #[case::log_of_zero(&LogFunction as &dyn MathFunction, &[0.0])]
    #[case::log_of_negative(&LogFunction, &[-1.0])]
    #[case::sqrt_of_negative(&SqrtFunction, &[-0.25])]
    #[case::exp_overflow(&ExpFunction, &[1000.0])]
    #[case::pow_zero_to_negative(&PowerFunction, &[0.0, -1.0])]
    #[case::pow_fractional_of_negative(&PowerFunction, &[-8.0, 0.5])]
    fn test_domain_violations_are_undefined(#[case] function: &dyn MathFunction, #[case] args: &[f64]) {
        assert_eq!(function.evaluate(args), Evaluation::Undefined);
    }

    #[rstest]
    #[case(&AbsFunction as &dyn MathFunction, &[-2.5], 2.5)]
    #[case(&FloorFunction, &[-0.5], -1.0)]
    #[case(&SqrtFunction, &[0.0], 0.0)]
    #[case(&LogFunction, &[1.0], 0.0)]
    #[case(&ExpFunction, &[0.0], 1.0)]
    #[case(&PowerFunction, &[2.0, 10.0], 1024.0)]
    #[case(&SinFunction, &[0.0], 0.0)]
    #[case(&CosFunction, &[0.0], 1.0)]
    #[case(&TanFunction, &[0.0], 0.0)]
    fn test_values(#[case] function: &dyn MathFunction, #[case] args: &[f64], #[case] expected: f64) {
        assert_eq!(function.evaluate(args), Evaluation::Finite(expected));
    }
}
