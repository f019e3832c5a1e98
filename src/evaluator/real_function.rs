//! The evaluation seam used by the search engine and the curve sampler

use crate::model::Evaluation;

/// A total function from the reals to [`Evaluation`]
///
/// Implemented by [`CompiledExpression`](super::CompiledExpression) and by
/// any `Fn(f64) -> Evaluation` closure.
pub trait RealFunction {
    /// Evaluate at one point
    fn evaluate(&self, x: f64) -> Evaluation;

    /// Evaluate at every point of `xs`, preserving order and length
    fn evaluate_many(&self, xs: &[f64]) -> Vec<Evaluation> {
        xs.iter().map(|&x| self.evaluate(x)).collect()
    }
}

impl<F> RealFunction for F
where
    F: Fn(f64) -> Evaluation,
{
    fn evaluate(&self, x: f64) -> Evaluation {
        self(x)
    }
}
