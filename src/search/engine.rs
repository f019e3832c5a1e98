//! The delta search

use super::policy::SearchPolicy;
use super::query::{ContinuityQuery, QueryResult};
use crate::evaluator::RealFunction;
use crate::model::Evaluation;
use crate::sampling::linspace;
use serde::Serialize;
use std::fmt;

/// Outcome of a delta search
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DeltaResult {
    /// The smallest passing candidate
    Found {
        /// The delta, always positive
        delta: f64,
    },
    /// No candidate passed
    NotFound,
}

impl DeltaResult {
    /// The delta, if one was found
    pub fn delta(&self) -> Option<f64> {
        match *self {
            Self::Found { delta } => Some(delta),
            Self::NotFound => None,
        }
    }

    /// Check whether a delta was found
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found { .. })
    }

    /// The open interval `(a - delta, a + delta)` around `point`
    pub fn neighborhood(&self, point: f64) -> Option<(f64, f64)> {
        self.delta().map(|delta| (point - delta, point + delta))
    }
}

impl fmt::Display for DeltaResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Found { delta } => write!(f, "delta = {delta:.6}"),
            Self::NotFound => write!(f, "no delta found"),
        }
    }
}

/// Scans candidate deltas in ascending order and returns the first that holds
#[derive(Debug, Clone, Copy, Default)]
pub struct DeltaSearch {
    policy: SearchPolicy,
}

impl DeltaSearch {
    /// Create a search with a validated policy
    pub fn new(policy: SearchPolicy) -> QueryResult<Self> {
        policy.validate()?;
        Ok(Self { policy })
    }

    /// The policy in use
    pub fn policy(&self) -> &SearchPolicy {
        &self.policy
    }

    /// Run the search for one query.
    ///
    /// An undefined `f(a)` needs no special handling: every comparison fails,
    /// so every candidate is rejected.
    pub fn search<F>(&self, function: &F, query: &ContinuityQuery) -> DeltaResult
    where
        F: RealFunction + ?Sized,
    {
        let point = query.point();
        let epsilon = query.epsilon();
        let f_at_point = function.evaluate(point);
        let samples = self.policy.samples_per_side();

        log::debug!(
            "searching delta at a={point}, eps={epsilon}, f(a)={f_at_point} ({})",
            self.policy
        );

        for (index, delta) in self.policy.candidates(epsilon).enumerate() {
            if !(delta.is_finite() && delta > 0.0) {
                log::trace!("candidate #{index} delta={delta} skipped");
                continue;
            }
            if Self::holds(function, point, f_at_point, epsilon, delta, samples) {
                log::debug!("candidate #{index} delta={delta} holds");
                return DeltaResult::Found { delta };
            }
            log::trace!("candidate #{index} delta={delta} rejected");
        }

        log::debug!(
            "no delta among {} candidates holds",
            self.policy.candidate_count()
        );
        DeltaResult::NotFound
    }

    /// Check the bound over `samples` points on each side of `point`.
    ///
    /// Both sides include `point` itself. A sample position that is not
    /// finite fails. Stops at the first failing sample.
    fn holds<F>(
        function: &F,
        point: f64,
        f_at_point: Evaluation,
        epsilon: f64,
        delta: f64,
        samples: usize,
    ) -> bool
    where
        F: RealFunction + ?Sized,
    {
        let left = linspace(point - delta, point, samples);
        let right = linspace(point, point + delta, samples);
        left.chain(right).all(|x| {
            x.is_finite()
                && function
                    .evaluate(x)
                    .distance(f_at_point)
                    .is_some_and(|distance| distance < epsilon)
        })
    }
}

/// Validate `policy` and search once
pub fn search<F>(
    function: &F,
    query: &ContinuityQuery,
    policy: SearchPolicy,
) -> QueryResult<DeltaResult>
where
    F: RealFunction + ?Sized,
{
    Ok(DeltaSearch::new(policy)?.search(function, query))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluator::CompiledExpression;
    use std::cell::Cell;

    fn expr(source: &str) -> CompiledExpression {
        CompiledExpression::compile(source).unwrap()
    }

    fn query(point: f64, epsilon: f64) -> ContinuityQuery {
        ContinuityQuery::new(point, epsilon).unwrap()
    }

    #[test]
    fn test_identity_takes_the_first_candidate() {
        let result = search(&expr("x"), &query(1.0, 1.0), SearchPolicy::bounded()).unwrap();
        assert_eq!(result, DeltaResult::Found { delta: 0.5 });
        assert_eq!(result.neighborhood(1.0), Some((0.5, 1.5)));
    }

    #[test]
    fn test_square_rejects_every_bounded_candidate() {
        // (1 + 0.05)^2 - 1 already exceeds 0.1
        let result = search(&expr("x**2"), &query(1.0, 0.1), SearchPolicy::bounded()).unwrap();
        assert_eq!(result, DeltaResult::NotFound);
    }

    #[test]
    fn test_square_with_fixed_range() {
        let result = search(&expr("x**2"), &query(1.0, 0.1), SearchPolicy::fixed()).unwrap();
        assert_eq!(result, DeltaResult::Found { delta: 0.00001 });
    }

    #[test]
    fn test_undefined_point_is_not_found() {
        let result = search(&expr("1/x"), &query(0.0, 0.5), SearchPolicy::bounded()).unwrap();
        assert_eq!(result, DeltaResult::NotFound);
    }

    #[test]
    fn test_closures_are_searchable() {
        let step = |x: f64| Evaluation::Finite(if x < 0.0 { 0.0 } else { 1.0 });
        let result = search(&step, &query(0.0, 0.5), SearchPolicy::fixed()).unwrap();
        assert_eq!(result, DeltaResult::NotFound);
    }

    #[test]
    fn test_search_short_circuits() {
        let calls = Cell::new(0usize);
        let undefined = |_x: f64| {
            calls.set(calls.get() + 1);
            Evaluation::Undefined
        };
        let policy = SearchPolicy::bounded().with_candidates(10);
        search(&undefined, &query(0.0, 1.0), policy).unwrap();
        // one evaluation of f(a), then one sample per rejected candidate
        assert_eq!(calls.get(), 11);
    }

    #[test]
    fn test_huge_epsilon_finds_a_finite_delta() {
        let result = search(&expr("1"), &query(0.0, 1e308), SearchPolicy::bounded()).unwrap();
        assert_eq!(result, DeltaResult::Found { delta: 1e308 / 2.0 });
        assert!(result.delta().is_some_and(|d| d.is_finite() && d > 0.0));
    }

    #[test]
    fn test_neighborhood_beyond_f64_range_is_rejected() {
        // a - delta overflows, so the left samples are not finite positions
        let constant = |_x: f64| Evaluation::Finite(1.0);
        let result = search(&constant, &query(-1.7e308, 1e308), SearchPolicy::bounded()).unwrap();
        assert_eq!(result, DeltaResult::NotFound);
    }

    #[test]
    fn test_invalid_policy_is_rejected() {
        let policy = SearchPolicy::bounded().with_samples_per_side(0);
        assert!(search(&expr("x"), &query(0.0, 1.0), policy).is_err());
    }

    #[test]
    fn test_serialization() {
        assert_eq!(
            serde_json::to_value(DeltaResult::Found { delta: 0.25 }).unwrap(),
            serde_json::json!({"status": "found", "delta": 0.25})
        );
        assert_eq!(
            serde_json::to_value(DeltaResult::NotFound).unwrap(),
            serde_json::json!({"status": "not_found"})
        );
    }
}
