//! Calculator facade - the main entry point for continuity analysis

use crate::curve::{CurveSettings, DisplayDomain, SampledCurve, sample_curve};
use crate::error::Result;
use crate::evaluator::CompiledExpression;
use crate::model::Evaluation;
use crate::registry::{FunctionRegistry, standard_registry};
use crate::search::{
    ContinuityQuery, DeltaResult, DeltaSearch, EpsilonGrid, SearchPolicy, SweepTable, sweep_grid,
};
use rustc_hash::FxHashMap;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

/// Default number of compiled expressions kept by a calculator
pub const DEFAULT_MAX_CACHE_SIZE: usize = 256;

/// Everything a host needs to render one analysis
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContinuityReport {
    pub expression: String,
    pub point: f64,
    pub epsilon: f64,
    pub policy: SearchPolicy,
    /// `f(a)`
    pub f_at_point: Evaluation,
    pub delta: DeltaResult,
    /// `(a - delta, a + delta)` when a delta was found
    pub neighborhood: Option<(f64, f64)>,
    /// `(f(a) - epsilon, f(a) + epsilon)` when `f(a)` is finite
    pub epsilon_band: Option<(f64, f64)>,
    pub curve: SampledCurve,
}

impl ContinuityReport {
    pub fn verdict(&self) -> Verdict {
        if self.delta.is_found() {
            Verdict::Continuous
        } else {
            Verdict::PossiblyDiscontinuous
        }
    }
}

/// Reading of a search outcome for one epsilon
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    /// A delta holds for this epsilon
    Continuous,
    /// No candidate held; the function may not be continuous at the point
    PossiblyDiscontinuous,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Continuous => write!(f, "continuous for this epsilon"),
            Verdict::PossiblyDiscontinuous => write!(f, "may not be continuous"),
        }
    }
}

/// Compiles expressions, searches for deltas and samples display curves
#[derive(Debug, Clone)]
pub struct Calculator {
    registry: Arc<FunctionRegistry>,
    search: DeltaSearch,
    curve: CurveSettings,
    /// Compiled expressions keyed by source text
    expression_cache: FxHashMap<String, Arc<CompiledExpression>>,
    /// Cache is cleared once it holds this many entries
    max_cache_size: usize,
}

impl Default for Calculator {
    fn default() -> Self {
        Self::new()
    }
}

impl Calculator {
    /// Create a calculator with the standard library and the bounded policy
    pub fn new() -> Self {
        Self {
            registry: standard_registry(),
            search: DeltaSearch::default(),
            curve: CurveSettings::default(),
            expression_cache: FxHashMap::default(),
            max_cache_size: DEFAULT_MAX_CACHE_SIZE,
        }
    }

    /// Use a different function library. Clears the cache.
    pub fn with_registry(mut self, registry: Arc<FunctionRegistry>) -> Self {
        self.registry = registry;
        self.expression_cache.clear();
        self
    }

    /// Use a different search policy
    pub fn with_policy(mut self, policy: SearchPolicy) -> Result<Self> {
        self.search = DeltaSearch::new(policy)?;
        Ok(self)
    }

    /// Use different display curve settings
    pub fn with_curve_settings(mut self, settings: CurveSettings) -> Result<Self> {
        DisplayDomain::around(0.0, settings.half_width)?;
        self.curve = settings;
        Ok(self)
    }

    /// Bound the compiled expression cache
    pub fn with_max_cache_size(mut self, size: usize) -> Self {
        self.max_cache_size = size;
        self
    }

    pub fn policy(&self) -> &SearchPolicy {
        self.search.policy()
    }

    pub fn curve_settings(&self) -> &CurveSettings {
        &self.curve
    }

    pub fn registry(&self) -> &Arc<FunctionRegistry> {
        &self.registry
    }

    /// Number of cached compiled expressions
    pub fn cached_expressions(&self) -> usize {
        self.expression_cache.len()
    }

    /// Compile an expression, using the cache when possible
    pub fn compile(&mut self, expression: &str) -> Result<Arc<CompiledExpression>> {
        if let Some(compiled) = self.expression_cache.get(expression) {
            return Ok(Arc::clone(compiled));
        }

        let compiled = Arc::new(CompiledExpression::compile_with_registry(
            expression,
            &self.registry,
        )?);
        if self.max_cache_size > 0 {
            if self.expression_cache.len() >= self.max_cache_size {
                log::debug!(
                    "expression cache full ({} entries), clearing",
                    self.expression_cache.len()
                );
                self.expression_cache.clear();
            }
            self.expression_cache
                .insert(expression.to_string(), Arc::clone(&compiled));
        }
        Ok(compiled)
    }

    /// Evaluate an expression at one point
    pub fn evaluate(&mut self, expression: &str, x: f64) -> Result<Evaluation> {
        Ok(self.compile(expression)?.evaluate(x))
    }

    /// Search for a delta at `point` and sample the display curve around it
    pub fn analyze(
        &mut self,
        expression: &str,
        point: f64,
        epsilon: f64,
    ) -> Result<ContinuityReport> {
        let query = ContinuityQuery::new(point, epsilon)?;
        let domain = self.curve.domain(point)?;
        let function = self.compile(expression)?;

        let f_at_point = function.evaluate(point);
        let delta = self.search.search(function.as_ref(), &query);
        let curve = sample_curve(function.as_ref(), domain, self.curve.points);

        log::debug!("analyzed '{expression}' at a={point}, eps={epsilon}: {delta}");

        Ok(ContinuityReport {
            expression: expression.to_string(),
            point,
            epsilon,
            policy: *self.search.policy(),
            f_at_point,
            delta,
            neighborhood: delta.neighborhood(point),
            epsilon_band: f_at_point.value().map(|fa| (fa - epsilon, fa + epsilon)),
            curve,
        })
    }

    /// Search for a delta at `point` for every epsilon of `grid`
    pub fn sweep(&mut self, expression: &str, point: f64, grid: &EpsilonGrid) -> Result<SweepTable> {
        let function = self.compile(expression)?;
        Ok(sweep_grid(
            function.as_ref(),
            point,
            grid,
            *self.search.policy(),
        )?)
    }

    /// Sample an expression over an explicit domain
    pub fn curve(
        &mut self,
        expression: &str,
        domain: DisplayDomain,
        count: usize,
    ) -> Result<SampledCurve> {
        let function = self.compile(expression)?;
        Ok(sample_curve(function.as_ref(), domain, count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::search::QueryError;

    #[test]
    fn test_analyze_continuous_point() {
        let mut calculator = Calculator::new();
        let report = calculator.analyze("np.sin(x)", 0.0, 0.5).unwrap();
        assert_eq!(report.f_at_point, Evaluation::Finite(0.0));
        assert_eq!(report.delta, DeltaResult::Found { delta: 0.25 });
        assert_eq!(report.neighborhood, Some((-0.25, 0.25)));
        assert_eq!(report.epsilon_band, Some((-0.5, 0.5)));
        assert_eq!(report.verdict(), Verdict::Continuous);
        assert_eq!(report.curve.len(), 1200);
    }

    #[test]
    fn test_analyze_pole() {
        let mut calculator = Calculator::new();
        let report = calculator.analyze("1/x", 0.0, 1.0).unwrap();
        assert_eq!(report.f_at_point, Evaluation::Undefined);
        assert_eq!(report.delta, DeltaResult::NotFound);
        assert_eq!(report.neighborhood, None);
        assert_eq!(report.epsilon_band, None);
        assert_eq!(report.verdict(), Verdict::PossiblyDiscontinuous);
    }

    #[test]
    fn test_rejections() {
        let mut calculator = Calculator::new();
        assert!(matches!(
            calculator.analyze("x", 0.0, 0.0),
            Err(Error::Query(QueryError::InvalidEpsilon { .. }))
        ));
        assert!(matches!(
            calculator.analyze("y", 0.0, 1.0),
            Err(Error::Compile(_))
        ));
        assert!(matches!(
            calculator.analyze("x +", 0.0, 1.0),
            Err(Error::Parse(_))
        ));
        assert!(
            Calculator::new()
                .with_policy(SearchPolicy::bounded().with_candidates(0))
                .is_err()
        );
    }

    #[test]
    fn test_cache_is_bounded() {
        let mut calculator = Calculator::new().with_max_cache_size(2);
        let first = calculator.compile("x + 1").unwrap();
        let again = calculator.compile("x + 1").unwrap();
        assert!(Arc::ptr_eq(&first, &again));

        calculator.compile("x + 2").unwrap();
        assert_eq!(calculator.cached_expressions(), 2);
        calculator.compile("x + 3").unwrap();
        assert_eq!(calculator.cached_expressions(), 1);
    }

    #[test]
    fn test_fixed_policy_changes_the_result() {
        let mut calculator = Calculator::new()
            .with_policy(SearchPolicy::fixed())
            .unwrap();
        let report = calculator.analyze("x**2", 1.0, 0.1).unwrap();
        assert_eq!(report.delta, DeltaResult::Found { delta: 0.00001 });

        let mut bounded = Calculator::new();
        assert_eq!(
            bounded.analyze("x**2", 1.0, 0.1).unwrap().delta,
            DeltaResult::NotFound
        );
    }
}
