//! Epsilon-to-delta tables

use super::engine::DeltaSearch;
use super::policy::SearchPolicy;
use super::query::{ContinuityQuery, QueryError, QueryResult};
use crate::evaluator::RealFunction;
use crate::sampling::{Linspace, linspace};
use serde::{Deserialize, Serialize};

/// Evenly spaced epsilons to sweep over
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EpsilonGrid {
    /// Smallest epsilon
    pub from: f64,
    /// Largest epsilon
    pub to: f64,
    /// Number of epsilons
    pub steps: usize,
}

impl Default for EpsilonGrid {
    fn default() -> Self {
        Self {
            from: 0.01,
            to: 2.0,
            steps: 30,
        }
    }
}

impl EpsilonGrid {
    /// Create a grid
    pub fn new(from: f64, to: f64, steps: usize) -> Self {
        Self { from, to, steps }
    }

    /// Check that every epsilon of the grid is usable
    pub fn validate(&self) -> QueryResult<()> {
        if self.steps == 0 {
            return Err(QueryError::invalid_domain("epsilon grid needs at least one step"));
        }
        if !(self.from.is_finite() && self.to.is_finite()) || self.from <= 0.0 {
            return Err(QueryError::invalid_domain(format!(
                "epsilon grid must lie in (0, inf), got [{}, {}]",
                self.from, self.to
            )));
        }
        if self.from > self.to {
            return Err(QueryError::invalid_domain(format!(
                "epsilon grid is empty: [{}, {}]",
                self.from, self.to
            )));
        }
        Ok(())
    }

    /// The epsilons in ascending order
    pub fn epsilons(&self) -> Linspace {
        linspace(self.from, self.to, self.steps)
    }
}

/// One row of a sweep
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SweepRow {
    pub epsilon: f64,
    pub delta: Option<f64>,
}

/// Ordered rows of a sweep at one point
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SweepTable {
    pub point: f64,
    pub rows: Vec<SweepRow>,
}

impl SweepTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of epsilons for which a delta was found
    pub fn found_count(&self) -> usize {
        self.rows.iter().filter(|row| row.delta.is_some()).count()
    }
}

/// Run an independent search for each epsilon
pub fn sweep<F, I>(
    function: &F,
    point: f64,
    epsilons: I,
    policy: SearchPolicy,
) -> QueryResult<SweepTable>
where
    F: RealFunction + ?Sized,
    I: IntoIterator<Item = f64>,
{
    let search = DeltaSearch::new(policy)?;
    let rows = epsilons
        .into_iter()
        .map(|epsilon| {
            let query = ContinuityQuery::new(point, epsilon)?;
            Ok(SweepRow {
                epsilon,
                delta: search.search(function, &query).delta(),
            })
        })
        .collect::<QueryResult<Vec<_>>>()?;

    log::debug!("swept {} epsilons at a={point}", rows.len());
    Ok(SweepTable { point, rows })
}

/// Sweep over a validated grid
pub fn sweep_grid<F>(
    function: &F,
    point: f64,
    grid: &EpsilonGrid,
    policy: SearchPolicy,
) -> QueryResult<SweepTable>
where
    F: RealFunction + ?Sized,
{
    grid.validate()?;
    sweep(function, point, grid.epsilons(), policy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluator::CompiledExpression;

    #[test]
    fn test_default_grid_yields_thirty_rows() {
        let f = CompiledExpression::compile("x").unwrap();
        let table = sweep_grid(&f, 0.0, &EpsilonGrid::default(), SearchPolicy::bounded()).unwrap();
        assert_eq!(table.len(), 30);
        assert_eq!(table.found_count(), 30);
        assert_eq!(table.rows[0].epsilon, 0.01);
        assert_eq!(table.rows[29].epsilon, 2.0);
    }

    #[test]
    fn test_identity_delta_is_half_epsilon() {
        let f = CompiledExpression::compile("x").unwrap();
        let table = sweep(&f, 0.0, [0.2, 0.4, 0.8], SearchPolicy::bounded()).unwrap();
        let deltas: Vec<Option<f64>> = table.rows.iter().map(|row| row.delta).collect();
        assert_eq!(deltas, vec![Some(0.1), Some(0.2), Some(0.4)]);
    }

    #[test]
    fn test_discontinuity_has_no_rows_found() {
        let f = CompiledExpression::compile("1/x").unwrap();
        let table = sweep(&f, 0.0, [0.1, 1.0, 10.0], SearchPolicy::bounded()).unwrap();
        assert_eq!(table.found_count(), 0);
    }

    #[test]
    fn test_invalid_inputs() {
        let f = CompiledExpression::compile("x").unwrap();
        assert!(sweep(&f, 0.0, [0.1, -1.0], SearchPolicy::bounded()).is_err());
        assert!(EpsilonGrid::new(0.0, 1.0, 5).validate().is_err());
        assert!(EpsilonGrid::new(1.0, 0.5, 5).validate().is_err());
        assert!(EpsilonGrid::new(0.1, 0.5, 0).validate().is_err());
    }
}
