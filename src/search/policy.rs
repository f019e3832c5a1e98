//! Candidate generation policies for the delta search

use super::query::{QueryError, QueryResult};
use crate::sampling::{Linspace, linspace};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Default number of candidate deltas for the epsilon-scaled policy
pub const DEFAULT_BOUNDED_CANDIDATES: usize = 500;
/// Default number of candidate deltas for the absolute-range policy
pub const DEFAULT_FIXED_CANDIDATES: usize = 10_000;
/// Default number of samples on each side of the point
pub const DEFAULT_SAMPLES_PER_SIDE: usize = 50;
/// Default smallest candidate of the absolute-range policy
pub const DEFAULT_MIN_DELTA: f64 = 0.00001;
/// Default largest candidate of the absolute-range policy
pub const DEFAULT_MAX_DELTA: f64 = 2.0;

/// How candidate deltas are generated
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SearchPolicy {
    /// Candidates evenly spaced over `[epsilon / 2, 2 * epsilon]`
    BoundedRange {
        /// Number of candidates
        candidates: usize,
        /// Samples taken on each side of the point
        samples_per_side: usize,
    },
    /// Candidates evenly spaced over `[min_delta, max_delta]`, independent of epsilon
    FixedRange {
        /// Smallest candidate
        min_delta: f64,
        /// Largest candidate
        max_delta: f64,
        /// Number of candidates
        candidates: usize,
        /// Samples taken on each side of the point
        samples_per_side: usize,
    },
}

impl Default for SearchPolicy {
    fn default() -> Self {
        Self::bounded()
    }
}

impl SearchPolicy {
    /// The epsilon-scaled policy with default counts
    pub fn bounded() -> Self {
        Self::BoundedRange {
            candidates: DEFAULT_BOUNDED_CANDIDATES,
            samples_per_side: DEFAULT_SAMPLES_PER_SIDE,
        }
    }

    /// The absolute-range policy with default range and counts
    pub fn fixed() -> Self {
        Self::FixedRange {
            min_delta: DEFAULT_MIN_DELTA,
            max_delta: DEFAULT_MAX_DELTA,
            candidates: DEFAULT_FIXED_CANDIDATES,
            samples_per_side: DEFAULT_SAMPLES_PER_SIDE,
        }
    }

    /// The default policy of the given kind
    pub fn of_kind(kind: PolicyKind) -> Self {
        match kind {
            PolicyKind::Bounded => Self::bounded(),
            PolicyKind::Fixed => Self::fixed(),
        }
    }

    /// Which kind of policy this is
    pub fn kind(&self) -> PolicyKind {
        match self {
            Self::BoundedRange { .. } => PolicyKind::Bounded,
            Self::FixedRange { .. } => PolicyKind::Fixed,
        }
    }

    /// Number of candidate deltas
    pub fn candidate_count(&self) -> usize {
        match *self {
            Self::BoundedRange { candidates, .. } | Self::FixedRange { candidates, .. } => {
                candidates
            }
        }
    }

    /// Samples taken on each side of the point
    pub fn samples_per_side(&self) -> usize {
        match *self {
            Self::BoundedRange {
                samples_per_side, ..
            }
            | Self::FixedRange {
                samples_per_side, ..
            } => samples_per_side,
        }
    }

    /// Replace the candidate count
    pub fn with_candidates(mut self, count: usize) -> Self {
        match &mut self {
            Self::BoundedRange { candidates, .. } | Self::FixedRange { candidates, .. } => {
                *candidates = count
            }
        }
        self
    }

    /// Replace the per-side sample count
    pub fn with_samples_per_side(mut self, count: usize) -> Self {
        match &mut self {
            Self::BoundedRange {
                samples_per_side, ..
            }
            | Self::FixedRange {
                samples_per_side, ..
            } => *samples_per_side = count,
        }
        self
    }

    /// Candidate deltas for `epsilon`, in ascending order.
    ///
    /// Every candidate is finite for a finite epsilon.
    pub fn candidates(&self, epsilon: f64) -> Linspace {
        match *self {
            Self::BoundedRange { candidates, .. } => {
                linspace(epsilon / 2.0, (2.0 * epsilon).min(f64::MAX), candidates)
            }
            Self::FixedRange {
                min_delta,
                max_delta,
                candidates,
                ..
            } => linspace(min_delta, max_delta, candidates),
        }
    }

    /// Check the parameters
    pub fn validate(&self) -> QueryResult<()> {
        if self.candidate_count() == 0 {
            return Err(QueryError::invalid_policy(
                "candidate count must be at least 1",
            ));
        }
        if self.samples_per_side() == 0 {
            return Err(QueryError::invalid_policy(
                "samples per side must be at least 1",
            ));
        }
        if let Self::FixedRange {
            min_delta,
            max_delta,
            ..
        } = *self
        {
            if !(min_delta.is_finite() && max_delta.is_finite()) {
                return Err(QueryError::invalid_policy("delta range must be finite"));
            }
            if min_delta <= 0.0 {
                return Err(QueryError::invalid_policy(format!(
                    "smallest delta must be positive, got {min_delta}"
                )));
            }
            if min_delta > max_delta {
                return Err(QueryError::invalid_policy(format!(
                    "delta range is empty: [{min_delta}, {max_delta}]"
                )));
            }
        }
        Ok(())
    }
}

impl fmt::Display for SearchPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BoundedRange {
                candidates,
                samples_per_side,
            } => write!(
                f,
                "bounded: {candidates} candidates in [eps/2, 2*eps], {samples_per_side} samples per side"
            ),
            Self::FixedRange {
                min_delta,
                max_delta,
                candidates,
                samples_per_side,
            } => write!(
                f,
                "fixed: {candidates} candidates in [{min_delta}, {max_delta}], {samples_per_side} samples per side"
            ),
        }
    }
}

/// Policy selector used by configuration and the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PolicyKind {
    /// Epsilon-scaled candidates
    #[default]
    Bounded,
    /// Absolute candidate range
    Fixed,
}

impl FromStr for PolicyKind {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "bounded" => Ok(Self::Bounded),
            "fixed" => Ok(Self::Fixed),
            other => Err(QueryError::invalid_policy(format!(
                "unknown policy '{other}', expected 'bounded' or 'fixed'"
            ))),
        }
    }
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bounded => write!(f, "bounded"),
            Self::Fixed => write!(f, "fixed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_bounded_candidates_scale_with_epsilon() {
        let candidates: Vec<f64> = SearchPolicy::bounded().candidates(1.0).collect();
        assert_eq!(candidates.len(), 500);
        assert_eq!(candidates[0], 0.5);
        assert_eq!(candidates[499], 2.0);
        assert!(candidates.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_huge_epsilon_keeps_candidates_finite() {
        let candidates: Vec<f64> = SearchPolicy::bounded().candidates(1e308).collect();
        assert_eq!(candidates[0], 5e307);
        assert_eq!(candidates[499], f64::MAX);
        assert!(candidates.iter().all(|c| c.is_finite() && *c > 0.0));
    }

    #[test]
    fn test_fixed_candidates_ignore_epsilon() {
        let policy = SearchPolicy::fixed();
        let first = policy.candidates(0.1).next();
        assert_eq!(first, policy.candidates(100.0).next());
        assert_eq!(first, Some(DEFAULT_MIN_DELTA));
        assert_eq!(policy.candidates(0.1).len(), DEFAULT_FIXED_CANDIDATES);
    }

    #[test]
    fn test_validation() {
        assert!(SearchPolicy::bounded().validate().is_ok());
        assert!(SearchPolicy::fixed().validate().is_ok());
        assert!(SearchPolicy::bounded().with_candidates(0).validate().is_err());
        assert!(
            SearchPolicy::fixed()
                .with_samples_per_side(0)
                .validate()
                .is_err()
        );

        let reversed = SearchPolicy::FixedRange {
            min_delta: 1.0,
            max_delta: 0.5,
            candidates: 10,
            samples_per_side: 5,
        };
        assert!(matches!(
            reversed.validate(),
            Err(QueryError::InvalidPolicy { .. })
        ));

        let zero_min = SearchPolicy::FixedRange {
            min_delta: 0.0,
            max_delta: 0.5,
            candidates: 10,
            samples_per_side: 5,
        };
        assert!(zero_min.validate().is_err());
    }

    #[test]
    fn test_policy_kind_parsing() {
        assert_eq!("bounded".parse::<PolicyKind>().unwrap(), PolicyKind::Bounded);
        assert_eq!("FIXED".parse::<PolicyKind>().unwrap(), PolicyKind::Fixed);
        assert!("adaptive".parse::<PolicyKind>().is_err());
        assert_eq!(SearchPolicy::of_kind(PolicyKind::Fixed).kind(), PolicyKind::Fixed);
    }

    #[test]
    fn test_serialization() {
        let json = serde_json::to_value(SearchPolicy::bounded()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"kind": "bounded_range", "candidates": 500, "samples_per_side": 50})
        );
    }
}
