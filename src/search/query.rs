//! Validated continuity queries

use serde::Serialize;
use thiserror::Error;

/// Result type for query and policy validation
pub type QueryResult<T> = Result<T, QueryError>;

/// Rejected inputs, reported before any search begins
#[derive(Error, Debug, Clone, PartialEq)]
pub enum QueryError {
    /// Epsilon must be strictly positive and finite
    #[error("Epsilon must be a positive finite number, got {epsilon}")]
    InvalidEpsilon {
        /// The rejected epsilon
        epsilon: f64,
    },

    /// The point must be finite
    #[error("Point must be a finite number, got {point}")]
    InvalidPoint {
        /// The rejected point
        point: f64,
    },

    /// Unusable search policy parameters
    #[error("Invalid search policy: {reason}")]
    InvalidPolicy {
        /// What is wrong with the policy
        reason: String,
    },

    /// Unusable sampling domain or grid
    #[error("Invalid domain: {reason}")]
    InvalidDomain {
        /// What is wrong with the domain
        reason: String,
    },
}

impl QueryError {
    /// Create a policy error
    pub fn invalid_policy(reason: impl Into<String>) -> Self {
        Self::InvalidPolicy {
            reason: reason.into(),
        }
    }

    /// Create a domain error
    pub fn invalid_domain(reason: impl Into<String>) -> Self {
        Self::InvalidDomain {
            reason: reason.into(),
        }
    }
}

/// A point `a` and a tolerance `epsilon`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ContinuityQuery {
    point: f64,
    epsilon: f64,
}

impl ContinuityQuery {
    /// Validate and build a query
    pub fn new(point: f64, epsilon: f64) -> QueryResult<Self> {
        if !point.is_finite() {
            return Err(QueryError::InvalidPoint { point });
        }
        if !(epsilon.is_finite() && epsilon > 0.0) {
            return Err(QueryError::InvalidEpsilon { epsilon });
        }
        Ok(Self { point, epsilon })
    }

    /// The point under test
    pub fn point(&self) -> f64 {
        self.point
    }

    /// The tolerance on `|f(x) - f(a)|`
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0.0)]
    #[case(-0.5)]
    #[case(f64::NAN)]
    #[case(f64::INFINITY)]
    fn test_rejects_bad_epsilon(#[case] epsilon: f64) {
        assert!(matches!(
            ContinuityQuery::new(1.0, epsilon),
            Err(QueryError::InvalidEpsilon { .. })
        ));
    }

    #[test]
    fn test_rejects_non_finite_point() {
        assert!(matches!(
            ContinuityQuery::new(f64::NEG_INFINITY, 0.1),
            Err(QueryError::InvalidPoint { .. })
        ));
    }

    #[test]
    fn test_accepts_valid_query() {
        let query = ContinuityQuery::new(-2.0, 1e-3).unwrap();
        assert_eq!(query.point(), -2.0);
        assert_eq!(query.epsilon(), 1e-3);
    }
}
