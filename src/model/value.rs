//! The total numeric value type
//!
//! Every evaluation resolves to either a finite double or the distinguished
//! [`Evaluation::Undefined`] marker. NaN and infinities never escape: they are
//! folded into `Undefined` at construction, so callers only ever match on two
//! shapes.

use serde::{Serialize, Serializer};
use std::fmt;

/// Result of evaluating an expression at one point
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Evaluation {
    /// A finite real number
    Finite(f64),
    /// Division by zero, domain violation, overflow or an unusable expression
    Undefined,
}

impl Evaluation {
    /// Wrap a raw double, mapping NaN and infinities to `Undefined`
    #[inline]
    pub fn from_f64(value: f64) -> Self {
        if value.is_finite() {
            Self::Finite(value)
        } else {
            Self::Undefined
        }
    }

    /// Get the finite value, if any
    #[inline]
    pub fn value(self) -> Option<f64> {
        match self {
            Self::Finite(v) => Some(v),
            Self::Undefined => None,
        }
    }

    /// Check whether this is a finite value
    #[inline]
    pub fn is_finite(self) -> bool {
        matches!(self, Self::Finite(_))
    }

    /// Check whether this is the undefined marker
    #[inline]
    pub fn is_undefined(self) -> bool {
        matches!(self, Self::Undefined)
    }

    /// Apply a unary primitive; `Undefined` propagates
    #[inline]
    pub fn map(self, f: impl FnOnce(f64) -> f64) -> Self {
        match self {
            Self::Finite(v) => Self::from_f64(f(v)),
            Self::Undefined => Self::Undefined,
        }
    }

    /// Apply a binary primitive; `Undefined` on either side propagates
    #[inline]
    pub fn zip_with(self, other: Self, f: impl FnOnce(f64, f64) -> f64) -> Self {
        match (self, other) {
            (Self::Finite(a), Self::Finite(b)) => Self::from_f64(f(a, b)),
            _ => Self::Undefined,
        }
    }

    /// Absolute difference `|self - other|`, defined only when both sides are
    #[inline]
    pub fn distance(self, other: Self) -> Option<f64> {
        match (self, other) {
            (Self::Finite(a), Self::Finite(b)) => Some((a - b).abs()),
            _ => None,
        }
    }
}

impl From<f64> for Evaluation {
    fn from(value: f64) -> Self {
        Self::from_f64(value)
    }
}

impl fmt::Display for Evaluation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Finite(v) => write!(f, "{v}"),
            Self::Undefined => f.write_str("undefined"),
        }
    }
}

/// Finite values serialize as numbers, `Undefined` as `null`
impl Serialize for Evaluation {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Finite(v) => serializer.serialize_f64(*v),
            Self::Undefined => serializer.serialize_none(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_finite_values_collapse() {
        assert_eq!(Evaluation::from_f64(f64::NAN), Evaluation::Undefined);
        assert_eq!(Evaluation::from_f64(f64::INFINITY), Evaluation::Undefined);
        assert_eq!(Evaluation::from_f64(f64::NEG_INFINITY), Evaluation::Undefined);
        assert_eq!(Evaluation::from_f64(-0.5), Evaluation::Finite(-0.5));
    }

    #[test]
    fn test_undefined_propagates() {
        let undefined = Evaluation::Undefined;
        assert!(undefined.map(|v| v + 1.0).is_undefined());
        assert!(undefined.zip_with(Evaluation::Finite(1.0), |a, b| a + b).is_undefined());
        assert!(Evaluation::Finite(1.0).zip_with(undefined, |a, b| a * b).is_undefined());
        assert_eq!(
            Evaluation::Finite(1e308).zip_with(Evaluation::Finite(10.0), |a, b| a * b),
            Evaluation::Undefined
        );
    }

    #[test]
    fn test_distance() {
        assert_eq!(Evaluation::Finite(1.0).distance(Evaluation::Finite(3.5)), Some(2.5));
        assert_eq!(Evaluation::Finite(1.0).distance(Evaluation::Undefined), None);
        assert_eq!(Evaluation::Undefined.distance(Evaluation::Undefined), None);
    }

    #[test]
    fn test_serialization() {
        assert_eq!(serde_json::to_string(&Evaluation::Finite(2.5)).unwrap(), "2.5");
        assert_eq!(serde_json::to_string(&Evaluation::Undefined).unwrap(), "null");
    }
}
