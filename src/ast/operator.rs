//! Operator definitions for arithmetic expressions

use serde::Serialize;
use std::fmt;

/// Binary operators
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum BinaryOperator {
    /// Addition (+)
    Add,
    /// Subtraction (-)
    Subtract,
    /// Multiplication (*)
    Multiply,
    /// Division (/)
    Divide,
    /// Exponentiation (^ or **)
    Power,
}

impl BinaryOperator {
    /// Get the canonical symbol for this operator
    pub const fn as_str(&self) -> &'static str {
        match self {
            BinaryOperator::Add => "+",
            BinaryOperator::Subtract => "-",
            BinaryOperator::Multiply => "*",
            BinaryOperator::Divide => "/",
            BinaryOperator::Power => "^",
        }
    }

    /// Apply the operator to two finite operands.
    ///
    /// The raw IEEE result is returned; callers decide how non-finite
    /// values are reported. Division by an exact zero yields NaN so that
    /// `1/0` and `0/0` are treated alike.
    #[inline]
    pub fn apply(&self, left: f64, right: f64) -> f64 {
        match self {
            BinaryOperator::Add => left + right,
            BinaryOperator::Subtract => left - right,
            BinaryOperator::Multiply => left * right,
            BinaryOperator::Divide => {
                if right == 0.0 {
                    f64::NAN
                } else {
                    left / right
                }
            }
            BinaryOperator::Power => left.powf(right),
        }
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unary operators
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum UnaryOperator {
    /// Unary plus (+)
    Positive,
    /// Negation (-)
    Negate,
}

impl UnaryOperator {
    /// Get the canonical symbol for this operator
    pub const fn as_str(&self) -> &'static str {
        match self {
            UnaryOperator::Positive => "+",
            UnaryOperator::Negate => "-",
        }
    }

    /// Apply the operator to a finite operand
    #[inline]
    pub fn apply(&self, operand: f64) -> f64 {
        match self {
            UnaryOperator::Positive => operand,
            UnaryOperator::Negate => -operand,
        }
    }
}

impl fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_division_by_zero_is_nan() {
        assert!(BinaryOperator::Divide.apply(1.0, 0.0).is_nan());
        assert!(BinaryOperator::Divide.apply(0.0, 0.0).is_nan());
        assert!(BinaryOperator::Divide.apply(1.0, -0.0).is_nan());
        assert_eq!(BinaryOperator::Divide.apply(1.0, 4.0), 0.25);
    }

    #[test]
    fn test_power_of_negative_base() {
        assert_eq!(BinaryOperator::Power.apply(-2.0, 3.0), -8.0);
        assert!(BinaryOperator::Power.apply(-8.0, 1.0 / 3.0).is_nan());
    }
}
