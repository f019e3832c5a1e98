//! Parser error types

use std::borrow::Cow;
use thiserror::Error;

/// Result type for parser operations
pub type ParseResult<T> = Result<T, ParseError>;

/// Parse error with location information
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    /// Unexpected token
    #[error("Unexpected token '{token}' at position {position}")]
    UnexpectedToken {
        /// The unexpected token that was found
        token: Cow<'static, str>,
        /// Position where the token was found
        position: usize,
    },

    /// Expected token
    #[error("Expected {expected} at position {position}")]
    ExpectedToken {
        /// The expected token description
        expected: Cow<'static, str>,
        /// Position where the token was expected
        position: usize,
    },

    /// Unexpected end of input at specific position
    #[error("Unexpected end of input at position {position}")]
    UnexpectedEndOfInput {
        /// Position where more input was expected
        position: usize,
    },

    /// Invalid numeric literal
    #[error("Invalid number literal at position {position}: {value}")]
    InvalidLiteral {
        /// The invalid value that was encountered
        value: Cow<'static, str>,
        /// Position where the invalid literal was found
        position: usize,
    },

    /// A `prefix.name` reference whose prefix is not a recognised namespace
    #[error("Unknown namespace '{namespace}' at position {position}")]
    UnknownNamespace {
        /// The namespace prefix
        namespace: Cow<'static, str>,
        /// Position of the prefix
        position: usize,
    },

    /// Parentheses, signs or operator chains nested past the supported depth
    #[error("Expression nested deeper than {limit} levels at position {position}")]
    NestingTooDeep {
        /// The maximum supported depth
        limit: usize,
        /// Position where the limit was exceeded
        position: usize,
    },
}

impl ParseError {
    /// Byte offset in the source where the error was detected
    pub fn position(&self) -> usize {
        match self {
            Self::UnexpectedToken { position, .. }
            | Self::ExpectedToken { position, .. }
            | Self::UnexpectedEndOfInput { position }
            | Self::InvalidLiteral { position, .. }
            | Self::UnknownNamespace { position, .. }
            | Self::NestingTooDeep { position, .. } => *position,
        }
    }
}
