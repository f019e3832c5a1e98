//! Crate-level error type

use crate::evaluator::EvaluationError;
use crate::parser::ParseError;
use crate::search::QueryError;
use thiserror::Error;

/// Result type alias for calculator operations
pub type Result<T> = std::result::Result<T, Error>;

/// Any error the calculator reports
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Expression text is not well formed
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Expression references names outside the library or misuses them
    #[error(transparent)]
    Compile(EvaluationError),

    /// Point, epsilon, policy or domain rejected
    #[error(transparent)]
    Query(#[from] QueryError),
}

impl From<EvaluationError> for Error {
    fn from(error: EvaluationError) -> Self {
        match error {
            EvaluationError::Parse(parse) => Error::Parse(parse),
            other => Error::Compile(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_expression;

    #[test]
    fn test_parse_failures_keep_their_kind() {
        let parse = parse_expression("x +").unwrap_err();
        let error: Error = EvaluationError::Parse(parse.clone()).into();
        assert_eq!(error, Error::Parse(parse));

        let error: Error = EvaluationError::UnknownIdentifier {
            name: "y".to_string(),
            variable: "x".to_string(),
        }
        .into();
        assert!(matches!(error, Error::Compile(_)));
    }
}
