//! Expression parser
//!
//! A hand-written tokenizer feeds a Pratt parser that turns expression text
//! into an [`ExpressionNode`](crate::ast::ExpressionNode) tree.

pub mod error;
pub mod pratt;
pub mod span;
pub mod tokenizer;

pub use error::{ParseError, ParseResult};
pub use pratt::{MAX_NESTING_DEPTH, parse_expression_pratt};
pub use span::Spanned;

// Default parser entry point
pub use pratt::parse_expression_pratt as parse_expression;

/// Namespace prefixes accepted in front of library names (`np.sin`, `math.pi`)
pub const ACCEPTED_NAMESPACES: &[&str] = &["np", "math"];
