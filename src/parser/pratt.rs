//! Pratt parser for arithmetic expressions
//!
//! Precedence levels (highest to lowest):
//! - **Power** (4): `^`, `**`, right associative
//! - **Unary** (3): prefix `+`, `-`
//! - **Multiplicative** (2): `*`, `/`
//! - **Additive** (1): `+`, `-`
//!
//! Power binds tighter than a unary minus on its left, so `-x^2` is
//! `-(x^2)`, while its right operand may itself carry a sign: `2^-1`.

use super::ACCEPTED_NAMESPACES;
use super::error::{ParseError, ParseResult};
use super::span::Spanned;
use super::tokenizer::{Token, Tokenizer};
use crate::ast::{BinaryOperator, ExpressionNode, UnaryOperator};
use smallvec::SmallVec;
use std::borrow::Cow;

/// Operator precedence levels (higher = tighter binding)
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
    /// Additive operators (+, -)
    Additive = 1,
    /// Multiplicative operators (*, /)
    Multiplicative = 2,
    /// Unary operators (+, -)
    Unary = 3,
    /// Exponentiation
    Power = 4,
}

impl Precedence {
    /// Get the minimum precedence for the right operand of an operator at this level
    #[inline(always)]
    pub const fn right_operand_level(self) -> Self {
        match self {
            Precedence::Additive => Precedence::Multiplicative,
            Precedence::Multiplicative => Precedence::Unary,
            // Right associative, and the exponent may be signed
            Precedence::Unary | Precedence::Power => Precedence::Unary,
        }
    }
}

#[inline(always)]
fn get_precedence(token: &Token<'_>) -> Option<Precedence> {
    match token {
        Token::Plus | Token::Minus => Some(Precedence::Additive),
        Token::Multiply | Token::Divide => Some(Precedence::Multiplicative),
        Token::Power => Some(Precedence::Power),
        _ => None,
    }
}

#[inline(always)]
fn token_to_binary_op(token: &Token<'_>) -> Option<BinaryOperator> {
    match token {
        Token::Plus => Some(BinaryOperator::Add),
        Token::Minus => Some(BinaryOperator::Subtract),
        Token::Multiply => Some(BinaryOperator::Multiply),
        Token::Divide => Some(BinaryOperator::Divide),
        Token::Power => Some(BinaryOperator::Power),
        _ => None,
    }
}

/// Deepest expression tree, and deepest parser recursion, accepted
pub const MAX_NESTING_DEPTH: usize = 256;

/// A parsed subtree and its depth
struct Parsed {
    node: ExpressionNode,
    depth: usize,
}

impl Parsed {
    fn leaf(node: ExpressionNode) -> Self {
        Self { node, depth: 1 }
    }
}

/// Pratt parser over a [`Tokenizer`]
pub struct PrattParser<'input> {
    tokenizer: Tokenizer<'input>,
    current_token: Option<Spanned<Token<'input>>>,
    /// Active `parse_expression_with_precedence` frames
    depth: usize,
}

impl<'input> PrattParser<'input> {
    /// Create new parser and prime the first token
    pub fn new(input: &'input str) -> ParseResult<Self> {
        let mut tokenizer = Tokenizer::new(input);
        let current_token = tokenizer.next_token()?;
        Ok(Self {
            tokenizer,
            current_token,
            depth: 0,
        })
    }

    #[inline(always)]
    fn advance(&mut self) -> ParseResult<()> {
        self.current_token = self.tokenizer.next_token()?;
        Ok(())
    }

    #[inline(always)]
    fn current(&self) -> Option<&Token<'input>> {
        self.current_token.as_ref().map(|t| &t.value)
    }

    /// Position of the current token, or end of input
    #[inline]
    fn current_position(&self) -> usize {
        self.current_token
            .as_ref()
            .map_or(self.tokenizer.position(), |t| t.start)
    }

    fn expect(&mut self, expected: Token<'input>, description: &'static str) -> ParseResult<()> {
        match self.current() {
            Some(token) if *token == expected => self.advance(),
            Some(_) => Err(ParseError::ExpectedToken {
                expected: Cow::Borrowed(description),
                position: self.current_position(),
            }),
            None => Err(ParseError::UnexpectedEndOfInput {
                position: self.current_position(),
            }),
        }
    }

    fn too_deep(&self) -> ParseError {
        ParseError::NestingTooDeep {
            limit: MAX_NESTING_DEPTH,
            position: self.current_position(),
        }
    }

    /// Wrap a new interior node, enforcing the depth limit
    fn nested(&self, node: ExpressionNode, depth: usize) -> ParseResult<Parsed> {
        if depth > MAX_NESTING_DEPTH {
            return Err(self.too_deep());
        }
        Ok(Parsed { node, depth })
    }

    /// Parse a complete expression; trailing tokens are an error
    pub fn parse(&mut self) -> ParseResult<ExpressionNode> {
        let parsed = self.parse_expression_with_precedence(Precedence::Additive)?;
        match &self.current_token {
            None => Ok(parsed.node),
            Some(token) => Err(ParseError::UnexpectedToken {
                token: token.value.describe(),
                position: token.start,
            }),
        }
    }

    fn parse_expression_with_precedence(
        &mut self,
        min_precedence: Precedence,
    ) -> ParseResult<Parsed> {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(self.too_deep());
        }
        self.depth += 1;
        let parsed = self.parse_binary_operations(min_precedence);
        self.depth -= 1;
        parsed
    }

    fn parse_binary_operations(&mut self, min_precedence: Precedence) -> ParseResult<Parsed> {
        let mut left = self.parse_prefix()?;

        while let Some(token) = self.current() {
            let Some(precedence) = get_precedence(token) else {
                break;
            };
            if precedence < min_precedence {
                break;
            }
            let Some(op) = token_to_binary_op(token) else {
                break;
            };
            self.advance()?;
            let right = self.parse_expression_with_precedence(precedence.right_operand_level())?;
            let depth = left.depth.max(right.depth) + 1;
            left = self.nested(ExpressionNode::binary_op(op, left.node, right.node), depth)?;
        }

        Ok(left)
    }

    fn parse_prefix(&mut self) -> ParseResult<Parsed> {
        let op = match self.current() {
            Some(Token::Minus) => UnaryOperator::Negate,
            Some(Token::Plus) => UnaryOperator::Positive,
            _ => return self.parse_primary(),
        };
        self.advance()?;
        let operand = self.parse_expression_with_precedence(Precedence::Unary)?;
        self.nested(
            ExpressionNode::unary_op(op, operand.node),
            operand.depth + 1,
        )
    }

    fn parse_primary(&mut self) -> ParseResult<Parsed> {
        let Some(spanned) = self.current_token else {
            return Err(ParseError::UnexpectedEndOfInput {
                position: self.current_position(),
            });
        };

        match spanned.value {
            Token::Number(text) => {
                self.advance()?;
                let value = text.parse::<f64>().map_err(|_| ParseError::InvalidLiteral {
                    value: Cow::Owned(text.to_string()),
                    position: spanned.start,
                })?;
                Ok(Parsed::leaf(ExpressionNode::number(value)))
            }

            Token::Identifier(first) => {
                self.advance()?;
                let name = if let Some(Token::Dot) = self.current() {
                    self.parse_namespaced_name(first, spanned.start)?
                } else {
                    first
                };

                if let Some(Token::LeftParen) = self.current() {
                    self.parse_function_call(name)
                } else {
                    Ok(Parsed::leaf(ExpressionNode::identifier(name)))
                }
            }

            Token::LeftParen => {
                self.advance()?;
                let inner = self.parse_expression_with_precedence(Precedence::Additive)?;
                self.expect(Token::RightParen, "')'")?;
                Ok(inner)
            }

            other => Err(ParseError::UnexpectedToken {
                token: other.describe(),
                position: spanned.start,
            }),
        }
    }

    /// Strip an accepted namespace: `np.sin` resolves to `sin`
    fn parse_namespaced_name(
        &mut self,
        namespace: &'input str,
        position: usize,
    ) -> ParseResult<&'input str> {
        if !ACCEPTED_NAMESPACES.contains(&namespace) {
            return Err(ParseError::UnknownNamespace {
                namespace: Cow::Owned(namespace.to_string()),
                position,
            });
        }
        self.advance()?; // consume '.'

        match self.current().and_then(Token::as_identifier) {
            Some(name) => {
                self.advance()?;
                Ok(name)
            }
            None => Err(ParseError::ExpectedToken {
                expected: Cow::Borrowed("name after namespace"),
                position: self.current_position(),
            }),
        }
    }

    fn parse_function_call(&mut self, name: &str) -> ParseResult<Parsed> {
        self.advance()?; // consume '('

        let mut args: SmallVec<[ExpressionNode; 2]> = SmallVec::new();
        if let Some(Token::RightParen) = self.current() {
            self.advance()?;
            return Ok(Parsed::leaf(ExpressionNode::function_call(name, args)));
        }

        let mut deepest = 0;
        loop {
            let arg = self.parse_expression_with_precedence(Precedence::Additive)?;
            deepest = deepest.max(arg.depth);
            args.push(arg.node);
            match self.current() {
                Some(Token::Comma) => self.advance()?,
                _ => break,
            }
        }

        self.expect(Token::RightParen, "')' or ',' in argument list")?;
        self.nested(ExpressionNode::function_call(name, args), deepest + 1)
    }
}

/// Parse expression text into an AST
#[inline]
pub fn parse_expression_pratt(input: &str) -> ParseResult<ExpressionNode> {
    let mut parser = PrattParser::new(input)?;
    parser.parse()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn canonical(input: &str) -> String {
        parse_expression_pratt(input).unwrap().to_string()
    }

    #[test]
    fn test_precedence_ordering() {
        assert!(Precedence::Power > Precedence::Unary);
        assert!(Precedence::Unary > Precedence::Multiplicative);
        assert!(Precedence::Multiplicative > Precedence::Additive);
    }

    #[test]
    fn test_basic_expressions() {
        assert_eq!(canonical("2 + 3 * 4"), "(2 + (3 * 4))");
        assert_eq!(canonical("(2 + 3) * 4"), "((2 + 3) * 4)");
        assert_eq!(canonical("x - 1 - 2"), "((x - 1) - 2)");
        assert_eq!(canonical("x / 2 / 4"), "((x / 2) / 4)");
    }

    #[test]
    fn test_power_associativity_and_sign() {
        assert_eq!(canonical("2^3^2"), "(2 ^ (3 ^ 2))");
        assert_eq!(canonical("2**3**2"), "(2 ^ (3 ^ 2))");
        assert_eq!(canonical("-x**2"), "(-(x ^ 2))");
        assert_eq!(canonical("2^-1"), "(2 ^ (-1))");
        assert_eq!(canonical("x * -y"), "(x * (-y))");
        assert_eq!(canonical("x - -1"), "(x - (-1))");
    }

    #[test]
    fn test_function_calls() {
        assert_eq!(canonical("sin(x)"), "sin(x)");
        assert_eq!(canonical("pow(x, 2) + 1"), "(pow(x, 2) + 1)");
        assert_eq!(canonical("np.exp(x)"), "exp(x)");
        assert_eq!(canonical("math.pi * x"), "(pi * x)");
        assert_eq!(canonical("f()"), "f()");
    }

    #[test]
    fn test_numpy_style_expressions() {
        assert_eq!(canonical("x**3 + 2*x"), "((x ^ 3) + (2 * x))");
        assert_eq!(canonical("np.sin(x)"), "sin(x)");
    }

    #[test]
    fn test_rejected_namespace() {
        let err = parse_expression_pratt("os.system(x)").unwrap_err();
        assert!(matches!(err, ParseError::UnknownNamespace { position: 0, .. }));
    }

    #[test]
    fn test_syntax_errors_report_position() {
        let err = parse_expression_pratt("x +").unwrap_err();
        assert_eq!(err, ParseError::UnexpectedEndOfInput { position: 3 });

        let err = parse_expression_pratt("x x").unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedToken { position: 2, .. }));

        let err = parse_expression_pratt("(x + 1").unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedEndOfInput { .. }));

        let err = parse_expression_pratt("sin(x 1)").unwrap_err();
        assert!(matches!(err, ParseError::ExpectedToken { position: 6, .. }));

        assert!(parse_expression_pratt("").is_err());
        assert!(parse_expression_pratt("*x").is_err());
    }

    #[test]
    fn test_nesting_depth_is_bounded() {
        let within = format!("{}x{}", "(".repeat(200), ")".repeat(200));
        assert_eq!(canonical(&within), "x");

        let parens = format!("{}x{}", "(".repeat(10_000), ")".repeat(10_000));
        assert!(matches!(
            parse_expression_pratt(&parens).unwrap_err(),
            ParseError::NestingTooDeep { limit: MAX_NESTING_DEPTH, .. }
        ));

        let negations = format!("{}x", "-".repeat(10_000));
        assert!(matches!(
            parse_expression_pratt(&negations).unwrap_err(),
            ParseError::NestingTooDeep { .. }
        ));

        let long_sum = vec!["x"; 10_000].join(" + ");
        assert!(matches!(
            parse_expression_pratt(&long_sum).unwrap_err(),
            ParseError::NestingTooDeep { .. }
        ));

        let tower = vec!["x"; 10_000].join("^");
        assert!(matches!(
            parse_expression_pratt(&tower).unwrap_err(),
            ParseError::NestingTooDeep { .. }
        ));
    }

    #[test]
    fn test_moderate_chains_parse() {
        let sum = vec!["x"; 200].join(" + ");
        assert!(parse_expression_pratt(&sum).is_ok());
        let calls = format!("{}x{}", "sin(".repeat(100), ")".repeat(100));
        assert!(parse_expression_pratt(&calls).is_ok());
    }
}
