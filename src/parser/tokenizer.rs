//! Tokenizer for arithmetic expressions
//!
//! Works directly on the input bytes and hands out zero-copy slices for
//! numbers and identifiers; numbers are converted to `f64` by the parser.

use super::error::{ParseError, ParseResult};
use super::span::Spanned;
use std::borrow::Cow;

/// Expression token
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Token<'input> {
    /// Numeric literal as written (e.g. `42`, `3.14`, `.5`, `1e-3`)
    Number(&'input str),
    /// Identifier (e.g. `x`, `sin`, `np`)
    Identifier(&'input str),
    /// Addition operator (+)
    Plus,
    /// Subtraction operator (-)
    Minus,
    /// Multiplication operator (*)
    Multiply,
    /// Division operator (/)
    Divide,
    /// Power operator (^ or **)
    Power,
    /// Left parenthesis (
    LeftParen,
    /// Right parenthesis )
    RightParen,
    /// Comma separator (,)
    Comma,
    /// Dot (.) between a namespace and a name
    Dot,
}

impl<'input> Token<'input> {
    /// Get identifier string if this is an identifier
    #[inline]
    pub fn as_identifier(&self) -> Option<&'input str> {
        match self {
            Token::Identifier(s) => Some(s),
            _ => None,
        }
    }

    /// Render the token the way it appeared in source, for error messages
    pub fn describe(&self) -> Cow<'static, str> {
        match self {
            Token::Number(s) | Token::Identifier(s) => Cow::Owned((*s).to_string()),
            Token::Plus => Cow::Borrowed("+"),
            Token::Minus => Cow::Borrowed("-"),
            Token::Multiply => Cow::Borrowed("*"),
            Token::Divide => Cow::Borrowed("/"),
            Token::Power => Cow::Borrowed("^"),
            Token::LeftParen => Cow::Borrowed("("),
            Token::RightParen => Cow::Borrowed(")"),
            Token::Comma => Cow::Borrowed(","),
            Token::Dot => Cow::Borrowed("."),
        }
    }
}

/// Byte-level tokenizer
pub struct Tokenizer<'input> {
    input: &'input str,
    bytes: &'input [u8],
    pos: usize,
}

impl<'input> Tokenizer<'input> {
    /// Create a new tokenizer
    #[inline]
    pub fn new(input: &'input str) -> Self {
        Self {
            input,
            bytes: input.as_bytes(),
            pos: 0,
        }
    }

    /// Current byte offset
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    #[inline(always)]
    fn is_id_start(ch: u8) -> bool {
        ch.is_ascii_alphabetic() || ch == b'_'
    }

    #[inline(always)]
    fn is_id_continue(ch: u8) -> bool {
        ch.is_ascii_alphanumeric() || ch == b'_'
    }

    #[inline]
    fn skip_whitespace(&mut self) {
        while self.pos < self.bytes.len() && self.bytes[self.pos].is_ascii_whitespace() {
            self.pos += 1;
        }
    }

    #[inline]
    fn peek_byte(&self, offset: usize) -> Option<u8> {
        self.bytes.get(self.pos + offset).copied()
    }

    fn skip_digits(&mut self) -> usize {
        let start = self.pos;
        while self.pos < self.bytes.len() && self.bytes[self.pos].is_ascii_digit() {
            self.pos += 1;
        }
        self.pos - start
    }

    /// Scan `digits [. digits] [(e|E) [+|-] digits]`, or `. digits ...`
    fn parse_number(&mut self) -> &'input str {
        let start = self.pos;
        self.skip_digits();

        if self.peek_byte(0) == Some(b'.') {
            self.pos += 1;
            self.skip_digits();
        }

        if matches!(self.peek_byte(0), Some(b'e' | b'E')) {
            let exponent_digit_offset = match self.peek_byte(1) {
                Some(b'+' | b'-') => 2,
                _ => 1,
            };
            // Only consume the exponent marker when digits follow it
            if self
                .peek_byte(exponent_digit_offset)
                .is_some_and(|b| b.is_ascii_digit())
            {
                self.pos += exponent_digit_offset;
                self.skip_digits();
            }
        }

        &self.input[start..self.pos]
    }

    fn parse_identifier(&mut self) -> &'input str {
        let start = self.pos;
        self.pos += 1;
        while self.pos < self.bytes.len() && Self::is_id_continue(self.bytes[self.pos]) {
            self.pos += 1;
        }
        &self.input[start..self.pos]
    }

    /// Get the next token with its span, or `None` at end of input
    pub fn next_token(&mut self) -> ParseResult<Option<Spanned<Token<'input>>>> {
        self.skip_whitespace();

        let start = self.pos;
        let Some(&byte) = self.bytes.get(self.pos) else {
            return Ok(None);
        };

        let token = match byte {
            b'0'..=b'9' => Token::Number(self.parse_number()),
            b'.' if self.peek_byte(1).is_some_and(|b| b.is_ascii_digit()) => {
                Token::Number(self.parse_number())
            }
            b'.' => {
                self.pos += 1;
                Token::Dot
            }
            ch if Self::is_id_start(ch) => Token::Identifier(self.parse_identifier()),
            b'+' => {
                self.pos += 1;
                Token::Plus
            }
            b'-' => {
                self.pos += 1;
                Token::Minus
            }
            b'*' => {
                if self.peek_byte(1) == Some(b'*') {
                    self.pos += 2;
                    Token::Power
                } else {
                    self.pos += 1;
                    Token::Multiply
                }
            }
            b'/' => {
                self.pos += 1;
                Token::Divide
            }
            b'^' => {
                self.pos += 1;
                Token::Power
            }
            b'(' => {
                self.pos += 1;
                Token::LeftParen
            }
            b')' => {
                self.pos += 1;
                Token::RightParen
            }
            b',' => {
                self.pos += 1;
                Token::Comma
            }
            _ => {
                let ch = self.input[self.pos..].chars().next().unwrap_or('?');
                return Err(ParseError::UnexpectedToken {
                    token: Cow::Owned(ch.to_string()),
                    position: self.pos,
                });
            }
        };

        Ok(Some(Spanned::new(token, start, self.pos)))
    }

    /// Tokenize the whole input
    pub fn tokenize_all(&mut self) -> ParseResult<Vec<Spanned<Token<'input>>>> {
        let mut tokens = Vec::with_capacity(16);
        while let Some(token) = self.next_token()? {
            tokens.push(token);
        }
        Ok(tokens)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(input: &str) -> Vec<Token<'_>> {
        Tokenizer::new(input)
            .tokenize_all()
            .unwrap()
            .into_iter()
            .map(|t| t.value)
            .collect()
    }

    #[test]
    fn test_number_forms() {
        assert_eq!(
            tokens("42 3.14 .5 2. 1e-3 6E+2"),
            vec![
                Token::Number("42"),
                Token::Number("3.14"),
                Token::Number(".5"),
                Token::Number("2."),
                Token::Number("1e-3"),
                Token::Number("6E+2"),
            ]
        );
    }

    #[test]
    fn test_exponent_marker_without_digits_is_left_alone() {
        assert_eq!(
            tokens("2e"),
            vec![Token::Number("2"), Token::Identifier("e")]
        );
    }

    #[test]
    fn test_power_spellings() {
        assert_eq!(
            tokens("x**2 ^ 3 * 4"),
            vec![
                Token::Identifier("x"),
                Token::Power,
                Token::Number("2"),
                Token::Power,
                Token::Number("3"),
                Token::Multiply,
                Token::Number("4"),
            ]
        );
    }

    #[test]
    fn test_namespace_dot() {
        assert_eq!(
            tokens("np.sin(x)"),
            vec![
                Token::Identifier("np"),
                Token::Dot,
                Token::Identifier("sin"),
                Token::LeftParen,
                Token::Identifier("x"),
                Token::RightParen,
            ]
        );
    }

    #[test]
    fn test_spans() {
        let spanned = Tokenizer::new("  sin(x)").tokenize_all().unwrap();
        assert_eq!(spanned[0].start, 2);
        assert_eq!(spanned[0].end, 5);
        assert_eq!(spanned[3].start, 7);
    }

    #[test]
    fn test_unknown_character_is_rejected() {
        let err = Tokenizer::new("x; y").tokenize_all().unwrap_err();
        assert_eq!(
            err,
            ParseError::UnexpectedToken {
                token: Cow::Borrowed(";"),
                position: 1,
            }
        );

        let err = Tokenizer::new("x == 1").tokenize_all().unwrap_err();
        assert_eq!(err.position(), 2);
    }
}
