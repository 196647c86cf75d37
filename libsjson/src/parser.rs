//! Recursive descent parser: tokens to values.
//!
//! The parser holds exactly one token of lookahead, pulled from the lexer on
//! demand. Each rule consumes the tokens it owns and recurses for nested
//! values. It enforces what single tokens cannot: unique keys, no trailing
//! commas, nothing after the document, and bounded nesting.

use crate::error::{Container, ErrorKind, ParseError, Result};
use crate::lexer::{Lexer, Number, Token, TokenKind};
use crate::limits::Limits;
use crate::map::Map;
use crate::value::Value;

const EXPECTED_VALUE: &str = "a JSON value";
const EXPECTED_KEY: &str = "string key";

/// JSON parser over one input.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token,
    limits: Limits,
    depth: usize,
}

impl<'a> Parser<'a> {
    /// Create a parser with default limits.
    pub fn new(input: &'a str) -> Result<Self> {
        Self::with_limits(input, Limits::default())
    }

    /// Create a parser with explicit limits. Lexes the first token.
    pub fn with_limits(input: &'a str, limits: Limits) -> Result<Self> {
        limits.check_input_size(input)?;
        let mut lexer = Lexer::new(input).with_max_number_length(limits.max_number_length);
        let current = lexer.next_token()?;
        Ok(Self {
            lexer,
            current,
            limits,
            depth: 0,
        })
    }

    /// Parse one complete document.
    pub fn parse(mut self) -> Result<Value> {
        let value = self.parse_value()?;
        if !matches!(self.current.kind, TokenKind::EndOfInput) {
            return Err(self.error_here(ErrorKind::ExtraData));
        }
        Ok(value)
    }

    /// Advance to the next token.
    fn advance(&mut self) -> Result<()> {
        self.current = self.lexer.next_token()?;
        Ok(())
    }

    /// Advance, handing back the token that was current.
    fn bump(&mut self) -> Result<Token> {
        let next = self.lexer.next_token()?;
        Ok(std::mem::replace(&mut self.current, next))
    }

    fn error_here(&self, kind: ErrorKind) -> ParseError {
        kind.at(self.current.line, self.current.column)
    }

    /// The error for finding the current token where `expected` should be.
    fn unexpected(&self, expected: &str) -> ParseError {
        match self.current.kind {
            TokenKind::EndOfInput => self.error_here(ErrorKind::unexpected_end(expected)),
            ref found => self.error_here(ErrorKind::unexpected_token(expected, found)),
        }
    }

    /// Consume a punctuation token of the given kind.
    fn expect(&mut self, kind: TokenKind) -> Result<()> {
        if self.current.kind != kind {
            return Err(self.unexpected(&kind.to_string()));
        }
        self.advance()
    }

    /// Step into an object or array, consuming its opening bracket.
    fn enter(&mut self) -> Result<()> {
        if self.depth >= self.limits.max_depth {
            return Err(self.error_here(ErrorKind::NestingTooDeep {
                max: self.limits.max_depth,
            }));
        }
        self.depth += 1;
        self.advance()
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }

    fn parse_value(&mut self) -> Result<Value> {
        match self.current.kind {
            TokenKind::LeftBrace => self.parse_object(),
            TokenKind::LeftBracket => self.parse_array(),
            TokenKind::String(_)
            | TokenKind::Number(_)
            | TokenKind::True
            | TokenKind::False
            | TokenKind::Null => self.parse_literal(),
            _ => Err(self.unexpected(EXPECTED_VALUE)),
        }
    }

    /// Wrap the current literal token in the matching value.
    fn parse_literal(&mut self) -> Result<Value> {
        let token = self.bump()?;
        match token.kind {
            TokenKind::String(s) => Ok(Value::String(s)),
            TokenKind::Number(Number::Integer(n)) => Ok(Value::Integer(n)),
            TokenKind::Number(Number::Float(f)) => Ok(Value::Float(f)),
            TokenKind::True => Ok(Value::Bool(true)),
            TokenKind::False => Ok(Value::Bool(false)),
            TokenKind::Null => Ok(Value::Null),
            other => Err(
                ErrorKind::unexpected_token(EXPECTED_VALUE, other).at(token.line, token.column)
            ),
        }
    }

    fn parse_object(&mut self) -> Result<Value> {
        self.enter()?;
        let mut map = Map::new();

        if matches!(self.current.kind, TokenKind::RightBrace) {
            self.advance()?;
            self.leave();
            return Ok(Value::Object(map));
        }

        loop {
            let key = match &self.current.kind {
                TokenKind::String(key) => key.clone(),
                _ => return Err(self.unexpected(EXPECTED_KEY)),
            };
            if map.contains_key(&key) {
                return Err(self.error_here(ErrorKind::DuplicateKey(key)));
            }
            self.advance()?;

            self.expect(TokenKind::Colon)?;
            let value = self.parse_value()?;
            map.insert(key, value);

            match self.current.kind {
                TokenKind::Comma => {
                    self.advance()?;
                    if matches!(self.current.kind, TokenKind::RightBrace) {
                        return Err(self.error_here(ErrorKind::TrailingComma(Container::Object)));
                    }
                }
                TokenKind::RightBrace => {
                    self.advance()?;
                    break;
                }
                _ => return Err(self.unexpected("',' or '}'")),
            }
        }

        self.leave();
        Ok(Value::Object(map))
    }

    fn parse_array(&mut self) -> Result<Value> {
        self.enter()?;
        let mut items = Vec::new();

        if matches!(self.current.kind, TokenKind::RightBracket) {
            self.advance()?;
            self.leave();
            return Ok(Value::Array(items));
        }

        loop {
            items.push(self.parse_value()?);

            match self.current.kind {
                TokenKind::Comma => {
                    self.advance()?;
                    if matches!(self.current.kind, TokenKind::RightBracket) {
                        return Err(self.error_here(ErrorKind::TrailingComma(Container::Array)));
                    }
                }
                TokenKind::RightBracket => {
                    self.advance()?;
                    break;
                }
                _ => return Err(self.unexpected("',' or ']'")),
            }
        }

        self.leave();
        Ok(Value::Array(items))
    }
}
