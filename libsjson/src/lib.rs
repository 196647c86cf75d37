//! Strict JSON parser.
//!
//! Converts text into a typed, immutable [`Value`] tree while enforcing the
//! full JSON grammar: no trailing commas, no duplicate keys, exact escape and
//! number grammars. Every rejection is a [`ParseError`] naming what went
//! wrong and the line and column where it happened.
//!
//! # Parsing Pipeline
//!
//! 1. **Lexer**: Pulls one token at a time from the source text, validating
//!    string escapes and number literals as it goes.
//!
//! 2. **Parser**: Recursive descent with one token of lookahead, building the
//!    value tree and enforcing structural rules and [`Limits`].
//!
//! [`loads`] additionally converts the tree into the generic
//! [`NativeValue`] (`serde_json::Value`) form.

mod error;
mod lexer;
mod limits;
mod map;
mod parser;
mod value;

pub use error::{Container, ErrorKind, ParseError, Result};
pub use lexer::{Lexer, Number, Token, TokenKind};
pub use limits::{Limits, DEFAULT_MAX_DEPTH, LENIENT_MAX_DEPTH};
pub use map::Map;
pub use parser::Parser;
pub use value::{NativeValue, Value};

/// Parse a JSON document from a string.
///
/// # Example
///
/// ```
/// use libsjson::parse;
///
/// let value = parse(r#"{"a": 1, "b": [1, 2, 3]}"#).unwrap();
/// assert_eq!(value.get("a").and_then(|a| a.as_i64()), Some(1));
/// ```
pub fn parse(input: &str) -> Result<Value> {
    parse_with_limits(input, Limits::default())
}

/// Parse a JSON document with explicit limits.
#[tracing::instrument(level = "trace", skip_all, fields(len = input.len()))]
pub fn parse_with_limits(input: &str, limits: Limits) -> Result<Value> {
    Parser::with_limits(input, limits)
        .and_then(Parser::parse)
        .map_err(|err| {
            tracing::debug!(
                kind = ?err.kind(),
                line = err.line(),
                column = err.column(),
                "rejected malformed JSON"
            );
            err
        })
}

/// Parse a JSON document into the generic [`NativeValue`] tree.
///
/// # Example
///
/// ```
/// use libsjson::loads;
///
/// let value = loads(r#"{"a": [1, 2.5, null]}"#).unwrap();
/// assert_eq!(value["a"][1], 2.5);
/// ```
pub fn loads(input: &str) -> Result<NativeValue> {
    loads_with_limits(input, Limits::default())
}

/// [`loads`] with explicit limits.
pub fn loads_with_limits(input: &str, limits: Limits) -> Result<NativeValue> {
    parse_with_limits(input, limits).map(|value| value.to_native())
}
