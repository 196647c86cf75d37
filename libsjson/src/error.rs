//! Error types for strict JSON parsing.
//!
//! Every rejection, whether raised by the lexer or the parser, is a
//! [`ParseError`]: an [`ErrorKind`] plus the 1-based line and column of the
//! offending character or token.

use std::fmt;

use thiserror::Error;

/// Result type for JSON parsing operations.
pub type Result<T> = std::result::Result<T, ParseError>;

/// The container a structural error was found in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Container {
    /// A `{ ... }` object.
    Object,
    /// A `[ ... ]` array.
    Array,
}

impl fmt::Display for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Container::Object => write!(f, "object"),
            Container::Array => write!(f, "array"),
        }
    }
}

/// What went wrong, independent of where.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// A character that starts no JSON token.
    #[error("Unexpected character: '{}'", printable(.0))]
    UnexpectedCharacter(char),

    /// A well-formed token in a place the grammar does not allow it.
    #[error("Expected {expected}, but found {found}")]
    UnexpectedToken { expected: String, found: String },

    /// Input ended while the grammar still required something.
    #[error("Unexpected end of input, expected {expected}")]
    UnexpectedEndOfInput { expected: String },

    /// A number literal that does not match the JSON number grammar.
    #[error("Invalid number format: '{0}'")]
    InvalidNumber(String),

    /// A malformed escape or a forbidden character inside a string.
    #[error("{0}")]
    InvalidString(String),

    /// A string without its closing quote on the same line.
    #[error("Unterminated string literal")]
    UnterminatedString,

    /// An object key that already appeared in the same object.
    #[error("Duplicate key '{0}' found in object")]
    DuplicateKey(String),

    /// A comma directly followed by the closing bracket.
    #[error("Trailing comma not allowed in {0}")]
    TrailingComma(Container),

    /// Tokens remaining after a complete document.
    #[error("Extra data after JSON document")]
    ExtraData,

    /// A number literal longer than the configured limit.
    #[error("Number too long: {length} characters exceeds the limit of {max}")]
    NumberTooLong { length: usize, max: usize },

    /// Objects and arrays nested deeper than the configured limit.
    #[error("Nesting too deep: more than {max} levels of objects and arrays")]
    NestingTooDeep { max: usize },

    /// The whole input is larger than the configured limit.
    #[error("Input too large: {size} bytes exceeds the limit of {max} bytes")]
    InputTooLarge { size: usize, max: usize },
}

impl ErrorKind {
    /// Attach a source position, producing a [`ParseError`].
    pub fn at(self, line: usize, column: usize) -> ParseError {
        ParseError { kind: self, line, column }
    }

    pub(crate) fn unexpected_token(expected: &str, found: impl fmt::Display) -> Self {
        ErrorKind::UnexpectedToken {
            expected: expected.to_string(),
            found: found.to_string(),
        }
    }

    pub(crate) fn unexpected_end(expected: &str) -> Self {
        ErrorKind::UnexpectedEndOfInput {
            expected: expected.to_string(),
        }
    }
}

/// Render a character for a message, escaping only control characters.
pub(crate) fn printable(c: &char) -> String {
    if c.is_control() {
        c.escape_debug().to_string()
    } else {
        c.to_string()
    }
}

/// A located rejection of malformed JSON input.
///
/// All kinds share this one type, so callers can match on [`ParseError::kind`]
/// or just report the message. Lines and columns are 1-based; columns count
/// characters, not bytes.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
#[error("Malformed JSON at line {line}, column {column}: {kind}")]
pub struct ParseError {
    kind: ErrorKind,
    line: usize,
    column: usize,
}

impl ParseError {
    /// Create an error of the given kind at a position.
    pub fn new(kind: ErrorKind, line: usize, column: usize) -> Self {
        kind.at(line, column)
    }

    /// The kind of rejection.
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// Consume the error, keeping only its kind.
    pub fn into_kind(self) -> ErrorKind {
        self.kind
    }

    /// 1-based line of the failure.
    pub fn line(&self) -> usize {
        self.line
    }

    /// 1-based column of the failure.
    pub fn column(&self) -> usize {
        self.column
    }

    /// The message without the location prefix.
    pub fn detail(&self) -> String {
        self.kind.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_location() {
        let err = ErrorKind::DuplicateKey("a".into()).at(1, 9);
        assert_eq!(
            err.to_string(),
            "Malformed JSON at line 1, column 9: Duplicate key 'a' found in object"
        );
    }

    #[test]
    fn test_detail_omits_location() {
        let err = ErrorKind::TrailingComma(Container::Array).at(3, 1);
        assert_eq!(err.detail(), "Trailing comma not allowed in array");
        assert_eq!(err.line(), 3);
        assert_eq!(err.column(), 1);
    }

    #[test]
    fn test_unexpected_character_is_escaped() {
        let kind = ErrorKind::UnexpectedCharacter('\u{1}');
        assert_eq!(kind.to_string(), "Unexpected character: '\\u{1}'");
        assert_eq!(
            ErrorKind::UnexpectedCharacter('!').to_string(),
            "Unexpected character: '!'"
        );
        assert_eq!(
            ErrorKind::UnexpectedCharacter('\'').to_string(),
            "Unexpected character: '''"
        );
    }

    #[test]
    fn test_token_messages() {
        assert_eq!(
            ErrorKind::unexpected_token("':'", "string").to_string(),
            "Expected ':', but found string"
        );
        assert_eq!(
            ErrorKind::unexpected_end("',' or '}'").to_string(),
            "Unexpected end of input, expected ',' or '}'"
        );
    }

    #[test]
    fn test_into_kind() {
        let err = ParseError::new(ErrorKind::ExtraData, 1, 7);
        assert_eq!(err.kind(), &ErrorKind::ExtraData);
        assert_eq!(err.into_kind(), ErrorKind::ExtraData);
    }
}
