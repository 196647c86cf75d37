//! Lexer: source text to tokens.
//!
//! The lexer is pull-based. The parser asks for one token at a time with
//! [`Lexer::next_token`], so no token list is ever materialized. String
//! escapes and the number grammar are validated here; the parser only sees
//! well-formed tokens.

use std::fmt;
use std::iter::FusedIterator;

use num_bigint::BigInt;

use crate::error::{printable, ErrorKind, ParseError, Result};

/// A number literal, classified by syntax.
///
/// A literal containing `.` or an exponent is a `Float`; everything else is
/// an `Integer`, kept at full precision.
#[derive(Debug, Clone, PartialEq)]
pub enum Number {
    Integer(BigInt),
    Float(f64),
}

/// Token kind, carrying the literal payload for strings and numbers.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    LeftBrace,
    RightBrace,
    LeftBracket,
    RightBracket,
    Colon,
    Comma,
    /// String value, already unescaped.
    String(String),
    Number(Number),
    True,
    False,
    Null,
    EndOfInput,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::LeftBrace => write!(f, "'{{'"),
            TokenKind::RightBrace => write!(f, "'}}'"),
            TokenKind::LeftBracket => write!(f, "'['"),
            TokenKind::RightBracket => write!(f, "']'"),
            TokenKind::Colon => write!(f, "':'"),
            TokenKind::Comma => write!(f, "','"),
            TokenKind::String(_) => write!(f, "string"),
            TokenKind::Number(_) => write!(f, "number"),
            TokenKind::True => write!(f, "'true'"),
            TokenKind::False => write!(f, "'false'"),
            TokenKind::Null => write!(f, "'null'"),
            TokenKind::EndOfInput => write!(f, "end of input"),
        }
    }
}

/// A single token with the position of its first character.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    /// Byte offset into the input.
    pub offset: usize,
    /// 1-based line.
    pub line: usize,
    /// 1-based column, counted in characters.
    pub column: usize,
}

/// Pull-based JSON tokenizer over a borrowed input.
pub struct Lexer<'a> {
    input: &'a str,
    pos: usize,
    line: usize,
    column: usize,
    max_number_length: Option<usize>,
    done: bool,
}

impl<'a> Lexer<'a> {
    /// Create a lexer positioned at the start of `input`.
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            line: 1,
            column: 1,
            max_number_length: None,
            done: false,
        }
    }

    /// Reject number literals longer than `max` characters.
    pub fn with_max_number_length(mut self, max: Option<usize>) -> Self {
        self.max_number_length = max;
        self
    }

    /// Current byte offset.
    pub fn offset(&self) -> usize {
        self.pos
    }

    /// Current 1-based line.
    pub fn line(&self) -> usize {
        self.line
    }

    /// Current 1-based column.
    pub fn column(&self) -> usize {
        self.column
    }

    /// Produce the next token. At end of input this returns `EndOfInput`
    /// every time it is called.
    pub fn next_token(&mut self) -> Result<Token> {
        self.skip_whitespace();

        let (offset, line, column) = (self.pos, self.line, self.column);
        let Some(c) = self.peek() else {
            return Ok(Token {
                kind: TokenKind::EndOfInput,
                offset,
                line,
                column,
            });
        };

        let kind = match c {
            '{' => self.single(TokenKind::LeftBrace),
            '}' => self.single(TokenKind::RightBrace),
            '[' => self.single(TokenKind::LeftBracket),
            ']' => self.single(TokenKind::RightBracket),
            ':' => self.single(TokenKind::Colon),
            ',' => self.single(TokenKind::Comma),
            '"' => TokenKind::String(self.lex_string(line, column)?),
            '-' | '0'..='9' => TokenKind::Number(self.lex_number(line, column)?),
            _ => self.lex_keyword(c, line, column)?,
        };

        Ok(Token {
            kind,
            offset,
            line,
            column,
        })
    }

    fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    /// Consume one character, keeping line and column in step.
    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    /// Consume `len` bytes of ASCII that contain no newline.
    fn skip_ascii(&mut self, len: usize) {
        self.pos += len;
        self.column += len;
    }

    fn single(&mut self, kind: TokenKind) -> TokenKind {
        self.bump();
        kind
    }

    fn skip_whitespace(&mut self) {
        while let Some(' ' | '\t' | '\n' | '\r') = self.peek() {
            self.bump();
        }
    }

    /// Match `true`, `false` or `null`; anything else cannot start a token.
    fn lex_keyword(&mut self, c: char, line: usize, column: usize) -> Result<TokenKind> {
        let rest = self.rest();
        let (len, kind) = if rest.starts_with("true") {
            (4, TokenKind::True)
        } else if rest.starts_with("false") {
            (5, TokenKind::False)
        } else if rest.starts_with("null") {
            (4, TokenKind::Null)
        } else {
            return Err(ErrorKind::UnexpectedCharacter(c).at(line, column));
        };
        self.skip_ascii(len);
        Ok(kind)
    }

    /// Lex a string body. `line` and `column` locate the opening quote, which
    /// is where unterminated strings are reported.
    fn lex_string(&mut self, line: usize, column: usize) -> Result<String> {
        self.bump(); // opening quote
        let mut out = String::new();

        loop {
            let (char_line, char_column) = (self.line, self.column);
            match self.bump() {
                None | Some('\n') | Some('\r') => {
                    return Err(ErrorKind::UnterminatedString.at(line, column));
                }
                Some('"') => return Ok(out),
                Some('\\') => match self.bump() {
                    None | Some('\n') | Some('\r') => {
                        return Err(ErrorKind::UnterminatedString.at(line, column));
                    }
                    Some(escaped) => out.push(self.lex_escape(escaped, char_line, char_column)?),
                },
                Some(c) if c < '\u{20}' => {
                    return Err(ErrorKind::InvalidString(format!(
                        "Unescaped control character U+{:04X} in string",
                        c as u32
                    ))
                    .at(char_line, char_column));
                }
                Some(c) => out.push(c),
            }
        }
    }

    /// Decode the escape introduced by the backslash at `line`/`column`.
    fn lex_escape(&mut self, escaped: char, line: usize, column: usize) -> Result<char> {
        match escaped {
            '"' => Ok('"'),
            '\\' => Ok('\\'),
            '/' => Ok('/'),
            'b' => Ok('\u{08}'),
            'f' => Ok('\u{0C}'),
            'n' => Ok('\n'),
            'r' => Ok('\r'),
            't' => Ok('\t'),
            'u' => self.lex_unicode_escape(line, column),
            other => Err(ErrorKind::InvalidString(format!(
                "Invalid escape sequence: \\{}",
                printable(&other)
            ))
            .at(line, column)),
        }
    }

    /// Decode `\uXXXX`, joining a high surrogate with the `\uXXXX` low
    /// surrogate that must follow it.
    fn lex_unicode_escape(&mut self, line: usize, column: usize) -> Result<char> {
        let unit = self.lex_hex4(line, column)?;
        let code = match unit {
            0xD800..=0xDBFF => {
                if !self.rest().starts_with("\\u") {
                    return Err(unpaired_surrogate(unit, line, column));
                }
                let (low_line, low_column) = (self.line, self.column);
                self.skip_ascii(2);
                let low = self.lex_hex4(low_line, low_column)?;
                if !(0xDC00..=0xDFFF).contains(&low) {
                    return Err(unpaired_surrogate(unit, line, column));
                }
                0x10000 + ((u32::from(unit) - 0xD800) << 10) + (u32::from(low) - 0xDC00)
            }
            0xDC00..=0xDFFF => return Err(unpaired_surrogate(unit, line, column)),
            _ => u32::from(unit),
        };
        char::from_u32(code).ok_or_else(|| unpaired_surrogate(unit, line, column))
    }

    /// Read exactly four hex digits as one UTF-16 code unit.
    fn lex_hex4(&mut self, line: usize, column: usize) -> Result<u16> {
        let unit = self
            .rest()
            .get(..4)
            .filter(|digits| digits.bytes().all(|b| b.is_ascii_hexdigit()))
            .and_then(|digits| u16::from_str_radix(digits, 16).ok());
        match unit {
            Some(unit) => {
                self.skip_ascii(4);
                Ok(unit)
            }
            None => Err(
                ErrorKind::InvalidString("Invalid unicode escape sequence".to_string())
                    .at(line, column),
            ),
        }
    }

    /// Scan the maximal run of number characters, then validate it whole.
    fn lex_number(&mut self, line: usize, column: usize) -> Result<Number> {
        let rest = self.rest();
        let len = rest
            .bytes()
            .take_while(|b| matches!(b, b'0'..=b'9' | b'.' | b'-' | b'+' | b'e' | b'E'))
            .count();
        let literal = &rest[..len];
        self.skip_ascii(len);

        if let Some(max) = self.max_number_length.filter(|&max| len > max) {
            return Err(ErrorKind::NumberTooLong { length: len, max }.at(line, column));
        }

        parse_number_literal(literal)
            .ok_or_else(|| ErrorKind::InvalidNumber(literal.to_string()).at(line, column))
    }
}

impl Iterator for Lexer<'_> {
    type Item = Result<Token>;

    /// Yields every token up to, but not including, `EndOfInput`. Stops for
    /// good after the first error.
    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.next_token() {
            Ok(Token {
                kind: TokenKind::EndOfInput,
                ..
            }) => {
                self.done = true;
                None
            }
            Ok(token) => Some(Ok(token)),
            Err(err) => {
                self.done = true;
                Some(Err(err))
            }
        }
    }
}

impl FusedIterator for Lexer<'_> {}

fn unpaired_surrogate(unit: u16, line: usize, column: usize) -> ParseError {
    ErrorKind::InvalidString(format!(
        "Invalid unicode escape sequence: unpaired surrogate \\u{:04X}",
        unit
    ))
    .at(line, column)
}

/// Check a literal against `-?(0|[1-9][0-9]*)(\.[0-9]+)?([eE][+-]?[0-9]+)?`.
fn is_number_literal(literal: &str) -> bool {
    let bytes = literal.as_bytes();
    let digits_from = |i: usize| bytes[i..].iter().take_while(|b| b.is_ascii_digit()).count();

    let mut i = 0;
    if bytes.first() == Some(&b'-') {
        i += 1;
    }

    // Integer part
    match bytes.get(i) {
        Some(b'0') => i += 1,
        Some(b'1'..=b'9') => i += 1 + digits_from(i + 1),
        _ => return false,
    }

    // Fractional part
    if bytes.get(i) == Some(&b'.') {
        let n = digits_from(i + 1);
        if n == 0 {
            return false;
        }
        i += 1 + n;
    }

    // Exponent
    if matches!(bytes.get(i), Some(b'e' | b'E')) {
        i += 1;
        if matches!(bytes.get(i), Some(b'+' | b'-')) {
            i += 1;
        }
        let n = digits_from(i);
        if n == 0 {
            return false;
        }
        i += n;
    }

    i == bytes.len()
}

fn parse_number_literal(literal: &str) -> Option<Number> {
    if !is_number_literal(literal) {
        return None;
    }
    if literal.contains(['.', 'e', 'E']) {
        literal.parse::<f64>().ok().map(Number::Float)
    } else {
        literal.parse::<BigInt>().ok().map(Number::Integer)
    }
}
