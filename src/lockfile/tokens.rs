//! Token definitions for the yarn lockfile format
//!
//! Two token layers live here. `RawToken` is the logos-derived lexical
//! layer: it matches the raw character classes of the format and carries
//! decoded scalar payloads. The scanner (see [`super::scanning`]) then
//! reshapes the raw stream into positioned [`Token`] values, resolving the
//! context-sensitive parts of the grammar (indentation vs. separator
//! spaces) that a vanilla logos pass cannot express.

use logos::Logos;
use std::fmt;

/// Raw lexical tokens produced by the logos pass.
///
/// These deliberately carry no source position; positions are recovered
/// from logos spans by the scanner. Space runs are kept as a single token
/// because their meaning (indentation or separator) depends on whether a
/// newline precedes them.
#[derive(Logos, Debug, Clone, PartialEq)]
pub enum RawToken {
    // Line breaks; CRLF is a single token so the next line's byte offset
    // starts after the carriage return
    #[token("\r\n")]
    #[token("\n")]
    Newline,

    // A maximal run of spaces; reinterpreted by the scanner
    #[regex(r" +")]
    Spaces,

    // Comment: everything after '#' up to (not including) the line break.
    // The '#' itself is stripped from the payload
    #[regex(r"#[^\r\n]*", |lex| lex.slice()[1..].to_string())]
    Comment(String),

    // Double-quoted string with backslash escapes, decoded by the callback
    #[regex(r#""([^"\\]|\\.)*""#, unescape_quoted)]
    Quoted(String),

    // Keywords take precedence over the bare-string scan; maximal munch
    // still makes "truex" a single bare string
    #[token("true", |_| true)]
    #[token("false", |_| false)]
    Boolean(bool),

    #[token(":")]
    Colon,

    #[token(",")]
    Comma,

    // A maximal digit run with an integer value
    #[regex(r"[0-9]+", |lex| lex.slice().parse::<i64>().ok())]
    Number(i64),

    // Bare (unquoted) string: starts with a letter, '/', '.' or '-' and
    // runs up to the first ':', space, line break, or ','
    #[regex(r"[A-Za-z/.\-][^ :\r\n,]*", |lex| lex.slice().to_string())]
    Bare(String),
}

/// Decode the contents of a quoted string token, stripping the quotes.
///
/// Handles the JSON-style escapes that occur in yarn lockfiles: `\"`,
/// `\\`, `\/`, `\n`, `\t`, `\r`, `\b`, `\f` and `\uXXXX`. An escape that
/// is not recognized keeps the escaped character as-is.
fn unescape_quoted(lex: &mut logos::Lexer<RawToken>) -> String {
    let raw = lex.slice();
    let inner = &raw[1..raw.len() - 1];
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('b') => out.push('\u{0008}'),
            Some('f') => out.push('\u{000c}'),
            Some('u') => {
                let digits: String = chars.by_ref().take(4).collect();
                match u32::from_str_radix(&digits, 16).ok().and_then(char::from_u32) {
                    Some(decoded) => out.push(decoded),
                    None => {
                        out.push('u');
                        out.push_str(&digits);
                    }
                }
            }
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}

/// The token kinds consumed by the parser.
///
/// Scalar payloads are already decoded: quoted and bare strings both
/// become `String`, indentation carries its half-count (two spaces per
/// level), comments carry their text without the leading `#`. `Invalid`
/// never appears in a successful scan; it is the carrier for the offending
/// input inside scan errors.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    NewLine,
    Indent(usize),
    String(String),
    Number(i64),
    Boolean(bool),
    Colon,
    Comma,
    Comment(String),
    Invalid(String),
    Eof,
}

impl TokenKind {
    /// Check if this token can stand as a property value
    pub fn is_scalar(&self) -> bool {
        matches!(
            self,
            TokenKind::String(_) | TokenKind::Number(_) | TokenKind::Boolean(_)
        )
    }

    /// Check if this token is an indentation token
    pub fn is_indent(&self) -> bool {
        matches!(self, TokenKind::Indent(_))
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::NewLine => write!(f, "newline"),
            TokenKind::Indent(level) => write!(f, "indent({})", level),
            TokenKind::String(value) => write!(f, "string({:?})", value),
            TokenKind::Number(value) => write!(f, "number({})", value),
            TokenKind::Boolean(value) => write!(f, "boolean({})", value),
            TokenKind::Colon => write!(f, "colon"),
            TokenKind::Comma => write!(f, "comma"),
            TokenKind::Comment(text) => write!(f, "comment({:?})", text),
            TokenKind::Invalid(text) => write!(f, "invalid({:?})", text),
            TokenKind::Eof => write!(f, "eof"),
        }
    }
}

/// A token with its 1-based source position, for diagnostics
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub line: usize,
    pub column: usize,
}

impl Token {
    pub fn new(kind: TokenKind, line: usize, column: usize) -> Self {
        Token { kind, line, column }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at line {} column {}", self.kind, self.line, self.column)
    }
}
