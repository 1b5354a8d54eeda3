//! Scanner for the yarn lockfile format
//!
//! This module turns raw text into the positioned token stream consumed by
//! the parser. Tokenization happens in two stages:
//!
//! 1. Core tokenization using the logos lexer (see [`super::tokens`])
//! 2. A transform pass that resolves the context-sensitive rules:
//!    - space runs immediately after a line break become `Indent` tokens
//!      (two spaces per level; an odd number of spaces is a scan error)
//!    - space runs anywhere else are token separators and emit nothing
//!    - line and column positions are recovered from the logos byte spans
//!
//! The rationale for the two-stage split is the same as for the lex
//! format's lexer: the logos pass stays a vanilla character-class scanner,
//! and the "was the previous character a line terminator" state lives in
//! exactly one place.
//!
//! A leading UTF-8 byte-order-mark is stripped before scanning. Both LF
//! and CRLF line endings are accepted; a CRLF newline is a single token,
//! so column offsets on the following line are unaffected by the extra
//! carriage-return byte.

use logos::Logos;

use crate::lockfile::error::LockfileError;
use crate::lockfile::tokens::{RawToken, Token, TokenKind};

/// Strip a leading byte-order-mark, if present
fn strip_bom(source: &str) -> &str {
    source.strip_prefix('\u{feff}').unwrap_or(source)
}

/// Tokenize lockfile text into a positioned token stream.
///
/// The returned stream is in source order and is terminated by exactly one
/// `Eof` token. Any scan failure aborts immediately; no partial stream is
/// returned.
pub fn scan(source: &str) -> Result<Vec<Token>, LockfileError> {
    let source = strip_bom(source);
    let mut tokens = Vec::new();

    let mut line = 1usize;
    // Byte offset of the first character of the current line
    let mut line_start = 0usize;
    // Whether the previous raw token was a line break; decides if a space
    // run is indentation or a separator
    let mut after_newline = false;

    for (result, span) in RawToken::lexer(source).spanned() {
        let column = span.start - line_start + 1;
        let raw = match result {
            Ok(raw) => raw,
            Err(()) => {
                let text = source[span.clone()].to_string();
                return Err(LockfileError::UnexpectedCharacter {
                    token: Token::new(TokenKind::Invalid(text), line, column),
                });
            }
        };

        match &raw {
            RawToken::Newline => {
                tokens.push(Token::new(TokenKind::NewLine, line, column));
                line += 1;
                line_start = span.end;
            }
            RawToken::Spaces => {
                if after_newline {
                    let width = span.len();
                    if width % 2 != 0 {
                        let text = source[span.clone()].to_string();
                        return Err(LockfileError::InvalidIndentation {
                            token: Token::new(TokenKind::Invalid(text), line, column),
                        });
                    }
                    tokens.push(Token::new(TokenKind::Indent(width / 2), line, column));
                }
                // separator spaces between tokens emit nothing
            }
            RawToken::Comment(text) => {
                tokens.push(Token::new(TokenKind::Comment(text.clone()), line, column));
            }
            RawToken::Quoted(value) | RawToken::Bare(value) => {
                tokens.push(Token::new(TokenKind::String(value.clone()), line, column));
            }
            RawToken::Boolean(value) => {
                tokens.push(Token::new(TokenKind::Boolean(*value), line, column));
            }
            RawToken::Number(value) => {
                tokens.push(Token::new(TokenKind::Number(*value), line, column));
            }
            RawToken::Colon => {
                tokens.push(Token::new(TokenKind::Colon, line, column));
            }
            RawToken::Comma => {
                tokens.push(Token::new(TokenKind::Comma, line, column));
            }
        }

        after_newline = matches!(raw, RawToken::Newline);
    }

    let end_column = source.len() - line_start + 1;
    tokens.push(Token::new(TokenKind::Eof, line, end_column));
    Ok(tokens)
}
