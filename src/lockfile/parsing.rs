//! Parser for the yarn lockfile format
//!
//! An indentation-driven recursive-descent parser over the token stream
//! produced by [`super::scanning::scan`]. Each scope (nesting level) is
//! one call to `parse_scope`; a nested object opens a child scope at
//! `indent + 1` which runs until its indentation ends, then hands control
//! and the remaining token stream back to its parent.
//!
//! Comments are invisible to the grammar: `advance` records them into the
//! comment list and moves on. While recording, a comment matching the
//! version pragma `yarn lockfile v<N>` is validated against the supported
//! lockfile version; a newer version is a fatal error.
//!
//! Grammar notes:
//! - An entry is one or more comma-separated keys followed by either a
//!   scalar value, or a colon and a nested object on the following lines.
//!   All keys of an entry receive the same value.
//! - At indentation level 0 line breaks carry no structure; any indent
//!   token not exactly equal to the current level ends the current scope,
//!   whether it dropped below the level or over-indented.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::lockfile::error::LockfileError;
use crate::lockfile::tokens::{Token, TokenKind};
use crate::lockfile::value::{Mapping, Value};

/// The newest lockfile version this parser understands
pub const SUPPORTED_LOCKFILE_VERSION: u32 = 1;

/// Version pragma, matched against trimmed comment text
static LOCKFILE_VERSION_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^yarn lockfile v(\d+)$").unwrap());

/// One parse pass over a token stream.
///
/// The parser owns its cursor, the current token, and the accumulated
/// comment list; scope mappings live on the call stack. Nothing persists
/// across passes except the compiled pragma pattern.
pub struct Parser<'t> {
    tokens: &'t [Token],
    /// Index of the next unread token
    pos: usize,
    /// The current (most recently read) non-comment token
    token: Option<&'t Token>,
    comments: Vec<String>,
}

impl<'t> Parser<'t> {
    pub fn new(tokens: &'t [Token]) -> Self {
        Parser {
            tokens,
            pos: 0,
            token: None,
            comments: Vec::new(),
        }
    }

    /// Run the parse, consuming the parser.
    ///
    /// Returns the top-level mapping and the comments in file order.
    pub fn parse(mut self) -> Result<(Mapping, Vec<String>), LockfileError> {
        self.advance()?;
        let mapping = self.parse_scope(0)?;
        Ok((mapping, self.comments))
    }

    /// The current token, or `TruncatedInput` if none has been read
    fn token(&self) -> Result<&'t Token, LockfileError> {
        self.token.ok_or(LockfileError::TruncatedInput)
    }

    /// Move to the next non-comment token, recording comments on the way
    fn advance(&mut self) -> Result<(), LockfileError> {
        loop {
            let token = self
                .tokens
                .get(self.pos)
                .ok_or(LockfileError::TruncatedInput)?;
            self.pos += 1;
            if let TokenKind::Comment(text) = &token.kind {
                self.record_comment(text)?;
                continue;
            }
            self.token = Some(token);
            return Ok(());
        }
    }

    /// Record a comment, validating any embedded version pragma
    fn record_comment(&mut self, text: &str) -> Result<(), LockfileError> {
        if let Some(captures) = LOCKFILE_VERSION_PATTERN.captures(text.trim()) {
            let found = captures[1].parse::<u32>().unwrap_or(u32::MAX);
            if found > SUPPORTED_LOCKFILE_VERSION {
                return Err(LockfileError::UnsupportedVersion { found });
            }
        }
        self.comments.push(text.to_string());
        Ok(())
    }

    /// Parse one scope at the given indentation level.
    ///
    /// Returns when the scope's indentation ends or `Eof` is reached; the
    /// token that ended the scope is left as the current token for the
    /// caller.
    fn parse_scope(&mut self, indent: usize) -> Result<Mapping, LockfileError> {
        let mut mapping = Mapping::new();

        loop {
            let token = self.token()?;
            match &token.kind {
                TokenKind::NewLine => {
                    self.advance()?;
                    if indent == 0 {
                        // at the root, indentation carries no structure
                        continue;
                    }
                    let next = self.token()?;
                    match next.kind {
                        // still on our level: consume the indent and go on
                        TokenKind::Indent(level) if level == indent => self.advance()?,
                        // anything else ends this scope
                        _ => break,
                    }
                }
                TokenKind::Indent(level) => {
                    if *level == indent {
                        self.advance()?;
                    } else {
                        break;
                    }
                }
                TokenKind::Eof => break,
                TokenKind::String(key) => {
                    let mut keys = vec![key.clone()];
                    self.advance()?;

                    // collect alias keys: `a, b, c` all get the same value
                    while matches!(self.token()?.kind, TokenKind::Comma) {
                        self.advance()?;
                        let token = self.token()?;
                        match &token.kind {
                            TokenKind::String(alias) => keys.push(alias.clone()),
                            _ => {
                                return Err(LockfileError::ExpectedString {
                                    token: token.clone(),
                                })
                            }
                        }
                        self.advance()?;
                    }

                    let was_colon = matches!(self.token()?.kind, TokenKind::Colon);
                    if was_colon {
                        self.advance()?;
                    }

                    let token = self.token()?;
                    if let Some(value) = Value::from_scalar(&token.kind) {
                        for key in &keys {
                            mapping.insert(key.clone(), value.clone());
                        }
                        self.advance()?;
                    } else if was_colon {
                        let child = self.parse_scope(indent + 1)?;
                        for key in &keys {
                            mapping.insert(key.clone(), Value::Object(child.clone()));
                        }
                        // the child scope may have consumed our dedent too
                        if indent != 0 && !self.token()?.kind.is_indent() {
                            break;
                        }
                    } else {
                        return Err(LockfileError::InvalidValue {
                            token: token.clone(),
                        });
                    }
                }
                _ => {
                    return Err(LockfileError::UnexpectedToken {
                        token: token.clone(),
                    })
                }
            }
        }

        Ok(mapping)
    }
}
