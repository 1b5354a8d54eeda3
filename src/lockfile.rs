//! Parser for the yarn lockfile format
//!
//! The lockfile format is a custom, indentation-significant, YAML-like
//! syntax:
//!
//! ```text
//! # yarn lockfile v1
//!
//! "left-pad@^1.0.0":
//!   version "1.3.0"
//!   resolved "https://registry.yarnpkg.com/left-pad/-/left-pad-1.3.0.tgz#5b8a3a7765dfe001261dde915589e782f8c94d1e"
//! ```
//!
//! Parsing runs as a pipeline: the text is first checked for unresolved
//! version-control merge conflicts ([`conflicts`]); conflict-free text
//! goes through the scanner ([`scanning`]) and the indentation-driven
//! recursive-descent parser ([`parsing`]) to produce a nested mapping of
//! [`Value`]s plus the ordered list of comment lines. Conflicted text is
//! split into its two variants, each is reparsed through the same
//! pipeline, and the results are unioned.
//!
//! The whole core is synchronous, does no I/O, and holds no state across
//! calls beyond a couple of compiled matching patterns.

pub mod conflicts;
pub mod error;
pub mod fallback;
pub mod parsing;
pub mod scanning;
pub mod tokens;
pub mod value;

pub use error::LockfileError;
pub use fallback::{parse_with_fallback, AlternateParser, YamlParser};
pub use parsing::{Parser, SUPPORTED_LOCKFILE_VERSION};
pub use scanning::scan;
pub use tokens::{Token, TokenKind};
pub use value::{Mapping, Value};

/// How a parse result was obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseKind {
    /// An unambiguous parse of conflict-free input
    Success,
    /// A best-effort union of the two sides of a merge conflict
    Merge,
}

impl ParseKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParseKind::Success => "success",
            ParseKind::Merge => "merge",
        }
    }
}

/// The result of parsing lockfile text
#[derive(Debug, Clone, PartialEq)]
pub struct ParseOutput {
    pub kind: ParseKind,
    /// The nested key/value structure
    pub mapping: Mapping,
    /// Comment lines in file order, without the leading `#`
    pub comments: Vec<String>,
}

/// Parse lockfile text.
///
/// Tolerates unresolved merge conflicts: conflicted input is split into
/// its two variants and the parsed results are unioned, with the output
/// tagged [`ParseKind::Merge`] so callers can tell a best-effort merge
/// from an unambiguous parse.
pub fn parse(source: &str) -> Result<ParseOutput, LockfileError> {
    if conflicts::has_conflict(source) {
        return conflicts::parse_with_conflict(source);
    }
    parse_clean(source)
}

/// Scan and parse text known to carry no conflict region
pub(crate) fn parse_clean(source: &str) -> Result<ParseOutput, LockfileError> {
    let tokens = scanning::scan(source)?;
    let (mapping, comments) = parsing::Parser::new(&tokens).parse()?;
    Ok(ParseOutput {
        kind: ParseKind::Success,
        mapping,
        comments,
    })
}

/// Parse lockfile text, panicking on failure.
///
/// Thin wrapper over [`parse`] for callers that treat a malformed
/// lockfile as fatal.
pub fn parse_or_panic(source: &str) -> ParseOutput {
    match parse(source) {
        Ok(output) => output,
        Err(err) => panic!("{}", err),
    }
}
