//! Error types for lockfile scanning and parsing
//!
//! Every failure in the core is one variant of a single closed enum; there
//! is no recovery or retry anywhere inside the core. Variants carry the
//! offending token (kind, decoded value, 1-based line and column) where
//! one is available.

use std::fmt;

use crate::lockfile::tokens::Token;

/// Errors that can occur while scanning or parsing a lockfile
#[derive(Debug, Clone, PartialEq)]
pub enum LockfileError {
    /// Indentation used an odd number of spaces
    InvalidIndentation { token: Token },
    /// The scanner could not match the input against any token rule
    UnexpectedCharacter { token: Token },
    /// A token that cannot start an entry appeared at entry position
    UnexpectedToken { token: Token },
    /// A comma in a key list was not followed by another key
    ExpectedString { token: Token },
    /// An entry had neither a colon nor a scalar value
    InvalidValue { token: Token },
    /// The version pragma declared a lockfile version newer than we support
    UnsupportedVersion { found: u32 },
    /// The token stream ran out while the grammar expected more input
    TruncatedInput,
    /// A merge-conflict variant failed to parse; the file needs manual
    /// conflict resolution
    MergeConflict { source: Box<LockfileError> },
    /// An alternate (fallback) parser failed
    Fallback {
        parser: &'static str,
        message: String,
    },
}

impl LockfileError {
    /// The offending token, for errors that carry one
    pub fn token(&self) -> Option<&Token> {
        match self {
            LockfileError::InvalidIndentation { token }
            | LockfileError::UnexpectedCharacter { token }
            | LockfileError::UnexpectedToken { token }
            | LockfileError::ExpectedString { token }
            | LockfileError::InvalidValue { token } => Some(token),
            LockfileError::MergeConflict { source } => source.token(),
            _ => None,
        }
    }
}

impl fmt::Display for LockfileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LockfileError::InvalidIndentation { token } => {
                write!(
                    f,
                    "Invalid number of spaces at line {} column {}",
                    token.line, token.column
                )
            }
            LockfileError::UnexpectedCharacter { token } => {
                write!(f, "Unexpected character: {}", token)
            }
            LockfileError::UnexpectedToken { token } => {
                write!(f, "Unknown token: {}", token)
            }
            LockfileError::ExpectedString { token } => {
                write!(f, "Expected string, found {}", token)
            }
            LockfileError::InvalidValue { token } => {
                write!(f, "Invalid value type: {}", token)
            }
            LockfileError::UnsupportedVersion { found } => {
                write!(f, "Unsupported lockfile version v{} (supported: v1)", found)
            }
            LockfileError::TruncatedInput => write!(f, "Unexpected end of input"),
            LockfileError::MergeConflict { source } => {
                write!(f, "Merge conflict could not be resolved: {}", source)
            }
            LockfileError::Fallback { parser, message } => {
                write!(f, "Fallback parser '{}' failed: {}", parser, message)
            }
        }
    }
}

impl std::error::Error for LockfileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LockfileError::MergeConflict { source } => Some(source.as_ref()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lockfile::tokens::TokenKind;

    #[test]
    fn test_display_carries_position() {
        let err = LockfileError::UnexpectedToken {
            token: Token::new(TokenKind::Colon, 4, 2),
        };
        assert_eq!(err.to_string(), "Unknown token: colon at line 4 column 2");
    }

    #[test]
    fn test_token_accessor() {
        let token = Token::new(TokenKind::Comma, 1, 1);
        let err = LockfileError::ExpectedString {
            token: token.clone(),
        };
        assert_eq!(err.token(), Some(&token));
        assert_eq!(LockfileError::TruncatedInput.token(), None);
    }

    #[test]
    fn test_merge_conflict_exposes_inner_error() {
        use std::error::Error;
        let token = Token::new(TokenKind::Invalid("@".to_string()), 3, 1);
        let err = LockfileError::MergeConflict {
            source: Box::new(LockfileError::UnexpectedCharacter {
                token: token.clone(),
            }),
        };
        assert_eq!(err.token(), Some(&token));
        assert!(err.source().is_some());
    }
}
