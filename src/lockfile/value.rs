//! Parsed lockfile values
//!
//! A lockfile parses to a mapping from keys to [`Value`]s, where a value
//! is either a scalar (string, integer, boolean) or a nested mapping.
//! Duplicate keys within one scope follow standard mapping semantics: the
//! last write wins.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::lockfile::tokens::TokenKind;

/// The top-level mapping produced by a parse
pub type Mapping = BTreeMap<String, Value>;

/// A single lockfile value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    String(String),
    Number(i64),
    Boolean(bool),
    Object(Mapping),
}

impl Value {
    /// Build a value from a scalar token, or `None` for structural tokens
    pub fn from_scalar(kind: &TokenKind) -> Option<Value> {
        match kind {
            TokenKind::String(value) => Some(Value::String(value.clone())),
            TokenKind::Number(value) => Some(Value::Number(*value)),
            TokenKind::Boolean(value) => Some(Value::Boolean(*value)),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Mapping> {
        match self {
            Value::Object(mapping) => Some(mapping),
            _ => None,
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Number(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean(value)
    }
}
