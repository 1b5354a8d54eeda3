//! # yarnlock
//!
//! A parser for the yarn lockfile format: a custom, indentation-sensitive,
//! YAML-like syntax with quoted and bare strings, integers, and booleans.
//! The parser tolerates unresolved version-control merge conflicts by
//! parsing both sides of the conflict and unioning the results.
//!
//! See the [lockfile module](lockfile) for the pipeline and the data model.

pub mod lockfile;

pub use lockfile::{
    parse, parse_or_panic, parse_with_fallback, AlternateParser, LockfileError, Mapping,
    ParseKind, ParseOutput, Value, YamlParser,
};
