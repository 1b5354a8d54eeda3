//! Alternate parsers for files that are not lockfile-formatted
//!
//! Newer yarn releases write their lockfile as plain YAML. The core
//! parser knows nothing about YAML; instead it exposes a retry seam: an
//! [`AlternateParser`] can be handed to [`parse_with_fallback`], which
//! invokes it whenever the primary scan/parse fails and substitutes its
//! successful result transparently.

use crate::lockfile::error::LockfileError;
use crate::lockfile::value::{Mapping, Value};
use crate::lockfile::{parse, ParseKind, ParseOutput};

/// A pluggable parser tried when the primary lockfile parse fails
pub trait AlternateParser: Send + Sync {
    /// Return the name of this parser implementation
    fn name(&self) -> &'static str;

    /// Parse source text into a lockfile-shaped result
    fn parse(&self, source: &str) -> Result<ParseOutput, LockfileError>;
}

/// Parse lockfile text, retrying with an alternate parser on failure.
///
/// If both parsers fail, the alternate parser's error is returned.
pub fn parse_with_fallback(
    source: &str,
    fallback: &dyn AlternateParser,
) -> Result<ParseOutput, LockfileError> {
    match parse(source) {
        Ok(output) => Ok(output),
        Err(_) => fallback.parse(source),
    }
}

/// Generic YAML fallback backed by serde_yaml
pub struct YamlParser;

impl AlternateParser for YamlParser {
    fn name(&self) -> &'static str {
        "yaml"
    }

    fn parse(&self, source: &str) -> Result<ParseOutput, LockfileError> {
        let document: serde_yaml::Value =
            serde_yaml::from_str(source).map_err(|err| LockfileError::Fallback {
                parser: self.name(),
                message: err.to_string(),
            })?;
        let mapping = match convert_yaml(&document, self.name())? {
            Value::Object(mapping) => mapping,
            _ => {
                return Err(LockfileError::Fallback {
                    parser: self.name(),
                    message: "top-level YAML value is not a mapping".to_string(),
                })
            }
        };
        Ok(ParseOutput {
            kind: ParseKind::Success,
            mapping,
            // YAML comments are not surfaced by serde_yaml
            comments: Vec::new(),
        })
    }
}

/// Convert a YAML document into the lockfile value model.
///
/// Only the shapes a lockfile can express are accepted: mappings with
/// string keys, strings, integers, and booleans.
fn convert_yaml(value: &serde_yaml::Value, parser: &'static str) -> Result<Value, LockfileError> {
    let unsupported = |what: &str| LockfileError::Fallback {
        parser,
        message: format!("unsupported YAML value: {}", what),
    };
    match value {
        serde_yaml::Value::String(text) => Ok(Value::String(text.clone())),
        serde_yaml::Value::Bool(flag) => Ok(Value::Boolean(*flag)),
        serde_yaml::Value::Number(number) => number
            .as_i64()
            .map(Value::Number)
            .ok_or_else(|| unsupported("non-integer number")),
        serde_yaml::Value::Mapping(entries) => {
            let mut mapping = Mapping::new();
            for (key, entry) in entries {
                let key = key.as_str().ok_or_else(|| unsupported("non-string key"))?;
                mapping.insert(key.to_string(), convert_yaml(entry, parser)?);
            }
            Ok(Value::Object(mapping))
        }
        serde_yaml::Value::Tagged(tagged) => convert_yaml(&tagged.value, parser),
        serde_yaml::Value::Null => Err(unsupported("null")),
        serde_yaml::Value::Sequence(_) => Err(unsupported("sequence")),
    }
}
