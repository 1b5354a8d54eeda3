//! Integration tests for lockfile parsing

use rstest::rstest;
use yarnlock::{parse, LockfileError, ParseKind, Value};

#[rstest]
#[case::bareword("key bareword\n", Value::from("bareword"))]
#[case::quoted("key \"quoted\"\n", Value::from("quoted"))]
#[case::number("key 7\n", Value::from(7))]
#[case::boolean_true("key true\n", Value::from(true))]
#[case::boolean_false("key false\n", Value::from(false))]
#[case::with_colon("key: bareword\n", Value::from("bareword"))]
fn flat_entry_value_typed_by_literal_form(#[case] source: &str, #[case] expected: Value) {
    let output = parse(source).expect("parse failed");
    assert_eq!(output.kind, ParseKind::Success);
    assert_eq!(output.mapping.len(), 1);
    assert_eq!(output.mapping.get("key"), Some(&expected));
}

#[test]
fn single_nested_object() {
    let output = parse("foo:\n  bar \"bar\"\n").expect("parse failed");
    assert_eq!(
        serde_json::to_value(&output.mapping).unwrap(),
        serde_json::json!({"foo": {"bar": "bar"}})
    );
    assert!(output.comments.is_empty());
}

#[test]
fn doubly_nested_object() {
    let output = parse("foo:\n  bar:\n    foo \"bar\"\n").expect("parse failed");
    assert_eq!(
        serde_json::to_value(&output.mapping).unwrap(),
        serde_json::json!({"foo": {"bar": {"foo": "bar"}}})
    );
}

#[test]
fn nesting_is_structure_preserving_to_arbitrary_depth() {
    // build a document nested N levels deep, then walk back down
    let depth = 12;
    let mut source = String::new();
    for level in 0..depth {
        source.push_str(&"  ".repeat(level));
        source.push_str(&format!("level{}:\n", level));
    }
    source.push_str(&"  ".repeat(depth));
    source.push_str("leaf \"value\"\n");

    let output = parse(&source).expect("parse failed");
    let mut current = &output.mapping;
    for level in 0..depth {
        current = current
            .get(&format!("level{}", level))
            .and_then(Value::as_object)
            .unwrap_or_else(|| panic!("missing object at level {}", level));
    }
    assert_eq!(current.get("leaf"), Some(&Value::from("value")));
}

#[test]
fn alias_keys_receive_identical_values() {
    for source in ["a, b: value\n", "a, b value\n"] {
        let output = parse(source).expect("parse failed");
        assert_eq!(output.mapping.get("a"), output.mapping.get("b"));
        assert_eq!(output.mapping.get("a"), Some(&Value::from("value")));
    }
}

#[test]
fn odd_indentation_is_rejected() {
    for source in ["foo:\n   bar baz\n", "foo:\n     bar baz\n"] {
        let err = parse(source).unwrap_err();
        assert!(
            matches!(err, LockfileError::InvalidIndentation { .. }),
            "expected InvalidIndentation for {:?}, got {:?}",
            source,
            err
        );
    }
}

#[test]
fn version_pragma_v1_is_accepted_and_kept_as_comment() {
    let output = parse("# yarn lockfile v1\nfoo bar\n").expect("parse failed");
    assert_eq!(output.mapping.get("foo"), Some(&Value::from("bar")));
    assert_eq!(output.comments, vec![" yarn lockfile v1".to_string()]);
}

#[test]
fn version_pragma_v2_is_rejected() {
    let err = parse("# yarn lockfile v2\nfoo bar\n").unwrap_err();
    assert_eq!(err, LockfileError::UnsupportedVersion { found: 2 });
}

#[test]
fn comments_never_appear_in_the_mapping() {
    let output = parse("# one\nfoo bar\n# two\nbaz:\n  # three\n  qux 1\n").expect("parse failed");
    assert_eq!(output.mapping.len(), 2);
    assert_eq!(
        output.comments,
        vec![" one".to_string(), " two".to_string(), " three".to_string()]
    );
}

#[test]
fn crlf_and_lf_parse_identically() {
    let lf = "# header\nfoo:\n  bar \"baz\"\n  qux 1\n";
    let crlf = lf.replace('\n', "\r\n");
    let lf_output = parse(lf).expect("LF parse failed");
    let crlf_output = parse(&crlf).expect("CRLF parse failed");
    assert_eq!(lf_output.mapping, crlf_output.mapping);
    assert_eq!(lf_output.comments, crlf_output.comments);
}

#[test]
fn byte_order_mark_is_stripped() {
    let output = parse("\u{feff}foo bar\n").expect("parse failed");
    assert_eq!(output.mapping.get("foo"), Some(&Value::from("bar")));
}

#[test]
fn parse_errors_carry_source_positions() {
    let err = parse("foo:\n  bar baz\n  : broken\n").unwrap_err();
    let token = err.token().expect("no token on error");
    assert_eq!((token.line, token.column), (3, 3));
}

#[test]
fn full_lockfile_document() {
    let source = r#"# yarn lockfile v1


"ansi-styles@^3.2.1":
  version "3.2.1"
  resolved "https://registry.yarnpkg.com/ansi-styles/-/ansi-styles-3.2.1.tgz#41fbb20243e50b12be0f04b8dedbf07520ce841d"
  dependencies:
    color-convert "^1.9.0"

chalk@^2.0.0, chalk@^2.4.2:
  version "2.4.2"
  dependencies:
    ansi-styles "^3.2.1"
    supports-color "^5.3.0"

has-flag@^3.0.0:
  version "3.0.0"
"#;
    let output = parse(source).expect("parse failed");
    assert_eq!(output.kind, ParseKind::Success);
    assert_eq!(output.mapping.len(), 4);
    assert_eq!(
        output.mapping.get("chalk@^2.0.0"),
        output.mapping.get("chalk@^2.4.2")
    );
    let chalk = output
        .mapping
        .get("chalk@^2.0.0")
        .and_then(Value::as_object)
        .expect("no chalk object");
    assert_eq!(chalk.get("version"), Some(&Value::from("2.4.2")));
    let deps = chalk
        .get("dependencies")
        .and_then(Value::as_object)
        .expect("no dependencies object");
    assert_eq!(deps.get("supports-color"), Some(&Value::from("^5.3.0")));
}
