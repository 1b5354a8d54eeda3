//! Command-line interface for yarnlock
//!
//! This binary parses a yarn lockfile and prints the result as JSON.
//!
//! Usage:
//!   yarnlock `<path>` [--comments] [--yaml-fallback]

use clap::{Arg, ArgAction, Command};

use yarnlock::{parse, parse_with_fallback, ParseOutput, YamlParser};

fn main() {
    let matches = Command::new("yarnlock")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A tool for inspecting yarn lockfiles as JSON")
        .arg(
            Arg::new("path")
                .help("Path to the lockfile to parse")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("comments")
                .long("comments")
                .action(ArgAction::SetTrue)
                .help("Include the lockfile's comment lines in the output"),
        )
        .arg(
            Arg::new("yaml-fallback")
                .long("yaml-fallback")
                .action(ArgAction::SetTrue)
                .help("Retry with a generic YAML parser when lockfile parsing fails"),
        )
        .get_matches();

    let path = matches.get_one::<String>("path").unwrap();
    let with_comments = matches.get_flag("comments");
    let yaml_fallback = matches.get_flag("yaml-fallback");

    let source = std::fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading file: {}", e);
        std::process::exit(1);
    });

    let output = if yaml_fallback {
        parse_with_fallback(&source, &YamlParser)
    } else {
        parse(&source)
    }
    .unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });

    println!("{}", render(&output, with_comments));
}

/// Render a parse result as pretty-printed JSON
fn render(output: &ParseOutput, with_comments: bool) -> String {
    let mut document = serde_json::json!({
        "type": output.kind.as_str(),
        "object": output.mapping,
    });
    if with_comments {
        document["comments"] = serde_json::json!(output.comments);
    }
    serde_json::to_string_pretty(&document).unwrap_or_else(|e| {
        eprintln!("Error serializing output: {}", e);
        std::process::exit(1);
    })
}
