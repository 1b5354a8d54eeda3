//! Merge-conflict tolerance for lockfile parsing
//!
//! A lockfile checked into version control can reach us with unresolved
//! merge conflict markers embedded in it. Rather than failing outright,
//! the text is split into the two conflicting variants, each variant is
//! reparsed through the full pipeline, and the two results are unioned.
//!
//! Extraction is line-oriented and handles the first conflict region:
//! lines before `<<<<<<<` are a common prefix shared by both variants, the
//! "ours" side runs to the `=======` separator (skipping a `|||||||`
//! common-ancestor section when the conflict is three-way), the "theirs"
//! side runs to `>>>>>>>`, and everything after that is a shared suffix.
//! Further conflicts in the suffix are handled by the recursive reparse of
//! each variant.
//!
//! The union is a shallow top-level merge with "theirs" winning on key
//! collisions; nested same-path conflicts are not deep-merged. Comment
//! lists are concatenated with duplicates removed, preserving first-seen
//! order.

use crate::lockfile::error::LockfileError;
use crate::lockfile::{parse, parse_clean};
use crate::lockfile::{ParseKind, ParseOutput};

const CONFLICT_START: &str = "<<<<<<<";
const CONFLICT_ANCESTOR: &str = "|||||||";
const CONFLICT_SEPARATOR: &str = "=======";
const CONFLICT_END: &str = ">>>>>>>";

/// Check whether the text contains an unresolved merge conflict.
///
/// All three markers must be present; their ordering is not verified here,
/// so a structurally broken conflict surfaces later as a variant parse
/// failure.
pub fn has_conflict(source: &str) -> bool {
    source.contains(CONFLICT_START)
        && source.contains(CONFLICT_SEPARATOR)
        && source.contains(CONFLICT_END)
}

/// Split conflicted text into its two conflict-free variants.
///
/// A `|||||||` common-ancestor section on the "ours" side is discarded; it
/// belongs to neither variant. Returns `None` when no line starts with the
/// `<<<<<<<` marker, meaning there is no conflict region to extract even
/// though the markers appear somewhere in the text.
fn extract_variants(source: &str) -> Option<(String, String)> {
    let lines: Vec<&str> = source
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect();

    let mut ours: Vec<&str> = Vec::new();
    let mut theirs: Vec<&str> = Vec::new();
    let mut i = 0;

    // common prefix
    while i < lines.len() && !lines[i].starts_with(CONFLICT_START) {
        ours.push(lines[i]);
        theirs.push(lines[i]);
        i += 1;
    }

    if i == lines.len() {
        return None;
    }
    // skip the <<<<<<< line itself
    i += 1;

    // "ours" side, discarding a three-way ancestor section
    let mut in_ancestor = false;
    while i < lines.len() && lines[i] != CONFLICT_SEPARATOR {
        if in_ancestor || lines[i].starts_with(CONFLICT_ANCESTOR) {
            in_ancestor = true;
        } else {
            ours.push(lines[i]);
        }
        i += 1;
    }
    i += 1; // past =======

    // "theirs" side
    while i < lines.len() && !lines[i].starts_with(CONFLICT_END) {
        theirs.push(lines[i]);
        i += 1;
    }
    i += 1; // past >>>>>>>

    // shared suffix; any further conflict in it is resolved by the
    // recursive reparse of the variants
    while i < lines.len() {
        ours.push(lines[i]);
        theirs.push(lines[i]);
        i += 1;
    }

    Some((ours.join("\n"), theirs.join("\n")))
}

/// Parse conflicted text by resolving its variants and unioning them.
///
/// If either variant fails to parse, the whole operation fails with that
/// variant's error wrapped in the distinct `MergeConflict` kind, so
/// callers can report "this file needs manual conflict resolution".
pub fn parse_with_conflict(source: &str) -> Result<ParseOutput, LockfileError> {
    let Some((ours, theirs)) = extract_variants(source) else {
        // all three markers occur but never at the start of a line (say,
        // inside quoted values); there is no conflict region to resolve
        return parse_clean(source);
    };

    let first = parse(&ours).map_err(|err| LockfileError::MergeConflict {
        source: Box::new(err),
    })?;
    let second = parse(&theirs).map_err(|err| LockfileError::MergeConflict {
        source: Box::new(err),
    })?;

    // shallow union, second variant wins on collisions
    let mut mapping = first.mapping;
    mapping.extend(second.mapping);

    // dedup over the whole concatenation, not just across the variants; a
    // comment repeated within one variant collapses too
    let mut comments: Vec<String> = Vec::new();
    for comment in first.comments.into_iter().chain(second.comments) {
        if !comments.contains(&comment) {
            comments.push(comment);
        }
    }

    Ok(ParseOutput {
        kind: ParseKind::Merge,
        mapping,
        comments,
    })
}
