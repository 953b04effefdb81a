//! Applied-migrations report loading and traversal.
//!
//! The report comes from an external migration tracker and has no fixed
//! schema: a list of `{ "version": ... }` rows, a list of bare names, a string
//! holding more JSON, or narrative text that mentions migration names. The
//! walk below looks for candidate stems anywhere in that document and never
//! reports a stem that is not a candidate.

use crate::error::{ReconcileError, ReconcileResult};
use crate::stem::normalize_stem;
use regex::Regex;
use serde_json::Value;
use std::borrow::Cow;
use std::collections::{BTreeSet, HashMap, HashSet};
use std::path::Path;

/// Mapping keys whose string values are treated as migration identifiers.
pub const RECOGNIZED_ID_KEYS: &[&str] = &["name", "migration_name", "version", "id"];

/// Characters (besides whitespace) that separate tokens in free text.
const TOKEN_SEPARATORS: &[char] = &[',', ';', ':', '"', '\'', '{', '}', '[', ']', '(', ')'];

/// Anything that may sit right next to a stem in a free-text hit.
const NOT_WORD: &str = "[^A-Za-z0-9_-]";

/// Read and parse the applied-migrations report at `path`.
pub fn load_json(path: &Path) -> ReconcileResult<Value> {
    let content = std::fs::read_to_string(path).map_err(|e| ReconcileError::MalformedInput {
        path: path.display().to_string(),
        reason: format!("cannot read file: {e}"),
    })?;
    serde_json::from_str(&content).map_err(|e| ReconcileError::MalformedInput {
        path: path.display().to_string(),
        reason: format!("invalid JSON: {e}"),
    })
}

/// Collect every candidate stem referenced anywhere in `report`.
///
/// Traversal is an explicit-stack depth-first walk:
/// - objects: string values under [`RECOGNIZED_ID_KEYS`] are normalized and
///   matched against the candidate stems, and against their version prefix
///   (the part before the first `_`); every value is then walked regardless
///   of its key
/// - arrays: every element is walked
/// - strings: if the trimmed text starts with `{` or `[` and parses as JSON,
///   the parsed value is walked instead; otherwise the text is tokenized and
///   also searched for whole-token occurrences of each candidate
/// - numbers, booleans and null are ignored
///
/// An empty result is a valid answer (nothing applied), never an error.
pub fn find_applied_stems(report: &Value, local_stems: &HashSet<String>) -> BTreeSet<String> {
    let matcher = StemMatcher::new(local_stems);
    let mut applied = BTreeSet::new();
    let mut stack: Vec<Cow<'_, Value>> = vec![Cow::Borrowed(report)];

    while let Some(node) = stack.pop() {
        match node.as_ref() {
            Value::Object(map) => {
                for key in RECOGNIZED_ID_KEYS {
                    if let Some(Value::String(id)) = map.get(*key) {
                        matcher.match_identifier(id, &mut applied);
                    }
                }
            }
            Value::Array(_) => {}
            Value::String(text) => {
                match parse_embedded_json(text) {
                    Some(parsed) => stack.push(Cow::Owned(parsed)),
                    None => matcher.match_text(text, &mut applied),
                }
                continue;
            }
            Value::Number(_) | Value::Bool(_) | Value::Null => continue,
        }
        push_children(node, &mut stack);
    }

    applied
}

/// Parse `text` as JSON when it looks like an object or array literal.
fn parse_embedded_json(text: &str) -> Option<Value> {
    let trimmed = text.trim();
    if !(trimmed.starts_with('{') || trimmed.starts_with('[')) {
        return None;
    }
    serde_json::from_str(trimmed).ok()
}

fn push_children<'a>(node: Cow<'a, Value>, stack: &mut Vec<Cow<'a, Value>>) {
    match node {
        Cow::Borrowed(Value::Object(map)) => stack.extend(map.values().map(Cow::Borrowed)),
        Cow::Borrowed(Value::Array(items)) => stack.extend(items.iter().map(Cow::Borrowed)),
        Cow::Owned(Value::Object(map)) => {
            stack.extend(map.into_iter().map(|(_, value)| Cow::Owned(value)))
        }
        Cow::Owned(Value::Array(items)) => stack.extend(items.into_iter().map(Cow::Owned)),
        _ => {}
    }
}

/// Split free text on whitespace and [`TOKEN_SEPARATORS`], dropping empties.
pub(crate) fn tokenize(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| c.is_whitespace() || TOKEN_SEPARATORS.contains(&c))
        .filter(|token| !token.is_empty())
}

/// Matches text against a fixed set of candidate stems.
struct StemMatcher<'a> {
    candidates: &'a HashSet<String>,
    /// `20240101` -> [`20240101_init`], for identifier fields only.
    by_version: HashMap<&'a str, Vec<&'a str>>,
    /// One whole-token pattern per candidate, built once per report.
    patterns: Vec<(&'a str, Regex)>,
}

impl<'a> StemMatcher<'a> {
    fn new(candidates: &'a HashSet<String>) -> Self {
        let mut patterns = Vec::with_capacity(candidates.len());
        let mut by_version: HashMap<&str, Vec<&str>> = HashMap::new();
        for stem in candidates {
            if let Some((version, _)) = stem.split_once('_') {
                by_version.entry(version).or_default().push(stem.as_str());
            }

            // The regex crate has no lookaround, so the boundary is consumed
            // instead; only presence matters here.
            let pattern = format!(
                r"(?:^|{boundary}){stem}(?:\.sql)?(?:$|{boundary})",
                boundary = NOT_WORD,
                stem = regex::escape(stem),
            );
            match Regex::new(&pattern) {
                Ok(re) => patterns.push((stem.as_str(), re)),
                Err(e) => log::warn!("Cannot build matcher for {stem}: {e}"),
            }
        }
        Self {
            candidates,
            by_version,
            patterns,
        }
    }

    fn match_identifier(&self, raw: &str, applied: &mut BTreeSet<String>) {
        let id = normalize_stem(raw);
        if self.candidates.contains(id) {
            if applied.insert(id.to_string()) {
                log::debug!("Applied (identifier field): {id}");
            }
            return;
        }
        for stem in self.by_version.get(id).into_iter().flatten() {
            if applied.insert((*stem).to_string()) {
                log::debug!("Applied (version {id}): {stem}");
            }
        }
    }

    fn match_text(&self, text: &str, applied: &mut BTreeSet<String>) {
        for token in tokenize(text) {
            let stem = normalize_stem(token);
            if self.candidates.contains(stem) && applied.insert(stem.to_string()) {
                log::debug!("Applied (token): {stem}");
            }
        }
        for (stem, re) in &self.patterns {
            if !applied.contains(*stem) && re.is_match(text) {
                log::debug!("Applied (free text): {stem}");
                applied.insert((*stem).to_string());
            }
        }
    }
}

#[cfg(test)]
#[path = "report_test.rs"]
mod tests;
