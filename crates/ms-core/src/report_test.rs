use super::*;
use crate::error::ErrorKind;
use serde_json::json;
use std::fs;
use tempfile::tempdir;

fn stems(names: &[&str]) -> HashSet<String> {
    names.iter().map(|s| s.to_string()).collect()
}

fn applied(report: &Value, names: &[&str]) -> Vec<String> {
    find_applied_stems(report, &stems(names)).into_iter().collect()
}

// ── Tokenizer ───────────────────────────────────────────────────────────

#[test]
fn test_tokenize_splits_on_separators() {
    let tokens: Vec<&str> =
        tokenize("a,b;c:d \"e\" 'f' {g} [h] (i)\tj\nk").collect();
    assert_eq!(tokens, vec!["a", "b", "c", "d", "e", "f", "g", "h", "i", "j", "k"]);
}

#[test]
fn test_tokenize_keeps_path_and_suffix_together() {
    let tokens: Vec<&str> = tokenize("ran migrations/20240101_init.sql ok").collect();
    assert_eq!(tokens, vec!["ran", "migrations/20240101_init.sql", "ok"]);
}

// ── Structured reports ──────────────────────────────────────────────────

#[test]
fn test_version_rows_match_bare_stem() {
    let report = json!([{ "version": "20240101" }]);
    assert_eq!(applied(&report, &["20240101", "20240102_add_users"]), vec!["20240101"]);
}

#[test]
fn test_version_field_matches_stem_prefix() {
    let report = json!([{ "version": "20240101", "name": "init" }]);
    assert_eq!(
        applied(&report, &["20240101_init", "20240102_add_users"]),
        vec!["20240101_init"]
    );
}

#[test]
fn test_version_prefix_needs_exact_prefix() {
    let report = json!([{ "version": "2024010" }, { "id": "20240101_in" }]);
    assert!(applied(&report, &["20240101_init"]).is_empty());
}

#[test]
fn test_version_prefix_does_not_apply_to_free_text() {
    let report = json!("applied version 20240101 today");
    assert!(applied(&report, &["20240101_init"]).is_empty());
}

#[test]
fn test_every_recognized_key_is_checked() {
    let report = json!([
        { "name": "a_one" },
        { "migration_name": "b_two.sql" },
        { "version": "c_three" },
        { "id": "supabase/migrations/d_four.sql" },
    ]);
    assert_eq!(
        applied(&report, &["a_one", "b_two", "c_three", "d_four", "e_five"]),
        vec!["a_one", "b_two", "c_three", "d_four"]
    );
}

#[test]
fn test_non_string_identifier_values_are_ignored() {
    let report = json!([{ "version": 20240101 }, { "id": null }, { "name": true }]);
    assert!(applied(&report, &["20240101"]).is_empty());
}

#[test]
fn test_unrecognized_keys_are_still_walked() {
    let report = json!({
        "data": {
            "result": [
                { "statements": ["create table"], "label": "20240101_init" }
            ]
        }
    });
    assert_eq!(applied(&report, &["20240101_init"]), vec!["20240101_init"]);
}

#[test]
fn test_bare_string_list() {
    let report = json!(["20240101_init.sql", "20240102_add_users"]);
    assert_eq!(
        applied(&report, &["20240101_init", "20240102_add_users", "20240103_x"]),
        vec!["20240101_init", "20240102_add_users"]
    );
}

#[test]
fn test_only_candidates_are_reported() {
    let report = json!([{ "version": "20991231_remote_only" }, "99_other.sql"]);
    assert!(applied(&report, &["20240101_init"]).is_empty());
}

#[test]
fn test_scalars_and_empty_reports_yield_nothing() {
    for report in [json!(null), json!(true), json!(42), json!([]), json!({}), json!("")] {
        assert!(applied(&report, &["20240101_init"]).is_empty());
    }
}

// ── Embedded JSON ───────────────────────────────────────────────────────

#[test]
fn test_embedded_json_string_is_parsed() {
    let report = json!(["{\"migrations\": [\"20240101_init.sql\"]}"]);
    assert_eq!(applied(&report, &["20240101_init"]), vec!["20240101_init"]);
}

#[test]
fn test_embedded_json_with_leading_whitespace() {
    let report = json!({ "text": "\n  [{\"version\": \"20240101_init\"}]" });
    assert_eq!(applied(&report, &["20240101_init"]), vec!["20240101_init"]);
}

#[test]
fn test_doubly_embedded_json() {
    let inner = json!([{ "name": "20240102_add_users" }]).to_string();
    let outer = json!({ "content": [{ "type": "text", "text": inner }] }).to_string();
    let report = Value::String(outer);
    assert_eq!(
        applied(&report, &["20240101_init", "20240102_add_users"]),
        vec!["20240102_add_users"]
    );
}

#[test]
fn test_broken_embedded_json_falls_back_to_text() {
    let report = json!("[20240101_init, unterminated");
    assert_eq!(applied(&report, &["20240101_init"]), vec!["20240101_init"]);
}

// ── Free text ───────────────────────────────────────────────────────────

#[test]
fn test_free_text_whole_token() {
    let report = json!("Successfully applied 20240101_init and 20240205_other");
    assert_eq!(applied(&report, &["20240101_init"]), vec!["20240101_init"]);
}

#[test]
fn test_free_text_with_sql_suffix_and_punctuation() {
    let report = json!("Applied: 20240101_init.sql. Done.");
    assert_eq!(applied(&report, &["20240101_init"]), vec!["20240101_init"]);
}

#[test]
fn test_free_text_respects_word_boundaries() {
    // A numeric stem must not match inside a longer identifier.
    let report = json!("applied 20240101_init, x20240101, 20240101-hotfix and 202401011");
    assert!(applied(&report, &["20240101"]).is_empty());
    assert_eq!(applied(&report, &["20240101_init"]), vec!["20240101_init"]);
}

#[test]
fn test_free_text_prefix_stem_is_not_a_false_positive() {
    let report = json!("Applied migration 20240101_init_users successfully");
    assert!(applied(&report, &["20240101_init"]).is_empty());
}

#[test]
fn test_free_text_boundary_on_dot() {
    let report = json!("version=20240101.");
    assert_eq!(applied(&report, &["20240101"]), vec!["20240101"]);
}

#[test]
fn test_stem_with_regex_metacharacters() {
    let report = json!("ran 1.0+fix(a) today");
    assert_eq!(applied(&report, &["1.0+fix(a)"]), vec!["1.0+fix(a)"]);
    assert!(applied(&json!("ran 1x0+fix(a) today"), &["1.0+fix(a)"]).is_empty());
}

// ── load_json ───────────────────────────────────────────────────────────

#[test]
fn test_load_json_reads_document() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("applied.json");
    fs::write(&path, r#"[{"version": "20240101"}]"#).unwrap();

    let value = load_json(&path).unwrap();
    assert_eq!(value, json!([{ "version": "20240101" }]));
}

#[test]
fn test_load_json_missing_file_is_malformed_input() {
    let temp = tempdir().unwrap();
    let err = load_json(&temp.path().join("nope.json")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MalformedInput);
    assert!(err.to_string().contains("cannot read file"));
}

#[test]
fn test_load_json_invalid_json_is_malformed_input() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("applied.json");
    fs::write(&path, "{ not json").unwrap();

    let err = load_json(&path).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MalformedInput);
    assert!(err.to_string().contains("invalid JSON"));
}
