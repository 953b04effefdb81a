//! Migration stem normalization.
//!
//! A stem is the identity-bearing part of a migration filename: the last path
//! segment with its trailing `.sql` removed. Two references name the same
//! migration iff their stems are equal as strings.

/// File suffix carried by every migration.
pub const SQL_SUFFIX: &str = ".sql";

/// Reduce a filename-like or token-like string to its stem.
///
/// Takes the substring after the last `/` and strips one trailing `.sql`.
/// Idempotent for every name that does not end in a stacked suffix; a file
/// called `x.sql.sql` keeps the stem `x.sql` so that it never collides with
/// `x.sql` in the same directory.
///
/// # Examples
/// ```
/// use ms_core::normalize_stem;
/// assert_eq!(normalize_stem("supabase/migrations/20240101_init.sql"), "20240101_init");
/// assert_eq!(normalize_stem("20240101_init"), "20240101_init");
/// ```
pub fn normalize_stem(raw: &str) -> &str {
    let last = match raw.rfind('/') {
        Some(pos) => &raw[pos + 1..],
        None => raw,
    };
    last.strip_suffix(SQL_SUFFIX).unwrap_or(last)
}

#[cfg(test)]
#[path = "stem_test.rs"]
mod tests;
