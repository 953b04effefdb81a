//! Local migration discovery

use crate::error::{ReconcileError, ReconcileResult};
use crate::stem::SQL_SUFFIX;
use std::path::Path;

/// Whether `name` looks like a versioned migration: leading ASCII digit,
/// trailing `.sql`.
pub fn is_migration_filename(name: &str) -> bool {
    name.starts_with(|c: char| c.is_ascii_digit()) && name.ends_with(SQL_SUFFIX)
}

/// List migration filenames in `dir`, sorted by byte order of the full name.
///
/// The sort order is what pending migrations are reported in. Subdirectories
/// are skipped even when their names match, and so are entries whose names
/// are not valid UTF-8.
pub fn list_local_migrations(dir: &Path) -> ReconcileResult<Vec<String>> {
    let display = dir.display().to_string();

    if !dir.exists() {
        return Err(ReconcileError::NotFound { path: display });
    }
    if !dir.is_dir() {
        return Err(ReconcileError::NotADirectory { path: display });
    }

    let entries = std::fs::read_dir(dir).map_err(read_dir_failed(&display))?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(read_dir_failed(&display))?;
        let file_name = entry.file_name();
        let Some(name) = file_name.to_str() else {
            log::warn!(
                "Skipping non UTF-8 entry in {}: {:?}",
                display,
                file_name
            );
            continue;
        };
        if !is_migration_filename(name) {
            continue;
        }
        if entry.path().is_dir() {
            log::debug!("Skipping directory that looks like a migration: {name}");
            continue;
        }
        files.push(name.to_string());
    }

    if files.is_empty() {
        return Err(ReconcileError::EmptyResult { path: display });
    }

    files.sort_unstable();
    log::debug!("Found {} local migrations in {}", files.len(), display);
    Ok(files)
}

fn read_dir_failed(path: &str) -> impl Fn(std::io::Error) -> ReconcileError + '_ {
    move |source| ReconcileError::ReadDirFailed {
        path: path.to_string(),
        source,
    }
}

#[cfg(test)]
#[path = "local_test.rs"]
mod tests;
