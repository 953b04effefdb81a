//! Reconciliation of local migrations against an applied report.

use crate::error::{ReconcileError, ReconcileResult};
use crate::local::list_local_migrations;
use crate::report::{find_applied_stems, load_json};
use crate::stem::normalize_stem;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashSet;
use std::path::Path;

/// Outcome of one reconciliation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReconcileSummary {
    /// Number of local migration files
    pub local_count: usize,

    /// Number of local stems detected as applied
    pub applied_count: usize,

    /// Number of pending migration files
    pub pending_count: usize,

    /// Applied stems, sorted
    pub applied: Vec<String>,

    /// Pending filenames, in local listing order
    pub pending: Vec<String>,
}

impl ReconcileSummary {
    /// Whether the remote database is up to date with the local directory.
    pub fn is_up_to_date(&self) -> bool {
        self.pending.is_empty()
    }
}

/// Classify each local file as applied or pending against `report`.
///
/// `local_files` must already be in reporting order; pending keeps that order.
pub fn reconcile_report(local_files: &[String], report: &Value) -> ReconcileSummary {
    let local_stems: HashSet<String> = local_files
        .iter()
        .map(|file| normalize_stem(file).to_string())
        .collect();

    let applied = find_applied_stems(report, &local_stems);

    let pending: Vec<String> = local_files
        .iter()
        .filter(|file| !applied.contains(normalize_stem(file)))
        .cloned()
        .collect();

    ReconcileSummary {
        local_count: local_files.len(),
        applied_count: applied.len(),
        pending_count: pending.len(),
        applied: applied.into_iter().collect(),
        pending,
    }
}

/// Run a full reconciliation.
///
/// Lists `migrations_dir`, loads the report at `applied_json_path`, and
/// computes the pending list. When `pending_out` is given the pending
/// filenames are written there only after everything else succeeded.
pub fn reconcile(
    migrations_dir: &Path,
    applied_json_path: &Path,
    pending_out: Option<&Path>,
) -> ReconcileResult<ReconcileSummary> {
    let local_files = list_local_migrations(migrations_dir)?;
    let report = load_json(applied_json_path)?;

    let summary = reconcile_report(&local_files, &report);
    log::info!(
        "Reconciled {} local migrations: {} applied, {} pending",
        summary.local_count,
        summary.applied_count,
        summary.pending_count
    );

    if let Some(path) = pending_out {
        write_pending(path, &summary.pending)?;
        log::debug!("Wrote pending list to {}", path.display());
    }

    Ok(summary)
}

/// Persist pending filenames, one per line.
///
/// Every line is newline-terminated; an empty list produces an empty file.
pub fn write_pending(path: &Path, pending: &[String]) -> ReconcileResult<()> {
    let mut content = String::new();
    for file in pending {
        content.push_str(file);
        content.push('\n');
    }
    std::fs::write(path, content).map_err(|e| ReconcileError::WriteFailed {
        path: path.display().to_string(),
        source: e,
    })
}

#[cfg(test)]
#[path = "reconcile_test.rs"]
mod tests;
