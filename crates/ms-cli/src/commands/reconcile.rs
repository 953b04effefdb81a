//! Reconcile command implementation

use anyhow::{Context, Result};
use ms_core::{ReconcileConfig, ReconcileSummary};
use std::fmt::Write as _;

use crate::cli::{Cli, OutputFormat};
use crate::logging;

/// Execute the reconcile command
pub(crate) fn execute(cli: &Cli) -> Result<()> {
    let config = match &cli.global.config {
        Some(path) => ReconcileConfig::load(path)?,
        None => ReconcileConfig::default(),
    };
    logging::init(&cli.global, &config.log)?;

    let output = run(cli, &config)?;
    print!("{output}");
    Ok(())
}

/// Reconcile and render the summary without touching global state.
pub(crate) fn run(cli: &Cli, config: &ReconcileConfig) -> Result<String> {
    let pending_out = cli
        .pending_out
        .as_deref()
        .or(config.pending_out.as_deref());

    log::debug!(
        "Reconciling {} against {}",
        cli.migrations_dir.display(),
        cli.applied_json.display()
    );
    let summary = ms_core::reconcile(&cli.migrations_dir, &cli.applied_json, pending_out)?;

    match cli.format {
        OutputFormat::Text => Ok(render_text(&summary)),
        OutputFormat::Json => {
            let mut json =
                serde_json::to_string_pretty(&summary).context("Failed to serialize summary")?;
            json.push('\n');
            Ok(json)
        }
    }
}

/// Human-readable summary: three counts, then the pending filenames.
pub(crate) fn render_text(summary: &ReconcileSummary) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Local migration files: {}", summary.local_count);
    let _ = writeln!(out, "Applied (detected):    {}", summary.applied_count);
    let _ = writeln!(out, "Pending:               {}", summary.pending_count);
    let _ = writeln!(out);

    if summary.is_up_to_date() {
        let _ = writeln!(out, "No pending migrations. Database is up to date.");
        return out;
    }

    let _ = writeln!(out, "Pending migrations:");
    for file in &summary.pending {
        let _ = writeln!(out, "  - {file}");
    }
    out
}

#[cfg(test)]
#[path = "reconcile_test.rs"]
mod tests;
