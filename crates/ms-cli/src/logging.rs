//! Logger setup from CLI flags and config

use anyhow::{Context, Result};
use log::LevelFilter;
use ms_core::LogSettings;
use ms_log::{FileTarget, LoggerConfig};

use crate::cli::GlobalArgs;

/// Name shown in every log line.
const LOGGER_NAME: &str = "reconcile";

/// Merge flags over config-file settings. Flags win.
pub(crate) fn logger_config(global: &GlobalArgs, settings: &LogSettings) -> Result<LoggerConfig> {
    let base = if global.verbose {
        LoggerConfig::verbose(LOGGER_NAME)
    } else if global.quiet {
        LoggerConfig::quiet(LOGGER_NAME)
    } else {
        let level = settings.level_filter()?.unwrap_or(LevelFilter::Info);
        LoggerConfig::new(LOGGER_NAME).with_level(level)
    };

    let base = if global.no_color {
        base.with_color(false)
    } else if let Some(color) = settings.color {
        base.with_color(color)
    } else {
        base
    };

    Ok(match file_target(global, settings) {
        Some(target) => base.with_file(target),
        None => base,
    })
}

/// `--log-file`, then `--log-dir`, then the config's `file`, then its `dir`.
fn file_target(global: &GlobalArgs, settings: &LogSettings) -> Option<FileTarget> {
    if let Some(path) = &global.log_file {
        return Some(FileTarget::Path(path.clone()));
    }
    if let Some(dir) = &global.log_dir {
        return Some(FileTarget::Dir(dir.clone()));
    }
    settings
        .file
        .clone()
        .map(FileTarget::Path)
        .or_else(|| settings.dir.clone().map(FileTarget::Dir))
}

/// Install the process-wide logger.
pub(crate) fn init(global: &GlobalArgs, settings: &LogSettings) -> Result<()> {
    let config = logger_config(global, settings)?;
    ms_log::setup_logger(&config).context("Failed to initialize logging")?;
    log::debug!("Logging at {} (color: {})", config.level, config.colored);
    Ok(())
}
