//! Configuration types and parsing for the optional reconcile config file

use crate::error::{ReconcileError, ReconcileResult};
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Settings read from a YAML config file.
///
/// Every field is optional; command-line flags and environment variables
/// take precedence over anything set here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReconcileConfig {
    /// Default location for the pending list
    #[serde(default)]
    pub pending_out: Option<PathBuf>,

    /// Logging settings
    #[serde(default)]
    pub log: LogSettings,
}

/// Logger settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LogSettings {
    /// One of off, error, warn, info, debug, trace
    #[serde(default)]
    pub level: Option<String>,

    /// Also write log lines to this file
    #[serde(default)]
    pub file: Option<PathBuf>,

    /// Also write log lines to `<dir>/reconcile.log`; ignored when `file` is set
    #[serde(default)]
    pub dir: Option<PathBuf>,

    /// Force ANSI colors on or off (auto-detected when unset)
    #[serde(default)]
    pub color: Option<bool>,
}

impl LogSettings {
    /// Parse the configured level, if any.
    pub fn level_filter(&self) -> ReconcileResult<Option<LevelFilter>> {
        self.level
            .as_deref()
            .map(|level| {
                LevelFilter::from_str(level).map_err(|_| ReconcileError::ConfigInvalid {
                    message: format!(
                        "unknown log level '{level}' (expected off, error, warn, info, debug or trace)"
                    ),
                })
            })
            .transpose()
    }
}

impl ReconcileConfig {
    /// Load configuration from a file
    pub fn load(path: &Path) -> ReconcileResult<Self> {
        if !path.exists() {
            return Err(ReconcileError::ConfigNotFound {
                path: path.display().to_string(),
            });
        }

        let content =
            std::fs::read_to_string(path).map_err(|e| ReconcileError::ConfigParse {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;
        let config: ReconcileConfig =
            serde_yaml::from_str(&content).map_err(|e| ReconcileError::ConfigParse {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> ReconcileResult<()> {
        self.log.level_filter()?;
        if self
            .pending_out
            .as_ref()
            .is_some_and(|p| p.as_os_str().is_empty())
        {
            return Err(ReconcileError::ConfigInvalid {
                message: "pending_out cannot be empty".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
