//! Subscriber setup for the `log` facade.
//!
//! Console lines go to stderr so that stdout stays reserved for command
//! output; the level is colored when enabled. File lines are never colored
//! and carry the source location.

use crate::error::LogError;
use log::LevelFilter;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use tracing::Subscriber;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{
    filter,
    fmt::{self, time::ChronoLocal},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Whether colored output should be used on stderr.
///
/// True only when stderr is a terminal and `NO_COLOR` is unset.
pub fn use_color() -> bool {
    std::io::stderr().is_terminal() && std::env::var_os("NO_COLOR").is_none()
}

/// Where the optional log file goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileTarget {
    /// This exact file
    Path(PathBuf),
    /// `<dir>/<logger name>.log`
    Dir(PathBuf),
}

impl FileTarget {
    /// Resolve the concrete file path for a logger called `name`.
    ///
    /// Dots in the name become underscores in the derived filename.
    pub fn resolve(&self, name: &str) -> PathBuf {
        match self {
            FileTarget::Path(path) => path.clone(),
            FileTarget::Dir(dir) => dir.join(format!("{}.log", name.replace('.', "_"))),
        }
    }
}

/// Logger configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggerConfig {
    /// Names the log file when writing into a directory
    pub name: String,
    pub level: LevelFilter,
    /// ANSI colors on the console
    pub colored: bool,
    pub file: Option<FileTarget>,
}

impl LoggerConfig {
    /// INFO level, console only, color auto-detected.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            level: LevelFilter::Info,
            colored: use_color(),
            file: None,
        }
    }

    /// Same as [`new`](Self::new) at DEBUG.
    pub fn verbose(name: impl Into<String>) -> Self {
        Self::new(name).with_level(LevelFilter::Debug)
    }

    /// Same as [`new`](Self::new) at WARN.
    pub fn quiet(name: impl Into<String>) -> Self {
        Self::new(name).with_level(LevelFilter::Warn)
    }

    pub fn with_level(mut self, level: LevelFilter) -> Self {
        self.level = level;
        self
    }

    pub fn with_color(mut self, colored: bool) -> Self {
        self.colored = colored;
        self
    }

    pub fn with_file(mut self, file: FileTarget) -> Self {
        self.file = Some(file);
        self
    }
}

/// Build the subscriber described by `config` without installing it.
///
/// Opens (and creates, with parent directories) the log file when one is
/// configured.
pub fn build_subscriber(
    config: &LoggerConfig,
) -> Result<impl Subscriber + Send + Sync + 'static, LogError> {
    let file_layer = match &config.file {
        Some(target) => {
            let appender = open_appender(&target.resolve(&config.name))?;
            Some(
                fmt::layer()
                    .with_writer(appender)
                    .with_ansi(false)
                    .with_timer(timer())
                    .with_file(true)
                    .with_line_number(true),
            )
        }
        None => None,
    };

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(config.colored)
        .with_timer(timer())
        .with_target(false);

    Ok(tracing_subscriber::registry()
        .with(tracing_level(config.level))
        .with(console_layer)
        .with(file_layer))
}

/// Install the subscriber built from `config` process-wide and route `log`
/// records into it.
///
/// Can succeed only once per process.
pub fn setup_logger(config: &LoggerConfig) -> Result<(), LogError> {
    build_subscriber(config)?
        .try_init()
        .map_err(|_| LogError::AlreadyInitialized)
}

fn open_appender(path: &Path) -> Result<RollingFileAppender, LogError> {
    let file_name = path.file_name().ok_or_else(|| LogError::InvalidPath {
        path: path.display().to_string(),
    })?;
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(file_name.to_string_lossy())
        .build(dir)
        .map_err(|source| LogError::OpenFile {
            path: path.display().to_string(),
            source,
        })
}

fn timer() -> ChronoLocal {
    ChronoLocal::new(TIMESTAMP_FORMAT.to_string())
}

fn tracing_level(level: LevelFilter) -> filter::LevelFilter {
    match level {
        LevelFilter::Off => filter::LevelFilter::OFF,
        LevelFilter::Error => filter::LevelFilter::ERROR,
        LevelFilter::Warn => filter::LevelFilter::WARN,
        LevelFilter::Info => filter::LevelFilter::INFO,
        LevelFilter::Debug => filter::LevelFilter::DEBUG,
        LevelFilter::Trace => filter::LevelFilter::TRACE,
    }
}

#[cfg(test)]
#[path = "logger_test.rs"]
mod tests;
