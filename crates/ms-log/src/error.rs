//! Error types for ms-log

use thiserror::Error;

/// Logger setup errors
#[derive(Error, Debug)]
pub enum LogError {
    /// L001: A global subscriber is already installed for this process
    #[error("[L001] A logger is already installed")]
    AlreadyInitialized,

    /// L002: The log file or its parent directory could not be created
    #[error("[L002] Failed to open log file '{path}'")]
    OpenFile {
        path: String,
        source: tracing_appender::rolling::InitError,
    },

    /// L003: The log file path has no file name component
    #[error("[L003] Log file path has no file name: '{path}'")]
    InvalidPath { path: String },
}
