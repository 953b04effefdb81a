//! Error types for ms-core

use thiserror::Error;

/// Core error type for migsync
#[derive(Error, Debug)]
pub enum ReconcileError {
    /// R001: Referenced path does not exist
    #[error("[R001] Path not found: {path}")]
    NotFound { path: String },

    /// R002: Migrations path exists but is not a directory
    #[error("[R002] Not a directory: {path}")]
    NotADirectory { path: String },

    /// R003: No entry in the migrations directory matches `<digit>...sql`
    #[error("[R003] No migration files found in {path} (expected names like 20240101_init.sql)")]
    EmptyResult { path: String },

    /// R004: Applied-migrations file is unreadable or not valid JSON
    #[error("[R004] Failed to load applied migrations from {path}: {reason}")]
    MalformedInput { path: String, reason: String },

    /// R005: Pending list could not be persisted
    #[error("[R005] Failed to write pending list to '{path}'")]
    WriteFailed {
        path: String,
        source: std::io::Error,
    },

    /// R006: Configuration file not found
    #[error("[R006] Config file not found: {path}")]
    ConfigNotFound { path: String },

    /// R007: Configuration file is not valid YAML for the expected shape
    #[error("[R007] Failed to parse config {path}: {message}")]
    ConfigParse { path: String, message: String },

    /// R008: Configuration value is out of range
    #[error("[R008] Invalid config: {message}")]
    ConfigInvalid { message: String },

    /// R009: Migrations directory exists but its entries cannot be read
    #[error("[R009] Failed to read migrations directory {path}")]
    ReadDirFailed {
        path: String,
        source: std::io::Error,
    },
}

/// Coarse classification of a [`ReconcileError`].
///
/// Every kind is a deterministic input problem; none of them is retryable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    NotADirectory,
    EmptyResult,
    MalformedInput,
    Unreadable,
    WriteFailed,
    Config,
}

impl ReconcileError {
    /// Return the taxonomy bucket this error belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ReconcileError::NotFound { .. } => ErrorKind::NotFound,
            ReconcileError::NotADirectory { .. } => ErrorKind::NotADirectory,
            ReconcileError::EmptyResult { .. } => ErrorKind::EmptyResult,
            ReconcileError::MalformedInput { .. } => ErrorKind::MalformedInput,
            ReconcileError::ReadDirFailed { .. } => ErrorKind::Unreadable,
            ReconcileError::WriteFailed { .. } => ErrorKind::WriteFailed,
            ReconcileError::ConfigNotFound { .. }
            | ReconcileError::ConfigParse { .. }
            | ReconcileError::ConfigInvalid { .. } => ErrorKind::Config,
        }
    }

    /// Stable error code, e.g. `"R003"`.
    pub fn code(&self) -> &'static str {
        match self {
            ReconcileError::NotFound { .. } => "R001",
            ReconcileError::NotADirectory { .. } => "R002",
            ReconcileError::EmptyResult { .. } => "R003",
            ReconcileError::MalformedInput { .. } => "R004",
            ReconcileError::WriteFailed { .. } => "R005",
            ReconcileError::ConfigNotFound { .. } => "R006",
            ReconcileError::ConfigParse { .. } => "R007",
            ReconcileError::ConfigInvalid { .. } => "R008",
            ReconcileError::ReadDirFailed { .. } => "R009",
        }
    }
}

/// Result type alias for ReconcileError
pub type ReconcileResult<T> = Result<T, ReconcileError>;
