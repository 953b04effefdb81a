//! ms-log - logging backend for migsync
//!
//! Library code logs through the `log` facade; this crate installs a
//! `tracing_subscriber` registry that receives those records and writes them
//! to stderr and, optionally, a plain log file.

pub mod error;
pub mod logger;

pub use error::LogError;
pub use logger::{build_subscriber, setup_logger, use_color, FileTarget, LoggerConfig};
