//! ms-core - Core library for migsync
//!
//! Reconciles a directory of versioned SQL migration files against a loosely
//! structured report of migrations already applied to a remote database, and
//! produces the ordered list of migrations that are still pending.

pub mod config;
pub mod error;
pub mod local;
pub mod reconcile;
pub mod report;
pub mod stem;

pub use config::{LogSettings, ReconcileConfig};
pub use error::{ErrorKind, ReconcileError, ReconcileResult};
pub use local::{is_migration_filename, list_local_migrations};
pub use reconcile::{reconcile, reconcile_report, write_pending, ReconcileSummary};
pub use report::{find_applied_stems, load_json, RECOGNIZED_ID_KEYS};
pub use stem::normalize_stem;
