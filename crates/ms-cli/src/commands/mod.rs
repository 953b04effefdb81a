//! CLI command implementations

pub(crate) mod reconcile;
