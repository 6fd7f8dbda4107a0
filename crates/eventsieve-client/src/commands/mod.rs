//! Subcommand implementations.
//!
//! Each command writes to a caller-supplied writer so tests can capture
//! what a user would see.

pub mod config;
pub mod filters;
pub mod show;

use eventsieve_store::{ExclusionStore, StoreBackend, StoreError, StoreResult, open_store};

use crate::config::ClientConfig;

/// Opens the store named by the `[store]` section, creating its directory.
pub fn open_configured_store(config: &ClientConfig) -> StoreResult<Box<dyn ExclusionStore>> {
    let backend = config.store.backend;
    let path = config.store.resolved_path();
    if backend != StoreBackend::Memory {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| StoreError::unavailable(backend.as_str(), e))?;
        }
    }
    open_store(backend, &path)
}
