//! Application state shared by all handlers.
//!
//! Built once at startup from the validated configuration and handed to the
//! router behind an `Arc`. Nothing in it changes while the server runs.

use std::sync::Arc;

use crate::config::Config;
use crate::error::Result;
use crate::logging::log_store_stats;
use crate::store::{query_summary, ClimateStore};

/// The main application state shared across all handlers
#[derive(Debug, Clone)]
pub struct AppState {
    /// Configuration
    pub config: Config,
    /// Database handle
    pub store: ClimateStore,
}

impl AppState {
    /// Create a new AppState
    pub fn new(config: Config, store: ClimateStore) -> Self {
        Self { config, store }
    }

    /// Open the configured database and build the shared state.
    ///
    /// Fails when the database is missing or does not match the expected schema.
    pub fn initialize(config: Config) -> Result<Arc<Self>> {
        let store = ClimateStore::open(&config.database)?;

        let conn = store.connect()?;
        let summary = query_summary(&conn)?;
        drop(conn);
        log_store_stats(&store.path().display().to_string(), &summary);

        Ok(Arc::new(Self::new(config, store)))
    }
}
