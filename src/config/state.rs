// Application state module
// Owns the injected product store and cached config flags

use std::sync::atomic::AtomicBool;
use tokio::sync::RwLock;

use super::types::Config;
use crate::store::ProductStore;

/// Application state shared across connections
///
/// The product store is owned here and handed to the router at
/// construction, so tests can build isolated instances instead of
/// relying on process-wide shared state.
pub struct AppState {
    pub store: RwLock<ProductStore>,
    // Cached config value for fast access without locks
    pub cached_access_log: AtomicBool,
}

impl AppState {
    /// Create state around the seeded sample collection
    pub fn new(config: &Config) -> Self {
        Self::with_store(config, ProductStore::seeded())
    }

    /// Create state around an explicit store
    pub fn with_store(config: &Config, store: ProductStore) -> Self {
        Self {
            store: RwLock::new(store),
            cached_access_log: AtomicBool::new(config.logging.access_log),
        }
    }
}
