//! Application state management
//!
//! This module contains the shared application state that is passed
//! to all request handlers via Axum's State extractor.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::{config::Config, db::Store, error::AppResult, services::BadgeCatalog};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

/// Inner state (wrapped in Arc for cheap cloning)
struct AppStateInner {
    /// Storage backend
    store: Arc<dyn Store>,

    /// Parsed badge rules, swapped wholesale on reload
    catalog: RwLock<Arc<BadgeCatalog>>,

    /// Application configuration
    config: Config,
}

impl AppState {
    /// Create a new application state
    pub fn new(store: Arc<dyn Store>, catalog: BadgeCatalog, config: Config) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                store,
                catalog: RwLock::new(Arc::new(catalog)),
                config,
            }),
        }
    }

    /// Get a reference to the storage backend
    pub fn store(&self) -> &dyn Store {
        self.inner.store.as_ref()
    }

    /// Snapshot of the current badge catalog
    pub async fn catalog(&self) -> Arc<BadgeCatalog> {
        self.inner.catalog.read().await.clone()
    }

    /// Reload the badge catalog from storage
    pub async fn reload_catalog(&self) -> AppResult<()> {
        let catalog = BadgeCatalog::load(self.store()).await?;
        *self.inner.catalog.write().await = Arc::new(catalog);
        Ok(())
    }

    /// Get a reference to the configuration
    pub fn config(&self) -> &Config {
        &self.inner.config
    }
}
