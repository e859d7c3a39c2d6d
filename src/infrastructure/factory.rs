//! Store factory for runtime backend selection.
//!
//! Builds the `TaskStore` named by [`AppConfig::storage_mode`] and prepares
//! its schema, so callers receive a store that is ready to serve requests.
//!
//! # Example
//!
//! ```ignore
//! let config = AppConfig::from_env()?;
//! let store = StoreFactory::new(config).create().await?;
//! let service = TaskService::new(store);
//! ```

use std::sync::Arc;

use thiserror::Error;

use super::{AppConfig, InMemoryTaskStore, SqliteTaskStore, StorageMode, StoreError, TaskStore};

/// Errors that can occur during store initialization.
#[derive(Debug, Error)]
pub enum FactoryError {
    /// Database connection error.
    #[error("Database connection error: {0}")]
    Connection(StoreError),

    /// Schema creation failed.
    #[error("Schema initialization error: {0}")]
    Initialization(StoreError),
}

/// Creates the configured task store.
#[derive(Debug, Clone)]
pub struct StoreFactory {
    config: AppConfig,
}

impl StoreFactory {
    #[must_use]
    pub const fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Connects (when needed) and initializes the store.
    ///
    /// # Errors
    ///
    /// Returns `FactoryError::Connection` if the database cannot be opened and
    /// `FactoryError::Initialization` if the schema cannot be created.
    pub async fn create(&self) -> Result<Arc<dyn TaskStore>, FactoryError> {
        let store: Arc<dyn TaskStore> = match self.config.storage_mode {
            StorageMode::InMemory => {
                tracing::info!("Using in-memory task store");
                Arc::new(InMemoryTaskStore::new())
            }
            StorageMode::Sqlite => {
                tracing::info!(database_url = %self.config.database_url, "Using SQLite task store");
                let store = SqliteTaskStore::connect(
                    &self.config.database_url,
                    self.config.database_max_connections,
                )
                .await
                .map_err(FactoryError::Connection)?;
                Arc::new(store)
            }
        };

        store
            .initialize()
            .await
            .map_err(FactoryError::Initialization)?;

        Ok(store)
    }
}
