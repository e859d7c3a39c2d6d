//! Infrastructure layer.
//!
//! - `store` - the `TaskStore` contract and its error type
//! - `sqlite` - relational backend on an `sqlx` pool
//! - `in_memory` - process-local backend for development and tests
//! - `config` - application settings from the environment
//! - `factory` - builds the configured store

mod config;
mod factory;
mod in_memory;
mod sqlite;
mod store;

pub use config::{AppConfig, ConfigError, StorageMode};
pub use factory::{FactoryError, StoreFactory};
pub use in_memory::InMemoryTaskStore;
pub use sqlite::SqliteTaskStore;
pub use store::{StoreError, TaskStore};
