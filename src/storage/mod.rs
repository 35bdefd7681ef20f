//! Storage implementations for different backends

pub mod in_memory;
#[cfg(feature = "sqlite")]
pub mod sqlite;

pub use in_memory::InMemoryStore;
#[cfg(feature = "sqlite")]
pub use sqlite::SqliteStore;

use crate::config::StorageConfig;
use crate::core::Services;
use anyhow::Result;

/// Open the configured backend and hand out table handles
pub async fn connect(config: &StorageConfig) -> Result<Services> {
    match config {
        StorageConfig::Memory => {
            tracing::info!("Using in-memory storage");
            Ok(Services::from_store(InMemoryStore::new()))
        }
        #[cfg(feature = "sqlite")]
        StorageConfig::Sqlite { url } => {
            let store = SqliteStore::connect(url).await?;
            Ok(Services::from_store(store))
        }
        #[cfg(not(feature = "sqlite"))]
        StorageConfig::Sqlite { .. } => {
            anyhow::bail!("SQLite storage requested but the `sqlite` feature is not enabled")
        }
    }
}
