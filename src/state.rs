use std::sync::Arc;

use crate::config::{AppConfig, StorageBackend};
use crate::database::DatabaseManager;
use crate::services::{ClothingRepository, InMemoryClothingRepository, PgClothingRepository};

/// Shared by every handler and the API key middleware
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub clothing: Arc<dyn ClothingRepository>,
}

impl AppState {
    pub fn new(config: AppConfig, clothing: Arc<dyn ClothingRepository>) -> Self {
        Self {
            config: Arc::new(config),
            clothing,
        }
    }

    /// State backed by an empty in-memory table
    pub fn in_memory(config: AppConfig) -> Self {
        Self::new(config, Arc::new(InMemoryClothingRepository::new()))
    }

    /// Build state for the configured storage backend.
    ///
    /// Returns the database manager alongside the state when PostgreSQL is used so
    /// the caller can close the pool on shutdown.
    pub async fn connect(config: AppConfig) -> (Self, Option<Arc<DatabaseManager>>) {
        match config.server.storage {
            StorageBackend::Memory => {
                tracing::info!("Using in-memory clothing storage");
                (Self::in_memory(config), None)
            }
            StorageBackend::Postgres => {
                let database = Arc::new(DatabaseManager::connect(&config.database).await);
                let repository = PgClothingRepository::new(database.clone());
                (Self::new(config, Arc::new(repository)), Some(database))
            }
        }
    }
}
