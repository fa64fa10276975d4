//! Storage factory for runtime backend selection

use std::sync::Arc;

use tracing::info;

use crate::config::{StorageBackend, StorageConfig};
use crate::domain::user::UserRepository;
use crate::domain::DomainError;
use crate::infrastructure::user::{InMemoryUserRepository, PostgresUserRepository};

use super::migrations::run_user_migrations;
use super::pool::connect;

/// Factory for user repositories
#[derive(Debug)]
pub struct StorageFactory;

impl StorageFactory {
    /// Build the repository selected by `storage.backend`.
    ///
    /// PostgreSQL schemas are migrated before the repository is handed out.
    pub async fn create_user_repository(
        config: &StorageConfig,
    ) -> Result<Arc<dyn UserRepository>, DomainError> {
        match config.backend {
            StorageBackend::Memory => {
                info!("Using in-memory user storage");
                Ok(Arc::new(InMemoryUserRepository::new()))
            }
            StorageBackend::Postgres => {
                let pool = connect(config).await?;
                let applied = run_user_migrations(&pool).await?;
                info!(applied, "Using PostgreSQL user storage");
                Ok(Arc::new(PostgresUserRepository::new(pool)))
            }
        }
    }
}
