//! PostgreSQL connection pooling

use std::time::Duration;

use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::info;

use crate::config::StorageConfig;
use crate::domain::DomainError;

const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(30);

/// Open a pool against `storage.database_url`
pub async fn connect(config: &StorageConfig) -> Result<PgPool, DomainError> {
    let url = config.database_url.as_deref().ok_or_else(|| {
        DomainError::configuration("storage.database_url is required for the postgres backend")
    })?;

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(ACQUIRE_TIMEOUT)
        .connect(url)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to connect to PostgreSQL: {}", e)))?;

    info!(max_connections = config.max_connections, "Connected to PostgreSQL");

    Ok(pool)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_database_url() {
        let config = StorageConfig::default();

        let result = connect(&config).await;

        assert!(matches!(result, Err(DomainError::Configuration { .. })));
    }
}
