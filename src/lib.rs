//! Users API
//!
//! User directory service with:
//! - CRUD endpoints under `/api/users` with soft deletion
//! - Bearer authentication through OAuth2 token introspection
//! - In-memory or PostgreSQL storage

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use tracing::info;

use api::resources::UserResourceMapper;
use api::state::AppState;
use infrastructure::auth::{HttpIntrospectionClient, TokenIntrospectionAuthenticator};
use infrastructure::processor::SoftDeleteProcessor;
use infrastructure::storage::StorageFactory;
use infrastructure::user::{UserPersistProcessor, UserService};

/// Wire the services behind the HTTP API
pub async fn build_app_state(config: &AppConfig) -> anyhow::Result<AppState> {
    let repository = StorageFactory::create_user_repository(&config.storage).await?;

    let client = HttpIntrospectionClient::new(&config.keycloak)?;
    info!(
        introspection_url = %config.keycloak.introspection_url,
        client_id = %config.keycloak.client_id,
        "Token introspection configured"
    );

    let authenticator = TokenIntrospectionAuthenticator::new(Arc::new(client), repository.clone());
    let soft_delete_processor = SoftDeleteProcessor::new(
        Arc::new(UserPersistProcessor::new(repository.clone())),
        Arc::new(UserResourceMapper),
    );

    Ok(AppState::new(
        Arc::new(UserService::new(repository)),
        Arc::new(authenticator),
        Arc::new(soft_delete_processor),
    ))
}
