//! Application state for shared services

use std::sync::Arc;

use crate::infrastructure::auth::TokenIntrospectionAuthenticator;
use crate::infrastructure::processor::SoftDeleteProcessor;
use crate::infrastructure::user::UserService;

/// Services shared by every request
#[derive(Debug, Clone)]
pub struct AppState {
    pub user_service: Arc<UserService>,
    pub authenticator: Arc<TokenIntrospectionAuthenticator>,
    pub soft_delete_processor: Arc<SoftDeleteProcessor>,
}

impl AppState {
    pub fn new(
        user_service: Arc<UserService>,
        authenticator: Arc<TokenIntrospectionAuthenticator>,
        soft_delete_processor: Arc<SoftDeleteProcessor>,
    ) -> Self {
        Self {
            user_service,
            authenticator,
            soft_delete_processor,
        }
    }
}
