//! User service for user management

use std::sync::Arc;

use tracing::debug;
use uuid::Uuid;

use crate::domain::user::{RoleSet, User, UserFilter, UserRepository};
use crate::domain::DomainError;

/// Request for creating a new user
#[derive(Debug, Clone)]
pub struct CreateUserRequest {
    pub email: String,
    /// Baseline role only when absent
    pub roles: Option<Vec<String>>,
}

/// Partial update; absent fields are left unchanged
#[derive(Debug, Clone, Default)]
pub struct UpdateUserRequest {
    pub email: Option<String>,
    pub roles: Option<Vec<String>>,
}

/// User management on top of a repository
#[derive(Clone)]
pub struct UserService {
    repository: Arc<dyn UserRepository>,
}

impl std::fmt::Debug for UserService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserService").finish_non_exhaustive()
    }
}

impl UserService {
    /// Create a new user service
    pub fn new(repository: Arc<dyn UserRepository>) -> Self {
        Self { repository }
    }

    /// Create a new user
    pub async fn create(&self, request: CreateUserRequest) -> Result<User, DomainError> {
        let roles = request.roles.map(RoleSet::normalize).transpose()?;

        if self.repository.find_by_email(&request.email).await?.is_some() {
            return Err(DomainError::conflict(format!(
                "Email '{}' already exists",
                request.email
            )));
        }

        let mut user = User::new(request.email);
        if let Some(roles) = roles {
            user.assign_roles(roles);
        }

        debug!(user_id = %user.id(), email = %user.email(), "Creating user");

        self.repository.create(user).await
    }

    /// Get a user by ID; malformed IDs are reported as missing
    pub async fn get(&self, id: &str) -> Result<Option<User>, DomainError> {
        match Uuid::parse_str(id) {
            Ok(id) => self.repository.get(&id).await,
            Err(_) => Ok(None),
        }
    }

    /// Get a user by ID, failing when it does not exist
    pub async fn require(&self, id: &str) -> Result<User, DomainError> {
        self.get(id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("User '{}' not found", id)))
    }

    /// List users matching the filter
    pub async fn list(&self, filter: &UserFilter) -> Result<Vec<User>, DomainError> {
        self.repository.list(filter).await
    }

    /// Count users matching the filter
    pub async fn count(&self, filter: &UserFilter) -> Result<usize, DomainError> {
        self.repository.count(filter).await
    }

    /// Apply a partial update
    pub async fn update(&self, id: &str, request: UpdateUserRequest) -> Result<User, DomainError> {
        let mut user = self.require(id).await?;

        if let Some(roles) = request.roles {
            user.set_roles(roles)?;
        }

        if let Some(email) = request.email {
            user.set_email(email);
        }

        debug!(user_id = %user.id(), "Updating user");

        self.repository.update(user).await
    }
}
