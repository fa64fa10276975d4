//! User repository trait

use async_trait::async_trait;
use uuid::Uuid;

use super::entity::User;
use super::filter::UserFilter;
use crate::domain::DomainError;

#[cfg(test)]
use mockall::automock;

/// Repository for user persistence
///
/// Email uniqueness is enforced here: `create` and `update` fail with
/// `DomainError::Conflict` when another user already holds the email.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Get a user by ID
    async fn get(&self, id: &Uuid) -> Result<Option<User>, DomainError>;

    /// Get a user by email
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// Store a new user
    async fn create(&self, user: User) -> Result<User, DomainError>;

    /// Write an existing user, refreshing its update timestamp
    async fn update(&self, user: User) -> Result<User, DomainError>;

    /// List users matching the filter, oldest first, one page at a time
    async fn list(&self, filter: &UserFilter) -> Result<Vec<User>, DomainError>;

    /// Count users matching the filter, ignoring pagination
    async fn count(&self, filter: &UserFilter) -> Result<usize, DomainError>;
}
