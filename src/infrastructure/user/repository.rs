//! In-memory user repository implementation

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::user::{User, UserFilter, UserRepository};
use crate::domain::{DomainError, Timestamped};

/// In-memory implementation of UserRepository
#[derive(Debug)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<Uuid, User>>>,
    /// Index for email -> user ID lookup
    email_index: Arc<RwLock<HashMap<String, Uuid>>>,
}

impl InMemoryUserRepository {
    /// Create a new empty repository
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
            email_index: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Create a repository with initial users
    pub fn with_users(users: Vec<User>) -> Self {
        let mut users_map = HashMap::new();
        let mut email_map = HashMap::new();

        for user in users {
            email_map.insert(user.email().to_string(), user.id());
            users_map.insert(user.id(), user);
        }

        Self {
            users: Arc::new(RwLock::new(users_map)),
            email_index: Arc::new(RwLock::new(email_map)),
        }
    }

    /// Matching users, oldest first
    async fn matching(&self, filter: &UserFilter) -> Vec<User> {
        let users = self.users.read().await;

        let mut result: Vec<User> = users
            .values()
            .filter(|user| filter.matches(user))
            .cloned()
            .collect();

        result.sort_by(|a, b| {
            a.created_at()
                .cmp(&b.created_at())
                .then_with(|| a.id().cmp(&b.id()))
        });

        result
    }
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn get(&self, id: &Uuid) -> Result<Option<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users.get(id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let users = self.users.read().await;
        let email_index = self.email_index.read().await;

        Ok(email_index.get(email).and_then(|id| users.get(id)).cloned())
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        let mut users = self.users.write().await;
        let mut email_index = self.email_index.write().await;

        if users.contains_key(&user.id()) {
            return Err(DomainError::conflict(format!(
                "User with ID '{}' already exists",
                user.id()
            )));
        }

        if email_index.contains_key(user.email()) {
            return Err(DomainError::conflict(format!(
                "Email '{}' already exists",
                user.email()
            )));
        }

        email_index.insert(user.email().to_string(), user.id());
        users.insert(user.id(), user.clone());

        Ok(user)
    }

    async fn update(&self, mut user: User) -> Result<User, DomainError> {
        let mut users = self.users.write().await;
        let mut email_index = self.email_index.write().await;

        let Some(existing) = users.get(&user.id()) else {
            return Err(DomainError::not_found(format!(
                "User '{}' not found",
                user.id()
            )));
        };

        let old_email = existing.email().to_string();

        // If email changed, check uniqueness and update index
        if old_email != user.email() {
            if email_index.contains_key(user.email()) {
                return Err(DomainError::conflict(format!(
                    "Email '{}' already exists",
                    user.email()
                )));
            }

            email_index.remove(&old_email);
            email_index.insert(user.email().to_string(), user.id());
        }

        user.touch();
        users.insert(user.id(), user.clone());

        Ok(user)
    }

    async fn list(&self, filter: &UserFilter) -> Result<Vec<User>, DomainError> {
        let offset = usize::try_from(filter.offset()).unwrap_or(usize::MAX);

        Ok(self
            .matching(filter)
            .await
            .into_iter()
            .skip(offset)
            .take(filter.per_page() as usize)
            .collect())
    }

    async fn count(&self, filter: &UserFilter) -> Result<usize, DomainError> {
        Ok(self.matching(filter).await.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Role, SoftDeletable};

    fn create_test_user(email: &str) -> User {
        User::new(email)
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let repo = InMemoryUserRepository::new();
        let user = create_test_user("jane@example.com");

        repo.create(user.clone()).await.unwrap();

        let retrieved = repo.get(&user.id()).await.unwrap();
        assert_eq!(retrieved, Some(user));
    }

    #[tokio::test]
    async fn test_find_by_email() {
        let repo = InMemoryUserRepository::new();
        let user = create_test_user("jane@example.com");

        repo.create(user.clone()).await.unwrap();

        let retrieved = repo.find_by_email("jane@example.com").await.unwrap();
        assert_eq!(retrieved.map(|u| u.id()), Some(user.id()));

        let not_found = repo.find_by_email("nobody@example.com").await.unwrap();
        assert!(not_found.is_none());
    }

    #[tokio::test]
    async fn test_duplicate_email() {
        let repo = InMemoryUserRepository::new();

        repo.create(create_test_user("same@example.com")).await.unwrap();

        let result = repo.create(create_test_user("same@example.com")).await;
        assert!(matches!(result, Err(DomainError::Conflict { .. })));
    }

    #[tokio::test]
    async fn test_update_touches_and_reindexes() {
        let repo = InMemoryUserRepository::new();
        let mut user = create_test_user("old@example.com");

        repo.create(user.clone()).await.unwrap();
        assert!(user.updated_at().is_none());

        user.set_email("new@example.com");
        let updated = repo.update(user.clone()).await.unwrap();

        assert!(updated.updated_at().is_some());
        assert!(repo.find_by_email("old@example.com").await.unwrap().is_none());
        assert!(repo.find_by_email("new@example.com").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_update_email_conflict() {
        let repo = InMemoryUserRepository::new();
        let first = create_test_user("first@example.com");
        let mut second = create_test_user("second@example.com");

        repo.create(first).await.unwrap();
        repo.create(second.clone()).await.unwrap();

        second.set_email("first@example.com");

        let result = repo.update(second).await;
        assert!(matches!(result, Err(DomainError::Conflict { .. })));
    }

    #[tokio::test]
    async fn test_update_missing_user() {
        let repo = InMemoryUserRepository::new();

        let result = repo.update(create_test_user("ghost@example.com")).await;
        assert!(matches!(result, Err(DomainError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_soft_deleted_user_stays_listed() {
        let repo = InMemoryUserRepository::new();
        let mut user = create_test_user("gone@example.com");
        repo.create(user.clone()).await.unwrap();

        user.soft_delete();
        repo.update(user.clone()).await.unwrap();

        let stored = repo.get(&user.id()).await.unwrap().unwrap();
        assert!(stored.is_deleted());
        assert_eq!(repo.count(&UserFilter::new()).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_list_filters_and_paginates() {
        let mut admin = create_test_user("admin@example.com");
        admin.set_roles(["ROLE_ADMIN"]).unwrap();

        let mut users = vec![admin];
        for i in 0..4 {
            users.push(create_test_user(&format!("user{}@example.com", i)));
        }
        let repo = InMemoryUserRepository::with_users(users);

        assert_eq!(repo.count(&UserFilter::new()).await.unwrap(), 5);

        let admins = UserFilter::new().with_role(Role::Admin);
        assert_eq!(repo.count(&admins).await.unwrap(), 1);

        let by_email = UserFilter::new().with_email("USER");
        assert_eq!(repo.count(&by_email).await.unwrap(), 4);

        let page = UserFilter::new().paginate(Some(2), Some(2));
        let listed = repo.list(&page).await.unwrap();
        assert_eq!(listed.len(), 2);

        let last = UserFilter::new().paginate(Some(3), Some(2));
        assert_eq!(repo.list(&last).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_list_is_ordered_by_creation() {
        let repo = InMemoryUserRepository::new();
        for i in 0..3 {
            repo.create(create_test_user(&format!("u{}@example.com", i)))
                .await
                .unwrap();
        }

        let listed = repo.list(&UserFilter::new()).await.unwrap();
        for pair in listed.windows(2) {
            assert!(pair[0].created_at() <= pair[1].created_at());
        }
    }
}
