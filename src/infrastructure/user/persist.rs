//! Persistence processor writing users through the repository

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::user::{User, UserRepository};
use crate::domain::{DomainError, Entity, Operation, PersistProcessor};

/// Writes existing users back to their repository
#[derive(Clone)]
pub struct UserPersistProcessor {
    repository: Arc<dyn UserRepository>,
}

impl std::fmt::Debug for UserPersistProcessor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserPersistProcessor").finish_non_exhaustive()
    }
}

impl UserPersistProcessor {
    pub fn new(repository: Arc<dyn UserRepository>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl PersistProcessor for UserPersistProcessor {
    async fn process(
        &self,
        entity: Box<dyn Entity>,
        operation: &Operation,
    ) -> Result<Option<Box<dyn Entity>>, DomainError> {
        let user = entity.into_any().downcast::<User>().map_err(|_| {
            DomainError::type_mismatch(format!(
                "Operation '{}' can only persist users",
                operation.name()
            ))
        })?;

        debug!(user_id = %user.id(), operation = operation.name(), "Persisting user");

        let stored = self.repository.update(*user).await?;

        Ok(Some(Box::new(stored)))
    }
}
