//! Turns delete operations into soft deletes

use std::sync::Arc;

use tracing::debug;

use crate::domain::{
    ApiResource, DomainError, Entity, Operation, PersistProcessor, ResourceMapper,
};

/// Marks entities as deleted, persists them through the wrapped processor and
/// returns their external representation
pub struct SoftDeleteProcessor {
    persist: Arc<dyn PersistProcessor>,
    mapper: Arc<dyn ResourceMapper>,
}

impl std::fmt::Debug for SoftDeleteProcessor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SoftDeleteProcessor").finish_non_exhaustive()
    }
}

impl SoftDeleteProcessor {
    pub fn new(persist: Arc<dyn PersistProcessor>, mapper: Arc<dyn ResourceMapper>) -> Self {
        Self { persist, mapper }
    }

    pub async fn process(
        &self,
        mut entity: Box<dyn Entity>,
        operation: &Operation,
    ) -> Result<Box<dyn ApiResource>, DomainError> {
        let Some(deletable) = entity.as_soft_deletable() else {
            return Err(DomainError::type_mismatch(format!(
                "Operation '{}' expects a soft-deletable entity",
                operation.name()
            )));
        };
        deletable.soft_delete();

        debug!(operation = operation.name(), "Entity marked as deleted");

        let persisted = self
            .persist
            .process(entity, operation)
            .await?
            .ok_or_else(|| {
                DomainError::type_mismatch(format!(
                    "Operation '{}' did not return the persisted entity",
                    operation.name()
                ))
            })?;

        let shape = operation
            .output()
            .unwrap_or_else(|| persisted.default_shape());

        debug!(operation = operation.name(), shape = %shape, "Mapping deleted entity");

        let resource = self.mapper.map(persisted.as_ref(), shape)?;

        if resource.as_timestamped().is_none() {
            return Err(DomainError::type_mismatch(format!(
                "Resource shape '{}' does not expose timestamps",
                shape
            )));
        }

        Ok(resource)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::any::Any;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use chrono::{DateTime, Utc};
    use serde_json::{json, Value};

    use crate::domain::user::User;
    use crate::domain::{ResourceShape, Timestamped, TimestampedResource};

    /// Hands back what it receives, or nothing, and counts calls
    #[derive(Default)]
    struct CountingPersist {
        calls: AtomicUsize,
        return_nothing: bool,
    }

    impl CountingPersist {
        fn returning_nothing() -> Self {
            Self {
                calls: AtomicUsize::new(0),
                return_nothing: true,
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl PersistProcessor for CountingPersist {
        async fn process(
            &self,
            entity: Box<dyn Entity>,
            _operation: &Operation,
        ) -> Result<Option<Box<dyn Entity>>, DomainError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok((!self.return_nothing).then_some(entity))
        }
    }

    #[derive(Debug)]
    struct TestResource {
        shape: ResourceShape,
        deleted_at: Option<DateTime<Utc>>,
    }

    impl TimestampedResource for TestResource {
        fn created_at(&self) -> Option<DateTime<Utc>> {
            None
        }

        fn updated_at(&self) -> Option<DateTime<Utc>> {
            None
        }

        fn deleted_at(&self) -> Option<DateTime<Utc>> {
            self.deleted_at
        }
    }

    impl ApiResource for TestResource {
        fn shape(&self) -> ResourceShape {
            self.shape
        }

        fn as_timestamped(&self) -> Option<&dyn TimestampedResource> {
            match self.shape {
                ResourceShape::User => Some(self),
                ResourceShape::UserSummary => None,
            }
        }

        fn to_json(&self) -> Result<Value, DomainError> {
            Ok(json!({"shape": self.shape.to_string()}))
        }
    }

    struct TestMapper;

    impl ResourceMapper for TestMapper {
        fn map(
            &self,
            entity: &dyn Entity,
            target: ResourceShape,
        ) -> Result<Box<dyn ApiResource>, DomainError> {
            let user = entity
                .as_any()
                .downcast_ref::<User>()
                .ok_or_else(|| DomainError::type_mismatch("not a user"))?;

            Ok(Box::new(TestResource {
                shape: target,
                deleted_at: user.deleted_at(),
            }))
        }
    }

    #[derive(Debug)]
    struct Tag;

    impl Entity for Tag {
        fn default_shape(&self) -> ResourceShape {
            ResourceShape::UserSummary
        }

        fn as_any(&self) -> &dyn Any {
            self
        }

        fn into_any(self: Box<Self>) -> Box<dyn Any + Send> {
            self
        }
    }

    fn processor(persist: Arc<CountingPersist>) -> SoftDeleteProcessor {
        SoftDeleteProcessor::new(persist, Arc::new(TestMapper))
    }

    #[tokio::test]
    async fn test_soft_deletes_and_maps() {
        let persist = Arc::new(CountingPersist::default());
        let operation = Operation::new("delete_user").with_output(ResourceShape::User);

        let resource = processor(persist.clone())
            .process(Box::new(User::new("jane@example.com")), &operation)
            .await
            .unwrap();

        assert_eq!(persist.calls(), 1);
        assert_eq!(resource.shape(), ResourceShape::User);
        assert!(resource.as_timestamped().unwrap().deleted_at().is_some());
    }

    #[tokio::test]
    async fn test_falls_back_to_entity_shape() {
        let persist = Arc::new(CountingPersist::default());

        let resource = processor(persist)
            .process(Box::new(User::new("jane@example.com")), &Operation::new("delete_user"))
            .await
            .unwrap();

        assert_eq!(resource.shape(), ResourceShape::User);
    }

    #[tokio::test]
    async fn test_rejects_entities_without_soft_delete() {
        let persist = Arc::new(CountingPersist::default());

        let result = processor(persist.clone())
            .process(Box::new(Tag), &Operation::new("delete_tag"))
            .await;

        assert!(matches!(result, Err(DomainError::TypeMismatch { .. })));
        assert_eq!(persist.calls(), 0);
    }

    #[tokio::test]
    async fn test_rejects_missing_persist_result() {
        let persist = Arc::new(CountingPersist::returning_nothing());

        let result = processor(persist.clone())
            .process(Box::new(User::new("jane@example.com")), &Operation::new("delete_user"))
            .await;

        assert!(matches!(result, Err(DomainError::TypeMismatch { .. })));
        assert_eq!(persist.calls(), 1);
    }

    #[tokio::test]
    async fn test_rejects_untimestamped_resource() {
        let persist = Arc::new(CountingPersist::default());
        let operation = Operation::new("delete_user").with_output(ResourceShape::UserSummary);

        let result = processor(persist.clone())
            .process(Box::new(User::new("jane@example.com")), &operation)
            .await;

        assert!(matches!(result, Err(DomainError::TypeMismatch { .. })));
        assert_eq!(persist.calls(), 1);
    }
}
