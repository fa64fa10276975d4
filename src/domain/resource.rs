//! Entities, external resource representations, and the collaborators that
//! move between them during request processing

use std::any::Any;
use std::fmt::{self, Debug};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;

use super::timestamps::SoftDeletable;
use super::DomainError;

/// Output shapes an entity can be rendered as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceShape {
    /// Full user representation with timestamps
    User,
    /// Identifier and email only
    UserSummary,
}

impl fmt::Display for ResourceShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User => write!(f, "user"),
            Self::UserSummary => write!(f, "user_summary"),
        }
    }
}

/// Metadata of the operation being processed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operation {
    name: &'static str,
    output: Option<ResourceShape>,
}

impl Operation {
    pub fn new(name: &'static str) -> Self {
        Self { name, output: None }
    }

    pub fn with_output(mut self, shape: ResourceShape) -> Self {
        self.output = Some(shape);
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Declared output shape, if any
    pub fn output(&self) -> Option<ResourceShape> {
        self.output
    }
}

/// A persisted domain object handled by the generic processors
pub trait Entity: Any + Debug + Send + Sync {
    /// Shape used when an operation does not declare one
    fn default_shape(&self) -> ResourceShape;

    /// Soft-delete capability, when the entity has it
    fn as_soft_deletable(&mut self) -> Option<&mut dyn SoftDeletable> {
        None
    }

    fn as_any(&self) -> &dyn Any;

    fn into_any(self: Box<Self>) -> Box<dyn Any + Send>;
}

/// Read contract of resources that carry lifecycle timestamps
pub trait TimestampedResource {
    fn created_at(&self) -> Option<DateTime<Utc>>;

    fn updated_at(&self) -> Option<DateTime<Utc>>;

    fn deleted_at(&self) -> Option<DateTime<Utc>>;
}

/// Externally visible representation of an entity
pub trait ApiResource: Debug + Send + Sync {
    fn shape(&self) -> ResourceShape;

    fn as_timestamped(&self) -> Option<&dyn TimestampedResource> {
        None
    }

    fn to_json(&self) -> Result<Value, DomainError>;
}

/// Writes an entity to storage and hands back what was stored
#[async_trait]
pub trait PersistProcessor: Send + Sync {
    /// Returns `None` when nothing was persisted
    async fn process(
        &self,
        entity: Box<dyn Entity>,
        operation: &Operation,
    ) -> Result<Option<Box<dyn Entity>>, DomainError>;
}

/// Maps an entity onto a resource shape
pub trait ResourceMapper: Send + Sync {
    fn map(
        &self,
        entity: &dyn Entity,
        target: ResourceShape,
    ) -> Result<Box<dyn ApiResource>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_output() {
        let operation = Operation::new("delete_user");
        assert_eq!(operation.name(), "delete_user");
        assert!(operation.output().is_none());

        let operation = operation.with_output(ResourceShape::UserSummary);
        assert_eq!(operation.output(), Some(ResourceShape::UserSummary));
    }

    #[test]
    fn test_shape_display() {
        assert_eq!(ResourceShape::User.to_string(), "user");
        assert_eq!(ResourceShape::UserSummary.to_string(), "user_summary");
    }
}
