//! External representations of users

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use crate::domain::user::User;
use crate::domain::{
    ApiResource, DomainError, Entity, ResourceShape, Timestamped, TimestampedResource,
};

/// Full user representation
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResource {
    pub id: Uuid,
    pub email: String,
    pub roles: Vec<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl From<&User> for UserResource {
    fn from(user: &User) -> Self {
        Self {
            id: user.id(),
            email: user.email().to_string(),
            roles: user.roles().names(),
            created_at: Some(user.created_at()),
            updated_at: user.updated_at(),
            deleted_at: user.deleted_at(),
        }
    }
}

impl TimestampedResource for UserResource {
    fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }

    fn deleted_at(&self) -> Option<DateTime<Utc>> {
        self.deleted_at
    }
}

impl ApiResource for UserResource {
    fn shape(&self) -> ResourceShape {
        ResourceShape::User
    }

    fn as_timestamped(&self) -> Option<&dyn TimestampedResource> {
        Some(self)
    }

    fn to_json(&self) -> Result<Value, DomainError> {
        serde_json::to_value(self)
            .map_err(|e| DomainError::internal(format!("Failed to serialize user: {}", e)))
    }
}

/// Identifier and email only
#[derive(Debug, Clone, Serialize)]
pub struct UserSummary {
    pub id: Uuid,
    pub email: String,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id(),
            email: user.email().to_string(),
        }
    }
}

impl ApiResource for UserSummary {
    fn shape(&self) -> ResourceShape {
        ResourceShape::UserSummary
    }

    fn to_json(&self) -> Result<Value, DomainError> {
        serde_json::to_value(self)
            .map_err(|e| DomainError::internal(format!("Failed to serialize user summary: {}", e)))
    }
}

/// Maps user entities onto the user shapes
#[derive(Debug, Clone, Copy, Default)]
pub struct UserResourceMapper;

impl crate::domain::ResourceMapper for UserResourceMapper {
    fn map(
        &self,
        entity: &dyn Entity,
        target: ResourceShape,
    ) -> Result<Box<dyn ApiResource>, DomainError> {
        let user = entity
            .as_any()
            .downcast_ref::<User>()
            .ok_or_else(|| DomainError::type_mismatch(format!("Cannot map {:?} to {}", entity, target)))?;

        Ok(match target {
            ResourceShape::User => Box::new(UserResource::from(user)),
            ResourceShape::UserSummary => Box::new(UserSummary::from(user)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ResourceMapper, SoftDeletable};

    #[test]
    fn test_user_resource_json() {
        let mut user = User::new("jane@example.com");
        user.set_roles(["ROLE_ADMIN"]).unwrap();

        let json = UserResource::from(&user).to_json().unwrap();

        assert_eq!(json["id"], user.id().to_string());
        assert_eq!(json["email"], "jane@example.com");
        assert_eq!(json["roles"], serde_json::json!(["ROLE_ADMIN", "ROLE_USER"]));
        assert!(json["createdAt"].is_string());
        assert!(json["updatedAt"].is_null());
        assert!(json["deletedAt"].is_null());
    }

    #[test]
    fn test_mapper_shapes() {
        let mut user = User::new("jane@example.com");
        user.soft_delete();

        let resource = UserResourceMapper.map(&user, ResourceShape::User).unwrap();
        assert_eq!(resource.shape(), ResourceShape::User);
        let timestamps = resource.as_timestamped().unwrap();
        assert_eq!(timestamps.deleted_at(), user.deleted_at());

        let summary = UserResourceMapper
            .map(&user, ResourceShape::UserSummary)
            .unwrap();
        assert!(summary.as_timestamped().is_none());
        assert_eq!(
            summary.to_json().unwrap(),
            serde_json::json!({"id": user.id().to_string(), "email": "jane@example.com"})
        );
    }
}
