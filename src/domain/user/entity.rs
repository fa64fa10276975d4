//! User entity

use std::any::Any;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::role::{Role, RoleError, RoleSet};
use crate::domain::resource::{Entity, ResourceShape};
use crate::domain::timestamps::{SoftDeletable, Timestamped, Timestamps};

/// A user known to the API, identified by email
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Generated at construction, never changes
    id: Uuid,
    /// Login identifier, unique across users
    email: String,
    roles: RoleSet,
    #[serde(flatten)]
    timestamps: Timestamps,
}

impl User {
    /// Create a new user holding only the baseline role
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            email: email.into(),
            roles: RoleSet::default(),
            timestamps: Timestamps::new(),
        }
    }

    /// Rebuild a user loaded from storage
    pub fn restore(id: Uuid, email: impl Into<String>, roles: RoleSet, timestamps: Timestamps) -> Self {
        Self {
            id,
            email: email.into(),
            roles,
            timestamps,
        }
    }

    // Getters

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn roles(&self) -> &RoleSet {
        &self.roles
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(role)
    }

    pub fn timestamps(&self) -> &Timestamps {
        &self.timestamps
    }

    // Mutators

    pub fn set_email(&mut self, email: impl Into<String>) {
        self.email = email.into();
    }

    /// Replace the roles with the normalized form of `roles`.
    ///
    /// On error the current roles are left untouched.
    pub fn set_roles<I, S>(&mut self, roles: I) -> Result<(), RoleError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.roles = RoleSet::normalize(roles)?;
        Ok(())
    }

    pub fn assign_roles(&mut self, roles: RoleSet) {
        self.roles = roles;
    }

    /// Record a storage write. Called by repositories when updating.
    pub fn touch(&mut self) {
        self.timestamps.touch();
    }
}

impl Timestamped for User {
    fn created_at(&self) -> DateTime<Utc> {
        self.timestamps.created_at()
    }

    fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.timestamps.updated_at()
    }

    fn deleted_at(&self) -> Option<DateTime<Utc>> {
        self.timestamps.deleted_at()
    }
}

impl SoftDeletable for User {
    fn soft_delete(&mut self) {
        self.timestamps.soft_delete();
    }
}

impl Entity for User {
    fn default_shape(&self) -> ResourceShape {
        ResourceShape::User
    }

    fn as_soft_deletable(&mut self) -> Option<&mut dyn SoftDeletable> {
        Some(self)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any + Send> {
        self
    }
}
