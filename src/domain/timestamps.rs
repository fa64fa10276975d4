//! Creation, update and soft-delete timestamps shared by entities

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Read access to an entity's lifecycle timestamps
pub trait Timestamped {
    fn created_at(&self) -> DateTime<Utc>;

    fn updated_at(&self) -> Option<DateTime<Utc>>;

    fn deleted_at(&self) -> Option<DateTime<Utc>>;

    fn is_deleted(&self) -> bool {
        self.deleted_at().is_some()
    }
}

/// Capability of entities that are never removed, only flagged as deleted
pub trait SoftDeletable: Timestamped {
    /// Mark as deleted. Repeating the call moves `deleted_at` forward; there
    /// is no way back.
    fn soft_delete(&mut self);
}

/// Timestamp block embedded in entities
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Timestamps {
    created_at: DateTime<Utc>,
    #[serde(default)]
    updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    deleted_at: Option<DateTime<Utc>>,
}

impl Timestamps {
    /// Timestamps for an entity created now
    pub fn new() -> Self {
        Self {
            created_at: Utc::now(),
            updated_at: None,
            deleted_at: None,
        }
    }

    /// Rebuild timestamps loaded from storage
    pub fn restore(
        created_at: DateTime<Utc>,
        updated_at: Option<DateTime<Utc>>,
        deleted_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            created_at,
            updated_at,
            deleted_at,
        }
    }

    /// Record a write
    pub fn touch(&mut self) {
        self.updated_at = Some(Utc::now());
    }
}

impl Default for Timestamps {
    fn default() -> Self {
        Self::new()
    }
}

impl Timestamped for Timestamps {
    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }

    fn deleted_at(&self) -> Option<DateTime<Utc>> {
        self.deleted_at
    }
}

impl SoftDeletable for Timestamps {
    fn soft_delete(&mut self) {
        self.deleted_at = Some(Utc::now());
    }
}
