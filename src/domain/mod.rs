//! Domain layer - Core business logic and entities

pub mod error;
pub mod resource;
pub mod timestamps;
pub mod user;

pub use error::DomainError;
pub use resource::{
    ApiResource, Entity, Operation, PersistProcessor, ResourceMapper, ResourceShape,
    TimestampedResource,
};
pub use timestamps::{SoftDeletable, Timestamped, Timestamps};
pub use user::{Role, RoleError, RoleSet, User, UserFilter, UserRepository};
