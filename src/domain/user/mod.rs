//! User domain
//!
//! User entity, role normalization, listing filters and the repository trait.

mod entity;
mod filter;
mod repository;
mod role;

pub use entity::User;
pub use filter::UserFilter;
pub use repository::UserRepository;
pub use role::{Role, RoleError, RoleSet};

#[cfg(test)]
pub use repository::MockUserRepository;
