//! User infrastructure module
//!
//! In-memory and PostgreSQL repositories, the user service and the
//! persistence processor used by generic write pipelines.

mod persist;
mod postgres_repository;
mod repository;
mod service;

pub use persist::UserPersistProcessor;
pub use postgres_repository::PostgresUserRepository;
pub use repository::InMemoryUserRepository;
pub use service::{CreateUserRequest, UpdateUserRequest, UserService};
