//! API middleware components

pub mod auth;
pub mod problem;
pub mod security;

pub use auth::{RequireAdmin, RequireUser};
pub use problem::{method_not_allowed, problem_instance_middleware, route_not_found};
pub use security::security_headers_middleware;
