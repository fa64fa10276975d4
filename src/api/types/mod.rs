//! Request, response and error bodies of the HTTP API

pub mod error;
pub mod json;
pub mod user;

pub use error::{ApiError, ProblemDetails, PROBLEM_CONTENT_TYPE};
pub use json::Json;
pub use user::{UserInput, UserListQuery, UserListResponse};
