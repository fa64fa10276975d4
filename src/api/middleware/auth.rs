//! Bearer token authentication and role checks

use axum::{
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::{debug, warn};

use crate::api::state::AppState;
use crate::api::types::ApiError;
use crate::domain::user::Role;
use crate::infrastructure::auth::{AuthenticatedUser, AuthenticationError};

/// Body of a 401 response
#[derive(Debug, Serialize)]
pub struct AuthenticationFailure {
    pub message: &'static str,
    pub error: String,
}

impl IntoResponse for AuthenticationError {
    fn into_response(self) -> Response {
        match self {
            AuthenticationError::Domain(err) => ApiError::from(err).into_response(),
            rejection => {
                warn!(reason = %rejection, "Authentication failed");

                let body = AuthenticationFailure {
                    message: "Authentication failed",
                    error: rejection.to_string(),
                };

                (StatusCode::UNAUTHORIZED, Json(body)).into_response()
            }
        }
    }
}

async fn authenticate(
    parts: &Parts,
    state: &AppState,
    required: Role,
) -> Result<AuthenticatedUser, Response> {
    if !state.authenticator.supports(&parts.headers) {
        return Err(AuthenticationError::MissingBearerToken.into_response());
    }

    let identity = state
        .authenticator
        .authenticate(&parts.headers)
        .await
        .map_err(IntoResponse::into_response)?;

    if !identity.has_role(required) {
        warn!(
            user_id = %identity.user().id(),
            required = %required,
            "Access denied"
        );
        return Err(ApiError::forbidden("Access Denied.").into_response());
    }

    debug!(user_id = %identity.user().id(), role = %required, "Access granted");

    Ok(identity)
}

/// Extractor that requires an authenticated user holding `ROLE_USER`
#[derive(Debug, Clone)]
pub struct RequireUser(pub AuthenticatedUser);

impl FromRequestParts<AppState> for RequireUser {
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        authenticate(parts, state, Role::User).await.map(RequireUser)
    }
}

/// Extractor that requires an authenticated user holding `ROLE_ADMIN`
#[derive(Debug, Clone)]
pub struct RequireAdmin(pub AuthenticatedUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        authenticate(parts, state, Role::Admin).await.map(RequireAdmin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DomainError;

    #[test]
    fn test_rejection_is_unauthorized() {
        let response = AuthenticationError::InactiveToken.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_domain_failure_is_a_problem() {
        let response = AuthenticationError::Domain(DomainError::storage("down")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_failure_body() {
        let body = AuthenticationFailure {
            message: "Authentication failed",
            error: AuthenticationError::MissingEmailClaim.to_string(),
        };

        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            serde_json::json!({
                "message": "Authentication failed",
                "error": "No email claim in token"
            })
        );
    }
}
