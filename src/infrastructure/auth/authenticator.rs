//! Bearer token authentication backed by token introspection

use std::sync::Arc;

use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;
use tracing::{debug, info, warn};

use super::claims::{is_truthy, realm_roles, resolve_email};
use super::error::AuthenticationError;
use super::introspection::IntrospectionClient;
use crate::domain::user::{Role, RoleSet, User, UserRepository};
use crate::domain::DomainError;

/// The local user behind an accepted token
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    user: User,
}

impl AuthenticatedUser {
    pub fn new(user: User) -> Self {
        Self { user }
    }

    pub fn user(&self) -> &User {
        &self.user
    }

    /// Email the identity is known by
    pub fn identifier(&self) -> &str {
        self.user.email()
    }

    pub fn roles(&self) -> &RoleSet {
        self.user.roles()
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.user.has_role(role)
    }
}

/// Accepts bearer tokens the identity provider reports as active and mirrors
/// the token's holder into the local user store
pub struct TokenIntrospectionAuthenticator {
    client: Arc<dyn IntrospectionClient>,
    users: Arc<dyn UserRepository>,
}

impl std::fmt::Debug for TokenIntrospectionAuthenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenIntrospectionAuthenticator")
            .field("client", &self.client)
            .finish_non_exhaustive()
    }
}

impl TokenIntrospectionAuthenticator {
    pub fn new(client: Arc<dyn IntrospectionClient>, users: Arc<dyn UserRepository>) -> Self {
        Self { client, users }
    }

    /// Whether the request carries a bearer `Authorization` header
    pub fn supports(&self, headers: &HeaderMap) -> bool {
        authorization(headers).is_some_and(|value| value.starts_with("Bearer "))
    }

    pub async fn authenticate(
        &self,
        headers: &HeaderMap,
    ) -> Result<AuthenticatedUser, AuthenticationError> {
        let token = authorization(headers)
            .and_then(extract_bearer_token)
            .ok_or(AuthenticationError::MissingBearerToken)?;

        let claims = self.client.introspect(token).await?;

        if !is_truthy(claims.get("active")) {
            warn!("Rejected inactive token");
            return Err(AuthenticationError::InactiveToken);
        }

        let email = resolve_email(&claims).ok_or_else(|| {
            warn!("Rejected token without email claim");
            AuthenticationError::MissingEmailClaim
        })?;

        let user = self.load_user(&email, realm_roles(&claims)).await?;

        debug!(user_id = %user.id(), email = %user.email(), "Authenticated bearer token");

        Ok(AuthenticatedUser::new(user))
    }

    /// Find the user by email, creating it when unknown, and bring its roles
    /// in line with the token
    async fn load_user(&self, email: &str, roles: Vec<String>) -> Result<User, AuthenticationError> {
        let roles = RoleSet::normalize(roles).map_err(DomainError::from)?;

        match self.users.find_by_email(email).await? {
            Some(user) if user.roles() == &roles => Ok(user),
            Some(mut user) => {
                user.assign_roles(roles);
                info!(user_id = %user.id(), roles = ?user.roles().names(), "Synchronized user roles");
                Ok(self.users.update(user).await?)
            }
            None => {
                let mut user = User::new(email);
                user.assign_roles(roles);
                info!(user_id = %user.id(), email = %email, "Provisioning user from token");
                Ok(self.users.create(user).await?)
            }
        }
    }
}

fn authorization(headers: &HeaderMap) -> Option<&str> {
    headers.get(AUTHORIZATION).and_then(|value| value.to_str().ok())
}

/// Text following the first case-insensitive `bearer` plus whitespace
fn extract_bearer_token(header: &str) -> Option<&str> {
    let lowered = header.to_ascii_lowercase();
    let mut search_from = 0;

    while let Some(found) = lowered[search_from..].find("bearer") {
        let scheme_end = search_from + found + "bearer".len();
        let rest = &header[scheme_end..];
        let token = rest.trim_start();

        if token.len() < rest.len() {
            return Some(token).filter(|token| !token.is_empty());
        }

        search_from = scheme_end;
    }

    None
}
