//! Authentication errors

use thiserror::Error;

use crate::domain::DomainError;

/// Reasons a bearer token could not be turned into a user
#[derive(Debug, Error)]
pub enum AuthenticationError {
    #[error("No bearer token found")]
    MissingBearerToken,

    #[error("Introspection request failed")]
    IntrospectionFailed,

    #[error("Token is not active")]
    InactiveToken,

    #[error("No email claim in token")]
    MissingEmailClaim,

    /// Loading or storing the local user failed
    #[error(transparent)]
    Domain(#[from] DomainError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reasons() {
        assert_eq!(
            AuthenticationError::MissingBearerToken.to_string(),
            "No bearer token found"
        );
        assert_eq!(
            AuthenticationError::IntrospectionFailed.to_string(),
            "Introspection request failed"
        );
        assert_eq!(
            AuthenticationError::InactiveToken.to_string(),
            "Token is not active"
        );
        assert_eq!(
            AuthenticationError::MissingEmailClaim.to_string(),
            "No email claim in token"
        );
    }

    #[test]
    fn test_domain_errors_are_transparent() {
        let error = AuthenticationError::from(DomainError::storage("down"));

        assert_eq!(error.to_string(), "Storage error: down");
    }
}
