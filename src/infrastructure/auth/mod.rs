//! Authentication infrastructure module
//!
//! Bearer tokens are checked against the identity provider's introspection
//! endpoint and mapped onto local users.

mod authenticator;
mod claims;
mod error;
mod introspection;

pub use authenticator::{AuthenticatedUser, TokenIntrospectionAuthenticator};
pub use error::AuthenticationError;
pub use introspection::{HttpIntrospectionClient, IntrospectionClient};
