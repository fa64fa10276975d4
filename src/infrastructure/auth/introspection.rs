//! OAuth2 token introspection client

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::Value;
use tracing::warn;

use super::error::AuthenticationError;
use crate::config::KeycloakConfig;
use crate::domain::DomainError;

/// Asks the identity provider what it knows about a token
#[async_trait]
pub trait IntrospectionClient: Send + Sync + std::fmt::Debug {
    /// Raw claims for `token`; anything but a 200 with a JSON body is a failure
    async fn introspect(&self, token: &str) -> Result<Value, AuthenticationError>;
}

/// Introspection over HTTP against a Keycloak realm
#[derive(Debug)]
pub struct HttpIntrospectionClient {
    introspection_url: String,
    client_id: String,
    client_secret: String,
    http_client: reqwest::Client,
}

impl HttpIntrospectionClient {
    pub fn new(config: &KeycloakConfig) -> Result<Self, DomainError> {
        let mut builder = reqwest::Client::builder();

        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        let http_client = builder.build().map_err(|e| {
            DomainError::configuration(format!("Failed to build introspection client: {}", e))
        })?;

        Ok(Self {
            introspection_url: config.introspection_url.clone(),
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
            http_client,
        })
    }
}

#[async_trait]
impl IntrospectionClient for HttpIntrospectionClient {
    async fn introspect(&self, token: &str) -> Result<Value, AuthenticationError> {
        let response = self
            .http_client
            .post(&self.introspection_url)
            .form(&[
                ("token", token),
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
            ])
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Introspection request could not be sent");
                AuthenticationError::IntrospectionFailed
            })?;

        if response.status() != StatusCode::OK {
            warn!(status = %response.status(), "Introspection endpoint refused the request");
            return Err(AuthenticationError::IntrospectionFailed);
        }

        response.json().await.map_err(|e| {
            warn!(error = %e, "Introspection response is not JSON");
            AuthenticationError::IntrospectionFailed
        })
    }
}
