//! Token Types
//!
//! Token endpoint payload and the access-token credential.

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::collections::HashMap;

/// Token response from the authorization server.
#[derive(Clone, Debug, Deserialize)]
pub struct TokenResponse {
    /// Access token. Absent when the provider answers with an error body.
    #[serde(default)]
    pub access_token: Option<String>,
    /// Token type (usually "bearer").
    #[serde(default)]
    pub token_type: Option<String>,
    /// Granted scopes.
    #[serde(default)]
    pub scope: Option<String>,
    /// Refresh token, when the provider issues one.
    #[serde(default)]
    pub refresh_token: Option<String>,
    /// Additional fields.
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

impl TokenResponse {
    /// The access token, if present and non-empty.
    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref().filter(|token| !token.is_empty())
    }
}

/// Access token held by the secret store.
#[derive(Clone)]
pub struct Credential {
    access_token: SecretString,
}

impl Credential {
    /// Create new credential.
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: SecretString::new(access_token.into()),
        }
    }

    /// Get token value.
    pub fn access_token(&self) -> &str {
        self.access_token.expose_secret()
    }

    /// Format as Authorization header value.
    pub fn authorization_header(&self) -> String {
        format!("Bearer {}", self.access_token.expose_secret())
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("access_token", &"[REDACTED]")
            .finish()
    }
}
