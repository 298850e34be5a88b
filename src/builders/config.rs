//! Configuration Builder
//!
//! Fluent builder for client configuration.

use secrecy::{ExposeSecret, SecretString};
use std::time::Duration;
use url::Url;

use crate::error::{ClientError, ClientResult};
use crate::types::{
    Accessibility, ClientCredentials, OAuthConfig, ProviderConfig, DEFAULT_API_BASE_URL,
    DEFAULT_REDIRECT_URI, DEFAULT_SCOPES, DEFAULT_SECRET_SERVICE, DEFAULT_TIMEOUT,
};

/// Environment variable names read by [`OAuthConfigBuilder::from_env`].
pub mod env {
    pub const CLIENT_ID: &str = "STARCHARLES_CLIENT_ID";
    pub const CLIENT_SECRET: &str = "STARCHARLES_CLIENT_SECRET";
    pub const REDIRECT_URI: &str = "STARCHARLES_REDIRECT_URI";
    pub const SCOPES: &str = "STARCHARLES_SCOPES";
    pub const AUTHORIZE_URL: &str = "STARCHARLES_AUTHORIZE_URL";
    pub const TOKEN_URL: &str = "STARCHARLES_TOKEN_URL";
    pub const API_BASE_URL: &str = "STARCHARLES_API_BASE_URL";
    pub const TIMEOUT_SECS: &str = "STARCHARLES_TIMEOUT_SECS";
}

/// Client configuration builder.
pub struct OAuthConfigBuilder {
    client_id: Option<String>,
    client_secret: Option<SecretString>,
    authorization_endpoint: String,
    token_endpoint: String,
    redirect_uri: String,
    callback_scheme: Option<String>,
    scopes: Vec<String>,
    api_base_url: String,
    timeout: Duration,
    secret_service: String,
    accessibility: Accessibility,
}

impl Default for OAuthConfigBuilder {
    fn default() -> Self {
        let provider = ProviderConfig::default();
        Self {
            client_id: None,
            client_secret: None,
            authorization_endpoint: provider.authorization_endpoint,
            token_endpoint: provider.token_endpoint,
            redirect_uri: DEFAULT_REDIRECT_URI.to_string(),
            callback_scheme: None,
            scopes: DEFAULT_SCOPES.iter().map(|s| s.to_string()).collect(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            secret_service: DEFAULT_SECRET_SERVICE.to_string(),
            accessibility: Accessibility::default(),
        }
    }
}

impl OAuthConfigBuilder {
    /// Create new configuration builder with the GitHub and SWAPI defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder from the process environment.
    ///
    /// # Environment Variables
    ///
    /// - `STARCHARLES_CLIENT_ID` (required)
    /// - `STARCHARLES_CLIENT_SECRET` (required)
    /// - `STARCHARLES_REDIRECT_URI`, `STARCHARLES_SCOPES` (space separated),
    ///   `STARCHARLES_AUTHORIZE_URL`, `STARCHARLES_TOKEN_URL`,
    ///   `STARCHARLES_API_BASE_URL`, `STARCHARLES_TIMEOUT_SECS` (optional)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create a builder from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut builder = Self::new();

        if let Some(client_id) = lookup(env::CLIENT_ID) {
            builder = builder.client_id(client_id);
        }
        if let Some(client_secret) = lookup(env::CLIENT_SECRET) {
            builder = builder.client_secret(client_secret);
        }
        if let Some(redirect_uri) = lookup(env::REDIRECT_URI) {
            builder = builder.redirect_uri(redirect_uri);
        }
        if let Some(scopes) = lookup(env::SCOPES) {
            builder = builder.scopes(scopes.split_whitespace().map(String::from).collect());
        }
        if let Some(endpoint) = lookup(env::AUTHORIZE_URL) {
            builder = builder.authorization_endpoint(endpoint);
        }
        if let Some(endpoint) = lookup(env::TOKEN_URL) {
            builder = builder.token_endpoint(endpoint);
        }
        if let Some(base_url) = lookup(env::API_BASE_URL) {
            builder = builder.api_base_url(base_url);
        }
        if let Some(secs) = lookup(env::TIMEOUT_SECS).and_then(|s| s.parse::<u64>().ok()) {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        builder
    }

    /// Set client ID.
    pub fn client_id(mut self, client_id: impl Into<String>) -> Self {
        self.client_id = Some(client_id.into());
        self
    }

    /// Set client secret.
    pub fn client_secret(mut self, client_secret: impl Into<String>) -> Self {
        self.client_secret = Some(SecretString::new(client_secret.into()));
        self
    }

    /// Set authorization endpoint.
    pub fn authorization_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.authorization_endpoint = endpoint.into();
        self
    }

    /// Set token endpoint.
    pub fn token_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.token_endpoint = endpoint.into();
        self
    }

    /// Set redirect URI.
    pub fn redirect_uri(mut self, redirect_uri: impl Into<String>) -> Self {
        self.redirect_uri = redirect_uri.into();
        self
    }

    /// Set callback scheme. Derived from the redirect URI when unset.
    pub fn callback_scheme(mut self, scheme: impl Into<String>) -> Self {
        self.callback_scheme = Some(scheme.into());
        self
    }

    /// Set requested scopes.
    pub fn scopes(mut self, scopes: Vec<String>) -> Self {
        self.scopes = scopes;
        self
    }

    /// Add a scope.
    pub fn add_scope(mut self, scope: impl Into<String>) -> Self {
        self.scopes.push(scope.into());
        self
    }

    /// Set resource API base URL.
    pub fn api_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.api_base_url = base_url.into();
        self
    }

    /// Set request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the service name scoping secret-store entries.
    pub fn secret_service(mut self, service: impl Into<String>) -> Self {
        self.secret_service = service.into();
        self
    }

    /// Set the protection level for stored secrets.
    pub fn accessibility(mut self, accessibility: Accessibility) -> Self {
        self.accessibility = accessibility;
        self
    }

    /// Build the configuration.
    pub fn build(self) -> ClientResult<OAuthConfig> {
        let client_id = self
            .client_id
            .filter(|id| !id.is_empty())
            .ok_or_else(|| missing("client_id"))?;

        let client_secret = self
            .client_secret
            .filter(|secret| !secret.expose_secret().is_empty())
            .ok_or_else(|| missing("client_secret"))?;

        for endpoint in [
            &self.authorization_endpoint,
            &self.token_endpoint,
            &self.api_base_url,
        ] {
            Url::parse(endpoint).map_err(|_| ClientError::InvalidUrl)?;
        }

        let redirect = Url::parse(&self.redirect_uri).map_err(|_| ClientError::InvalidUrl)?;
        let callback_scheme = match self.callback_scheme {
            Some(scheme) if !scheme.eq_ignore_ascii_case(redirect.scheme()) => {
                return Err(ClientError::Internal(format!(
                    "callback scheme {} does not match redirect URI scheme {}",
                    scheme,
                    redirect.scheme()
                )));
            }
            Some(scheme) => scheme,
            None => self
                .redirect_uri
                .split_once("://")
                .map(|(scheme, _)| scheme.to_string())
                .unwrap_or_else(|| redirect.scheme().to_string()),
        };

        Ok(OAuthConfig {
            provider: ProviderConfig {
                authorization_endpoint: self.authorization_endpoint,
                token_endpoint: self.token_endpoint,
            },
            credentials: ClientCredentials {
                client_id,
                client_secret,
            },
            redirect_uri: self.redirect_uri,
            callback_scheme,
            scopes: self.scopes,
            api_base_url: self.api_base_url,
            timeout: self.timeout,
            secret_service: self.secret_service,
            accessibility: self.accessibility,
        })
    }
}

fn missing(field: &str) -> ClientError {
    ClientError::Internal(format!("missing required configuration: {}", field))
}

/// Create a new configuration builder.
pub fn oauth_config() -> OAuthConfigBuilder {
    OAuthConfigBuilder::new()
}
