//! Configuration Types
//!
//! Client configuration injected into the request builder and the
//! authentication flow at construction time.

use secrecy::SecretString;
use std::time::Duration;

use super::secret::Accessibility;

/// GitHub authorization endpoint.
pub const DEFAULT_AUTHORIZATION_ENDPOINT: &str = "https://github.com/login/oauth/authorize";

/// GitHub token endpoint.
pub const DEFAULT_TOKEN_ENDPOINT: &str = "https://github.com/login/oauth/access_token";

/// Star Wars API base URL.
pub const DEFAULT_API_BASE_URL: &str = "https://swapi.dev/api/";

/// Redirect URI registered with the provider.
pub const DEFAULT_REDIRECT_URI: &str = "com.raywenderlich.StarCharles://callback";

/// Scopes requested at login.
pub const DEFAULT_SCOPES: &[&str] = &["read:user", "user:email"];

/// Service name scoping secret-store entries.
pub const DEFAULT_SECRET_SERVICE: &str = "com.raywenderlich.StarCharles";

/// Default HTTP timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Client configuration.
#[derive(Clone, Debug)]
pub struct OAuthConfig {
    /// Provider endpoints.
    pub provider: ProviderConfig,
    /// Client credentials.
    pub credentials: ClientCredentials,
    /// Redirect URI sent in both the authorization and token requests.
    pub redirect_uri: String,
    /// Custom URL scheme the browser session hands back to the process.
    pub callback_scheme: String,
    /// Scopes requested at login.
    pub scopes: Vec<String>,
    /// Base URL for resource API calls.
    pub api_base_url: String,
    /// HTTP timeout.
    pub timeout: Duration,
    /// Service name scoping secret-store entries.
    pub secret_service: String,
    /// Protection level for stored secrets.
    pub accessibility: Accessibility,
}

impl OAuthConfig {
    /// Space-separated scope string.
    pub fn scope_string(&self) -> String {
        self.scopes.join(" ")
    }
}

/// OAuth provider endpoint configuration.
#[derive(Clone, Debug)]
pub struct ProviderConfig {
    /// Authorization endpoint URL.
    pub authorization_endpoint: String,
    /// Token endpoint URL.
    pub token_endpoint: String,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            authorization_endpoint: DEFAULT_AUTHORIZATION_ENDPOINT.to_string(),
            token_endpoint: DEFAULT_TOKEN_ENDPOINT.to_string(),
        }
    }
}

/// Client credentials for the token exchange.
#[derive(Clone)]
pub struct ClientCredentials {
    /// Client identifier.
    pub client_id: String,
    /// Client secret.
    pub client_secret: SecretString,
}

impl std::fmt::Debug for ClientCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientCredentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .finish()
    }
}
