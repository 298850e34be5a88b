//! StarCharles Client
//!
//! Networking and authentication layer for a Star Wars browsing app: an
//! interactive OAuth 2.0 authorization-code login with PKCE, keychain-backed
//! token storage, and typed access to the Star Wars API.
//!
//! # Features
//!
//! - Authorization Code with PKCE (RFC 7636, S256) through a browser session
//! - Access token persisted in the platform keychain
//! - Closed error taxonomy with user-facing title/message keys
//! - Star Wars API films and people resources
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use starcharles::{oauth_config, ChannelBrowserSession, StarCharlesClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = oauth_config()
//!         .client_id("my-client-id")
//!         .client_secret("my-client-secret")
//!         .build()?;
//!
//!     // The host opens the URL and later calls `session.complete(callback)`.
//!     let session = Arc::new(ChannelBrowserSession::new(|url| {
//!         println!("Open {}", url);
//!         Ok(())
//!     }));
//!
//!     let client = StarCharlesClient::new(config, session)?;
//!     let token = client.get_token_or_login_if_needed().await?;
//!     let films = client.api().fetch_films().await?;
//!     println!("{} films, token length {}", films.count, token.len());
//!
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - `types`: configuration, token, callback and secret-item types
//! - `error`: the closed client error taxonomy
//! - `builders`: fluent configuration builder with environment overrides
//! - `core`: request building, PKCE, HTTP transport, response classification
//! - `flows`: browser session and the authentication handler
//! - `token`: secret storage for the access token
//! - `telemetry`: pluggable request/response logging
//! - `api`: Star Wars API client and models
//! - `recommend`: label-driven item ranking
//! - `client`: high-level client combining all of the above

pub mod api;
pub mod builders;
pub mod client;
pub mod core;
pub mod error;
pub mod flows;
pub mod recommend;
pub mod telemetry;
pub mod token;
pub mod types;

// Re-export main client
pub use client::StarCharlesClient;

// Re-export builders
pub use builders::{oauth_config, OAuthConfigBuilder};

// Re-export errors
pub use error::{present, ClientError, ClientResult, ErrorPresentation};

// Re-export types
pub use types::{
    // Config
    ClientCredentials, OAuthConfig, ProviderConfig,
    // Token
    Credential, TokenResponse,
    // Callback
    CallbackParams,
    // Secret
    Accessibility, SecretItem,
};

// Re-export core components
pub use core::{
    // Request
    build_request, HttpMethod, PreparedRequest, RequestModel,
    // OAuth
    build_authorization_url, build_token_exchange_body, build_token_request,
    // PKCE
    DefaultPkceGenerator, MockPkceGenerator, PkceGenerator, PkcePair,
    // Transport
    HttpResponse, HttpTransport, MockHttpTransport, ReqwestHttpTransport,
    // Service
    decode_response, NetworkService,
};

// Re-export flows
pub use flows::{
    AuthState, AuthenticationHandler, BrowserSession, ChannelBrowserSession, MockBrowserSession,
    SessionError,
};

// Re-export token storage
pub use token::{InMemorySecretStore, KeyringSecretStore, SecretStore, ACCESS_TOKEN_ID};

// Re-export API
pub use api::{Character, Characters, Film, Films, Page, StarWarsApi};

// Re-export recommendations
pub use recommend::{recommend, Label, LabeledItem, ScoringStrategy, DEFAULT_TOP_N};

// Re-export telemetry
pub use telemetry::{InMemoryLogger, LogContext, LogEntry, LogLevel, Logger, NoOpLogger, TracingLogger};
