//! StarCharles Client
//!
//! High-level client that combines login, token storage and the Star Wars
//! API behind one handle.

use serde::de::DeserializeOwned;
use std::sync::Arc;

use crate::api::StarWarsApi;
use crate::core::{HttpTransport, NetworkService, ReqwestHttpTransport, RequestModel};
use crate::error::ClientResult;
use crate::flows::{AuthState, AuthenticationHandler, BrowserSession};
use crate::token::{KeyringSecretStore, SecretStore, ACCESS_TOKEN_ID};
use crate::types::{Credential, OAuthConfig};

/// Client for login and resource access.
pub struct StarCharlesClient<B, T = ReqwestHttpTransport, S = KeyringSecretStore>
where
    B: BrowserSession,
    T: HttpTransport,
    S: SecretStore,
{
    service: NetworkService<T>,
    store: Arc<S>,
    auth: AuthenticationHandler<T, B, S>,
    api: StarWarsApi<T>,
}

impl<B: BrowserSession> StarCharlesClient<B, ReqwestHttpTransport, KeyringSecretStore> {
    /// Create a client over HTTPS with tokens kept in the platform keychain.
    pub fn new(config: OAuthConfig, session: Arc<B>) -> ClientResult<Self> {
        let transport = Arc::new(ReqwestHttpTransport::with_timeout(config.timeout)?);
        let store = Arc::new(
            KeyringSecretStore::new(config.secret_service.clone())
                .with_accessibility(config.accessibility),
        );
        Ok(Self::with_components(
            config,
            NetworkService::new(transport),
            session,
            store,
        ))
    }
}

impl<B: BrowserSession, T: HttpTransport, S: SecretStore> StarCharlesClient<B, T, S> {
    /// Create a client with custom implementations.
    pub fn with_components(
        config: OAuthConfig,
        service: NetworkService<T>,
        session: Arc<B>,
        store: Arc<S>,
    ) -> Self {
        let api = StarWarsApi::new(service.clone(), config.api_base_url.clone());
        let auth = AuthenticationHandler::with_service(config, service.clone(), session, store.clone());
        Self {
            service,
            store,
            auth,
            api,
        }
    }

    /// Get the configuration.
    pub fn config(&self) -> &OAuthConfig {
        self.auth.config()
    }

    /// Star Wars API resources.
    pub fn api(&self) -> &StarWarsApi<T> {
        &self.api
    }

    /// Login handler.
    pub fn auth(&self) -> &AuthenticationHandler<T, B, S> {
        &self.auth
    }

    /// Current login state.
    pub fn auth_state(&self) -> AuthState {
        self.auth.state()
    }

    /// Run the interactive login and return the access token.
    pub async fn get_token_or_login_if_needed(&self) -> ClientResult<String> {
        self.auth.get_token_or_login_if_needed().await
    }

    /// Sign out.
    pub async fn logout(&self) -> ClientResult<()> {
        self.auth.logout().await
    }

    /// Access token persisted by the last successful login.
    pub fn stored_token(&self) -> Option<String> {
        self.store.get(ACCESS_TOKEN_ID)
    }

    /// Stored access token as a bearer credential.
    pub fn stored_credential(&self) -> Option<Credential> {
        self.stored_token().map(Credential::new)
    }

    /// Log in, then send `model` with the access token as a bearer credential.
    pub async fn send_authorized<R: DeserializeOwned>(&self, model: RequestModel) -> ClientResult<R> {
        let token = self.get_token_or_login_if_needed().await?;
        self.service.fetch(&model.with_bearer_token(&token)).await
    }
}
