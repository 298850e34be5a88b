//! Authentication Flow
//!
//! Interactive login: authorization code with PKCE through a browser
//! session, token exchange, and persistence of the access token.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use crate::core::{
    build_authorization_url, build_token_request, DefaultPkceGenerator, HttpTransport,
    NetworkService, PkceGenerator,
};
use crate::error::{ClientError, ClientResult};
use crate::flows::session::BrowserSession;
use crate::telemetry::{LogContext, Logger};
use crate::token::{SecretStore, ACCESS_TOKEN_ID};
use crate::types::{CallbackParams, OAuthConfig, TokenResponse};

/// Login attempt state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum AuthState {
    #[default]
    Idle,
    AwaitingAuthorization,
    ExchangingToken,
    Authenticated,
    AuthorizationFailed,
    ExchangeFailed,
}

/// Clears the sheet flag when the browser step ends, however it ends.
struct SheetGuard<'a>(&'a AtomicBool);

impl<'a> SheetGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| SheetGuard(flag))
    }
}

impl Drop for SheetGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Moves an attempt abandoned mid-flight to its failed state.
struct AttemptGuard<'a, T: HttpTransport, B: BrowserSession, S: SecretStore>(
    &'a AuthenticationHandler<T, B, S>,
);

impl<T: HttpTransport, B: BrowserSession, S: SecretStore> Drop for AttemptGuard<'_, T, B, S> {
    fn drop(&mut self) {
        match self.0.state() {
            AuthState::AwaitingAuthorization => self.0.set_state(AuthState::AuthorizationFailed),
            AuthState::ExchangingToken => self.0.set_state(AuthState::ExchangeFailed),
            _ => {}
        }
    }
}

/// Drives an interactive login and persists the resulting access token.
pub struct AuthenticationHandler<T: HttpTransport, B: BrowserSession, S: SecretStore> {
    config: OAuthConfig,
    service: NetworkService<T>,
    session: Arc<B>,
    store: Arc<S>,
    pkce: Arc<dyn PkceGenerator>,
    sheet_active: AtomicBool,
    state: Mutex<AuthState>,
}

impl<T: HttpTransport, B: BrowserSession, S: SecretStore> AuthenticationHandler<T, B, S> {
    /// Create a handler logging through `tracing`.
    pub fn new(config: OAuthConfig, transport: Arc<T>, session: Arc<B>, store: Arc<S>) -> Self {
        Self::with_service(config, NetworkService::new(transport), session, store)
    }

    /// Create a handler on top of an existing network service.
    pub fn with_service(
        config: OAuthConfig,
        service: NetworkService<T>,
        session: Arc<B>,
        store: Arc<S>,
    ) -> Self {
        Self {
            config,
            service,
            session,
            store,
            pkce: Arc::new(DefaultPkceGenerator::new()),
            sheet_active: AtomicBool::new(false),
            state: Mutex::new(AuthState::Idle),
        }
    }

    /// Replace the PKCE generator.
    pub fn with_pkce_generator(mut self, pkce: Arc<dyn PkceGenerator>) -> Self {
        self.pkce = pkce;
        self
    }

    /// Replace the observability hook.
    pub fn with_logger(mut self, logger: Arc<dyn Logger>) -> Self {
        self.service = NetworkService::with_logger(self.service.transport().clone(), logger);
        self
    }

    /// Current state of the latest login attempt.
    pub fn state(&self) -> AuthState {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Check whether a browser session is currently presented.
    pub fn sheet_is_active(&self) -> bool {
        self.sheet_active.load(Ordering::Acquire)
    }

    /// Configuration in use.
    pub fn config(&self) -> &OAuthConfig {
        &self.config
    }

    /// Run the interactive login and return the access token.
    ///
    /// Always prompts; a token already in the store is not consulted.
    /// Fails with [`ClientError::Internal`] while another browser session is
    /// presented.
    pub async fn get_token_or_login_if_needed(&self) -> ClientResult<String> {
        let Some(sheet) = SheetGuard::acquire(&self.sheet_active) else {
            return Err(ClientError::Internal(
                "an authentication session is already active".to_string(),
            ));
        };
        let _attempt = AttemptGuard(self);
        self.set_state(AuthState::AwaitingAuthorization);

        let pkce = self.pkce.generate();
        let url = build_authorization_url(&self.config, pkce.challenge())
            .map_err(|e| self.fail(AuthState::AuthorizationFailed, e))?;

        let callback = self
            .session
            .authenticate(url, &self.config.callback_scheme)
            .await
            .map_err(|e| {
                self.fail(AuthState::AuthorizationFailed, ClientError::DismissLogin(e.to_string()))
            })?;
        drop(sheet);

        let params = CallbackParams::from_url(&callback);
        let Some(code) = params.authorization_code() else {
            if let Some(error) = &params.error {
                self.logger().warn(
                    "Authorization denied",
                    &LogContext::new()
                        .operation("authorize")
                        .extra("error", error.as_str())
                        .extra(
                            "error_description",
                            params.error_description.clone().unwrap_or_default(),
                        ),
                );
            }
            return Err(self.fail(AuthState::AuthorizationFailed, ClientError::InvalidData));
        };

        self.set_state(AuthState::ExchangingToken);
        let request = build_token_request(&self.config, Some(code))
            .map_err(|e| self.fail(AuthState::ExchangeFailed, e))?;
        let response: TokenResponse = self
            .service
            .send(&request)
            .await
            .map_err(|e| self.fail(AuthState::ExchangeFailed, e))?;

        let Some(token) = response.access_token() else {
            return Err(self.fail(AuthState::ExchangeFailed, ClientError::InvalidData));
        };

        if !self.store.put(ACCESS_TOKEN_ID, token) {
            self.logger().warn(
                "Failed to persist access token",
                &LogContext::new()
                    .operation("store_token")
                    .extra("identifier", ACCESS_TOKEN_ID),
            );
        }

        self.set_state(AuthState::Authenticated);
        self.logger()
            .info("Login completed", &LogContext::new().operation("login"));
        Ok(token.to_string())
    }

    /// Sign out. Not implemented yet; the stored token is left in place.
    pub async fn logout(&self) -> ClientResult<()> {
        self.logger().warn(
            "Logout is not implemented",
            &LogContext::new().operation("logout"),
        );
        Ok(())
    }

    fn logger(&self) -> &Arc<dyn Logger> {
        self.service.logger()
    }

    fn set_state(&self, state: AuthState) {
        let previous = std::mem::replace(
            &mut *self.state.lock().unwrap_or_else(PoisonError::into_inner),
            state,
        );
        self.logger().debug(
            "Login state changed",
            &LogContext::new()
                .operation("login")
                .extra("from", format!("{:?}", previous))
                .extra("to", format!("{:?}", state)),
        );
    }

    fn fail(&self, state: AuthState, error: ClientError) -> ClientError {
        self.set_state(state);
        self.logger().warn(
            "Login failed",
            &LogContext::new()
                .operation("login")
                .extra("error", error.error_code()),
        );
        error
    }
}
