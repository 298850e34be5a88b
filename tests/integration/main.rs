//! Integration tests using WireMock
//!
//! These tests run the real reqwest transport against a mock HTTP server and
//! cover status classification, the login flow and the Star Wars API client.

mod login;
mod swapi;
mod transport;

use std::sync::Arc;

use starcharles::{
    oauth_config, InMemoryLogger, NetworkService, OAuthConfig, ReqwestHttpTransport,
};
use wiremock::MockServer;

/// Start a mock server.
pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

/// Configuration whose token endpoint and API base URL point at `server`.
pub fn test_config(server: &MockServer) -> OAuthConfig {
    oauth_config()
        .client_id("client-id")
        .client_secret("client-secret")
        .token_endpoint(format!("{}/login/oauth/access_token", server.uri()))
        .api_base_url(format!("{}/api/", server.uri()))
        .build()
        .expect("valid test configuration")
}

/// Network service over the real transport, with captured logs.
pub fn test_service() -> (NetworkService<ReqwestHttpTransport>, Arc<InMemoryLogger>) {
    let transport = Arc::new(ReqwestHttpTransport::new().expect("transport"));
    let logger = Arc::new(InMemoryLogger::new());
    (NetworkService::with_logger(transport, logger.clone()), logger)
}
