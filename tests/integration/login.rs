//! Interactive login against a mock token endpoint.

use super::*;
use serde_json::json;
use starcharles::{
    AuthState, AuthenticationHandler, ClientError, InMemorySecretStore, MockBrowserSession,
    SecretStore, StarCharlesClient, ACCESS_TOKEN_ID,
};
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, ResponseTemplate};

const CALLBACK: &str = "com.raywenderlich.StarCharles://callback?code=abc123";

#[tokio::test]
async fn test_login_exchanges_code_and_stores_token() {
    let server = setup_mock_server().await;
    Mock::given(method("POST"))
        .and(path("/login/oauth/access_token"))
        .and(header("Content-Type", "application/x-www-form-urlencoded"))
        .and(header("Accept", "application/json"))
        .and(body_string_contains("client_id=client-id"))
        .and(body_string_contains("client_secret=client-secret"))
        .and(body_string_contains("code=abc123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "tok_xyz",
            "token_type": "bearer",
            "scope": "read:user,user:email"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let session = Arc::new(MockBrowserSession::new());
    session.queue_callback(CALLBACK);
    let store = Arc::new(InMemorySecretStore::default());
    let (service, logger) = test_service();
    let handler =
        AuthenticationHandler::with_service(test_config(&server), service, session.clone(), store.clone());

    let token = handler.get_token_or_login_if_needed().await.unwrap();

    assert_eq!(token, "tok_xyz");
    assert_eq!(store.get(ACCESS_TOKEN_ID).as_deref(), Some("tok_xyz"));
    assert_eq!(handler.state(), AuthState::Authenticated);
    assert!(!logger.contains("client-secret"));

    let (authorize_url, _) = &session.get_history()[0];
    let params: Vec<(String, String)> = authorize_url.query_pairs().into_owned().collect();
    assert!(params.contains(&("response_type".into(), "code".into())));
    assert!(params.contains(&("code_challenge_method".into(), "S256".into())));
    assert!(params.iter().any(|(k, v)| k == "code_challenge" && v.len() == 43));
}

#[tokio::test]
async fn test_login_backend_error() {
    let server = setup_mock_server().await;
    Mock::given(method("POST"))
        .and(path("/login/oauth/access_token"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let session = Arc::new(MockBrowserSession::new());
    session.queue_callback(CALLBACK);
    let store = Arc::new(InMemorySecretStore::default());
    let (service, _) = test_service();
    let handler =
        AuthenticationHandler::with_service(test_config(&server), service, session, store.clone());

    let err = handler.get_token_or_login_if_needed().await.unwrap_err();

    assert_eq!(err, ClientError::Backend(500));
    assert!(!handler.sheet_is_active());
    assert!(store.is_empty());
}

#[tokio::test]
async fn test_login_without_code_never_calls_token_endpoint() {
    let server = setup_mock_server().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let session = Arc::new(MockBrowserSession::new());
    session.queue_callback("com.raywenderlich.StarCharles://callback");
    let store = Arc::new(InMemorySecretStore::default());
    let (service, _) = test_service();
    let handler =
        AuthenticationHandler::with_service(test_config(&server), service, session, store.clone());

    let err = handler.get_token_or_login_if_needed().await.unwrap_err();

    assert_eq!(err, ClientError::InvalidData);
    assert!(store.is_empty());
}

#[tokio::test]
async fn test_authorized_request_after_login() {
    let server = setup_mock_server().await;
    Mock::given(method("POST"))
        .and(path("/login/oauth/access_token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"access_token": "tok_xyz"})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/films/"))
        .and(header("Authorization", "Bearer tok_xyz"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": 0, "next": null, "previous": null, "results": []
        })))
        .expect(1)
        .mount(&server)
        .await;

    let config = test_config(&server);
    let session = Arc::new(MockBrowserSession::new());
    session.queue_callback(CALLBACK);
    let (service, _) = test_service();
    let client = StarCharlesClient::with_components(
        config.clone(),
        service,
        session,
        Arc::new(InMemorySecretStore::default()),
    );

    let model = starcharles::RequestModel::new(
        config.api_base_url.clone(),
        starcharles::api::FILMS_PATH,
        starcharles::HttpMethod::Get,
    );
    let films: starcharles::Films = client.send_authorized(model).await.unwrap();

    assert_eq!(films.count, 0);
    assert_eq!(client.stored_token().as_deref(), Some("tok_xyz"));
}
