//! Status classification over real HTTP.

use super::*;
use serde::Deserialize;
use serde_json::json;
use starcharles::{ClientError, ClientResult, HttpMethod, RequestModel};
use tokio_test::{assert_err, assert_ok};
use wiremock::matchers::{body_string, header, method, path};
use wiremock::{Mock, ResponseTemplate};

#[derive(Debug, Deserialize)]
struct Payload {
    value: String,
}

async fn fetch_with_status(status: u16, body: &'static str) -> ClientResult<Payload> {
    let server = setup_mock_server().await;
    Mock::given(method("GET"))
        .and(path("/resource"))
        .respond_with(ResponseTemplate::new(status).set_body_string(body))
        .mount(&server)
        .await;

    let (service, _) = test_service();
    let model = RequestModel::new(format!("{}/", server.uri()), "resource", HttpMethod::Get);
    service.fetch(&model).await
}

#[tokio::test]
async fn test_success_decodes() {
    let payload = assert_ok!(fetch_with_status(200, r#"{"value":"ok"}"#).await);
    assert_eq!(payload.value, "ok");
}

#[tokio::test]
async fn test_empty_success_body() {
    let err = assert_err!(fetch_with_status(204, "").await);
    assert_eq!(err, ClientError::EmptyResponseData);
}

#[tokio::test]
async fn test_undecodable_success_body() {
    let err = fetch_with_status(200, r#"{"other":1}"#).await.unwrap_err();
    assert!(matches!(err, ClientError::Decoding(_)));
}

#[tokio::test]
async fn test_status_classification() {
    assert_eq!(
        fetch_with_status(401, "").await.unwrap_err(),
        ClientError::Unauthorized
    );
    assert_eq!(
        fetch_with_status(403, "").await.unwrap_err(),
        ClientError::Forbidden
    );
    assert_eq!(
        fetch_with_status(503, "").await.unwrap_err(),
        ClientError::Backend(503)
    );
    assert_eq!(
        fetch_with_status(400, "").await.unwrap_err(),
        ClientError::UnexpectedStatusCode(400)
    );
    assert_eq!(
        fetch_with_status(302, "").await.unwrap_err(),
        ClientError::UnexpectedStatusCode(302)
    );
}

#[tokio::test]
async fn test_client_entity_carries_body() {
    let err = fetch_with_status(422, r#"{"detail":"bad"}"#).await.unwrap_err();
    assert_eq!(
        err,
        ClientError::ClientEntity {
            body: br#"{"detail":"bad"}"#.to_vec(),
            code: 422,
        }
    );
}

#[tokio::test]
async fn test_headers_and_body_sent_verbatim() {
    let server = setup_mock_server().await;
    Mock::given(method("POST"))
        .and(path("/echo"))
        .and(header("x-custom", "1"))
        .and(body_string(r#"{"a":1}"#))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"value": "seen"})))
        .expect(1)
        .mount(&server)
        .await;

    let (service, _) = test_service();
    let model = RequestModel::new(format!("{}/", server.uri()), "echo", HttpMethod::Post)
        .with_header("x-custom", "1")
        .with_json_body(&json!({"a": 1}))
        .unwrap();
    let payload: Payload = service.fetch(&model).await.unwrap();

    assert_eq!(payload.value, "seen");
}

#[tokio::test]
async fn test_connection_refused_is_url_error() {
    let (service, logger) = test_service();
    let model = RequestModel::new("http://127.0.0.1:1/", "gone", HttpMethod::Get);
    let err = service.fetch::<Payload>(&model).await.unwrap_err();

    assert!(matches!(err, ClientError::Url { .. }));
    assert!(err.is_retryable());
    assert!(logger.contains("gone"));
}

#[tokio::test]
async fn test_custom_client_redirect_policy() {
    let server = setup_mock_server().await;
    Mock::given(method("GET"))
        .and(path("/moved"))
        .respond_with(
            ResponseTemplate::new(302).insert_header("Location", format!("{}/target", server.uri())),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/target"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"value": "followed"})))
        .mount(&server)
        .await;

    let model = RequestModel::new(format!("{}/", server.uri()), "moved", HttpMethod::Get);

    let (following, _) = test_service();
    let payload: Payload = following.fetch(&model).await.unwrap();
    assert_eq!(payload.value, "followed");

    let client = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap();
    let pinned = NetworkService::new(Arc::new(ReqwestHttpTransport::with_client(client)));
    let err = pinned.fetch::<Payload>(&model).await.unwrap_err();
    assert_eq!(err, ClientError::UnexpectedStatusCode(302));
}
