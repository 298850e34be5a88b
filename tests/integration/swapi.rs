//! Star Wars API client against a mock server.

use super::*;
use serde_json::json;
use starcharles::{ClientError, StarWarsApi};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

fn api(server: &MockServer) -> StarWarsApi<ReqwestHttpTransport> {
    let (service, _) = test_service();
    StarWarsApi::new(service, test_config(server).api_base_url)
}

#[tokio::test]
async fn test_fetch_films() {
    let server = setup_mock_server().await;
    Mock::given(method("GET"))
        .and(path("/api/films/"))
        .and(header("Content-Type", "application/json"))
        .and(header("cache-control", "no-cache"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": 1,
            "next": null,
            "previous": null,
            "results": [{
                "title": "A New Hope",
                "episode_id": 4,
                "characters": [format!("{}/api/people/1/", server.uri())],
                "url": format!("{}/api/films/1/", server.uri())
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let films = api(&server).fetch_films().await.unwrap();

    assert_eq!(films.count, 1);
    assert_eq!(films.results[0].title, "A New Hope");
    assert_eq!(films.results[0].characters.len(), 1);
}

#[tokio::test]
async fn test_fetch_character_from_film_link() {
    let server = setup_mock_server().await;
    Mock::given(method("GET"))
        .and(path("/api/people/1/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "Luke Skywalker",
            "height": "172",
            "films": []
        })))
        .mount(&server)
        .await;

    let character = api(&server)
        .fetch_character(&format!("{}/api/people/1/", server.uri()))
        .await
        .unwrap();

    assert_eq!(character.name, "Luke Skywalker");
    assert_eq!(character.height, "172");
}

#[tokio::test]
async fn test_paginate_characters() {
    let server = setup_mock_server().await;
    Mock::given(method("GET"))
        .and(path("/api/people/"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": 2,
            "next": null,
            "previous": format!("{}/api/people/", server.uri()),
            "results": [{"name": "C-3PO"}]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/people/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": 2,
            "next": format!("{}/api/people/?page=2", server.uri()),
            "previous": null,
            "results": [{"name": "Luke Skywalker"}]
        })))
        .mount(&server)
        .await;

    let api = api(&server);
    let mut names = Vec::new();
    let mut page = api.fetch_characters().await.unwrap();
    loop {
        names.extend(page.results.iter().map(|c| c.name.clone()));
        let Some(next) = page.next.clone() else { break };
        page = api.fetch_page(&next).await.unwrap();
    }

    assert_eq!(names, ["Luke Skywalker", "C-3PO"]);
}

#[tokio::test]
async fn test_missing_film() {
    let server = setup_mock_server().await;
    Mock::given(method("GET"))
        .and(path("/api/films/99/"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"detail": "Not found"})))
        .mount(&server)
        .await;

    let err = api(&server)
        .fetch_film(&format!("{}/api/films/99/", server.uri()))
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::ClientEntity { code: 404, .. }));
}
