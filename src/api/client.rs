//! Star Wars API client.

use serde::de::DeserializeOwned;

use crate::api::models::{Character, Characters, Film, Films, Page};
use crate::core::{HttpMethod, HttpTransport, NetworkService, RequestModel};
use crate::error::ClientResult;

/// Path of the film collection, relative to the API base URL.
pub const FILMS_PATH: &str = "films/";

/// Path of the people collection, relative to the API base URL.
pub const PEOPLE_PATH: &str = "people/";

/// Client for the Star Wars API resources.
pub struct StarWarsApi<T: HttpTransport> {
    service: NetworkService<T>,
    base_url: String,
}

impl<T: HttpTransport> StarWarsApi<T> {
    /// Create a client rooted at `base_url`.
    pub fn new(service: NetworkService<T>, base_url: impl Into<String>) -> Self {
        Self {
            service,
            base_url: base_url.into(),
        }
    }

    /// API base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Lists the first page of films.
    pub async fn fetch_films(&self) -> ClientResult<Films> {
        self.get(&self.base_url, FILMS_PATH).await
    }

    /// Gets a film by its resource URL.
    pub async fn fetch_film(&self, url: &str) -> ClientResult<Film> {
        self.get(url, "").await
    }

    /// Lists the first page of characters.
    pub async fn fetch_characters(&self) -> ClientResult<Characters> {
        self.get(&self.base_url, PEOPLE_PATH).await
    }

    /// Gets a character by its resource URL.
    pub async fn fetch_character(&self, url: &str) -> ClientResult<Character> {
        self.get(url, "").await
    }

    /// Follows a `next` or `previous` link.
    pub async fn fetch_page<R: DeserializeOwned>(&self, url: &str) -> ClientResult<Page<R>> {
        self.get(url, "").await
    }

    async fn get<R: DeserializeOwned>(&self, base_url: &str, path: &str) -> ClientResult<R> {
        let model = resource_request(base_url, path);
        self.service.fetch(&model).await
    }
}

fn resource_request(base_url: &str, path: &str) -> RequestModel {
    RequestModel::new(base_url, path, HttpMethod::Get)
        .with_header("Content-Type", "application/json")
        .with_header("cache-control", "no-cache")
}
