//! Star Wars API resource models.

use serde::{Deserialize, Serialize};

/// A paginated list response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    /// Total number of resources across all pages.
    #[serde(default)]
    pub count: u32,
    /// URL of the next page.
    #[serde(default)]
    pub next: Option<String>,
    /// URL of the previous page.
    #[serde(default)]
    pub previous: Option<String>,
    /// Resources on this page.
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
}

impl<T> Page<T> {
    /// Returns true if there is a next page.
    pub fn has_next(&self) -> bool {
        self.next.as_deref().is_some_and(|next| !next.is_empty())
    }
}

/// Film list.
pub type Films = Page<Film>;

/// Character list.
pub type Characters = Page<Character>;

/// A film.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Film {
    pub title: String,
    pub episode_id: u32,
    pub opening_crawl: String,
    pub director: String,
    pub producer: String,
    pub release_date: String,
    /// Resource URLs of the characters appearing in the film.
    pub characters: Vec<String>,
    pub url: String,
}

impl Film {
    /// Stable identifier (the resource URL).
    pub fn id(&self) -> &str {
        &self.url
    }
}

/// A character.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Character {
    pub name: String,
    pub height: String,
    pub mass: String,
    pub hair_color: String,
    pub skin_color: String,
    pub eye_color: String,
    pub birth_year: String,
    pub gender: String,
    pub homeworld: String,
    /// Resource URLs of the films the character appears in.
    pub films: Vec<String>,
    pub url: String,
}

impl Character {
    /// Stable identifier (the resource URL).
    pub fn id(&self) -> &str {
        &self.url
    }
}
