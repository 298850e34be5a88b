//! Star Wars API
//!
//! Typed access to the films and people resources.

pub mod client;
pub mod models;

pub use client::{StarWarsApi, FILMS_PATH, PEOPLE_PATH};
pub use models::{Character, Characters, Film, Films, Page};
