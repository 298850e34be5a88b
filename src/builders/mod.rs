//! Builders
//!
//! Fluent builder for client configuration.

pub mod config;

pub use config::{oauth_config, OAuthConfigBuilder};
