//! Client Types
//!
//! Data structures shared across the client.

pub mod callback;
pub mod config;
pub mod secret;
pub mod token;

pub use callback::*;
pub use config::*;
pub use secret::*;
pub use token::*;
