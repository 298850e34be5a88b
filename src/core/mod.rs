//! Core Components
//!
//! Request building, PKCE, HTTP transport and response classification.

pub mod oauth;
pub mod pkce;
pub mod request;
pub mod response;
pub mod service;
pub mod transport;

pub use oauth::*;
pub use pkce::*;
pub use request::*;
pub use response::*;
pub use service::*;
pub use transport::*;
