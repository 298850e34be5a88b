//! Login Flows
//!
//! The browser session collaborator and the interactive authentication
//! handler built on it.

pub mod authentication;
pub mod session;

pub use authentication::{AuthState, AuthenticationHandler};
pub use session::{BrowserSession, ChannelBrowserSession, MockBrowserSession, SessionError};
