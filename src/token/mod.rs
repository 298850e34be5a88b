//! Token Storage
//!
//! Where the access token lives once a login completes.

pub mod storage;

pub use storage::{InMemorySecretStore, KeyringSecretStore, SecretStore, ACCESS_TOKEN_ID};
