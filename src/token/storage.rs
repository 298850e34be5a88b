//! Secret Storage
//!
//! Persistent single-value secret storage scoped to a service identity.

use keyring::Entry;
use secrecy::ExposeSecret;
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use tracing::debug;

use crate::types::{Accessibility, SecretItem};

/// Identifier under which the access token is stored.
pub const ACCESS_TOKEN_ID: &str = "accessTokenId";

/// Secret store interface.
///
/// Each call is atomic. `get` does not distinguish a missing entry from a
/// store failure.
pub trait SecretStore: Send + Sync {
    /// Store `value` under `identifier`, overwriting any existing entry.
    fn put(&self, identifier: &str, value: &str) -> bool;

    /// Retrieve the value stored under `identifier`.
    fn get(&self, identifier: &str) -> Option<String>;

    /// Remove the entry stored under `identifier`.
    fn remove(&self, identifier: &str) -> bool;
}

/// In-memory secret store.
pub struct InMemorySecretStore {
    service: String,
    accessibility: Accessibility,
    items: Mutex<HashMap<(String, String), SecretItem>>,
}

impl InMemorySecretStore {
    /// Create new in-memory store.
    pub fn new(service: impl Into<String>) -> Self {
        Self {
            service: service.into(),
            accessibility: Accessibility::default(),
            items: Mutex::new(HashMap::new()),
        }
    }

    /// Set the protection level recorded on new items.
    pub fn with_accessibility(mut self, accessibility: Accessibility) -> Self {
        self.accessibility = accessibility;
        self
    }

    /// Look up the full item, including its protection level.
    pub fn item(&self, identifier: &str) -> Option<SecretItem> {
        self.items
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&(self.service.clone(), identifier.to_string()))
            .cloned()
    }

    /// Number of stored items.
    pub fn len(&self) -> usize {
        self.items
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Check whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for InMemorySecretStore {
    fn default() -> Self {
        Self::new(crate::types::DEFAULT_SECRET_SERVICE)
    }
}

impl SecretStore for InMemorySecretStore {
    fn put(&self, identifier: &str, value: &str) -> bool {
        let item = SecretItem::query(&self.service, identifier)
            .with_accessibility(self.accessibility)
            .with_payload(value);
        self.items
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert((item.service.clone(), item.account.clone()), item);
        true
    }

    fn get(&self, identifier: &str) -> Option<String> {
        self.item(identifier)?
            .payload
            .map(|payload| payload.expose_secret().clone())
    }

    fn remove(&self, identifier: &str) -> bool {
        self.items
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&(self.service.clone(), identifier.to_string()))
            .is_some()
    }
}

/// Secret store backed by the platform keychain (macOS Keychain, Windows
/// Credential Manager, Linux kernel keyring).
///
/// The accessibility level is recorded on every item and in the store logs,
/// but the keyring backend has no way to enforce it: secrets get the
/// platform's default protection for the logged-in user, whatever level is
/// configured.
pub struct KeyringSecretStore {
    service: String,
    accessibility: Accessibility,
}

impl KeyringSecretStore {
    /// Create a store scoped to `service`.
    pub fn new(service: impl Into<String>) -> Self {
        Self {
            service: service.into(),
            accessibility: Accessibility::default(),
        }
    }

    /// Set the protection level recorded on stored items. Not enforced by
    /// the keyring backend.
    pub fn with_accessibility(mut self, accessibility: Accessibility) -> Self {
        self.accessibility = accessibility;
        self
    }

    fn entry(&self, item: &SecretItem) -> Option<Entry> {
        match Entry::new(&item.service, &item.account) {
            Ok(entry) => Some(entry),
            Err(e) => {
                debug!(service = %item.service, account = %item.account, error = %e, "Keychain entry unavailable");
                None
            }
        }
    }

    fn item(&self, identifier: &str) -> SecretItem {
        SecretItem::query(&self.service, identifier).with_accessibility(self.accessibility)
    }
}

impl SecretStore for KeyringSecretStore {
    fn put(&self, identifier: &str, value: &str) -> bool {
        let item = self.item(identifier).with_payload(value);
        let (Some(entry), Some(payload)) = (self.entry(&item), item.payload.as_ref()) else {
            return false;
        };

        match entry.set_password(payload.expose_secret()) {
            Ok(()) => {
                debug!(
                    service = %item.service,
                    account = %item.account,
                    accessibility = item.accessibility.as_str(),
                    "Secret stored"
                );
                true
            }
            Err(e) => {
                debug!(service = %item.service, account = %item.account, error = %e, "Failed to store secret");
                false
            }
        }
    }

    fn get(&self, identifier: &str) -> Option<String> {
        let item = self.item(identifier);
        let entry = self.entry(&item)?;
        match entry.get_password() {
            Ok(secret) => Some(secret),
            Err(keyring::Error::NoEntry) => None,
            Err(e) => {
                debug!(service = %item.service, account = %item.account, error = %e, "Failed to read secret");
                None
            }
        }
    }

    fn remove(&self, identifier: &str) -> bool {
        let item = self.item(identifier);
        let Some(entry) = self.entry(&item) else {
            return false;
        };
        match entry.delete_credential() {
            Ok(()) => true,
            Err(e) => {
                debug!(service = %item.service, account = %item.account, error = %e, "Failed to delete secret");
                false
            }
        }
    }
}
