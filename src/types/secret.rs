//! Secret Types
//!
//! Typed description of one secret-store operation.

use secrecy::SecretString;

/// When a stored secret may be read.
///
/// Mirrors the protection classes offered by mobile keychains. Backends that
/// cannot enforce a class store it alongside the item and rely on the
/// operating system's own protection.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Accessibility {
    /// Readable while the device is unlocked.
    WhenUnlocked,
    /// Readable once the device has been unlocked after boot.
    AfterFirstUnlock,
    /// Readable while unlocked, only when a passcode is set, never migrated.
    #[default]
    WhenPasscodeSetThisDeviceOnly,
}

impl Accessibility {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::WhenUnlocked => "when_unlocked",
            Self::AfterFirstUnlock => "after_first_unlock",
            Self::WhenPasscodeSetThisDeviceOnly => "when_passcode_set_this_device_only",
        }
    }
}

/// One secret-store entry.
#[derive(Clone)]
pub struct SecretItem {
    /// Application or service identity the entry is scoped to.
    pub service: String,
    /// Caller-chosen identifier.
    pub account: String,
    /// Protection level.
    pub accessibility: Accessibility,
    /// Secret value (absent for lookups and removals).
    pub payload: Option<SecretString>,
}

impl SecretItem {
    /// Describe a lookup or removal.
    pub fn query(service: impl Into<String>, account: impl Into<String>) -> Self {
        Self {
            service: service.into(),
            account: account.into(),
            accessibility: Accessibility::default(),
            payload: None,
        }
    }

    /// Set the protection level.
    pub fn with_accessibility(mut self, accessibility: Accessibility) -> Self {
        self.accessibility = accessibility;
        self
    }

    /// Attach the value to write.
    pub fn with_payload(mut self, value: impl Into<String>) -> Self {
        self.payload = Some(SecretString::new(value.into()));
        self
    }
}

impl std::fmt::Debug for SecretItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecretItem")
            .field("service", &self.service)
            .field("account", &self.account)
            .field("accessibility", &self.accessibility)
            .field("payload", &self.payload.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}
