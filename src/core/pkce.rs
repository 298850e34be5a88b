//! PKCE Generator
//!
//! RFC 7636 Proof Key for Code Exchange, S256 method only.

use base64::Engine;
use rand::rngs::OsRng;
use rand::RngCore;
use secrecy::{ExposeSecret, SecretString};
use sha2::{Digest, Sha256};
use std::sync::{Mutex, PoisonError};

/// Verifier/challenge pair for one authorization attempt.
#[derive(Clone)]
pub struct PkcePair {
    verifier: SecretString,
    challenge: String,
}

impl PkcePair {
    /// Build a pair from a verifier, deriving the challenge.
    pub fn from_verifier(verifier: impl Into<String>) -> Self {
        let verifier = verifier.into();
        let challenge = compute_challenge(&verifier);
        Self {
            verifier: SecretString::new(verifier),
            challenge,
        }
    }

    /// Code verifier. Keep out of logs.
    pub fn verifier(&self) -> &str {
        self.verifier.expose_secret()
    }

    /// Code challenge sent with the authorization request.
    pub fn challenge(&self) -> &str {
        &self.challenge
    }

    /// Challenge method.
    pub fn method(&self) -> &'static str {
        "S256"
    }
}

impl std::fmt::Debug for PkcePair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PkcePair")
            .field("verifier", &"[REDACTED]")
            .field("challenge", &self.challenge)
            .finish()
    }
}

/// `BASE64URL-NOPAD(SHA256(ASCII(verifier)))`.
pub fn compute_challenge(verifier: &str) -> String {
    let hash = Sha256::digest(verifier.as_bytes());
    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(hash)
}

/// PKCE generator interface (for dependency injection).
pub trait PkceGenerator: Send + Sync {
    /// Generate a fresh pair.
    fn generate(&self) -> PkcePair;
}

/// Default PKCE generator backed by the operating system's CSPRNG.
pub struct DefaultPkceGenerator {
    random_bytes: usize,
}

impl DefaultPkceGenerator {
    /// Create new PKCE generator producing 64-character verifiers.
    pub fn new() -> Self {
        Self { random_bytes: 48 }
    }

    /// Create a generator drawing `random_bytes` bytes per verifier.
    ///
    /// Returns `None` when the encoded verifier would fall outside the
    /// 43..=128 characters allowed by RFC 7636 (32..=96 bytes).
    pub fn with_random_bytes(random_bytes: usize) -> Option<Self> {
        (32..=96)
            .contains(&random_bytes)
            .then_some(Self { random_bytes })
    }

    fn generate_verifier(&self) -> String {
        let mut bytes = vec![0u8; self.random_bytes];
        OsRng.fill_bytes(&mut bytes);
        base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(&bytes)
    }
}

impl Default for DefaultPkceGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl PkceGenerator for DefaultPkceGenerator {
    fn generate(&self) -> PkcePair {
        PkcePair::from_verifier(self.generate_verifier())
    }
}

/// Mock PKCE generator for testing.
#[derive(Default)]
pub struct MockPkceGenerator {
    next_verifier: Mutex<Option<String>>,
    generate_history: Mutex<Vec<PkcePair>>,
}

impl MockPkceGenerator {
    /// Create new mock PKCE generator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the next verifier to generate.
    pub fn set_next_verifier(&self, verifier: impl Into<String>) -> &Self {
        *self
            .next_verifier
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(verifier.into());
        self
    }

    /// Get generate history.
    pub fn get_generate_history(&self) -> Vec<PkcePair> {
        self.generate_history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl PkceGenerator for MockPkceGenerator {
    fn generate(&self) -> PkcePair {
        let pair = match self
            .next_verifier
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
        {
            Some(verifier) => PkcePair::from_verifier(verifier),
            None => DefaultPkceGenerator::new().generate(),
        };

        self.generate_history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(pair.clone());
        pair
    }
}

/// Validate PKCE verifier format.
pub fn is_valid_verifier(verifier: &str) -> bool {
    if !(43..=128).contains(&verifier.len()) {
        return false;
    }

    // unreserved characters only: ALPHA / DIGIT / "-" / "." / "_" / "~"
    verifier
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '.' || c == '_' || c == '~')
}
