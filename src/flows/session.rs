//! Browser Session
//!
//! The interactive, user-driven authorization step. The host presents the
//! authorization URL and hands the callback URL back when the provider
//! redirects to the registered scheme.

use async_trait::async_trait;
use futures::channel::oneshot;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};
use thiserror::Error;
use url::Url;

/// Why a browser session ended without a callback URL.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("The user canceled the login")]
    Cancelled,

    #[error("{0}")]
    Failed(String),
}

/// Interactive browser session interface.
#[async_trait]
pub trait BrowserSession: Send + Sync {
    /// Present `url` and wait for a redirect to `callback_scheme`.
    ///
    /// Resolves exactly once: with the callback URL, a user cancel, or an
    /// error.
    async fn authenticate(&self, url: Url, callback_scheme: &str) -> Result<Url, SessionError>;
}

type Opener = Box<dyn Fn(&Url) -> Result<(), String> + Send + Sync>;

struct Pending {
    attempt: u64,
    scheme: String,
    sender: oneshot::Sender<Result<Url, SessionError>>,
}

/// Clears the pending entry of one attempt when its future ends or is
/// dropped.
struct PendingGuard<'a> {
    session: &'a ChannelBrowserSession,
    attempt: u64,
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        let mut pending = self.session.lock();
        if pending.as_ref().is_some_and(|p| p.attempt == self.attempt) {
            pending.take();
        }
    }
}

/// Browser session resolved through a oneshot channel.
///
/// `authenticate` opens the URL with the injected opener and suspends until
/// the host calls [`complete`](Self::complete), [`cancel`](Self::cancel) or
/// [`fail`](Self::fail).
pub struct ChannelBrowserSession {
    opener: Opener,
    pending: Mutex<Option<Pending>>,
    next_attempt: AtomicU64,
}

impl ChannelBrowserSession {
    /// Create a session that opens URLs with `opener`.
    pub fn new<F>(opener: F) -> Self
    where
        F: Fn(&Url) -> Result<(), String> + Send + Sync + 'static,
    {
        Self {
            opener: Box::new(opener),
            pending: Mutex::new(None),
            next_attempt: AtomicU64::new(0),
        }
    }

    /// Check whether a session is waiting for its callback.
    pub fn is_pending(&self) -> bool {
        self.lock().is_some()
    }

    /// Deliver the callback URL. Returns `false` when no session is waiting
    /// or the URL does not use the expected scheme.
    pub fn complete(&self, callback: Url) -> bool {
        let mut pending = self.lock();
        match pending.as_ref() {
            Some(p) if p.scheme.eq_ignore_ascii_case(callback.scheme()) => {}
            _ => return false,
        }
        match pending.take() {
            Some(p) => p.sender.send(Ok(callback)).is_ok(),
            None => false,
        }
    }

    /// Report that the user dismissed the session.
    pub fn cancel(&self) -> bool {
        self.resolve(Err(SessionError::Cancelled))
    }

    /// Report that the session failed.
    pub fn fail(&self, description: impl Into<String>) -> bool {
        self.resolve(Err(SessionError::Failed(description.into())))
    }

    fn resolve(&self, outcome: Result<Url, SessionError>) -> bool {
        match self.lock().take() {
            Some(p) => p.sender.send(outcome).is_ok(),
            None => false,
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Option<Pending>> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl BrowserSession for ChannelBrowserSession {
    async fn authenticate(&self, url: Url, callback_scheme: &str) -> Result<Url, SessionError> {
        let (sender, receiver) = oneshot::channel();
        let attempt = self.next_attempt.fetch_add(1, Ordering::Relaxed);
        {
            let mut pending = self.lock();
            if pending.is_some() {
                return Err(SessionError::Failed(
                    "an authentication session is already presented".to_string(),
                ));
            }
            *pending = Some(Pending {
                attempt,
                scheme: callback_scheme.to_string(),
                sender,
            });
        }
        let _guard = PendingGuard {
            session: self,
            attempt,
        };

        (self.opener)(&url).map_err(SessionError::Failed)?;

        // A dropped sender means the host tore the session down.
        receiver.await.unwrap_or(Err(SessionError::Cancelled))
    }
}

/// Mock browser session for testing. Outcomes are returned in the order
/// they were queued.
#[derive(Default)]
pub struct MockBrowserSession {
    outcomes: Mutex<VecDeque<Result<Url, SessionError>>>,
    history: Mutex<Vec<(Url, String)>>,
}

impl MockBrowserSession {
    /// Create new mock session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a redirect to `callback`.
    pub fn queue_callback(&self, callback: &str) -> &Self {
        let outcome = Url::parse(callback)
            .map_err(|e| SessionError::Failed(format!("invalid mock callback: {}", e)));
        self.queue_outcome(outcome)
    }

    /// Queue an arbitrary outcome.
    pub fn queue_outcome(&self, outcome: Result<Url, SessionError>) -> &Self {
        self.outcomes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(outcome);
        self
    }

    /// Get the (url, scheme) pairs presented so far.
    pub fn get_history(&self) -> Vec<(Url, String)> {
        self.history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl BrowserSession for MockBrowserSession {
    async fn authenticate(&self, url: Url, callback_scheme: &str) -> Result<Url, SessionError> {
        self.history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((url, callback_scheme.to_string()));

        let outcome = self
            .outcomes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front();
        outcome.unwrap_or(Err(SessionError::Cancelled))
    }
}
