//! HTTP Transport
//!
//! Raw HTTP client interface and implementations.

use async_trait::async_trait;
use std::collections::{BTreeMap, VecDeque};
use std::error::Error as StdError;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use crate::core::request::{HttpMethod, PreparedRequest};
use crate::error::{ClientError, ClientResult};

/// Code reported when a request times out.
pub const URL_ERROR_TIMED_OUT: i32 = -1001;
/// Code reported when the host cannot be reached.
pub const URL_ERROR_CANNOT_CONNECT: i32 = -1004;
/// Code reported when redirect handling fails.
pub const URL_ERROR_REDIRECT: i32 = -1007;
/// Code reported for any other transport failure.
pub const URL_ERROR_UNKNOWN: i32 = -1;

/// HTTP response definition.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HttpResponse {
    /// HTTP status code. Zero when no status line was received.
    pub status: u16,
    /// Response headers (lowercased names).
    pub headers: BTreeMap<String, String>,
    /// Response body.
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Create a response with the given status and body.
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            headers: BTreeMap::new(),
            body: body.into(),
        }
    }

    /// Create a JSON response.
    pub fn json(status: u16, body: &serde_json::Value) -> Self {
        let mut response = Self::new(status, body.to_string());
        response
            .headers
            .insert("content-type".to_string(), "application/json".to_string());
        response
    }
}

/// HTTP transport interface (for dependency injection).
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Send a request and return whatever the server answered.
    ///
    /// Only transport-level failures are errors here; any status code is a
    /// successful round trip.
    async fn send(&self, request: &PreparedRequest) -> ClientResult<HttpResponse>;
}

/// Default reqwest-based HTTP transport.
#[derive(Clone)]
pub struct ReqwestHttpTransport {
    client: reqwest::Client,
}

impl ReqwestHttpTransport {
    /// Create new transport with default settings.
    pub fn new() -> ClientResult<Self> {
        Self::with_timeout(crate::types::DEFAULT_TIMEOUT)
    }

    /// Create transport with a request timeout.
    pub fn with_timeout(timeout: Duration) -> ClientResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| map_reqwest_error(&e))?;

        Ok(Self { client })
    }

    /// Use a caller-configured client (redirect policy, proxies, TLS).
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpTransport for ReqwestHttpTransport {
    async fn send(&self, request: &PreparedRequest) -> ClientResult<HttpResponse> {
        let method = match request.method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Patch => reqwest::Method::PATCH,
            HttpMethod::Delete => reqwest::Method::DELETE,
        };

        let mut req_builder = self.client.request(method, request.url.clone());

        for (key, value) in &request.headers {
            req_builder = req_builder.header(key, value);
        }

        if let Some(body) = &request.body {
            req_builder = req_builder.body(body.clone());
        }

        let response = req_builder
            .send()
            .await
            .map_err(|e| map_reqwest_error(&e))?;

        let status = response.status().as_u16();

        let mut headers = BTreeMap::new();
        for (key, value) in response.headers() {
            if let Ok(v) = value.to_str() {
                headers.insert(key.as_str().to_lowercase(), v.to_string());
            }
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| map_reqwest_error(&e))?
            .to_vec();

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

/// Translate a reqwest failure into [`ClientError::Url`].
///
/// Prefers the OS error code found in the source chain.
fn map_reqwest_error(error: &reqwest::Error) -> ClientError {
    let os_code = {
        let mut source: Option<&(dyn StdError + 'static)> = error.source();
        let mut found = None;
        while let Some(err) = source {
            if let Some(io) = err.downcast_ref::<std::io::Error>() {
                found = io.raw_os_error();
                break;
            }
            source = err.source();
        }
        found
    };

    let code = os_code.unwrap_or(if error.is_timeout() {
        URL_ERROR_TIMED_OUT
    } else if error.is_connect() {
        URL_ERROR_CANNOT_CONNECT
    } else if error.is_redirect() {
        URL_ERROR_REDIRECT
    } else {
        URL_ERROR_UNKNOWN
    });

    ClientError::Url {
        code,
        description: error.to_string(),
    }
}

/// Mock HTTP transport for testing. Responses are returned in the order
/// they were queued.
#[derive(Default)]
pub struct MockHttpTransport {
    responses: Mutex<VecDeque<ClientResult<HttpResponse>>>,
    request_history: Mutex<Vec<PreparedRequest>>,
    default_response: Mutex<Option<HttpResponse>>,
}

impl MockHttpTransport {
    /// Create new mock transport.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response to return.
    pub fn queue_response(&self, response: HttpResponse) -> &Self {
        self.lock_responses().push_back(Ok(response));
        self
    }

    /// Queue a JSON response.
    pub fn queue_json_response(&self, status: u16, body: serde_json::Value) -> &Self {
        self.queue_response(HttpResponse::json(status, &body))
    }

    /// Queue a transport-level failure.
    pub fn queue_error(&self, error: ClientError) -> &Self {
        self.lock_responses().push_back(Err(error));
        self
    }

    /// Set default response when queue is empty.
    pub fn set_default_response(&self, response: HttpResponse) -> &Self {
        *self
            .default_response
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(response);
        self
    }

    /// Get request history.
    pub fn get_requests(&self) -> Vec<PreparedRequest> {
        self.request_history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Get last request.
    pub fn get_last_request(&self) -> Option<PreparedRequest> {
        self.get_requests().pop()
    }

    fn lock_responses(&self) -> std::sync::MutexGuard<'_, VecDeque<ClientResult<HttpResponse>>> {
        self.responses.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl HttpTransport for MockHttpTransport {
    async fn send(&self, request: &PreparedRequest) -> ClientResult<HttpResponse> {
        self.request_history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request.clone());

        let queued = self.lock_responses().pop_front();
        match queued {
            Some(result) => result,
            None => self
                .default_response
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .clone()
                .ok_or_else(|| ClientError::Url {
                    code: URL_ERROR_CANNOT_CONNECT,
                    description: "No mock response available".to_string(),
                }),
        }
    }
}
