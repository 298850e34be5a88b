//! Request Builder
//!
//! Turns a logical request description into a transport-ready request.

use std::collections::BTreeMap;
use url::Url;

use crate::error::{ClientError, ClientResult};

/// HTTP method.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

/// Logical description of an outgoing HTTP call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RequestModel {
    /// Base URL; the path is appended verbatim.
    pub base_url: String,
    /// Path relative to the base URL (may be empty).
    pub path: String,
    /// HTTP method.
    pub method: HttpMethod,
    /// Request headers.
    pub headers: BTreeMap<String, String>,
    /// Request body.
    pub body: Option<Vec<u8>>,
}

impl RequestModel {
    /// Create a request with no headers and no body.
    pub fn new(base_url: impl Into<String>, path: impl Into<String>, method: HttpMethod) -> Self {
        Self {
            base_url: base_url.into(),
            path: path.into(),
            method,
            headers: BTreeMap::new(),
            body: None,
        }
    }

    /// Add a header.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Attach a body.
    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Attach a JSON-serialized body.
    pub fn with_json_body<T: serde::Serialize>(self, body: &T) -> ClientResult<Self> {
        let bytes = serde_json::to_vec(body).map_err(|e| ClientError::Encoding(e.to_string()))?;
        Ok(self.with_body(bytes))
    }

    /// Add `Authorization: Bearer <token>`.
    pub fn with_bearer_token(self, token: &str) -> Self {
        self.with_header("Authorization", format!("Bearer {}", token))
    }
}

/// Fully resolved request ready for the transport.
#[derive(Clone, PartialEq, Eq)]
pub struct PreparedRequest {
    /// HTTP method.
    pub method: HttpMethod,
    /// Absolute request URL.
    pub url: Url,
    /// Request headers, exactly as supplied by the caller.
    pub headers: BTreeMap<String, String>,
    /// Request body.
    pub body: Option<Vec<u8>>,
    /// Whether bodies must be kept out of logs.
    pub sensitive: bool,
}

impl PreparedRequest {
    /// Mark the request as carrying secrets.
    pub fn sensitive(mut self) -> Self {
        self.sensitive = true;
        self
    }
}

impl std::fmt::Debug for PreparedRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let body = match (&self.body, self.sensitive) {
            (None, _) => "None".to_string(),
            (Some(_), true) => "[REDACTED]".to_string(),
            (Some(body), false) => String::from_utf8_lossy(body).into_owned(),
        };
        f.debug_struct("PreparedRequest")
            .field("method", &self.method)
            .field("url", &self.url.as_str())
            .field("headers", &self.headers)
            .field("body", &body)
            .finish()
    }
}

/// Build a transport-ready request.
///
/// Fails with [`ClientError::InvalidUrl`] when `base_url + path` is not an
/// absolute URL.
pub fn build_request(model: &RequestModel) -> ClientResult<PreparedRequest> {
    let url = parse_absolute(&format!("{}{}", model.base_url, model.path))?;

    Ok(PreparedRequest {
        method: model.method,
        url,
        headers: model.headers.clone(),
        body: model.body.clone(),
        sensitive: false,
    })
}

pub(crate) fn parse_absolute(raw: &str) -> ClientResult<Url> {
    let url = Url::parse(raw).map_err(|_| ClientError::InvalidUrl)?;
    if url.cannot_be_a_base() {
        return Err(ClientError::InvalidUrl);
    }
    Ok(url)
}
