//! Client Error Types
//!
//! Closed error taxonomy shared by the request builder, the HTTP transport,
//! the secret store and the authentication flow.

use thiserror::Error;

/// Every failure the client can report.
///
/// The HTTP layer is the only place that translates raw transport and status
/// outcomes into these kinds; every other layer returns one of them or
/// forwards the one it received.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    #[error("Invalid URL")]
    InvalidUrl,

    #[error("No HTTP response")]
    NoResponse,

    #[error("Empty response data")]
    EmptyResponseData,

    #[error("Decoding error: {0}")]
    Decoding(String),

    #[error("Encoding error: {0}")]
    Encoding(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Forbidden")]
    Forbidden,

    #[error("Client error with status {code}")]
    ClientEntity { body: Vec<u8>, code: u16 },

    #[error("Backend error with status {0}")]
    Backend(u16),

    #[error("Unexpected status code {0}")]
    UnexpectedStatusCode(u16),

    #[error("URL error {code}: {description}")]
    Url { code: i32, description: String },

    #[error("Invalid data")]
    InvalidData,

    #[error("Login dismissed: {0}")]
    DismissLogin(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Unknown error")]
    Unknown,

    #[error("No internet connection")]
    NoInternet,
}

impl ClientError {
    /// Get error code for telemetry.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidUrl => "invalidURL",
            Self::NoResponse => "noResponse",
            Self::EmptyResponseData => "emptyResponseData",
            Self::Decoding(_) => "decodingError",
            Self::Encoding(_) => "encodingError",
            Self::Unauthorized => "unauthorized",
            Self::Forbidden => "forbidden",
            Self::ClientEntity { .. } => "clientEntityError",
            Self::Backend(_) => "backendError",
            Self::UnexpectedStatusCode(_) => "unexpectedStatusCode",
            Self::Url { .. } => "urlError",
            Self::InvalidData => "invalidData",
            Self::DismissLogin(_) => "dismissLogin",
            Self::Internal(_) => "internalError",
            Self::Unknown => "unknown",
            Self::NoInternet => "noInternet",
        }
    }

    /// Title shown to the user, as a localisation key.
    pub fn title(&self) -> String {
        format!("networkErrorTitle.{}", self.error_code())
    }

    /// Message shown to the user.
    pub fn message(&self) -> String {
        match self {
            Self::InvalidUrl
            | Self::NoResponse
            | Self::Unauthorized
            | Self::Forbidden
            | Self::Unknown
            | Self::NoInternet
            | Self::InvalidData => format!("networkErrorMessage.{}", self.error_code()),
            Self::Decoding(description) => format!("Decoding Error: {}", or_none(description)),
            Self::Encoding(description) => format!("JSON Conversion Failure -> {}", description),
            Self::Url { code, description } => format!(
                "URLError Description: {} || Code: {}",
                or_none(description),
                code
            ),
            Self::UnexpectedStatusCode(code) => format!("Unexpected Error with code: {}", code),
            Self::Backend(code) => format!("Backend Error with code: {}", code),
            Self::ClientEntity { code, .. } => format!("known error with code: {}", code),
            Self::EmptyResponseData => "Empty Response Data".to_string(),
            Self::DismissLogin(description) => format!("Dismiss Login {}", description),
            Self::Internal(message) => format!("Unexpected Error with code: {}", message),
        }
    }

    /// Check if the same request may succeed when sent again.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Url { .. } | Self::NoResponse | Self::NoInternet | Self::Backend(_)
        )
    }

    /// Check if error requires a fresh interactive login.
    pub fn needs_reauth(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }
}

fn or_none(description: &str) -> &str {
    if description.is_empty() {
        "No Description"
    } else {
        description
    }
}

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Title and message pair for a user-visible alert.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ErrorPresentation {
    pub title: String,
    pub message: String,
}

/// Derive the alert contents for an error.
pub fn present(error: &ClientError) -> ErrorPresentation {
    ErrorPresentation {
        title: error.title(),
        message: error.message(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_embed_payload() {
        assert_eq!(
            ClientError::Backend(503).message(),
            "Backend Error with code: 503"
        );
        assert_eq!(
            ClientError::Url {
                code: -1001,
                description: "timed out".to_string()
            }
            .message(),
            "URLError Description: timed out || Code: -1001"
        );
        assert_eq!(
            ClientError::Decoding(String::new()).message(),
            "Decoding Error: No Description"
        );
        assert_eq!(
            ClientError::ClientEntity {
                body: b"{}".to_vec(),
                code: 404
            }
            .message(),
            "known error with code: 404"
        );
    }

    #[test]
    fn test_payload_free_kinds_use_keys() {
        assert_eq!(
            ClientError::Unauthorized.message(),
            "networkErrorMessage.unauthorized"
        );
        assert_eq!(
            ClientError::InvalidData.title(),
            "networkErrorTitle.invalidData"
        );
    }

    #[test]
    fn test_present_is_pure() {
        let error = ClientError::DismissLogin("user cancelled".to_string());
        assert_eq!(present(&error), present(&error.clone()));
        assert_eq!(present(&error).message, "Dismiss Login user cancelled");
        assert_eq!(present(&error).title, "networkErrorTitle.dismissLogin");
    }

    #[test]
    fn test_error_is_retryable() {
        assert!(ClientError::Backend(500).is_retryable());
        assert!(ClientError::NoResponse.is_retryable());
        assert!(!ClientError::Forbidden.is_retryable());
        assert!(!ClientError::InvalidData.is_retryable());
    }

    #[test]
    fn test_needs_reauth() {
        assert!(ClientError::Unauthorized.needs_reauth());
        assert!(!ClientError::Backend(500).needs_reauth());
    }
}
