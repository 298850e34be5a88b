//! Callback Types
//!
//! Parameters carried by the redirect back to the application.

use url::Url;

/// Callback parameters from the authorization redirect.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CallbackParams {
    /// Authorization code (if success).
    pub code: Option<String>,
    /// Error code (if authorization failed).
    pub error: Option<String>,
    /// Error description.
    pub error_description: Option<String>,
}

impl CallbackParams {
    /// Parse callback parameters from URL. The first occurrence of each
    /// parameter wins.
    pub fn from_url(url: &Url) -> Self {
        let mut params = Self::default();

        for (key, value) in url.query_pairs() {
            let slot = match key.as_ref() {
                "code" => &mut params.code,
                "error" => &mut params.error,
                "error_description" => &mut params.error_description,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.into_owned());
            }
        }

        params
    }

    /// Parse callback parameters from URL string.
    pub fn from_url_str(url_str: &str) -> Result<Self, url::ParseError> {
        let url = Url::parse(url_str)?;
        Ok(Self::from_url(&url))
    }

    /// The authorization code, if present and non-empty.
    pub fn authorization_code(&self) -> Option<&str> {
        self.code.as_deref().filter(|code| !code.is_empty())
    }

    /// Check if callback contains an error.
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_callback_params_from_custom_scheme() {
        let params = CallbackParams::from_url_str("com.example://callback?code=abc123").unwrap();

        assert_eq!(params.authorization_code(), Some("abc123"));
        assert!(!params.is_error());
    }

    #[test]
    fn test_callback_params_error() {
        let params = CallbackParams::from_url_str(
            "com.example://callback?error=access_denied&error_description=User%20denied",
        )
        .unwrap();

        assert!(params.authorization_code().is_none());
        assert_eq!(params.error.as_deref(), Some("access_denied"));
        assert_eq!(params.error_description.as_deref(), Some("User denied"));
        assert!(params.is_error());
    }

    #[test]
    fn test_empty_code_is_absent() {
        let params = CallbackParams::from_url_str("com.example://callback?code=").unwrap();
        assert!(params.authorization_code().is_none());
    }

    #[test]
    fn test_first_code_wins() {
        let params =
            CallbackParams::from_url_str("com.example://callback?code=first&code=second").unwrap();
        assert_eq!(params.authorization_code(), Some("first"));
    }
}
