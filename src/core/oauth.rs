//! OAuth Request Builders
//!
//! Authorization URL and token-exchange request for the authorization code
//! grant.

use secrecy::ExposeSecret;
use url::Url;

use crate::core::request::{parse_absolute, HttpMethod, PreparedRequest};
use crate::error::ClientResult;
use crate::types::OAuthConfig;

/// Build the URL presented in the interactive browser session.
pub fn build_authorization_url(config: &OAuthConfig, challenge: &str) -> ClientResult<Url> {
    let mut url = parse_absolute(&config.provider.authorization_endpoint)?;

    url.query_pairs_mut()
        .clear()
        .append_pair("client_id", &config.credentials.client_id)
        .append_pair("redirect_uri", &config.redirect_uri)
        .append_pair("response_type", "code")
        .append_pair("scope", &config.scope_string())
        .append_pair("code_challenge_method", "S256")
        .append_pair("code_challenge", challenge);

    Ok(url)
}

/// Form-url-encoded token-exchange body. `code` is omitted when absent.
pub fn build_token_exchange_body(config: &OAuthConfig, code: Option<&str>) -> Vec<u8> {
    let mut form = url::form_urlencoded::Serializer::new(String::new());
    form.append_pair("client_id", &config.credentials.client_id)
        .append_pair(
            "client_secret",
            config.credentials.client_secret.expose_secret(),
        )
        .append_pair("redirect_uri", &config.redirect_uri);

    if let Some(code) = code {
        form.append_pair("code", code);
    }

    form.finish().into_bytes()
}

/// POST request to the token endpoint, marked sensitive.
pub fn build_token_request(config: &OAuthConfig, code: Option<&str>) -> ClientResult<PreparedRequest> {
    let url = parse_absolute(&config.provider.token_endpoint)?;

    let headers = [
        ("Content-Type", "application/x-www-form-urlencoded"),
        ("Accept", "application/json"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect();

    Ok(PreparedRequest {
        method: HttpMethod::Post,
        url,
        headers,
        body: Some(build_token_exchange_body(config, code)),
        sensitive: true,
    })
}
