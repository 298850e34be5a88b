//! Response Classification
//!
//! Maps an HTTP status and body onto a decoded value or a [`ClientError`].

use serde::de::DeserializeOwned;

use crate::core::transport::HttpResponse;
use crate::error::{ClientError, ClientResult};

/// Classify a response and decode a 2xx body as JSON.
///
/// Date fields are expected as seconds since the Unix epoch. This crate
/// ships no date type; downstream models decode such fields with a serde
/// adapter of their own, e.g. `chrono::serde::ts_seconds`.
pub fn decode_response<T: DeserializeOwned>(response: HttpResponse) -> ClientResult<T> {
    match response.status {
        200..=299 => {
            if response.body.is_empty() {
                return Err(ClientError::EmptyResponseData);
            }
            serde_json::from_slice(&response.body).map_err(|e| ClientError::Decoding(e.to_string()))
        }
        401 => Err(ClientError::Unauthorized),
        402 => Err(ClientError::ClientEntity {
            body: response.body,
            code: 402,
        }),
        403 => Err(ClientError::Forbidden),
        404..=499 => Err(ClientError::ClientEntity {
            body: response.body,
            code: response.status,
        }),
        500..=599 => Err(ClientError::Backend(response.status)),
        100..=999 => Err(ClientError::UnexpectedStatusCode(response.status)),
        _ => Err(ClientError::NoResponse),
    }
}
