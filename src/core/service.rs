//! Network Service
//!
//! Sends prepared requests, logs each request/response pair and decodes the
//! result into a typed value.

use serde::de::DeserializeOwned;
use std::sync::Arc;

use crate::core::request::{build_request, PreparedRequest, RequestModel};
use crate::core::response::decode_response;
use crate::core::transport::{HttpResponse, HttpTransport};
use crate::error::ClientResult;
use crate::telemetry::{LogContext, Logger, TracingLogger};

const REDACTED: &str = "[REDACTED]";

/// Typed request/response pipeline over an [`HttpTransport`].
pub struct NetworkService<T: HttpTransport> {
    transport: Arc<T>,
    logger: Arc<dyn Logger>,
}

impl<T: HttpTransport> Clone for NetworkService<T> {
    fn clone(&self) -> Self {
        Self {
            transport: self.transport.clone(),
            logger: self.logger.clone(),
        }
    }
}

impl<T: HttpTransport> NetworkService<T> {
    /// Create a service logging through `tracing`.
    pub fn new(transport: Arc<T>) -> Self {
        Self::with_logger(transport, Arc::new(TracingLogger))
    }

    /// Create a service with a custom observability hook.
    pub fn with_logger(transport: Arc<T>, logger: Arc<dyn Logger>) -> Self {
        Self { transport, logger }
    }

    /// Underlying transport.
    pub fn transport(&self) -> &Arc<T> {
        &self.transport
    }

    /// Observability hook.
    pub fn logger(&self) -> &Arc<dyn Logger> {
        &self.logger
    }

    /// Send a prepared request and decode the response into `R`.
    pub async fn send<R: DeserializeOwned>(&self, request: &PreparedRequest) -> ClientResult<R> {
        self.log_request(request);

        let response = match self.transport.send(request).await {
            Ok(response) => response,
            Err(error) => {
                self.logger.warn(
                    "Request failed",
                    &LogContext::new()
                        .operation("send_request")
                        .url(request.url.as_str())
                        .extra("error", error.to_string()),
                );
                return Err(error);
            }
        };

        self.log_response(request, &response);

        decode_response(response).map_err(|error| {
            self.logger.debug(
                "Response rejected",
                &LogContext::new()
                    .operation("decode_response")
                    .url(request.url.as_str())
                    .extra("error", error.error_code()),
            );
            error
        })
    }

    /// Build a request from its logical description and send it.
    pub async fn fetch<R: DeserializeOwned>(&self, model: &RequestModel) -> ClientResult<R> {
        let request = build_request(model)?;
        self.send(&request).await
    }

    fn log_request(&self, request: &PreparedRequest) {
        let mut context = LogContext::new()
            .operation("send_request")
            .url(request.url.as_str())
            .extra("method", request.method.as_str());
        if let Some(body) = &request.body {
            context = context.extra("body", body_for_log(body, request.sensitive));
        }
        self.logger.debug("URL Request", &context);
    }

    fn log_response(&self, request: &PreparedRequest, response: &HttpResponse) {
        let context = LogContext::new()
            .operation("receive_response")
            .url(request.url.as_str())
            .status(response.status)
            .extra("body", body_for_log(&response.body, request.sensitive));
        self.logger.debug("Response", &context);
    }
}

fn body_for_log(body: &[u8], sensitive: bool) -> String {
    if sensitive {
        REDACTED.to_string()
    } else {
        String::from_utf8_lossy(body).into_owned()
    }
}
