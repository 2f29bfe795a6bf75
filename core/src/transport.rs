//! The transport collaborator.
//!
//! # Design
//! The client only needs "POST this JSON, give me status and body back".
//! `Transport` captures exactly that, so hosts can plug in any HTTP stack
//! (or a recording fake in tests). Implementations must return non-2xx
//! responses as `HttpResponse` values; only network-level failures become
//! `TransportError`.

use std::sync::Arc;

use thiserror::Error;

use crate::http::{HttpRequest, HttpResponse};

/// A network-level failure (DNS, refused connection, timeout, ...).
#[derive(Debug, Error)]
#[error("{0}")]
pub struct TransportError(#[source] Box<dyn std::error::Error + Send + Sync>);

impl TransportError {
    pub fn new(source: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        TransportError(source.into())
    }
}

/// Executes one request/response round-trip.
pub trait Transport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        (**self).execute(request)
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        (**self).execute(request)
    }
}

impl<T: Transport + ?Sized> Transport for Arc<T> {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        (**self).execute(request)
    }
}

/// Blocking transport backed by a `ureq` agent.
///
/// The agent is configured with `http_status_as_error(false)` so 4xx/5xx
/// responses come back as data and the client decides what they mean.
#[cfg(feature = "ureq")]
#[derive(Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

#[cfg(feature = "ureq")]
impl UreqTransport {
    pub fn new() -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }

    /// Wrap a caller-configured agent. The agent must not treat HTTP status
    /// codes as errors.
    pub fn with_agent(agent: ureq::Agent) -> Self {
        Self { agent }
    }
}

#[cfg(feature = "ureq")]
impl std::fmt::Debug for UreqTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UreqTransport").finish_non_exhaustive()
    }
}

#[cfg(feature = "ureq")]
impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "ureq")]
impl Transport for UreqTransport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut builder = self.agent.post(&request.url);
        for (key, value) in &request.headers {
            builder = builder.header(key.as_str(), value.as_str());
        }
        let mut response = builder
            .send(request.body.as_bytes())
            .map_err(TransportError::new)?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|value| (name.as_str().to_string(), value.to_string()))
            })
            .collect();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(TransportError::new)?;

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::Endpoint;

    struct Fixed(u16);

    impl Transport for Fixed {
        fn execute(&self, _request: &HttpRequest) -> Result<HttpResponse, TransportError> {
            Ok(HttpResponse::new(self.0, "{}"))
        }
    }

    fn request() -> HttpRequest {
        HttpRequest {
            endpoint: Endpoint::OrderNumbers,
            url: "http://localhost/v1/orderNumbers".to_string(),
            headers: Vec::new(),
            body: "{}".to_string(),
        }
    }

    #[test]
    fn smart_pointers_forward_to_inner_transport() {
        let boxed: Box<dyn Transport> = Box::new(Fixed(200));
        assert_eq!(boxed.execute(&request()).unwrap().status, 200);

        let shared = Arc::new(Fixed(503));
        assert_eq!((&shared).execute(&request()).unwrap().status, 503);
    }

    #[test]
    fn transport_error_keeps_message() {
        let err = TransportError::new("connection refused");
        assert_eq!(err.to_string(), "connection refused");
    }
}
