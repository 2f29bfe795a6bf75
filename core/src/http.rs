//! HTTP transport types for the host-does-IO pattern.
//!
//! # Design
//! Requests and responses are plain data. `OrderClient::build_*` methods
//! produce an `HttpRequest`, a `Transport` (or the host itself) executes it,
//! and `OrderClient::parse_*` methods consume the resulting `HttpResponse`.
//! Every iGlobal endpoint is a JSON `POST`, so a request always carries a body.

use std::fmt;

/// Remote operations exposed by the iGlobal order API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    OrderNumbers,
    OrderDetail,
    UpdateMerchantOrderId,
    UpdateVendorOrderStatus,
    CreateTempCart,
}

impl Endpoint {
    /// Path segment appended to the base URL.
    pub fn path(self) -> &'static str {
        match self {
            Endpoint::OrderNumbers => "orderNumbers",
            Endpoint::OrderDetail => "orderDetail",
            Endpoint::UpdateMerchantOrderId => "updateMerchantOrderId",
            Endpoint::UpdateVendorOrderStatus => "updateVendorOrderStatus",
            Endpoint::CreateTempCart => "createTempCart",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// A JSON `POST` request described as plain data.
///
/// The body already contains the `store` and `secret` authentication fields,
/// so this value should not be logged verbatim.
#[derive(Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub endpoint: Endpoint,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl fmt::Debug for HttpRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpRequest")
            .field("endpoint", &self.endpoint)
            .field("url", &self.url)
            .field("headers", &self.headers)
            .field("body", &"<redacted>")
            .finish()
    }
}

/// An HTTP response described as plain data.
///
/// Constructed by the transport after executing an `HttpRequest`, then passed
/// to `OrderClient::parse_*` methods. Non-2xx statuses are data here, never
/// transport errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: body.into(),
        }
    }
}
