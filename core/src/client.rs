//! Request builder, transport step and response parser for the iGlobal order API.
//!
//! # Design
//! Every operation is split into a `build_*` method that validates input and
//! produces an `HttpRequest`, and a `parse_*` method that consumes an
//! `HttpResponse`. Both halves are pure; hosts that want to own the I/O can
//! call them directly. The composed methods (`list_order_numbers`,
//! `get_order_details`, ...) run build, then the `Transport`, then parse.
//!
//! Validation always happens inside `build_*`, so a rejected call never
//! reaches the transport.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::credentials::Credentials;
use crate::error::ClientError;
use crate::http::{Endpoint, HttpRequest, HttpResponse};
use crate::transport::Transport;
#[cfg(feature = "ureq")]
use crate::transport::UreqTransport;
use crate::types::order::{order_from_body, OrderEnvelope};
use crate::types::{
    OrderDetail, OrderId, OrderLookup, OrderNumbers, OrderNumbersQuery, OrderStatus, TempCart,
    TempCartCreated,
};

/// Synchronous client for the iGlobal order-management API.
///
/// Holds only immutable state, so it can be shared across threads whenever
/// the transport can.
#[derive(Debug, Clone)]
pub struct OrderClient<T> {
    credentials: Credentials,
    config: ClientConfig,
    transport: T,
}

impl<T> OrderClient<T> {
    /// Client pointed at the public iGlobal API.
    pub fn new(credentials: Credentials, transport: T) -> Self {
        Self {
            credentials,
            config: ClientConfig::default(),
            transport,
        }
    }

    pub fn with_config(
        credentials: Credentials,
        config: ClientConfig,
        transport: T,
    ) -> Result<Self, ClientError> {
        config.validate()?;
        Ok(Self {
            credentials,
            config,
            transport,
        })
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn build_order_numbers(&self, query: &OrderNumbersQuery) -> Result<HttpRequest, ClientError> {
        let payload = query.to_payload()?;
        self.build_request(Endpoint::OrderNumbers, payload)
    }

    pub fn build_all_orders(&self) -> Result<HttpRequest, ClientError> {
        self.build_order_numbers(&OrderNumbersQuery::all())
    }

    pub fn build_order_detail(&self, lookup: &OrderLookup) -> Result<HttpRequest, ClientError> {
        let payload = lookup.to_payload()?;
        self.build_request(Endpoint::OrderDetail, payload)
    }

    pub fn build_update_merchant_order_id(
        &self,
        order_id: &OrderId,
        merchant_order_id: &str,
    ) -> Result<HttpRequest, ClientError> {
        let mut payload = order_id_payload(order_id)?;
        if merchant_order_id.is_empty() {
            return Err(ClientError::validation("merchantOrderId", "is required"));
        }
        payload.insert("merchantOrderId".to_string(), Value::from(merchant_order_id));
        self.build_request(Endpoint::UpdateMerchantOrderId, payload)
    }

    pub fn build_update_vendor_order_status(
        &self,
        order_id: &OrderId,
        status: OrderStatus,
    ) -> Result<HttpRequest, ClientError> {
        let mut payload = order_id_payload(order_id)?;
        payload.insert("orderStatus".to_string(), Value::from(status.as_str()));
        self.build_request(Endpoint::UpdateVendorOrderStatus, payload)
    }

    pub fn build_create_temp_cart(&self, cart: &TempCart) -> Result<HttpRequest, ClientError> {
        let payload = cart.to_payload()?;
        self.build_request(Endpoint::CreateTempCart, payload)
    }

    pub fn parse_order_numbers(&self, response: HttpResponse) -> Result<OrderNumbers, ClientError> {
        decode(Endpoint::OrderNumbers, &response)
    }

    /// Unwraps the `{"order": {...}}` envelope.
    pub fn parse_order_detail(&self, response: HttpResponse) -> Result<OrderDetail, ClientError> {
        let body = decode(Endpoint::OrderDetail, &response)?;
        order_from_body(body, OrderEnvelope::Wrapped)
    }

    pub fn parse_update_merchant_order_id(
        &self,
        response: HttpResponse,
    ) -> Result<OrderDetail, ClientError> {
        let body = decode(Endpoint::UpdateMerchantOrderId, &response)?;
        order_from_body(body, OrderEnvelope::WrappedOrBare)
    }

    pub fn parse_update_vendor_order_status(
        &self,
        response: HttpResponse,
    ) -> Result<OrderDetail, ClientError> {
        let body = decode(Endpoint::UpdateVendorOrderStatus, &response)?;
        order_from_body(body, OrderEnvelope::WrappedOrBare)
    }

    pub fn parse_create_temp_cart(
        &self,
        response: HttpResponse,
    ) -> Result<TempCartCreated, ClientError> {
        decode(Endpoint::CreateTempCart, &response)
    }

    fn build_request(
        &self,
        endpoint: Endpoint,
        mut payload: Map<String, Value>,
    ) -> Result<HttpRequest, ClientError> {
        self.credentials.apply(&mut payload);
        let body = serde_json::to_string(&payload)
            .map_err(|e| ClientError::SerializationError(e.to_string()))?;
        Ok(HttpRequest {
            endpoint,
            url: self.config.endpoint_url(endpoint),
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body,
        })
    }
}

impl<T: Transport> OrderClient<T> {
    /// Order numbers matching `query`, in the order the API returned them.
    pub fn list_order_numbers(&self, query: &OrderNumbersQuery) -> Result<OrderNumbers, ClientError> {
        let request = self.build_order_numbers(query)?;
        let response = self.send(request)?;
        self.parse_order_numbers(response)
    }

    /// Every order ever placed with the store.
    pub fn list_all_orders(&self) -> Result<OrderNumbers, ClientError> {
        let request = self.build_all_orders()?;
        let response = self.send(request)?;
        self.parse_order_numbers(response)
    }

    pub fn get_order_details(&self, lookup: &OrderLookup) -> Result<OrderDetail, ClientError> {
        let request = self.build_order_detail(lookup)?;
        let response = self.send(request)?;
        self.parse_order_detail(response)
    }

    pub fn update_merchant_order_id(
        &self,
        order_id: impl Into<OrderId>,
        merchant_order_id: &str,
    ) -> Result<OrderDetail, ClientError> {
        let request = self.build_update_merchant_order_id(&order_id.into(), merchant_order_id)?;
        let response = self.send(request)?;
        self.parse_update_merchant_order_id(response)
    }

    /// Callers holding a status string should parse it with
    /// `OrderStatus::from_str`, which rejects unknown values locally.
    pub fn update_vendor_order_status(
        &self,
        order_id: impl Into<OrderId>,
        status: OrderStatus,
    ) -> Result<OrderDetail, ClientError> {
        let request = self.build_update_vendor_order_status(&order_id.into(), status)?;
        let response = self.send(request)?;
        self.parse_update_vendor_order_status(response)
    }

    /// Validate a loosely-typed cart payload and submit it.
    pub fn create_temp_cart(&self, cart: &Value) -> Result<TempCartCreated, ClientError> {
        let cart = TempCart::from_value(cart)?;
        self.submit_temp_cart(&cart)
    }

    pub fn submit_temp_cart(&self, cart: &TempCart) -> Result<TempCartCreated, ClientError> {
        let request = self.build_create_temp_cart(cart)?;
        let response = self.send(request)?;
        self.parse_create_temp_cart(response)
    }

    fn send(&self, request: HttpRequest) -> Result<HttpResponse, ClientError> {
        debug!(
            endpoint = %request.endpoint,
            store = self.credentials.store_id(),
            "sending iGlobal request"
        );
        let response = self.transport.execute(&request)?;
        debug!(endpoint = %request.endpoint, status = response.status, "received iGlobal response");
        Ok(response)
    }
}

#[cfg(feature = "ureq")]
impl OrderClient<UreqTransport> {
    /// Client using a blocking `ureq` agent against the public API.
    pub fn with_default_transport(credentials: Credentials) -> Self {
        Self::new(credentials, UreqTransport::new())
    }
}

fn order_id_payload(order_id: &OrderId) -> Result<Map<String, Value>, ClientError> {
    if order_id.is_empty() {
        return Err(ClientError::validation("orderId", "is required"));
    }
    let mut payload = Map::new();
    payload.insert("orderId".to_string(), order_id.to_value());
    Ok(payload)
}

/// Anything but 200 is surfaced as `RemoteApi` with the body verbatim.
fn check_status(endpoint: Endpoint, response: &HttpResponse) -> Result<(), ClientError> {
    if response.status == 200 {
        return Ok(());
    }
    warn!(%endpoint, status = response.status, "iGlobal API returned an error");
    Err(ClientError::RemoteApi {
        status: response.status,
        body: response.body.clone(),
    })
}

fn decode<D: DeserializeOwned>(endpoint: Endpoint, response: &HttpResponse) -> Result<D, ClientError> {
    check_status(endpoint, response)?;
    serde_json::from_str(&response.body).map_err(|e| ClientError::DeserializationError(e.to_string()))
}
