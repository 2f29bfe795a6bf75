//! Response records.

use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::{Map, Value};
use uuid::Uuid;

use super::query::OrderId;
use crate::error::ClientError;
use super::status::OrderStatus;

/// Result of `orderNumbers`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OrderNumbers {
    pub order_count: u64,
    /// Order ids in the order the API returned them.
    pub orders: Vec<OrderId>,
}

/// A line item on a placed order.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OrderItem {
    pub description: Option<String>,
    pub quantity: Option<u64>,
    pub unit_price: Option<Decimal>,
    pub sku: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// An order record as returned by `orderDetail` and the update endpoints.
///
/// Only the commonly used fields are modelled; everything else the API sends
/// is available by name through [`OrderDetail::get`].
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OrderDetail {
    pub id: Option<OrderId>,
    pub merchant_order_id: Option<String>,
    pub reference_id: Option<String>,
    /// Raw status string; see [`OrderDetail::known_status`].
    pub status: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub country_code: Option<String>,
    pub grand_total: Option<Decimal>,
    pub items: Vec<OrderItem>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl OrderDetail {
    /// An unmodelled field by its API name.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.extra.get(key)
    }

    /// The status, if present and one of the known values.
    pub fn known_status(&self) -> Option<OrderStatus> {
        self.status.as_deref().and_then(|s| s.parse().ok())
    }
}

/// Result of `createTempCart`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TempCartCreated {
    #[serde(rename = "tempCartUUID", alias = "tempCartUuid")]
    pub temp_cart_uuid: Uuid,
}

/// Where an order record sits in a response body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum OrderEnvelope {
    /// `{"order": {...}}` only.
    Wrapped,
    /// `{"order": {...}}`, or the record itself as the top-level object.
    WrappedOrBare,
}

/// Pulls the order record out of a decoded response body.
///
/// A present `order` key is always decoded strictly: a malformed record is an
/// error, never an empty `OrderDetail`.
pub(crate) fn order_from_body(
    body: Value,
    envelope: OrderEnvelope,
) -> Result<OrderDetail, ClientError> {
    let mut map = match body {
        Value::Object(map) => map,
        other => {
            return Err(ClientError::DeserializationError(format!(
                "expected an order object, found {other}"
            )))
        }
    };
    let record = match map.remove("order") {
        Some(order) => order,
        None if envelope == OrderEnvelope::Wrapped => {
            return Err(ClientError::DeserializationError(
                "response has no `order` object".to_string(),
            ))
        }
        None if map.is_empty() => {
            return Err(ClientError::DeserializationError(
                "response has no order record".to_string(),
            ))
        }
        None => Value::Object(map),
    };
    serde_json::from_value(record).map_err(|e| ClientError::DeserializationError(e.to_string()))
}
