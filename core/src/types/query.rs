//! Order filters and identifiers.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::error::ClientError;

/// `sinceDate` used to fetch every order ever placed.
pub const EPOCH_SINCE_DATE: &str = "20000101";

/// Date format expected by the API.
const API_DATE_FORMAT: &str = "%Y%m%d";

/// An iGlobal order id.
///
/// The API hands ids back as JSON numbers in some responses and as strings
/// such as `"123-1234"` in others. Both decode into the same value, compare
/// by their text, and go back on the wire in the form they came in.
#[derive(Debug, Clone)]
pub struct OrderId {
    text: String,
    number: Option<u64>,
}

impl OrderId {
    pub fn new(id: impl Into<String>) -> Self {
        OrderId {
            text: id.into(),
            number: None,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// The id as a JSON value: a number for numeric ids, a string otherwise.
    pub fn to_value(&self) -> Value {
        match self.number {
            Some(n) => Value::from(n),
            None => Value::from(self.text.as_str()),
        }
    }
}

impl PartialEq for OrderId {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text
    }
}

impl Eq for OrderId {}

impl Hash for OrderId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.text.hash(state);
    }
}

impl PartialOrd for OrderId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OrderId {
    fn cmp(&self, other: &Self) -> Ordering {
        self.text.cmp(&other.text)
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl From<&str> for OrderId {
    fn from(id: &str) -> Self {
        OrderId::new(id)
    }
}

impl From<String> for OrderId {
    fn from(id: String) -> Self {
        OrderId::new(id)
    }
}

impl From<u64> for OrderId {
    fn from(id: u64) -> Self {
        OrderId {
            text: id.to_string(),
            number: Some(id),
        }
    }
}

impl Serialize for OrderId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.number {
            Some(n) => serializer.serialize_u64(n),
            None => serializer.serialize_str(&self.text),
        }
    }
}

impl<'de> Deserialize<'de> for OrderId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Number(serde_json::Number),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Text(s) => OrderId::new(s),
            Raw::Number(n) => match n.as_u64() {
                Some(id) => OrderId::from(id),
                None => OrderId::new(n.to_string()),
            },
        })
    }
}

/// A date filter: either a calendar date or a string already in the API's
/// `YYYYMMDD` form, which is sent verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateFilter {
    Date(NaiveDate),
    Formatted(String),
}

impl DateFilter {
    pub fn to_api_string(&self) -> String {
        match self {
            DateFilter::Date(date) => date.format(API_DATE_FORMAT).to_string(),
            DateFilter::Formatted(s) => s.clone(),
        }
    }

    fn is_empty(&self) -> bool {
        matches!(self, DateFilter::Formatted(s) if s.is_empty())
    }
}

impl From<NaiveDate> for DateFilter {
    fn from(date: NaiveDate) -> Self {
        DateFilter::Date(date)
    }
}

impl From<&str> for DateFilter {
    fn from(s: &str) -> Self {
        DateFilter::Formatted(s.to_string())
    }
}

impl From<String> for DateFilter {
    fn from(s: String) -> Self {
        DateFilter::Formatted(s)
    }
}

/// Filter for `orderNumbers`.
///
/// Exactly one primary filter is sent. `since_order_id` wins when both are
/// set, and `through_date` only travels alongside `since_date`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderNumbersQuery {
    pub since_order_id: Option<OrderId>,
    pub since_date: Option<DateFilter>,
    pub through_date: Option<DateFilter>,
}

impl OrderNumbersQuery {
    pub fn since_order_id(id: impl Into<OrderId>) -> Self {
        Self {
            since_order_id: Some(id.into()),
            ..Self::default()
        }
    }

    pub fn since_date(date: impl Into<DateFilter>) -> Self {
        Self {
            since_date: Some(date.into()),
            ..Self::default()
        }
    }

    /// Every order since the platform's epoch.
    pub fn all() -> Self {
        Self::since_date(EPOCH_SINCE_DATE)
    }

    pub fn through(mut self, date: impl Into<DateFilter>) -> Self {
        self.through_date = Some(date.into());
        self
    }

    pub(crate) fn to_payload(&self) -> Result<Map<String, Value>, ClientError> {
        let mut payload = Map::new();
        match (&self.since_order_id, &self.since_date) {
            (Some(id), _) if !id.is_empty() => {
                payload.insert("sinceOrderId".to_string(), id.to_value());
            }
            (_, Some(since)) if !since.is_empty() => {
                payload.insert("sinceDate".to_string(), Value::from(since.to_api_string()));
                if let Some(through) = self.through_date.as_ref().filter(|d| !d.is_empty()) {
                    payload.insert("throughDate".to_string(), Value::from(through.to_api_string()));
                }
            }
            _ => {
                return Err(ClientError::validation(
                    "sinceOrderId",
                    "sinceOrderId or sinceDate is required",
                ))
            }
        }
        Ok(payload)
    }
}

/// Lookup key for `orderDetail`. `order_id` wins when both are set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderLookup {
    pub order_id: Option<OrderId>,
    pub reference_id: Option<String>,
}

impl OrderLookup {
    pub fn by_order_id(id: impl Into<OrderId>) -> Self {
        Self {
            order_id: Some(id.into()),
            reference_id: None,
        }
    }

    /// Look an order up by the `referenceId` passed to `createTempCart`.
    pub fn by_reference_id(reference_id: impl Into<String>) -> Self {
        Self {
            order_id: None,
            reference_id: Some(reference_id.into()),
        }
    }

    pub(crate) fn to_payload(&self) -> Result<Map<String, Value>, ClientError> {
        let mut payload = Map::new();
        match (&self.order_id, &self.reference_id) {
            (Some(id), _) if !id.is_empty() => {
                payload.insert("orderId".to_string(), id.to_value());
            }
            (_, Some(reference)) if !reference.is_empty() => {
                payload.insert("referenceId".to_string(), Value::from(reference.as_str()));
            }
            _ => {
                return Err(ClientError::validation(
                    "orderId",
                    "orderId or referenceId is required",
                ))
            }
        }
        Ok(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn order_id_decodes_numbers_and_strings() {
        let ids: Vec<OrderId> = serde_json::from_value(json!([1, "123-1234"])).unwrap();
        assert_eq!(ids, vec![OrderId::from(1u64), OrderId::from("123-1234")]);
        assert_eq!(serde_json::to_value(&ids[0]).unwrap(), json!(1));
        assert_eq!(serde_json::to_value(&ids[1]).unwrap(), json!("123-1234"));
        assert_eq!(OrderId::from(1u64), OrderId::from("1"));
    }

    #[test]
    fn date_filter_formats_native_dates() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
        assert_eq!(DateFilter::from(date).to_api_string(), "20240307");
        assert_eq!(DateFilter::from("20231231").to_api_string(), "20231231");
    }

    #[test]
    fn since_order_id_wins_and_drops_dates() {
        let query = OrderNumbersQuery {
            since_order_id: Some(OrderId::from("100")),
            since_date: Some(DateFilter::from("20240101")),
            through_date: Some(DateFilter::from("20240201")),
        };
        let payload = query.to_payload().unwrap();
        assert_eq!(Value::Object(payload), json!({"sinceOrderId": "100"}));
    }

    #[test]
    fn numeric_ids_stay_numeric_on_the_wire() {
        let payload = OrderNumbersQuery::since_order_id(1002u64).to_payload().unwrap();
        assert_eq!(Value::Object(payload), json!({"sinceOrderId": 1002}));

        let payload = OrderLookup::by_order_id(77u64).to_payload().unwrap();
        assert_eq!(Value::Object(payload), json!({"orderId": 77}));

        let payload = OrderNumbersQuery::since_order_id("1002").to_payload().unwrap();
        assert_eq!(Value::Object(payload), json!({"sinceOrderId": "1002"}));
    }

    #[test]
    fn since_date_carries_through_date() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let payload = OrderNumbersQuery::since_date(start)
            .through("20240131")
            .to_payload()
            .unwrap();
        assert_eq!(
            Value::Object(payload),
            json!({"sinceDate": "20240101", "throughDate": "20240131"})
        );
    }

    #[test]
    fn all_uses_epoch_sentinel() {
        let payload = OrderNumbersQuery::all().to_payload().unwrap();
        assert_eq!(payload["sinceDate"], EPOCH_SINCE_DATE);
        assert!(!payload.contains_key("throughDate"));
    }

    #[test]
    fn missing_primary_filter_is_rejected() {
        let err = OrderNumbersQuery::default().to_payload().unwrap_err();
        assert!(matches!(err, ClientError::Validation { .. }));

        let only_through = OrderNumbersQuery::default().through("20240131");
        assert!(only_through.to_payload().is_err());

        let empty_since = OrderNumbersQuery::since_date("");
        assert!(empty_since.to_payload().is_err());
    }

    #[test]
    fn lookup_prefers_order_id() {
        let lookup = OrderLookup {
            order_id: Some(OrderId::from("123-1234")),
            reference_id: Some("cart-ref".to_string()),
        };
        assert_eq!(
            Value::Object(lookup.to_payload().unwrap()),
            json!({"orderId": "123-1234"})
        );
        assert_eq!(
            Value::Object(OrderLookup::by_reference_id("cart-ref").to_payload().unwrap()),
            json!({"referenceId": "cart-ref"})
        );
    }

    #[test]
    fn lookup_without_keys_is_rejected() {
        assert!(OrderLookup::default().to_payload().is_err());
        assert!(OrderLookup::by_reference_id("").to_payload().is_err());
        assert!(OrderLookup::by_order_id("").to_payload().is_err());
    }
}
