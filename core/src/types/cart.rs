//! Temp cart payloads for `createTempCart`.
//!
//! # Design
//! Callers may hand the client a loosely-typed JSON cart, so `TempCart::from_value`
//! runs an explicit schema pass over it before anything is sent. Monetary
//! amounts must arrive as exact decimal strings (`"12.50"`); JSON numbers are
//! floating-point and are refused rather than silently rounded. Fields the
//! client does not model (sku, weight, referenceId, ...) are carried through
//! untouched.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::ClientError;

/// Fractional digits of every unit price on the wire.
const PRICE_SCALE: u32 = 2;

/// Item keys owned by the validated fields.
const ITEM_KEYS: [&str; 3] = ["description", "quantity", "unitPrice"];

/// Cart keys owned by the validated fields.
const CART_KEYS: [&str; 1] = ["items"];

fn extra_field(
    reserved: &[&str],
    key: String,
    value: Value,
    extra: &mut Map<String, Value>,
) -> Result<(), ClientError> {
    if reserved.contains(&key.as_str()) {
        return Err(ClientError::validation(key, "is set by the constructor"));
    }
    extra.insert(key, value);
    Ok(())
}

/// One line of a temp cart.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    description: String,
    quantity: u32,
    unit_price: Decimal,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl CartItem {
    pub fn new(
        description: impl Into<String>,
        quantity: u32,
        unit_price: Decimal,
    ) -> Result<Self, ClientError> {
        Self::checked("item", description.into(), quantity, unit_price, Map::new())
    }

    /// Attach an extra item field such as `sku` or `weight`.
    ///
    /// `description`, `quantity` and `unitPrice` are refused; they only come
    /// from [`CartItem::new`].
    pub fn with_field(
        mut self,
        key: impl Into<String>,
        value: impl Into<Value>,
    ) -> Result<Self, ClientError> {
        extra_field(&ITEM_KEYS, key.into(), value.into(), &mut self.extra)?;
        Ok(self)
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Unit price, always carrying exactly two fractional digits.
    pub fn unit_price(&self) -> Decimal {
        self.unit_price
    }

    fn checked(
        path: &str,
        description: String,
        quantity: u32,
        unit_price: Decimal,
        extra: Map<String, Value>,
    ) -> Result<Self, ClientError> {
        if description.is_empty() {
            return Err(ClientError::validation(format!("{path}.description"), "is required"));
        }
        if quantity == 0 {
            return Err(ClientError::validation(
                format!("{path}.quantity"),
                "must be a positive integer",
            ));
        }
        let unit_price = checked_price(path, unit_price)?;
        Ok(Self {
            description,
            quantity,
            unit_price,
            extra,
        })
    }

    fn from_value(path: &str, value: &Value) -> Result<Self, ClientError> {
        let map = value
            .as_object()
            .ok_or_else(|| ClientError::validation(path, "must be an object"))?;

        let description = match present(map, "description") {
            None => return Err(ClientError::validation(format!("{path}.description"), "is required")),
            Some(Value::String(s)) if s.is_empty() => {
                return Err(ClientError::validation(format!("{path}.description"), "is required"))
            }
            Some(Value::String(s)) => s.clone(),
            Some(_) => {
                return Err(ClientError::validation(format!("{path}.description"), "must be a string"))
            }
        };

        let quantity = match present(map, "quantity") {
            None => return Err(ClientError::validation(format!("{path}.quantity"), "is required")),
            Some(Value::Number(n)) => n
                .as_u64()
                .and_then(|q| u32::try_from(q).ok())
                .ok_or_else(|| {
                    ClientError::validation(format!("{path}.quantity"), "must be a positive integer")
                })?,
            Some(_) => {
                return Err(ClientError::validation(format!("{path}.quantity"), "must be an integer"))
            }
        };

        let unit_price = match present(map, "unitPrice") {
            None => return Err(ClientError::validation(format!("{path}.unitPrice"), "is required")),
            Some(Value::String(s)) => Decimal::from_str(s).map_err(|_| {
                ClientError::validation(
                    format!("{path}.unitPrice"),
                    format!("{s:?} is not a decimal amount"),
                )
            })?,
            Some(Value::Number(_)) => {
                return Err(ClientError::validation(
                    format!("{path}.unitPrice"),
                    "must be an exact decimal string such as \"1.00\", not a floating-point number",
                ))
            }
            Some(_) => {
                return Err(ClientError::validation(
                    format!("{path}.unitPrice"),
                    "must be a decimal string",
                ))
            }
        };

        let extra = map
            .iter()
            .filter(|(key, _)| !ITEM_KEYS.contains(&key.as_str()))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();

        Self::checked(path, description, quantity, unit_price, extra)
    }
}

fn checked_price(path: &str, price: Decimal) -> Result<Decimal, ClientError> {
    let field = format!("{path}.unitPrice");
    if price.scale() > PRICE_SCALE {
        return Err(ClientError::validation(field, "must have at most two decimal places"));
    }
    if price <= Decimal::ZERO {
        return Err(ClientError::validation(field, "must be greater than zero"));
    }
    let mut price = price;
    price.rescale(PRICE_SCALE);
    Ok(price)
}

fn present<'a>(map: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    map.get(key).filter(|v| !v.is_null())
}

/// A validated cart ready for `createTempCart`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TempCart {
    items: Vec<CartItem>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl TempCart {
    pub fn new(items: Vec<CartItem>) -> Result<Self, ClientError> {
        if items.is_empty() {
            return Err(ClientError::validation("items", "is required"));
        }
        Ok(Self {
            items,
            extra: Map::new(),
        })
    }

    /// Attach a top-level cart field such as `referenceId`. `items` is refused.
    pub fn with_field(
        mut self,
        key: impl Into<String>,
        value: impl Into<Value>,
    ) -> Result<Self, ClientError> {
        extra_field(&CART_KEYS, key.into(), value.into(), &mut self.extra)?;
        Ok(self)
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn field(&self, key: &str) -> Option<&Value> {
        self.extra.get(key)
    }

    /// Validate a loosely-typed cart payload.
    ///
    /// The error names the first offending field, e.g. `items[1].unitPrice`.
    pub fn from_value(value: &Value) -> Result<Self, ClientError> {
        let map = value
            .as_object()
            .ok_or_else(|| ClientError::validation("cart", "must be a JSON object"))?;

        let items = match present(map, "items") {
            None => return Err(ClientError::validation("items", "is required")),
            Some(Value::Array(items)) if items.is_empty() => {
                return Err(ClientError::validation("items", "is required"))
            }
            Some(Value::Array(items)) => items
                .iter()
                .enumerate()
                .map(|(i, item)| CartItem::from_value(&format!("items[{i}]"), item))
                .collect::<Result<Vec<_>, _>>()?,
            Some(_) => {
                return Err(ClientError::validation("items", "must contain a list of objects"))
            }
        };

        let extra = map
            .iter()
            .filter(|(key, _)| !CART_KEYS.contains(&key.as_str()))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();

        Ok(Self { items, extra })
    }

    pub(crate) fn to_payload(&self) -> Result<Map<String, Value>, ClientError> {
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(_) => Err(ClientError::SerializationError(
                "temp cart did not serialize to an object".to_string(),
            )),
            Err(e) => Err(ClientError::SerializationError(e.to_string())),
        }
    }
}
