use std::{collections::BTreeMap, sync::Arc};

use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::{info, warn};
use uuid::Uuid;

pub const PLATFORM_STATUSES: [&str; 4] = [
    "IGLOBAL_FRAUD_REVIEW",
    "IGLOBAL_ORDER_IN_PROCESS",
    "IGLOBAL_ORDER_ON_HOLD",
    "IGLOBAL_ORDER_CANCELLED",
];

pub const VENDOR_STATUSES: [&str; 5] = [
    "VENDOR_PREPARING_ORDER",
    "VENDOR_SHIPMENT_READY",
    "VENDOR_LABELS_PRINTED_DATE",
    "VENDOR_CANCELLATION_REQUEST",
    "VENDOR_END_OF_DAY_COMPLETE",
];

/// Date stamped on orders created from a temp cart.
pub const CHECKOUT_DATE: &str = "20240401";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: u64,
    /// `YYYYMMDD`, compared lexically.
    pub date: String,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merchant_order_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grand_total: Option<f64>,
    #[serde(default)]
    pub items: Vec<Value>,
}

pub struct Store {
    store_id: i64,
    secret_key: String,
    orders: BTreeMap<u64, Order>,
    next_id: u64,
}

impl Store {
    pub fn seeded(store_id: i64, secret_key: &str) -> Self {
        let orders = [
            Order {
                id: 1001,
                date: "20240105".to_string(),
                status: "VENDOR_END_OF_DAY_COMPLETE".to_string(),
                merchant_order_id: Some("M-1001".to_string()),
                reference_id: None,
                grand_total: Some(59.99),
                items: vec![json!({"description": "Desk lamp", "quantity": 1, "unitPrice": "59.99"})],
            },
            Order {
                id: 1002,
                date: "20240210".to_string(),
                status: "IGLOBAL_ORDER_IN_PROCESS".to_string(),
                merchant_order_id: None,
                reference_id: Some("cart-1002".to_string()),
                grand_total: Some(129.5),
                items: vec![json!({"description": "Rain jacket", "quantity": 1, "unitPrice": "129.50"})],
            },
            Order {
                id: 1003,
                date: "20240315".to_string(),
                status: "IGLOBAL_FRAUD_REVIEW".to_string(),
                merchant_order_id: None,
                reference_id: None,
                grand_total: Some(12.0),
                items: vec![json!({"description": "Sticker pack", "quantity": 4, "unitPrice": "3.00"})],
            },
        ]
        .into_iter()
        .map(|order| (order.id, order))
        .collect();

        Self {
            store_id,
            secret_key: secret_key.to_string(),
            orders,
            next_id: 1004,
        }
    }

    fn authorize(&self, body: &Value) -> Result<(), Failure> {
        let store_ok = body.get("store").and_then(Value::as_i64) == Some(self.store_id);
        let secret_ok = body.get("secret").and_then(Value::as_str) == Some(self.secret_key.as_str());
        if store_ok && secret_ok {
            Ok(())
        } else {
            Err(failure(StatusCode::UNAUTHORIZED, "invalid store or secret"))
        }
    }

    fn find(&self, body: &Value) -> Result<u64, Failure> {
        if let Some(id) = id_field(body, "orderId") {
            let id = parse_id(&id)?;
            return if self.orders.contains_key(&id) {
                Ok(id)
            } else {
                Err(failure(StatusCode::NOT_FOUND, format!("order {id} not found")))
            };
        }
        if let Some(reference) = str_field(body, "referenceId") {
            return self
                .orders
                .values()
                .find(|order| order.reference_id.as_deref() == Some(reference))
                .map(|order| order.id)
                .ok_or_else(|| failure(StatusCode::NOT_FOUND, format!("reference {reference} not found")));
        }
        Err(failure(StatusCode::BAD_REQUEST, "orderId or referenceId is required"))
    }
}

pub type Db = Arc<RwLock<Store>>;

type Failure = (StatusCode, Json<Value>);

type ApiResult = Result<Json<Value>, Failure>;

pub fn app(store_id: i64, secret_key: &str) -> Router {
    let db: Db = Arc::new(RwLock::new(Store::seeded(store_id, secret_key)));
    Router::new()
        .route("/v1/orderNumbers", post(order_numbers))
        .route("/v1/orderDetail", post(order_detail))
        .route("/v1/updateMerchantOrderId", post(update_merchant_order_id))
        .route("/v1/updateVendorOrderStatus", post(update_vendor_order_status))
        .route("/v1/createTempCart", post(create_temp_cart))
        .with_state(db)
}

pub async fn run(listener: TcpListener, store_id: i64, secret_key: &str) -> Result<(), std::io::Error> {
    axum::serve(listener, app(store_id, secret_key)).await
}

fn failure(status: StatusCode, message: impl Into<String>) -> Failure {
    let message = message.into();
    warn!(%status, %message, "rejecting request");
    (status, Json(json!({ "error": message })))
}

fn str_field<'a>(body: &'a Value, key: &str) -> Option<&'a str> {
    body.get(key).and_then(Value::as_str).filter(|s| !s.is_empty())
}

/// Ids arrive as strings from the client but may be numbers from other callers.
fn id_field(body: &Value, key: &str) -> Option<String> {
    match body.get(key)? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn parse_id(raw: &str) -> Result<u64, Failure> {
    raw.parse()
        .map_err(|_| failure(StatusCode::BAD_REQUEST, format!("malformed order id {raw:?}")))
}

async fn order_numbers(State(db): State<Db>, Json(body): Json<Value>) -> ApiResult {
    let store = db.read().await;
    store.authorize(&body)?;

    let orders: Vec<u64> = if let Some(since) = id_field(&body, "sinceOrderId") {
        let since = parse_id(&since)?;
        store.orders.keys().copied().filter(|id| *id > since).collect()
    } else if let Some(since) = str_field(&body, "sinceDate") {
        let through = str_field(&body, "throughDate");
        store
            .orders
            .values()
            .filter(|order| order.date.as_str() >= since)
            .filter(|order| through.map_or(true, |through| order.date.as_str() <= through))
            .map(|order| order.id)
            .collect()
    } else {
        return Err(failure(StatusCode::BAD_REQUEST, "sinceOrderId or sinceDate is required"));
    };

    Ok(Json(json!({ "orderCount": orders.len(), "orders": orders })))
}

async fn order_detail(State(db): State<Db>, Json(body): Json<Value>) -> ApiResult {
    let store = db.read().await;
    store.authorize(&body)?;
    let id = store.find(&body)?;
    Ok(Json(json!({ "order": store.orders[&id] })))
}

async fn update_merchant_order_id(State(db): State<Db>, Json(body): Json<Value>) -> ApiResult {
    let mut store = db.write().await;
    store.authorize(&body)?;
    let merchant_order_id = str_field(&body, "merchantOrderId")
        .ok_or_else(|| failure(StatusCode::BAD_REQUEST, "merchantOrderId is required"))?
        .to_string();
    let id = store.find(&json!({ "orderId": body.get("orderId") }))?;

    let order = store
        .orders
        .get_mut(&id)
        .ok_or_else(|| failure(StatusCode::NOT_FOUND, format!("order {id} not found")))?;
    order.merchant_order_id = Some(merchant_order_id);
    Ok(Json(json!({ "order": order })))
}

async fn update_vendor_order_status(State(db): State<Db>, Json(body): Json<Value>) -> ApiResult {
    let mut store = db.write().await;
    store.authorize(&body)?;
    let status = str_field(&body, "orderStatus")
        .ok_or_else(|| failure(StatusCode::BAD_REQUEST, "orderStatus is required"))?;
    if PLATFORM_STATUSES.contains(&status) {
        return Err(failure(
            StatusCode::BAD_REQUEST,
            format!("{status} can only be set by iGlobal"),
        ));
    }
    if !VENDOR_STATUSES.contains(&status) {
        return Err(failure(StatusCode::BAD_REQUEST, format!("unknown status {status}")));
    }
    let status = status.to_string();
    let id = store.find(&json!({ "orderId": body.get("orderId") }))?;

    let order = store
        .orders
        .get_mut(&id)
        .ok_or_else(|| failure(StatusCode::NOT_FOUND, format!("order {id} not found")))?;
    order.status = status;
    Ok(Json(json!({ "order": order })))
}

/// Completes checkout for the cart immediately, so the resulting order can be
/// looked up by the cart's `referenceId`.
async fn create_temp_cart(State(db): State<Db>, Json(body): Json<Value>) -> ApiResult {
    let mut store = db.write().await;
    store.authorize(&body)?;
    let items = match body.get("items") {
        Some(Value::Array(items)) if !items.is_empty() => items.clone(),
        _ => return Err(failure(StatusCode::BAD_REQUEST, "items is required")),
    };
    let uuid = Uuid::new_v4();
    let order = Order {
        id: store.next_id,
        date: CHECKOUT_DATE.to_string(),
        status: "IGLOBAL_ORDER_IN_PROCESS".to_string(),
        merchant_order_id: None,
        reference_id: str_field(&body, "referenceId").map(str::to_string),
        grand_total: None,
        items,
    };
    store.next_id += 1;
    info!(cart = %uuid, order = order.id, "temp cart created");
    store.orders.insert(order.id, order);

    Ok(Json(json!({ "tempCartUUID": uuid })))
}
