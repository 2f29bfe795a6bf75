//! Synchronous client for the iGlobal Stores order-management REST API.
//!
//! # Overview
//! Validates caller input, maps it onto the API's fixed set of endpoints
//! (`orderNumbers`, `orderDetail`, `updateMerchantOrderId`,
//! `updateVendorOrderStatus`, `createTempCart`) and decodes responses into
//! typed records.
//!
//! # Design
//! - `OrderClient` holds only immutable credentials, config and a transport.
//! - Each operation is split into `build_*` (produces request) and `parse_*`
//!   (consumes response); the composed methods run both around a `Transport`.
//! - Authentication is the store id and secret embedded in every JSON body.
//! - Validation runs before any request exists, so rejected calls never
//!   touch the network.
//! - A blocking `ureq` transport ships behind the default `ureq` feature.

pub mod client;
pub mod config;
pub mod credentials;
pub mod error;
pub mod http;
pub mod transport;
pub mod types;

pub use client::OrderClient;
pub use config::{ClientConfig, DEFAULT_BASE_URL};
pub use credentials::Credentials;
pub use error::ClientError;
pub use http::{Endpoint, HttpRequest, HttpResponse};
#[cfg(feature = "ureq")]
pub use transport::UreqTransport;
pub use transport::{Transport, TransportError};
pub use types::{
    Actor, CartItem, DateFilter, OrderDetail, OrderId, OrderItem, OrderLookup, OrderNumbers,
    OrderNumbersQuery, OrderStatus, TempCart, TempCartCreated, EPOCH_SINCE_DATE,
};
