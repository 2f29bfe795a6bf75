//! Request and response records for the iGlobal order API.
//!
//! # Design
//! Each endpoint gets an explicit record instead of a generic JSON map.
//! Response records decode tolerantly: missing optional fields default and
//! unknown fields are kept in an `extra` map rather than failing the decode.

pub mod cart;
pub mod order;
pub mod query;
pub mod status;

pub use cart::{CartItem, TempCart};
pub use order::{OrderDetail, OrderItem, OrderNumbers, TempCartCreated};
pub use query::{DateFilter, OrderId, OrderLookup, OrderNumbersQuery, EPOCH_SINCE_DATE};
pub use status::{Actor, OrderStatus};
