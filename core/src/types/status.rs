//! Order status vocabulary.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ClientError;

/// Who is allowed to move an order into a given status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Actor {
    /// The iGlobal platform itself.
    Platform,
    Vendor,
}

/// The closed set of order statuses known to the iGlobal API.
///
/// The remote system owns transition rules; the client only guarantees that
/// the string it sends is one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
    /// Under fraud review by iGlobal.
    #[serde(rename = "IGLOBAL_FRAUD_REVIEW")]
    FraudReview,
    /// Valid and ready for processing.
    #[serde(rename = "IGLOBAL_ORDER_IN_PROCESS")]
    InProcess,
    /// On a temporary status hold.
    #[serde(rename = "IGLOBAL_ORDER_ON_HOLD")]
    OnHold,
    /// Cancelled in the iGlobal system.
    #[serde(rename = "IGLOBAL_ORDER_CANCELLED")]
    Cancelled,
    /// The vendor is preparing the order.
    #[serde(rename = "VENDOR_PREPARING_ORDER")]
    VendorPreparing,
    /// The vendor has marked the order ready for shipping.
    #[serde(rename = "VENDOR_SHIPMENT_READY")]
    VendorShipmentReady,
    /// The vendor has printed shipping labels.
    #[serde(rename = "VENDOR_LABELS_PRINTED_DATE")]
    VendorLabelsPrinted,
    /// The vendor has requested cancellation.
    #[serde(rename = "VENDOR_CANCELLATION_REQUEST")]
    VendorCancellationRequest,
    /// Finalized and complete.
    #[serde(rename = "VENDOR_END_OF_DAY_COMPLETE")]
    VendorEndOfDayComplete,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 9] = [
        OrderStatus::FraudReview,
        OrderStatus::InProcess,
        OrderStatus::OnHold,
        OrderStatus::Cancelled,
        OrderStatus::VendorPreparing,
        OrderStatus::VendorShipmentReady,
        OrderStatus::VendorLabelsPrinted,
        OrderStatus::VendorCancellationRequest,
        OrderStatus::VendorEndOfDayComplete,
    ];

    /// Wire string sent to and received from the API.
    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::FraudReview => "IGLOBAL_FRAUD_REVIEW",
            OrderStatus::InProcess => "IGLOBAL_ORDER_IN_PROCESS",
            OrderStatus::OnHold => "IGLOBAL_ORDER_ON_HOLD",
            OrderStatus::Cancelled => "IGLOBAL_ORDER_CANCELLED",
            OrderStatus::VendorPreparing => "VENDOR_PREPARING_ORDER",
            OrderStatus::VendorShipmentReady => "VENDOR_SHIPMENT_READY",
            OrderStatus::VendorLabelsPrinted => "VENDOR_LABELS_PRINTED_DATE",
            OrderStatus::VendorCancellationRequest => "VENDOR_CANCELLATION_REQUEST",
            OrderStatus::VendorEndOfDayComplete => "VENDOR_END_OF_DAY_COMPLETE",
        }
    }

    pub fn settable_by(self) -> Actor {
        match self {
            OrderStatus::FraudReview
            | OrderStatus::InProcess
            | OrderStatus::OnHold
            | OrderStatus::Cancelled => Actor::Platform,
            _ => Actor::Vendor,
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(ClientError::validation("status", "is required"));
        }
        OrderStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| ClientError::validation("status", format!("unknown order status {s:?}")))
    }
}
