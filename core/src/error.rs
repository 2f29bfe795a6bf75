//! Error types for the iGlobal order client.
//!
//! # Design
//! `Validation` errors are raised while building a request, before the
//! transport is touched, so they never leave a half-sent call behind. Every
//! non-200 response lands in `RemoteApi` with the raw status code and body.
//! Network failures pass through untouched as `Transport`.

use thiserror::Error;

use crate::transport::TransportError;

/// Errors returned by `OrderClient` and the types it validates.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Missing or malformed credentials or client configuration.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A caller-supplied argument broke a documented precondition.
    #[error("invalid `{field}`: {message}")]
    Validation { field: String, message: String },

    /// The iGlobal API answered with a status other than 200.
    #[error("iGlobal API error {status}: {body}")]
    RemoteApi { status: u16, body: String },

    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),

    /// The response body could not be deserialized into the expected record.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),
}

impl ClientError {
    pub(crate) fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        ClientError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Name of the offending field for `Validation` errors.
    pub fn field(&self) -> Option<&str> {
        match self {
            ClientError::Validation { field, .. } => Some(field.as_str()),
            _ => None,
        }
    }

    /// HTTP status for `RemoteApi` errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::RemoteApi { status, .. } => Some(*status),
            _ => None,
        }
    }
}
