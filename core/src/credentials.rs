//! Store credentials sent with every request.
//!
//! # Design
//! The iGlobal API authenticates each call with a store id and a shared
//! secret embedded in the JSON body. Both are fixed at construction and never
//! change for the life of the client. The secret is kept out of `Debug`
//! output so clients can be logged freely.

use std::fmt;

use serde_json::{Map, Value};

use crate::error::ClientError;

#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    store_id: i64,
    secret_key: String,
}

impl Credentials {
    /// Create credentials from a store id and secret key.
    ///
    /// An empty secret is treated as missing.
    pub fn new(store_id: i64, secret_key: impl Into<String>) -> Result<Self, ClientError> {
        let secret_key = secret_key.into();
        if secret_key.is_empty() {
            return Err(ClientError::Configuration(
                "a store id and secret key are required to access the iGlobal REST API".to_string(),
            ));
        }
        Ok(Self {
            store_id,
            secret_key,
        })
    }

    /// Read credentials from a loosely-typed JSON mapping of the form
    /// `{"storeId": <integer>, "secretKey": <string>}`, such as a section of
    /// a host application's config file.
    pub fn from_value(value: &Value) -> Result<Self, ClientError> {
        let map = value.as_object().ok_or_else(|| {
            ClientError::Configuration("credentials must be a JSON object".to_string())
        })?;

        let store_id = match present(map, "storeId") {
            Some(v) => v.as_i64().ok_or_else(|| {
                ClientError::Configuration("storeId must be an integer".to_string())
            })?,
            None => {
                return Err(ClientError::Configuration(
                    "storeId is required to access the iGlobal REST API".to_string(),
                ))
            }
        };

        let secret_key = match present(map, "secretKey") {
            Some(v) => v.as_str().ok_or_else(|| {
                ClientError::Configuration("secretKey must be a string".to_string())
            })?,
            None => {
                return Err(ClientError::Configuration(
                    "secretKey is required to access the iGlobal REST API".to_string(),
                ))
            }
        };

        Self::new(store_id, secret_key)
    }

    pub fn store_id(&self) -> i64 {
        self.store_id
    }

    pub fn secret_key(&self) -> &str {
        &self.secret_key
    }

    /// Insert the `store` and `secret` authentication fields, replacing any
    /// values the caller may have put there.
    pub(crate) fn apply(&self, payload: &mut Map<String, Value>) {
        payload.insert("store".to_string(), Value::from(self.store_id));
        payload.insert("secret".to_string(), Value::from(self.secret_key.clone()));
    }
}

fn present<'a>(map: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    map.get(key).filter(|v| !v.is_null())
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("store_id", &self.store_id)
            .field("secret_key", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn new_accepts_store_zero() {
        let creds = Credentials::new(0, "secret key").unwrap();
        assert_eq!(creds.store_id(), 0);
        assert_eq!(creds.secret_key(), "secret key");
    }

    #[test]
    fn new_rejects_empty_secret() {
        let err = Credentials::new(12, "").unwrap_err();
        assert!(matches!(err, ClientError::Configuration(_)));
    }

    #[test]
    fn from_value_reads_both_fields() {
        let creds = Credentials::from_value(&json!({"storeId": 42, "secretKey": "s3"})).unwrap();
        assert_eq!(creds.store_id(), 42);
        assert_eq!(creds.secret_key(), "s3");
    }

    #[test]
    fn from_value_rejects_missing_fields() {
        for value in [
            json!({}),
            json!({"storeId": 42}),
            json!({"secretKey": "s3"}),
            json!({"storeId": null, "secretKey": "s3"}),
        ] {
            let err = Credentials::from_value(&value).unwrap_err();
            assert!(matches!(err, ClientError::Configuration(_)), "{value}");
        }
    }

    #[test]
    fn from_value_rejects_wrong_types() {
        for value in [
            json!({"storeId": "42", "secretKey": "s3"}),
            json!({"storeId": 4.2, "secretKey": "s3"}),
            json!({"storeId": 42, "secretKey": 7}),
            json!(["storeId", 42]),
        ] {
            let err = Credentials::from_value(&value).unwrap_err();
            assert!(matches!(err, ClientError::Configuration(_)), "{value}");
        }
    }

    #[test]
    fn apply_overwrites_caller_auth_fields() {
        let creds = Credentials::new(7, "real").unwrap();
        let mut payload = Map::new();
        payload.insert("secret".to_string(), json!("forged"));
        creds.apply(&mut payload);
        assert_eq!(payload["store"], 7);
        assert_eq!(payload["secret"], "real");
    }

    #[test]
    fn debug_redacts_secret() {
        let creds = Credentials::new(7, "hunter2").unwrap();
        let printed = format!("{creds:?}");
        assert!(printed.contains("store_id: 7"));
        assert!(!printed.contains("hunter2"));
    }
}
