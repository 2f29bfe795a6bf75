//! Client configuration.
//!
//! The core reads no environment variables. `ClientConfig` is a plain serde
//! struct so a host can embed it in whatever config format it already uses.

use serde::{Deserialize, Serialize};

use crate::error::ClientError;
use crate::http::Endpoint;

pub const DEFAULT_BASE_URL: &str = "https://api.iglobalstores.com/v1";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClientConfig {
    /// Base URL that endpoint names are appended to.
    pub base_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn endpoint_url(&self, endpoint: Endpoint) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), endpoint.path())
    }

    pub(crate) fn validate(&self) -> Result<(), ClientError> {
        let url = self.base_url.trim();
        if !(url.starts_with("https://") || url.starts_with("http://")) {
            return Err(ClientError::Configuration(format!(
                "base URL must be an http(s) URL, got {:?}",
                self.base_url
            )));
        }
        Ok(())
    }
}
