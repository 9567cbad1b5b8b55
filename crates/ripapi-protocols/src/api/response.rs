//! API response types.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Status text used when a request never reached the server.
pub const NETWORK_ERROR_STATUS_TEXT: &str = "Network Error";

/// Response of an executed API request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse {
    pub status: u16,
    pub status_text: String,
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
    pub body: serde_json::Value,
    /// Response time in milliseconds.
    pub time_ms: f64,
    /// Response size in bytes.
    pub size: usize,
}

impl ApiResponse {
    /// Response for a request that failed before a status was received.
    pub fn network_error(message: impl Into<String>, time_ms: f64) -> Self {
        Self {
            status: 0,
            status_text: NETWORK_ERROR_STATUS_TEXT.to_string(),
            headers: BTreeMap::new(),
            body: serde_json::json!({ "error": message.into() }),
            time_ms,
            size: 0,
        }
    }

    pub fn is_network_error(&self) -> bool {
        self.status == 0
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}
