//! Shared HTTP transport for protocol executors.

use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use parking_lot::RwLock;
use tracing::debug;

use ripapi_protocols::api::{ApiRequest, ApiResponse, ValidationError};
use ripapi_protocols::error::{ModuleError, ProtocolError};

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Client settings applied when the transport starts.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: concat!("ripapi/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Owns the HTTP client between a module's `init` and `destroy`.
pub struct HttpTransport {
    config: TransportConfig,
    client: RwLock<Option<reqwest::Client>>,
}

impl HttpTransport {
    pub fn new(config: TransportConfig) -> Self {
        Self {
            config,
            client: RwLock::new(None),
        }
    }

    pub fn config(&self) -> &TransportConfig {
        &self.config
    }

    /// Build the client. Called from `Module::init`.
    pub fn start(&self) -> Result<(), ModuleError> {
        let client = reqwest::Client::builder()
            .timeout(self.config.timeout)
            .user_agent(self.config.user_agent.as_str())
            .build()
            .map_err(|e| ModuleError::InitializationFailed(e.to_string()))?;
        *self.client.write() = Some(client);
        Ok(())
    }

    /// Drop the client. Called from `Module::destroy`.
    pub fn stop(&self) {
        self.client.write().take();
    }

    pub fn is_ready(&self) -> bool {
        self.client.read().is_some()
    }

    /// Build and send a request, folding every failure into a network-error response.
    pub async fn send<F>(&self, build: F) -> ApiResponse
    where
        F: FnOnce(&reqwest::Client) -> Result<reqwest::RequestBuilder, ProtocolError>,
    {
        let Some(client) = self.client.read().clone() else {
            return ApiResponse::network_error(ProtocolError::NotInitialized.to_string(), 0.0);
        };

        let started = Instant::now();
        let builder = match build(&client) {
            Ok(builder) => builder,
            Err(e) => return failed(e, started),
        };

        match builder.send().await {
            Ok(response) => read_response(response, started).await,
            Err(e) => failed(ProtocolError::Network(e.to_string()), started),
        }
    }
}

/// Parse a method name, case-insensitively.
pub(crate) fn parse_method(method: &str) -> Result<reqwest::Method, ProtocolError> {
    reqwest::Method::from_bytes(method.trim().to_ascii_uppercase().as_bytes())
        .map_err(|_| ProtocolError::InvalidRequest(format!("Invalid HTTP method: {}", method)))
}

/// Apply request headers (and auth) to a builder.
pub(crate) fn with_headers(
    mut builder: reqwest::RequestBuilder,
    request: &ApiRequest,
) -> reqwest::RequestBuilder {
    for (name, value) in crate::auth::request_headers(request) {
        builder = builder.header(name, value);
    }
    builder
}

/// URL presence and syntax check shared by all executors.
pub(crate) fn check_url(request: &ApiRequest, errors: &mut Vec<ValidationError>) {
    if request.url.trim().is_empty() {
        errors.push(ValidationError::new("url", "URL is required"));
    } else if url::Url::parse(&request.url).is_err() {
        errors.push(ValidationError::new("url", "Invalid URL format"));
    }
}

async fn read_response(response: reqwest::Response, started: Instant) -> ApiResponse {
    let status = response.status();
    let headers: BTreeMap<String, String> = response
        .headers()
        .iter()
        .map(|(name, value)| {
            (
                name.as_str().to_string(),
                String::from_utf8_lossy(value.as_bytes()).into_owned(),
            )
        })
        .collect();
    let content_type = headers
        .get("content-type")
        .map(|v| v.to_ascii_lowercase())
        .unwrap_or_default();

    let bytes = match response.bytes().await {
        Ok(bytes) => bytes,
        Err(e) => return failed(ProtocolError::Network(e.to_string()), started),
    };

    ApiResponse {
        status: status.as_u16(),
        status_text: status.canonical_reason().unwrap_or_default().to_string(),
        headers,
        body: parse_body(&content_type, &bytes),
        time_ms: elapsed_ms(started),
        size: bytes.len(),
    }
}

/// JSON content types are parsed; anything else is kept as text.
fn parse_body(content_type: &str, bytes: &[u8]) -> serde_json::Value {
    if content_type.contains("json") {
        if let Ok(value) = serde_json::from_slice(bytes) {
            return value;
        }
    }
    serde_json::Value::String(String::from_utf8_lossy(bytes).into_owned())
}

fn failed(err: ProtocolError, started: Instant) -> ApiResponse {
    debug!("Request failed: {}", err);
    ApiResponse::network_error(err.to_string(), elapsed_ms(started))
}

fn elapsed_ms(started: Instant) -> f64 {
    started.elapsed().as_secs_f64() * 1000.0
}

#[cfg(test)]
#[path = "transport_tests.rs"]
mod tests;
