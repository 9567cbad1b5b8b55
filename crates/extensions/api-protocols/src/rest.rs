//! REST executor.

use async_trait::async_trait;
use reqwest::Method;
use tracing::debug;

use ripapi_protocols::api::{
    ApiProtocol, ApiRequest, ApiResponse, ProtocolKind, ValidationError, ValidationResult,
};
use ripapi_protocols::error::{ModuleError, ProtocolError};
use ripapi_protocols::module::{Module, ModuleManifest};
use ripapi_protocols::types::Version;

use crate::transport::{HttpTransport, TransportConfig, check_url, parse_method, with_headers};

pub const MODULE_ID: &str = "api-rest";

const SUPPORTED_METHODS: &[&str] = &["GET", "POST", "PUT", "PATCH", "DELETE", "HEAD", "OPTIONS"];

/// REST API protocol executor.
pub struct RestProtocol {
    manifest: ModuleManifest,
    transport: HttpTransport,
}

impl RestProtocol {
    pub fn new(config: TransportConfig) -> Self {
        Self {
            manifest: ModuleManifest::new(MODULE_ID, "REST API Protocol", Version::new(1, 0, 0))
                .with_description("Executes REST API requests over HTTP"),
            transport: HttpTransport::new(config),
        }
    }

    fn build(
        client: &reqwest::Client,
        request: &ApiRequest,
    ) -> Result<reqwest::RequestBuilder, ProtocolError> {
        let method = parse_method(request.method.as_deref().unwrap_or("GET"))?;
        let sends_body = matches!(method, Method::POST | Method::PUT | Method::PATCH);
        let mut builder = with_headers(client.request(method, &request.url), request);

        if sends_body && request.has_body() {
            builder = match &request.body {
                Some(serde_json::Value::String(text)) => builder.body(text.clone()),
                Some(value) => {
                    let payload = serde_json::to_vec(value)?;
                    if request.header("content-type").is_none() {
                        builder = builder.header("Content-Type", "application/json");
                    }
                    builder.body(payload)
                }
                None => builder,
            };
        }
        Ok(builder)
    }
}

impl Default for RestProtocol {
    fn default() -> Self {
        Self::new(TransportConfig::default())
    }
}

#[async_trait]
impl Module for RestProtocol {
    fn manifest(&self) -> &ModuleManifest {
        &self.manifest
    }

    async fn init(&self) -> Result<(), ModuleError> {
        self.transport.start()
    }

    async fn destroy(&self) -> Result<(), ModuleError> {
        self.transport.stop();
        Ok(())
    }
}

#[async_trait]
impl ApiProtocol for RestProtocol {
    fn protocol(&self) -> ProtocolKind {
        ProtocolKind::Rest
    }

    async fn execute(&self, request: &ApiRequest) -> ApiResponse {
        debug!(
            "REST {} {}",
            request.method.as_deref().unwrap_or("GET"),
            request.url
        );
        self.transport
            .send(|client| Self::build(client, request))
            .await
    }

    async fn validate(&self, request: &ApiRequest) -> ValidationResult {
        let mut errors = Vec::new();
        check_url(request, &mut errors);

        if let Some(method) = &request.method {
            let upper = method.trim().to_ascii_uppercase();
            if !SUPPORTED_METHODS.contains(&upper.as_str()) {
                errors.push(ValidationError::new(
                    "method",
                    format!("Unsupported HTTP method: {}", method),
                ));
            }
        }

        ValidationResult::from_errors(errors)
    }
}

#[cfg(test)]
#[path = "rest_tests.rs"]
mod tests;
