//! SOAP executor.

use async_trait::async_trait;
use tracing::debug;

use ripapi_protocols::api::{
    ApiProtocol, ApiRequest, ApiResponse, ProtocolKind, ValidationError, ValidationResult,
};
use ripapi_protocols::error::{ModuleError, ProtocolError};
use ripapi_protocols::module::{Module, ModuleManifest};
use ripapi_protocols::types::Version;

use crate::transport::{HttpTransport, TransportConfig, check_url, with_headers};

pub const MODULE_ID: &str = "api-soap";

const SOAP_CONTENT_TYPE: &str = "text/xml; charset=utf-8";

/// SOAP 1.1 protocol executor.
pub struct SoapProtocol {
    manifest: ModuleManifest,
    transport: HttpTransport,
}

impl SoapProtocol {
    pub fn new(config: TransportConfig) -> Self {
        Self {
            manifest: ModuleManifest::new(MODULE_ID, "SOAP Protocol", Version::new(1, 0, 0))
                .with_description("Executes SOAP requests with XML envelopes"),
            transport: HttpTransport::new(config),
        }
    }

    fn envelope(request: &ApiRequest) -> String {
        match &request.body {
            Some(serde_json::Value::String(xml)) => xml.clone(),
            Some(serde_json::Value::Null) | None => String::new(),
            Some(other) => other.to_string(),
        }
    }

    fn build(
        client: &reqwest::Client,
        request: &ApiRequest,
    ) -> Result<reqwest::RequestBuilder, ProtocolError> {
        let mut builder = with_headers(client.post(&request.url), request);
        if request.header("content-type").is_none() {
            builder = builder.header("Content-Type", SOAP_CONTENT_TYPE);
        }
        // SOAP 1.1 endpoints expect the header even when empty
        if request.header("soapaction").is_none() {
            builder = builder.header("SOAPAction", "\"\"");
        }
        Ok(builder.body(Self::envelope(request)))
    }
}

impl Default for SoapProtocol {
    fn default() -> Self {
        Self::new(TransportConfig::default())
    }
}

#[async_trait]
impl Module for SoapProtocol {
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
impl ApiProtocol for SoapProtocol {
    fn protocol(&self) -> ProtocolKind {
        ProtocolKind::Soap
    }

    async fn execute(&self, request: &ApiRequest) -> ApiResponse {
        debug!(
            "SOAP POST {} (action: {})",
            request.url,
            request.header("soapaction").unwrap_or("none")
        );
        self.transport
            .send(|client| Self::build(client, request))
            .await
    }

    async fn validate(&self, request: &ApiRequest) -> ValidationResult {
        let mut errors = Vec::new();
        check_url(request, &mut errors);
        if !request.has_body() {
            errors.push(ValidationError::new("body", "SOAP envelope is required"));
        }
        ValidationResult::from_errors(errors)
    }
}
