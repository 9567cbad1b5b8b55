//! GraphQL executor.

use async_trait::async_trait;
use serde_json::{Value, json};
use tracing::debug;

use ripapi_protocols::api::{
    ApiProtocol, ApiRequest, ApiResponse, ProtocolKind, ValidationError, ValidationResult,
};
use ripapi_protocols::error::{ModuleError, ProtocolError};
use ripapi_protocols::module::{Module, ModuleManifest};
use ripapi_protocols::types::Version;

use crate::transport::{HttpTransport, TransportConfig, check_url, with_headers};

pub const MODULE_ID: &str = "api-graphql";

/// GraphQL protocol executor. Queries are always POSTed as JSON.
pub struct GraphQLProtocol {
    manifest: ModuleManifest,
    transport: HttpTransport,
}

impl GraphQLProtocol {
    pub fn new(config: TransportConfig) -> Self {
        Self {
            manifest: ModuleManifest::new(MODULE_ID, "GraphQL Protocol", Version::new(1, 0, 0))
                .with_description("Executes GraphQL queries and mutations"),
            transport: HttpTransport::new(config),
        }
    }

    /// `{query, variables}` document. An object body is taken as the document itself.
    fn payload(request: &ApiRequest) -> Value {
        let variables = request
            .variables
            .clone()
            .map(Value::Object)
            .unwrap_or_else(|| json!({}));

        match &request.body {
            Some(Value::Object(doc)) => {
                let mut doc = doc.clone();
                doc.entry("variables").or_insert(variables);
                Value::Object(doc)
            }
            _ => json!({
                "query": request.body_str().unwrap_or_default(),
                "variables": variables,
            }),
        }
    }

    fn build(
        client: &reqwest::Client,
        request: &ApiRequest,
    ) -> Result<reqwest::RequestBuilder, ProtocolError> {
        let body = serde_json::to_vec(&Self::payload(request))?;
        let mut builder = with_headers(client.post(&request.url), request);
        if request.header("content-type").is_none() {
            builder = builder.header("Content-Type", "application/json");
        }
        Ok(builder.body(body))
    }
}

impl Default for GraphQLProtocol {
    fn default() -> Self {
        Self::new(TransportConfig::default())
    }
}

#[async_trait]
impl Module for GraphQLProtocol {
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
impl ApiProtocol for GraphQLProtocol {
    fn protocol(&self) -> ProtocolKind {
        ProtocolKind::Graphql
    }

    async fn execute(&self, request: &ApiRequest) -> ApiResponse {
        debug!("GraphQL POST {}", request.url);
        self.transport
            .send(|client| Self::build(client, request))
            .await
    }

    async fn validate(&self, request: &ApiRequest) -> ValidationResult {
        let mut errors = Vec::new();
        check_url(request, &mut errors);
        if !request.has_body() {
            errors.push(ValidationError::new("body", "GraphQL query is required"));
        }
        ValidationResult::from_errors(errors)
    }
}
