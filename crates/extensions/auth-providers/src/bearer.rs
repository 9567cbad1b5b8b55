//! Bearer token pass-through provider.

use async_trait::async_trait;
use tracing::debug;

use ripapi_protocols::auth::{AuthProvider, AuthResult};
use ripapi_protocols::error::{AuthError, ModuleError};
use ripapi_protocols::module::{Module, ModuleManifest};
use ripapi_protocols::types::Version;

pub const MODULE_ID: &str = "auth-bearer";

/// Accepts any non-empty bearer token. Tokens are issued elsewhere.
pub struct BearerAuthProvider {
    manifest: ModuleManifest,
}

impl BearerAuthProvider {
    pub fn new() -> Self {
        Self {
            manifest: ModuleManifest::new(
                MODULE_ID,
                "Bearer Token Authentication",
                Version::new(1, 0, 0),
            )
            .with_description("Bearer token authentication for API requests"),
        }
    }
}

impl Default for BearerAuthProvider {
    fn default() -> Self {
        Self::new()
    }
}

fn token_prefix(token: &str) -> String {
    token.chars().take(10).collect()
}

#[async_trait]
impl Module for BearerAuthProvider {
    fn manifest(&self) -> &ModuleManifest {
        &self.manifest
    }

    async fn init(&self) -> Result<(), ModuleError> {
        debug!("Bearer auth provider initialized");
        Ok(())
    }
}

#[async_trait]
impl AuthProvider for BearerAuthProvider {
    fn provider_type(&self) -> &str {
        "bearer"
    }

    async fn authenticate(&self, credentials: &serde_json::Value) -> Result<AuthResult, AuthError> {
        let token = credentials
            .get("token")
            .and_then(|v| v.as_str())
            .map(str::trim)
            .unwrap_or_default();

        if token.is_empty() {
            return Ok(AuthResult::failure("Bearer token is required"));
        }
        Ok(AuthResult::success(token))
    }

    async fn validate(&self, token: &str) -> Result<bool, AuthError> {
        Ok(!token.trim().is_empty())
    }

    async fn logout(&self, token: &str) -> Result<(), AuthError> {
        debug!("Bearer token logout: {}...", token_prefix(token));
        Ok(())
    }
}
