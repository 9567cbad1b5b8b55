//! Recording mock modules shared by the registry and kernel tests.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;

use ripapi_protocols::api::{ApiProtocol, ApiRequest, ApiResponse, ProtocolKind, ValidationResult};
use ripapi_protocols::auth::{AuthProvider, AuthResult};
use ripapi_protocols::error::{AuthError, ModuleError};
use ripapi_protocols::module::{Module, ModuleManifest};
use ripapi_protocols::types::Version;

/// Hook counters and injectable failures.
#[derive(Default)]
pub struct Hooks {
    pub init_calls: AtomicUsize,
    pub destroy_calls: AtomicUsize,
    pub fail_init: AtomicBool,
    pub fail_destroy: AtomicBool,
}

impl Hooks {
    pub fn init_count(&self) -> usize {
        self.init_calls.load(Ordering::SeqCst)
    }

    pub fn destroy_count(&self) -> usize {
        self.destroy_calls.load(Ordering::SeqCst)
    }

    pub fn set_fail_init(&self, fail: bool) {
        self.fail_init.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_destroy(&self, fail: bool) {
        self.fail_destroy.store(fail, Ordering::SeqCst);
    }

    fn run_init(&self, id: &str) -> Result<(), ModuleError> {
        self.init_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_init.load(Ordering::SeqCst) {
            return Err(ModuleError::InitializationFailed(format!("{} refused to start", id)));
        }
        Ok(())
    }

    fn run_destroy(&self, id: &str) -> Result<(), ModuleError> {
        self.destroy_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_destroy.load(Ordering::SeqCst) {
            return Err(ModuleError::ShutdownFailed(format!("{} refused to stop", id)));
        }
        Ok(())
    }
}

fn manifest(id: &str) -> ModuleManifest {
    ModuleManifest::new(id, format!("Test Module {}", id), Version::new(1, 0, 0))
        .with_description("Test module")
}

pub struct RecordingModule {
    manifest: ModuleManifest,
    pub hooks: Hooks,
}

impl RecordingModule {
    pub fn new(id: &str) -> Arc<Self> {
        Arc::new(Self {
            manifest: manifest(id),
            hooks: Hooks::default(),
        })
    }
}

#[async_trait]
impl Module for RecordingModule {
    fn manifest(&self) -> &ModuleManifest {
        &self.manifest
    }

    async fn init(&self) -> Result<(), ModuleError> {
        self.hooks.run_init(&self.manifest.id)
    }

    async fn destroy(&self) -> Result<(), ModuleError> {
        self.hooks.run_destroy(&self.manifest.id)
    }
}

pub struct MockAuthProvider {
    manifest: ModuleManifest,
    provider_type: String,
    pub hooks: Hooks,
}

impl MockAuthProvider {
    pub fn new(id: &str, provider_type: &str) -> Arc<Self> {
        Arc::new(Self {
            manifest: manifest(id),
            provider_type: provider_type.to_string(),
            hooks: Hooks::default(),
        })
    }
}

#[async_trait]
impl Module for MockAuthProvider {
    fn manifest(&self) -> &ModuleManifest {
        &self.manifest
    }

    async fn init(&self) -> Result<(), ModuleError> {
        self.hooks.run_init(&self.manifest.id)
    }

    async fn destroy(&self) -> Result<(), ModuleError> {
        self.hooks.run_destroy(&self.manifest.id)
    }
}

#[async_trait]
impl AuthProvider for MockAuthProvider {
    fn provider_type(&self) -> &str {
        &self.provider_type
    }

    async fn authenticate(&self, _credentials: &serde_json::Value) -> Result<AuthResult, AuthError> {
        Ok(AuthResult::success(format!("{}-token", self.manifest.id)))
    }

    async fn validate(&self, token: &str) -> Result<bool, AuthError> {
        Ok(token == format!("{}-token", self.manifest.id))
    }

    async fn logout(&self, _token: &str) -> Result<(), AuthError> {
        Ok(())
    }
}

pub struct MockProtocol {
    manifest: ModuleManifest,
    kind: ProtocolKind,
    pub hooks: Hooks,
}

impl MockProtocol {
    pub fn new(id: &str, kind: ProtocolKind) -> Arc<Self> {
        Arc::new(Self {
            manifest: manifest(id),
            kind,
            hooks: Hooks::default(),
        })
    }
}

#[async_trait]
impl Module for MockProtocol {
    fn manifest(&self) -> &ModuleManifest {
        &self.manifest
    }

    async fn init(&self) -> Result<(), ModuleError> {
        self.hooks.run_init(&self.manifest.id)
    }

    async fn destroy(&self) -> Result<(), ModuleError> {
        self.hooks.run_destroy(&self.manifest.id)
    }
}

#[async_trait]
impl ApiProtocol for MockProtocol {
    fn protocol(&self) -> ProtocolKind {
        self.kind
    }

    async fn execute(&self, _request: &ApiRequest) -> ApiResponse {
        ApiResponse::network_error("mock protocol does not send requests", 0.0)
    }

    async fn validate(&self, _request: &ApiRequest) -> ValidationResult {
        ValidationResult::from_errors(vec![])
    }
}
