//! API protocol registry.

use std::sync::Arc;

use ripapi_protocols::api::{ApiProtocol, ProtocolKind};
use ripapi_protocols::error::RegistryError;

use super::base::{LifecycleReport, ModuleRegistry, ModuleStatus};

/// Registry for API protocol executors.
///
/// Built on `ModuleRegistry` for consistent lifecycle behavior.
pub struct ApiProtocolRegistry {
    inner: ModuleRegistry<dyn ApiProtocol>,
}

impl ApiProtocolRegistry {
    /// Create a new protocol registry.
    pub fn new() -> Self {
        Self {
            inner: ModuleRegistry::new(),
        }
    }

    /// Register a protocol executor.
    pub fn register(&self, protocol: Arc<dyn ApiProtocol>) -> Result<(), RegistryError> {
        self.inner.register(protocol)
    }

    /// Unregister a protocol executor.
    pub async fn unregister(&self, id: &str) -> Result<(), RegistryError> {
        self.inner.unregister(id).await
    }

    /// Get a protocol executor by ID.
    pub fn get(&self, id: &str) -> Option<Arc<dyn ApiProtocol>> {
        self.inner.get(id)
    }

    /// First registered executor for the given protocol.
    pub fn get_by_type(&self, kind: ProtocolKind) -> Option<Arc<dyn ApiProtocol>> {
        self.inner.get_all().into_iter().find(|p| p.protocol() == kind)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.inner.contains(id)
    }

    pub fn is_enabled(&self, id: &str) -> bool {
        self.inner.is_enabled(id)
    }

    pub fn get_all(&self) -> Vec<Arc<dyn ApiProtocol>> {
        self.inner.get_all()
    }

    pub fn get_enabled(&self) -> Vec<Arc<dyn ApiProtocol>> {
        self.inner.get_enabled()
    }

    pub fn list_ids(&self) -> Vec<String> {
        self.inner.list_ids()
    }

    pub fn list(&self) -> Vec<ModuleStatus> {
        self.inner.list()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub async fn enable(&self, id: &str) -> Result<(), RegistryError> {
        self.inner.enable(id).await
    }

    pub async fn disable(&self, id: &str) -> Result<(), RegistryError> {
        self.inner.disable(id).await
    }

    pub async fn initialize_all<S: AsRef<str>>(&self, ids: &[S]) -> LifecycleReport {
        self.inner.initialize_all(ids).await
    }

    pub async fn destroy_all(&self) -> LifecycleReport {
        self.inner.destroy_all().await
    }
}

impl Default for ApiProtocolRegistry {
    fn default() -> Self {
        Self::new()
    }
}
