//! Authentication provider registry.

use std::sync::Arc;

use parking_lot::RwLock;
use tracing::info;

use ripapi_protocols::auth::AuthProvider;
use ripapi_protocols::error::RegistryError;
use ripapi_protocols::module::Module;

use super::base::{LifecycleReport, ModuleRegistry, ModuleStatus};

/// Registry for authentication providers with a single active selection.
///
/// The active slot holds a provider id, not the provider, and always names a
/// provider that is registered and enabled: disabling or unregistering the
/// active provider clears it.
pub struct AuthProviderRegistry {
    inner: ModuleRegistry<dyn AuthProvider>,
    active: RwLock<Option<String>>,
}

impl AuthProviderRegistry {
    /// Create a new auth provider registry.
    pub fn new() -> Self {
        Self {
            inner: ModuleRegistry::new(),
            active: RwLock::new(None),
        }
    }

    /// Register a provider.
    pub fn register(&self, provider: Arc<dyn AuthProvider>) -> Result<(), RegistryError> {
        let provider_type = provider.provider_type().to_string();
        let name = provider.manifest().name.clone();
        self.inner.register(provider)?;
        info!("Auth provider registered: {} ({})", name, provider_type);
        Ok(())
    }

    /// Unregister a provider, clearing the active slot if it pointed at it.
    pub async fn unregister(&self, id: &str) -> Result<(), RegistryError> {
        let result = self.inner.unregister(id).await;
        self.clear_active_if(id);
        result
    }

    /// Get a provider by ID.
    pub fn get(&self, id: &str) -> Option<Arc<dyn AuthProvider>> {
        self.inner.get(id)
    }

    /// First registered provider of the given type.
    ///
    /// Types are not unique; callers that need a specific provider should
    /// look it up by ID.
    pub fn get_by_type(&self, provider_type: &str) -> Option<Arc<dyn AuthProvider>> {
        self.inner
            .get_all()
            .into_iter()
            .find(|p| p.provider_type() == provider_type)
    }

    /// Check if a provider is registered.
    pub fn contains(&self, id: &str) -> bool {
        self.inner.contains(id)
    }

    pub fn is_enabled(&self, id: &str) -> bool {
        self.inner.is_enabled(id)
    }

    /// All providers, in registration order.
    pub fn get_all(&self) -> Vec<Arc<dyn AuthProvider>> {
        self.inner.get_all()
    }

    /// Enabled providers, in registration order.
    pub fn get_enabled(&self) -> Vec<Arc<dyn AuthProvider>> {
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

    /// Enable a provider.
    pub async fn enable(&self, id: &str) -> Result<(), RegistryError> {
        self.inner.enable(id).await
    }

    /// Disable a provider, clearing the active slot if it pointed at it.
    pub async fn disable(&self, id: &str) -> Result<(), RegistryError> {
        self.inner.disable(id).await?;
        self.clear_active_if(id);
        Ok(())
    }

    /// Enable each listed provider in order, isolating failures.
    pub async fn initialize_all<S: AsRef<str>>(&self, ids: &[S]) -> LifecycleReport {
        self.inner.initialize_all(ids).await
    }

    /// Disable every enabled provider, isolating failures.
    pub async fn destroy_all(&self) -> LifecycleReport {
        let mut report = LifecycleReport::default();
        for id in self.inner.enabled_ids() {
            let result = self.disable(&id).await;
            report.record(&id, result, "destroy");
        }
        report
    }

    /// Make a registered, enabled provider the active one.
    ///
    /// Fails with `NotFound` or `NotEnabled` and leaves the slot unchanged.
    pub fn set_active(&self, id: &str) -> Result<(), RegistryError> {
        // Hold the slot while checking so a concurrent disable cannot slip
        // between the check and the swap.
        let mut active = self.active.write();
        let provider = self
            .inner
            .get(id)
            .ok_or_else(|| RegistryError::NotFound(id.to_string()))?;
        if !self.inner.is_enabled(id) {
            return Err(RegistryError::NotEnabled(id.to_string()));
        }

        *active = Some(id.to_string());
        info!("Active auth provider set to: {}", provider.manifest().name);
        Ok(())
    }

    /// The active provider, if any.
    ///
    /// A provider whose disable is mid-flight is already reported as absent.
    pub fn get_active(&self) -> Option<Arc<dyn AuthProvider>> {
        let active = self.active.read();
        active
            .as_deref()
            .filter(|id| self.inner.is_enabled(id))
            .and_then(|id| self.inner.get(id))
    }

    /// ID of the active provider, if any.
    pub fn active_id(&self) -> Option<String> {
        self.active.read().clone()
    }

    fn clear_active_if(&self, id: &str) {
        let mut active = self.active.write();
        if active.as_deref() == Some(id) {
            *active = None;
            info!("Active auth provider cleared: {}", id);
        }
    }
}

impl Default for AuthProviderRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "auth_tests.rs"]
mod tests;
