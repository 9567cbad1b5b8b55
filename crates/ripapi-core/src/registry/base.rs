//! Generic module registry.
//!
//! Provides the lifecycle-aware registry shared by the auth provider and API
//! protocol registries: identity lookup, enable/disable transitions that run
//! the module hooks, and best-effort bulk sweeps.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use serde::Serialize;
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

use ripapi_protocols::error::RegistryError;
use ripapi_protocols::module::Module;

struct Entry<T: ?Sized> {
    module: Arc<T>,
    enabled: bool,
}

struct RegistryState<T: ?Sized> {
    entries: HashMap<String, Entry<T>>,
    /// Registration order, used for every snapshot.
    order: Vec<String>,
}

impl<T: ?Sized> RegistryState<T> {
    fn ordered(&self) -> impl Iterator<Item = &Entry<T>> + '_ {
        self.order.iter().filter_map(|id| self.entries.get(id))
    }
}

/// Point-in-time view of a registered module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModuleStatus {
    pub id: String,
    pub name: String,
    pub version: String,
    pub description: String,
    pub enabled: bool,
}

/// Outcome of a bulk lifecycle sweep, in processing order.
#[derive(Debug, Default)]
pub struct LifecycleReport {
    pub succeeded: Vec<String>,
    pub failed: Vec<(String, RegistryError)>,
}

impl LifecycleReport {
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }

    /// Ids that failed, in processing order.
    pub fn failed_ids(&self) -> Vec<&str> {
        self.failed.iter().map(|(id, _)| id.as_str()).collect()
    }

    /// Append another report after this one.
    pub fn merge(&mut self, other: LifecycleReport) {
        self.succeeded.extend(other.succeeded);
        self.failed.extend(other.failed);
    }

    pub(crate) fn record(&mut self, id: &str, result: Result<(), RegistryError>, action: &str) {
        match result {
            Ok(()) => self.succeeded.push(id.to_string()),
            Err(e) => {
                error!("Failed to {} module \"{}\": {}", action, id, e);
                self.failed.push((id.to_string(), e));
            }
        }
    }
}

/// Registry managing module identity and lifecycle.
///
/// State reads and writes go through a short-lived lock that is never held
/// across a hook, so lookups never observe a half-applied transition. Lifecycle
/// transitions (`enable`, `disable`, `unregister`) are serialized per registry
/// and hold that serialization across the awaited hook.
///
/// # Type Parameters
///
/// * `T` - The module type to store (e.g., `dyn AuthProvider`, `dyn ApiProtocol`)
pub struct ModuleRegistry<T: ?Sized + Module> {
    state: RwLock<RegistryState<T>>,
    transitions: Mutex<()>,
}

impl<T: ?Sized + Module> ModuleRegistry<T> {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            state: RwLock::new(RegistryState {
                entries: HashMap::new(),
                order: Vec::new(),
            }),
            transitions: Mutex::new(()),
        }
    }

    /// Register a module. It starts disabled.
    ///
    /// Returns an error if a module with the same ID is already registered or
    /// the module's ID is blank; the registry is unchanged in both cases.
    pub fn register(&self, module: Arc<T>) -> Result<(), RegistryError> {
        let manifest = module.manifest();
        if manifest.id.trim().is_empty() {
            return Err(RegistryError::InvalidModule(format!(
                "module \"{}\" has an empty id",
                manifest.name
            )));
        }

        let id = manifest.id.clone();
        let mut state = self.state.write();
        if state.entries.contains_key(&id) {
            return Err(RegistryError::DuplicateIdentifier(id));
        }

        info!("Module registered: {} v{} ({})", manifest.name, manifest.version, id);
        state.order.push(id.clone());
        state.entries.insert(
            id,
            Entry {
                module,
                enabled: false,
            },
        );
        Ok(())
    }

    /// Unregister a module.
    ///
    /// An unknown ID is a no-op with a warning. An enabled module has its
    /// `destroy` hook awaited first; the module is removed whether or not the
    /// hook succeeds, and a hook failure is logged and then returned.
    pub async fn unregister(&self, id: &str) -> Result<(), RegistryError> {
        let _transition = self.transitions.lock().await;

        let (module, enabled) = {
            let state = self.state.read();
            match state.entries.get(id) {
                Some(entry) => (entry.module.clone(), entry.enabled),
                None => {
                    warn!("Module \"{}\" not found", id);
                    return Ok(());
                }
            }
        };

        let outcome = if enabled {
            module
                .destroy()
                .await
                .map_err(|e| RegistryError::hook(id, e))
        } else {
            Ok(())
        };

        {
            let mut state = self.state.write();
            state.entries.remove(id);
            state.order.retain(|existing| existing != id);
        }

        if let Err(e) = &outcome {
            error!("Module \"{}\" removed after failed destroy: {}", id, e);
        }
        info!("Module unregistered: {}", id);
        outcome
    }

    /// Get a module by ID.
    pub fn get(&self, id: &str) -> Option<Arc<T>> {
        self.state.read().entries.get(id).map(|e| e.module.clone())
    }

    /// Check if a module with the given ID is registered.
    pub fn contains(&self, id: &str) -> bool {
        self.state.read().entries.contains_key(id)
    }

    /// Whether the module is registered and enabled.
    pub fn is_enabled(&self, id: &str) -> bool {
        self.state
            .read()
            .entries
            .get(id)
            .map(|e| e.enabled)
            .unwrap_or(false)
    }

    /// All modules, in registration order.
    pub fn get_all(&self) -> Vec<Arc<T>> {
        self.state.read().ordered().map(|e| e.module.clone()).collect()
    }

    /// Enabled modules, in registration order.
    pub fn get_enabled(&self) -> Vec<Arc<T>> {
        self.state
            .read()
            .ordered()
            .filter(|e| e.enabled)
            .map(|e| e.module.clone())
            .collect()
    }

    /// IDs of enabled modules, in registration order.
    pub fn enabled_ids(&self) -> Vec<String> {
        self.state
            .read()
            .ordered()
            .filter(|e| e.enabled)
            .map(|e| e.module.id().to_string())
            .collect()
    }

    /// List all registered module IDs, in registration order.
    pub fn list_ids(&self) -> Vec<String> {
        self.state.read().order.clone()
    }

    /// Status snapshot of every module, in registration order.
    pub fn list(&self) -> Vec<ModuleStatus> {
        self.state
            .read()
            .ordered()
            .map(|e| {
                let manifest = e.module.manifest();
                ModuleStatus {
                    id: manifest.id.clone(),
                    name: manifest.name.clone(),
                    version: manifest.version.to_string(),
                    description: manifest.description.clone(),
                    enabled: e.enabled,
                }
            })
            .collect()
    }

    /// Get the number of registered modules.
    pub fn len(&self) -> usize {
        self.state.read().entries.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.state.read().entries.is_empty()
    }

    /// Enable a module by running its `init` hook.
    ///
    /// Already enabled is a no-op with a warning. If `init` fails the module
    /// stays disabled and the failure is returned.
    pub async fn enable(&self, id: &str) -> Result<(), RegistryError> {
        let _transition = self.transitions.lock().await;

        let module = {
            let state = self.state.read();
            let entry = state
                .entries
                .get(id)
                .ok_or_else(|| RegistryError::NotFound(id.to_string()))?;
            if entry.enabled {
                warn!("Module \"{}\" is already enabled", id);
                return Ok(());
            }
            entry.module.clone()
        };

        debug!("Initializing module: {}", id);
        module.init().await.map_err(|e| RegistryError::hook(id, e))?;
        self.set_enabled(id, true);

        info!("Module enabled: {}", id);
        Ok(())
    }

    /// Disable a module by running its `destroy` hook.
    ///
    /// Already disabled is a no-op with a warning. If `destroy` fails the
    /// module stays enabled and the failure is returned.
    pub async fn disable(&self, id: &str) -> Result<(), RegistryError> {
        let _transition = self.transitions.lock().await;

        let module = {
            let state = self.state.read();
            let entry = state
                .entries
                .get(id)
                .ok_or_else(|| RegistryError::NotFound(id.to_string()))?;
            if !entry.enabled {
                warn!("Module \"{}\" is already disabled", id);
                return Ok(());
            }
            entry.module.clone()
        };

        debug!("Destroying module: {}", id);
        module.destroy().await.map_err(|e| RegistryError::hook(id, e))?;
        self.set_enabled(id, false);

        info!("Module disabled: {}", id);
        Ok(())
    }

    /// Enable each listed module in order.
    ///
    /// A failure is logged and recorded, and processing continues with the
    /// next ID.
    pub async fn initialize_all<S: AsRef<str>>(&self, ids: &[S]) -> LifecycleReport {
        let mut report = LifecycleReport::default();
        for id in ids {
            let id = id.as_ref();
            let result = self.enable(id).await;
            report.record(id, result, "initialize");
        }
        report
    }

    /// Disable every module that is enabled at the time of the call, in
    /// registration order, isolating failures like `initialize_all`.
    pub async fn destroy_all(&self) -> LifecycleReport {
        let mut report = LifecycleReport::default();
        for id in self.enabled_ids() {
            let result = self.disable(&id).await;
            report.record(&id, result, "destroy");
        }
        report
    }

    fn set_enabled(&self, id: &str, enabled: bool) {
        // Entries cannot disappear while a transition is held.
        if let Some(entry) = self.state.write().entries.get_mut(id) {
            entry.enabled = enabled;
        }
    }
}

impl<T: ?Sized + Module> Default for ModuleRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "base_tests.rs"]
mod tests;
