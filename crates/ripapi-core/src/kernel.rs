//! Kernel owning the module registries and driving bulk lifecycle.

use std::future::Future;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

use tracing::{info, warn};

use ripapi_protocols::error::RegistryError;

use crate::lifecycle::{KernelState, ShutdownSignal};
use crate::registry::{
    ApiProtocolRegistry, AuthProviderRegistry, LifecycleReport, ModuleConfigRegistry,
};

/// The kernel managing module registries.
///
/// Registries are created per kernel and handed out explicitly; there is no
/// process-wide registry.
pub struct Kernel {
    auth_registry: Arc<AuthProviderRegistry>,
    protocol_registry: Arc<ApiProtocolRegistry>,
    config_registry: Arc<ModuleConfigRegistry>,
    state: AtomicU8,
    shutdown_signal: ShutdownSignal,
}

impl Kernel {
    /// Create a new kernel with empty registries.
    pub fn new() -> Self {
        Self::with_config_registry(Arc::new(ModuleConfigRegistry::new()))
    }

    /// Create a new kernel sharing an existing module config registry.
    pub fn with_config_registry(config_registry: Arc<ModuleConfigRegistry>) -> Self {
        Self {
            auth_registry: Arc::new(AuthProviderRegistry::new()),
            protocol_registry: Arc::new(ApiProtocolRegistry::new()),
            config_registry,
            state: AtomicU8::new(KernelState::Created as u8),
            shutdown_signal: ShutdownSignal::new(),
        }
    }

    /// Get kernel state.
    pub fn state(&self) -> KernelState {
        KernelState::from(self.state.load(Ordering::SeqCst))
    }

    /// Check if kernel is running.
    pub fn is_running(&self) -> bool {
        self.state() == KernelState::Running
    }

    /// Shutdown request shared with signal handlers. `stop` triggers it too.
    pub fn shutdown_signal(&self) -> &ShutdownSignal {
        &self.shutdown_signal
    }

    /// Drive `work` until it finishes or shutdown is requested.
    ///
    /// Returns `None` when shutdown won; `work` is dropped at that point.
    pub async fn run_until_shutdown<F: Future>(&self, work: F) -> Option<F::Output> {
        tokio::select! {
            output = work => Some(output),
            _ = self.shutdown_signal.wait() => {
                info!("Shutdown requested, abandoning in-flight work");
                None
            }
        }
    }

    /// Start the kernel: enable the auto-init modules, then select the active
    /// auth provider.
    ///
    /// Per-module failures are logged and reported, never fatal. An active
    /// provider that cannot be selected is logged and left unset.
    pub async fn start<S: AsRef<str>>(
        &self,
        auto_init: &[S],
        active_auth: Option<&str>,
    ) -> Result<LifecycleReport, RegistryError> {
        self.transition(KernelState::Created, KernelState::Starting)?;
        info!("Kernel starting...");

        let mut report = LifecycleReport::default();
        for id in auto_init {
            let id = id.as_ref();
            let result = if self.auth_registry.contains(id) {
                self.auth_registry.enable(id).await
            } else if self.protocol_registry.contains(id) {
                self.protocol_registry.enable(id).await
            } else {
                Err(RegistryError::NotFound(id.to_string()))
            };
            report.record(id, result, "initialize");
        }

        if let Some(id) = active_auth {
            if let Err(e) = self.auth_registry.set_active(id) {
                warn!("Could not select active auth provider \"{}\": {}", id, e);
            }
        }

        self.state.store(KernelState::Running as u8, Ordering::SeqCst);
        info!(
            "Kernel started ({} modules enabled, {} failed)",
            report.succeeded.len(),
            report.failed.len()
        );
        Ok(report)
    }

    /// Stop the kernel: disable every enabled protocol, then every enabled
    /// auth provider.
    pub async fn stop(&self) -> Result<LifecycleReport, RegistryError> {
        self.transition(KernelState::Running, KernelState::ShuttingDown)?;
        info!("Kernel shutting down...");

        self.shutdown_signal.trigger();

        let mut report = self.protocol_registry.destroy_all().await;
        report.merge(self.auth_registry.destroy_all().await);

        self.state.store(KernelState::Stopped as u8, Ordering::SeqCst);
        info!("Kernel stopped");
        Ok(report)
    }

    /// Get the auth provider registry.
    pub fn auth_registry(&self) -> &Arc<AuthProviderRegistry> {
        &self.auth_registry
    }

    /// Get the API protocol registry.
    pub fn protocol_registry(&self) -> &Arc<ApiProtocolRegistry> {
        &self.protocol_registry
    }

    /// Get the module config registry.
    pub fn config_registry(&self) -> &Arc<ModuleConfigRegistry> {
        &self.config_registry
    }

    fn transition(&self, from: KernelState, to: KernelState) -> Result<(), RegistryError> {
        self.state
            .compare_exchange(from as u8, to as u8, Ordering::SeqCst, Ordering::SeqCst)
            .map(|_| ())
            .map_err(|current| {
                RegistryError::InvalidState(format!(
                    "cannot move to {:?} from {:?}",
                    to,
                    KernelState::from(current)
                ))
            })
    }
}

impl Default for Kernel {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "kernel_tests.rs"]
mod tests;
