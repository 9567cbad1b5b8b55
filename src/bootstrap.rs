//! Module registration and kernel startup.

use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use ripapi_api_protocols::{GraphQLProtocol, RestProtocol, SoapProtocol, TransportConfig};
use ripapi_auth_providers::{BearerAuthProvider, LocalAuthConfig, LocalAuthProvider};
use ripapi_config::Config;
use ripapi_core::{Kernel, ModuleConfigRegistry};
use ripapi_protocols::error::RegistryError;

const LOCAL_AUTH_ID: &str = "auth-local";

/// Seed per-module settings from `[modules.config.*]`.
pub(crate) fn build_config_registry(config: &Config) -> Arc<ModuleConfigRegistry> {
    let registry = Arc::new(ModuleConfigRegistry::new());
    for (id, value) in &config.modules.config {
        registry.set_raw(id, value.clone());
    }
    registry
}

/// Register every built-in module. Nothing is initialized here.
pub(crate) fn register_modules(kernel: &Kernel, config: &Config) -> Result<(), RegistryError> {
    let local: LocalAuthConfig = kernel.config_registry().get(LOCAL_AUTH_ID)?;
    let auth = kernel.auth_registry();
    auth.register(Arc::new(LocalAuthProvider::new(
        local,
        config.security.token_expiration,
    )))?;
    auth.register(Arc::new(BearerAuthProvider::new()))?;

    let transport = TransportConfig {
        timeout: Duration::from_secs(config.http.timeout_secs),
        user_agent: config.http.user_agent.clone(),
    };
    let protocols = kernel.protocol_registry();
    protocols.register(Arc::new(RestProtocol::new(transport.clone())))?;
    protocols.register(Arc::new(GraphQLProtocol::new(transport.clone())))?;
    protocols.register(Arc::new(SoapProtocol::new(transport)))?;

    info!(
        "Registered {} auth provider(s) and {} protocol(s)",
        auth.len(),
        protocols.len()
    );
    Ok(())
}

/// Build, register and start a kernel from configuration.
pub(crate) async fn boot(config: &Config) -> Result<Kernel, RegistryError> {
    let kernel = Kernel::with_config_registry(build_config_registry(config));
    register_modules(&kernel, config)?;

    let report = kernel
        .start(&config.modules.enabled, config.modules.active_auth.as_deref())
        .await?;
    for (id, err) in &report.failed {
        warn!("Module \"{}\" unavailable: {}", id, err);
    }
    Ok(kernel)
}
