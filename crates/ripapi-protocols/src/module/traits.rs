//! Module trait definition.

use async_trait::async_trait;

use super::ModuleManifest;
use crate::error::ModuleError;

/// Core trait for all registrable modules.
///
/// The enabled state is owned by the registry holding the module; a module
/// only provides its identity and the two lifecycle hooks. Hooks take `&self`
/// because registries share modules through `Arc`, so any state a module
/// prepares in `init` lives behind interior mutability.
///
/// Hooks must not call mutating registry operations on the registry that is
/// driving them.
#[async_trait]
pub trait Module: Send + Sync + 'static {
    /// Returns the module manifest.
    fn manifest(&self) -> &ModuleManifest;

    /// Returns the module ID.
    fn id(&self) -> &str {
        &self.manifest().id
    }

    /// Prepare resources. Called by the registry when the module is enabled.
    async fn init(&self) -> Result<(), ModuleError>;

    /// Release resources. Called by the registry when the module is disabled
    /// or unregistered while enabled.
    async fn destroy(&self) -> Result<(), ModuleError> {
        Ok(())
    }
}
