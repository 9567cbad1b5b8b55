//! Registry errors.

use thiserror::Error;

use super::ModuleError;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Module already registered: {0}")]
    DuplicateIdentifier(String),

    #[error("Module not found: {0}")]
    NotFound(String),

    #[error("Module is not enabled: {0}")]
    NotEnabled(String),

    #[error("Lifecycle hook failed for {id}: {source}")]
    LifecycleHookFailure {
        id: String,
        #[source]
        source: ModuleError,
    },

    #[error("Invalid module: {0}")]
    InvalidModule(String),

    #[error("Invalid config for {id}: {message}")]
    InvalidConfig { id: String, message: String },

    #[error("Invalid state: {0}")]
    InvalidState(String),
}

impl RegistryError {
    /// Wrap a hook error raised by the module with the given id.
    pub fn hook(id: impl Into<String>, source: ModuleError) -> Self {
        Self::LifecycleHookFailure {
            id: id.into(),
            source,
        }
    }
}
