//! Errors raised by a module's own lifecycle hooks.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModuleError {
    #[error("Module initialization failed: {0}")]
    InitializationFailed(String),

    #[error("Module shutdown failed: {0}")]
    ShutdownFailed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initialization_failed_error() {
        let err = ModuleError::InitializationFailed("connection refused".to_string());
        let display = err.to_string();
        assert!(display.contains("initialization failed"));
        assert!(display.contains("connection refused"));
    }

    #[test]
    fn test_shutdown_failed_error() {
        let err = ModuleError::ShutdownFailed("socket busy".to_string());
        assert!(err.to_string().contains("shutdown failed"));
    }
}
