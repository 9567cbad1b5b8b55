//! Authentication provider errors.
//!
//! Rejected credentials are reported through `AuthResult`, not this type.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Provider not initialized: {0}")]
    NotInitialized(String),
}
