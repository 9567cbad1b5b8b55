//! # RipApi Protocols
//!
//! Core protocol definitions (traits) for the RipApi module system.
//! Contains only interface definitions - no implementations.
//!
//! ## Core Traits
//!
//! - [`Module`] - Base trait for every registrable unit
//! - [`AuthProvider`] - Trait for authentication provider implementations
//! - [`ApiProtocol`] - Trait for API protocol executors (REST, GraphQL, SOAP)

pub mod api;
pub mod auth;
pub mod error;
pub mod module;
pub mod types;

// Re-export core traits
pub use api::{
    ApiProtocol, ApiRequest, ApiResponse, AuthConfig, AuthKind, ProtocolKind, ValidationResult,
};
pub use auth::{AuthProvider, AuthResult, User};
pub use error::{AuthError, ModuleError, ProtocolError, RegistryError};
pub use module::{Module, ModuleManifest};
pub use types::*;
