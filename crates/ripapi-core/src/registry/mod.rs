//! Registries for modules, auth providers, API protocols and module config.

mod auth;
mod base;
mod config;
mod protocol;

pub use auth::AuthProviderRegistry;
pub use base::{LifecycleReport, ModuleRegistry, ModuleStatus};
pub use config::ModuleConfigRegistry;
pub use protocol::ApiProtocolRegistry;
