//! # RipApi Core
//!
//! Module registry core for the RipApi framework.
//!
//! ## Components
//!
//! - [`ModuleRegistry`] - Generic lifecycle-aware registry
//! - [`AuthProviderRegistry`] - Auth providers with a single active selection
//! - [`ApiProtocolRegistry`] - API protocol executors with by-protocol lookup
//! - [`ModuleConfigRegistry`] - Typed per-module configuration
//! - [`Kernel`] - Owns the registries and drives startup/shutdown sweeps

pub mod kernel;
pub mod lifecycle;
pub mod registry;

#[cfg(test)]
mod test_support;

pub use kernel::Kernel;
pub use lifecycle::{KernelState, ShutdownSignal};
pub use registry::{
    ApiProtocolRegistry, AuthProviderRegistry, LifecycleReport, ModuleConfigRegistry,
    ModuleRegistry, ModuleStatus,
};
