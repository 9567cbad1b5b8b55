//! Module protocol definitions.
//!
//! Modules are the registrable building blocks of RipApi: auth providers and
//! API protocol executors are both modules.

mod manifest;
mod traits;

pub use manifest::*;
pub use traits::*;
