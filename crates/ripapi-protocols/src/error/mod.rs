//! Error types for the RipApi protocol layer.

mod auth;
mod module;
mod protocol;
mod registry;

pub use auth::*;
pub use module::*;
pub use protocol::*;
pub use registry::*;
