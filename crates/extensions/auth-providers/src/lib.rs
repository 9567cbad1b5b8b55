//! Built-in authentication providers for RipApi.

mod bearer;
mod local;

pub use bearer::BearerAuthProvider;
pub use local::{LocalAuthConfig, LocalAuthProvider, LocalUser};
