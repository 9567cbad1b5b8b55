//! HTTP-based API protocol executors for RipApi.

mod auth;
mod graphql;
mod rest;
mod soap;
mod transport;

pub use auth::auth_headers;
pub use graphql::GraphQLProtocol;
pub use rest::RestProtocol;
pub use soap::SoapProtocol;
pub use transport::{HttpTransport, TransportConfig};
