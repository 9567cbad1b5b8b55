//! API protocol trait definition.

use async_trait::async_trait;

use super::{ApiRequest, ApiResponse, ProtocolKind, ValidationResult};
use crate::module::Module;

/// Core trait for API protocol executors.
#[async_trait]
pub trait ApiProtocol: Module {
    /// Returns the protocol this executor speaks.
    fn protocol(&self) -> ProtocolKind;

    /// Execute a request.
    ///
    /// Transport failures are reported inside the response (status 0), so
    /// callers always get timing information back.
    async fn execute(&self, request: &ApiRequest) -> ApiResponse;

    /// Validate request configuration without sending it.
    async fn validate(&self, request: &ApiRequest) -> ValidationResult;
}
