//! Authentication provider protocol definitions.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::AuthError;
use crate::module::Module;

/// Core trait for authentication providers.
#[async_trait]
pub trait AuthProvider: Module {
    /// Type of authentication (local, bearer, sso, kerberos, ...).
    fn provider_type(&self) -> &str;

    /// Authenticate with provider-specific credentials.
    ///
    /// Credentials of the wrong shape yield a failed `AuthResult`, not an error.
    async fn authenticate(&self, credentials: &serde_json::Value) -> Result<AuthResult, AuthError>;

    /// Validate an existing token or session.
    async fn validate(&self, token: &str) -> Result<bool, AuthError>;

    /// Logout / revoke a token.
    async fn logout(&self, token: &str) -> Result<(), AuthError>;
}

/// Outcome of an authentication attempt.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuthResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AuthResult {
    /// A successful result carrying a token.
    pub fn success(token: impl Into<String>) -> Self {
        Self {
            success: true,
            token: Some(token.into()),
            ..Default::default()
        }
    }

    /// A failed result with a reason.
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
            ..Default::default()
        }
    }

    pub fn with_user(mut self, user: User) -> Self {
        self.user = Some(user);
        self
    }
}

/// Authenticated user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub roles: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
#[path = "auth_tests.rs"]
mod tests;
