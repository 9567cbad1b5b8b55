//! Username/password provider backed by a configured user table.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use ripapi_protocols::auth::{AuthProvider, AuthResult, User};
use ripapi_protocols::error::{AuthError, ModuleError};
use ripapi_protocols::module::{Module, ModuleManifest};
use ripapi_protocols::types::Version;

pub const MODULE_ID: &str = "auth-local";

/// Configuration read from `[modules.config.auth-local]`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LocalAuthConfig {
    #[serde(default)]
    pub users: Vec<LocalUser>,

    /// Session lifetime; falls back to `security.token_expiration`.
    #[serde(default)]
    pub token_ttl_secs: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocalUser {
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub roles: Vec<String>,
}

struct Account {
    password: String,
    user: User,
}

struct Session {
    username: String,
    expires_at: DateTime<Utc>,
}

/// Local authentication provider.
///
/// Passwords are compared as configured; sessions live in memory and are
/// dropped on `destroy`.
pub struct LocalAuthProvider {
    manifest: ModuleManifest,
    accounts: HashMap<String, Account>,
    ttl: Duration,
    sessions: DashMap<String, Session>,
    ready: AtomicBool,
}

impl LocalAuthProvider {
    pub fn new(config: LocalAuthConfig, default_ttl_secs: u64) -> Self {
        let now = Utc::now();
        let accounts = config
            .users
            .into_iter()
            .map(|u| {
                let user = User {
                    id: uuid::Uuid::new_v4().to_string(),
                    username: u.username.clone(),
                    email: u.email.unwrap_or_default(),
                    roles: u.roles,
                    created_at: now,
                    updated_at: now,
                };
                (
                    u.username,
                    Account {
                        password: u.password,
                        user,
                    },
                )
            })
            .collect();

        let ttl_secs = config.token_ttl_secs.unwrap_or(default_ttl_secs);
        let ttl = i64::try_from(ttl_secs)
            .ok()
            .and_then(Duration::try_seconds)
            .unwrap_or(Duration::MAX);

        Self {
            manifest: ModuleManifest::new(MODULE_ID, "Local Authentication", Version::new(1, 0, 0))
                .with_description("Username and password authentication against configured users"),
            accounts,
            ttl,
            sessions: DashMap::new(),
            ready: AtomicBool::new(false),
        }
    }

    /// Number of live sessions, expired ones included until next touched.
    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    fn ensure_ready(&self) -> Result<(), AuthError> {
        if self.ready.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(AuthError::NotInitialized(MODULE_ID.to_string()))
        }
    }

    fn expiry_from(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        now.checked_add_signed(self.ttl)
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    }
}

#[async_trait]
impl Module for LocalAuthProvider {
    fn manifest(&self) -> &ModuleManifest {
        &self.manifest
    }

    async fn init(&self) -> Result<(), ModuleError> {
        self.ready.store(true, Ordering::SeqCst);
        info!("Local auth provider ready with {} user(s)", self.accounts.len());
        Ok(())
    }

    async fn destroy(&self) -> Result<(), ModuleError> {
        self.ready.store(false, Ordering::SeqCst);
        let dropped = self.sessions.len();
        self.sessions.clear();
        debug!("Local auth provider dropped {} session(s)", dropped);
        Ok(())
    }
}

#[async_trait]
impl AuthProvider for LocalAuthProvider {
    fn provider_type(&self) -> &str {
        "local"
    }

    async fn authenticate(&self, credentials: &serde_json::Value) -> Result<AuthResult, AuthError> {
        self.ensure_ready()?;

        let Some(fields) = credentials.as_object() else {
            return Ok(AuthResult::failure("Invalid credentials format"));
        };
        let field = |name: &str| {
            fields
                .get(name)
                .and_then(|v| v.as_str())
                .unwrap_or_default()
        };
        let (username, password) = (field("username"), field("password"));

        if username.trim().is_empty() || password.is_empty() {
            return Ok(AuthResult::failure("Username and password are required"));
        }

        let Some(account) = self
            .accounts
            .get(username)
            .filter(|a| a.password == password)
        else {
            debug!("Rejected login for {}", username);
            return Ok(AuthResult::failure("Invalid username or password"));
        };

        let token = uuid::Uuid::new_v4().to_string();
        self.sessions.insert(
            token.clone(),
            Session {
                username: username.to_string(),
                expires_at: self.expiry_from(Utc::now()),
            },
        );
        debug!("Issued session for {}", username);

        Ok(AuthResult::success(token).with_user(account.user.clone()))
    }

    async fn validate(&self, token: &str) -> Result<bool, AuthError> {
        self.ensure_ready()?;

        let expired = match self.sessions.get(token) {
            None => return Ok(false),
            Some(session) => session.expires_at <= Utc::now(),
        };
        if expired {
            self.sessions.remove(token);
            return Ok(false);
        }
        Ok(true)
    }

    async fn logout(&self, token: &str) -> Result<(), AuthError> {
        self.ensure_ready()?;

        if let Some((_, session)) = self.sessions.remove(token) {
            debug!("Session closed for {}", session.username);
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "local_tests.rs"]
mod tests;
