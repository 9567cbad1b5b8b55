//! Configuration schema definitions.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Module IDs enabled when the config does not say otherwise.
pub const DEFAULT_ENABLED_MODULES: &[&str] = &["auth-local", "api-rest"];

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub modules: ModulesConfig,

    #[serde(default)]
    pub security: SecurityConfig,

    #[serde(default)]
    pub http: HttpConfig,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `EnvFilter` directive; `RUST_LOG` takes precedence.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Also write daily-rotated log files under the data directory.
    #[serde(default)]
    pub file: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: false,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Module configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModulesConfig {
    /// Modules enabled at startup, in order.
    #[serde(default = "default_enabled_modules")]
    pub enabled: Vec<String>,

    /// Auth provider made active after startup.
    #[serde(default)]
    pub active_auth: Option<String>,

    /// Per-module settings keyed by module ID.
    #[serde(default)]
    pub config: BTreeMap<String, serde_json::Value>,
}

impl Default for ModulesConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled_modules(),
            active_auth: None,
            config: BTreeMap::new(),
        }
    }
}

fn default_enabled_modules() -> Vec<String> {
    DEFAULT_ENABLED_MODULES.iter().map(|s| s.to_string()).collect()
}

/// Security configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    /// Session lifetime in seconds.
    #[serde(default = "default_token_expiration")]
    pub token_expiration: u64,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            token_expiration: default_token_expiration(),
        }
    }
}

fn default_token_expiration() -> u64 {
    3600
}

/// Outgoing HTTP configuration shared by protocol executors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_user_agent() -> String {
    concat!("ripapi/", env!("CARGO_PKG_VERSION")).to_string()
}
