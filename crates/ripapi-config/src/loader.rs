//! Configuration loader.

use std::fs;
use std::path::{Path, PathBuf};

use regex::Regex;

use crate::error::ConfigError;
use crate::schema::Config;

/// Configuration loader with environment variable substitution.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Config, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()));
        }
        let content = fs::read_to_string(path)?;
        Self::load_str(&content)
    }

    /// Load configuration from a string.
    pub fn load_str(content: &str) -> Result<Config, ConfigError> {
        let expanded = Self::expand_env_vars(content)?;
        let config: Config = toml::from_str(&expanded)?;
        Ok(config)
    }

    /// Load configuration, falling back to defaults when the file is absent.
    pub fn load_or_default(path: &Path) -> Result<Config, ConfigError> {
        match Self::load(path) {
            Err(ConfigError::NotFound(_)) => Ok(Config::default()),
            other => other,
        }
    }

    /// Apply `ENABLED_MODULES`, `ACTIVE_AUTH`, `TOKEN_EXPIRATION` and
    /// `HTTP_TIMEOUT` from the process environment.
    pub fn apply_env_overrides(config: &mut Config) {
        Self::apply_overrides(config, |key| std::env::var(key).ok());
    }

    /// Apply overrides from an arbitrary lookup. Unparseable numbers are ignored.
    pub fn apply_overrides<F>(config: &mut Config, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(list) = lookup("ENABLED_MODULES") {
            config.modules.enabled = list
                .split(',')
                .map(str::trim)
                .filter(|id| !id.is_empty())
                .map(String::from)
                .collect();
        }

        if let Some(active) = lookup("ACTIVE_AUTH") {
            let active = active.trim();
            config.modules.active_auth = (!active.is_empty()).then(|| active.to_string());
        }

        if let Some(secs) = lookup("TOKEN_EXPIRATION").and_then(|v| v.trim().parse().ok()) {
            config.security.token_expiration = secs;
        }

        if let Some(secs) = lookup("HTTP_TIMEOUT").and_then(|v| v.trim().parse().ok()) {
            config.http.timeout_secs = secs;
        }
    }

    /// Expand environment variables in the format `${VAR}`.
    fn expand_env_vars(content: &str) -> Result<String, ConfigError> {
        let re = Regex::new(r"\$\{([^}]+)\}")
            .map_err(|e| ConfigError::InvalidFormat(e.to_string()))?;
        let mut result = content.to_string();

        for cap in re.captures_iter(content) {
            let var_name = &cap[1];
            let var_value = std::env::var(var_name)
                .map_err(|_| ConfigError::EnvVarNotSet(var_name.to_string()))?;
            result = result.replace(&cap[0], &var_value);
        }

        Ok(result)
    }

    /// Expand shell-style paths (e.g., `~/.ripapi`).
    pub fn expand_path(path: &str) -> String {
        shellexpand::tilde(path).to_string()
    }

    /// Base directory for config and logs: `~/.ripapi`.
    pub fn data_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".ripapi")
    }

    /// Default config file location: `~/.ripapi/config.toml`.
    pub fn default_config_path() -> PathBuf {
        Self::data_dir().join("config.toml")
    }
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
