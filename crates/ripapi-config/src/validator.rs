//! Configuration validation.

use std::collections::HashSet;

use crate::error::ConfigError;
use crate::schema::Config;

/// Validation result.
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }

    /// Convert the first error, if any, into a `ConfigError`.
    pub fn into_result(self) -> Result<Vec<ValidationWarning>, ConfigError> {
        match self.errors.into_iter().next() {
            Some(first) => Err(ConfigError::InvalidValue {
                field: first.path,
                message: first.message,
            }),
            None => Ok(self.warnings),
        }
    }
}

/// A validation error.
#[derive(Debug)]
pub struct ValidationError {
    pub path: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// A validation warning.
#[derive(Debug)]
pub struct ValidationWarning {
    pub path: String,
    pub message: String,
}

impl ValidationWarning {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate the configuration.
    pub fn validate(config: &Config) -> ValidationResult {
        let mut result = ValidationResult::default();

        Self::validate_modules(config, &mut result);
        Self::validate_security(config, &mut result);
        Self::validate_http(config, &mut result);

        result
    }

    fn validate_modules(config: &Config, result: &mut ValidationResult) {
        let mut seen = HashSet::new();
        for (index, id) in config.modules.enabled.iter().enumerate() {
            let path = format!("modules.enabled[{}]", index);
            if id.trim().is_empty() {
                result.add_error(ValidationError::new(path, "Module ID cannot be empty"));
            } else if !seen.insert(id.as_str()) {
                result.add_warning(ValidationWarning::new(
                    path,
                    format!("Module \"{}\" is listed more than once", id),
                ));
            }
        }

        if let Some(ref active) = config.modules.active_auth {
            if !config.modules.enabled.iter().any(|id| id == active) {
                result.add_warning(ValidationWarning::new(
                    "modules.active_auth",
                    format!("Active auth provider \"{}\" is not in modules.enabled", active),
                ));
            }
        }

        for (id, value) in &config.modules.config {
            if !value.is_object() {
                result.add_error(ValidationError::new(
                    format!("modules.config.{}", id),
                    "Module config must be a table",
                ));
            }
        }
    }

    fn validate_security(config: &Config, result: &mut ValidationResult) {
        if config.security.token_expiration == 0 {
            result.add_error(ValidationError::new(
                "security.token_expiration",
                "token_expiration must be greater than 0",
            ));
        }
    }

    fn validate_http(config: &Config, result: &mut ValidationResult) {
        if config.http.timeout_secs == 0 {
            result.add_error(ValidationError::new(
                "http.timeout_secs",
                "timeout_secs must be greater than 0",
            ));
        }

        if config.http.user_agent.trim().is_empty() {
            result.add_warning(ValidationWarning::new(
                "http.user_agent",
                "user_agent is empty, requests will be sent without one",
            ));
        }
    }
}

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;
