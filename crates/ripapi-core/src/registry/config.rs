//! Typed per-module configuration registry.

use dashmap::DashMap;
use serde::de::DeserializeOwned;
use serde::Serialize;

use ripapi_protocols::error::RegistryError;

/// Configuration values keyed by module ID, parallel to the module registries.
///
/// Values are stored as JSON and decoded into the module's own config type on
/// read. A module without stored config gets its type's default.
pub struct ModuleConfigRegistry {
    configs: DashMap<String, serde_json::Value>,
}

impl ModuleConfigRegistry {
    pub fn new() -> Self {
        Self {
            configs: DashMap::new(),
        }
    }

    /// Store a typed config for a module, replacing any previous value.
    pub fn set<C: Serialize>(&self, id: &str, config: &C) -> Result<(), RegistryError> {
        let value = serde_json::to_value(config).map_err(|e| RegistryError::InvalidConfig {
            id: id.to_string(),
            message: e.to_string(),
        })?;
        self.configs.insert(id.to_string(), value);
        Ok(())
    }

    /// Store an untyped config value for a module.
    pub fn set_raw(&self, id: &str, value: serde_json::Value) {
        self.configs.insert(id.to_string(), value);
    }

    /// Decode a module's config, or its default when none is stored.
    pub fn get<C: DeserializeOwned + Default>(&self, id: &str) -> Result<C, RegistryError> {
        match self.configs.get(id) {
            Some(value) => serde_json::from_value(value.clone()).map_err(|e| {
                RegistryError::InvalidConfig {
                    id: id.to_string(),
                    message: e.to_string(),
                }
            }),
            None => Ok(C::default()),
        }
    }

    pub fn get_raw(&self, id: &str) -> Option<serde_json::Value> {
        self.configs.get(id).map(|v| v.clone())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.configs.contains_key(id)
    }

    pub fn remove(&self, id: &str) -> Option<serde_json::Value> {
        self.configs.remove(id).map(|(_, v)| v)
    }

    /// IDs with stored config, sorted.
    pub fn ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.configs.iter().map(|e| e.key().clone()).collect();
        ids.sort();
        ids
    }
}

impl Default for ModuleConfigRegistry {
    fn default() -> Self {
        Self::new()
    }
}
