pub mod value;

use std::collections::BTreeMap;

use serde::Serialize;

pub use value::{ConfigValue, FromConfigValue};

/// Error type for reads from a [`ParsedConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The requested key was not produced by the parse.
    #[error("config key not found: {0}")]
    NotFound(String),
    /// The value could not be converted to the requested type.
    #[error("config type mismatch for '{key}': expected {expected}")]
    TypeMismatch { key: String, expected: &'static str },
}

/// The flat configuration produced by one CLI invocation.
///
/// Combines parent option group values, subcommand flags, choice group
/// resolutions and the `language` discriminator. Serializes to a flat JSON
/// object of `key -> value`; which choice-group member was picked is kept
/// on the side and is not serialized.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ParsedConfig {
    #[serde(flatten)]
    values: BTreeMap<String, ConfigValue>,
    #[serde(skip)]
    selections: BTreeMap<String, String>,
}

impl ParsedConfig {
    /// Create an empty config (useful for testing).
    pub fn empty() -> Self {
        Self::default()
    }

    /// Set a value programmatically.
    pub fn set(&mut self, key: &str, value: impl Into<ConfigValue>) {
        self.values.insert(key.to_string(), value.into());
    }

    pub(crate) fn set_if_absent(&mut self, key: &str, value: ConfigValue) {
        self.values.entry(key.to_string()).or_insert(value);
    }

    pub(crate) fn record_selection(&mut self, group: &str, flag: &str) {
        self.selections.insert(group.to_string(), flag.to_string());
    }

    /// Get a typed value for the given key.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFound` if the key does not exist, or
    /// `ConfigError::TypeMismatch` if the value cannot be converted.
    pub fn get<V: FromConfigValue>(&self, key: &str) -> Result<V, ConfigError> {
        let value = self
            .values
            .get(key)
            .ok_or_else(|| ConfigError::NotFound(key.to_string()))?;
        V::from_config_value(value, key)
    }

    /// Get a typed value, returning a default if the key is missing or mistyped.
    pub fn get_or<V: FromConfigValue>(&self, key: &str, default: V) -> V {
        self.get(key).unwrap_or(default)
    }

    /// The raw value stored under `key`.
    pub fn value(&self, key: &str) -> Option<&ConfigValue> {
        self.values.get(key)
    }

    /// Check whether a key exists in the config.
    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// The dispatch discriminator, if the subcommand set one.
    pub fn language(&self) -> Option<&str> {
        match self.values.get(crate::LANGUAGE_KEY) {
            Some(ConfigValue::String(language)) => Some(language),
            _ => None,
        }
    }

    /// Long name of the choice-group member the user supplied for `group`,
    /// or `None` when the group default applied.
    pub fn selection(&self, group: &str) -> Option<&str> {
        self.selections.get(group).map(String::as_str)
    }

    /// Iterate over all keys and values in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ConfigValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }
}
