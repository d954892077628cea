// Text rendering for descriptor views
use crate::error::{ConfigError, Result};
use serde::Serialize;

/// Serialize data as pretty-printed JSON
pub fn to_json_pretty<T: Serialize>(data: &T) -> Result<String> {
    serde_json::to_string_pretty(data)
        .map_err(|e| ConfigError::Serialization(format!("JSON serialization failed: {e}")))
}

/// Serialize data as TOML
pub fn to_toml<T: Serialize>(data: &T) -> Result<String> {
    toml::to_string_pretty(data)
        .map_err(|e| ConfigError::Serialization(format!("TOML serialization failed: {e}")))
}
