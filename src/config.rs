//! # Authority Configuration
//!
//! JSON-backed settings for an [`Authority`](crate::authority::Authority).
//!
//! ## Configuration File Format
//!
//! ```json
//! {
//!   "write_policy": "strict",
//!   "initial_capacity": 64
//! }
//! ```
//!
//! Every field is optional; missing fields take their defaults
//! (tolerant writes, no pre-reserved capacity).

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// How `set_input`/`set_output` treat an index past the declared arity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WritePolicy {
    /// Drop the write and report success.
    #[default]
    Tolerant,
    /// Reject the write with `NetlistError::PortOutOfRange`.
    Strict,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthorityConfig {
    /// Policy stamped onto every component the authority creates.
    pub write_policy: WritePolicy,
    /// Number of registry slots reserved up front.
    pub initial_capacity: usize,
}

impl AuthorityConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    pub fn to_json_string(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn with_write_policy(mut self, policy: WritePolicy) -> Self {
        self.write_policy = policy;
        self
    }

    pub fn with_initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AuthorityConfig::default();
        assert_eq!(config.write_policy, WritePolicy::Tolerant);
        assert_eq!(config.initial_capacity, 0);
    }

    #[test]
    fn test_parse_full_config() {
        let config =
            AuthorityConfig::from_json_str(r#"{"write_policy": "strict", "initial_capacity": 16}"#)
                .unwrap();
        assert_eq!(config.write_policy, WritePolicy::Strict);
        assert_eq!(config.initial_capacity, 16);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let config = AuthorityConfig::from_json_str("{}").unwrap();
        assert_eq!(config, AuthorityConfig::default());
    }

    #[test]
    fn test_unknown_policy_is_rejected() {
        let result = AuthorityConfig::from_json_str(r#"{"write_policy": "loud"}"#);
        assert!(matches!(result, Err(ConfigError::Json(_))));
    }

    #[test]
    fn test_file_roundtrip() {
        let config = AuthorityConfig::default()
            .with_write_policy(WritePolicy::Strict)
            .with_initial_capacity(8);
        let path = std::env::temp_dir().join(format!(
            "gate_netlist_config_{}.json",
            std::process::id()
        ));
        fs::write(&path, config.to_json_string().unwrap()).unwrap();

        let loaded = AuthorityConfig::from_json_file(&path).unwrap();
        fs::remove_file(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = AuthorityConfig::from_json_file("/nonexistent/gate_netlist.json");
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }
}
