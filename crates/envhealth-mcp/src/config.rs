//! Server-level configuration for the stdio transport.
//!
//! Deserialized from an optional JSON initialization payload, the same way
//! the teacher's `DepsConfig` is deserialized from LSP initialization
//! options: every field carries a default so an absent or partial payload
//! still produces a usable configuration.
//!
//! # Examples
//!
//! ```
//! use envhealth_mcp::config::EngineConfig;
//!
//! let config: EngineConfig = serde_json::from_str(r#"{"descriptor_root": "custom-config"}"#).unwrap();
//! assert_eq!(config.descriptor_root, "custom-config");
//! ```

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    #[serde(default = "default_descriptor_root")]
    pub descriptor_root: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            descriptor_root: default_descriptor_root(),
        }
    }
}

fn default_descriptor_root() -> String {
    "config".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert_eq!(config.descriptor_root, "config");
    }

    #[test]
    fn test_empty_payload_uses_default() {
        let config: EngineConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.descriptor_root, "config");
    }

    #[test]
    fn test_custom_descriptor_root() {
        let config: EngineConfig = serde_json::from_str(r#"{"descriptor_root": "envs"}"#).unwrap();
        assert_eq!(config.descriptor_root, "envs");
    }
}
