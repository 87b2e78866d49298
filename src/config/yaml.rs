//! YAML configuration loading.
//!
//! A YAML configuration is a mapping of section names to mappings of keys:
//!
//! ```yaml
//! General:
//!   type: IntroBlocks
//! BlockProperties:
//!   colorWhite: [1.0, 1.0, 1.0]
//!   invertColors: false
//! ```

use crate::error::{PatgenError, Result};

use super::Configuration;

/// Parse YAML source text into a configuration tree.
pub fn parse_yaml(source: &str) -> Result<Configuration> {
    // An empty document deserializes as null rather than an empty mapping.
    if source.trim().is_empty() {
        return Ok(Configuration::new());
    }

    serde_yaml::from_str(source).map_err(|e| PatgenError::Parse {
        location: e
            .location()
            .map(|l| format!("{}:{}", l.line(), l.column()))
            .unwrap_or_else(|| "unknown".to_string()),
        message: format!("Invalid YAML configuration: {}", e),
        help: Some("Use section: { key: value } mappings".to_string()),
    })
}
