//! `[validate]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [validate.intrasite]
//! enable = true               # Collect and check links between site pages
//! level = "error"             # Failure level: error | warn
//! ```

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidateConfig {
    /// Intra-site link validation (pages, anchors, local assets).
    pub intrasite: IntrasiteConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IntrasiteConfig {
    /// Enable intra-site link validation.
    ///
    /// When off, link collection, anchor bookkeeping and validation are
    /// all skipped.
    pub enable: bool,

    /// How to treat validation failures: "error" or "warn".
    pub level: ValidateLevel,
}

impl Default for IntrasiteConfig {
    fn default() -> Self {
        Self {
            enable: true,
            level: ValidateLevel::default(),
        }
    }
}

/// Validation error level.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ValidateLevel {
    /// Treat validation failures as errors (command fails).
    #[default]
    Error,
    /// Treat validation failures as warnings (command succeeds).
    Warn,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;

    #[test]
    fn test_defaults() {
        let config = test_parse_config("");
        assert!(config.validate.intrasite.enable);
        assert_eq!(config.validate.intrasite.level, ValidateLevel::Error);
    }

    #[test]
    fn test_parse_intrasite() {
        let config = test_parse_config("[validate.intrasite]\nenable = false\nlevel = \"warn\"");
        assert!(!config.validate.intrasite.enable);
        assert_eq!(config.validate.intrasite.level, ValidateLevel::Warn);
    }
}
