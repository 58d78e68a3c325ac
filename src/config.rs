/// Processing options, loadable from YAML.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TabulatorConfig {
    /// Add pace, total distance and x/y columns
    #[serde(default = "default_true")]
    pub enrich: bool,

    /// Read the Garmin heart-rate extension
    #[serde(default = "default_true")]
    pub heart_rate: bool,

    /// Descend into sub-directories when an input is a directory
    #[serde(default)]
    pub recursive: bool,
}

fn default_true() -> bool {
    true
}

impl Default for TabulatorConfig {
    fn default() -> Self {
        Self {
            enrich: true,
            heart_rate: true,
            recursive: false,
        }
    }
}

impl TabulatorConfig {
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn from_yaml<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_keys_use_defaults() {
        let config = TabulatorConfig::from_yaml_str("heart_rate: false\n").unwrap();

        assert_eq!(
            config,
            TabulatorConfig { enrich: true, heart_rate: false, recursive: false }
        );
    }

    #[test]
    fn test_invalid_yaml_is_rejected() {
        assert!(TabulatorConfig::from_yaml_str("enrich: [1, 2").is_err());
    }
}
