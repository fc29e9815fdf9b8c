//! Validation settings consulted by `build_with`.
//!
//! There is no process-wide configuration: callers own a [`ModelConfig`] and
//! pass it to every build that should not use the defaults.

use crate::error::Result;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct ModelConfig {
    /// Check reference values against the allowed target resource types.
    pub check_reference_types: bool,
    /// Reject string values containing control characters below U+0020
    /// other than tab, carriage return and line feed.
    pub check_control_chars: bool,
    /// Reject list fields holding more elements than their declared maximum.
    pub enforce_max_cardinality: bool,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            check_reference_types: true,
            check_control_chars: true,
            enforce_max_cardinality: true,
        }
    }
}

impl ModelConfig {
    /// Configuration that only enforces cardinality, choice membership and
    /// emptiness.
    pub fn lenient() -> Self {
        Self {
            check_reference_types: false,
            check_control_chars: false,
            enforce_max_cardinality: false,
        }
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: ModelConfig = serde_yaml::from_str(yaml)?;
        tracing::debug!(?config, "loaded model config from YAML");
        Ok(config)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: ModelConfig = serde_json::from_str(json)?;
        tracing::debug!(?config, "loaded model config from JSON");
        Ok(config)
    }

    pub fn with_reference_type_checks(mut self, enabled: bool) -> Self {
        self.check_reference_types = enabled;
        self
    }

    pub fn with_control_char_checks(mut self, enabled: bool) -> Self {
        self.check_control_chars = enabled;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_keys_fall_back_to_defaults() {
        let config = ModelConfig::from_yaml_str("checkReferenceTypes: false\n").unwrap();
        assert!(!config.check_reference_types);
        assert!(config.check_control_chars);
        assert!(config.enforce_max_cardinality);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = ModelConfig::from_json_str(r#"{"checkEverything": true}"#).unwrap_err();
        assert!(matches!(err, crate::Error::Json(_)));
    }
}
