//! Configuration for the engine

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the engine
///
/// All timeouts apply to individual oracle calls and are enforced by the
/// engine, not the oracle backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Maximum input text length (characters)
    pub max_text_length: usize,

    /// Maximum time for an extraction call (seconds)
    pub extraction_timeout_secs: u64,

    /// Maximum time for a verification call (seconds)
    pub verification_timeout_secs: u64,

    /// Maximum time for an interaction-classification call (seconds)
    pub classification_timeout_secs: u64,

    /// Maximum time for a synthesis call (seconds)
    pub synthesis_timeout_secs: u64,
}

impl EngineConfig {
    /// Extraction timeout as a Duration
    pub fn extraction_timeout(&self) -> Duration {
        Duration::from_secs(self.extraction_timeout_secs)
    }

    /// Verification timeout as a Duration
    pub fn verification_timeout(&self) -> Duration {
        Duration::from_secs(self.verification_timeout_secs)
    }

    /// Classification timeout as a Duration
    pub fn classification_timeout(&self) -> Duration {
        Duration::from_secs(self.classification_timeout_secs)
    }

    /// Synthesis timeout as a Duration
    pub fn synthesis_timeout(&self) -> Duration {
        Duration::from_secs(self.synthesis_timeout_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_text_length == 0 {
            return Err("max_text_length must be greater than 0".to_string());
        }
        for (name, secs) in [
            ("extraction_timeout_secs", self.extraction_timeout_secs),
            ("verification_timeout_secs", self.verification_timeout_secs),
            ("classification_timeout_secs", self.classification_timeout_secs),
            ("synthesis_timeout_secs", self.synthesis_timeout_secs),
        ] {
            if secs == 0 {
                return Err(format!("{} must be greater than 0", name));
            }
        }
        Ok(())
    }

    /// Aggressive preset: shorter timeouts for interactive use
    pub fn aggressive() -> Self {
        Self {
            max_text_length: 20_000,
            extraction_timeout_secs: 60,
            verification_timeout_secs: 30,
            classification_timeout_secs: 30,
            synthesis_timeout_secs: 60,
        }
    }

    /// Lenient preset: longer timeouts for batch-quality analysis
    pub fn lenient() -> Self {
        Self {
            max_text_length: 100_000,
            extraction_timeout_secs: 300,
            verification_timeout_secs: 180,
            classification_timeout_secs: 180,
            synthesis_timeout_secs: 300,
        }
    }

    /// Load configuration from a TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to a TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}

impl Default for EngineConfig {
    /// Default configuration with balanced settings
    fn default() -> Self {
        Self {
            max_text_length: 50_000,
            extraction_timeout_secs: 120,
            verification_timeout_secs: 90,
            classification_timeout_secs: 90,
            synthesis_timeout_secs: 120,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(EngineConfig::default().validate().is_ok());
    }

    #[test]
    fn test_presets_are_valid() {
        assert!(EngineConfig::aggressive().validate().is_ok());
        assert!(EngineConfig::lenient().validate().is_ok());
    }

    #[test]
    fn test_invalid_max_text_length() {
        let mut config = EngineConfig::default();
        config.max_text_length = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_timeout_is_invalid() {
        let mut config = EngineConfig::default();
        config.classification_timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let config = EngineConfig::default();
        let toml_str = config.to_toml().unwrap();
        let parsed = EngineConfig::from_toml(&toml_str).unwrap();

        assert_eq!(config.max_text_length, parsed.max_text_length);
        assert_eq!(config.extraction_timeout_secs, parsed.extraction_timeout_secs);
        assert_eq!(config.synthesis_timeout_secs, parsed.synthesis_timeout_secs);
    }
}
