//! Configuration for the claim pipeline

use crate::ExtractorError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the claim pipeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Minimum spacing between classification calls (milliseconds)
    pub classification_delay_ms: u64,

    /// Maximum time for a single LLM call (seconds)
    pub call_timeout_secs: u64,

    /// Maximum documents accepted per claim
    pub max_documents: usize,

    /// Run the per-type extraction calls concurrently
    pub parallel_extraction: bool,
}

impl PipelineConfig {
    /// Get the classification spacing as a Duration
    pub fn classification_delay(&self) -> Duration {
        Duration::from_millis(self.classification_delay_ms)
    }

    /// Get the per-call timeout as a Duration
    pub fn call_timeout(&self) -> Duration {
        Duration::from_secs(self.call_timeout_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ExtractorError> {
        if self.max_documents == 0 {
            return Err(ExtractorError::Config(
                "max_documents must be greater than 0".to_string(),
            ));
        }
        if self.call_timeout_secs == 0 {
            return Err(ExtractorError::Config(
                "call_timeout_secs must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for PipelineConfig {
    /// Defaults sized for a rate-limited hosted model
    fn default() -> Self {
        Self {
            classification_delay_ms: 10_000,
            call_timeout_secs: 120,
            max_documents: 5,
            parallel_extraction: true,
        }
    }
}

impl PipelineConfig {
    /// Preset for a local backend with no rate limit
    pub fn unthrottled() -> Self {
        Self {
            classification_delay_ms: 0,
            call_timeout_secs: 60,
            ..Self::default()
        }
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, ExtractorError> {
        toml::from_str(toml_str)
            .map_err(|e| ExtractorError::Config(format!("Failed to parse TOML: {}", e)))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, ExtractorError> {
        toml::to_string_pretty(self)
            .map_err(|e| ExtractorError::Config(format!("Failed to serialize to TOML: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = PipelineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.classification_delay(), Duration::from_secs(10));
        assert_eq!(config.max_documents, 5);
    }

    #[test]
    fn test_unthrottled_config_is_valid() {
        let config = PipelineConfig::unthrottled();
        assert!(config.validate().is_ok());
        assert_eq!(config.classification_delay(), Duration::ZERO);
    }

    #[test]
    fn test_invalid_max_documents() {
        let mut config = PipelineConfig::default();
        config.max_documents = 0;
        assert!(matches!(config.validate(), Err(ExtractorError::Config(_))));
    }

    #[test]
    fn test_invalid_timeout() {
        let mut config = PipelineConfig::default();
        config.call_timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let config = PipelineConfig::unthrottled();
        let toml_str = config.to_toml().unwrap();
        let parsed = PipelineConfig::from_toml(&toml_str).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let parsed = PipelineConfig::from_toml("parallel_extraction = false").unwrap();
        assert!(!parsed.parallel_extraction);
        assert_eq!(parsed.classification_delay_ms, 10_000);
    }
}
