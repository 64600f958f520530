//! Configuration file parsing for the server.
//!
//! Loads settings from TOML files including bind address, intake limits,
//! the inference backend, and the nested pipeline and validation sections.

use crate::intake::IntakePolicy;
use claimdesk_extractor::PipelineConfig;
use claimdesk_gatekeeper::ValidationConfig;
use claimdesk_llm::ollama::call_budget;
use claimdesk_llm::{LlmError, OllamaProvider};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Server configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse TOML
    #[error("Failed to parse config TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Missing required field
    #[error("Missing required configuration field: {0}")]
    MissingField(String),

    /// A value out of range
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Server configuration loaded from TOML
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Bind address (e.g., "127.0.0.1")
    pub bind_address: String,

    /// Bind port (e.g., 8000)
    pub bind_port: u16,

    /// Content type every uploaded part must carry
    #[serde(default = "default_content_type")]
    pub accepted_content_type: String,

    /// Request body limit in bytes
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,

    /// Inference backend
    #[serde(default)]
    pub llm: LlmSettings,

    /// Pipeline tuning
    #[serde(default)]
    pub pipeline: PipelineConfig,

    /// Completeness rules
    #[serde(default)]
    pub validation: ValidationConfig,
}

/// Ollama connection settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LlmSettings {
    /// Base URL of the Ollama API
    pub endpoint: String,

    /// Model used for both classification and extraction
    pub model: String,

    /// Attempts per request, including the first
    pub max_retries: u32,

    /// HTTP timeout per attempt (seconds)
    pub request_timeout_secs: u64,
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:11434".to_string(),
            model: "llama3.1".to_string(),
            max_retries: 3,
            request_timeout_secs: 35,
        }
    }
}

impl LlmSettings {
    /// HTTP timeout as a Duration
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Longest one provider call can run, retries and backoff included
    pub fn call_budget(&self) -> Duration {
        call_budget(self.request_timeout(), self.max_retries)
    }

    /// Build the provider these settings describe
    ///
    /// The provider wraps a blocking HTTP client; call this off the async
    /// workers.
    pub fn build_provider(&self) -> Result<OllamaProvider, LlmError> {
        Ok(
            OllamaProvider::with_timeout(&self.endpoint, &self.model, self.request_timeout())?
                .with_max_retries(self.max_retries),
        )
    }
}

fn default_content_type() -> String {
    "application/pdf".to_string()
}

/// Default body limit: 50 MB
fn default_max_upload_bytes() -> usize {
    50 * 1024 * 1024
}

impl ServerConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Parse and validate configuration from a TOML string
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        let config: ServerConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Check required fields and ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.llm.model.is_empty() {
            return Err(ConfigError::MissingField("llm.model".to_string()));
        }
        if self.accepted_content_type.is_empty() {
            return Err(ConfigError::MissingField(
                "accepted_content_type".to_string(),
            ));
        }
        self.pipeline
            .validate()
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;
        if self.pipeline.classification_delay_ms == 0 {
            return Err(ConfigError::Invalid(
                "pipeline.classification_delay_ms must be greater than 0".to_string(),
            ));
        }
        // The call timeout must cover every retry attempt and its backoff
        let budget = self.llm.call_budget();
        if self.pipeline.call_timeout() < budget {
            return Err(ConfigError::Invalid(format!(
                "pipeline.call_timeout_secs ({}) is shorter than the worst-case LLM call \
                 ({}s for {} attempts of {}s plus backoff)",
                self.pipeline.call_timeout_secs,
                budget.as_secs(),
                self.llm.max_retries.max(1),
                self.llm.request_timeout_secs
            )));
        }
        Ok(())
    }

    /// Configuration for a local Ollama with the default pacing
    pub fn local_default() -> Self {
        ServerConfig {
            bind_address: "127.0.0.1".to_string(),
            bind_port: 8000,
            accepted_content_type: default_content_type(),
            max_upload_bytes: default_max_upload_bytes(),
            llm: LlmSettings::default(),
            pipeline: PipelineConfig::default(),
            validation: ValidationConfig::default(),
        }
    }

    /// Get the full bind address (address:port)
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.bind_address, self.bind_port)
    }

    /// Intake rules derived from this configuration
    pub fn intake_policy(&self) -> IntakePolicy {
        IntakePolicy {
            max_documents: self.pipeline.max_documents,
            accepted_content_type: self.accepted_content_type.clone(),
            max_upload_bytes: self.max_upload_bytes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use claimdesk_domain::DocumentType;

    #[test]
    fn test_local_default() {
        let config = ServerConfig::local_default();
        assert_eq!(config.bind_addr(), "127.0.0.1:8000");
        assert_eq!(config.accepted_content_type, "application/pdf");
        assert_eq!(config.pipeline.classification_delay_ms, 10_000);
        assert!(config.llm.call_budget() <= config.pipeline.call_timeout());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_minimal_toml_uses_defaults() {
        let config = ServerConfig::from_toml(
            r#"
            bind_address = "0.0.0.0"
            bind_port = 9000
            "#,
        )
        .unwrap();

        assert_eq!(config.bind_addr(), "0.0.0.0:9000");
        assert_eq!(config.pipeline, PipelineConfig::default());
        assert_eq!(config.validation, ValidationConfig::default());
        assert_eq!(config.llm.endpoint, "http://localhost:11434");
        assert_eq!(config.max_upload_bytes, 50 * 1024 * 1024);
    }

    #[test]
    fn test_parse_full_toml() {
        let config = ServerConfig::from_toml(
            r#"
            bind_address = "127.0.0.1"
            bind_port = 8080
            accepted_content_type = "application/pdf"

            [llm]
            endpoint = "http://ollama:11434"
            model = "qwen2.5"
            max_retries = 5
            request_timeout_secs = 20

            [pipeline]
            classification_delay_ms = 2000
            max_documents = 3
            parallel_extraction = false

            [validation]
            required_documents = ["bill", "id"]
            flag_diagnostic_fields = false
            "#,
        )
        .unwrap();

        assert_eq!(config.llm.model, "qwen2.5");
        assert_eq!(config.llm.max_retries, 5);
        assert_eq!(config.llm.request_timeout(), Duration::from_secs(20));
        // 5 x 20s plus 1 + 2 + 4 + 8s of backoff
        assert_eq!(config.llm.call_budget(), Duration::from_secs(115));
        assert_eq!(config.pipeline.max_documents, 3);
        assert!(!config.pipeline.parallel_extraction);
        assert_eq!(
            config.validation.required_documents,
            vec![DocumentType::Bill, DocumentType::Id]
        );
        assert!(!config.validation.flag_diagnostic_fields);

        let policy = config.intake_policy();
        assert_eq!(policy.max_documents, 3);
    }

    #[test]
    fn test_empty_model_rejected() {
        let result = ServerConfig::from_toml(
            r#"
            bind_address = "127.0.0.1"
            bind_port = 8080

            [llm]
            model = ""
            "#,
        );
        assert!(matches!(result, Err(ConfigError::MissingField(_))));
    }

    #[test]
    fn test_invalid_pipeline_rejected() {
        let result = ServerConfig::from_toml(
            r#"
            bind_address = "127.0.0.1"
            bind_port = 8080

            [pipeline]
            max_documents = 0
            "#,
        );
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_zero_classification_delay_rejected() {
        let result = ServerConfig::from_toml(
            r#"
            bind_address = "127.0.0.1"
            bind_port = 8080

            [pipeline]
            classification_delay_ms = 0
            "#,
        );
        assert!(matches!(result, Err(ConfigError::Invalid(_))));

        let mut config = ServerConfig::local_default();
        config.pipeline = PipelineConfig::unthrottled();
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_call_timeout_must_cover_retries() {
        // 3 attempts of 2s plus 3s of backoff outlive a 1s pipeline timeout
        let result = ServerConfig::from_toml(
            r#"
            bind_address = "127.0.0.1"
            bind_port = 8080

            [llm]
            max_retries = 3
            request_timeout_secs = 2

            [pipeline]
            call_timeout_secs = 1
            "#,
        );
        match result {
            Err(ConfigError::Invalid(msg)) => assert!(msg.contains("call_timeout_secs"), "{}", msg),
            other => panic!("expected Invalid, got {:?}", other.map(|_| ())),
        }

        let config = ServerConfig::from_toml(
            r#"
            bind_address = "127.0.0.1"
            bind_port = 8080

            [llm]
            max_retries = 3
            request_timeout_secs = 2

            [pipeline]
            call_timeout_secs = 9
            "#,
        )
        .unwrap();
        assert_eq!(config.llm.call_budget(), Duration::from_secs(9));
    }

    #[test]
    fn test_shipped_config_is_valid_and_throttled() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/../../config/claimdesk.toml");
        let config = ServerConfig::from_file(path).unwrap();
        assert!(config.pipeline.classification_delay_ms > 0);
        assert!(config.llm.call_budget() <= config.pipeline.call_timeout());
    }

    #[test]
    fn test_missing_file() {
        let result = ServerConfig::from_file("/nonexistent/claimdesk.toml");
        assert!(matches!(result, Err(ConfigError::FileRead(_))));
    }
}
