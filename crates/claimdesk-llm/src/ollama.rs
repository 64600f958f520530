//! Ollama Provider Implementation
//!
//! Provides integration with Ollama's local LLM API.
//!
//! # Features
//!
//! - Blocking HTTP communication with the Ollama generate API
//! - Configurable endpoint, model and request timeout
//! - Retry logic with exponential backoff
//! - Temperature pinned to 0 so classification and extraction are repeatable
//!
//! # Examples
//!
//! ```no_run
//! use claimdesk_llm::OllamaProvider;
//! use claimdesk_domain::traits::LlmProvider;
//!
//! let provider = OllamaProvider::new("http://localhost:11434", "llama3.1")?;
//! let label = provider.generate("Classify this page ...")?;
//! # Ok::<(), claimdesk_llm::LlmError>(())
//! ```

use crate::LlmError;
use claimdesk_domain::traits::LlmProvider as LlmProviderTrait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

/// Default Ollama API endpoint
pub const DEFAULT_ENDPOINT: &str = "http://localhost:11434";

/// Default timeout for LLM requests (30 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default number of retry attempts
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Ollama API provider for local LLM inference
pub struct OllamaProvider {
    endpoint: String,
    model: String,
    client: reqwest::blocking::Client,
    request_timeout: Duration,
    max_retries: u32,
}

/// Request body for Ollama generate API
#[derive(Serialize)]
struct OllamaGenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    format: Option<&'a str>,
    options: OllamaOptions,
}

#[derive(Serialize)]
struct OllamaOptions {
    temperature: f32,
}

/// Response from Ollama generate API
#[derive(Deserialize)]
struct OllamaGenerateResponse {
    response: String,
    #[allow(dead_code)]
    done: bool,
}

impl OllamaProvider {
    /// Create a new Ollama provider with the default request timeout
    ///
    /// # Parameters
    ///
    /// - `endpoint`: Ollama API endpoint (e.g., "http://localhost:11434")
    /// - `model`: Model to use (e.g., "llama3.1", "mistral")
    pub fn new(endpoint: impl Into<String>, model: impl Into<String>) -> Result<Self, LlmError> {
        Self::with_timeout(endpoint, model, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Create a new Ollama provider with an explicit request timeout
    pub fn with_timeout(
        endpoint: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, LlmError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LlmError::Other(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            model: model.into(),
            client,
            request_timeout: timeout,
            max_retries: DEFAULT_MAX_RETRIES,
        })
    }

    /// Create a new Ollama provider against `http://localhost:11434`
    pub fn default_endpoint(model: impl Into<String>) -> Result<Self, LlmError> {
        Self::new(DEFAULT_ENDPOINT, model)
    }

    /// Set the maximum number of attempts per call (at least one)
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries.max(1);
        self
    }

    /// Name of the model this provider talks to
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Worst-case duration of one call with this provider's retry policy
    pub fn max_call_duration(&self) -> Duration {
        call_budget(self.request_timeout, self.max_retries)
    }

    fn call(&self, prompt: &str, format: Option<&str>) -> Result<String, LlmError> {
        let url = format!("{}/api/generate", self.endpoint);
        let body = OllamaGenerateRequest {
            model: &self.model,
            prompt,
            stream: false,
            format,
            options: OllamaOptions { temperature: 0.0 },
        };

        let mut last_error = LlmError::Communication("No attempt made".to_string());
        for attempt in 1..=self.max_retries {
            match self.attempt(&url, &body) {
                Ok(text) => return Ok(text),
                Err(Failure::Fatal(e)) => return Err(e),
                Err(Failure::Retryable(e)) => last_error = e,
            }

            if attempt < self.max_retries {
                let delay = backoff(attempt);
                warn!(attempt, ?delay, error = %last_error, "Ollama call failed, retrying");
                std::thread::sleep(delay);
            }
        }

        Err(last_error)
    }

    fn attempt(&self, url: &str, body: &OllamaGenerateRequest<'_>) -> Result<String, Failure> {
        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .map_err(|e| Failure::Retryable(LlmError::Communication(format!("Request failed: {}", e))))?;

        match response.status() {
            status if status.is_success() => response
                .json::<OllamaGenerateResponse>()
                .map(|parsed| parsed.response)
                .map_err(|e| {
                    Failure::Fatal(LlmError::InvalidResponse(format!(
                        "Failed to parse response: {}",
                        e
                    )))
                }),
            reqwest::StatusCode::NOT_FOUND => {
                Err(Failure::Fatal(LlmError::ModelNotAvailable(self.model.clone())))
            }
            reqwest::StatusCode::TOO_MANY_REQUESTS => {
                Err(Failure::Retryable(LlmError::RateLimitExceeded))
            }
            status => {
                let detail = response
                    .text()
                    .unwrap_or_else(|_| "Unknown error".to_string());
                Err(Failure::Retryable(LlmError::Communication(format!(
                    "HTTP {}: {}",
                    status, detail
                ))))
            }
        }
    }
}

/// Outcome of one failed attempt
enum Failure {
    /// Worth another attempt after backing off
    Retryable(LlmError),
    /// Retrying cannot help
    Fatal(LlmError),
}

/// Delay after the given attempt: 1s, 2s, 4s, ...
fn backoff(attempt: u32) -> Duration {
    Duration::from_secs(1u64 << (attempt.saturating_sub(1)).min(6))
}

/// Longest a single `generate` call can run: every attempt timing out, plus
/// the backoff between attempts
///
/// A caller that gives up on a call sooner leaves the remaining attempts
/// running against the backend.
pub fn call_budget(request_timeout: Duration, max_retries: u32) -> Duration {
    let attempts = max_retries.max(1);
    (1..attempts).fold(request_timeout.saturating_mul(attempts), |total, attempt| {
        total.saturating_add(backoff(attempt))
    })
}

impl LlmProviderTrait for OllamaProvider {
    type Error = LlmError;

    fn generate(&self, prompt: &str) -> Result<String, Self::Error> {
        debug!(model = %self.model, prompt_len = prompt.len(), "Ollama generate");
        self.call(prompt, None)
    }

    fn generate_structured(&self, prompt: &str, _schema: &str) -> Result<String, Self::Error> {
        // Ollama's JSON mode constrains output to a JSON value; the schema
        // itself is already spelled out in the prompt
        debug!(model = %self.model, prompt_len = prompt.len(), "Ollama generate (json)");
        self.call(prompt, Some("json"))
    }
}
