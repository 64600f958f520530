//! Claimdesk LLM Provider Layer
//!
//! Pluggable implementations of the `LlmProvider` trait from
//! `claimdesk-domain`. The claim pipeline uses one provider for both page
//! classification and field extraction.
//!
//! # Providers
//!
//! - `MockProvider`: Deterministic mock for testing
//! - `OllamaProvider`: Local Ollama API integration
//!
//! # Examples
//!
//! ```
//! use claimdesk_llm::MockProvider;
//! use claimdesk_domain::traits::LlmProvider;
//!
//! let provider = MockProvider::new("bill");
//! let result = provider.generate("classify this page").unwrap();
//! assert_eq!(result, "bill");
//! ```

#![warn(missing_docs)]

pub mod ollama;

use claimdesk_domain::traits::LlmProvider as LlmProviderTrait;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use thiserror::Error;

pub use ollama::OllamaProvider;

/// Errors that can occur during LLM operations
#[derive(Error, Debug)]
pub enum LlmError {
    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// Invalid response from LLM
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Model not available
    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    /// Generic error
    #[error("LLM error: {0}")]
    Other(String),
}

#[derive(Debug, Clone)]
enum Scripted {
    Reply(String),
    Fail,
}

#[derive(Debug, Default)]
struct MockState {
    rules: Vec<(String, Scripted)>,
    prompts: Vec<String>,
}

/// Mock LLM provider for deterministic testing
///
/// Responses are scripted by prompt fragment: the first rule whose fragment
/// occurs in the prompt wins, otherwise the default response is returned.
/// Every prompt is recorded so tests can assert on call counts and content.
///
/// # Examples
///
/// ```
/// use claimdesk_llm::MockProvider;
/// use claimdesk_domain::traits::LlmProvider;
///
/// let mut provider = MockProvider::new("unknown");
/// provider.add_response("Tax Invoice", "bill");
/// provider.add_response("Aadhaar", "id");
///
/// assert_eq!(provider.generate("Page text: Tax Invoice #12").unwrap(), "bill");
/// assert_eq!(provider.generate("Page text: Aadhaar card").unwrap(), "id");
/// assert_eq!(provider.generate("Page text: blank").unwrap(), "unknown");
/// assert_eq!(provider.call_count(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct MockProvider {
    default_response: String,
    delay: Option<Duration>,
    state: Arc<Mutex<MockState>>,
}

impl MockProvider {
    /// Create a new MockProvider with a fixed response for all prompts
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            default_response: response.into(),
            delay: None,
            state: Arc::new(Mutex::new(MockState::default())),
        }
    }

    /// Block every call for `delay` before answering
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Answer `response` to any prompt containing `fragment`
    pub fn add_response(&mut self, fragment: impl Into<String>, response: impl Into<String>) {
        self.state()
            .rules
            .push((fragment.into(), Scripted::Reply(response.into())));
    }

    /// Fail any prompt containing `fragment`
    pub fn add_error(&mut self, fragment: impl Into<String>) {
        self.state().rules.push((fragment.into(), Scripted::Fail));
    }

    /// Get the number of times generate was called
    pub fn call_count(&self) -> usize {
        self.state().prompts.len()
    }

    /// Number of recorded prompts containing `fragment`
    pub fn calls_containing(&self, fragment: &str) -> usize {
        self.state()
            .prompts
            .iter()
            .filter(|prompt| prompt.contains(fragment))
            .count()
    }

    /// All prompts received so far, oldest first
    pub fn prompts(&self) -> Vec<String> {
        self.state().prompts.clone()
    }

    /// Reset the call count
    pub fn reset_call_count(&self) {
        self.state().prompts.clear();
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        // A panicking test thread must not poison every later assertion
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new("Default mock response")
    }
}

impl LlmProviderTrait for MockProvider {
    type Error = LlmError;

    fn generate(&self, prompt: &str) -> Result<String, Self::Error> {
        if let Some(delay) = self.delay {
            std::thread::sleep(delay);
        }

        let mut state = self.state();
        state.prompts.push(prompt.to_string());

        let scripted = state
            .rules
            .iter()
            .find(|(fragment, _)| prompt.contains(fragment.as_str()))
            .map(|(_, scripted)| scripted.clone());

        match scripted {
            Some(Scripted::Reply(response)) => Ok(response),
            Some(Scripted::Fail) => Err(LlmError::Other("Mock error".to_string())),
            None => Ok(self.default_response.clone()),
        }
    }

    fn generate_structured(&self, prompt: &str, _schema: &str) -> Result<String, Self::Error> {
        self.generate(prompt)
    }
}
