//! Trait definitions for external interactions
//!
//! These traits define the boundaries between the claim pipeline and its
//! collaborators. Implementations live in other crates.

/// Trait for LLM provider operations
///
/// Used for both page classification and field extraction.
/// Implemented by the infrastructure layer (claimdesk-llm).
pub trait LlmProvider {
    /// Error type for LLM operations
    type Error;

    /// Generate text completion
    fn generate(&self, prompt: &str) -> Result<String, Self::Error>;

    /// Generate output that should conform to a JSON schema description
    ///
    /// Providers without a structured mode fall back to plain generation.
    fn generate_structured(&self, prompt: &str, schema: &str) -> Result<String, Self::Error>;
}

/// Trait for turning an uploaded document into per-page text
///
/// Implemented by the transport layer (claimdesk-server).
pub trait PageTextSource {
    /// Error type for text extraction
    type Error;

    /// Extract the text of every page, in page order
    fn page_texts(&self, document: &[u8]) -> Result<Vec<String>, Self::Error>;
}
