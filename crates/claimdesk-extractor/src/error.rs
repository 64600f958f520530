//! Error types for the Extractor

use thiserror::Error;

/// Errors that can occur in the claim pipeline
///
/// Only the document-count variants ever reach a caller of
/// `ClaimPipeline::process`; everything else is folded into an error record
/// for the affected document type.
#[derive(Error, Debug)]
pub enum ExtractorError {
    /// LLM provider error
    #[error("LLM error: {0}")]
    Llm(String),

    /// A submission with no documents
    #[error("No documents submitted")]
    NoDocuments,

    /// A submission over the per-claim document limit
    #[error("Max of {max} files allowed, got {submitted}")]
    TooManyDocuments {
        /// Number of documents submitted
        submitted: usize,
        /// Configured maximum
        max: usize,
    },

    /// Model output that is not a JSON object
    #[error("Invalid record format: {0}")]
    InvalidFormat(String),

    /// JSON parsing error
    #[error("JSON parse error: {0}")]
    JsonParse(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<serde_json::Error> for ExtractorError {
    fn from(e: serde_json::Error) -> Self {
        ExtractorError::JsonParse(e.to_string())
    }
}
