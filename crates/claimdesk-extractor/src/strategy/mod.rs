//! Per-type extraction strategies
//!
//! Each document type has one strategy. A strategy decides the prompt and
//! schema for its type and may post-process the parsed record; the shared
//! [`ExtractionStrategy::extract`] driver handles the model call and turns
//! every failure into an error record.

mod bill;
mod discharge_summary;
mod id;
mod insurance_form;
mod no_strategy;

pub use bill::BillStrategy;
pub use discharge_summary::DischargeSummaryStrategy;
pub use id::IdStrategy;
pub use insurance_form::InsuranceFormStrategy;
pub use no_strategy::NoStrategy;

use crate::aggregator::TypeBucket;
use crate::error::ExtractorError;
use crate::parser::{parse_record_fields, INVALID_JSON};
use crate::prompt::{schema_hint, ExtractionPromptBuilder};
use claimdesk_domain::traits::LlmProvider;
use claimdesk_domain::{DocumentType, ExtractionRecord};
use std::fmt::Display;
use tracing::{debug, warn};

/// Object-safe view of an LLM provider
///
/// Strategies are stored as trait objects, so they cannot be generic over
/// the provider. Every [`LlmProvider`] with a displayable error is a
/// `Completion`.
pub trait Completion: Send + Sync {
    /// Plain text completion
    fn complete(&self, prompt: &str) -> Result<String, ExtractorError>;

    /// Completion constrained to a JSON shape
    fn complete_json(&self, prompt: &str, schema: &str) -> Result<String, ExtractorError>;
}

impl<L> Completion for L
where
    L: LlmProvider + Send + Sync,
    L::Error: Display,
{
    fn complete(&self, prompt: &str) -> Result<String, ExtractorError> {
        self.generate(prompt)
            .map_err(|e| ExtractorError::Llm(e.to_string()))
    }

    fn complete_json(&self, prompt: &str, schema: &str) -> Result<String, ExtractorError> {
        self.generate_structured(prompt, schema)
            .map_err(|e| ExtractorError::Llm(e.to_string()))
    }
}

/// Extraction behavior for one document type
pub trait ExtractionStrategy: Send + Sync {
    /// The type this strategy handles
    fn document_type(&self) -> DocumentType;

    /// Build the extraction prompt over a bucket's full text
    fn prompt(&self, full_text: &str) -> String {
        ExtractionPromptBuilder::new(self.document_type(), full_text).build()
    }

    /// JSON shape passed to providers with a structured mode
    fn schema(&self) -> String {
        schema_hint(&self.document_type())
    }

    /// Post-process a successfully parsed record
    fn refine(&self, record: ExtractionRecord, _full_text: &str) -> ExtractionRecord {
        record
    }

    /// Run one extraction call over the bucket
    ///
    /// Never fails: a provider fault yields `Extraction failed: <cause>` and
    /// unparseable output yields an `Invalid JSON returned` record that keeps
    /// the raw response.
    fn extract(&self, llm: &dyn Completion, bucket: &TypeBucket) -> ExtractionRecord {
        let full_text = bucket.full_text();
        let prompt = self.prompt(&full_text);

        let raw = match llm.complete_json(&prompt, &self.schema()) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(doc_type = %bucket.doc_type, "Extraction call failed: {}", e);
                return ExtractionRecord::error(
                    bucket.doc_type.clone(),
                    format!("Extraction failed: {}", cause(&e)),
                );
            }
        };

        match parse_record_fields(&raw) {
            Ok(fields) => {
                debug!(doc_type = %bucket.doc_type, fields = fields.len(), "Parsed record");
                let record = ExtractionRecord::new(bucket.doc_type.clone(), fields);
                self.refine(record, &full_text)
            }
            Err(e) => {
                warn!(doc_type = %bucket.doc_type, "Unparseable extraction output: {}", e);
                ExtractionRecord::error_with_raw(bucket.doc_type.clone(), INVALID_JSON, raw)
            }
        }
    }
}

fn cause(error: &ExtractorError) -> String {
    match error {
        ExtractorError::Llm(message) => message.clone(),
        other => other.to_string(),
    }
}
