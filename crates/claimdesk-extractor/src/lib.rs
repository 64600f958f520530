//! Claimdesk Extractor
//!
//! The claim document pipeline: classifies every submitted page, buckets
//! pages by document type, extracts a structured record per type with an
//! LLM, and hands the records to the Gatekeeper for a claim decision.
//!
//! # Architecture
//!
//! ```text
//! Pages → PageClassifier (throttled) → aggregate → ExtractionRegistry
//!       → ValidationEngine → decide → ClaimReport
//! ```
//!
//! # Key Features
//!
//! - **Throttled classification**: one LLM call per page, paced by a
//!   [`Throttle`] so a batch of N pages costs at least N intervals
//! - **Order-preserving buckets**: pages keep submission order inside a type
//! - **Per-type strategies**: one extraction call per observed type over the
//!   whole bucket, so fields split across pages are still seen together
//! - **Contained failures**: malformed output, collaborator faults and
//!   timeouts degrade one record, never the whole claim
//!
//! # Example Usage
//!
//! ```no_run
//! use claimdesk_extractor::{ClaimPipeline, PipelineConfig, SubmittedDocument};
//! use claimdesk_gatekeeper::ValidationConfig;
//! use claimdesk_llm::MockProvider;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let llm = MockProvider::new("bill");
//! let pipeline = ClaimPipeline::new(llm, PipelineConfig::default(), ValidationConfig::default());
//!
//! let document = SubmittedDocument::new("invoice.pdf", vec!["Tax Invoice ...".to_string()]);
//! let report = pipeline.process(vec![document]).await?;
//!
//! println!("Decision: {}", report.claim_decision.status);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod aggregator;
mod classifier;
mod config;
mod error;
mod parser;
mod pipeline;
mod prompt;
mod registry;
mod strategy;
mod throttle;
mod types;


pub use aggregator::{aggregate, TypeBucket, TypeBuckets};
pub use classifier::PageClassifier;
pub use config::PipelineConfig;
pub use error::ExtractorError;
pub use parser::{parse_record_fields, strip_code_fence, INVALID_JSON};
pub use pipeline::{ClaimPipeline, PROCESSED_MESSAGE};
pub use registry::ExtractionRegistry;
pub use strategy::{
    BillStrategy, Completion, DischargeSummaryStrategy, ExtractionStrategy, IdStrategy,
    InsuranceFormStrategy, NoStrategy,
};
pub use throttle::Throttle;
pub use types::{ClaimReport, SubmittedDocument};
