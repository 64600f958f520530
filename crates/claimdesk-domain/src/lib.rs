//! Claimdesk Domain Layer
//!
//! This crate contains the data model shared by every stage of the claim
//! document pipeline, plus the trait interfaces for the external
//! collaborators (inference backend, page text extraction).
//!
//! ## Key Concepts
//!
//! - **Label**: the classification outcome for one page ([`DocumentType`])
//! - **Page**: the text of one page of one uploaded document
//! - **Bucket**: all page texts sharing a label, in submission order
//! - **Extraction record**: the structured fields pulled out of one bucket
//! - **Claim decision**: the binary approved/pending verdict
//!
//! ## Architecture
//!
//! - Pure data and trait definitions only
//! - Infrastructure implementations live in other crates
//! - Serialization is JSON-shaped because records mirror model output

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod document_type;
pub mod page;
pub mod record;
pub mod traits;
pub mod verdict;

// Re-exports for convenience
pub use document_type::DocumentType;
pub use page::{ClassifiedPage, DocumentId, Page};
pub use record::{is_empty_value, ExtractionRecord};
pub use verdict::{ClaimDecision, ClaimStatus, ValidationResult};
