//! Claimdesk Gatekeeper
//!
//! Decides whether a claim is ready once extraction has finished.
//!
//! The Gatekeeper provides:
//! - Completeness validation (missing document types, empty fields)
//! - The binary approved/pending decision
//!
//! # Examples
//!
//! ```
//! use claimdesk_gatekeeper::{decide, ValidationConfig, ValidationEngine};
//! use claimdesk_domain::{ClaimStatus, DocumentType, ExtractionRecord};
//!
//! let engine = ValidationEngine::new(ValidationConfig::default());
//! let records = vec![ExtractionRecord::error(DocumentType::Bill, "Extraction failed: timeout")];
//!
//! let validation = engine.validate(&records);
//! assert_eq!(validation.missing_documents.len(), 3);
//! assert_eq!(decide(&validation).status, ClaimStatus::Pending);
//! ```

#![warn(missing_docs)]

mod config;
mod decision;
mod validator;

pub use config::ValidationConfig;
pub use decision::{decide, APPROVED_REASON, PENDING_REASON};
pub use validator::ValidationEngine;
