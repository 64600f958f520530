//! Types for pipeline input and output

use claimdesk_domain::{ClaimDecision, DocumentId, ExtractionRecord, Page, ValidationResult};
use serde::{Deserialize, Serialize};

/// One uploaded document, already split into page texts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmittedDocument {
    /// Identifier assigned at intake
    pub id: DocumentId,

    /// Original file name, for logging
    pub name: String,

    /// Page texts in page order
    pub pages: Vec<String>,
}

impl SubmittedDocument {
    /// Create a document with a fresh identifier
    pub fn new(name: impl Into<String>, pages: Vec<String>) -> Self {
        Self::with_id(DocumentId::new(), name, pages)
    }

    /// Create a document with a caller-supplied identifier
    pub fn with_id(id: DocumentId, name: impl Into<String>, pages: Vec<String>) -> Self {
        Self {
            id,
            name: name.into(),
            pages,
        }
    }

    /// Number of pages
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Convert into pipeline pages
    pub fn into_pages(self) -> Vec<Page> {
        let id = self.id;
        self.pages
            .into_iter()
            .enumerate()
            .map(|(index, text)| Page::new(id, index, text))
            .collect()
    }
}

/// Everything the pipeline reports for one claim
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClaimReport {
    /// Fixed success message
    pub message: String,

    /// One record per observed document type, in first-appearance order
    pub results: Vec<ExtractionRecord>,

    /// Missing documents and fields
    pub validation: ValidationResult,

    /// Approved or pending
    pub claim_decision: ClaimDecision,
}
