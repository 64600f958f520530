//! Validation and decision outcomes

use crate::DocumentType;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Completeness of a claim submission
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    /// Required document types with no record at all
    pub missing_documents: Vec<DocumentType>,

    /// Empty fields, formatted as `{type}_{field}`
    pub missing_details: Vec<String>,
}

impl ValidationResult {
    /// Whether nothing is missing
    pub fn is_complete(&self) -> bool {
        self.missing_documents.is_empty() && self.missing_details.is_empty()
    }
}

/// Verdict on a claim
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClaimStatus {
    /// Every required document is present and fully populated
    Approved,

    /// Something is missing; the claim waits
    Pending,
}

impl ClaimStatus {
    /// Get the status as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            ClaimStatus::Approved => "approved",
            ClaimStatus::Pending => "pending",
        }
    }
}

impl fmt::Display for ClaimStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Decision derived from a [`ValidationResult`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimDecision {
    /// Approved or pending
    pub status: ClaimStatus,

    /// Human-readable explanation
    pub reason: String,
}
