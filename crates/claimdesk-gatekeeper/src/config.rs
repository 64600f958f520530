//! Gatekeeper configuration

use claimdesk_domain::DocumentType;
use serde::{Deserialize, Serialize};

/// Configuration for validation rules
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Document types every claim must include, in reporting order
    pub required_documents: Vec<DocumentType>,

    /// Treat an error record's own `error`/`raw_response` keys as fields
    ///
    /// When enabled an error record with an empty `raw_response` reports
    /// `{type}_raw_response` as a missing detail.
    pub flag_diagnostic_fields: bool,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            required_documents: DocumentType::KNOWN.to_vec(),
            flag_diagnostic_fields: true,
        }
    }
}

impl ValidationConfig {
    /// Create a configuration that only reports schema fields
    pub fn schema_only() -> Self {
        Self {
            flag_diagnostic_fields: false,
            ..Self::default()
        }
    }
}
