//! Identity documents

use super::ExtractionStrategy;
use claimdesk_domain::DocumentType;

/// Extracts the holder's name and identification number
#[derive(Debug, Clone, Copy, Default)]
pub struct IdStrategy;

impl ExtractionStrategy for IdStrategy {
    fn document_type(&self) -> DocumentType {
        DocumentType::Id
    }
}
