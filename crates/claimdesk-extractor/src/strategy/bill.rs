//! Hospital bills and invoices

use super::ExtractionStrategy;
use crate::prompt::ExtractionPromptBuilder;
use claimdesk_domain::DocumentType;

/// Extracts hospital name, grand total and date of service
#[derive(Debug, Clone, Copy, Default)]
pub struct BillStrategy;

impl ExtractionStrategy for BillStrategy {
    fn document_type(&self) -> DocumentType {
        DocumentType::Bill
    }

    fn prompt(&self, full_text: &str) -> String {
        ExtractionPromptBuilder::new(DocumentType::Bill, full_text)
            .with_field_hint("date_of_service", "YYYY-MM-DD")
            .build()
    }
}
