//! Discharge summaries

use super::ExtractionStrategy;
use crate::prompt::ExtractionPromptBuilder;
use claimdesk_domain::DocumentType;

/// Extracts patient name, diagnosis and the admission window
#[derive(Debug, Clone, Copy, Default)]
pub struct DischargeSummaryStrategy;

impl ExtractionStrategy for DischargeSummaryStrategy {
    fn document_type(&self) -> DocumentType {
        DocumentType::DischargeSummary
    }

    fn prompt(&self, full_text: &str) -> String {
        ExtractionPromptBuilder::new(DocumentType::DischargeSummary, full_text)
            .with_field_hint("admission_date", "YYYY-MM-DD")
            .with_field_hint("discharge_date", "YYYY-MM-DD")
            .with_note("The summary may span several pages; admission and discharge dates are often on different pages")
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_requests_dates() {
        let prompt = DischargeSummaryStrategy.prompt("Date of Admission: 27/02/2024");
        assert!(prompt.contains("- type: \"discharge_summary\""));
        assert!(prompt.contains("- patient_name"));
        assert!(prompt.contains("- diagnosis"));
        assert!(prompt.contains("- admission_date (in YYYY-MM-DD)"));
        assert!(prompt.contains("- discharge_date (in YYYY-MM-DD)"));
        assert!(prompt.contains("Notes:"));
    }

    #[test]
    fn test_admission_date_listed_once() {
        let prompt = DischargeSummaryStrategy.prompt("x");
        assert_eq!(prompt.matches("- admission_date").count(), 1);
    }
}
