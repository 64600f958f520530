//! Fallback for labels without a registered strategy

use super::{Completion, ExtractionStrategy};
use crate::aggregator::TypeBucket;
use claimdesk_domain::{DocumentType, ExtractionRecord};
use tracing::warn;

/// Sentinel strategy for unregistered labels
///
/// Produces an error record naming the label without calling the model.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoStrategy;

impl ExtractionStrategy for NoStrategy {
    fn document_type(&self) -> DocumentType {
        DocumentType::unknown()
    }

    fn extract(&self, _llm: &dyn Completion, bucket: &TypeBucket) -> ExtractionRecord {
        warn!(doc_type = %bucket.doc_type, pages = bucket.pages.len(), "No extraction strategy");
        ExtractionRecord::error(
            bucket.doc_type.clone(),
            format!("no strategy defined for document type: {}", bucket.doc_type),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use claimdesk_llm::MockProvider;

    #[test]
    fn test_no_model_call() {
        let llm = MockProvider::new("{}");
        let bucket = TypeBucket {
            doc_type: DocumentType::Unknown("lab_report".to_string()),
            pages: vec!["Haemoglobin 13.2".to_string()],
        };

        let record = NoStrategy.extract(&llm, &bucket);

        assert_eq!(llm.call_count(), 0);
        assert_eq!(record.doc_type, DocumentType::Unknown("lab_report".to_string()));
        assert_eq!(
            record.get_str("error"),
            Some("no strategy defined for document type: lab_report")
        );
    }
}
