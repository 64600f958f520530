//! Completeness validation over extraction records

use crate::ValidationConfig;
use claimdesk_domain::record::{ERROR_KEY, RAW_RESPONSE_KEY};
use claimdesk_domain::{is_empty_value, DocumentType, ExtractionRecord, ValidationResult};
use std::collections::HashSet;
use tracing::debug;

/// Checks a claim's records for missing documents and empty fields
#[derive(Debug, Clone, Default)]
pub struct ValidationEngine {
    config: ValidationConfig,
}

impl ValidationEngine {
    /// Create a new engine with the given configuration
    pub fn new(config: ValidationConfig) -> Self {
        Self { config }
    }

    /// The active configuration
    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }

    /// Validate the records produced for one claim
    ///
    /// `missing_documents` lists every required type with no record,
    /// error records included as present. `missing_details` walks each
    /// record's schema fields first (absent counts as empty), then any
    /// other key in record order, skipping `type`.
    pub fn validate(&self, records: &[ExtractionRecord]) -> ValidationResult {
        let present: HashSet<&DocumentType> = records.iter().map(|r| &r.doc_type).collect();

        let missing_documents: Vec<DocumentType> = self
            .config
            .required_documents
            .iter()
            .filter(|required| !present.contains(required))
            .cloned()
            .collect();

        let mut missing_details = Vec::new();
        for record in records {
            self.collect_missing_fields(record, &mut missing_details);
        }

        debug!(
            "Validation: {} missing documents, {} missing details",
            missing_documents.len(),
            missing_details.len()
        );

        ValidationResult {
            missing_documents,
            missing_details,
        }
    }

    fn collect_missing_fields(&self, record: &ExtractionRecord, out: &mut Vec<String>) {
        let schema = record.doc_type.required_fields();

        for field in schema {
            if record.is_field_empty(field) {
                out.push(detail_key(&record.doc_type, field));
            }
        }

        for (key, value) in &record.fields {
            if key == "type" || schema.iter().any(|field| field == key) {
                continue;
            }
            if !self.config.flag_diagnostic_fields && is_diagnostic(key) {
                continue;
            }
            if is_empty_value(value) {
                out.push(detail_key(&record.doc_type, key));
            }
        }
    }
}

fn is_diagnostic(key: &str) -> bool {
    key == ERROR_KEY || key == RAW_RESPONSE_KEY
}

fn detail_key(doc_type: &DocumentType, field: &str) -> String {
    format!("{}_{}", doc_type, field)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn record(doc_type: DocumentType, value: Value) -> ExtractionRecord {
        ExtractionRecord::new(doc_type, value.as_object().cloned().unwrap())
    }

    fn complete_records() -> Vec<ExtractionRecord> {
        vec![
            record(
                DocumentType::Bill,
                json!({"hospital_name": "City Care", "grand_total": "12400", "date_of_service": "2024-03-02"}),
            ),
            record(
                DocumentType::DischargeSummary,
                json!({
                    "patient_name": "Asha Rao",
                    "diagnosis": "Appendicitis",
                    "admission_date": "2024-02-27",
                    "discharge_date": "2024-03-02"
                }),
            ),
            record(
                DocumentType::InsuranceForm,
                json!({"claimNumber": "CLM-881", "claim_submission": "submitted"}),
            ),
            record(
                DocumentType::Id,
                json!({"patient_name": "Asha Rao", "identification_number": "XXXX-1234"}),
            ),
        ]
    }

    #[test]
    fn test_complete_claim() {
        let engine = ValidationEngine::default();
        let result = engine.validate(&complete_records());
        assert!(result.missing_documents.is_empty());
        assert!(result.missing_details.is_empty());
    }

    #[test]
    fn test_missing_documents_in_required_order() {
        let engine = ValidationEngine::default();
        let records: Vec<_> = complete_records()
            .into_iter()
            .filter(|r| matches!(r.doc_type, DocumentType::Bill | DocumentType::DischargeSummary))
            .collect();

        let result = engine.validate(&records);
        assert_eq!(
            result.missing_documents,
            vec![DocumentType::InsuranceForm, DocumentType::Id]
        );
        assert!(result.missing_details.is_empty());
    }

    #[test]
    fn test_empty_fields_reported() {
        let engine = ValidationEngine::default();
        let records = vec![record(
            DocumentType::Bill,
            json!({"hospital_name": "", "grand_total": null, "date_of_service": "2024-03-02"}),
        )];

        let result = engine.validate(&records);
        assert_eq!(
            result.missing_details,
            vec!["bill_hospital_name", "bill_grand_total"]
        );
    }

    #[test]
    fn test_zero_and_false_are_data() {
        let engine = ValidationEngine::default();
        let records = vec![record(
            DocumentType::Bill,
            json!({"hospital_name": "City Care", "grand_total": 0, "date_of_service": "2024-03-02", "paid": false}),
        )];

        let result = engine.validate(&records);
        assert!(result.missing_details.is_empty());
    }

    #[test]
    fn test_absent_schema_field_reported() {
        let engine = ValidationEngine::default();
        let records = vec![record(DocumentType::Id, json!({"patient_name": "Asha Rao"}))];

        let result = engine.validate(&records);
        assert_eq!(result.missing_details, vec!["id_identification_number"]);
    }

    #[test]
    fn test_extra_keys_checked_after_schema() {
        let engine = ValidationEngine::default();
        let records = vec![record(
            DocumentType::InsuranceForm,
            json!({"policy_holder": [], "claimNumber": "", "claim_submission": "submitted"}),
        )];

        let result = engine.validate(&records);
        assert_eq!(
            result.missing_details,
            vec!["insurance_form_claimNumber", "insurance_form_policy_holder"]
        );
    }

    #[test]
    fn test_error_record_reports_every_schema_field() {
        let engine = ValidationEngine::default();
        let records = vec![ExtractionRecord::error_with_raw(
            DocumentType::DischargeSummary,
            "Invalid JSON returned",
            "```json\n{oops\n```",
        )];

        let result = engine.validate(&records);
        assert_eq!(
            result.missing_details,
            vec![
                "discharge_summary_patient_name",
                "discharge_summary_diagnosis",
                "discharge_summary_admission_date",
                "discharge_summary_discharge_date",
            ]
        );
        // The error record still counts as a produced document
        assert!(!result
            .missing_documents
            .contains(&DocumentType::DischargeSummary));
    }

    #[test]
    fn test_empty_raw_response_flag_is_configurable() {
        let records = vec![ExtractionRecord::error_with_raw(
            DocumentType::Id,
            "Invalid JSON returned",
            "",
        )];

        let flagged = ValidationEngine::default().validate(&records);
        assert!(flagged.missing_details.contains(&"id_raw_response".to_string()));

        let schema_only = ValidationEngine::new(ValidationConfig::schema_only()).validate(&records);
        assert_eq!(
            schema_only.missing_details,
            vec!["id_patient_name", "id_identification_number"]
        );
    }

    #[test]
    fn test_unknown_type_record() {
        let engine = ValidationEngine::default();
        let unknown = DocumentType::Unknown("prescription".to_string());
        let records = vec![ExtractionRecord::error(
            unknown,
            "no strategy defined for document type: prescription",
        )];

        let result = engine.validate(&records);
        assert!(result.missing_details.is_empty());
        assert_eq!(result.missing_documents.len(), 4);
    }

    #[test]
    fn test_custom_required_documents() {
        let engine = ValidationEngine::new(ValidationConfig {
            required_documents: vec![DocumentType::Bill],
            flag_diagnostic_fields: true,
        });

        let result = engine.validate(&complete_records()[..1]);
        assert!(result.missing_documents.is_empty());
    }
}
