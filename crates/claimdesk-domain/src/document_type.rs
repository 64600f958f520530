//! Document type module - the label set produced by page classification

use std::fmt;

/// Label used when classification produced nothing usable
pub const UNKNOWN_LABEL: &str = "unknown";

/// Semantic type of a page (or of a bucket of pages)
///
/// The four known types each have a fixed field schema. Any other label the
/// classifier returns is carried verbatim in [`DocumentType::Unknown`] so the
/// pipeline can report it instead of dropping the pages.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DocumentType {
    /// Hospital bill, invoice or receipt
    Bill,

    /// Discharge summary or clinical summary
    DischargeSummary,

    /// Insurance claim form or insurer correspondence
    InsuranceForm,

    /// Identity document (government ID, membership card)
    Id,

    /// Any label outside the known set, already normalized
    Unknown(String),
}

impl DocumentType {
    /// The known types, in the order they are required for a claim
    pub const KNOWN: [DocumentType; 4] = [
        DocumentType::Bill,
        DocumentType::DischargeSummary,
        DocumentType::InsuranceForm,
        DocumentType::Id,
    ];

    /// Parse a raw classifier label
    ///
    /// The label is trimmed and lower-cased first, so `" Bill "` and `"BILL"`
    /// land in the same bucket. Empty labels become the `unknown` sentinel.
    ///
    /// # Examples
    ///
    /// ```
    /// use claimdesk_domain::DocumentType;
    ///
    /// assert_eq!(DocumentType::from_label(" Discharge_Summary\n"), DocumentType::DischargeSummary);
    /// assert_eq!(
    ///     DocumentType::from_label("prescription"),
    ///     DocumentType::Unknown("prescription".to_string())
    /// );
    /// ```
    pub fn from_label(label: &str) -> Self {
        let normalized = label.trim().to_lowercase();
        match normalized.as_str() {
            "bill" => DocumentType::Bill,
            "discharge_summary" => DocumentType::DischargeSummary,
            "insurance_form" => DocumentType::InsuranceForm,
            "id" => DocumentType::Id,
            "" => DocumentType::unknown(),
            _ => DocumentType::Unknown(normalized),
        }
    }

    /// The sentinel used when classification failed outright
    pub fn unknown() -> Self {
        DocumentType::Unknown(UNKNOWN_LABEL.to_string())
    }

    /// Get the label as a string
    pub fn as_str(&self) -> &str {
        match self {
            DocumentType::Bill => "bill",
            DocumentType::DischargeSummary => "discharge_summary",
            DocumentType::InsuranceForm => "insurance_form",
            DocumentType::Id => "id",
            DocumentType::Unknown(label) => label,
        }
    }

    /// Whether this is one of the four known types
    pub fn is_known(&self) -> bool {
        !matches!(self, DocumentType::Unknown(_))
    }

    /// Fields the extractor must populate for this type
    ///
    /// Unknown types have no schema.
    pub fn required_fields(&self) -> &'static [&'static str] {
        match self {
            DocumentType::Bill => &["hospital_name", "grand_total", "date_of_service"],
            DocumentType::DischargeSummary => {
                &["patient_name", "diagnosis", "admission_date", "discharge_date"]
            }
            DocumentType::InsuranceForm => &["claimNumber", "claim_submission"],
            DocumentType::Id => &["patient_name", "identification_number"],
            DocumentType::Unknown(_) => &[],
        }
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for DocumentType {
    fn from(label: String) -> Self {
        DocumentType::from_label(&label)
    }
}

impl From<DocumentType> for String {
    fn from(doc_type: DocumentType) -> Self {
        doc_type.as_str().to_string()
    }
}

impl serde::Serialize for DocumentType {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> serde::Deserialize<'de> for DocumentType {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        Ok(DocumentType::from_label(&label))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_labels_round_trip() {
        for doc_type in DocumentType::KNOWN {
            assert_eq!(DocumentType::from_label(doc_type.as_str()), doc_type);
            assert!(doc_type.is_known());
        }
    }

    #[test]
    fn test_casing_and_whitespace_normalized() {
        assert_eq!(DocumentType::from_label("  BILL "), DocumentType::Bill);
        assert_eq!(DocumentType::from_label("Insurance_Form\n"), DocumentType::InsuranceForm);
        assert_eq!(DocumentType::from_label("ID"), DocumentType::Id);
    }

    #[test]
    fn test_unrecognized_label_is_kept() {
        let doc_type = DocumentType::from_label("  Lab_Report ");
        assert_eq!(doc_type, DocumentType::Unknown("lab_report".to_string()));
        assert_eq!(doc_type.as_str(), "lab_report");
        assert!(!doc_type.is_known());
        assert!(doc_type.required_fields().is_empty());
    }

    #[test]
    fn test_empty_label_is_unknown_sentinel() {
        assert_eq!(DocumentType::from_label("   "), DocumentType::unknown());
        assert_eq!(DocumentType::unknown().as_str(), UNKNOWN_LABEL);
    }

    #[test]
    fn test_required_fields() {
        assert_eq!(
            DocumentType::Bill.required_fields(),
            &["hospital_name", "grand_total", "date_of_service"]
        );
        assert_eq!(
            DocumentType::InsuranceForm.required_fields(),
            &["claimNumber", "claim_submission"]
        );
        assert_eq!(DocumentType::DischargeSummary.required_fields().len(), 4);
        assert_eq!(DocumentType::Id.required_fields().len(), 2);
    }

    #[test]
    fn test_serde_as_label_string() {
        let json = serde_json::to_string(&DocumentType::DischargeSummary).unwrap();
        assert_eq!(json, "\"discharge_summary\"");

        let parsed: DocumentType = serde_json::from_str("\"Other\"").unwrap();
        assert_eq!(parsed, DocumentType::Unknown("other".to_string()));
    }
}
