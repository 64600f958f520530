//! Extraction record module - structured fields pulled from one bucket

use crate::DocumentType;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Key holding the diagnostic message of an error record
pub const ERROR_KEY: &str = "error";

/// Key holding the unparsed model output of an error record
pub const RAW_RESPONSE_KEY: &str = "raw_response";

/// Fields extracted for one observed document type
///
/// Serializes flat, with `type` alongside the extracted fields:
///
/// ```json
/// { "type": "bill", "hospital_name": "City Care", "grand_total": "12,400" }
/// ```
///
/// An error record carries `error` (and usually `raw_response`) instead of
/// schema fields. It is a degraded but valid record, not a failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionRecord {
    /// Document type; always set by the pipeline, never by the model
    #[serde(rename = "type")]
    pub doc_type: DocumentType,

    /// Extracted fields in the order they were produced
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl ExtractionRecord {
    /// Create a record from parsed fields
    ///
    /// Any `type` key in `fields` is dropped; the pipeline's label wins.
    pub fn new(doc_type: DocumentType, mut fields: Map<String, Value>) -> Self {
        fields.shift_remove("type");
        Self { doc_type, fields }
    }

    /// Create an error record without a raw response
    pub fn error(doc_type: DocumentType, error: impl Into<String>) -> Self {
        let mut fields = Map::new();
        fields.insert(ERROR_KEY.to_string(), Value::String(error.into()));
        Self { doc_type, fields }
    }

    /// Create an error record that keeps the unparsed model output
    pub fn error_with_raw(
        doc_type: DocumentType,
        error: impl Into<String>,
        raw_response: impl Into<String>,
    ) -> Self {
        let mut record = Self::error(doc_type, error);
        record
            .fields
            .insert(RAW_RESPONSE_KEY.to_string(), Value::String(raw_response.into()));
        record
    }

    /// Whether this record carries a diagnostic instead of extracted data
    pub fn is_error(&self) -> bool {
        self.fields.contains_key(ERROR_KEY)
    }

    /// Look up a field
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Get a field as a string, if it is one
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(Value::as_str)
    }

    /// Whether a field is absent or empty-equivalent
    pub fn is_field_empty(&self, key: &str) -> bool {
        self.fields.get(key).map_or(true, is_empty_value)
    }

    /// Set a field, replacing any previous value
    pub fn set(&mut self, key: impl Into<String>, value: Value) {
        self.fields.insert(key.into(), value);
    }
}

/// Whether a JSON value counts as "not populated"
///
/// Null, the empty string and the empty array are empty. Zero and `false`
/// are real data and are not.
///
/// # Examples
///
/// ```
/// use claimdesk_domain::is_empty_value;
/// use serde_json::json;
///
/// assert!(is_empty_value(&json!(null)));
/// assert!(is_empty_value(&json!("")));
/// assert!(is_empty_value(&json!([])));
/// assert!(!is_empty_value(&json!(0)));
/// assert!(!is_empty_value(&json!(false)));
/// ```
pub fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Bool(_) | Value::Number(_) | Value::Object(_) => false,
    }
}
