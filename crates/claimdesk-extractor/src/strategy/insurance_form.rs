//! Insurance claim forms

use super::ExtractionStrategy;
use crate::prompt::ExtractionPromptBuilder;
use claimdesk_domain::{DocumentType, ExtractionRecord};
use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;
use tracing::debug;

/// Status set when a submission is inferred rather than stated
pub const INFERRED_SUBMISSION: &str = "submitted";

const CLAIM_NUMBER: &str = "claimNumber";
const CLAIM_SUBMISSION: &str = "claim_submission";

static AMOUNT_CUE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(claim(ed)?\s+amount|amount\s+claimed)\b|(\brs\.?|\binr|₹|\$)\s*\d")
        .expect("amount cue pattern is valid")
});

static APPROVAL_CUE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(approved|approval|sanctioned|authori[sz]ed)\b")
        .expect("approval cue pattern is valid")
});

/// Extracts the claim number and submission status
///
/// When the form states no status but carries a claim number together with
/// a claimed amount or an approval, the status is inferred as `submitted`.
#[derive(Debug, Clone, Copy, Default)]
pub struct InsuranceFormStrategy;

impl InsuranceFormStrategy {
    fn has_submission_evidence(text: &str) -> bool {
        AMOUNT_CUE.is_match(text) || APPROVAL_CUE.is_match(text)
    }
}

impl ExtractionStrategy for InsuranceFormStrategy {
    fn document_type(&self) -> DocumentType {
        DocumentType::InsuranceForm
    }

    fn prompt(&self, full_text: &str) -> String {
        ExtractionPromptBuilder::new(DocumentType::InsuranceForm, full_text)
            .with_note("If the status is not explicitly mentioned but a claim number and a claim amount or approval is found, infer claim_submission: \"submitted\"")
            .build()
    }

    fn refine(&self, mut record: ExtractionRecord, full_text: &str) -> ExtractionRecord {
        if record.is_field_empty(CLAIM_SUBMISSION)
            && !record.is_field_empty(CLAIM_NUMBER)
            && Self::has_submission_evidence(full_text)
        {
            debug!("Inferring claim submission from claim number and amount/approval");
            record.set(CLAIM_SUBMISSION, Value::String(INFERRED_SUBMISSION.to_string()));
        }
        record
    }
}
