//! Claim decision: a binary gate over the validation result

use claimdesk_domain::{ClaimDecision, ClaimStatus, ValidationResult};

/// Reason attached to an approved claim
pub const APPROVED_REASON: &str = "all documents are present and data is consistent";

/// Reason attached to a pending claim
pub const PENDING_REASON: &str = "all documents are not present or data inconsistency";

/// Decide whether a claim can be approved
///
/// Approved only when nothing is missing; everything else is pending.
/// There are no partial or weighted outcomes.
pub fn decide(validation: &ValidationResult) -> ClaimDecision {
    if validation.is_complete() {
        ClaimDecision {
            status: ClaimStatus::Approved,
            reason: APPROVED_REASON.to_string(),
        }
    } else {
        ClaimDecision {
            status: ClaimStatus::Pending,
            reason: PENDING_REASON.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use claimdesk_domain::DocumentType;
    use proptest::prelude::*;

    #[test]
    fn test_approved_when_complete() {
        let decision = decide(&ValidationResult::default());
        assert_eq!(decision.status, ClaimStatus::Approved);
        assert_eq!(decision.reason, APPROVED_REASON);
    }

    #[test]
    fn test_pending_on_missing_document() {
        let decision = decide(&ValidationResult {
            missing_documents: vec![DocumentType::Id],
            missing_details: vec![],
        });
        assert_eq!(decision.status, ClaimStatus::Pending);
        assert_eq!(decision.reason, PENDING_REASON);
    }

    #[test]
    fn test_pending_on_missing_detail() {
        let decision = decide(&ValidationResult {
            missing_documents: vec![],
            missing_details: vec!["bill_grand_total".to_string()],
        });
        assert_eq!(decision.status, ClaimStatus::Pending);
    }

    fn doc_type_strategy() -> impl Strategy<Value = DocumentType> {
        prop_oneof![
            Just(DocumentType::Bill),
            Just(DocumentType::DischargeSummary),
            Just(DocumentType::InsuranceForm),
            Just(DocumentType::Id),
            "[a-z_]{1,12}".prop_map(|label| DocumentType::from_label(&label)),
        ]
    }

    proptest! {
        #[test]
        fn prop_decision_is_total(
            missing_documents in prop::collection::vec(doc_type_strategy(), 0..6),
            missing_details in prop::collection::vec("[a-z_]{0,20}", 0..6),
        ) {
            let validation = ValidationResult { missing_documents, missing_details };
            let decision = decide(&validation);

            let expected = if validation.is_complete() {
                ClaimStatus::Approved
            } else {
                ClaimStatus::Pending
            };
            prop_assert_eq!(decision.status, expected);
            prop_assert!(decision.reason == APPROVED_REASON || decision.reason == PENDING_REASON);
        }
    }
}
