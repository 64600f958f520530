//! Page module - one page of text from one uploaded document

use crate::DocumentType;
use std::fmt;

/// Unique identifier for an uploaded document based on UUIDv7
///
/// UUIDv7 keeps identifiers sortable by upload time, which matches the
/// submission order the pipeline preserves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DocumentId(u128);

impl DocumentId {
    /// Generate a new UUIDv7-based DocumentId
    ///
    /// # Examples
    ///
    /// ```
    /// use claimdesk_domain::DocumentId;
    ///
    /// let first = DocumentId::new();
    /// let second = DocumentId::new();
    /// assert_ne!(first, second);
    /// ```
    pub fn new() -> Self {
        Self(uuid::Uuid::now_v7().as_u128())
    }

    /// Create a DocumentId from a raw u128 value
    pub fn from_value(value: u128) -> Self {
        Self(value)
    }

    /// Get the raw u128 value
    pub fn value(&self) -> u128 {
        self.0
    }
}

impl Default for DocumentId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", uuid::Uuid::from_u128(self.0))
    }
}

/// Text of a single page, as produced by the text-extraction collaborator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    /// Document this page came from
    pub source_document_id: DocumentId,

    /// Zero-based position of the page within its document
    pub page_index: usize,

    /// Extracted page text (may be empty)
    pub text: String,
}

impl Page {
    /// Create a new page
    pub fn new(source_document_id: DocumentId, page_index: usize, text: impl Into<String>) -> Self {
        Self {
            source_document_id,
            page_index,
            text: text.into(),
        }
    }

    /// Attach a classification label to this page
    pub fn classify(self, label: DocumentType) -> ClassifiedPage {
        ClassifiedPage { page: self, label }
    }
}

/// A page together with the label the classifier assigned to it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedPage {
    /// The page itself
    pub page: Page,

    /// Normalized classification label
    pub label: DocumentType,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_id_display_is_uuid() {
        let id = DocumentId::new();
        let parsed = uuid::Uuid::parse_str(&id.to_string()).unwrap();
        assert_eq!(parsed.as_u128(), id.value());
        assert_eq!(parsed.get_version_num(), 7);
    }

    #[test]
    fn test_classify_keeps_page() {
        let id = DocumentId::from_value(42);
        let classified = Page::new(id, 3, "Tax Invoice").classify(DocumentType::Bill);

        assert_eq!(classified.page.source_document_id, id);
        assert_eq!(classified.page.page_index, 3);
        assert_eq!(classified.page.text, "Tax Invoice");
        assert_eq!(classified.label, DocumentType::Bill);
    }
}
