//! Page classification

use crate::prompt::classification_prompt;
use crate::throttle::Throttle;
use claimdesk_domain::traits::LlmProvider;
use claimdesk_domain::{ClassifiedPage, DocumentType, Page};
use std::fmt::Display;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, warn};

/// Labels each page with its document type, one throttled LLM call per page
///
/// A classifier lives for one claim: its [`Throttle`] spaces every call it
/// makes. Failures never escape; a call that errors or times out labels the
/// page `unknown`.
pub struct PageClassifier<L> {
    llm: Arc<L>,
    throttle: Throttle,
    call_timeout: Duration,
}

impl<L> PageClassifier<L>
where
    L: LlmProvider + Send + Sync + 'static,
    L::Error: Display,
{
    /// Create a classifier sharing `llm` with the rest of the pipeline
    pub fn new(llm: Arc<L>, throttle: Throttle, call_timeout: Duration) -> Self {
        Self {
            llm,
            throttle,
            call_timeout,
        }
    }

    /// Classify one page
    pub async fn classify(&mut self, page: Page) -> ClassifiedPage {
        self.throttle.acquire().await;

        let label = self.classify_text(&page.text).await;
        debug!(
            document = %page.source_document_id,
            page = page.page_index,
            label = %label,
            "Classified page"
        );
        page.classify(label)
    }

    /// Classify a sequence of pages, preserving order
    pub async fn classify_all(&mut self, pages: Vec<Page>) -> Vec<ClassifiedPage> {
        let mut classified = Vec::with_capacity(pages.len());
        for page in pages {
            classified.push(self.classify(page).await);
        }
        classified
    }

    async fn classify_text(&self, text: &str) -> DocumentType {
        let llm = Arc::clone(&self.llm);
        let prompt = classification_prompt(text);

        // LlmProvider is synchronous; keep it off the async workers
        let call = tokio::task::spawn_blocking(move || {
            llm.generate(&prompt).map_err(|e| e.to_string())
        });

        match timeout(self.call_timeout, call).await {
            Ok(Ok(Ok(raw))) => DocumentType::from_label(normalize_label(&raw)),
            Ok(Ok(Err(e))) => {
                warn!("Classification call failed: {}", e);
                DocumentType::unknown()
            }
            Ok(Err(e)) => {
                warn!("Classification task failed: {}", e);
                DocumentType::unknown()
            }
            Err(_) => {
                warn!("Classification timed out after {:?}", self.call_timeout);
                DocumentType::unknown()
            }
        }
    }
}

/// Reduce a one-word model answer to a bare label
///
/// Models routinely wrap the word in quotes or backticks or end it with a
/// period; those are stripped along with whitespace. Case folding happens in
/// [`DocumentType::from_label`].
fn normalize_label(raw: &str) -> &str {
    let is_wrapper = |c: char| c == '"' || c == '\'' || c == '`' || c.is_whitespace();
    raw.trim_matches(is_wrapper)
        .trim_end_matches('.')
        .trim_matches(is_wrapper)
}
