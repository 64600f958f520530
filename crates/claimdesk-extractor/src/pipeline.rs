//! Claim pipeline orchestration

use crate::aggregator::{aggregate, TypeBucket, TypeBuckets};
use crate::classifier::PageClassifier;
use crate::config::PipelineConfig;
use crate::error::ExtractorError;
use crate::registry::ExtractionRegistry;
use crate::throttle::Throttle;
use crate::types::{ClaimReport, SubmittedDocument};
use claimdesk_domain::traits::LlmProvider;
use claimdesk_domain::{ClassifiedPage, ExtractionRecord, Page};
use claimdesk_gatekeeper::{decide, ValidationConfig, ValidationEngine};
use std::fmt::Display;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, info, warn};

/// Message carried by every successful report
pub const PROCESSED_MESSAGE: &str = "Files processed successfully";

/// Runs a claim from page texts to decision
///
/// Classification is sequential and throttled. Extraction makes one call
/// per observed type, concurrently unless configured otherwise; results
/// keep the types' first-appearance order either way.
pub struct ClaimPipeline<L>
where
    L: LlmProvider,
{
    llm: Arc<L>,
    registry: Arc<ExtractionRegistry>,
    validator: ValidationEngine,
    config: PipelineConfig,
}

impl<L> ClaimPipeline<L>
where
    L: LlmProvider + Send + Sync + 'static,
    L::Error: Display,
{
    /// Create a new pipeline with the standard strategies
    pub fn new(llm: L, config: PipelineConfig, validation: ValidationConfig) -> Self {
        Self {
            llm: Arc::new(llm),
            registry: Arc::new(ExtractionRegistry::standard()),
            validator: ValidationEngine::new(validation),
            config,
        }
    }

    /// Replace the strategy registry
    pub fn with_registry(mut self, registry: ExtractionRegistry) -> Self {
        self.registry = Arc::new(registry);
        self
    }

    /// The active configuration
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Process one claim submission
    ///
    /// The only errors are an empty submission or one over the document
    /// limit, both raised before any model call. Every later failure is
    /// contained in the affected record.
    pub async fn process(
        &self,
        documents: Vec<SubmittedDocument>,
    ) -> Result<ClaimReport, ExtractorError> {
        self.check_document_count(documents.len())?;

        let total_pages: usize = documents.iter().map(SubmittedDocument::page_count).sum();
        info!(
            "Processing claim: {} documents, {} pages",
            documents.len(),
            total_pages
        );

        let pages: Vec<Page> = documents
            .into_iter()
            .flat_map(|document| {
                debug!(document = %document.id, name = %document.name, pages = document.page_count(), "Document received");
                document.into_pages()
            })
            .collect();

        let classified = self.classify_pages(pages).await;
        let buckets = aggregate(classified);
        info!("Observed {} document types", buckets.len());

        let results = self.extract_buckets(buckets).await;

        let validation = self.validator.validate(&results);
        let claim_decision = decide(&validation);
        info!(
            status = %claim_decision.status,
            missing_documents = validation.missing_documents.len(),
            missing_details = validation.missing_details.len(),
            "Claim decided"
        );

        Ok(ClaimReport {
            message: PROCESSED_MESSAGE.to_string(),
            results,
            validation,
            claim_decision,
        })
    }

    /// Classify pages in order under the configured throttle
    pub async fn classify_pages(&self, pages: Vec<Page>) -> Vec<ClassifiedPage> {
        let mut classifier = PageClassifier::new(
            Arc::clone(&self.llm),
            Throttle::new(self.config.classification_delay()),
            self.config.call_timeout(),
        );
        classifier.classify_all(pages).await
    }

    /// Extract one record per bucket, in bucket order
    pub async fn extract_buckets(&self, buckets: TypeBuckets) -> Vec<ExtractionRecord> {
        let call_timeout = self.config.call_timeout();

        if !self.config.parallel_extraction {
            let mut records = Vec::with_capacity(buckets.len());
            for bucket in buckets {
                records.push(
                    run_extraction(
                        Arc::clone(&self.llm),
                        Arc::clone(&self.registry),
                        call_timeout,
                        bucket,
                    )
                    .await,
                );
            }
            return records;
        }

        let handles: Vec<_> = buckets
            .into_iter()
            .map(|bucket| {
                let doc_type = bucket.doc_type.clone();
                let handle = tokio::spawn(run_extraction(
                    Arc::clone(&self.llm),
                    Arc::clone(&self.registry),
                    call_timeout,
                    bucket,
                ));
                (doc_type, handle)
            })
            .collect();

        let mut records = Vec::with_capacity(handles.len());
        for (doc_type, handle) in handles {
            let record = match handle.await {
                Ok(record) => record,
                Err(e) => {
                    warn!(doc_type = %doc_type, "Extraction task failed: {}", e);
                    ExtractionRecord::error(doc_type, format!("Extraction failed: {}", e))
                }
            };
            records.push(record);
        }
        records
    }

    fn check_document_count(&self, submitted: usize) -> Result<(), ExtractorError> {
        if submitted == 0 {
            return Err(ExtractorError::NoDocuments);
        }
        if submitted > self.config.max_documents {
            return Err(ExtractorError::TooManyDocuments {
                submitted,
                max: self.config.max_documents,
            });
        }
        Ok(())
    }
}

/// Extract one bucket off the async workers, bounded by `call_timeout`
async fn run_extraction<L>(
    llm: Arc<L>,
    registry: Arc<ExtractionRegistry>,
    call_timeout: Duration,
    bucket: TypeBucket,
) -> ExtractionRecord
where
    L: LlmProvider + Send + Sync + 'static,
    L::Error: Display,
{
    let doc_type = bucket.doc_type.clone();
    debug!(doc_type = %doc_type, pages = bucket.pages.len(), "Extracting bucket");

    let call = tokio::task::spawn_blocking(move || registry.extract(llm.as_ref(), &bucket));

    let mut record = match timeout(call_timeout, call).await {
        Ok(Ok(record)) => record,
        Ok(Err(e)) => {
            warn!(doc_type = %doc_type, "Extraction task failed: {}", e);
            ExtractionRecord::error(doc_type.clone(), format!("Extraction failed: {}", e))
        }
        Err(_) => {
            warn!(doc_type = %doc_type, "Extraction timed out after {:?}", call_timeout);
            ExtractionRecord::error(
                doc_type.clone(),
                format!("Extraction timed out after {}s", call_timeout.as_secs()),
            )
        }
    };

    // The pipeline's label is authoritative
    record.doc_type = doc_type;
    record
}
