//! Dispatch from document type to extraction strategy

use crate::aggregator::TypeBucket;
use crate::strategy::{
    BillStrategy, Completion, DischargeSummaryStrategy, ExtractionStrategy, IdStrategy,
    InsuranceFormStrategy, NoStrategy,
};
use claimdesk_domain::{DocumentType, ExtractionRecord};
use std::collections::HashMap;

/// Maps each document type to its strategy
///
/// Labels without a registered strategy resolve to [`NoStrategy`], so
/// dispatch always yields a record.
pub struct ExtractionRegistry {
    strategies: HashMap<DocumentType, Box<dyn ExtractionStrategy>>,
    fallback: NoStrategy,
}

impl ExtractionRegistry {
    /// Create a registry with no strategies
    pub fn new() -> Self {
        Self {
            strategies: HashMap::new(),
            fallback: NoStrategy,
        }
    }

    /// Create a registry with a strategy for every known type
    pub fn standard() -> Self {
        let mut registry = Self::new();
        registry.register(BillStrategy);
        registry.register(DischargeSummaryStrategy);
        registry.register(InsuranceFormStrategy);
        registry.register(IdStrategy);
        registry
    }

    /// Register a strategy under its own document type, replacing any
    /// previous one
    pub fn register<S>(&mut self, strategy: S)
    where
        S: ExtractionStrategy + 'static,
    {
        self.strategies
            .insert(strategy.document_type(), Box::new(strategy));
    }

    /// The strategy for a label
    pub fn resolve(&self, doc_type: &DocumentType) -> &dyn ExtractionStrategy {
        match self.strategies.get(doc_type) {
            Some(strategy) => strategy.as_ref(),
            None => &self.fallback,
        }
    }

    /// Whether a strategy is registered for a label
    pub fn has_strategy(&self, doc_type: &DocumentType) -> bool {
        self.strategies.contains_key(doc_type)
    }

    /// Extract one bucket with the strategy for its label
    pub fn extract(&self, llm: &dyn Completion, bucket: &TypeBucket) -> ExtractionRecord {
        self.resolve(&bucket.doc_type).extract(llm, bucket)
    }
}

impl Default for ExtractionRegistry {
    fn default() -> Self {
        Self::standard()
    }
}
