use std::sync::Arc;
use std::time::Duration;

use crate::classifier::Classifier;
use crate::constants::NOT_FOUND;
use crate::fact::FactStore;
use crate::lookup::LookupEngine;
use crate::normalize::ConceptNormalizer;
use crate::synonyms::SynonymTable;

/// Result of answering one user query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answer {
    /// Raw text as submitted.
    pub concept: String,
    /// Canonical identifier the text normalized to.
    pub normalized: String,
    pub response: String,
    pub found: bool,
}

/// Normalize → lookup, over dependencies built once at startup.
#[derive(Clone)]
pub struct FormulaService {
    normalizer: ConceptNormalizer,
    lookup: LookupEngine,
}

impl FormulaService {
    pub fn new(facts: FactStore, synonyms: SynonymTable) -> Self {
        let facts = Arc::new(facts);
        Self {
            normalizer: ConceptNormalizer::new(Arc::clone(&facts), Arc::new(synonyms)),
            lookup: LookupEngine::new(facts),
        }
    }

    pub fn with_classifier(mut self, classifier: Arc<dyn Classifier>) -> Self {
        self.normalizer = self.normalizer.with_classifier(classifier);
        self
    }

    pub fn with_classifier_timeout(mut self, timeout: Duration) -> Self {
        self.normalizer = self.normalizer.with_timeout(timeout);
        self
    }

    pub fn facts(&self) -> &FactStore {
        self.lookup.facts()
    }

    pub fn normalizer(&self) -> &ConceptNormalizer {
        &self.normalizer
    }

    pub fn lookup_engine(&self) -> &LookupEngine {
        &self.lookup
    }

    pub async fn answer(&self, concept: &str) -> Answer {
        let normalized = self.normalizer.normalize(concept).await;
        tracing::info!("normalized concept: {normalized}");
        let (response, found) = match self.lookup.find(&normalized) {
            Some(answer) => (answer.to_string(), true),
            None => (NOT_FOUND.to_string(), false),
        };
        Answer {
            concept: concept.to_string(),
            normalized,
            response,
            found,
        }
    }
}
