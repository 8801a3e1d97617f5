use std::sync::Arc;
use std::time::Duration;

use crate::classifier::{Classifier, ClassifierError, top_label};
use crate::constants::DEFAULT_CLASSIFIER_TIMEOUT;
use crate::fact::FactStore;
use crate::synonyms::SynonymTable;

/// Maps free-text user phrases to canonical shape identifiers.
///
/// Two stages: an optional classifier whose label is accepted only when the
/// fact base or synonym table knows it, then a synonym-table fallback on
/// the trimmed, lowercased input. Never fails.
#[derive(Clone)]
pub struct ConceptNormalizer {
    facts: Arc<FactStore>,
    synonyms: Arc<SynonymTable>,
    classifier: Option<Arc<dyn Classifier>>,
    timeout: Duration,
}

impl ConceptNormalizer {
    pub fn new(facts: Arc<FactStore>, synonyms: Arc<SynonymTable>) -> Self {
        Self {
            facts,
            synonyms,
            classifier: None,
            timeout: DEFAULT_CLASSIFIER_TIMEOUT,
        }
    }

    pub fn with_classifier(mut self, classifier: Arc<dyn Classifier>) -> Self {
        self.classifier = Some(classifier);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn has_classifier(&self) -> bool {
        self.classifier.is_some()
    }

    pub async fn normalize(&self, raw: &str) -> String {
        match &self.classifier {
            Some(classifier) => {
                let outcome = self.classify_bounded(classifier.as_ref(), raw).await;
                self.resolve(raw, outcome)
            }
            None => self.fallback(raw),
        }
    }

    async fn classify_bounded(
        &self,
        classifier: &dyn Classifier,
        raw: &str,
    ) -> Result<String, ClassifierError> {
        match tokio::time::timeout(self.timeout, classifier.classify(raw)).await {
            Ok(Ok(predictions)) => top_label(&predictions),
            Ok(Err(e)) => Err(e),
            Err(_) => Err(ClassifierError::Timeout(self.timeout)),
        }
    }

    /// Decide between a classifier outcome and the fallback.
    ///
    /// A valid label is renamed through the synonym table when it has an
    /// entry there and otherwise returned lowercased as is, even when it is
    /// a direct fact-base label.
    pub fn resolve(&self, raw: &str, outcome: Result<String, ClassifierError>) -> String {
        match outcome {
            Ok(label) => {
                let label = label.to_lowercase();
                tracing::debug!("classifier label: {label}");
                if self.is_valid_label(&label) {
                    return self.synonyms.resolve(&label);
                }
                tracing::debug!("classifier label '{label}' unknown, falling back for: {raw}");
            }
            Err(e) => tracing::warn!("classifier mapping error: {e}"),
        }
        self.fallback(raw)
    }

    /// A label is valid when some fact record carries it or it is a synonym key.
    pub fn is_valid_label(&self, label: &str) -> bool {
        self.facts.contains_label(label) || self.synonyms.contains(label)
    }

    /// Synonym-table normalization of the trimmed, lowercased input.
    pub fn fallback(&self, raw: &str) -> String {
        let normalized = raw.trim().to_lowercase();
        tracing::debug!("fallback normalized concept: {normalized}");
        self.synonyms.resolve(&normalized)
    }
}
