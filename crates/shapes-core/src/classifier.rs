use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

/// One entry of a classifier's ranked output.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Prediction {
    pub label: String,
    pub score: f64,
}

impl Prediction {
    pub fn new(label: &str, score: f64) -> Self {
        Self {
            label: label.to_string(),
            score,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ClassifierError {
    /// Failed to initialize; the process runs without a classifier.
    Unavailable(String),
    /// A single call failed (transport, status, decoding).
    Invocation(String),
    /// A single call exceeded its time bound.
    Timeout(Duration),
    /// The classifier answered with no predictions.
    EmptyResponse,
}

impl fmt::Display for ClassifierError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClassifierError::Unavailable(msg) => write!(f, "classifier unavailable: {msg}"),
            ClassifierError::Invocation(msg) => write!(f, "classifier call failed: {msg}"),
            ClassifierError::Timeout(d) => {
                write!(f, "classifier timed out after {}ms", d.as_millis())
            }
            ClassifierError::EmptyResponse => write!(f, "classifier returned no predictions"),
        }
    }
}

impl std::error::Error for ClassifierError {}

/// External text classifier mapping raw user text to shape labels.
///
/// Treated as unreliable: every error takes the synonym-table fallback.
/// Implementations return predictions ranked best first.
#[async_trait]
pub trait Classifier: Send + Sync {
    async fn classify(&self, text: &str) -> Result<Vec<Prediction>, ClassifierError>;
}

/// Label of the top-ranked prediction.
pub fn top_label(predictions: &[Prediction]) -> Result<String, ClassifierError> {
    predictions
        .first()
        .map(|p| p.label.clone())
        .ok_or(ClassifierError::EmptyResponse)
}
