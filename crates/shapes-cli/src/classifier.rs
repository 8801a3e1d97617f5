//! HTTP text classifier speaking the Hugging Face inference format:
//! POST `{"inputs": text}`, answer `[{label, score}]` or `[[{label, score}]]`.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Deserialize;
use serde_json::json;
use shapes_core::{Classifier, ClassifierError, Prediction};

use crate::config::ClassifierConfig;

pub struct HttpClassifier {
    client: Client,
    endpoint: Url,
    token: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ClassifierOutput {
    Flat(Vec<Prediction>),
    Nested(Vec<Vec<Prediction>>),
}

impl ClassifierOutput {
    /// Predictions for the single input, best score first.
    fn into_ranked(self) -> Vec<Prediction> {
        let mut predictions = match self {
            ClassifierOutput::Flat(p) => p,
            ClassifierOutput::Nested(batches) => batches.into_iter().next().unwrap_or_default(),
        };
        predictions.sort_by(|a, b| b.score.total_cmp(&a.score));
        predictions
    }
}

impl HttpClassifier {
    pub fn new(
        endpoint: &str,
        token: Option<String>,
        timeout: Duration,
    ) -> Result<Self, ClassifierError> {
        let endpoint = Url::parse(endpoint)
            .map_err(|e| ClassifierError::Unavailable(format!("bad endpoint {endpoint}: {e}")))?;
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ClassifierError::Unavailable(e.to_string()))?;
        Ok(Self {
            client,
            endpoint,
            token,
        })
    }

    async fn try_classify(&self, text: &str) -> reqwest::Result<ClassifierOutput> {
        let mut request = self
            .client
            .post(self.endpoint.clone())
            .json(&json!({ "inputs": text }));
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        request
            .send()
            .await?
            .error_for_status()?
            .json::<ClassifierOutput>()
            .await
    }
}

#[async_trait]
impl Classifier for HttpClassifier {
    async fn classify(&self, text: &str) -> Result<Vec<Prediction>, ClassifierError> {
        let output = self
            .try_classify(text)
            .await
            .map_err(|e| ClassifierError::Invocation(e.to_string()))?;
        Ok(output.into_ranked())
    }
}

/// Build the configured classifier. Initialization failures are logged and
/// leave the process without one.
pub fn build_classifier(cfg: &ClassifierConfig) -> Option<Arc<dyn Classifier>> {
    let endpoint = cfg.endpoint.as_deref()?;
    match HttpClassifier::new(endpoint, cfg.token(), cfg.timeout()) {
        Ok(classifier) => {
            tracing::info!("classifier enabled: {endpoint}");
            Some(Arc::new(classifier))
        }
        Err(e) => {
            tracing::warn!("{e}; using synonym fallback only");
            None
        }
    }
}
