//! Hosted text-classification strategy.
//!
//! Drives any text-classification model on an inference host. The label set
//! is the model's own and does not have to line up with the vocabulary the
//! embedding strategies use; scores come back in the order the model ranked
//! them.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::debug;

use crate::error::ClassifyError;
use crate::types::{CategoryMatch, round2};

/// Multi-label IAB classifier published by Mozilla.
pub const IAB_MULTILABEL_MODEL: &str = "Mozilla/content-multilabel-iab-classifier";

/// BERT fine-tuned on mixed IAB categories.
pub const IAB_MIXED_BERT_MODEL: &str =
    "PavanDeepak/text-classification-model-iab-categories-mixed-bert-base-uncased";

/// Settings for the hosted classification endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClassifierConfig {
    /// Inference host models are addressed under.
    #[serde(default = "ClassifierConfig::default_base_url")]
    pub base_url: String,

    /// Authorization header value, e.g. `Bearer hf_xxx`.
    #[serde(default)]
    pub api_auth_header: Option<String>,
}

impl ClassifierConfig {
    pub(crate) fn default_base_url() -> String {
        "https://router.huggingface.co/hf-inference/models".to_string()
    }
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            base_url: Self::default_base_url(),
            api_auth_header: None,
        }
    }
}

/// Client for hosted text-classification models.
pub struct HostedClassifier {
    client: reqwest::Client,
    config: ClassifierConfig,
}

impl HostedClassifier {
    pub fn new(config: ClassifierConfig) -> Result<Self, ClassifyError> {
        if !config.base_url.starts_with("http://") && !config.base_url.starts_with("https://") {
            return Err(ClassifyError::InvalidConfig(format!(
                "base_url must be http(s), got: {}",
                config.base_url
            )));
        }
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| ClassifyError::InvalidConfig(format!("HTTP client: {e}")))?;
        Ok(Self { client, config })
    }

    /// Ask `model` for its top `num` labels for `text`.
    ///
    /// Any failure is fatal to the call: an unreachable host, an unknown
    /// model, or an unexpected body all surface as `Err`.
    pub async fn classify(
        &self,
        text: &str,
        model: &str,
        num: usize,
    ) -> Result<Vec<CategoryMatch>, ClassifyError> {
        if model.trim().is_empty() {
            return Err(ClassifyError::InvalidConfig(
                "model must not be empty".to_string(),
            ));
        }

        let url = classify_url(&self.config.base_url, model);
        debug!(model, %url, "requesting classification");

        let mut request = self
            .client
            .post(&url)
            .header("Content-Type", "application/json");
        if let Some(auth) = &self.config.api_auth_header {
            request = request.header("Authorization", auth);
        }

        let response = request
            .json(&build_classify_payload(text, num))
            .send()
            .await
            .map_err(|e| ClassifyError::Request(format!("HTTP request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ClassifyError::Request(format!("HTTP error {status}: {body}")));
        }

        let value = response
            .json::<Value>()
            .await
            .map_err(|e| ClassifyError::Response(format!("invalid JSON response: {e}")))?;
        let scores = parse_label_scores(value)?;
        Ok(to_matches(scores))
    }
}

pub(crate) fn classify_url(base_url: &str, model: &str) -> String {
    format!(
        "{}/{model}/pipeline/text-classification",
        base_url.trim_end_matches('/')
    )
}

pub(crate) fn build_classify_payload(text: &str, num: usize) -> Value {
    json!({
        "inputs": text,
        "parameters": { "top_k": num }
    })
}

/// Parse `[{"label": .., "score": ..}, ..]`, with or without the extra list
/// nesting single-input calls come back with.
pub(crate) fn parse_label_scores(value: Value) -> Result<Vec<(String, f32)>, ClassifyError> {
    let Value::Array(outer) = value else {
        return Err(ClassifyError::Response(
            "expected an array of label scores".to_string(),
        ));
    };
    let items = match outer.first() {
        Some(Value::Array(_)) => match outer.into_iter().next() {
            Some(Value::Array(inner)) => inner,
            _ => Vec::new(),
        },
        _ => outer,
    };

    let mut scores = Vec::with_capacity(items.len());
    for item in items {
        let Value::Object(map) = item else {
            return Err(ClassifyError::Response(
                "label entry is not an object".to_string(),
            ));
        };
        let label = map
            .get("label")
            .and_then(Value::as_str)
            .ok_or_else(|| ClassifyError::Response("label entry has no `label`".to_string()))?
            .to_string();
        let score = map
            .get("score")
            .and_then(Value::as_f64)
            .ok_or_else(|| ClassifyError::Response("label entry has no `score`".to_string()))?;
        scores.push((label, score as f32));
    }
    Ok(scores)
}

/// Keep the model's own ranking, round scores to two decimals.
pub(crate) fn to_matches(scores: Vec<(String, f32)>) -> Vec<CategoryMatch> {
    scores
        .into_iter()
        .map(|(label, score)| CategoryMatch::scored(label, round2(score)))
        .collect()
}
