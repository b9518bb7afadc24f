//! Text-embedding backends.
//!
//! [`ApiEncoder`] calls a hosted feature-extraction endpoint over HTTP.
//! [`OnnxEncoder`](crate::onnx::OnnxEncoder), behind the `onnx` feature, runs
//! the same models in-process. Both sit behind [`TextEncoder`] so the index
//! never cares which one it got.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::debug;

use crate::error::EmbedError;
use crate::normalize::l2_normalize_in_place;

/// Anything that can turn text into fixed-width vectors.
#[async_trait]
pub trait TextEncoder: Send + Sync {
    /// Embed one text.
    async fn encode(&self, text: &str) -> Result<Vec<f32>, EmbedError>;

    /// Embed a batch, output in input order.
    async fn encode_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbedError>;
}

/// Settings for the hosted feature-extraction endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EncoderConfig {
    /// Model identifier on the inference host.
    #[serde(default = "EncoderConfig::default_model")]
    pub model: String,

    /// Inference host the endpoint URL is derived from when `api_url` is
    /// unset. Defaults to the Hugging Face router.
    #[serde(default)]
    pub base_url: Option<String>,

    /// Full endpoint URL override. Takes precedence over `base_url`.
    #[serde(default)]
    pub api_url: Option<String>,

    /// Authorization header value, e.g. `Bearer hf_xxx`.
    #[serde(default)]
    pub api_auth_header: Option<String>,

    /// L2-normalize returned vectors. Hosted backends do not all normalize
    /// server-side.
    #[serde(default = "EncoderConfig::default_normalize")]
    pub normalize: bool,

    /// Request timeout in seconds. `None` keeps the client default.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl EncoderConfig {
    pub(crate) fn default_model() -> String {
        "sentence-transformers/all-mpnet-base-v2".to_string()
    }

    pub(crate) fn default_normalize() -> bool {
        true
    }

    const DEFAULT_BASE_URL: &'static str = "https://router.huggingface.co/hf-inference/models";

    /// The endpoint the encoder will call.
    pub fn endpoint(&self) -> String {
        if let Some(url) = &self.api_url {
            return url.clone();
        }
        let base = self
            .base_url
            .as_deref()
            .unwrap_or(Self::DEFAULT_BASE_URL)
            .trim_end_matches('/');
        format!("{base}/{}/pipeline/feature-extraction", self.model)
    }

    fn validate(&self) -> Result<(), EmbedError> {
        if self.model.trim().is_empty() {
            return Err(EmbedError::InvalidConfig(
                "model must not be empty".to_string(),
            ));
        }
        for url in [&self.base_url, &self.api_url].into_iter().flatten() {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(EmbedError::InvalidConfig(format!(
                    "endpoint must be http(s), got: {url}"
                )));
            }
        }
        Ok(())
    }
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            model: Self::default_model(),
            base_url: None,
            api_url: None,
            api_auth_header: None,
            normalize: Self::default_normalize(),
            timeout_secs: None,
        }
    }
}

/// Embedding client for a hosted feature-extraction endpoint.
///
/// Owns its connection pool; dropping the encoder releases it.
pub struct ApiEncoder {
    client: reqwest::Client,
    config: EncoderConfig,
}

impl ApiEncoder {
    pub fn new(config: EncoderConfig) -> Result<Self, EmbedError> {
        config.validate()?;
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| EmbedError::InvalidConfig(format!("HTTP client: {e}")))?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &EncoderConfig {
        &self.config
    }

    async fn request(&self, payload: Value) -> Result<Value, EmbedError> {
        let url = self.config.endpoint();
        debug!(model = %self.config.model, %url, "requesting embeddings");

        let mut request = self
            .client
            .post(&url)
            .header("Content-Type", "application/json");
        if let Some(auth) = &self.config.api_auth_header {
            request = request.header("Authorization", auth);
        }

        let response = request
            .json(&payload)
            .send()
            .await
            .map_err(|e| EmbedError::Request(format!("HTTP request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(EmbedError::Request(format!("HTTP error {status}: {body}")));
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| EmbedError::Inference(format!("invalid JSON response: {e}")))
    }
}

#[async_trait]
impl TextEncoder for ApiEncoder {
    async fn encode(&self, text: &str) -> Result<Vec<f32>, EmbedError> {
        let value = self.request(build_single_payload(text)).await?;
        let mut vectors = parse_vectors(&value)?;
        if vectors.len() > 1 {
            return Err(EmbedError::Inference(format!(
                "API returned {} embeddings for 1 input",
                vectors.len()
            )));
        }
        let Some(mut vector) = vectors.pop() else {
            return Err(EmbedError::Inference(
                "API returned no embedding for the input".to_string(),
            ));
        };
        if self.config.normalize {
            l2_normalize_in_place(&mut vector);
        }
        Ok(vector)
    }

    async fn encode_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbedError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }
        let value = self.request(build_batch_payload(texts)).await?;
        let mut vectors = parse_vectors(&value)?;
        if vectors.len() != texts.len() {
            return Err(EmbedError::Inference(format!(
                "API returned {} embeddings for {} inputs",
                vectors.len(),
                texts.len()
            )));
        }
        if self.config.normalize {
            for vector in &mut vectors {
                l2_normalize_in_place(vector);
            }
        }
        Ok(vectors)
    }
}

pub(crate) fn build_single_payload(text: &str) -> Value {
    json!({ "inputs": text })
}

pub(crate) fn build_batch_payload(texts: &[String]) -> Value {
    json!({ "inputs": texts })
}

/// Pull embedding vectors out of the response formats hosted endpoints use.
///
/// Accepts `{"embeddings": [[..]]}`, OpenAI-style `{"data": [{"embedding":
/// [..]}]}`, a bare `[[..]]`, and a bare `[..]` for single inputs.
pub(crate) fn parse_vectors(value: &Value) -> Result<Vec<Vec<f32>>, EmbedError> {
    if let Some(embeddings) = value.get("embeddings") {
        return parse_vector_list(embeddings);
    }
    if let Some(data) = value.get("data").and_then(Value::as_array) {
        let mut vectors = Vec::with_capacity(data.len());
        for item in data {
            let embedding = item.get("embedding").ok_or_else(|| {
                EmbedError::Inference("data entry has no `embedding` field".to_string())
            })?;
            vectors.push(parse_vector(embedding)?);
        }
        return Ok(vectors);
    }
    parse_vector_list(value)
}

fn parse_vector_list(value: &Value) -> Result<Vec<Vec<f32>>, EmbedError> {
    let Some(items) = value.as_array() else {
        return Err(EmbedError::Inference(format!(
            "expected an array of embeddings, got: {value}"
        )));
    };
    if items.is_empty() {
        return Ok(Vec::new());
    }
    if items.iter().all(Value::is_number) {
        // A single flat vector.
        return Ok(vec![parse_vector(value)?]);
    }
    items.iter().map(parse_vector).collect()
}

fn parse_vector(value: &Value) -> Result<Vec<f32>, EmbedError> {
    let Some(items) = value.as_array() else {
        return Err(EmbedError::Inference(format!(
            "expected an embedding vector, got: {value}"
        )));
    };
    items
        .iter()
        .map(|item| {
            item.as_f64().map(|f| f as f32).ok_or_else(|| {
                EmbedError::Inference(format!("non-numeric embedding component: {item}"))
            })
        })
        .collect()
}
