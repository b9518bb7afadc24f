//! Environment-driven settings for the demo binary.
//!
//! Chat endpoints are optional: a missing API key simply disables the
//! strategies that need it, so the demo runs with any subset configured.
//!
//! Recognized variables:
//!
//! - `HF_API_KEY` / `HF_BASE_URL`: inference host for embeddings and
//!   classification
//! - `OPENAI_API_KEY` / `OPENAI_BASE_URL` / `OPENAI_MODEL_NAME`
//! - `LLAMA_API_KEY` / `LLAMA_BASE_URL` / `LLAMA_MODEL_NAME`: any second
//!   OpenAI-compatible endpoint
//! - `ADCAT_ONNX_DIR`: local model directory, used when built with the
//!   `onnx` feature

use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::classifier::ClassifierConfig;
use crate::encoder::EncoderConfig;
use crate::llm::LlmConfig;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub encoder: EncoderConfig,

    #[serde(default)]
    pub classifier: ClassifierConfig,

    /// Primary chat endpoint.
    #[serde(default)]
    pub openai: Option<LlmConfig>,

    /// Secondary chat endpoint, conventionally a hosted Llama.
    #[serde(default)]
    pub llama: Option<LlmConfig>,

    /// Local embedding model directory, when running with the `onnx`
    /// feature.
    #[serde(default)]
    pub onnx_model_dir: Option<PathBuf>,
}

impl AppConfig {
    /// Assemble settings from the process environment.
    pub fn from_env() -> Self {
        let hf_key = non_empty(env::var("HF_API_KEY").ok());
        let hf_base = non_empty(env::var("HF_BASE_URL").ok());

        let encoder = EncoderConfig {
            base_url: hf_base.clone(),
            api_auth_header: hf_key.as_deref().map(bearer),
            ..EncoderConfig::default()
        };

        let mut classifier = ClassifierConfig {
            api_auth_header: hf_key.as_deref().map(bearer),
            ..ClassifierConfig::default()
        };
        if let Some(base) = hf_base {
            classifier.base_url = base;
        }

        Self {
            encoder,
            classifier,
            openai: chat_endpoint(
                env::var("OPENAI_API_KEY").ok(),
                env::var("OPENAI_BASE_URL").ok(),
                env::var("OPENAI_MODEL_NAME").ok(),
            ),
            llama: chat_endpoint(
                env::var("LLAMA_API_KEY").ok(),
                env::var("LLAMA_BASE_URL").ok(),
                env::var("LLAMA_MODEL_NAME").ok(),
            ),
            onnx_model_dir: non_empty(env::var("ADCAT_ONNX_DIR").ok()).map(PathBuf::from),
        }
    }
}

/// Build a chat endpoint config when an API key is present.
fn chat_endpoint(
    api_key: Option<String>,
    base_url: Option<String>,
    model: Option<String>,
) -> Option<LlmConfig> {
    let api_key = non_empty(api_key)?;
    let mut config = LlmConfig {
        api_key,
        ..LlmConfig::default()
    };
    if let Some(url) = non_empty(base_url) {
        config.base_url = url;
    }
    if let Some(model) = non_empty(model) {
        config.model = model;
    }
    Some(config)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn bearer(key: &str) -> String {
    format!("Bearer {key}")
}
