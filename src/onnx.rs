//! Local ONNX inference for the embedding backend.
//!
//! Loads a sentence-transformers export (`model.onnx` plus `tokenizer.json`)
//! and applies mean pooling over the last hidden state followed by L2
//! normalization, the same recipe the hosted feature-extraction endpoint
//! runs server-side.

use std::path::PathBuf;
use std::sync::Mutex;

use async_trait::async_trait;
use ort::session::Session;
use ort::value::Tensor;
use serde::{Deserialize, Serialize};
use tokenizers::{PaddingParams, Tokenizer, TruncationParams};
use tracing::info;

use crate::encoder::TextEncoder;
use crate::error::EmbedError;
use crate::normalize::l2_normalize_in_place;

/// Settings for a local model directory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OnnxConfig {
    /// Directory holding `model.onnx` and `tokenizer.json`.
    pub model_dir: PathBuf,

    /// Longest token sequence fed to the model; longer inputs are truncated.
    #[serde(default = "OnnxConfig::default_max_sequence_length")]
    pub max_sequence_length: usize,

    /// Feed a `token_type_ids` input. BERT-style exports declare it, MPNet
    /// exports do not.
    #[serde(default)]
    pub token_type_ids: bool,
}

impl OnnxConfig {
    pub fn new(model_dir: impl Into<PathBuf>) -> Self {
        Self {
            model_dir: model_dir.into(),
            max_sequence_length: Self::default_max_sequence_length(),
            token_type_ids: false,
        }
    }

    // all-mpnet-base-v2 was trained with a 384-token window.
    pub(crate) fn default_max_sequence_length() -> usize {
        384
    }
}

/// Embedding backend that runs the model in-process.
///
/// `Session::run` needs exclusive access, so concurrent encodes serialize on
/// the internal lock. Callers that want parallel inference run one encoder
/// per worker.
pub struct OnnxEncoder {
    session: Mutex<Session>,
    tokenizer: Tokenizer,
    config: OnnxConfig,
    dim: usize,
}

impl OnnxEncoder {
    /// Load `model.onnx` and `tokenizer.json` from `model_dir` with default
    /// settings.
    pub fn load(model_dir: impl Into<PathBuf>) -> Result<Self, EmbedError> {
        Self::with_config(OnnxConfig::new(model_dir))
    }

    pub fn with_config(config: OnnxConfig) -> Result<Self, EmbedError> {
        let model_path = config.model_dir.join("model.onnx");
        let tokenizer_path = config.model_dir.join("tokenizer.json");
        for path in [&model_path, &tokenizer_path] {
            if !path.exists() {
                return Err(EmbedError::AssetNotFound(path.display().to_string()));
            }
        }

        let session = Session::builder()
            .map_err(|e| EmbedError::Inference(format!("ONNX session builder: {e}")))?
            .commit_from_file(&model_path)
            .map_err(|e| EmbedError::Inference(format!("load {}: {e}", model_path.display())))?;
        let dim = infer_dim(session.outputs()[0].dtype()).unwrap_or(768);

        let mut tokenizer = Tokenizer::from_file(&tokenizer_path).map_err(|e| {
            EmbedError::Inference(format!("load {}: {e}", tokenizer_path.display()))
        })?;
        tokenizer
            .with_truncation(Some(TruncationParams {
                max_length: config.max_sequence_length,
                ..Default::default()
            }))
            .map_err(|e| EmbedError::Inference(format!("tokenizer truncation: {e}")))?;
        tokenizer.with_padding(Some(PaddingParams::default()));

        info!(dim, model = %model_path.display(), "loaded local embedding model");
        Ok(Self {
            session: Mutex::new(session),
            tokenizer,
            config,
            dim,
        })
    }

    /// Hidden-state width of the loaded model.
    pub fn dim(&self) -> usize {
        self.dim
    }

    fn embed_batch_blocking(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbedError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let encodings = self
            .tokenizer
            .encode_batch(texts.to_vec(), true)
            .map_err(|e| EmbedError::Inference(format!("tokenization: {e}")))?;

        let batch = encodings.len();
        let seq_len = encodings
            .iter()
            .map(|e| e.get_ids().len())
            .max()
            .unwrap_or(0);
        if seq_len == 0 {
            return Err(EmbedError::Inference(
                "tokenizer produced no tokens".to_string(),
            ));
        }

        let mut input_ids = Vec::with_capacity(batch * seq_len);
        let mut attention_mask = Vec::with_capacity(batch * seq_len);
        let mut type_ids = Vec::with_capacity(batch * seq_len);
        for encoding in &encodings {
            let ids = encoding.get_ids();
            let mask = encoding.get_attention_mask();
            let types = encoding.get_type_ids();
            for i in 0..seq_len {
                input_ids.push(ids.get(i).copied().unwrap_or(0) as i64);
                attention_mask.push(mask.get(i).copied().unwrap_or(0) as i64);
                type_ids.push(types.get(i).copied().unwrap_or(0) as i64);
            }
        }

        let shape = [batch as i64, seq_len as i64];
        let ids_tensor = Tensor::from_array((shape, input_ids.into_boxed_slice()))
            .map_err(|e| EmbedError::Inference(format!("input tensor: {e}")))?;
        let mask_tensor = Tensor::from_array((shape, attention_mask.clone().into_boxed_slice()))
            .map_err(|e| EmbedError::Inference(format!("mask tensor: {e}")))?;

        let mut session = match self.session.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        let outputs = if self.config.token_type_ids {
            let type_tensor = Tensor::from_array((shape, type_ids.into_boxed_slice()))
                .map_err(|e| EmbedError::Inference(format!("type tensor: {e}")))?;
            session
                .run(ort::inputs![
                    "input_ids" => ids_tensor,
                    "attention_mask" => mask_tensor,
                    "token_type_ids" => type_tensor
                ])
                .map_err(|e| EmbedError::Inference(format!("model run: {e}")))?
        } else {
            session
                .run(ort::inputs![
                    "input_ids" => ids_tensor,
                    "attention_mask" => mask_tensor
                ])
                .map_err(|e| EmbedError::Inference(format!("model run: {e}")))?
        };

        let (output_shape, output_data) = outputs[0]
            .try_extract_tensor::<f32>()
            .map_err(|e| EmbedError::Inference(format!("extract output: {e}")))?;
        let dims: &[i64] = output_shape;
        if dims.len() != 3 || dims[0] as usize != batch || dims[1] as usize != seq_len {
            return Err(EmbedError::Inference(format!(
                "unexpected output shape {dims:?} for batch {batch} x {seq_len}"
            )));
        }
        let hidden = dims[2] as usize;

        let mut vectors = Vec::with_capacity(batch);
        for b in 0..batch {
            let mut pooled = vec![0.0f32; hidden];
            let mut tokens = 0.0f32;
            for t in 0..seq_len {
                if attention_mask[b * seq_len + t] == 0 {
                    continue;
                }
                tokens += 1.0;
                let offset = (b * seq_len + t) * hidden;
                for (value, slot) in output_data[offset..offset + hidden].iter().zip(&mut pooled) {
                    *slot += value;
                }
            }
            if tokens > 0.0 {
                for value in &mut pooled {
                    *value /= tokens;
                }
            }
            l2_normalize_in_place(&mut pooled);
            vectors.push(pooled);
        }
        Ok(vectors)
    }
}

#[async_trait]
impl TextEncoder for OnnxEncoder {
    async fn encode(&self, text: &str) -> Result<Vec<f32>, EmbedError> {
        let mut vectors = self.embed_batch_blocking(&[text.to_string()])?;
        let Some(vector) = vectors.pop() else {
            return Err(EmbedError::Inference(
                "model produced no embedding".to_string(),
            ));
        };
        Ok(vector)
    }

    async fn encode_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbedError> {
        self.embed_batch_blocking(texts)
    }
}

fn infer_dim(output_type: &ort::value::ValueType) -> Option<usize> {
    match output_type {
        ort::value::ValueType::Tensor { shape, .. } => shape
            .last()
            .and_then(|&d| if d > 0 { Some(d as usize) } else { None }),
        _ => None,
    }
}
