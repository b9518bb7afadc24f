//! IAB category matching for ad-campaign keywords.
//!
//! Given the keyword list of an ad campaign, this crate figures out which
//! IAB content categories the campaign belongs to. There are a few
//! strategies, all behind the [`CategoryMatcher`] trait so you can swap
//! them without touching call sites:
//!
//! - **Embedding** - Embed the categories once, embed the query, rank by
//!   cosine similarity. Cheap and surprisingly solid.
//! - **Classifier** - Call a hosted text-classification model that ships
//!   its own IAB label set.
//! - **LLM** - Ask a chat model, constrained to the vocabulary through a
//!   strict JSON schema.
//! - **Hybrid** - Embedding shortlist first, then the LLM picks from the
//!   shortlist.
//!
//! Failure handling is deliberately lopsided. Embedding and classifier
//! backends are load-bearing, so their errors surface as `Err`. Chat
//! completions are best-effort: a transport or parse failure is logged and
//! comes back as an empty selection instead. An empty `Vec` is never an
//! error anywhere in this crate.
//!
//! [`EmbeddingIndex`] is read-only after construction. Wrap it in an
//! [`Arc`](std::sync::Arc) and share it freely across tasks.
//!
//! ## Quick example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use adcat::{ApiEncoder, EmbeddingIndex, EncoderConfig, Vocabulary};
//!
//! #[tokio::main]
//! async fn main() {
//!     let encoder = Arc::new(ApiEncoder::new(EncoderConfig::default()).unwrap());
//!     let index = EmbeddingIndex::build(encoder, Vocabulary::iab().clone())
//!         .await
//!         .unwrap();
//!
//!     let matches = index
//!         .match_categories("gaming laptops, ultrabooks", 5, 0.3)
//!         .await
//!         .unwrap();
//!     for m in &matches {
//!         println!("{} {:?}", m.name, m.score);
//!     }
//! }
//! ```
//!
//! ## Env vars to know (demo binary)
//!
//! - `HF_API_KEY` / `HF_BASE_URL` - Inference host for embeddings and
//!   classification
//! - `OPENAI_API_KEY` / `OPENAI_BASE_URL` / `OPENAI_MODEL_NAME`
//! - `LLAMA_API_KEY` / `LLAMA_BASE_URL` / `LLAMA_MODEL_NAME`
//! - `ADCAT_ONNX_DIR` - Local model directory (needs the `onnx` feature)

pub mod campaigns;
pub mod classifier;
pub mod config;
pub mod embed;
pub mod encoder;
pub mod error;
pub mod hybrid;
pub mod iab;
pub mod llm;
#[cfg(feature = "onnx")]
pub mod onnx;
pub mod strategy;
pub mod types;
pub mod vocabulary;

mod normalize;

pub use crate::classifier::{
    ClassifierConfig, HostedClassifier, IAB_MIXED_BERT_MODEL, IAB_MULTILABEL_MODEL,
};
pub use crate::config::AppConfig;
pub use crate::embed::EmbeddingIndex;
pub use crate::encoder::{ApiEncoder, EncoderConfig, TextEncoder};
pub use crate::error::{ClassifyError, EmbedError, LlmError, StrategyError, VocabularyError};
pub use crate::hybrid::{HybridParams, match_hybrid};
pub use crate::llm::{
    CategorySelection, ChatCompletion, LlmConfig, OpenAiChatClient, build_category_prompt,
    classify_with_llm,
};
#[cfg(feature = "onnx")]
pub use crate::onnx::{OnnxConfig, OnnxEncoder};
pub use crate::strategy::{
    CategoryMatcher, ClassifierStrategy, EmbeddingStrategy, HybridStrategy, LlmStrategy,
};
pub use crate::types::CategoryMatch;
pub use crate::vocabulary::Vocabulary;
