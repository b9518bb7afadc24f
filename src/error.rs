//! Error types, split by failure policy.
//!
//! Embedding and classifier backends fail loudly: a vocabulary that cannot be
//! embedded or a model that cannot be reached has no meaningful partial
//! answer. LLM selection is different: transport and parse problems are logged
//! inside [`classify_with_llm`](crate::llm::classify_with_llm) and reported as
//! an empty selection, so [`LlmError`] exists for the transport layer but
//! never reaches library callers as `Err`.

use thiserror::Error;

/// Failures from embedding backends and the index built on top of them.
#[derive(Debug, Error)]
pub enum EmbedError {
    /// A local model or tokenizer file is missing.
    #[error("model asset not found: {0}")]
    AssetNotFound(String),

    /// Encoder settings are unusable before any request is made.
    #[error("invalid encoder config: {0}")]
    InvalidConfig(String),

    /// The HTTP round trip to a hosted backend failed.
    #[error("embedding request failed: {0}")]
    Request(String),

    /// The backend answered, but the payload or tensor shapes are unusable.
    #[error("embedding inference failed: {0}")]
    Inference(String),
}

/// Failures from the hosted text-classification endpoint.
#[derive(Debug, Error)]
pub enum ClassifyError {
    /// Classifier settings are unusable before any request is made.
    #[error("invalid classifier config: {0}")]
    InvalidConfig(String),

    /// The HTTP round trip failed or the host returned a non-success status.
    #[error("classification request failed: {0}")]
    Request(String),

    /// The host answered 200 with a body that is not a list of label scores.
    #[error("unexpected classifier response: {0}")]
    Response(String),
}

/// Transport-level failures from a chat-completion backend.
#[derive(Debug, Error)]
pub enum LlmError {
    /// The request could not be sent or the connection dropped mid-flight.
    #[error("chat completion transport failed: {0}")]
    Transport(String),

    /// The endpoint returned a non-success HTTP status.
    #[error("chat completion returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The endpoint returned 200 with a body the client cannot use.
    #[error("malformed chat completion response: {0}")]
    Malformed(String),
}

/// Problems with a caller-supplied category vocabulary.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum VocabularyError {
    /// No category names were given.
    #[error("vocabulary must contain at least one category")]
    Empty,

    /// The same name appears twice, which would make scores ambiguous.
    #[error("duplicate category name: {0}")]
    Duplicate(String),

    /// A name is empty or whitespace-only.
    #[error("category names must not be blank")]
    Blank,
}

/// Umbrella error for the strategy trait, so heterogeneous strategies can be
/// driven behind one signature.
#[derive(Debug, Error)]
pub enum StrategyError {
    #[error(transparent)]
    Embed(#[from] EmbedError),

    #[error(transparent)]
    Classify(#[from] ClassifyError),
}
