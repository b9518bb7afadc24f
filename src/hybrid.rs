//! Two-stage matching: embedding candidates, then LLM refinement.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::embed::EmbeddingIndex;
use crate::error::EmbedError;
use crate::llm::{ChatCompletion, classify_with_llm};

/// Knobs for the two hybrid stages.
///
/// The candidate threshold sits lower than a standalone embedding match
/// (0.2 against the usual 0.3): the first stage is a pre-filter, not a final
/// decision, so it errs on the inclusive side and lets the model do the
/// narrowing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HybridParams {
    /// Candidates requested from the embedding stage.
    #[serde(default = "HybridParams::default_candidate_count")]
    pub candidate_count: usize,

    /// Candidate-stage similarity cutoff.
    #[serde(default = "HybridParams::default_similarity_threshold")]
    pub similarity_threshold: f32,

    /// Upper bound on the categories the model may select.
    #[serde(default = "HybridParams::default_limit")]
    pub limit: usize,
}

impl HybridParams {
    pub(crate) fn default_candidate_count() -> usize {
        20
    }

    pub(crate) fn default_similarity_threshold() -> f32 {
        0.2
    }

    pub(crate) fn default_limit() -> usize {
        5
    }
}

impl Default for HybridParams {
    fn default() -> Self {
        Self {
            candidate_count: Self::default_candidate_count(),
            similarity_threshold: Self::default_similarity_threshold(),
            limit: Self::default_limit(),
        }
    }
}

/// Match `text` with the embedding stage, then let the model refine.
///
/// Only candidate names are handed to the LLM stage; similarity scores are
/// dropped on the way through, and the model's selection comes back
/// verbatim. When the embedding stage returns no candidates the LLM stage
/// still runs with an empty allowed set and reports no categories, which
/// keeps the composition a straight pipe.
///
/// `Err` only reflects the embedding stage; the LLM stage degrades to an
/// empty selection on its own failures.
pub async fn match_hybrid(
    text: &str,
    index: &EmbeddingIndex,
    chat: &dyn ChatCompletion,
    model: &str,
    params: HybridParams,
) -> Result<Vec<String>, EmbedError> {
    let candidates = index
        .match_categories(text, params.candidate_count, params.similarity_threshold)
        .await?;
    let names: Vec<String> = candidates.into_iter().map(|m| m.name).collect();
    debug!(candidates = names.len(), "embedding stage selected candidates");

    Ok(classify_with_llm(text, chat, model, &names, params.limit).await)
}
