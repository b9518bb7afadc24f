//! One trait over the four ways of matching categories.

use std::sync::Arc;

use async_trait::async_trait;

use crate::classifier::HostedClassifier;
use crate::embed::EmbeddingIndex;
use crate::error::StrategyError;
use crate::hybrid::{HybridParams, match_hybrid};
use crate::llm::{ChatCompletion, classify_with_llm};
use crate::types::CategoryMatch;
use crate::vocabulary::Vocabulary;

/// A way of turning campaign text into ranked categories.
///
/// All four strategies sit behind this trait so callers can swap them or run
/// several side by side without branching on which one they hold.
#[async_trait]
pub trait CategoryMatcher: Send + Sync {
    /// Short label for logs.
    fn name(&self) -> &str;

    /// Rank categories for `text`, best first. An empty list is a valid
    /// answer.
    async fn match_categories(&self, text: &str) -> Result<Vec<CategoryMatch>, StrategyError>;
}

/// Cosine ranking over a precomputed vocabulary matrix.
pub struct EmbeddingStrategy {
    index: Arc<EmbeddingIndex>,
    num: usize,
    similarity_threshold: f32,
}

impl EmbeddingStrategy {
    pub fn new(index: Arc<EmbeddingIndex>, num: usize, similarity_threshold: f32) -> Self {
        Self {
            index,
            num,
            similarity_threshold,
        }
    }
}

#[async_trait]
impl CategoryMatcher for EmbeddingStrategy {
    fn name(&self) -> &str {
        "embedding"
    }

    async fn match_categories(&self, text: &str) -> Result<Vec<CategoryMatch>, StrategyError> {
        Ok(self
            .index
            .match_categories(text, self.num, self.similarity_threshold)
            .await?)
    }
}

/// Pass-through to a hosted classifier with its own label space.
pub struct ClassifierStrategy {
    classifier: Arc<HostedClassifier>,
    model: String,
    num: usize,
}

impl ClassifierStrategy {
    pub fn new(classifier: Arc<HostedClassifier>, model: impl Into<String>, num: usize) -> Self {
        Self {
            classifier,
            model: model.into(),
            num,
        }
    }
}

#[async_trait]
impl CategoryMatcher for ClassifierStrategy {
    fn name(&self) -> &str {
        "classifier"
    }

    async fn match_categories(&self, text: &str) -> Result<Vec<CategoryMatch>, StrategyError> {
        Ok(self.classifier.classify(text, &self.model, self.num).await?)
    }
}

/// Constrained LLM selection over the full vocabulary.
///
/// Matches come back unscored; the model ranks by position only.
pub struct LlmStrategy {
    chat: Arc<dyn ChatCompletion>,
    model: String,
    vocabulary: Vocabulary,
    limit: usize,
}

impl LlmStrategy {
    pub fn new(
        chat: Arc<dyn ChatCompletion>,
        model: impl Into<String>,
        vocabulary: Vocabulary,
        limit: usize,
    ) -> Self {
        Self {
            chat,
            model: model.into(),
            vocabulary,
            limit,
        }
    }
}

#[async_trait]
impl CategoryMatcher for LlmStrategy {
    fn name(&self) -> &str {
        "llm"
    }

    async fn match_categories(&self, text: &str) -> Result<Vec<CategoryMatch>, StrategyError> {
        let categories = classify_with_llm(
            text,
            self.chat.as_ref(),
            &self.model,
            self.vocabulary.names(),
            self.limit,
        )
        .await;
        Ok(categories.into_iter().map(CategoryMatch::unscored).collect())
    }
}

/// Embedding candidates refined by the LLM.
pub struct HybridStrategy {
    index: Arc<EmbeddingIndex>,
    chat: Arc<dyn ChatCompletion>,
    model: String,
    params: HybridParams,
}

impl HybridStrategy {
    pub fn new(
        index: Arc<EmbeddingIndex>,
        chat: Arc<dyn ChatCompletion>,
        model: impl Into<String>,
        params: HybridParams,
    ) -> Self {
        Self {
            index,
            chat,
            model: model.into(),
            params,
        }
    }
}

#[async_trait]
impl CategoryMatcher for HybridStrategy {
    fn name(&self) -> &str {
        "hybrid"
    }

    async fn match_categories(&self, text: &str) -> Result<Vec<CategoryMatch>, StrategyError> {
        let categories = match_hybrid(
            text,
            &self.index,
            self.chat.as_ref(),
            &self.model,
            self.params,
        )
        .await?;
        Ok(categories.into_iter().map(CategoryMatch::unscored).collect())
    }
}
