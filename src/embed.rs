//! The embedding index: precomputed category vectors plus cosine ranking.

use std::sync::Arc;

use tracing::debug;

use crate::encoder::TextEncoder;
use crate::error::EmbedError;
use crate::types::{CategoryMatch, round2};
use crate::vocabulary::Vocabulary;

/// A category vocabulary embedded up front, ready to rank queries against.
///
/// Construction embeds every name once; matching embeds only the query. The
/// index never mutates after construction, so one instance can sit behind an
/// `Arc` and serve any number of concurrent matches.
pub struct EmbeddingIndex {
    encoder: Arc<dyn TextEncoder>,
    vocabulary: Vocabulary,
    vectors: Vec<Vec<f32>>,
}

impl EmbeddingIndex {
    /// Embed `vocabulary` with `encoder`.
    ///
    /// Fails when the backend cannot embed the vocabulary; there is no
    /// partially built index to fall back to.
    pub async fn build(
        encoder: Arc<dyn TextEncoder>,
        vocabulary: Vocabulary,
    ) -> Result<Self, EmbedError> {
        let vectors = encoder.encode_batch(vocabulary.names()).await?;
        if vectors.len() != vocabulary.len() {
            return Err(EmbedError::Inference(format!(
                "encoder returned {} vectors for {} categories",
                vectors.len(),
                vocabulary.len()
            )));
        }
        debug!(categories = vocabulary.len(), "embedding index built");
        Ok(Self {
            encoder,
            vocabulary,
            vectors,
        })
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// Embed arbitrary text with the index's encoder.
    pub async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbedError> {
        self.encoder.encode(text).await
    }

    /// Rank categories against `text`, best first.
    ///
    /// Returns at most `num` categories (clamped to the vocabulary size)
    /// whose similarity is at least `similarity_threshold`. Scores are
    /// rounded to two decimals before the threshold applies, so a raw 0.296
    /// passes a 0.3 threshold. An empty result is a valid answer, not an
    /// error.
    pub async fn match_categories(
        &self,
        text: &str,
        num: usize,
        similarity_threshold: f32,
    ) -> Result<Vec<CategoryMatch>, EmbedError> {
        let query = self.embed(text).await?;
        let mut ranked: Vec<(usize, f32)> = self
            .vectors
            .iter()
            .map(|vector| cosine(&query, vector))
            .enumerate()
            .collect();
        // Stable sort keeps vocabulary order for equal scores.
        ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

        let mut matches = Vec::new();
        for &(index, raw) in ranked.iter().take(num.min(self.vocabulary.len())) {
            let score = round2(raw);
            if score < similarity_threshold {
                break;
            }
            matches.push(CategoryMatch::scored(
                self.vocabulary.names()[index].clone(),
                score,
            ));
        }
        Ok(matches)
    }
}

/// Plain cosine; neither side is assumed to be unit length.
pub(crate) fn cosine(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;

    /// Maps known strings to fixed directions so similarity scores in tests
    /// are exact.
    struct AxisEncoder;

    fn direction(text: &str) -> Vec<f32> {
        match text {
            "alpha" => vec![1.0, 0.0, 0.0, 0.0],
            "beta" => vec![0.0, 1.0, 0.0, 0.0],
            "gamma" => vec![0.0, 0.0, 1.0, 0.0],
            "mostly beta" => vec![0.0, 0.8, 0.0, 0.6],
            "beta leaning gamma" => vec![0.0, 0.48, 0.64, 0.6],
            "alpha beta split" => vec![0.6, 0.6, 0.0, 0.529_150_26],
            "barely beta" => vec![0.0, 0.296, 0.0, 0.955_188],
            _ => vec![0.0, 0.0, 0.0, 1.0],
        }
    }

    #[async_trait]
    impl TextEncoder for AxisEncoder {
        async fn encode(&self, text: &str) -> Result<Vec<f32>, EmbedError> {
            Ok(direction(text))
        }

        async fn encode_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbedError> {
            Ok(texts.iter().map(|t| direction(t)).collect())
        }
    }

    struct FailingEncoder;

    #[async_trait]
    impl TextEncoder for FailingEncoder {
        async fn encode(&self, _text: &str) -> Result<Vec<f32>, EmbedError> {
            Err(EmbedError::Request("connection refused".to_string()))
        }

        async fn encode_batch(&self, _texts: &[String]) -> Result<Vec<Vec<f32>>, EmbedError> {
            Err(EmbedError::Request("connection refused".to_string()))
        }
    }

    struct MiscountEncoder;

    #[async_trait]
    impl TextEncoder for MiscountEncoder {
        async fn encode(&self, _text: &str) -> Result<Vec<f32>, EmbedError> {
            Ok(vec![1.0, 0.0])
        }

        async fn encode_batch(&self, _texts: &[String]) -> Result<Vec<Vec<f32>>, EmbedError> {
            Ok(vec![vec![1.0, 0.0]])
        }
    }

    /// Embeds the vocabulary fine but refuses single queries.
    struct BatchOnlyEncoder;

    #[async_trait]
    impl TextEncoder for BatchOnlyEncoder {
        async fn encode(&self, _text: &str) -> Result<Vec<f32>, EmbedError> {
            Err(EmbedError::Request("connection refused".to_string()))
        }

        async fn encode_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbedError> {
            Ok(texts.iter().map(|t| direction(t)).collect())
        }
    }

    async fn axis_index() -> EmbeddingIndex {
        let vocabulary = Vocabulary::new(["alpha", "beta", "gamma"]).unwrap();
        EmbeddingIndex::build(Arc::new(AxisEncoder), vocabulary)
            .await
            .unwrap()
    }

    #[test]
    fn cosine_geometry() {
        assert_eq!(cosine(&[1.0, 0.0], &[0.0, 1.0]), 0.0);
        assert!((cosine(&[1.0, 0.0], &[1.0, 0.0]) - 1.0).abs() < 1e-6);
        assert!((cosine(&[1.0, 0.0], &[-1.0, 0.0]) + 1.0).abs() < 1e-6);
        // Magnitude does not matter.
        assert!((cosine(&[3.0, 0.0], &[0.5, 0.0]) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn cosine_of_zero_vector_is_zero() {
        assert_eq!(cosine(&[0.0, 0.0], &[1.0, 0.0]), 0.0);
    }

    #[tokio::test]
    async fn scores_below_threshold_are_cut() {
        let index = axis_index().await;
        let matches = index.match_categories("mostly beta", 3, 0.3).await.unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].name, "beta");
        assert_eq!(matches[0].score, Some(0.8));
    }

    #[tokio::test]
    async fn equal_scores_keep_vocabulary_order() {
        let index = axis_index().await;
        let matches = index
            .match_categories("alpha beta split", 3, 0.5)
            .await
            .unwrap();
        let names: Vec<&str> = matches.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, ["alpha", "beta"]);
        assert_eq!(matches[0].score, matches[1].score);
    }

    #[tokio::test]
    async fn num_is_clamped_to_vocabulary_size() {
        let index = axis_index().await;
        let matches = index
            .match_categories("beta leaning gamma", 50, 0.0)
            .await
            .unwrap();
        assert_eq!(matches.len(), 3);
        let names: Vec<&str> = matches.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, ["gamma", "beta", "alpha"]);
    }

    #[tokio::test]
    async fn tightening_the_threshold_yields_a_prefix() {
        let index = axis_index().await;
        let loose = index
            .match_categories("beta leaning gamma", 3, 0.4)
            .await
            .unwrap();
        let strict = index
            .match_categories("beta leaning gamma", 3, 0.5)
            .await
            .unwrap();
        assert!(strict.len() < loose.len());
        assert_eq!(strict, loose[..strict.len()]);
    }

    #[tokio::test]
    async fn rounding_happens_before_the_threshold_check() {
        let index = axis_index().await;
        // Raw similarity 0.296 rounds to 0.30 and survives a 0.3 threshold.
        let matches = index.match_categories("barely beta", 3, 0.3).await.unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].score, Some(0.3));
    }

    #[tokio::test]
    async fn no_match_is_ok_and_empty() {
        let index = axis_index().await;
        let matches = index
            .match_categories("nothing in common", 3, 0.3)
            .await
            .unwrap();
        assert!(matches.is_empty());
    }

    #[tokio::test]
    async fn build_fails_when_the_backend_fails() {
        let vocabulary = Vocabulary::new(["alpha", "beta"]).unwrap();
        let err = EmbeddingIndex::build(Arc::new(FailingEncoder), vocabulary)
            .await
            .err()
            .unwrap();
        assert!(err.to_string().contains("embedding request failed"));
    }

    #[tokio::test]
    async fn build_fails_on_a_vector_count_mismatch() {
        let vocabulary = Vocabulary::new(["alpha", "beta", "gamma"]).unwrap();
        let err = EmbeddingIndex::build(Arc::new(MiscountEncoder), vocabulary)
            .await
            .err()
            .unwrap();
        assert!(err.to_string().contains("1 vectors for 3 categories"));
    }

    #[tokio::test]
    async fn query_failures_propagate() {
        let vocabulary = Vocabulary::new(["alpha", "beta"]).unwrap();
        let index = EmbeddingIndex::build(Arc::new(BatchOnlyEncoder), vocabulary)
            .await
            .unwrap();
        let err = index.match_categories("alpha", 2, 0.0).await.err().unwrap();
        assert!(err.to_string().contains("embedding request failed"));
    }
}
