//! Result types shared by every matching strategy.

use serde::{Deserialize, Serialize};

/// One matched category.
///
/// `score` is present for the similarity and classifier strategies and absent
/// for LLM selection, which ranks by position instead of producing numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryMatch {
    /// Category name, exactly as the producing backend spelled it.
    pub name: String,

    /// Confidence or similarity in `[0, 1]`, rounded to two decimals.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f32>,
}

impl CategoryMatch {
    pub fn scored(name: impl Into<String>, score: f32) -> Self {
        Self {
            name: name.into(),
            score: Some(score),
        }
    }

    pub fn unscored(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            score: None,
        }
    }
}

/// Round to two decimals, the granularity all strategies report scores at.
pub(crate) fn round2(score: f32) -> f32 {
    (score * 100.0).round() / 100.0
}
