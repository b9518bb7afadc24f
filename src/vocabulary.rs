//! Category vocabularies the embedding and LLM strategies select from.

use std::collections::HashSet;

use once_cell::sync::Lazy;

use crate::error::VocabularyError;
use crate::iab::{IAB_TIER1, IAB_TIER2_SUBSET};

static IAB: Lazy<Vocabulary> =
    Lazy::new(|| Vocabulary::new(IAB_TIER1).expect("bundled tier-1 taxonomy is valid"));

static IAB_EXTENDED: Lazy<Vocabulary> = Lazy::new(|| {
    Vocabulary::new(IAB_TIER1.into_iter().chain(IAB_TIER2_SUBSET))
        .expect("bundled taxonomy is valid")
});

/// An ordered set of category names.
///
/// Order is part of the contract: categories with equal similarity scores are
/// reported in vocabulary order, so two indexes built from the same
/// vocabulary rank identically.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vocabulary {
    names: Vec<String>,
}

impl Vocabulary {
    /// Build a vocabulary from category names, preserving order.
    ///
    /// Rejects empty input, blank names, and duplicates.
    pub fn new<I, S>(names: I) -> Result<Self, VocabularyError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        if names.is_empty() {
            return Err(VocabularyError::Empty);
        }
        let mut seen = HashSet::new();
        for name in &names {
            if name.trim().is_empty() {
                return Err(VocabularyError::Blank);
            }
            if !seen.insert(name.as_str()) {
                return Err(VocabularyError::Duplicate(name.clone()));
            }
        }
        Ok(Self { names })
    }

    /// The bundled tier-1 IAB taxonomy.
    pub fn iab() -> &'static Vocabulary {
        &IAB
    }

    /// Tier-1 plus the common tier-2 subset.
    pub fn iab_extended() -> &'static Vocabulary {
        &IAB_EXTENDED
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Position of `name` in the vocabulary, if present.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}
