//! Vocabulary index: the controlled identifiers known per entity category.
//!
//! The index is injected by the caller and only ever read. Implementations
//! must be `Send + Sync` so that one index can serve queries processed in
//! parallel.

use std::collections::HashMap;

use indexmap::IndexSet;

use crate::category::EntityCategory;

/// Read-only lookup of canonical identifiers.
pub trait VocabularyIndex: Send + Sync {
    /// Returns `true` if `curie` is a known identifier of `category`.
    fn has(&self, category: EntityCategory, curie: &str) -> bool;
}

/// In-memory vocabulary keyed by category.
///
/// Identifiers are kept in insertion order so that [`Vocabulary::curies`]
/// lists them deterministically.
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    entries: HashMap<EntityCategory, IndexSet<String>>,
}

impl Vocabulary {
    pub fn new() -> Self {
        Vocabulary::default()
    }

    /// Registers a known identifier. Returns `false` if it was already present.
    pub fn insert(&mut self, category: EntityCategory, curie: impl Into<String>) -> bool {
        self.entries.entry(category).or_default().insert(curie.into())
    }

    /// Builder form of [`Vocabulary::insert`] for a batch of identifiers.
    pub fn with_curies<I, S>(mut self, category: EntityCategory, curies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for curie in curies {
            self.insert(category, curie);
        }
        self
    }

    /// Known identifiers of a category, in insertion order.
    pub fn curies(&self, category: EntityCategory) -> impl Iterator<Item = &str> + '_ {
        self.entries
            .get(&category)
            .into_iter()
            .flat_map(|set| set.iter().map(String::as_str))
    }

    /// Number of identifiers known for a category.
    pub fn len_of(&self, category: EntityCategory) -> usize {
        self.entries.get(&category).map_or(0, IndexSet::len)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.values().all(IndexSet::is_empty)
    }
}

impl VocabularyIndex for Vocabulary {
    fn has(&self, category: EntityCategory, curie: &str) -> bool {
        self.entries
            .get(&category)
            .is_some_and(|set| set.contains(curie))
    }
}

impl<S: Into<String>> FromIterator<(EntityCategory, S)> for Vocabulary {
    fn from_iter<I: IntoIterator<Item = (EntityCategory, S)>>(iter: I) -> Self {
        let mut vocabulary = Vocabulary::new();
        vocabulary.extend(iter);
        vocabulary
    }
}

impl<S: Into<String>> Extend<(EntityCategory, S)> for Vocabulary {
    fn extend<I: IntoIterator<Item = (EntityCategory, S)>>(&mut self, iter: I) {
        for (category, curie) in iter {
            self.insert(category, curie);
        }
    }
}
