//! The closed set of entity categories a query node may carry.
//!
//! Categories arrive on the wire as Biolink class names (`biolink:Gene`,
//! `biolink:PhenotypicFeature`, ...). Anything outside [`EntityCategory`] is
//! rejected while decoding; there is no "other" bucket.

use std::fmt;

use serde::{Deserialize, Serialize};

const BIOLINK_PREFIX: &str = "biolink:";

/// Entity category of a query node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EntityCategory {
    #[serde(rename = "biolink:Gene")]
    Gene,
    #[serde(rename = "biolink:Drug")]
    Drug,
    #[serde(rename = "biolink:Disease")]
    Disease,
    /// A phenotypic outcome such as survival time.
    #[serde(rename = "biolink:PhenotypicFeature")]
    PhenotypicOutcome,
}

impl EntityCategory {
    /// All categories, in declaration order.
    pub const ALL: [EntityCategory; 4] = [
        EntityCategory::Gene,
        EntityCategory::Drug,
        EntityCategory::Disease,
        EntityCategory::PhenotypicOutcome,
    ];

    /// Parses a Biolink category name. The `biolink:` prefix is optional.
    pub fn from_biolink(name: &str) -> Option<Self> {
        let bare = name.strip_prefix(BIOLINK_PREFIX).unwrap_or(name);
        match bare {
            "Gene" => Some(EntityCategory::Gene),
            "Drug" => Some(EntityCategory::Drug),
            "Disease" => Some(EntityCategory::Disease),
            "PhenotypicFeature" => Some(EntityCategory::PhenotypicOutcome),
            _ => None,
        }
    }

    /// Canonical prefixed Biolink name.
    pub fn biolink_name(self) -> &'static str {
        match self {
            EntityCategory::Gene => "biolink:Gene",
            EntityCategory::Drug => "biolink:Drug",
            EntityCategory::Disease => "biolink:Disease",
            EntityCategory::PhenotypicOutcome => "biolink:PhenotypicFeature",
        }
    }

    /// Returns `true` if a node of this category may be left without
    /// identifiers, i.e. be the entity the query asks to rank.
    pub fn allows_wildcard(self) -> bool {
        matches!(self, EntityCategory::Gene | EntityCategory::Drug)
    }

    /// Returns `true` if declared identifiers of this category must be
    /// resolved against the vocabulary. Disease nodes pass through as given.
    pub fn requires_resolution(self) -> bool {
        !matches!(self, EntityCategory::Disease)
    }

    /// Gene and drug nodes are the "contribution" nodes of a query.
    pub fn is_contribution(self) -> bool {
        self.allows_wildcard()
    }
}

impl fmt::Display for EntityCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.biolink_name())
    }
}
