//! Query nodes.
//!
//! A [`QueryNode`] is a typed biomedical entity with zero or more candidate
//! identifiers ("curies"). A node without candidates is a *wildcard*: the
//! entity the query asks to infer or rank.

use serde::{Deserialize, Serialize};

use crate::category::EntityCategory;
use crate::id::NodeKey;

/// A node of a query graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryNode {
    /// Key of this node within its graph.
    pub key: NodeKey,
    /// The node's entity category.
    pub category: EntityCategory,
    /// Candidate identifiers, in declared order. Empty for wildcards.
    pub ids: Vec<String>,
}

impl QueryNode {
    /// Creates a node with the given candidate identifiers.
    pub fn new(key: impl Into<NodeKey>, category: EntityCategory, ids: Vec<String>) -> Self {
        QueryNode {
            key: key.into(),
            category,
            ids,
        }
    }

    /// Creates a wildcard node (no candidate identifiers).
    pub fn wildcard(key: impl Into<NodeKey>, category: EntityCategory) -> Self {
        QueryNode::new(key, category, Vec::new())
    }

    /// Returns `true` if this node declares no identifier.
    pub fn is_wildcard(&self) -> bool {
        self.ids.is_empty()
    }

    /// The single identifier of a resolved node. `None` for wildcards and for
    /// nodes still carrying several candidates.
    pub fn resolved_id(&self) -> Option<&str> {
        match self.ids.as_slice() {
            [only] => Some(only.as_str()),
            _ => None,
        }
    }

    /// Replaces the candidate list with a single resolved identifier.
    pub fn resolve_to(&mut self, curie: impl Into<String>) {
        self.ids = vec![curie.into()];
    }
}
