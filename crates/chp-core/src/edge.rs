//! Query edges.
//!
//! The edge payload stored in the graph is a [`QueryEdge`]: its key, typed
//! predicate and optional outcome qualifier. Subject and object live in the
//! graph structure itself and are exposed through [`EdgeRef`].

use serde::{Deserialize, Serialize};

use crate::id::{EdgeKey, NodeKey};
use crate::predicate::Predicate;
use crate::qualifier::OutcomeQualifier;

/// Edge payload of a query graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryEdge {
    pub key: EdgeKey,
    pub predicate: Predicate,
    /// Explicit qualifier, only ever set on disease-to-phenotype edges.
    pub qualifier: Option<OutcomeQualifier>,
}

impl QueryEdge {
    pub fn new(key: impl Into<EdgeKey>, predicate: Predicate) -> Self {
        QueryEdge {
            key: key.into(),
            predicate,
            qualifier: None,
        }
    }

    /// Attaches an outcome qualifier.
    pub fn with_qualifier(mut self, qualifier: OutcomeQualifier) -> Self {
        self.qualifier = Some(qualifier);
        self
    }

    /// The qualifier in effect for this edge: the explicit one, else
    /// `default`. `None` for predicates that take no qualifier.
    pub fn effective_qualifier(&self, default: OutcomeQualifier) -> Option<OutcomeQualifier> {
        if self.predicate.accepts_qualifier() {
            Some(self.qualifier.unwrap_or(default))
        } else {
            None
        }
    }
}

/// Borrowed view of an edge together with its endpoints.
#[derive(Debug, Clone, Copy)]
pub struct EdgeRef<'a> {
    pub edge: &'a QueryEdge,
    pub subject: &'a NodeKey,
    pub object: &'a NodeKey,
}

impl<'a> EdgeRef<'a> {
    pub fn key(&self) -> &'a EdgeKey {
        &self.edge.key
    }

    pub fn predicate(&self) -> Predicate {
        self.edge.predicate
    }
}
