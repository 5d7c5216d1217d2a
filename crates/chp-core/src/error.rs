//! Core error types for chp-core.
//!
//! Uses `thiserror` for structured, matchable error variants covering every
//! way an input document can fail to become a [`QueryGraph`](crate::graph::QueryGraph).

use thiserror::Error;

use crate::id::{EdgeKey, NodeKey};

/// Errors produced while decoding or building a query graph.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The document is not valid JSON or does not have the expected shape.
    #[error("malformed query document: {0}")]
    Json(#[from] serde_json::Error),

    /// A node declares a category outside the supported set.
    #[error("unrecognized category '{category}' on node {node}")]
    UnrecognizedCategory { node: NodeKey, category: String },

    /// A node declares no category at all.
    #[error("node {node} has no category")]
    MissingCategory { node: NodeKey },

    /// An edge declares a predicate outside the supported set.
    #[error("unexpected predicate '{predicate}' on edge {edge}")]
    UnexpectedPredicate { edge: EdgeKey, predicate: String },

    /// An edge declares no predicate at all.
    #[error("edge {edge} has no predicate")]
    MissingPredicate { edge: EdgeKey },

    /// An edge qualifier uses an operator other than `>=`, `<=`, `=`.
    #[error("unknown qualifier operator '{operator}' on edge {edge}")]
    UnknownOperator { edge: EdgeKey, operator: String },

    /// An edge's subject or object names a node that does not exist.
    #[error("edge {edge} references missing node {node}")]
    DanglingReference { edge: EdgeKey, node: NodeKey },

    /// Two nodes share the same key.
    #[error("duplicate node key: {node}")]
    DuplicateNode { node: NodeKey },

    /// Two edges share the same key.
    #[error("duplicate edge key: {edge}")]
    DuplicateEdge { edge: EdgeKey },
}
