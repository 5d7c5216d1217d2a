//! Typed data model for biomedical query graphs.
//!
//! A client query is a small graph of entity nodes (genes, drugs, diseases,
//! phenotypic outcomes) joined by typed relation edges. This crate decodes the
//! wire document into a [`QueryGraph`], enforcing the closed category and
//! predicate vocabularies, and defines the [`VocabularyIndex`] seam used to
//! resolve identifiers.

pub mod category;
pub mod document;
pub mod edge;
pub mod error;
pub mod graph;
pub mod id;
pub mod node;
pub mod predicate;
pub mod qualifier;
pub mod vocabulary;

// Re-export commonly used types
pub use category::EntityCategory;
pub use document::QueryGraphDocument;
pub use edge::{EdgeRef, QueryEdge};
pub use error::CoreError;
pub use graph::QueryGraph;
pub use id::{EdgeKey, NodeKey};
pub use node::QueryNode;
pub use predicate::Predicate;
pub use qualifier::{OutcomeOperator, OutcomeQualifier};
pub use vocabulary::{Vocabulary, VocabularyIndex};
