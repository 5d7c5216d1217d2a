//! Wire-level query documents and their conversion into [`QueryGraph`].
//!
//! A query arrives as a nested key/value document:
//!
//! ```json
//! {
//!   "nodes": { "n0": { "categories": ["biolink:Gene"], "ids": ["ENSEMBL:ENSG00000141510"] } },
//!   "edges": { "e0": { "predicates": ["biolink:GeneToDiseaseAssociation"],
//!                      "subject": "n0", "object": "n1" } }
//! }
//! ```
//!
//! The document structs are deliberately loose (string categories, singular or
//! plural field spellings); [`QueryGraph::from_document`] is where the closed
//! vocabularies are enforced.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::category::EntityCategory;
use crate::edge::QueryEdge;
use crate::error::CoreError;
use crate::graph::QueryGraph;
use crate::id::{EdgeKey, NodeKey};
use crate::node::QueryNode;
use crate::predicate::Predicate;
use crate::qualifier::{OutcomeOperator, OutcomeQualifier, DEFAULT_OUTCOME_DAYS};

/// A field that may be given as a single string or a list of strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

impl OneOrMany {
    fn first(&self) -> Option<&str> {
        match self {
            OneOrMany::One(s) => Some(s.as_str()),
            OneOrMany::Many(v) => v.first().map(String::as_str),
        }
    }
}

/// Top-level query document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryGraphDocument {
    pub nodes: IndexMap<String, NodeDocument>,
    #[serde(default)]
    pub edges: IndexMap<String, EdgeDocument>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<OneOrMany>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<String>>,
    /// Candidate identifiers. Absent, `null` or `[]` all mean wildcard.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ids: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EdgeDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub predicate: Option<OneOrMany>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub predicates: Option<Vec<String>>,
    pub subject: String,
    pub object: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<EdgeProperties>,
}

/// Outcome qualifier as written on the wire: `{"qualifier": "<=", "days": 500}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EdgeProperties {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qualifier: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub days: Option<f64>,
}

impl NodeDocument {
    /// The first declared category name, from `categories` or `category`.
    fn category_name(&self) -> Option<&str> {
        self.categories
            .as_ref()
            .and_then(|c| c.first().map(String::as_str))
            .or_else(|| self.category.as_ref().and_then(OneOrMany::first))
    }
}

impl EdgeDocument {
    /// The first declared predicate name, from `predicates` or `predicate`.
    fn predicate_name(&self) -> Option<&str> {
        self.predicates
            .as_ref()
            .and_then(|p| p.first().map(String::as_str))
            .or_else(|| self.predicate.as_ref().and_then(OneOrMany::first))
    }
}

impl QueryGraph {
    /// Parses a JSON query document.
    pub fn from_json_str(json: &str) -> Result<Self, CoreError> {
        let document: QueryGraphDocument = serde_json::from_str(json)?;
        QueryGraph::from_document(document)
    }

    /// Converts an already-parsed JSON value.
    pub fn from_json_value(value: serde_json::Value) -> Result<Self, CoreError> {
        let document: QueryGraphDocument = serde_json::from_value(value)?;
        QueryGraph::from_document(document)
    }

    /// Builds a typed graph from a document, enforcing the closed category
    /// and predicate vocabularies and referential integrity.
    pub fn from_document(document: QueryGraphDocument) -> Result<Self, CoreError> {
        let mut graph = QueryGraph::new();

        for (key, node) in document.nodes {
            let key = NodeKey(key);
            let name = node
                .category_name()
                .ok_or_else(|| CoreError::MissingCategory { node: key.clone() })?;
            let category = EntityCategory::from_biolink(name).ok_or_else(|| {
                CoreError::UnrecognizedCategory {
                    node: key.clone(),
                    category: name.to_string(),
                }
            })?;
            let ids = node.ids.unwrap_or_default();
            graph.add_node(QueryNode { key, category, ids })?;
        }

        for (key, edge) in document.edges {
            let key = EdgeKey(key);
            let name = edge
                .predicate_name()
                .ok_or_else(|| CoreError::MissingPredicate { edge: key.clone() })?;
            let predicate =
                Predicate::from_biolink(name).ok_or_else(|| CoreError::UnexpectedPredicate {
                    edge: key.clone(),
                    predicate: name.to_string(),
                })?;

            let qualifier = match edge.properties {
                Some(properties) if predicate.accepts_qualifier() => {
                    Some(parse_qualifier(&key, properties)?)
                }
                Some(_) => {
                    tracing::warn!(
                        edge = %key,
                        %predicate,
                        "ignoring properties on edge that takes no qualifier"
                    );
                    None
                }
                None => None,
            };

            let query_edge = QueryEdge {
                key,
                predicate,
                qualifier,
            };
            graph.add_edge(
                query_edge,
                &NodeKey(edge.subject),
                &NodeKey(edge.object),
            )?;
        }

        Ok(graph)
    }

    /// Converts back into the canonical wire form: plural field spellings,
    /// canonical Biolink names, no `ids` on wildcards.
    pub fn to_document(&self) -> QueryGraphDocument {
        let nodes = self
            .nodes()
            .map(|node| {
                let doc = NodeDocument {
                    category: None,
                    categories: Some(vec![node.category.biolink_name().to_string()]),
                    ids: (!node.is_wildcard()).then(|| node.ids.clone()),
                };
                (node.key.to_string(), doc)
            })
            .collect();

        let edges = self
            .edges()
            .map(|edge| {
                let doc = EdgeDocument {
                    predicate: None,
                    predicates: Some(vec![edge.predicate().biolink_name().to_string()]),
                    subject: edge.subject.to_string(),
                    object: edge.object.to_string(),
                    properties: edge.edge.qualifier.map(|q| EdgeProperties {
                        qualifier: Some(q.operator.symbol().to_string()),
                        days: Some(q.days),
                    }),
                };
                (edge.key().to_string(), doc)
            })
            .collect();

        QueryGraphDocument { nodes, edges }
    }
}

fn parse_qualifier(edge: &EdgeKey, properties: EdgeProperties) -> Result<OutcomeQualifier, CoreError> {
    let operator = match properties.qualifier {
        Some(symbol) => OutcomeOperator::from_symbol(&symbol).ok_or_else(|| {
            CoreError::UnknownOperator {
                edge: edge.clone(),
                operator: symbol.clone(),
            }
        })?,
        None => OutcomeOperator::default(),
    };
    let days = properties.days.unwrap_or(DEFAULT_OUTCOME_DAYS);
    Ok(OutcomeQualifier { operator, days })
}
