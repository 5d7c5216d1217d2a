//! Query shape classification.
//!
//! Classification is cardinality-first, structure-second: counting nodes per
//! category rules out most malformed graphs before the per-edge role checks in
//! [`rules`] run.
//!
//! Decision procedure, in order:
//! 1. exactly one edge or exactly two nodes → [`ShapeKind::OneHop`];
//! 2. more than one wildcard gene/drug, disease or phenotype → cardinality error;
//! 3. no wildcard, one phenotype, one disease → [`ShapeKind::Default`];
//! 4. one disease, one wildcard → [`ShapeKind::Wildcard`];
//! 5. anything else → [`CheckError::UnidentifiedQueryType`].
//!
//! Default and Wildcard candidates must pass their structural contract before
//! being returned; there is no fallback to another shape.

pub mod rules;

pub use rules::validate;

use std::fmt;

use chp_core::category::EntityCategory;
use chp_core::id::NodeKey;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::error::CheckError;
use crate::normalize::NormalizedGraph;

/// A handful of node keys; query graphs rarely hold more than two per role.
pub type KeySet = SmallVec<[NodeKey; 2]>;

/// The supported query shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeKind {
    /// A single drug-gene interaction hop.
    OneHop,
    /// Fully specified genes/drugs → disease → phenotypic outcome.
    Default,
    /// Like default, with one gene or drug left open for ranking.
    Wildcard,
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ShapeKind::OneHop => "onehop",
            ShapeKind::Default => "default",
            ShapeKind::Wildcard => "wildcard",
        };
        f.write_str(name)
    }
}

/// Nodes of a graph partitioned by category, plus the wildcard gene/drug
/// nodes. All lists keep document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoleSets {
    pub genes: KeySet,
    pub drugs: KeySet,
    pub diseases: KeySet,
    pub phenotypes: KeySet,
    pub wildcards: KeySet,
}

impl RoleSets {
    /// Partitions the nodes of a normalized graph.
    pub fn partition(graph: &NormalizedGraph) -> Self {
        let mut roles = RoleSets::default();
        for node in graph.nodes() {
            let key = node.key.clone();
            if node.category.is_contribution() && node.is_wildcard() {
                roles.wildcards.push(key.clone());
            }
            match node.category {
                EntityCategory::Gene => roles.genes.push(key),
                EntityCategory::Drug => roles.drugs.push(key),
                EntityCategory::Disease => roles.diseases.push(key),
                EntityCategory::PhenotypicOutcome => roles.phenotypes.push(key),
            }
        }
        roles
    }

    /// Nodes of the given category.
    pub fn of(&self, category: EntityCategory) -> &[NodeKey] {
        match category {
            EntityCategory::Gene => self.genes.as_slice(),
            EntityCategory::Drug => self.drugs.as_slice(),
            EntityCategory::Disease => self.diseases.as_slice(),
            EntityCategory::PhenotypicOutcome => self.phenotypes.as_slice(),
        }
    }

    /// Returns `true` if `key` is a node of the given category.
    pub fn contains(&self, category: EntityCategory, key: &NodeKey) -> bool {
        self.of(category).contains(key)
    }

    pub fn is_wildcard(&self, key: &NodeKey) -> bool {
        self.wildcards.contains(key)
    }
}

/// A classified query: its shape and the role sets checked to reach it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryShape {
    kind: ShapeKind,
    roles: RoleSets,
}

impl QueryShape {
    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    pub fn roles(&self) -> &RoleSets {
        &self.roles
    }

    /// The wildcard gene/drug node, if the query has one.
    pub fn wildcard(&self) -> Option<&NodeKey> {
        self.roles.wildcards.first()
    }
}

/// Determines the shape of a normalized graph.
///
/// One-hop graphs are returned without structural checks; run
/// [`rules::check_one_hop`] (or [`validate`]) on them before emitting a plan.
pub fn classify(graph: &NormalizedGraph) -> Result<QueryShape, CheckError> {
    let roles = RoleSets::partition(graph);

    if graph.edge_count() == 1 || graph.node_count() == 2 {
        tracing::debug!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "classified as onehop"
        );
        return Ok(QueryShape {
            kind: ShapeKind::OneHop,
            roles,
        });
    }

    if roles.wildcards.len() > 1 {
        return Err(CheckError::TooManyContributionNodes {
            nodes: roles.wildcards.to_vec(),
        });
    }
    if roles.diseases.len() > 1 {
        return Err(CheckError::TooManyDiseaseNodes {
            nodes: roles.diseases.to_vec(),
        });
    }
    if roles.phenotypes.len() > 1 {
        return Err(CheckError::TooManyPhenotypeNodes {
            nodes: roles.phenotypes.to_vec(),
        });
    }

    let wildcards = roles.wildcards.len();
    let kind = if wildcards == 0 && roles.phenotypes.len() == 1 && roles.diseases.len() == 1 {
        rules::check_default(graph, &roles)?;
        ShapeKind::Default
    } else if roles.diseases.len() == 1 && wildcards == 1 {
        rules::check_wildcard(graph, &roles)?;
        ShapeKind::Wildcard
    } else {
        return Err(CheckError::UnidentifiedQueryType);
    };

    tracing::debug!(shape = %kind, "classified multi-hop query");
    Ok(QueryShape { kind, roles })
}
