//! Query plans: the immutable hand-off to the reasoning collaborator.
//!
//! [`emit`] only packages; every check has already run by the time a plan is
//! built. Besides the graph and its shape, a plan carries the query parameters
//! a reasoner needs (which node is the outcome, which genes, which drug, the
//! outcome threshold) so the reasoner never has to re-walk the graph.

use chp_core::category::EntityCategory;
use chp_core::id::NodeKey;
use chp_core::predicate::Predicate;
use chp_core::qualifier::OutcomeQualifier;
use serde::{Deserialize, Serialize};

use crate::normalize::NormalizedGraph;
use crate::shape::{QueryShape, ShapeKind};

/// Parameters extracted from a validated graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryParameters {
    /// The phenotypic outcome node.
    pub outcome: Option<NodeKey>,
    /// The first drug node, in document order.
    pub therapeutic: Option<NodeKey>,
    /// Gene nodes, sorted by key.
    pub genes: Vec<NodeKey>,
    pub disease: Option<NodeKey>,
    /// Qualifier of the disease-to-phenotype edge, defaulted when the edge
    /// carries none. `None` if the graph has no such edge.
    pub outcome_qualifier: Option<OutcomeQualifier>,
}

/// A validated, normalized query ready for reasoning. Never mutated after
/// [`emit`] returns it.
#[derive(Debug, Clone)]
pub struct QueryPlan {
    graph: NormalizedGraph,
    shape: QueryShape,
    wildcard: Option<NodeKey>,
    parameters: QueryParameters,
}

impl QueryPlan {
    pub fn graph(&self) -> &NormalizedGraph {
        &self.graph
    }

    pub fn shape(&self) -> &QueryShape {
        &self.shape
    }

    pub fn kind(&self) -> ShapeKind {
        self.shape.kind()
    }

    /// The node to infer or rank, if any.
    pub fn wildcard(&self) -> Option<&NodeKey> {
        self.wildcard.as_ref()
    }

    pub fn parameters(&self) -> &QueryParameters {
        &self.parameters
    }

    /// Shorthand for `parameters().outcome_qualifier`.
    pub fn outcome_qualifier(&self) -> Option<OutcomeQualifier> {
        self.parameters.outcome_qualifier
    }
}

/// Packages a validated graph and its shape, applying the standard default
/// qualifier (`>= 970`).
pub fn emit(graph: NormalizedGraph, shape: QueryShape) -> QueryPlan {
    emit_with_default(graph, shape, OutcomeQualifier::default())
}

/// Like [`emit`], with a caller-chosen default outcome qualifier.
pub fn emit_with_default(
    graph: NormalizedGraph,
    shape: QueryShape,
    default_outcome: OutcomeQualifier,
) -> QueryPlan {
    let parameters = extract_parameters(&graph, &shape, default_outcome);
    let wildcard = shape.wildcard().cloned();

    tracing::info!(
        shape = %shape.kind(),
        wildcard = ?wildcard.as_ref().map(NodeKey::as_str),
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "emitted query plan"
    );

    QueryPlan {
        graph,
        shape,
        wildcard,
        parameters,
    }
}

fn extract_parameters(
    graph: &NormalizedGraph,
    shape: &QueryShape,
    default_outcome: OutcomeQualifier,
) -> QueryParameters {
    let roles = shape.roles();

    let mut genes = roles.of(EntityCategory::Gene).to_vec();
    genes.sort();

    let outcome_qualifier = graph
        .edges()
        .find(|edge| edge.predicate() == Predicate::DiseaseToPhenotype)
        .and_then(|edge| edge.edge.effective_qualifier(default_outcome));

    QueryParameters {
        outcome: roles.of(EntityCategory::PhenotypicOutcome).first().cloned(),
        therapeutic: roles.of(EntityCategory::Drug).first().cloned(),
        genes,
        disease: roles.of(EntityCategory::Disease).first().cloned(),
        outcome_qualifier,
    }
}
