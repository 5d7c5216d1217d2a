//! Identifier normalization against the vocabulary index.
//!
//! Every gene, drug and phenotype node that declares candidates is collapsed
//! to exactly one identifier: the first candidate, in declared order, that the
//! vocabulary knows. Candidates are scanned until one is found; the node fails
//! only once the whole list is exhausted. Disease nodes are carried through
//! unchanged and may keep several candidates.
//!
//! The only way to obtain a [`NormalizedGraph`] is through [`normalize`], so
//! later stages can rely on every gene, drug and phenotype node holding one
//! identifier or none.

use std::ops::Deref;

use chp_core::category::EntityCategory;
use chp_core::graph::QueryGraph;
use chp_core::node::QueryNode;
use chp_core::vocabulary::VocabularyIndex;

use crate::error::CheckError;

/// A query graph whose gene, drug and phenotype nodes are each either
/// resolved or a wildcard. Disease nodes keep their declared candidates.
#[derive(Debug, Clone)]
pub struct NormalizedGraph(QueryGraph);

impl NormalizedGraph {
    pub fn as_graph(&self) -> &QueryGraph {
        &self.0
    }

    pub fn into_inner(self) -> QueryGraph {
        self.0
    }
}

impl Deref for NormalizedGraph {
    type Target = QueryGraph;

    fn deref(&self) -> &QueryGraph {
        &self.0
    }
}

/// Resolves node identifiers against `vocabulary`, rewriting each gene, drug
/// and phenotype node's candidate list to its resolved identifier.
///
/// Single pass over the nodes in document order; fails on the first node
/// that cannot be resolved.
pub fn normalize<V>(mut graph: QueryGraph, vocabulary: &V) -> Result<NormalizedGraph, CheckError>
where
    V: VocabularyIndex + ?Sized,
{
    graph.try_update_nodes(|node| normalize_node(node, vocabulary))?;
    Ok(NormalizedGraph(graph))
}

fn normalize_node<V>(node: &mut QueryNode, vocabulary: &V) -> Result<(), CheckError>
where
    V: VocabularyIndex + ?Sized,
{
    if node.is_wildcard() {
        if node.category.allows_wildcard() {
            tracing::debug!(node = %node.key, category = %node.category, "wildcard node");
            return Ok(());
        }
        return Err(CheckError::MissingCurie {
            node: node.key.clone(),
            category: node.category,
        });
    }

    if !node.category.requires_resolution() {
        return Ok(());
    }

    let found = node
        .ids
        .iter()
        .find(|curie| vocabulary.has(node.category, curie))
        .cloned();

    match found {
        Some(curie) => {
            tracing::debug!(node = %node.key, %curie, "resolved curie");
            node.resolve_to(curie);
            Ok(())
        }
        None => Err(unidentified(node)),
    }
}

fn unidentified(node: &QueryNode) -> CheckError {
    let node_key = node.key.clone();
    let candidates = node.ids.clone();
    match node.category {
        EntityCategory::Gene => CheckError::UnidentifiedGeneCurie {
            node: node_key,
            candidates,
        },
        EntityCategory::Drug => CheckError::UnidentifiedDrugCurie {
            node: node_key,
            candidates,
        },
        EntityCategory::PhenotypicOutcome => CheckError::UnidentifiedPhenotypeCurie {
            node: node_key,
            candidates,
        },
        // Disease nodes are never resolved, so they never end up here.
        EntityCategory::Disease => CheckError::MissingCurie {
            node: node_key,
            category: EntityCategory::Disease,
        },
    }
}
