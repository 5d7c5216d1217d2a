//! The derivation pipeline: decode → normalize → classify → validate → emit.
//!
//! Each stage is a pure function returning a `Result`; the first failure ends
//! the derivation for that query graph. Batches are independent per item:
//! every graph gets its own `Result` and one failure never aborts the others.
//! Whether a failed item should fail the whole batch is the caller's call.

use std::collections::BTreeMap;

use chp_core::graph::QueryGraph;
use chp_core::vocabulary::VocabularyIndex;
use rayon::prelude::*;

use crate::config::PipelineConfig;
use crate::error::CheckError;
use crate::normalize::normalize;
use crate::plan::{emit_with_default, QueryPlan};
use crate::shape::{classify, rules, ShapeKind};

/// Derives a query plan with the default configuration.
pub fn derive_plan<V>(graph: QueryGraph, vocabulary: &V) -> Result<QueryPlan, CheckError>
where
    V: VocabularyIndex + ?Sized,
{
    Pipeline::new(vocabulary).derive(graph)
}

/// A read-only vocabulary plus configuration, shareable across threads.
#[derive(Debug)]
pub struct Pipeline<'v, V: VocabularyIndex + ?Sized> {
    vocabulary: &'v V,
    config: PipelineConfig,
}

impl<'v, V: VocabularyIndex + ?Sized> Pipeline<'v, V> {
    pub fn new(vocabulary: &'v V) -> Self {
        Pipeline::with_config(vocabulary, PipelineConfig::default())
    }

    pub fn with_config(vocabulary: &'v V, config: PipelineConfig) -> Self {
        Pipeline { vocabulary, config }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Runs every stage on one query graph.
    pub fn derive(&self, graph: QueryGraph) -> Result<QueryPlan, CheckError> {
        let normalized = normalize(graph, self.vocabulary)?;
        let shape = classify(&normalized)?;
        match shape.kind() {
            ShapeKind::OneHop => rules::check_one_hop(&normalized, shape.roles())?,
            // Validated as part of classification.
            ShapeKind::Default | ShapeKind::Wildcard => {}
        }
        Ok(emit_with_default(
            normalized,
            shape,
            self.config.default_outcome,
        ))
    }

    /// Decodes a JSON query document and derives its plan.
    pub fn derive_json(&self, json: &str) -> Result<QueryPlan, CheckError> {
        let graph = QueryGraph::from_json_str(json)?;
        self.derive(graph)
    }

    /// Derives plans for independent query graphs in parallel. Results are
    /// returned in input order.
    pub fn derive_batch(&self, graphs: Vec<QueryGraph>) -> Vec<Result<QueryPlan, CheckError>> {
        let results: Vec<_> = graphs
            .into_par_iter()
            .map(|graph| self.derive(graph))
            .collect();

        let failed = results.iter().filter(|r| r.is_err()).count();
        tracing::info!(total = results.len(), failed, "derived batch");
        results
    }

    /// Like [`Pipeline::derive_batch`], for raw JSON documents.
    pub fn derive_json_batch<S>(&self, documents: &[S]) -> Vec<Result<QueryPlan, CheckError>>
    where
        S: AsRef<str> + Sync,
    {
        documents
            .par_iter()
            .map(|doc| self.derive_json(doc.as_ref()))
            .collect()
    }
}

/// Batch results grouped the way reasoners consume them: successful plans
/// per shape, and failures reported per item. Each entry keeps the item's
/// index in the original batch.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub plans: BTreeMap<ShapeKind, Vec<(usize, QueryPlan)>>,
    pub failures: Vec<(usize, CheckError)>,
}

impl BatchReport {
    pub fn from_results(results: Vec<Result<QueryPlan, CheckError>>) -> Self {
        let mut report = BatchReport::default();
        for (index, result) in results.into_iter().enumerate() {
            match result {
                Ok(plan) => report
                    .plans
                    .entry(plan.kind())
                    .or_default()
                    .push((index, plan)),
                Err(err) => {
                    tracing::debug!(index, kind = ?err.kind(), "query failed");
                    report.failures.push((index, err));
                }
            }
        }
        report
    }

    /// Plans of one shape, in batch order.
    pub fn plans_of(&self, kind: ShapeKind) -> &[(usize, QueryPlan)] {
        self.plans.get(&kind).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn plan_count(&self) -> usize {
        self.plans.values().map(Vec::len).sum()
    }

    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use chp_core::category::EntityCategory;
    use chp_core::qualifier::{OutcomeOperator, OutcomeQualifier};
    use chp_core::vocabulary::Vocabulary;
    use serde_json::json;

    fn vocab() -> Vocabulary {
        Vocabulary::new()
            .with_curies(EntityCategory::Gene, ["ENSEMBL:ENSG00000141510"])
            .with_curies(EntityCategory::Drug, ["CHEMBL:CHEMBL83"])
            .with_curies(EntityCategory::PhenotypicOutcome, ["EFO:0000714"])
    }

    fn one_hop_json() -> String {
        json!({
            "nodes": {
                "n0": { "categories": ["biolink:Drug"] },
                "n1": { "categories": ["biolink:Gene"], "ids": ["ENSEMBL:ENSG00000141510"] }
            },
            "edges": {
                "e0": { "predicates": ["biolink:ChemicalToGeneAssociation"], "subject": "n0", "object": "n1" }
            }
        })
        .to_string()
    }

    fn default_json() -> String {
        json!({
            "nodes": {
                "n0": { "categories": ["biolink:Gene"], "ids": ["ENSEMBL:ENSG00000141510"] },
                "n1": { "categories": ["biolink:Drug"], "ids": ["CHEMBL:CHEMBL83"] },
                "n2": { "categories": ["biolink:Disease"], "ids": ["MONDO:0007254"] },
                "n3": { "categories": ["biolink:PhenotypicFeature"], "ids": ["EFO:0000714"] }
            },
            "edges": {
                "e0": { "predicates": ["biolink:GeneToDiseaseAssociation"], "subject": "n0", "object": "n2" },
                "e1": { "predicates": ["biolink:ChemicalToDiseaseOrPhenotypicFeatureAssociation"], "subject": "n1", "object": "n2" },
                "e2": { "predicates": ["biolink:DiseaseToPhenotypicFeatureAssociation"], "subject": "n2", "object": "n3" }
            }
        })
        .to_string()
    }

    #[test]
    fn derives_one_hop_plan() {
        let vocab = vocab();
        let plan = Pipeline::new(&vocab).derive_json(&one_hop_json()).unwrap();
        assert_eq!(plan.kind(), ShapeKind::OneHop);
        assert_eq!(plan.wildcard().map(|k| k.as_str()), Some("n0"));
    }

    #[test]
    fn one_hop_validation_runs_after_classification() {
        let vocab = vocab();
        let doc = json!({
            "nodes": {
                "g1": { "categories": ["biolink:Gene"] },
                "d1": { "categories": ["biolink:Disease"], "ids": ["MONDO:123"] }
            },
            "edges": {
                "e0": { "predicates": ["biolink:GeneToDiseaseAssociation"], "subject": "g1", "object": "d1" }
            }
        });
        let err = Pipeline::new(&vocab)
            .derive_json(&doc.to_string())
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::IncompatibleOneHopEdge);
        assert_eq!(err.offending_id(), Some("e0"));
    }

    #[test]
    fn config_default_outcome_is_used() {
        let vocab = vocab();
        let config = PipelineConfig {
            default_outcome: OutcomeQualifier::new(OutcomeOperator::AtMost, 100.0),
        };
        let plan = Pipeline::with_config(&vocab, config)
            .derive_json(&default_json())
            .unwrap();
        assert_eq!(plan.outcome_qualifier(), Some(config.default_outcome));
    }

    #[test]
    fn decode_errors_surface_through_the_pipeline() {
        let vocab = vocab();
        let err = Pipeline::new(&vocab).derive_json("not json").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedDocument);
    }

    #[test]
    fn batch_keeps_order_and_reports_per_item() {
        let vocab = vocab();
        let pipeline = Pipeline::new(&vocab);
        let documents = vec![default_json(), "{}".to_string(), one_hop_json()];
        let results = pipeline.derive_json_batch(&documents);

        assert_eq!(results.len(), 3);
        assert_eq!(results[0].as_ref().unwrap().kind(), ShapeKind::Default);
        assert_eq!(
            results[1].as_ref().unwrap_err().kind(),
            ErrorKind::MalformedDocument
        );
        assert_eq!(results[2].as_ref().unwrap().kind(), ShapeKind::OneHop);

        let report = BatchReport::from_results(results);
        assert_eq!(report.plan_count(), 2);
        assert!(!report.is_clean());
        assert_eq!(report.failures[0].0, 1);
        assert_eq!(report.plans_of(ShapeKind::OneHop)[0].0, 2);
        assert!(report.plans_of(ShapeKind::Wildcard).is_empty());
    }

    #[test]
    fn batch_of_graphs_runs_in_parallel() {
        let vocab = vocab();
        let graphs: Vec<_> = (0..16)
            .map(|_| QueryGraph::from_json_str(&default_json()).unwrap())
            .collect();
        let results = Pipeline::new(&vocab).derive_batch(graphs);
        assert!(results
            .iter()
            .all(|r| matches!(r, Ok(plan) if plan.kind() == ShapeKind::Default)));
    }

    #[test]
    fn works_with_trait_object_vocabulary() {
        let vocab = vocab();
        let dynamic: &dyn VocabularyIndex = &vocab;
        let graph = QueryGraph::from_json_str(&default_json()).unwrap();
        assert_eq!(derive_plan(graph, dynamic).unwrap().kind(), ShapeKind::Default);
    }
}
