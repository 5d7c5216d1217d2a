//! Per-shape structural contracts.
//!
//! Each check walks the edges in document order and fails on the first edge
//! that violates the shape's contract, naming that edge. Every check matches
//! exhaustively on [`Predicate`] with NO wildcard match arms, so adding a
//! predicate forces a decision for each shape.

use chp_core::edge::EdgeRef;
use chp_core::predicate::Predicate;

use super::{QueryShape, RoleSets, ShapeKind};
use crate::error::CheckError;
use crate::normalize::NormalizedGraph;

/// Runs the structural contract of an already-classified shape.
pub fn validate(graph: &NormalizedGraph, shape: &QueryShape) -> Result<(), CheckError> {
    match shape.kind() {
        ShapeKind::OneHop => check_one_hop(graph, shape.roles()),
        ShapeKind::Default => check_default(graph, shape.roles()),
        ShapeKind::Wildcard => check_wildcard(graph, shape.roles()),
    }
}

/// One-hop contract: only drug-to-gene edges, and no edge may point at the
/// wildcard node. Endpoint categories are not checked.
pub fn check_one_hop(graph: &NormalizedGraph, roles: &RoleSets) -> Result<(), CheckError> {
    if graph.edge_count() == 0 {
        return Err(CheckError::UnidentifiedQueryType);
    }
    for edge in graph.edges() {
        match edge.predicate() {
            Predicate::GeneToDisease
            | Predicate::ChemicalToDiseaseOrPhenotype
            | Predicate::DiseaseToPhenotype => {
                return Err(CheckError::IncompatibleOneHopEdge {
                    edge: edge.key().clone(),
                    predicate: edge.predicate(),
                });
            }
            Predicate::ChemicalToGene => {
                if roles.is_wildcard(edge.object) {
                    return Err(CheckError::MalformedSubjectObjectOnDrugGene {
                        edge: edge.key().clone(),
                    });
                }
            }
        }
    }
    Ok(())
}

/// Default multi-hop contract: gene/drug → disease → phenotype edges with
/// matching roles; no drug-gene edges.
pub fn check_default(graph: &NormalizedGraph, roles: &RoleSets) -> Result<(), CheckError> {
    for edge in graph.edges() {
        match edge.predicate() {
            Predicate::GeneToDisease
            | Predicate::ChemicalToDiseaseOrPhenotype
            | Predicate::DiseaseToPhenotype => check_multi_hop_roles(&edge, roles)?,
            Predicate::ChemicalToGene => {
                return Err(CheckError::IncompatibleDefaultEdge {
                    edge: edge.key().clone(),
                });
            }
        }
    }
    Ok(())
}

/// Wildcard multi-hop contract: same roles as default; a drug-gene edge
/// would constrain the wildcard directly and is rejected.
pub fn check_wildcard(graph: &NormalizedGraph, roles: &RoleSets) -> Result<(), CheckError> {
    for edge in graph.edges() {
        match edge.predicate() {
            Predicate::GeneToDisease
            | Predicate::ChemicalToDiseaseOrPhenotype
            | Predicate::DiseaseToPhenotype => check_multi_hop_roles(&edge, roles)?,
            Predicate::ChemicalToGene => {
                return Err(CheckError::IncompatibleWildcardEdge {
                    edge: edge.key().clone(),
                });
            }
        }
    }
    Ok(())
}

/// Subject and object must BOTH sit in the predicate's role sets.
fn has_roles(edge: &EdgeRef<'_>, roles: &RoleSets) -> bool {
    let (subject, object) = edge.predicate().roles();
    roles.contains(subject, edge.subject) && roles.contains(object, edge.object)
}

fn check_multi_hop_roles(edge: &EdgeRef<'_>, roles: &RoleSets) -> Result<(), CheckError> {
    if has_roles(edge, roles) {
        return Ok(());
    }
    let key = edge.key().clone();
    Err(match edge.predicate() {
        Predicate::GeneToDisease => CheckError::MalformedSubjectObjectOnGeneToDisease { edge: key },
        Predicate::ChemicalToDiseaseOrPhenotype => {
            CheckError::MalformedSubjectObjectOnDrugToDisease { edge: key }
        }
        Predicate::DiseaseToPhenotype => {
            CheckError::MalformedSubjectObjectOnDiseaseToPhenotype { edge: key }
        }
        Predicate::ChemicalToGene => CheckError::MalformedSubjectObjectOnDrugGene { edge: key },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::normalize::normalize;
    use crate::shape::classify;
    use chp_core::category::EntityCategory;
    use chp_core::edge::QueryEdge;
    use chp_core::graph::QueryGraph;
    use chp_core::node::QueryNode;
    use chp_core::vocabulary::Vocabulary;

    fn vocab() -> Vocabulary {
        Vocabulary::new()
            .with_curies(EntityCategory::Gene, ["G:1", "G:2"])
            .with_curies(EntityCategory::Drug, ["D:1"])
            .with_curies(EntityCategory::PhenotypicOutcome, ["P:1"])
    }

    fn node(key: &str, category: EntityCategory, id: Option<&str>) -> QueryNode {
        match id {
            Some(id) => QueryNode::new(key, category, vec![id.to_string()]),
            None => QueryNode::wildcard(key, category),
        }
    }

    fn build(nodes: Vec<QueryNode>, edges: &[(&str, Predicate, &str, &str)]) -> NormalizedGraph {
        let mut graph = QueryGraph::new();
        for n in nodes {
            graph.add_node(n).unwrap();
        }
        for (key, predicate, subject, object) in edges {
            graph
                .add_edge(
                    QueryEdge::new(*key, *predicate),
                    &(*subject).into(),
                    &(*object).into(),
                )
                .unwrap();
        }
        normalize(graph, &vocab()).unwrap()
    }

    /// Gene, drug, disease and phenotype nodes plus the given edges.
    fn four_nodes(
        drug: Option<&str>,
        edges: &[(&str, Predicate, &str, &str)],
    ) -> NormalizedGraph {
        build(
            vec![
                node("g", EntityCategory::Gene, Some("G:1")),
                node("dr", EntityCategory::Drug, drug),
                node("dz", EntityCategory::Disease, Some("MONDO:1")),
                node("ph", EntityCategory::PhenotypicOutcome, Some("P:1")),
            ],
            edges,
        )
    }

    fn check(graph: &NormalizedGraph, kind: ShapeKind) -> Result<(), CheckError> {
        let roles = RoleSets::partition(graph);
        match kind {
            ShapeKind::OneHop => check_one_hop(graph, &roles),
            ShapeKind::Default => check_default(graph, &roles),
            ShapeKind::Wildcard => check_wildcard(graph, &roles),
        }
    }

    // -- One-hop --

    #[test]
    fn one_hop_accepts_drug_to_resolved_gene() {
        let graph = build(
            vec![
                node("dr", EntityCategory::Drug, None),
                node("g", EntityCategory::Gene, Some("G:1")),
            ],
            &[("e0", Predicate::ChemicalToGene, "dr", "g")],
        );
        assert!(check(&graph, ShapeKind::OneHop).is_ok());
    }

    #[test]
    fn one_hop_rejects_wildcard_object() {
        let graph = build(
            vec![
                node("dr", EntityCategory::Drug, Some("D:1")),
                node("g", EntityCategory::Gene, None),
            ],
            &[("e0", Predicate::ChemicalToGene, "dr", "g")],
        );
        match check(&graph, ShapeKind::OneHop).unwrap_err() {
            CheckError::MalformedSubjectObjectOnDrugGene { edge } => assert_eq!(edge.as_str(), "e0"),
            other => panic!("expected MalformedSubjectObjectOnDrugGene, got {other:?}"),
        }
    }

    #[test]
    fn one_hop_accepts_reversed_resolved_pair() {
        let graph = build(
            vec![
                node("g", EntityCategory::Gene, Some("G:1")),
                node("dr", EntityCategory::Drug, Some("D:1")),
            ],
            &[("e0", Predicate::ChemicalToGene, "g", "dr")],
        );
        assert!(check(&graph, ShapeKind::OneHop).is_ok());
    }

    #[test]
    fn one_hop_rejects_reversed_pair_onto_wildcard() {
        let graph = build(
            vec![
                node("g", EntityCategory::Gene, Some("G:1")),
                node("dr", EntityCategory::Drug, None),
            ],
            &[("e0", Predicate::ChemicalToGene, "g", "dr")],
        );
        assert_eq!(
            check(&graph, ShapeKind::OneHop).unwrap_err().kind(),
            ErrorKind::MalformedSubjectObjectOnDrugGene
        );
    }

    #[test]
    fn one_hop_rejects_every_other_predicate() {
        for predicate in [
            Predicate::GeneToDisease,
            Predicate::ChemicalToDiseaseOrPhenotype,
            Predicate::DiseaseToPhenotype,
        ] {
            let (subject, object) = predicate.roles();
            let graph = build(
                vec![
                    node("s", subject, Some(sample_id(subject))),
                    node("o", object, Some(sample_id(object))),
                ],
                &[("e9", predicate, "s", "o")],
            );
            match check(&graph, ShapeKind::OneHop).unwrap_err() {
                CheckError::IncompatibleOneHopEdge { edge, predicate: got } => {
                    assert_eq!(edge.as_str(), "e9");
                    assert_eq!(got, predicate);
                }
                other => panic!("expected IncompatibleOneHopEdge, got {other:?}"),
            }
        }
    }

    fn sample_id(category: EntityCategory) -> &'static str {
        match category {
            EntityCategory::Gene => "G:1",
            EntityCategory::Drug => "D:1",
            EntityCategory::Disease => "MONDO:1",
            EntityCategory::PhenotypicOutcome => "P:1",
        }
    }

    #[test]
    fn one_hop_without_edges_is_unidentified() {
        let graph = build(
            vec![
                node("dr", EntityCategory::Drug, Some("D:1")),
                node("g", EntityCategory::Gene, Some("G:1")),
            ],
            &[],
        );
        assert_eq!(
            check(&graph, ShapeKind::OneHop).unwrap_err().kind(),
            ErrorKind::UnidentifiedQueryType
        );
    }

    // -- Default --

    #[test]
    fn default_role_violations_name_the_edge() {
        let cases = [
            (
                ("bad", Predicate::GeneToDisease, "dr", "dz"),
                ErrorKind::MalformedSubjectObjectOnGeneToDisease,
            ),
            (
                ("bad", Predicate::ChemicalToDiseaseOrPhenotype, "dr", "ph"),
                ErrorKind::MalformedSubjectObjectOnDrugToDisease,
            ),
            (
                ("bad", Predicate::DiseaseToPhenotype, "ph", "dz"),
                ErrorKind::MalformedSubjectObjectOnDiseaseToPhenotype,
            ),
        ];
        for (edge, expected) in cases {
            let graph = four_nodes(Some("D:1"), &[edge]);
            let err = check(&graph, ShapeKind::Default).unwrap_err();
            assert_eq!(err.kind(), expected);
            assert_eq!(err.offending_id(), Some("bad"));
        }
    }

    #[test]
    fn disease_to_phenotype_needs_both_roles() {
        // Subject is the disease but the object is not a phenotype.
        let graph = four_nodes(
            Some("D:1"),
            &[("e0", Predicate::DiseaseToPhenotype, "dz", "g")],
        );
        assert_eq!(
            check(&graph, ShapeKind::Default).unwrap_err().kind(),
            ErrorKind::MalformedSubjectObjectOnDiseaseToPhenotype
        );
        assert_eq!(
            check(&graph, ShapeKind::Wildcard).unwrap_err().kind(),
            ErrorKind::MalformedSubjectObjectOnDiseaseToPhenotype
        );

        // Object is the phenotype but the subject is not a disease.
        let graph = four_nodes(
            Some("D:1"),
            &[("e0", Predicate::DiseaseToPhenotype, "g", "ph")],
        );
        assert_eq!(
            check(&graph, ShapeKind::Default).unwrap_err().kind(),
            ErrorKind::MalformedSubjectObjectOnDiseaseToPhenotype
        );
    }

    #[test]
    fn default_rejects_drug_gene_edge() {
        let graph = four_nodes(
            Some("D:1"),
            &[
                ("e0", Predicate::DiseaseToPhenotype, "dz", "ph"),
                ("e1", Predicate::ChemicalToGene, "dr", "g"),
            ],
        );
        match check(&graph, ShapeKind::Default).unwrap_err() {
            CheckError::IncompatibleDefaultEdge { edge } => assert_eq!(edge.as_str(), "e1"),
            other => panic!("expected IncompatibleDefaultEdge, got {other:?}"),
        }
    }

    // -- Wildcard --

    #[test]
    fn wildcard_rejects_drug_gene_edge() {
        let graph = four_nodes(
            None,
            &[
                ("e0", Predicate::GeneToDisease, "g", "dz"),
                ("e1", Predicate::ChemicalToGene, "dr", "g"),
                ("e2", Predicate::DiseaseToPhenotype, "dz", "ph"),
            ],
        );
        match classify(&graph).unwrap_err() {
            CheckError::IncompatibleWildcardEdge { edge } => assert_eq!(edge.as_str(), "e1"),
            other => panic!("expected IncompatibleWildcardEdge, got {other:?}"),
        }
    }

    #[test]
    fn wildcard_accepts_open_drug() {
        let graph = four_nodes(
            None,
            &[
                ("e0", Predicate::GeneToDisease, "g", "dz"),
                ("e1", Predicate::ChemicalToDiseaseOrPhenotype, "dr", "dz"),
                ("e2", Predicate::DiseaseToPhenotype, "dz", "ph"),
            ],
        );
        assert!(check(&graph, ShapeKind::Wildcard).is_ok());
    }

    #[test]
    fn validate_dispatches_on_shape() {
        let graph = build(
            vec![
                node("g", EntityCategory::Gene, None),
                node("dz", EntityCategory::Disease, Some("MONDO:1")),
            ],
            &[("e0", Predicate::GeneToDisease, "g", "dz")],
        );
        let shape = classify(&graph).unwrap();
        assert_eq!(shape.kind(), ShapeKind::OneHop);
        assert_eq!(
            validate(&graph, &shape).unwrap_err().kind(),
            ErrorKind::IncompatibleOneHopEdge
        );
    }
}
