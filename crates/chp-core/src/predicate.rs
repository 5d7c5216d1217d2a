//! The closed predicate vocabulary for query edges.
//!
//! Each [`Predicate`] fixes which categories its subject and object must have.
//! Validators match on it exhaustively, so a new predicate cannot be added
//! without deciding how every query shape treats it.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::category::EntityCategory;

const BIOLINK_PREFIX: &str = "biolink:";

/// Typed relation label on a query edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Predicate {
    /// Gene is associated with a disease.
    #[serde(rename = "biolink:GeneToDiseaseAssociation")]
    GeneToDisease,
    /// Chemical (drug) treats or affects a disease or phenotype.
    #[serde(rename = "biolink:ChemicalToDiseaseOrPhenotypicFeatureAssociation")]
    ChemicalToDiseaseOrPhenotype,
    /// Disease has a phenotypic outcome (e.g. survival time).
    #[serde(rename = "biolink:DiseaseToPhenotypicFeatureAssociation")]
    DiseaseToPhenotype,
    /// Chemical (drug) interacts with a gene.
    #[serde(rename = "biolink:ChemicalToGeneAssociation")]
    ChemicalToGene,
}

impl Predicate {
    pub const ALL: [Predicate; 4] = [
        Predicate::GeneToDisease,
        Predicate::ChemicalToDiseaseOrPhenotype,
        Predicate::DiseaseToPhenotype,
        Predicate::ChemicalToGene,
    ];

    /// Parses either the association class name or the equivalent slot name.
    /// The `biolink:` prefix is optional.
    pub fn from_biolink(name: &str) -> Option<Self> {
        let bare = name.strip_prefix(BIOLINK_PREFIX).unwrap_or(name);
        match bare {
            "GeneToDiseaseAssociation" | "gene_associated_with_condition" => {
                Some(Predicate::GeneToDisease)
            }
            "ChemicalToDiseaseOrPhenotypicFeatureAssociation" | "treats" => {
                Some(Predicate::ChemicalToDiseaseOrPhenotype)
            }
            "DiseaseToPhenotypicFeatureAssociation" | "has_phenotype" => {
                Some(Predicate::DiseaseToPhenotype)
            }
            "ChemicalToGeneAssociation" | "interacts_with" => Some(Predicate::ChemicalToGene),
            _ => None,
        }
    }

    /// Canonical prefixed association name.
    pub fn biolink_name(self) -> &'static str {
        match self {
            Predicate::GeneToDisease => "biolink:GeneToDiseaseAssociation",
            Predicate::ChemicalToDiseaseOrPhenotype => {
                "biolink:ChemicalToDiseaseOrPhenotypicFeatureAssociation"
            }
            Predicate::DiseaseToPhenotype => "biolink:DiseaseToPhenotypicFeatureAssociation",
            Predicate::ChemicalToGene => "biolink:ChemicalToGeneAssociation",
        }
    }

    /// Expected `(subject, object)` categories.
    pub fn roles(self) -> (EntityCategory, EntityCategory) {
        match self {
            Predicate::GeneToDisease => (EntityCategory::Gene, EntityCategory::Disease),
            Predicate::ChemicalToDiseaseOrPhenotype => {
                (EntityCategory::Drug, EntityCategory::Disease)
            }
            Predicate::DiseaseToPhenotype => {
                (EntityCategory::Disease, EntityCategory::PhenotypicOutcome)
            }
            Predicate::ChemicalToGene => (EntityCategory::Drug, EntityCategory::Gene),
        }
    }

    /// Only the disease-to-phenotype edge carries an outcome qualifier.
    pub fn accepts_qualifier(self) -> bool {
        matches!(self, Predicate::DiseaseToPhenotype)
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.biolink_name())
    }
}
