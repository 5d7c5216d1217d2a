//! Query-check diagnostics.
//!
//! [`CheckError`] names exactly what went wrong with a query graph and where:
//! the offending node or edge, and for identifier failures the full list of
//! rejected candidates. Callers surface these verbatim, so no stage reports a
//! generic failure once it knows a more specific cause.

use chp_core::category::EntityCategory;
use chp_core::error::CoreError;
use chp_core::id::{EdgeKey, NodeKey};
use chp_core::predicate::Predicate;
use serde::{Deserialize, Serialize};

/// A failure while deriving a query plan from one query graph.
#[derive(Debug, thiserror::Error)]
pub enum CheckError {
    /// The input document could not be decoded into a query graph.
    #[error(transparent)]
    Decode(#[from] CoreError),

    // -- Identifier resolution --
    /// None of a gene node's candidate identifiers is in the vocabulary.
    #[error("unidentified gene curie on node {node}: {candidates:?}")]
    UnidentifiedGeneCurie {
        node: NodeKey,
        candidates: Vec<String>,
    },

    /// None of a drug node's candidate identifiers is in the vocabulary.
    #[error("unidentified drug curie on node {node}: {candidates:?}")]
    UnidentifiedDrugCurie {
        node: NodeKey,
        candidates: Vec<String>,
    },

    /// None of a phenotype node's candidate identifiers is in the vocabulary.
    #[error("unidentified phenotype curie on node {node}: {candidates:?}")]
    UnidentifiedPhenotypeCurie {
        node: NodeKey,
        candidates: Vec<String>,
    },

    /// A disease or phenotype node declares no identifier. Only genes and
    /// drugs may be wildcards.
    #[error("node {node} of category {category} must declare an identifier")]
    MissingCurie {
        node: NodeKey,
        category: EntityCategory,
    },

    // -- Cardinality --
    /// More than one wildcard gene/drug node.
    #[error("too many contribution nodes: {nodes:?}")]
    TooManyContributionNodes { nodes: Vec<NodeKey> },

    #[error("too many disease nodes: {nodes:?}")]
    TooManyDiseaseNodes { nodes: Vec<NodeKey> },

    #[error("too many phenotype nodes: {nodes:?}")]
    TooManyPhenotypeNodes { nodes: Vec<NodeKey> },

    // -- Classification --
    /// The graph matches none of the supported query shapes.
    #[error("unidentified query type")]
    UnidentifiedQueryType,

    // -- Structural / role --
    #[error("malformed subject/object on gene-to-disease edge {edge}")]
    MalformedSubjectObjectOnGeneToDisease { edge: EdgeKey },

    #[error("malformed subject/object on drug-to-disease edge {edge}")]
    MalformedSubjectObjectOnDrugToDisease { edge: EdgeKey },

    #[error("malformed subject/object on disease-to-phenotype edge {edge}")]
    MalformedSubjectObjectOnDiseaseToPhenotype { edge: EdgeKey },

    /// A one-hop drug-gene edge points at the wildcard node.
    #[error("malformed subject/object on drug-gene edge {edge}: object must not be a wildcard")]
    MalformedSubjectObjectOnDrugGene { edge: EdgeKey },

    /// A one-hop query uses a predicate other than chemical-to-gene.
    #[error("incompatible edge {edge} for one-hop query: {predicate}")]
    IncompatibleOneHopEdge { edge: EdgeKey, predicate: Predicate },

    /// A chemical-to-gene edge in a default multi-hop query.
    #[error("incompatible edge {edge} for default query")]
    IncompatibleDefaultEdge { edge: EdgeKey },

    /// A chemical-to-gene edge in a wildcard multi-hop query.
    #[error("incompatible wildcard edge {edge}")]
    IncompatibleWildcardEdge { edge: EdgeKey },
}

/// Stable, matchable tag for every error a caller can receive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    MalformedDocument,
    UnrecognizedCategory,
    MissingCategory,
    UnexpectedPredicate,
    MissingPredicate,
    UnknownOperator,
    DanglingReference,
    DuplicateNode,
    DuplicateEdge,
    UnidentifiedGeneCurie,
    UnidentifiedDrugCurie,
    UnidentifiedPhenotypeCurie,
    MissingCurie,
    TooManyContributionNodes,
    TooManyDiseaseNodes,
    TooManyPhenotypeNodes,
    UnidentifiedQueryType,
    MalformedSubjectObjectOnGeneToDisease,
    MalformedSubjectObjectOnDrugToDisease,
    MalformedSubjectObjectOnDiseaseToPhenotype,
    MalformedSubjectObjectOnDrugGene,
    IncompatibleOneHopEdge,
    IncompatibleDefaultEdge,
    IncompatibleWildcardEdge,
}

/// Serializable summary of a [`CheckError`] for API callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorReport {
    pub kind: ErrorKind,
    /// Node or edge the error is about, if it concerns a single one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offending_id: Option<String>,
    /// Rejected candidate identifiers, or the nodes over a cardinality limit.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub diagnostics: Vec<String>,
    pub message: String,
}

impl CheckError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CheckError::Decode(core) => match core {
                CoreError::Json(_) => ErrorKind::MalformedDocument,
                CoreError::UnrecognizedCategory { .. } => ErrorKind::UnrecognizedCategory,
                CoreError::MissingCategory { .. } => ErrorKind::MissingCategory,
                CoreError::UnexpectedPredicate { .. } => ErrorKind::UnexpectedPredicate,
                CoreError::MissingPredicate { .. } => ErrorKind::MissingPredicate,
                CoreError::UnknownOperator { .. } => ErrorKind::UnknownOperator,
                CoreError::DanglingReference { .. } => ErrorKind::DanglingReference,
                CoreError::DuplicateNode { .. } => ErrorKind::DuplicateNode,
                CoreError::DuplicateEdge { .. } => ErrorKind::DuplicateEdge,
            },
            CheckError::UnidentifiedGeneCurie { .. } => ErrorKind::UnidentifiedGeneCurie,
            CheckError::UnidentifiedDrugCurie { .. } => ErrorKind::UnidentifiedDrugCurie,
            CheckError::UnidentifiedPhenotypeCurie { .. } => ErrorKind::UnidentifiedPhenotypeCurie,
            CheckError::MissingCurie { .. } => ErrorKind::MissingCurie,
            CheckError::TooManyContributionNodes { .. } => ErrorKind::TooManyContributionNodes,
            CheckError::TooManyDiseaseNodes { .. } => ErrorKind::TooManyDiseaseNodes,
            CheckError::TooManyPhenotypeNodes { .. } => ErrorKind::TooManyPhenotypeNodes,
            CheckError::UnidentifiedQueryType => ErrorKind::UnidentifiedQueryType,
            CheckError::MalformedSubjectObjectOnGeneToDisease { .. } => {
                ErrorKind::MalformedSubjectObjectOnGeneToDisease
            }
            CheckError::MalformedSubjectObjectOnDrugToDisease { .. } => {
                ErrorKind::MalformedSubjectObjectOnDrugToDisease
            }
            CheckError::MalformedSubjectObjectOnDiseaseToPhenotype { .. } => {
                ErrorKind::MalformedSubjectObjectOnDiseaseToPhenotype
            }
            CheckError::MalformedSubjectObjectOnDrugGene { .. } => {
                ErrorKind::MalformedSubjectObjectOnDrugGene
            }
            CheckError::IncompatibleOneHopEdge { .. } => ErrorKind::IncompatibleOneHopEdge,
            CheckError::IncompatibleDefaultEdge { .. } => ErrorKind::IncompatibleDefaultEdge,
            CheckError::IncompatibleWildcardEdge { .. } => ErrorKind::IncompatibleWildcardEdge,
        }
    }

    /// The node or edge key this error is about, if any.
    pub fn offending_id(&self) -> Option<&str> {
        match self {
            CheckError::Decode(core) => match core {
                CoreError::Json(_) => None,
                CoreError::UnrecognizedCategory { node, .. }
                | CoreError::MissingCategory { node }
                | CoreError::DuplicateNode { node } => Some(node.as_str()),
                CoreError::UnexpectedPredicate { edge, .. }
                | CoreError::MissingPredicate { edge }
                | CoreError::UnknownOperator { edge, .. }
                | CoreError::DanglingReference { edge, .. }
                | CoreError::DuplicateEdge { edge } => Some(edge.as_str()),
            },
            CheckError::UnidentifiedGeneCurie { node, .. }
            | CheckError::UnidentifiedDrugCurie { node, .. }
            | CheckError::UnidentifiedPhenotypeCurie { node, .. }
            | CheckError::MissingCurie { node, .. } => Some(node.as_str()),
            CheckError::TooManyContributionNodes { .. }
            | CheckError::TooManyDiseaseNodes { .. }
            | CheckError::TooManyPhenotypeNodes { .. }
            | CheckError::UnidentifiedQueryType => None,
            CheckError::MalformedSubjectObjectOnGeneToDisease { edge }
            | CheckError::MalformedSubjectObjectOnDrugToDisease { edge }
            | CheckError::MalformedSubjectObjectOnDiseaseToPhenotype { edge }
            | CheckError::MalformedSubjectObjectOnDrugGene { edge }
            | CheckError::IncompatibleOneHopEdge { edge, .. }
            | CheckError::IncompatibleDefaultEdge { edge }
            | CheckError::IncompatibleWildcardEdge { edge } => Some(edge.as_str()),
        }
    }

    /// Diagnostic payload: rejected candidates or over-limit nodes.
    pub fn diagnostics(&self) -> Vec<String> {
        match self {
            CheckError::UnidentifiedGeneCurie { candidates, .. }
            | CheckError::UnidentifiedDrugCurie { candidates, .. }
            | CheckError::UnidentifiedPhenotypeCurie { candidates, .. } => candidates.clone(),
            CheckError::TooManyContributionNodes { nodes }
            | CheckError::TooManyDiseaseNodes { nodes }
            | CheckError::TooManyPhenotypeNodes { nodes } => {
                nodes.iter().map(NodeKey::to_string).collect()
            }
            CheckError::Decode(CoreError::DanglingReference { node, .. }) => {
                vec![node.to_string()]
            }
            _ => Vec::new(),
        }
    }

    pub fn report(&self) -> ErrorReport {
        ErrorReport {
            kind: self.kind(),
            offending_id: self.offending_id().map(str::to_string),
            diagnostics: self.diagnostics(),
            message: self.to_string(),
        }
    }
}
