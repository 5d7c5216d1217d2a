//! Query graph checking for the reasoning service.
//!
//! Turns a decoded [`QueryGraph`](chp_core::QueryGraph) into a [`QueryPlan`]:
//! identifiers are normalized against a vocabulary, the graph is classified
//! into one of the supported [`ShapeKind`]s, the shape's structural contract is
//! validated, and the result is packaged for a [`ReasoningEngine`].

pub mod config;
pub mod error;
pub mod normalize;
pub mod pipeline;
pub mod plan;
pub mod reasoner;
pub mod shape;

pub use config::{ConfigError, PipelineConfig};
pub use error::{CheckError, ErrorKind, ErrorReport};
pub use normalize::{normalize, NormalizedGraph};
pub use pipeline::{derive_plan, BatchReport, Pipeline};
pub use plan::{emit, emit_with_default, QueryParameters, QueryPlan};
pub use reasoner::{dispatch, ReasoningEngine, ReasoningError};
pub use shape::{classify, validate, QueryShape, RoleSets, ShapeKind};
