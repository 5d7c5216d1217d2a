//! The seam between plan derivation and the reasoning engine.
//!
//! Engines consume finished [`QueryPlan`]s and return whatever result bundle
//! they produce. Nothing in this crate implements one.

use thiserror::Error;

use crate::plan::QueryPlan;
use crate::shape::ShapeKind;

/// An external engine answering validated query plans.
pub trait ReasoningEngine: Send + Sync {
    type Output;
    type Error: std::error::Error + Send + Sync + 'static;

    /// Whether this engine handles plans of the given shape.
    fn supports(&self, _kind: ShapeKind) -> bool {
        true
    }

    fn reason(&self, plan: &QueryPlan) -> Result<Self::Output, Self::Error>;
}

#[derive(Debug, Error)]
pub enum ReasoningError<E: std::error::Error + 'static> {
    #[error("no reasoner for {kind} queries")]
    Unsupported { kind: ShapeKind },

    #[error("reasoning failed: {0}")]
    Engine(#[source] E),
}

/// Hands a plan to an engine, refusing shapes it does not support.
pub fn dispatch<R>(engine: &R, plan: &QueryPlan) -> Result<R::Output, ReasoningError<R::Error>>
where
    R: ReasoningEngine + ?Sized,
{
    let kind = plan.kind();
    if !engine.supports(kind) {
        return Err(ReasoningError::Unsupported { kind });
    }
    tracing::debug!(shape = %kind, "dispatching plan to reasoner");
    engine.reason(plan).map_err(ReasoningError::Engine)
}
