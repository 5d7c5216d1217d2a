//! Outcome qualifiers on disease-to-phenotype edges.
//!
//! A qualifier restricts the phenotypic outcome to a threshold, e.g. "survival
//! of at least 970 days". When an edge carries no `properties` the default
//! qualifier `>= 970` applies.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Default survival threshold in days.
pub const DEFAULT_OUTCOME_DAYS: f64 = 970.0;

/// Comparison operator of an outcome qualifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum OutcomeOperator {
    #[default]
    #[serde(rename = ">=")]
    AtLeast,
    #[serde(rename = "<=")]
    AtMost,
    #[serde(rename = "==", alias = "=")]
    Exactly,
}

impl OutcomeOperator {
    /// Parses `>=`, `<=`, `=` or `==`.
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol.trim() {
            ">=" => Some(OutcomeOperator::AtLeast),
            "<=" => Some(OutcomeOperator::AtMost),
            "=" | "==" => Some(OutcomeOperator::Exactly),
            _ => None,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            OutcomeOperator::AtLeast => ">=",
            OutcomeOperator::AtMost => "<=",
            OutcomeOperator::Exactly => "==",
        }
    }
}

impl fmt::Display for OutcomeOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Operator plus threshold, e.g. `<= 500` days.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OutcomeQualifier {
    pub operator: OutcomeOperator,
    pub days: f64,
}

impl OutcomeQualifier {
    pub fn new(operator: OutcomeOperator, days: f64) -> Self {
        OutcomeQualifier { operator, days }
    }
}

impl Default for OutcomeQualifier {
    fn default() -> Self {
        OutcomeQualifier {
            operator: OutcomeOperator::AtLeast,
            days: DEFAULT_OUTCOME_DAYS,
        }
    }
}

impl fmt::Display for OutcomeQualifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.operator, self.days)
    }
}
