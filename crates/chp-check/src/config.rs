//! Pipeline configuration.
//!
//! Reads configuration from environment variables:
//! - `CHP_DEFAULT_OUTCOME_OP`: default qualifier operator (default: ">=")
//! - `CHP_DEFAULT_OUTCOME_DAYS`: default qualifier threshold (default: "970")
//!
//! The same settings can be deserialized from a JSON/serde document.

use chp_core::qualifier::{OutcomeOperator, OutcomeQualifier};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const ENV_DEFAULT_OUTCOME_OP: &str = "CHP_DEFAULT_OUTCOME_OP";
pub const ENV_DEFAULT_OUTCOME_DAYS: &str = "CHP_DEFAULT_OUTCOME_DAYS";

/// Invalid configuration value.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: '{value}'")]
    InvalidValue { key: &'static str, value: String },
}

/// Settings shared by every query a pipeline processes.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Qualifier applied to disease-to-phenotype edges without `properties`.
    pub default_outcome: OutcomeQualifier,
}

impl PipelineConfig {
    /// Builds a config from the process environment, falling back to the
    /// defaults for unset variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = PipelineConfig::default();

        if let Some(value) = lookup(ENV_DEFAULT_OUTCOME_OP) {
            config.default_outcome.operator =
                OutcomeOperator::from_symbol(&value).ok_or(ConfigError::InvalidValue {
                    key: ENV_DEFAULT_OUTCOME_OP,
                    value: value.clone(),
                })?;
        }

        if let Some(value) = lookup(ENV_DEFAULT_OUTCOME_DAYS) {
            config.default_outcome.days = value
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|days| days.is_finite())
                .ok_or(ConfigError::InvalidValue {
                    key: ENV_DEFAULT_OUTCOME_DAYS,
                    value: value.clone(),
                })?;
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = PipelineConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, PipelineConfig::default());
        assert_eq!(config.default_outcome.days, 970.0);
    }

    #[test]
    fn overrides_from_lookup() {
        let config = PipelineConfig::from_lookup(lookup_from(&[
            (ENV_DEFAULT_OUTCOME_OP, "<="),
            (ENV_DEFAULT_OUTCOME_DAYS, " 365 "),
        ]))
        .unwrap();
        assert_eq!(
            config.default_outcome,
            OutcomeQualifier::new(OutcomeOperator::AtMost, 365.0)
        );
    }

    #[test]
    fn rejects_bad_values() {
        let err = PipelineConfig::from_lookup(lookup_from(&[(ENV_DEFAULT_OUTCOME_OP, "~")]))
            .unwrap_err();
        assert!(err.to_string().contains(ENV_DEFAULT_OUTCOME_OP));

        let err = PipelineConfig::from_lookup(lookup_from(&[(ENV_DEFAULT_OUTCOME_DAYS, "soon")]))
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue { key: ENV_DEFAULT_OUTCOME_DAYS, .. }
        ));
    }

    #[test]
    fn deserializes_partial_documents() {
        let config: PipelineConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, PipelineConfig::default());

        let config: PipelineConfig = serde_json::from_str(
            r#"{ "default_outcome": { "operator": "==", "days": 30 } }"#,
        )
        .unwrap();
        assert_eq!(
            config.default_outcome,
            OutcomeQualifier::new(OutcomeOperator::Exactly, 30.0)
        );
    }
}
