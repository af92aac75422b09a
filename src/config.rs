//! Operator selection for the inference engine.
//!
//! Every field defaults to the classic Mamdani setting: `min` conjunction,
//! `max` disjunction, clipping implication, `max` aggregation and discrete
//! centroid defuzzification.
//!
//! ```toml
//! and_op = "min"
//! or_op = "max"
//! implication = "min"
//! aggregation = "max"
//! defuzzification = "centroid"
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::ops::{AggregationOp, AndOp, DefuzzificationOp, ImplicationOp, OrOp};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    pub and_op: AndOp,
    pub or_op: OrOp,
    pub implication: ImplicationOp,
    pub aggregation: AggregationOp,
    pub defuzzification: DefuzzificationOp,
}

impl EngineConfig {
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;

        Self::load_from_str(&content)
    }

    pub fn load_from_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config(e.to_string()))
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::Config(e.to_string()))
    }
}

#[test]
fn test_empty_config_is_mamdani() {
    let config = EngineConfig::load_from_str("").unwrap();

    assert_eq!(config, EngineConfig::default());
    assert_eq!(config.and_op, AndOp::Min);
    assert_eq!(config.implication, ImplicationOp::Min);
    assert_eq!(config.defuzzification, DefuzzificationOp::Centroid);
}

#[test]
fn test_partial_config() {
    let config = EngineConfig::load_from_str(
        r#"
        implication = "prod"
        defuzzification = "mean_of_maximum"
        "#,
    )
    .unwrap();

    assert_eq!(config.implication, ImplicationOp::Prod);
    assert_eq!(config.defuzzification, DefuzzificationOp::MeanOfMaximum);
    assert_eq!(config.aggregation, AggregationOp::Max);
}

#[test]
fn test_rejects_unknown_operator() {
    let err = EngineConfig::load_from_str(r#"and_op = "average""#).unwrap_err();

    assert!(matches!(err, Error::Config(_)));
    assert!(EngineConfig::load_from_str("threshold = 0.5").is_err());
}

#[test]
fn test_toml_round_trip() {
    let config = EngineConfig {
        aggregation: AggregationOp::BoundedSum,
        ..EngineConfig::default()
    };
    let text = config.to_toml().unwrap();

    assert!(text.contains(r#"aggregation = "bounded_sum""#));
    assert_eq!(EngineConfig::load_from_str(&text).unwrap(), config);
}

#[test]
fn test_missing_file() {
    let err = EngineConfig::load_from_file("/nonexistent/deviance.toml").unwrap_err();

    assert!(matches!(err, Error::Io(_)));
}
