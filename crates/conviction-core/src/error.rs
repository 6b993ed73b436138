//! Error types for conviction scoring.
//!
//! Scoring itself is total and has no error type. Errors arise when a
//! [`crate::config::ScoringConfig`] is validated or a snapshot is decoded.
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("threshold {name} out of range [0, 1]: {value}")] ThresholdOutOfRange { name: &'static str, value: f64 },
    #[error("threshold band {name} is inverted: {low} > {high}")] InvertedBand { name: &'static str, low: f64, high: f64 },
    #[error("modifier {name} must be in (0, 1]: {value}")] DampeningModifier { name: &'static str, value: f64 },
    #[error("modifier {name} must be > 1: {value}")] BoostingModifier { name: &'static str, value: f64 },
    #[error("confidence {name} out of range [0, 1]: {value}")] ConfidenceOutOfRange { name: &'static str, value: f64 },
    #[error("age decay schedule is empty")] EmptyDecaySchedule,
    #[error("age decay tier {index}: max age {max_age} not above previous {previous}")] DecayTierOrder { index: usize, max_age: f64, previous: f64 },
    #[error("age decay multiplier {value} must be in (0, 1]")] DecayMultiplier { value: f64 },
    #[error("recommendation thresholds must descend within [0, 100]: strong_buy {strong_buy}, consider {consider}, monitor {monitor}")] RecommendationOrder { strong_buy: f64, consider: f64, monitor: f64 },
}

#[derive(Error, Debug)]
pub enum ConvictionError {
    #[error(transparent)] Config(#[from] ConfigError),
    #[error("snapshot decode: {0}")] Decode(#[from] serde_json::Error),
}
