//! Conviction engine implementing the [`ConvictionScorer`] trait.
//!
//! Runs the full pipeline for one snapshot: normalize, score components,
//! compose the base, detect interactions, apply modifiers, decay by age and
//! classify. Holds only an immutable [`ScoringConfig`].

use conviction_core::config::ScoringConfig;
use conviction_core::error::ConvictionError;
use conviction_core::traits::ConvictionScorer;
use conviction_core::types::{
    ComponentScore, FactorValues, Interaction, ScoringResult, SignalSnapshot,
};
use tracing::debug;

use crate::classify::classify;
use crate::compose::{apply_interactions, compose_base};
use crate::decay::decay;

/// The production conviction scorer.
#[derive(Debug, Clone, Default)]
pub struct ConvictionEngine {
    config: ScoringConfig,
}

impl ConvictionEngine {
    /// Create an engine with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine with a validated custom configuration.
    pub fn with_config(config: ScoringConfig) -> Result<Self, ConvictionError> {
        config.validate()?;
        Ok(Self { config })
    }
}

impl ConvictionScorer for ConvictionEngine {
    fn config(&self) -> &ScoringConfig {
        &self.config
    }

    fn normalize(&self, snapshot: &SignalSnapshot) -> FactorValues {
        crate::normalize::normalize(snapshot)
    }

    fn score_components(&self, factors: &FactorValues) -> Vec<ComponentScore> {
        crate::components::score_components(factors)
    }

    fn detect(&self, factors: &FactorValues) -> Vec<Interaction> {
        crate::interactions::detect(factors, &self.config)
    }

    fn score(&self, snapshot: &SignalSnapshot) -> ScoringResult {
        let factors = self.normalize(snapshot);
        debug!(known = factors.len(), "normalized factors");

        let components = self.score_components(&factors);
        let base_score = compose_base(&components);
        debug!(base_score, "composed base score");

        let interactions = self.detect(&factors);
        let adjusted_score = apply_interactions(base_score, &interactions);
        debug!(
            interactions = interactions.len(),
            adjusted_score, "applied interaction modifiers"
        );

        let (final_score, age_multiplier) = decay(
            adjusted_score,
            snapshot.known_age_minutes(),
            &self.config.age_decay,
        );
        let c = classify(final_score, &interactions, &self.config.recommendation);
        debug!(
            final_score,
            age_multiplier,
            risk = %c.risk_level,
            recommendation = %c.recommendation,
            "scored snapshot"
        );

        ScoringResult {
            base_score,
            components,
            interactions,
            adjusted_score,
            age_multiplier,
            final_score,
            risk_level: c.risk_level,
            confidence: c.confidence,
            recommendation: c.recommendation,
        }
    }
}
