//! Risk, confidence and recommendation classification.

use conviction_core::config::RecommendationThresholds;
use conviction_core::constants::NEUTRAL_CONFIDENCE;
use conviction_core::types::{clamp_unit, Interaction, Recommendation, RiskLevel};

/// Classifier output.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Classification {
    pub risk_level: RiskLevel,
    pub confidence: f64,
    pub recommendation: Recommendation,
}

/// Highest risk level among `interactions`, or [`RiskLevel::Low`] when none fired.
pub fn risk_level(interactions: &[Interaction]) -> RiskLevel {
    interactions
        .iter()
        .map(|i| i.risk_level)
        .max()
        .unwrap_or_default()
}

/// Severity-weighted mean of interaction confidences.
///
/// Critical findings weigh three times as much as low-risk ones. With no
/// interactions the result is [`NEUTRAL_CONFIDENCE`].
pub fn confidence(interactions: &[Interaction]) -> f64 {
    let (weighted, weights) = interactions.iter().fold((0.0, 0.0), |(sum, w), i| {
        let weight = i.risk_level.severity_weight();
        (sum + clamp_unit(i.confidence) * weight, w + weight)
    });
    if weights > 0.0 {
        clamp_unit(weighted / weights)
    } else {
        NEUTRAL_CONFIDENCE
    }
}

/// Recommendation for a final score under a risk level.
///
/// Thresholds are strict: a score must exceed `strong_buy` to earn
/// [`Recommendation::StrongBuy`]. Critical risk always yields
/// [`Recommendation::Avoid`]; high risk never rises above
/// [`Recommendation::Monitor`].
///
/// # Examples
///
/// ```
/// use conviction_core::config::RecommendationThresholds;
/// use conviction_core::types::{Recommendation, RiskLevel};
/// use conviction_engine::classify::recommend;
///
/// let t = RecommendationThresholds::default();
/// assert_eq!(recommend(90.0, RiskLevel::Low, &t), Recommendation::StrongBuy);
/// assert_eq!(recommend(85.0, RiskLevel::Low, &t), Recommendation::Consider);
/// assert_eq!(recommend(90.0, RiskLevel::High, &t), Recommendation::Monitor);
/// assert_eq!(recommend(99.0, RiskLevel::Critical, &t), Recommendation::Avoid);
/// ```
pub fn recommend(
    final_score: f64,
    risk_level: RiskLevel,
    thresholds: &RecommendationThresholds,
) -> Recommendation {
    if risk_level == RiskLevel::Critical {
        return Recommendation::Avoid;
    }
    let by_score = if final_score > thresholds.strong_buy {
        Recommendation::StrongBuy
    } else if final_score > thresholds.consider {
        Recommendation::Consider
    } else if final_score > thresholds.monitor {
        Recommendation::Monitor
    } else {
        Recommendation::Pass
    };
    if risk_level == RiskLevel::High
        && matches!(by_score, Recommendation::StrongBuy | Recommendation::Consider)
    {
        return Recommendation::Monitor;
    }
    by_score
}

/// Classify a scored snapshot.
pub fn classify(
    final_score: f64,
    interactions: &[Interaction],
    thresholds: &RecommendationThresholds,
) -> Classification {
    let risk_level = risk_level(interactions);
    Classification {
        risk_level,
        confidence: confidence(interactions),
        recommendation: recommend(final_score, risk_level, thresholds),
    }
}
