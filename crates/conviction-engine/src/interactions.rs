//! Interaction detection.
//!
//! Each [`InteractionRule`] is a pure predicate over [`FactorValues`] and the
//! configured [`Thresholds`]. Rules are evaluated in the fixed order of
//! [`InteractionRule::ALL`]:
//!
//! 1. Override rules (critical dangers) first. The first one that fires is the
//!    only interaction reported; nothing else is evaluated.
//! 2. Otherwise every non-override rule is evaluated and every firing is
//!    recorded, so several interactions of the same kind may co-fire.
//!
//! A rule that needs an unknown factor does not fire: missing security data
//! is never mistaken for a rug-pull setup.

use conviction_core::config::{ScoringConfig, Thresholds};
use conviction_core::types::{Factor, FactorValues, Interaction, InteractionRule};
use tracing::debug;

/// Detect every interaction among `factors`, in rule order.
pub fn detect(factors: &FactorValues, config: &ScoringConfig) -> Vec<Interaction> {
    for rule in InteractionRule::ALL.iter().filter(|r| r.is_override()) {
        if let Some(interaction) = evaluate(*rule, factors, config) {
            debug!(rule = %rule, "interaction: override fired, skipping remaining rules");
            return vec![interaction];
        }
    }

    InteractionRule::ALL
        .iter()
        .filter(|r| !r.is_override())
        .filter_map(|rule| evaluate(*rule, factors, config))
        .collect()
}

/// Evaluate a single rule, producing an [`Interaction`] when it fires.
pub fn evaluate(
    rule: InteractionRule,
    factors: &FactorValues,
    config: &ScoringConfig,
) -> Option<Interaction> {
    if !fires(rule, factors, &config.thresholds) {
        return None;
    }
    Some(Interaction {
        rule,
        kind: rule.kind(),
        risk_level: rule.risk_level(),
        modifier: config.modifiers.for_rule(rule),
        override_score: rule.is_override(),
        confidence: config.confidences.for_rule(rule),
        rationale: rationale(rule, factors),
    })
}

/// Whether `rule` fires. Unknown factors make the rule not fire.
pub fn fires(rule: InteractionRule, factors: &FactorValues, t: &Thresholds) -> bool {
    predicate(rule, factors, t).unwrap_or(false)
}

fn predicate(rule: InteractionRule, f: &FactorValues, t: &Thresholds) -> Option<bool> {
    use Factor::*;

    let fired = match rule {
        InteractionRule::ManipulationPattern => {
            f.get(VlrRatio)? > t.manipulation_vlr_min
                && f.get(Liquidity)? < t.manipulation_liquidity_max
        }
        InteractionRule::RugPullSetup => {
            f.get(SecurityScore)? < t.rug_pull_security_max
                && f.get(WhaleConcentration)? > t.rug_pull_whale_min
        }
        InteractionRule::BotDrivenVolume => {
            f.get(VolumeMomentum)? >= t.bot_volume_min
                && f.get(SmartMoneyScore)? < t.bot_smart_money_max
                && f.get(CrossPlatformValidation)? < t.bot_cross_platform_max
        }
        InteractionRule::SmartMoneySurge => {
            f.get(SmartMoneyScore)? >= t.surge_smart_money_min
                && f.get(VolumeMomentum)? >= t.surge_volume_min
        }
        InteractionRule::TripleValidation => {
            f.get(CrossPlatformValidation)? >= t.triple_cross_platform_min
                && f.get(SecurityScore)? >= t.triple_security_min
                && f.get(WhaleConcentration)? <= t.triple_whale_max
        }
        InteractionRule::OptimalRange => {
            let vlr = f.get(VlrRatio)?;
            (t.optimal_vlr_low..=t.optimal_vlr_high).contains(&vlr)
                && f.get(Liquidity)? >= t.optimal_liquidity_min
        }
        InteractionRule::SecurityWhaleMismatch => {
            f.get(SecurityScore)? >= t.mismatch_security_min
                && f.get(WhaleConcentration)? >= t.mismatch_whale_min
        }
        InteractionRule::VolumeValidationMismatch => {
            f.get(VolumeMomentum)? >= t.volume_mismatch_volume_min
                && f.get(CrossPlatformValidation)? <= t.volume_mismatch_cross_platform_max
        }
        InteractionRule::StealthAccumulation => {
            f.get(SmartMoneyScore)? >= t.stealth_smart_money_min
                && f.get(VolumeMomentum)? <= t.stealth_volume_max
                && f.get(WhaleConcentration)? <= t.stealth_whale_max
        }
    };
    Some(fired)
}

fn rationale(rule: InteractionRule, f: &FactorValues) -> String {
    let v = |factor: Factor| f.get(factor).unwrap_or(0.0);
    match rule {
        InteractionRule::ManipulationPattern => format!(
            "volume/liquidity ratio {:.2} on liquidity {:.3}: turnover far exceeds pool depth",
            v(Factor::VlrRatio),
            v(Factor::Liquidity)
        ),
        InteractionRule::RugPullSetup => format!(
            "security {:.2} with whale concentration {:.2}: holders can drain a weak contract",
            v(Factor::SecurityScore),
            v(Factor::WhaleConcentration)
        ),
        InteractionRule::BotDrivenVolume => format!(
            "volume {:.2} without smart money ({:.2}) or cross-platform validation ({:.2})",
            v(Factor::VolumeMomentum),
            v(Factor::SmartMoneyScore),
            v(Factor::CrossPlatformValidation)
        ),
        InteractionRule::SmartMoneySurge => format!(
            "smart money {:.2} entering alongside volume surge {:.2}",
            v(Factor::SmartMoneyScore),
            v(Factor::VolumeMomentum)
        ),
        InteractionRule::TripleValidation => format!(
            "validated on platforms ({:.2}), security {:.2}, distributed holders (whales {:.2})",
            v(Factor::CrossPlatformValidation),
            v(Factor::SecurityScore),
            v(Factor::WhaleConcentration)
        ),
        InteractionRule::OptimalRange => format!(
            "volume/liquidity ratio {:.2} in healthy band with liquidity {:.2}",
            v(Factor::VlrRatio),
            v(Factor::Liquidity)
        ),
        InteractionRule::SecurityWhaleMismatch => format!(
            "security {:.2} contradicted by whale concentration {:.2}",
            v(Factor::SecurityScore),
            v(Factor::WhaleConcentration)
        ),
        InteractionRule::VolumeValidationMismatch => format!(
            "volume {:.2} not corroborated across platforms ({:.2})",
            v(Factor::VolumeMomentum),
            v(Factor::CrossPlatformValidation)
        ),
        InteractionRule::StealthAccumulation => format!(
            "smart money {:.2} accumulating on quiet volume {:.2} with distributed holders",
            v(Factor::SmartMoneyScore),
            v(Factor::VolumeMomentum)
        ),
    }
}
