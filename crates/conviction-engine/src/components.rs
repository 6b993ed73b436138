//! Component scorers.
//!
//! Each scorer builds independently capped sub-bonuses ([`BonusScore::capped`])
//! and sums them into a [`ComponentScore`] clamped to the component maximum.
//! Two-level capping means no combination of qualifying conditions can push a
//! component past its budget, and no single condition can exceed its share.
//!
//! Sub-bonuses whose inputs are unknown are excluded (score 0) rather than
//! scored as a worst case.
//!
//! | Component       | Max | Sub-bonuses (cap)                                  |
//! |-----------------|-----|----------------------------------------------------|
//! | Origin          | 20  | detection (12), velocity (8)                       |
//! | Momentum        | 30  | volume acceleration (12), price cascade (12), activity surge (6) |
//! | Safety          | 25  | security (15), liquidity presence (10)             |
//! | CrossValidation | 25  | platform count (15), whale distribution (10)       |

use conviction_core::constants::{
    ACTIVITY_VLR_BAND, CROSS_PLATFORM_BONUS_CAP, CROSS_PLATFORM_CAP,
    CROSS_PLATFORM_POINTS_PER_PLATFORM, CROSS_SMART_MONEY_POINTS, CROSS_VALIDATION_MAX,
    MOMENTUM_ACTIVITY_CAP, MOMENTUM_CASCADE_CAP, MOMENTUM_CASCADE_POINTS_PER_TIMEFRAME,
    MOMENTUM_MAX, MOMENTUM_VOLUME_CAP, ORIGIN_DETECTION_CAP, ORIGIN_MAX,
    ORIGIN_SIGHTING_POINTS, ORIGIN_SMART_MONEY_POINTS, ORIGIN_VELOCITY_CAP,
    SAFETY_LIQUIDITY_CAP, SAFETY_MAX, SAFETY_SECURITY_CAP, WHALE_HEALTH_CAP,
};
use conviction_core::types::{
    BonusScore, Component, ComponentScore, Factor, FactorValues, Timeframe,
};

/// Score every component, in [`Component::ALL`] order.
pub fn score_components(factors: &FactorValues) -> Vec<ComponentScore> {
    Component::ALL
        .iter()
        .map(|component| score_component(*component, factors))
        .collect()
}

/// Score a single component.
pub fn score_component(component: Component, factors: &FactorValues) -> ComponentScore {
    match component {
        Component::Origin => score_origin(factors),
        Component::Momentum => score_momentum(factors),
        Component::Safety => score_safety(factors),
        Component::CrossValidation => score_cross_validation(factors),
    }
}

/// `points * factor` capped at `cap`, or excluded when the factor is unknown.
fn scaled_bonus(name: &str, factors: &FactorValues, factor: Factor, points: f64, cap: f64) -> BonusScore {
    match factors.get(factor) {
        Some(value) => BonusScore::capped(name, value * points, cap),
        None => BonusScore::excluded(name, cap),
    }
}

/// Origin signal: launch-platform sighting plus smart money, and early price velocity.
pub fn score_origin(factors: &FactorValues) -> ComponentScore {
    let origin = factors.get(Factor::OriginSignal).unwrap_or(0.0);
    let smart_money = factors.get(Factor::SmartMoneyScore).unwrap_or(0.0);
    let detection = BonusScore::capped(
        "detection",
        origin * ORIGIN_SIGHTING_POINTS + smart_money * ORIGIN_SMART_MONEY_POINTS,
        ORIGIN_DETECTION_CAP,
    );

    // Each of the two shortest timeframes can fill the velocity cap on its own.
    let early = [Factor::PriceChangeM5, Factor::PriceChangeH1];
    let velocity = if early.iter().any(|f| factors.is_known(*f)) {
        let raw: f64 = early
            .iter()
            .filter_map(|f| factors.get(*f))
            .map(|v| v * ORIGIN_VELOCITY_CAP)
            .sum();
        BonusScore::capped("velocity", raw, ORIGIN_VELOCITY_CAP)
    } else {
        BonusScore::excluded("velocity", ORIGIN_VELOCITY_CAP)
    };

    ComponentScore::from_bonuses(Component::Origin, ORIGIN_MAX, vec![detection, velocity])
}

/// Momentum: volume acceleration, multi-timeframe price cascade and activity surge.
pub fn score_momentum(factors: &FactorValues) -> ComponentScore {
    let volume = scaled_bonus(
        "volume_acceleration",
        factors,
        Factor::VolumeMomentum,
        MOMENTUM_VOLUME_CAP,
        MOMENTUM_VOLUME_CAP,
    );

    // Four timeframes at four points each can reach 16 raw points.
    let cascade_raw: f64 = Timeframe::ALL
        .iter()
        .filter_map(|tf| factors.get(tf.factor()))
        .map(|v| v * MOMENTUM_CASCADE_POINTS_PER_TIMEFRAME)
        .sum();
    let cascade = BonusScore::capped("price_cascade", cascade_raw, MOMENTUM_CASCADE_CAP);

    let activity = match factors.get(Factor::VlrRatio) {
        Some(vlr) => BonusScore::capped(
            "activity_surge",
            activity_share(vlr) * MOMENTUM_ACTIVITY_CAP,
            MOMENTUM_ACTIVITY_CAP,
        ),
        None => BonusScore::excluded("activity_surge", MOMENTUM_ACTIVITY_CAP),
    };

    ComponentScore::from_bonuses(
        Component::Momentum,
        MOMENTUM_MAX,
        vec![volume, cascade, activity],
    )
}

/// Share of the activity bonus earned at a normalized VLR.
///
/// Ramps up to 1 at the bottom of [`ACTIVITY_VLR_BAND`], holds at 1 across
/// the band, then falls linearly to 0 at saturation: turnover far above the
/// band is a manipulation signal, not healthy activity.
///
/// # Examples
///
/// ```
/// use conviction_engine::components::activity_share;
///
/// assert_eq!(activity_share(0.0), 0.0);
/// assert_eq!(activity_share(0.05), 0.5);
/// assert_eq!(activity_share(0.25), 1.0);
/// assert_eq!(activity_share(1.0), 0.0);
/// ```
pub fn activity_share(vlr_ratio: f64) -> f64 {
    let (low, high) = ACTIVITY_VLR_BAND;
    if vlr_ratio < low {
        vlr_ratio / low
    } else if vlr_ratio <= high {
        1.0
    } else {
        (1.0 - (vlr_ratio - high) / (1.0 - high)).max(0.0)
    }
}

/// Safety: security audit score and liquidity depth.
pub fn score_safety(factors: &FactorValues) -> ComponentScore {
    let security = scaled_bonus(
        "security_score",
        factors,
        Factor::SecurityScore,
        SAFETY_SECURITY_CAP,
        SAFETY_SECURITY_CAP,
    );
    let liquidity = scaled_bonus(
        "liquidity_presence",
        factors,
        Factor::Liquidity,
        SAFETY_LIQUIDITY_CAP,
        SAFETY_LIQUIDITY_CAP,
    );
    ComponentScore::from_bonuses(Component::Safety, SAFETY_MAX, vec![security, liquidity])
}

/// Cross-validation: independent platform sightings and holder distribution.
pub fn score_cross_validation(factors: &FactorValues) -> ComponentScore {
    let platforms = factors.get(Factor::CrossPlatformValidation).unwrap_or(0.0) * CROSS_PLATFORM_CAP;
    let smart_money = factors.get(Factor::SmartMoneyScore).unwrap_or(0.0);
    let platform_bonus = BonusScore::capped(
        "platform_count",
        platforms * CROSS_PLATFORM_POINTS_PER_PLATFORM + smart_money * CROSS_SMART_MONEY_POINTS,
        CROSS_PLATFORM_BONUS_CAP,
    );

    let whale = match factors.get(Factor::WhaleConcentration) {
        Some(concentration) => BonusScore::capped(
            "whale_distribution",
            (1.0 - concentration) * WHALE_HEALTH_CAP,
            WHALE_HEALTH_CAP,
        ),
        None => BonusScore::excluded("whale_distribution", WHALE_HEALTH_CAP),
    };

    ComponentScore::from_bonuses(
        Component::CrossValidation,
        CROSS_VALIDATION_MAX,
        vec![platform_bonus, whale],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn all_maxed() -> FactorValues {
        let mut f = FactorValues::new();
        for factor in Factor::ALL {
            f.set(factor, 1.0);
        }
        // Healthy distribution and in-band VLR to earn everything.
        f.set(Factor::WhaleConcentration, 0.0);
        f.set(Factor::VlrRatio, 0.25);
        f
    }

    fn bonus<'a>(score: &'a ComponentScore, name: &str) -> &'a BonusScore {
        score
            .bonuses
            .iter()
            .find(|b| b.name == name)
            .unwrap_or_else(|| panic!("missing bonus {name}"))
    }

    #[test]
    fn maxima_total_one_hundred() {
        let total: f64 = score_components(&FactorValues::new())
            .iter()
            .map(|c| c.max)
            .sum();
        assert_eq!(total, 100.0);
    }

    #[test]
    fn all_unknown_scores_zero() {
        for score in score_components(&FactorValues::new()) {
            assert_eq!(score.value, 0.0, "{}", score.component);
        }
    }

    #[test]
    fn fully_qualified_components_hit_max() {
        for score in score_components(&all_maxed()) {
            assert_eq!(score.value, score.max, "{}", score.component);
        }
    }

    #[test]
    fn origin_detection_stacking_clamped() {
        // 8 (origin) + 6 (smart money) = 14 raw, capped at 12.
        let f = FactorValues::new()
            .with(Factor::OriginSignal, 1.0)
            .with(Factor::SmartMoneyScore, 1.0);
        let score = score_origin(&f);
        assert_eq!(bonus(&score, "detection").value, ORIGIN_DETECTION_CAP);
        assert_eq!(score.value, ORIGIN_DETECTION_CAP);
    }

    #[test]
    fn origin_velocity_stacking_clamped() {
        let f = FactorValues::new()
            .with(Factor::PriceChangeM5, 1.0)
            .with(Factor::PriceChangeH1, 1.0);
        let score = score_origin(&f);
        assert_eq!(bonus(&score, "velocity").value, ORIGIN_VELOCITY_CAP);
    }

    #[test]
    fn price_cascade_stacking_clamped() {
        let mut f = FactorValues::new();
        for tf in Timeframe::ALL {
            f.set(tf.factor(), 1.0);
        }
        let score = score_momentum(&f);
        // 4 timeframes * 4 points = 16 raw
        assert_eq!(bonus(&score, "price_cascade").value, MOMENTUM_CASCADE_CAP);
        assert_eq!(score.value, MOMENTUM_CASCADE_CAP);
    }

    #[test]
    fn partial_cascade_scales_by_magnitude() {
        let f = FactorValues::new()
            .with(Factor::PriceChangeM5, 0.5)
            .with(Factor::PriceChangeH24, 0.25);
        let score = score_momentum(&f);
        assert_eq!(bonus(&score, "price_cascade").value, 3.0);
    }

    #[test]
    fn platform_bonus_stacking_clamped() {
        // 5 platforms * 3 + smart money 3 = 18 raw, capped at 15.
        let f = FactorValues::new()
            .with(Factor::CrossPlatformValidation, 1.0)
            .with(Factor::SmartMoneyScore, 1.0);
        let score = score_cross_validation(&f);
        assert_eq!(bonus(&score, "platform_count").value, CROSS_PLATFORM_BONUS_CAP);
    }

    #[test]
    fn unknown_whale_excluded_not_worst_case() {
        let known_bad = FactorValues::new().with(Factor::WhaleConcentration, 1.0);
        let unknown = FactorValues::new();
        assert_eq!(score_cross_validation(&known_bad).value, 0.0);
        assert_eq!(score_cross_validation(&unknown).value, 0.0);

        let healthy = FactorValues::new().with(Factor::WhaleConcentration, 0.2);
        assert!((score_cross_validation(&healthy).value - 8.0).abs() < 1e-9);
    }

    #[test]
    fn unknown_security_excluded() {
        let f = FactorValues::new().with(Factor::Liquidity, 0.5);
        let score = score_safety(&f);
        assert_eq!(bonus(&score, "security_score").value, 0.0);
        assert_eq!(score.value, 5.0);
    }

    #[test]
    fn activity_share_band_edges() {
        assert_eq!(activity_share(0.1), 1.0);
        assert_eq!(activity_share(0.4), 1.0);
        assert!(activity_share(0.7) > 0.0 && activity_share(0.7) < 1.0);
    }

    #[test]
    fn manipulated_turnover_earns_little_activity() {
        let f = FactorValues::new().with(Factor::VlrRatio, 0.95);
        let score = score_momentum(&f);
        assert!(bonus(&score, "activity_surge").value < 1.0);
    }

    // --- proptest ---

    fn arb_factors() -> impl Strategy<Value = FactorValues> {
        proptest::collection::vec(proptest::option::of(0.0f64..=1.0), Factor::ALL.len()).prop_map(
            |values| {
                let mut f = FactorValues::new();
                for (factor, value) in Factor::ALL.iter().zip(values) {
                    if let Some(v) = value {
                        f.set(*factor, v);
                    }
                }
                f
            },
        )
    }

    proptest! {
        #[test]
        fn components_within_bounds(f in arb_factors()) {
            for score in score_components(&f) {
                prop_assert!(score.value >= 0.0 && score.value <= score.max,
                    "{} = {} > {}", score.component, score.value, score.max);
                for b in &score.bonuses {
                    prop_assert!(b.value >= 0.0 && b.value <= b.cap,
                        "{}.{} = {} > {}", score.component, b.name, b.value, b.cap);
                }
            }
        }

        #[test]
        fn activity_share_in_unit_interval(v in 0.0f64..=1.0) {
            let share = activity_share(v);
            prop_assert!((0.0..=1.0).contains(&share));
        }
    }
}
