//! Base score composition and interaction modifiers.
//!
//! The base score is the sum of component values rescaled so the declared
//! component maxima total exactly [`MAX_SCORE`]. Interaction modifiers are then
//! applied multiplicatively in a fixed order:
//!
//! 1. An override danger, if present, multiplies the base and ends composition.
//! 2. Amplifications.
//! 3. Emergent patterns.
//! 4. Contradictions.
//! 5. Non-override dangers.
//!
//! Modifiers compound without intermediate clamping, so a dampener applied
//! after a strong amplification still sees the full amplified value. The
//! result is clamped into `[MIN_SCORE, MAX_SCORE]` once, at the end.

use conviction_core::constants::{MAX_SCORE, MIN_SCORE};
use conviction_core::types::{clamp_score, ComponentScore, Interaction, InteractionKind};
use tracing::warn;

/// Compose the base score from component scores.
///
/// Component values above their maximum are clamped and logged; they never
/// leak extra points into the base score.
///
/// # Examples
///
/// ```
/// use conviction_core::types::{Component, ComponentScore};
/// use conviction_engine::compose::compose_base;
///
/// let components = vec![
///     ComponentScore { component: Component::Origin, value: 10.0, max: 20.0, bonuses: vec![] },
///     ComponentScore { component: Component::Safety, value: 30.0, max: 30.0, bonuses: vec![] },
/// ];
/// // 40 of 50 declared points, rescaled to the 0–100 scale.
/// assert_eq!(compose_base(&components), 80.0);
/// ```
pub fn compose_base(components: &[ComponentScore]) -> f64 {
    let declared_total: f64 = components
        .iter()
        .map(|c| if c.max.is_finite() && c.max > 0.0 { c.max } else { 0.0 })
        .sum();
    if declared_total <= 0.0 {
        return MIN_SCORE;
    }

    let mut sum = 0.0;
    for c in components {
        let value = if c.value.is_nan() { 0.0 } else { c.value };
        if value > c.max {
            warn!(
                component = %c.component,
                value,
                max = c.max,
                "component exceeded its maximum, clamping"
            );
        }
        sum += value.clamp(MIN_SCORE, c.max.max(MIN_SCORE));
    }

    clamp_score(sum / declared_total * MAX_SCORE)
}

/// Apply interaction modifiers to a base score.
///
/// # Examples
///
/// ```
/// use conviction_core::types::{Interaction, InteractionKind, InteractionRule, RiskLevel};
/// use conviction_engine::compose::apply_interactions;
///
/// let surge = Interaction {
///     rule: InteractionRule::SmartMoneySurge,
///     kind: InteractionKind::Amplification,
///     risk_level: RiskLevel::Low,
///     modifier: 1.5,
///     override_score: false,
///     confidence: 0.8,
///     rationale: String::new(),
/// };
/// assert_eq!(apply_interactions(40.0, &[surge.clone()]), 60.0);
/// assert_eq!(apply_interactions(90.0, &[surge]), 100.0);
/// ```
pub fn apply_interactions(base: f64, interactions: &[Interaction]) -> f64 {
    let base = clamp_score(base);

    let mut overrides = interactions.iter().filter(|i| i.override_score);
    if let Some(first) = overrides.next() {
        let extra = overrides.count();
        if extra > 0 {
            warn!(
                rule = %first.rule,
                ignored = extra,
                "more than one override interaction, applying the first"
            );
        }
        return clamp_score(base * first.modifier);
    }

    let mut score = base;
    for kind in [
        InteractionKind::Amplification,
        InteractionKind::Emergent,
        InteractionKind::Contradiction,
        InteractionKind::Danger,
    ] {
        for interaction in interactions.iter().filter(|i| i.kind == kind) {
            score *= interaction.modifier;
        }
    }

    clamp_score(score)
}

#[cfg(test)]
mod tests {
    use super::*;
    use conviction_core::types::{Component, InteractionRule, RiskLevel};
    use proptest::prelude::*;
    use std::io;
    use std::sync::{Arc, Mutex};

    /// Log sink shared between the subscriber and the test.
    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    /// Run `f` under a thread-local subscriber and return what it logged.
    fn logs_of(f: impl FnOnce()) -> String {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::WARN)
            .finish();
        tracing::subscriber::with_default(subscriber, f);
        let bytes = captured.0.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap()
    }

    fn component(component: Component, value: f64, max: f64) -> ComponentScore {
        ComponentScore {
            component,
            value,
            max,
            bonuses: Vec::new(),
        }
    }

    fn interaction(rule: InteractionRule, modifier: f64) -> Interaction {
        Interaction {
            rule,
            kind: rule.kind(),
            risk_level: rule.risk_level(),
            modifier,
            override_score: rule.is_override(),
            confidence: 0.8,
            rationale: String::new(),
        }
    }

    fn full_budget(values: [f64; 4]) -> Vec<ComponentScore> {
        vec![
            component(Component::Origin, values[0], 20.0),
            component(Component::Momentum, values[1], 30.0),
            component(Component::Safety, values[2], 25.0),
            component(Component::CrossValidation, values[3], 25.0),
        ]
    }

    #[test]
    fn base_of_full_budget_is_plain_sum() {
        assert_eq!(compose_base(&full_budget([10.0, 20.0, 15.0, 5.0])), 50.0);
        assert_eq!(compose_base(&full_budget([20.0, 30.0, 25.0, 25.0])), 100.0);
        assert_eq!(compose_base(&full_budget([0.0; 4])), 0.0);
    }

    #[test]
    fn base_rescales_partial_budgets() {
        let components = vec![component(Component::Safety, 12.5, 25.0)];
        assert_eq!(compose_base(&components), 50.0);
    }

    #[test]
    fn base_of_nothing_is_zero() {
        assert_eq!(compose_base(&[]), 0.0);
    }

    #[test]
    fn overflowing_component_is_clamped() {
        // 28 on a 20-point component counts as 20.
        let base = compose_base(&full_budget([28.0, 30.0, 25.0, 25.0]));
        assert_eq!(base, 100.0);
        let base = compose_base(&full_budget([28.0, 0.0, 0.0, 0.0]));
        assert_eq!(base, 20.0);
    }

    #[test]
    fn overflowing_component_is_logged() {
        let logs = logs_of(|| {
            compose_base(&full_budget([28.0, 0.0, 0.0, 0.0]));
        });
        assert!(logs.contains("WARN"), "{logs}");
        assert!(logs.contains("component exceeded its maximum"), "{logs}");
        assert!(logs.contains("value=28"), "{logs}");
        assert!(logs.contains("max=20"), "{logs}");
    }

    #[test]
    fn components_within_budget_log_nothing() {
        let logs = logs_of(|| {
            compose_base(&full_budget([20.0, 30.0, 25.0, 25.0]));
        });
        assert!(logs.is_empty(), "{logs}");
    }

    #[test]
    fn extra_override_is_logged() {
        let found = vec![
            interaction(InteractionRule::ManipulationPattern, 0.05),
            interaction(InteractionRule::RugPullSetup, 0.03),
        ];
        let logs = logs_of(|| {
            apply_interactions(80.0, &found);
        });
        assert!(logs.contains("more than one override"), "{logs}");
    }

    #[test]
    fn negative_and_nan_components_count_as_zero() {
        assert_eq!(compose_base(&full_budget([-5.0, f64::NAN, 0.0, 0.0])), 0.0);
    }

    #[test]
    fn no_interactions_leaves_base() {
        assert_eq!(apply_interactions(64.0, &[]), 64.0);
    }

    #[test]
    fn override_replaces_everything() {
        let found = vec![
            interaction(InteractionRule::SmartMoneySurge, 1.8),
            interaction(InteractionRule::ManipulationPattern, 0.05),
        ];
        assert!((apply_interactions(80.0, &found) - 4.0).abs() < 1e-9);
    }

    #[test]
    fn first_override_wins() {
        let found = vec![
            interaction(InteractionRule::RugPullSetup, 0.03),
            interaction(InteractionRule::ManipulationPattern, 0.05),
        ];
        assert!((apply_interactions(100.0, &found) - 3.0).abs() < 1e-9);
    }

    #[test]
    fn amplifications_compound_and_clamp() {
        let found = vec![
            interaction(InteractionRule::SmartMoneySurge, 2.0),
            interaction(InteractionRule::TripleValidation, 2.0),
        ];
        assert_eq!(apply_interactions(10.0, &found), 40.0);
        assert_eq!(apply_interactions(30.0, &found), 100.0);
    }

    #[test]
    fn clamp_applies_once_at_the_end() {
        // 80 × 2 × 0.5: the amplified 160 is not clamped before halving.
        let found = vec![
            interaction(InteractionRule::SecurityWhaleMismatch, 0.5),
            interaction(InteractionRule::SmartMoneySurge, 2.0),
        ];
        assert_eq!(apply_interactions(80.0, &found), 80.0);
    }

    #[test]
    fn non_override_danger_dampens() {
        let found = vec![interaction(InteractionRule::BotDrivenVolume, 0.25)];
        assert_eq!(apply_interactions(80.0, &found), 20.0);
    }

    #[test]
    fn emergent_and_contradiction_compound() {
        let found = vec![
            interaction(InteractionRule::StealthAccumulation, 2.0),
            interaction(InteractionRule::VolumeValidationMismatch, 0.5),
        ];
        assert_eq!(apply_interactions(60.0, &found), 60.0);
    }

    // --- proptest ---

    proptest! {
        #[test]
        fn base_in_range(values in proptest::array::uniform4(-50.0f64..150.0)) {
            let base = compose_base(&full_budget(values));
            prop_assert!((0.0..=100.0).contains(&base));
        }

        #[test]
        fn adjusted_in_range(
            base in 0.0f64..=100.0,
            modifiers in proptest::collection::vec(0.01f64..3.0, 0..6),
        ) {
            let rules = [
                InteractionRule::BotDrivenVolume,
                InteractionRule::SmartMoneySurge,
                InteractionRule::TripleValidation,
                InteractionRule::OptimalRange,
                InteractionRule::SecurityWhaleMismatch,
                InteractionRule::StealthAccumulation,
            ];
            let found: Vec<_> = modifiers
                .iter()
                .zip(rules)
                .map(|(m, r)| interaction(r, *m))
                .collect();
            let adjusted = apply_interactions(base, &found);
            prop_assert!((0.0..=100.0).contains(&adjusted));
        }

        #[test]
        fn override_caps_at_base_times_modifier(
            base in 0.0f64..=100.0,
            modifier in 0.0f64..=1.0,
        ) {
            let found = vec![
                interaction(InteractionRule::TripleValidation, 1.6),
                interaction(InteractionRule::RugPullSetup, modifier),
            ];
            prop_assert!(apply_interactions(base, &found) <= base * modifier + 1e-9);
        }

        #[test]
        fn amplification_never_lowers(base in 0.0f64..=100.0, modifier in 1.0f64..3.0) {
            let found = vec![interaction(InteractionRule::OptimalRange, modifier)];
            prop_assert!(apply_interactions(base, &found) >= base);
        }

        #[test]
        fn risk_level_does_not_affect_composition(base in 0.0f64..=100.0) {
            let mut a = interaction(InteractionRule::SecurityWhaleMismatch, 0.7);
            let b = a.clone();
            a.risk_level = RiskLevel::High;
            prop_assert_eq!(apply_interactions(base, &[a]), apply_interactions(base, &[b]));
        }
    }
}
