//! Age decay: older tokens keep a smaller share of their adjusted score.

use conviction_core::config::AgeDecaySchedule;
use conviction_core::types::clamp_score;

/// Apply the age multiplier to `score`, returning `(final_score, multiplier)`.
///
/// Unknown age leaves the score undecayed: missing data is neutral, never
/// the oldest tier.
///
/// # Examples
///
/// ```
/// use conviction_core::config::AgeDecaySchedule;
/// use conviction_engine::decay::decay;
///
/// let schedule = AgeDecaySchedule::default();
/// assert_eq!(decay(80.0, Some(3.0), &schedule), (80.0, 1.0));
/// assert_eq!(decay(80.0, None, &schedule), (80.0, 1.0));
/// ```
pub fn decay(score: f64, age_minutes: Option<f64>, schedule: &AgeDecaySchedule) -> (f64, f64) {
    let multiplier = schedule.multiplier_for(age_minutes);
    (clamp_score(score * multiplier), multiplier)
}

#[cfg(test)]
mod tests {
    use super::*;
    use conviction_core::config::DecayTier;
    use proptest::prelude::*;

    #[test]
    fn tier_boundaries_inclusive() {
        let s = AgeDecaySchedule::default();
        assert_eq!(decay(100.0, Some(15.0), &s).1, 0.9);
        assert_eq!(decay(100.0, Some(15.01), &s).1, 0.8);
        assert_eq!(decay(100.0, Some(180.0), &s).1, 0.6);
        assert_eq!(decay(100.0, Some(180.5), &s).1, 0.5);
    }

    #[test]
    fn custom_schedule() {
        let s = AgeDecaySchedule {
            floor_multiplier: 0.25,
            tiers: vec![DecayTier {
                max_age_minutes: 10.0,
                multiplier: 1.0,
            }],
        };
        assert_eq!(decay(60.0, Some(9.0), &s), (60.0, 1.0));
        assert_eq!(decay(60.0, Some(11.0), &s), (15.0, 0.25));
    }

    #[test]
    fn zero_score_stays_zero() {
        let s = AgeDecaySchedule::default();
        assert_eq!(decay(0.0, Some(1.0), &s).0, 0.0);
    }

    proptest! {
        #[test]
        fn decay_never_raises(score in 0.0f64..=100.0, age in proptest::option::of(0.0f64..10_000.0)) {
            let (decayed, multiplier) = decay(score, age, &AgeDecaySchedule::default());
            prop_assert!(decayed <= score);
            prop_assert!(decayed >= 0.0);
            prop_assert!(multiplier > 0.0 && multiplier <= 1.0);
        }

        #[test]
        fn older_never_scores_higher(score in 0.0f64..=100.0, a in 0.0f64..500.0, b in 0.0f64..500.0) {
            let s = AgeDecaySchedule::default();
            let (young, old) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(decay(score, Some(old), &s).0 <= decay(score, Some(young), &s).0);
        }
    }
}
