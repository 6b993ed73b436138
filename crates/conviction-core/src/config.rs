//! Scoring configuration.
//!
//! [`ScoringConfig`] collects every tunable threshold, modifier and schedule
//! into one immutable value. The engine receives it at construction time and
//! never reads ambient state. [`ScoringConfig::default`] reproduces the
//! production calibration.
//!
//! All threshold values are in normalized factor units (`[0, 1]`), not raw
//! units: `manipulation_vlr_min = 0.5` means a VLR above `0.5 * VLR_CAP = 10`.

use serde::{Deserialize, Serialize};

use crate::constants::NEUTRAL_AGE_MULTIPLIER;
use crate::error::ConfigError;
use crate::types::{InteractionKind, InteractionRule};

/// Complete engine configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScoringConfig {
    pub thresholds: Thresholds,
    pub modifiers: Modifiers,
    pub confidences: Confidences,
    pub age_decay: AgeDecaySchedule,
    pub recommendation: RecommendationThresholds,
}

impl ScoringConfig {
    /// Check every value for range and ordering errors.
    ///
    /// # Examples
    ///
    /// ```
    /// use conviction_core::config::ScoringConfig;
    ///
    /// assert!(ScoringConfig::default().validate().is_ok());
    ///
    /// let mut bad = ScoringConfig::default();
    /// bad.modifiers.smart_money_surge = 0.5;
    /// assert!(bad.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.thresholds.validate()?;
        self.modifiers.validate()?;
        self.confidences.validate()?;
        self.age_decay.validate()?;
        self.recommendation.validate()
    }
}

// ---------------------------------------------------------------------------
// Thresholds
// ---------------------------------------------------------------------------

/// Factor thresholds for the interaction rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Thresholds {
    pub manipulation_vlr_min: f64,
    pub manipulation_liquidity_max: f64,
    pub rug_pull_security_max: f64,
    pub rug_pull_whale_min: f64,
    pub bot_volume_min: f64,
    pub bot_smart_money_max: f64,
    pub bot_cross_platform_max: f64,
    pub surge_smart_money_min: f64,
    pub surge_volume_min: f64,
    pub triple_cross_platform_min: f64,
    pub triple_security_min: f64,
    pub triple_whale_max: f64,
    pub optimal_vlr_low: f64,
    pub optimal_vlr_high: f64,
    pub optimal_liquidity_min: f64,
    pub mismatch_security_min: f64,
    pub mismatch_whale_min: f64,
    pub volume_mismatch_volume_min: f64,
    pub volume_mismatch_cross_platform_max: f64,
    pub stealth_smart_money_min: f64,
    pub stealth_volume_max: f64,
    pub stealth_whale_max: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            // VLR > 10 with liquidity under $100k
            manipulation_vlr_min: 0.5,
            manipulation_liquidity_max: 0.1,
            rug_pull_security_max: 0.3,
            rug_pull_whale_min: 0.7,
            // volume >= $3.5M, no smart money, fewer than 2 platforms
            bot_volume_min: 0.7,
            bot_smart_money_max: 0.3,
            bot_cross_platform_max: 0.4,
            surge_smart_money_min: 0.6,
            surge_volume_min: 0.6,
            triple_cross_platform_min: 0.6,
            triple_security_min: 0.8,
            triple_whale_max: 0.3,
            // VLR 2..=8 with liquidity of at least $500k
            optimal_vlr_low: 0.1,
            optimal_vlr_high: 0.4,
            optimal_liquidity_min: 0.5,
            mismatch_security_min: 0.8,
            mismatch_whale_min: 0.6,
            volume_mismatch_volume_min: 0.7,
            volume_mismatch_cross_platform_max: 0.2,
            stealth_smart_money_min: 0.6,
            stealth_volume_max: 0.2,
            stealth_whale_max: 0.4,
        }
    }
}

impl Thresholds {
    fn entries(&self) -> [(&'static str, f64); 22] {
        [
            ("manipulation_vlr_min", self.manipulation_vlr_min),
            ("manipulation_liquidity_max", self.manipulation_liquidity_max),
            ("rug_pull_security_max", self.rug_pull_security_max),
            ("rug_pull_whale_min", self.rug_pull_whale_min),
            ("bot_volume_min", self.bot_volume_min),
            ("bot_smart_money_max", self.bot_smart_money_max),
            ("bot_cross_platform_max", self.bot_cross_platform_max),
            ("surge_smart_money_min", self.surge_smart_money_min),
            ("surge_volume_min", self.surge_volume_min),
            ("triple_cross_platform_min", self.triple_cross_platform_min),
            ("triple_security_min", self.triple_security_min),
            ("triple_whale_max", self.triple_whale_max),
            ("optimal_vlr_low", self.optimal_vlr_low),
            ("optimal_vlr_high", self.optimal_vlr_high),
            ("optimal_liquidity_min", self.optimal_liquidity_min),
            ("mismatch_security_min", self.mismatch_security_min),
            ("mismatch_whale_min", self.mismatch_whale_min),
            ("volume_mismatch_volume_min", self.volume_mismatch_volume_min),
            ("volume_mismatch_cross_platform_max", self.volume_mismatch_cross_platform_max),
            ("stealth_smart_money_min", self.stealth_smart_money_min),
            ("stealth_volume_max", self.stealth_volume_max),
            ("stealth_whale_max", self.stealth_whale_max),
        ]
    }

    fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in self.entries() {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::ThresholdOutOfRange { name, value });
            }
        }
        if self.optimal_vlr_low > self.optimal_vlr_high {
            return Err(ConfigError::InvertedBand {
                name: "optimal_vlr",
                low: self.optimal_vlr_low,
                high: self.optimal_vlr_high,
            });
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Per-rule tables
// ---------------------------------------------------------------------------

/// Multiplicative score modifier per interaction rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Modifiers {
    pub manipulation_pattern: f64,
    pub rug_pull_setup: f64,
    pub bot_driven_volume: f64,
    pub smart_money_surge: f64,
    pub triple_validation: f64,
    pub optimal_range: f64,
    pub security_whale_mismatch: f64,
    pub volume_validation_mismatch: f64,
    pub stealth_accumulation: f64,
}

impl Default for Modifiers {
    fn default() -> Self {
        Self {
            manipulation_pattern: 0.05,
            rug_pull_setup: 0.03,
            bot_driven_volume: 0.15,
            smart_money_surge: 1.8,
            triple_validation: 1.6,
            optimal_range: 1.4,
            security_whale_mismatch: 0.7,
            volume_validation_mismatch: 0.65,
            stealth_accumulation: 1.15,
        }
    }
}

impl Modifiers {
    /// The modifier applied when `rule` fires.
    pub fn for_rule(&self, rule: InteractionRule) -> f64 {
        match rule {
            InteractionRule::ManipulationPattern => self.manipulation_pattern,
            InteractionRule::RugPullSetup => self.rug_pull_setup,
            InteractionRule::BotDrivenVolume => self.bot_driven_volume,
            InteractionRule::SmartMoneySurge => self.smart_money_surge,
            InteractionRule::TripleValidation => self.triple_validation,
            InteractionRule::OptimalRange => self.optimal_range,
            InteractionRule::SecurityWhaleMismatch => self.security_whale_mismatch,
            InteractionRule::VolumeValidationMismatch => self.volume_validation_mismatch,
            InteractionRule::StealthAccumulation => self.stealth_accumulation,
        }
    }

    /// Largest modifier among override rules: the ceiling on
    /// `final / base` whenever an override fires.
    pub fn max_override(&self) -> f64 {
        InteractionRule::ALL
            .iter()
            .filter(|r| r.is_override())
            .map(|r| self.for_rule(*r))
            .fold(0.0, f64::max)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        for rule in InteractionRule::ALL {
            let value = self.for_rule(rule);
            let name = rule.name();
            match rule.kind() {
                InteractionKind::Danger | InteractionKind::Contradiction => {
                    if !(value > 0.0 && value <= 1.0) {
                        return Err(ConfigError::DampeningModifier { name, value });
                    }
                }
                InteractionKind::Amplification | InteractionKind::Emergent => {
                    if !(value > 1.0 && value.is_finite()) {
                        return Err(ConfigError::BoostingModifier { name, value });
                    }
                }
            }
        }
        Ok(())
    }
}

/// Confidence attached to each interaction rule when it fires.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Confidences {
    pub manipulation_pattern: f64,
    pub rug_pull_setup: f64,
    pub bot_driven_volume: f64,
    pub smart_money_surge: f64,
    pub triple_validation: f64,
    pub optimal_range: f64,
    pub security_whale_mismatch: f64,
    pub volume_validation_mismatch: f64,
    pub stealth_accumulation: f64,
}

impl Default for Confidences {
    fn default() -> Self {
        Self {
            manipulation_pattern: 0.90,
            rug_pull_setup: 0.95,
            bot_driven_volume: 0.75,
            smart_money_surge: 0.80,
            triple_validation: 0.85,
            optimal_range: 0.70,
            security_whale_mismatch: 0.60,
            volume_validation_mismatch: 0.60,
            stealth_accumulation: 0.55,
        }
    }
}

impl Confidences {
    pub fn for_rule(&self, rule: InteractionRule) -> f64 {
        match rule {
            InteractionRule::ManipulationPattern => self.manipulation_pattern,
            InteractionRule::RugPullSetup => self.rug_pull_setup,
            InteractionRule::BotDrivenVolume => self.bot_driven_volume,
            InteractionRule::SmartMoneySurge => self.smart_money_surge,
            InteractionRule::TripleValidation => self.triple_validation,
            InteractionRule::OptimalRange => self.optimal_range,
            InteractionRule::SecurityWhaleMismatch => self.security_whale_mismatch,
            InteractionRule::VolumeValidationMismatch => self.volume_validation_mismatch,
            InteractionRule::StealthAccumulation => self.stealth_accumulation,
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        for rule in InteractionRule::ALL {
            let value = self.for_rule(rule);
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::ConfidenceOutOfRange { name: rule.name(), value });
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Age decay
// ---------------------------------------------------------------------------

/// One age tier: tokens aged at most `max_age_minutes` keep `multiplier` of their score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DecayTier {
    pub max_age_minutes: f64,
    pub multiplier: f64,
}

/// Tiered age decay. Tokens older than every tier receive `floor_multiplier`.
/// Tokens of unknown age are not decayed.
///
/// | Age (minutes) | Multiplier |
/// |---------------|------------|
/// | ≤ 5           | 1.00       |
/// | ≤ 15          | 0.90       |
/// | ≤ 30          | 0.80       |
/// | ≤ 60          | 0.70       |
/// | ≤ 180         | 0.60       |
/// | older         | 0.50       |
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AgeDecaySchedule {
    pub floor_multiplier: f64,
    pub tiers: Vec<DecayTier>,
}

impl Default for AgeDecaySchedule {
    fn default() -> Self {
        let tier = |max_age_minutes, multiplier| DecayTier {
            max_age_minutes,
            multiplier,
        };
        Self {
            floor_multiplier: 0.50,
            tiers: vec![
                tier(5.0, 1.00),
                tier(15.0, 0.90),
                tier(30.0, 0.80),
                tier(60.0, 0.70),
                tier(180.0, 0.60),
            ],
        }
    }
}

impl AgeDecaySchedule {
    /// Multiplier for a token of the given age, or
    /// [`NEUTRAL_AGE_MULTIPLIER`] when the age is unknown.
    ///
    /// # Examples
    ///
    /// ```
    /// use conviction_core::config::AgeDecaySchedule;
    ///
    /// let s = AgeDecaySchedule::default();
    /// assert_eq!(s.multiplier_for(Some(0.0)), 1.0);
    /// assert_eq!(s.multiplier_for(Some(5.0)), 1.0);
    /// assert_eq!(s.multiplier_for(Some(5.5)), 0.9);
    /// assert_eq!(s.multiplier_for(Some(1_000.0)), 0.5);
    /// assert_eq!(s.multiplier_for(None), 1.0);
    /// ```
    pub fn multiplier_for(&self, age_minutes: Option<f64>) -> f64 {
        let Some(age) = age_minutes else {
            return NEUTRAL_AGE_MULTIPLIER;
        };
        self.tiers
            .iter()
            .find(|t| age <= t.max_age_minutes)
            .map(|t| t.multiplier)
            .unwrap_or(self.floor_multiplier)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.tiers.is_empty() {
            return Err(ConfigError::EmptyDecaySchedule);
        }
        let mut previous = f64::NEG_INFINITY;
        for (index, tier) in self.tiers.iter().enumerate() {
            if !(tier.max_age_minutes > previous && tier.max_age_minutes.is_finite()) {
                return Err(ConfigError::DecayTierOrder {
                    index,
                    max_age: tier.max_age_minutes,
                    previous,
                });
            }
            check_multiplier(tier.multiplier)?;
            previous = tier.max_age_minutes;
        }
        check_multiplier(self.floor_multiplier)
    }
}

fn check_multiplier(value: f64) -> Result<(), ConfigError> {
    if value > 0.0 && value <= 1.0 {
        Ok(())
    } else {
        Err(ConfigError::DecayMultiplier { value })
    }
}

// ---------------------------------------------------------------------------
// Recommendation
// ---------------------------------------------------------------------------

/// Score thresholds (strictly-greater-than) for each recommendation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RecommendationThresholds {
    pub strong_buy: f64,
    pub consider: f64,
    pub monitor: f64,
}

impl Default for RecommendationThresholds {
    fn default() -> Self {
        Self {
            strong_buy: 85.0,
            consider: 70.0,
            monitor: 50.0,
        }
    }
}

impl RecommendationThresholds {
    fn validate(&self) -> Result<(), ConfigError> {
        let ordered = self.strong_buy <= 100.0
            && self.strong_buy >= self.consider
            && self.consider >= self.monitor
            && self.monitor >= 0.0;
        if ordered {
            Ok(())
        } else {
            Err(ConfigError::RecommendationOrder {
                strong_buy: self.strong_buy,
                consider: self.consider,
                monitor: self.monitor,
            })
        }
    }
}
