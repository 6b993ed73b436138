//! Core data model: input snapshots, normalized factors, component scores,
//! interactions and the scoring result.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::MAX_SCORE;
use crate::error::ConvictionError;

// ---------------------------------------------------------------------------
// Clamping helpers
// ---------------------------------------------------------------------------

/// Clamp `value` into `[0, max]`, mapping NaN to 0.
///
/// A non-finite or negative `max` is treated as 0. Never panics.
///
/// # Examples
///
/// ```
/// use conviction_core::types::clamp_to;
///
/// assert_eq!(clamp_to(12.5, 10.0), 10.0);
/// assert_eq!(clamp_to(-3.0, 10.0), 0.0);
/// assert_eq!(clamp_to(f64::NAN, 10.0), 0.0);
/// assert_eq!(clamp_to(f64::INFINITY, 10.0), 10.0);
/// ```
pub fn clamp_to(value: f64, max: f64) -> f64 {
    let max = if max.is_finite() && max > 0.0 { max } else { 0.0 };
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, max)
}

/// Clamp a factor value into `[0, 1]`.
pub fn clamp_unit(value: f64) -> f64 {
    clamp_to(value, 1.0)
}

/// Clamp a score into `[0, MAX_SCORE]`.
pub fn clamp_score(value: f64) -> f64 {
    clamp_to(value, MAX_SCORE)
}

// ---------------------------------------------------------------------------
// SignalSnapshot
// ---------------------------------------------------------------------------

/// Price change timeframes reported by the enrichment collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Timeframe {
    M5,
    H1,
    H6,
    H24,
}

impl Timeframe {
    /// All timeframes, shortest first.
    pub const ALL: [Timeframe; 4] = [Timeframe::M5, Timeframe::H1, Timeframe::H6, Timeframe::H24];

    /// Position of this timeframe in [`Timeframe::ALL`].
    pub fn index(self) -> usize {
        match self {
            Self::M5 => 0,
            Self::H1 => 1,
            Self::H6 => 2,
            Self::H24 => 3,
        }
    }

    /// The per-timeframe price factor.
    pub fn factor(self) -> Factor {
        match self {
            Self::M5 => Factor::PriceChangeM5,
            Self::H1 => Factor::PriceChangeH1,
            Self::H6 => Factor::PriceChangeH6,
            Self::H24 => Factor::PriceChangeH24,
        }
    }
}

/// Percentage price changes by timeframe.
///
/// `Some(0.0)` is a flat price; `None` means no data for that timeframe.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PriceChanges {
    pub m5: Option<f64>,
    pub h1: Option<f64>,
    pub h6: Option<f64>,
    pub h24: Option<f64>,
}

impl PriceChanges {
    /// Price change for one timeframe.
    pub fn get(&self, timeframe: Timeframe) -> Option<f64> {
        match timeframe {
            Timeframe::M5 => self.m5,
            Timeframe::H1 => self.h1,
            Timeframe::H6 => self.h6,
            Timeframe::H24 => self.h24,
        }
    }
}

/// Raw market signals for one candidate, as supplied by the caller.
///
/// Every field is optional. For `liquidity_usd`, `volume_24h_usd`, `vlr`,
/// `whale_concentration_pct`, `security_score_pct`, the price changes and
/// `token_age_minutes`, absence means *unknown* and is never read as zero.
/// For `smart_money_detected`, `origin_detected` and `cross_platform_count`,
/// absence means "not observed", which is the same as `false` / `0`.
///
/// Non-finite values, and negative values for quantities that cannot be
/// negative, are treated as unknown.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SignalSnapshot {
    pub liquidity_usd: Option<f64>,
    pub volume_24h_usd: Option<f64>,
    /// Volume/liquidity ratio. Derived from volume and liquidity when absent.
    pub vlr: Option<f64>,
    pub whale_concentration_pct: Option<f64>,
    pub security_score_pct: Option<f64>,
    pub smart_money_detected: Option<bool>,
    pub cross_platform_count: Option<u32>,
    pub price_change_pct: PriceChanges,
    /// Minutes since the token launched. Supplied by the caller, never read from a clock.
    pub token_age_minutes: Option<f64>,
    /// The candidate was seen on its launch/origin platform.
    pub origin_detected: Option<bool>,
}

fn non_negative(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite() && *v >= 0.0)
}

impl SignalSnapshot {
    /// Decode a snapshot from JSON. Unknown fields are rejected.
    pub fn from_json(json: &str) -> Result<Self, ConvictionError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Liquidity in USD, if known and well-formed.
    pub fn known_liquidity(&self) -> Option<f64> {
        non_negative(self.liquidity_usd)
    }

    /// 24h volume in USD, if known and well-formed.
    pub fn known_volume(&self) -> Option<f64> {
        non_negative(self.volume_24h_usd)
    }

    /// The volume/liquidity ratio: the supplied value, or `volume / liquidity`
    /// when both are known. Trading volume on an empty pool saturates to
    /// infinity; zero volume on an empty pool stays unknown.
    ///
    /// # Examples
    ///
    /// ```
    /// use conviction_core::types::SignalSnapshot;
    ///
    /// let s = SignalSnapshot {
    ///     liquidity_usd: Some(50_000.0),
    ///     volume_24h_usd: Some(250_000.0),
    ///     ..Default::default()
    /// };
    /// assert_eq!(s.effective_vlr(), Some(5.0));
    ///
    /// let zero_liq = SignalSnapshot {
    ///     liquidity_usd: Some(0.0),
    ///     volume_24h_usd: Some(250_000.0),
    ///     ..Default::default()
    /// };
    /// assert_eq!(zero_liq.effective_vlr(), Some(f64::INFINITY));
    ///
    /// let idle = SignalSnapshot {
    ///     liquidity_usd: Some(0.0),
    ///     volume_24h_usd: Some(0.0),
    ///     ..Default::default()
    /// };
    /// assert_eq!(idle.effective_vlr(), None);
    /// ```
    pub fn effective_vlr(&self) -> Option<f64> {
        if let Some(vlr) = non_negative(self.vlr) {
            return Some(vlr);
        }
        match (self.known_volume(), self.known_liquidity()) {
            (Some(volume), Some(liquidity)) if liquidity > 0.0 => Some(volume / liquidity),
            (Some(volume), Some(_)) if volume > 0.0 => Some(f64::INFINITY),
            _ => None,
        }
    }

    /// Whale concentration percentage, if known and well-formed.
    pub fn known_whale_concentration(&self) -> Option<f64> {
        non_negative(self.whale_concentration_pct)
    }

    /// Security score percentage, if known and well-formed.
    pub fn known_security_score(&self) -> Option<f64> {
        non_negative(self.security_score_pct)
    }

    /// Price change for a timeframe, if known and finite. Negative values are kept.
    pub fn known_price_change(&self, timeframe: Timeframe) -> Option<f64> {
        self.price_change_pct.get(timeframe).filter(|v| v.is_finite())
    }

    /// Token age in minutes, if known and well-formed.
    pub fn known_age_minutes(&self) -> Option<f64> {
        non_negative(self.token_age_minutes)
    }
}

// ---------------------------------------------------------------------------
// Factors
// ---------------------------------------------------------------------------

/// A named normalized factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Factor {
    VlrRatio,
    Liquidity,
    VolumeMomentum,
    CrossPlatformValidation,
    WhaleConcentration,
    SecurityScore,
    SmartMoneyScore,
    OriginSignal,
    PriceChangeM5,
    PriceChangeH1,
    PriceChangeH6,
    PriceChangeH24,
}

impl Factor {
    /// Every factor, in declaration order.
    pub const ALL: [Factor; 12] = [
        Factor::VlrRatio,
        Factor::Liquidity,
        Factor::VolumeMomentum,
        Factor::CrossPlatformValidation,
        Factor::WhaleConcentration,
        Factor::SecurityScore,
        Factor::SmartMoneyScore,
        Factor::OriginSignal,
        Factor::PriceChangeM5,
        Factor::PriceChangeH1,
        Factor::PriceChangeH6,
        Factor::PriceChangeH24,
    ];

    /// Snake-case name, matching the serialized form.
    pub fn name(self) -> &'static str {
        match self {
            Self::VlrRatio => "vlr_ratio",
            Self::Liquidity => "liquidity",
            Self::VolumeMomentum => "volume_momentum",
            Self::CrossPlatformValidation => "cross_platform_validation",
            Self::WhaleConcentration => "whale_concentration",
            Self::SecurityScore => "security_score",
            Self::SmartMoneyScore => "smart_money_score",
            Self::OriginSignal => "origin_signal",
            Self::PriceChangeM5 => "price_change_m5",
            Self::PriceChangeH1 => "price_change_h1",
            Self::PriceChangeH6 => "price_change_h6",
            Self::PriceChangeH24 => "price_change_h24",
        }
    }
}

impl fmt::Display for Factor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Normalized factors. A factor with no entry is *unknown*.
///
/// # Invariants
///
/// * Every stored value is in `[0, 1]` (enforced by [`FactorValues::set`]).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FactorValues {
    values: BTreeMap<Factor, f64>,
}

impl FactorValues {
    /// An empty set: every factor unknown.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a factor, clamped into `[0, 1]`.
    ///
    /// # Examples
    ///
    /// ```
    /// use conviction_core::types::{Factor, FactorValues};
    ///
    /// let mut f = FactorValues::new();
    /// f.set(Factor::Liquidity, 3.0);
    /// assert_eq!(f.get(Factor::Liquidity), Some(1.0));
    /// assert_eq!(f.get(Factor::SecurityScore), None);
    /// ```
    pub fn set(&mut self, factor: Factor, value: f64) {
        self.values.insert(factor, clamp_unit(value));
    }

    /// Builder-style [`FactorValues::set`].
    pub fn with(mut self, factor: Factor, value: f64) -> Self {
        self.set(factor, value);
        self
    }

    /// The factor value, or `None` when unknown.
    pub fn get(&self, factor: Factor) -> Option<f64> {
        self.values.get(&factor).copied()
    }

    /// Whether the factor is known.
    pub fn is_known(&self, factor: Factor) -> bool {
        self.values.contains_key(&factor)
    }

    /// Number of known factors.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether every factor is unknown.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Known factors in [`Factor`] order.
    pub fn iter(&self) -> impl Iterator<Item = (Factor, f64)> + '_ {
        self.values.iter().map(|(k, v)| (*k, *v))
    }
}

// ---------------------------------------------------------------------------
// Component scores
// ---------------------------------------------------------------------------

/// The scoring components that make up the base score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Component {
    Origin,
    Momentum,
    Safety,
    CrossValidation,
}

impl Component {
    /// Components in composition order.
    pub const ALL: [Component; 4] = [
        Component::Origin,
        Component::Momentum,
        Component::Safety,
        Component::CrossValidation,
    ];
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Origin => "origin",
            Self::Momentum => "momentum",
            Self::Safety => "safety",
            Self::CrossValidation => "cross_validation",
        };
        f.write_str(name)
    }
}

/// One sub-bonus of a component, already clamped to its own cap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BonusScore {
    pub name: String,
    pub value: f64,
    pub cap: f64,
}

impl BonusScore {
    /// Clamp `raw` into `[0, cap]` and record it under `name`.
    ///
    /// # Examples
    ///
    /// ```
    /// use conviction_core::types::BonusScore;
    ///
    /// let b = BonusScore::capped("price_cascade", 16.0, 12.0);
    /// assert_eq!(b.value, 12.0);
    /// ```
    pub fn capped(name: impl Into<String>, raw: f64, cap: f64) -> Self {
        Self {
            name: name.into(),
            value: clamp_to(raw, cap),
            cap: clamp_to(cap, f64::MAX),
        }
    }

    /// A bonus whose inputs were unknown: scores zero.
    pub fn excluded(name: impl Into<String>, cap: f64) -> Self {
        Self::capped(name, 0.0, cap)
    }
}

/// A component's point value.
///
/// # Invariants
///
/// * `0 <= value <= max`
/// * every bonus satisfies `0 <= bonus.value <= bonus.cap`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentScore {
    pub component: Component,
    pub value: f64,
    pub max: f64,
    pub bonuses: Vec<BonusScore>,
}

impl ComponentScore {
    /// Sum pre-capped bonuses and clamp the total to `max`.
    ///
    /// This is the second level of anti-stacking: each bonus is already
    /// within its own cap, and the sum cannot exceed the component maximum.
    ///
    /// # Examples
    ///
    /// ```
    /// use conviction_core::types::{BonusScore, Component, ComponentScore};
    ///
    /// let bonuses = (0..5)
    ///     .map(|i| BonusScore::capped(format!("platform_{i}"), 20.0, 14.0))
    ///     .collect();
    /// let score = ComponentScore::from_bonuses(Component::Origin, 50.0, bonuses);
    /// assert_eq!(score.raw_total(), 70.0);
    /// assert_eq!(score.value, 50.0);
    /// ```
    pub fn from_bonuses(component: Component, max: f64, bonuses: Vec<BonusScore>) -> Self {
        let max = clamp_to(max, f64::MAX);
        let sum: f64 = bonuses.iter().map(|b| b.value).sum();
        Self {
            component,
            value: clamp_to(sum, max),
            max,
            bonuses,
        }
    }

    /// Sum of the capped bonuses before the component cap.
    pub fn raw_total(&self) -> f64 {
        self.bonuses.iter().map(|b| b.value).sum()
    }
}

// ---------------------------------------------------------------------------
// Interactions
// ---------------------------------------------------------------------------

/// How an interaction bears on the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InteractionKind {
    /// Compounding risk.
    Danger,
    /// Compounding opportunity.
    Amplification,
    /// Conflicting signals.
    Contradiction,
    /// A pattern visible only in the combination of otherwise unremarkable signals.
    Emergent,
}

/// Risk severity, ordered from least to most severe.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskLevel {
    #[default]
    Low,
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    /// Weight of this severity in the confidence average.
    ///
    /// # Examples
    ///
    /// ```
    /// use conviction_core::types::RiskLevel;
    ///
    /// assert_eq!(RiskLevel::Critical.severity_weight(), 3.0);
    /// assert_eq!(RiskLevel::Low.severity_weight(), 1.0);
    /// ```
    pub fn severity_weight(self) -> f64 {
        let weights = crate::constants::SEVERITY_WEIGHTS;
        match self {
            Self::Low => weights[0],
            Self::Medium => weights[1],
            Self::High => weights[2],
            Self::Critical => weights[3],
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
            Self::Critical => "CRITICAL",
        };
        f.write_str(name)
    }
}

/// The closed set of interaction rules, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractionRule {
    ManipulationPattern,
    RugPullSetup,
    BotDrivenVolume,
    SmartMoneySurge,
    TripleValidation,
    OptimalRange,
    SecurityWhaleMismatch,
    VolumeValidationMismatch,
    StealthAccumulation,
}

impl InteractionRule {
    /// The fixed rule registry, in evaluation order.
    pub const ALL: [InteractionRule; 9] = [
        InteractionRule::ManipulationPattern,
        InteractionRule::RugPullSetup,
        InteractionRule::BotDrivenVolume,
        InteractionRule::SmartMoneySurge,
        InteractionRule::TripleValidation,
        InteractionRule::OptimalRange,
        InteractionRule::SecurityWhaleMismatch,
        InteractionRule::VolumeValidationMismatch,
        InteractionRule::StealthAccumulation,
    ];

    pub fn kind(self) -> InteractionKind {
        match self {
            Self::ManipulationPattern | Self::RugPullSetup | Self::BotDrivenVolume => {
                InteractionKind::Danger
            }
            Self::SmartMoneySurge | Self::TripleValidation | Self::OptimalRange => {
                InteractionKind::Amplification
            }
            Self::SecurityWhaleMismatch | Self::VolumeValidationMismatch => {
                InteractionKind::Contradiction
            }
            Self::StealthAccumulation => InteractionKind::Emergent,
        }
    }

    pub fn risk_level(self) -> RiskLevel {
        match self {
            Self::ManipulationPattern | Self::RugPullSetup => RiskLevel::Critical,
            Self::BotDrivenVolume => RiskLevel::High,
            Self::SecurityWhaleMismatch | Self::VolumeValidationMismatch => RiskLevel::Medium,
            Self::SmartMoneySurge
            | Self::TripleValidation
            | Self::OptimalRange
            | Self::StealthAccumulation => RiskLevel::Low,
        }
    }

    /// Whether a firing of this rule replaces normal scoring entirely.
    ///
    /// Only critical dangers override.
    pub fn is_override(self) -> bool {
        matches!(self, Self::ManipulationPattern | Self::RugPullSetup)
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::ManipulationPattern => "manipulation_pattern",
            Self::RugPullSetup => "rug_pull_setup",
            Self::BotDrivenVolume => "bot_driven_volume",
            Self::SmartMoneySurge => "smart_money_surge",
            Self::TripleValidation => "triple_validation",
            Self::OptimalRange => "optimal_range",
            Self::SecurityWhaleMismatch => "security_whale_mismatch",
            Self::VolumeValidationMismatch => "volume_validation_mismatch",
            Self::StealthAccumulation => "stealth_accumulation",
        }
    }
}

impl fmt::Display for InteractionRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A detected relationship between factors.
///
/// # Invariants
///
/// * `override_score` implies `kind == Danger` and `risk_level == Critical`
/// * `confidence` is in `[0, 1]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interaction {
    pub rule: InteractionRule,
    pub kind: InteractionKind,
    pub risk_level: RiskLevel,
    /// Multiplicative score modifier.
    pub modifier: f64,
    #[serde(rename = "override")]
    pub override_score: bool,
    pub confidence: f64,
    pub rationale: String,
}

// ---------------------------------------------------------------------------
// Result
// ---------------------------------------------------------------------------

/// Discrete action derived from the final score and risk level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Recommendation {
    StrongBuy,
    Consider,
    Monitor,
    Pass,
    Avoid,
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::StrongBuy => "STRONG_BUY",
            Self::Consider => "CONSIDER",
            Self::Monitor => "MONITOR",
            Self::Pass => "PASS",
            Self::Avoid => "AVOID",
        };
        f.write_str(name)
    }
}

/// The outcome of scoring one snapshot. Built fresh per call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringResult {
    /// Rescaled sum of component scores, in `[0, 100]`.
    pub base_score: f64,
    pub components: Vec<ComponentScore>,
    /// Interactions in detection order.
    pub interactions: Vec<Interaction>,
    /// Score after interaction modifiers, before age decay.
    pub adjusted_score: f64,
    pub age_multiplier: f64,
    /// Conviction score in `[0, 100]`.
    pub final_score: f64,
    pub risk_level: RiskLevel,
    pub confidence: f64,
    pub recommendation: Recommendation,
}

impl ScoringResult {
    /// The override interaction, if one fired.
    pub fn override_interaction(&self) -> Option<&Interaction> {
        self.interactions.iter().find(|i| i.override_score)
    }

    /// Interactions of one kind, in detection order.
    pub fn interactions_of(&self, kind: InteractionKind) -> impl Iterator<Item = &Interaction> {
        self.interactions.iter().filter(move |i| i.kind == kind)
    }
}
