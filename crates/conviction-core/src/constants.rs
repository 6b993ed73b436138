//! Scoring constants. Scores are points on a `0–100` scale; factors are
//! dimensionless values in `[0, 1]`.

// ---------------------------------------------------------------------------
// Score bounds
// ---------------------------------------------------------------------------

/// Upper bound of every public score (base, adjusted and final).
pub const MAX_SCORE: f64 = 100.0;

/// Lower bound of every public score.
pub const MIN_SCORE: f64 = 0.0;

// ---------------------------------------------------------------------------
// Normalization caps
// ---------------------------------------------------------------------------

/// Volume/liquidity ratio at which [`crate::types::Factor::VlrRatio`] saturates.
pub const VLR_CAP: f64 = 20.0;

/// Liquidity (USD) at which [`crate::types::Factor::Liquidity`] saturates.
pub const LIQUIDITY_CAP_USD: f64 = 1_000_000.0;

/// 24h volume (USD) at which [`crate::types::Factor::VolumeMomentum`] saturates.
pub const VOLUME_CAP_USD: f64 = 5_000_000.0;

/// Platform count at which cross-platform validation saturates.
pub const CROSS_PLATFORM_CAP: f64 = 5.0;

/// Percentage scale shared by whale concentration and security score.
pub const PERCENT_CAP: f64 = 100.0;

/// Price change (percent) at which each timeframe saturates: 5m, 1h, 6h, 24h.
pub const PRICE_CHANGE_CAPS_PCT: [f64; 4] = [20.0, 50.0, 100.0, 200.0];

// ---------------------------------------------------------------------------
// Component budgets
// ---------------------------------------------------------------------------

/// Maximum points of the origin component.
pub const ORIGIN_MAX: f64 = 20.0;
/// Cap of the origin detection sub-bonus (origin sighting + smart money).
pub const ORIGIN_DETECTION_CAP: f64 = 12.0;
/// Points for an origin-platform sighting, before the detection cap.
pub const ORIGIN_SIGHTING_POINTS: f64 = 8.0;
/// Points for smart-money detection inside the origin component.
pub const ORIGIN_SMART_MONEY_POINTS: f64 = 6.0;
/// Cap of the early price velocity sub-bonus.
pub const ORIGIN_VELOCITY_CAP: f64 = 8.0;

/// Maximum points of the momentum component.
pub const MOMENTUM_MAX: f64 = 30.0;
/// Cap of the volume acceleration sub-bonus.
pub const MOMENTUM_VOLUME_CAP: f64 = 12.0;
/// Cap of the multi-timeframe price cascade sub-bonus.
pub const MOMENTUM_CASCADE_CAP: f64 = 12.0;
/// Points available per positive timeframe in the price cascade.
pub const MOMENTUM_CASCADE_POINTS_PER_TIMEFRAME: f64 = 4.0;
/// Cap of the trading activity surge sub-bonus.
pub const MOMENTUM_ACTIVITY_CAP: f64 = 6.0;

/// Normalized VLR band (inclusive) that earns the full activity surge bonus.
/// Corresponds to a raw VLR of 2–8.
pub const ACTIVITY_VLR_BAND: (f64, f64) = (0.1, 0.4);

/// Maximum points of the safety component.
pub const SAFETY_MAX: f64 = 25.0;
/// Cap of the security score sub-bonus.
pub const SAFETY_SECURITY_CAP: f64 = 15.0;
/// Cap of the liquidity presence sub-bonus.
pub const SAFETY_LIQUIDITY_CAP: f64 = 10.0;

/// Maximum points of the cross-validation component.
pub const CROSS_VALIDATION_MAX: f64 = 25.0;
/// Cap of the platform count sub-bonus.
pub const CROSS_PLATFORM_BONUS_CAP: f64 = 15.0;
/// Points per validating platform, before the platform cap.
pub const CROSS_PLATFORM_POINTS_PER_PLATFORM: f64 = 3.0;
/// Points for smart-money corroboration inside cross-validation.
pub const CROSS_SMART_MONEY_POINTS: f64 = 3.0;
/// Cap of the whale distribution health sub-bonus.
pub const WHALE_HEALTH_CAP: f64 = 10.0;

/// Sum of all component maxima. The base composer rescales against this.
pub const COMPONENT_TOTAL: f64 = ORIGIN_MAX + MOMENTUM_MAX + SAFETY_MAX + CROSS_VALIDATION_MAX;

// ---------------------------------------------------------------------------
// Classifier
// ---------------------------------------------------------------------------

/// Confidence reported when no interaction fired.
pub const NEUTRAL_CONFIDENCE: f64 = 0.5;

/// Age multiplier applied when the token age is unknown: no decay.
pub const NEUTRAL_AGE_MULTIPLIER: f64 = 1.0;

/// Severity weights used for the confidence average: Low, Medium, High, Critical.
pub const SEVERITY_WEIGHTS: [f64; 4] = [1.0, 1.5, 2.0, 3.0];
