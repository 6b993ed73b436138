//! Factor normalization.
//!
//! Maps a raw [`SignalSnapshot`] onto bounded `[0, 1]` factors using fixed
//! caps. Values above a cap saturate at 1. Signals whose absence is
//! ambiguous (liquidity, volume, VLR, whale concentration, security score,
//! price changes) stay unknown instead of defaulting to zero; signals where
//! absence means "not observed" (smart money, origin sighting, platform
//! count) default to zero.

use conviction_core::constants::{
    CROSS_PLATFORM_CAP, LIQUIDITY_CAP_USD, PERCENT_CAP, PRICE_CHANGE_CAPS_PCT, VLR_CAP,
    VOLUME_CAP_USD,
};
use conviction_core::types::{clamp_unit, Factor, FactorValues, SignalSnapshot, Timeframe};

/// `value / cap`, clamped into `[0, 1]`.
///
/// # Examples
///
/// ```
/// use conviction_engine::normalize::ratio;
///
/// assert_eq!(ratio(10.0, 20.0), 0.5);
/// assert_eq!(ratio(45.0, 20.0), 1.0);
/// assert_eq!(ratio(-3.0, 20.0), 0.0);
/// ```
pub fn ratio(value: f64, cap: f64) -> f64 {
    if cap <= 0.0 {
        return 0.0;
    }
    clamp_unit(value / cap)
}

fn flag(value: Option<bool>) -> f64 {
    if value.unwrap_or(false) { 1.0 } else { 0.0 }
}

/// Normalize a snapshot. Pure and total.
///
/// # Examples
///
/// ```
/// use conviction_core::types::{Factor, SignalSnapshot};
/// use conviction_engine::normalize::normalize;
///
/// let s = SignalSnapshot {
///     vlr: Some(15.2),
///     liquidity_usd: Some(45_000.0),
///     ..Default::default()
/// };
/// let f = normalize(&s);
/// let vlr = f.get(Factor::VlrRatio).unwrap();
/// assert!((vlr - 0.76).abs() < 1e-12);
/// assert_eq!(f.get(Factor::Liquidity), Some(0.045));
/// assert_eq!(f.get(Factor::SecurityScore), None);
/// assert_eq!(f.get(Factor::CrossPlatformValidation), Some(0.0));
/// ```
pub fn normalize(snapshot: &SignalSnapshot) -> FactorValues {
    let mut factors = FactorValues::new();

    if let Some(vlr) = snapshot.effective_vlr() {
        factors.set(Factor::VlrRatio, ratio(vlr, VLR_CAP));
    }
    if let Some(liquidity) = snapshot.known_liquidity() {
        factors.set(Factor::Liquidity, ratio(liquidity, LIQUIDITY_CAP_USD));
    }
    if let Some(volume) = snapshot.known_volume() {
        factors.set(Factor::VolumeMomentum, ratio(volume, VOLUME_CAP_USD));
    }
    if let Some(whale) = snapshot.known_whale_concentration() {
        factors.set(Factor::WhaleConcentration, ratio(whale, PERCENT_CAP));
    }
    if let Some(security) = snapshot.known_security_score() {
        factors.set(Factor::SecurityScore, ratio(security, PERCENT_CAP));
    }

    let platforms = f64::from(snapshot.cross_platform_count.unwrap_or(0));
    factors.set(Factor::CrossPlatformValidation, ratio(platforms, CROSS_PLATFORM_CAP));
    factors.set(Factor::SmartMoneyScore, flag(snapshot.smart_money_detected));
    factors.set(Factor::OriginSignal, flag(snapshot.origin_detected));

    // Falling prices are known data with zero upward momentum.
    for timeframe in Timeframe::ALL {
        if let Some(pct) = snapshot.known_price_change(timeframe) {
            factors.set(
                timeframe.factor(),
                ratio(pct, PRICE_CHANGE_CAPS_PCT[timeframe.index()]),
            );
        }
    }

    factors
}
