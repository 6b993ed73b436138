//! Shared snapshot builders for scenario and property tests.

use conviction_core::types::{PriceChanges, SignalSnapshot};

/// A strong, clean launch: deep liquidity, healthy turnover, audited,
/// distributed holders, validated across platforms, smart money present.
pub fn strong_launch() -> SignalSnapshot {
    SignalSnapshot {
        liquidity_usd: Some(800_000.0),
        volume_24h_usd: Some(4_000_000.0),
        vlr: None,
        whale_concentration_pct: Some(20.0),
        security_score_pct: Some(90.0),
        smart_money_detected: Some(true),
        cross_platform_count: Some(4),
        price_change_pct: PriceChanges {
            m5: Some(15.0),
            h1: Some(40.0),
            h6: Some(80.0),
            h24: Some(150.0),
        },
        token_age_minutes: Some(3.0),
        origin_detected: Some(true),
    }
}

/// A pumped token: enormous turnover on a thin pool, otherwise attractive.
pub fn wash_traded() -> SignalSnapshot {
    SignalSnapshot {
        vlr: Some(15.2),
        liquidity_usd: Some(45_000.0),
        price_change_pct: PriceChanges {
            m5: Some(20.0),
            h1: Some(50.0),
            h6: Some(50.0),
            h24: Some(100.0),
        },
        ..strong_launch()
    }
}

/// An unaudited contract controlled by a few wallets.
pub fn rug_setup() -> SignalSnapshot {
    SignalSnapshot {
        security_score_pct: Some(20.0),
        whale_concentration_pct: Some(85.0),
        ..strong_launch()
    }
}

/// Moderate candidate with only amplifying signals and room below the clamp.
pub fn modest_amplified() -> SignalSnapshot {
    SignalSnapshot {
        liquidity_usd: Some(600_000.0),
        volume_24h_usd: Some(1_500_000.0),
        vlr: None,
        whale_concentration_pct: Some(25.0),
        security_score_pct: Some(80.0),
        smart_money_detected: Some(false),
        cross_platform_count: Some(3),
        price_change_pct: PriceChanges::default(),
        token_age_minutes: Some(2.0),
        origin_detected: Some(false),
    }
}

/// Audited token held by a handful of whales: contradicting signals only.
pub fn audited_but_concentrated() -> SignalSnapshot {
    SignalSnapshot {
        liquidity_usd: Some(300_000.0),
        volume_24h_usd: Some(150_000.0),
        vlr: None,
        whale_concentration_pct: Some(70.0),
        security_score_pct: Some(92.0),
        smart_money_detected: Some(false),
        cross_platform_count: Some(2),
        price_change_pct: PriceChanges {
            h1: Some(10.0),
            ..Default::default()
        },
        token_age_minutes: Some(4.0),
        origin_detected: Some(true),
    }
}
