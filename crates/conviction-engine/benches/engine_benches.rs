//! Criterion benchmarks for conviction-engine hot paths.
//!
//! Covers: normalization, interaction detection and the full scoring pipeline.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use conviction_core::config::ScoringConfig;
use conviction_core::traits::ConvictionScorer;
use conviction_core::types::{PriceChanges, SignalSnapshot};
use conviction_engine::engine::ConvictionEngine;
use conviction_engine::interactions::detect;
use conviction_engine::normalize::normalize;

fn snapshot() -> SignalSnapshot {
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
        token_age_minutes: Some(12.0),
        origin_detected: Some(true),
    }
}

fn bench_normalize(c: &mut Criterion) {
    let s = snapshot();
    c.bench_function("normalize", |b| b.iter(|| normalize(black_box(&s))));
}

fn bench_detect(c: &mut Criterion) {
    let factors = normalize(&snapshot());
    let config = ScoringConfig::default();
    c.bench_function("detect_interactions", |b| {
        b.iter(|| detect(black_box(&factors), black_box(&config)))
    });
}

fn bench_score(c: &mut Criterion) {
    let engine = ConvictionEngine::new();
    let s = snapshot();
    c.bench_function("score_snapshot", |b| b.iter(|| engine.score(black_box(&s))));
}

fn bench_score_manipulated(c: &mut Criterion) {
    // Override path short-circuits detection.
    let engine = ConvictionEngine::new();
    let s = SignalSnapshot {
        vlr: Some(15.2),
        liquidity_usd: Some(45_000.0),
        ..snapshot()
    };
    c.bench_function("score_snapshot_override", |b| {
        b.iter(|| engine.score(black_box(&s)))
    });
}

criterion_group!(
    benches,
    bench_normalize,
    bench_detect,
    bench_score,
    bench_score_manipulated,
);
criterion_main!(benches);
