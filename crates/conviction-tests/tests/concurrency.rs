//! Concurrent scoring tests.
//!
//! A single engine instance is shared across threads without locks; every
//! caller must observe bit-identical results to a sequential run.

use std::sync::Arc;
use std::thread;

use conviction_core::traits::ConvictionScorer;
use conviction_core::types::{ScoringResult, SignalSnapshot};
use conviction_engine::ConvictionEngine;
use conviction_tests::helpers::*;
use rayon::prelude::*;

fn snapshots() -> Vec<SignalSnapshot> {
    let mut all = vec![
        strong_launch(),
        wash_traded(),
        rug_setup(),
        modest_amplified(),
        audited_but_concentrated(),
        SignalSnapshot::default(),
    ];
    // Sweep ages and liquidity to cover every decay tier and several rule paths.
    for i in 0..60u32 {
        all.push(SignalSnapshot {
            token_age_minutes: Some(f64::from(i) * 4.0),
            liquidity_usd: Some(20_000.0 + f64::from(i) * 15_000.0),
            ..strong_launch()
        });
    }
    all
}

fn assert_bit_identical(a: &ScoringResult, b: &ScoringResult) {
    assert_eq!(a.base_score.to_bits(), b.base_score.to_bits());
    assert_eq!(a.adjusted_score.to_bits(), b.adjusted_score.to_bits());
    assert_eq!(a.final_score.to_bits(), b.final_score.to_bits());
    assert_eq!(a.confidence.to_bits(), b.confidence.to_bits());
    assert_eq!(a, b);
}

#[test]
fn shared_engine_across_threads() {
    let engine = Arc::new(ConvictionEngine::new());
    let inputs = Arc::new(snapshots());
    let expected: Vec<_> = inputs.iter().map(|s| engine.score(s)).collect();

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let engine = Arc::clone(&engine);
            let inputs = Arc::clone(&inputs);
            thread::spawn(move || inputs.iter().map(|s| engine.score(s)).collect::<Vec<_>>())
        })
        .collect();

    for handle in handles {
        let results = handle.join().unwrap();
        for (got, want) in results.iter().zip(&expected) {
            assert_bit_identical(got, want);
        }
    }
}

#[test]
fn scoped_threads_borrow_engine() {
    const CHUNK: usize = 7;

    let engine = ConvictionEngine::new();
    let inputs = snapshots();
    let expected = engine.score_all(&inputs);

    thread::scope(|scope| {
        for (n, chunk) in inputs.chunks(CHUNK).enumerate() {
            let engine = &engine;
            let expected = &expected[n * CHUNK..];
            scope.spawn(move || {
                for (s, want) in chunk.iter().zip(expected) {
                    assert_bit_identical(&engine.score(s), want);
                }
            });
        }
    });
}

#[test]
fn rayon_parallel_matches_sequential() {
    let engine = ConvictionEngine::new();
    let inputs = snapshots();
    let sequential = engine.score_all(&inputs);
    let parallel: Vec<_> = inputs.par_iter().map(|s| engine.score(s)).collect();
    assert_eq!(sequential.len(), parallel.len());
    for (a, b) in sequential.iter().zip(&parallel) {
        assert_bit_identical(a, b);
    }
}

#[test]
fn trait_object_shared_across_threads() {
    let scorer: Arc<dyn ConvictionScorer> = Arc::new(ConvictionEngine::new());
    let snapshot = wash_traded();
    let expected = scorer.score(&snapshot);

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let scorer = Arc::clone(&scorer);
            let snapshot = snapshot.clone();
            thread::spawn(move || scorer.score(&snapshot))
        })
        .collect();
    for handle in handles {
        assert_bit_identical(&handle.join().unwrap(), &expected);
    }
}
