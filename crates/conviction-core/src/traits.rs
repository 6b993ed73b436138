//! Trait interfaces for conviction scoring.
//!
//! [`ConvictionScorer`] is the contract between the engine crate
//! (conviction-engine implements it) and its callers: the CLI harness, alert
//! dispatchers and audit stores that consume [`ScoringResult`]s.

use crate::config::ScoringConfig;
use crate::types::{ComponentScore, FactorValues, Interaction, ScoringResult, SignalSnapshot};

/// Pure, total scoring of signal snapshots.
///
/// Implementations hold only immutable configuration, perform no I/O and
/// never panic, so a single instance can be shared across threads and called
/// concurrently without synchronization. Identical snapshots always produce
/// identical results.
pub trait ConvictionScorer: Send + Sync {
    /// The configuration this scorer was built with.
    fn config(&self) -> &ScoringConfig;

    /// Normalize raw signals into bounded factors. Unknown signals stay unknown.
    fn normalize(&self, snapshot: &SignalSnapshot) -> FactorValues;

    /// Score every component from normalized factors.
    fn score_components(&self, factors: &FactorValues) -> Vec<ComponentScore>;

    /// Detect interactions among normalized factors, in rule order.
    fn detect(&self, factors: &FactorValues) -> Vec<Interaction>;

    /// Score one snapshot end to end.
    fn score(&self, snapshot: &SignalSnapshot) -> ScoringResult;

    /// Score several snapshots, preserving input order.
    ///
    /// Default implementation scores sequentially.
    fn score_all(&self, snapshots: &[SignalSnapshot]) -> Vec<ScoringResult> {
        snapshots.iter().map(|s| self.score(s)).collect()
    }
}
