//! # conviction-engine: Deterministic conviction scoring.
//!
//! Turns a [`SignalSnapshot`](conviction_core::types::SignalSnapshot) into a
//! [`ScoringResult`](conviction_core::types::ScoringResult):
//! - **Normalization**: raw signals become bounded `[0, 1]` factors; missing
//!   signals stay unknown rather than reading as zero.
//! - **Component scoring**: four components with two-level anti-stacking caps,
//!   rescaled into a `0–100` base score.
//! - **Interaction detection**: a fixed rule registry of dangers,
//!   amplifications, contradictions and emergent patterns. Critical dangers
//!   override everything else.
//! - **Age decay and classification**: tiered age multiplier, risk level,
//!   severity-weighted confidence and a discrete recommendation.

pub mod classify;
pub mod components;
pub mod compose;
pub mod decay;
pub mod engine;
pub mod interactions;
pub mod normalize;

pub use classify::{classify, Classification};
pub use components::score_components;
pub use compose::{apply_interactions, compose_base};
pub use decay::decay;
pub use engine::ConvictionEngine;
pub use interactions::detect;
pub use normalize::normalize;
