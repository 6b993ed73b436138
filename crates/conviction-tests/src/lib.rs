//! Integration test suite for conviction scoring.
//!
//! Cross-crate tests that drive the engine end to end through realistic
//! market scenarios, randomized snapshots and concurrent callers.

pub mod helpers;
