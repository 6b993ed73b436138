//! Batch scoring of JSON-lines input.
//!
//! Each input line is a [`BatchEntry`]; each output line is a [`ScoreRecord`]
//! carrying the candidate id and the time the harness scored it.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use conviction_core::traits::ConvictionScorer;
use conviction_core::types::{ScoringResult, SignalSnapshot};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// One candidate to score.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BatchEntry {
    pub candidate: String,
    pub snapshot: SignalSnapshot,
}

/// A scored candidate, ready for an audit store.
#[derive(Debug, Clone, Serialize)]
pub struct ScoreRecord {
    pub candidate: String,
    pub scored_at: DateTime<Utc>,
    pub result: ScoringResult,
}

/// Parse JSON lines into entries. Blank lines are skipped.
pub fn parse_entries(input: &str) -> Result<Vec<BatchEntry>> {
    input
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| {
            serde_json::from_str(line)
                .with_context(|| format!("Invalid batch entry on line {}", index + 1))
        })
        .collect()
}

/// Score entries in parallel, preserving input order.
pub fn score_entries<S: ConvictionScorer>(
    scorer: &S,
    entries: Vec<BatchEntry>,
    scored_at: DateTime<Utc>,
) -> Vec<ScoreRecord> {
    entries
        .into_par_iter()
        .map(|entry| ScoreRecord {
            result: scorer.score(&entry.snapshot),
            candidate: entry.candidate,
            scored_at,
        })
        .collect()
}
