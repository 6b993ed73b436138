//! # conviction-core
//! Foundation types, configuration and traits for conviction scoring.

pub mod config;
pub mod constants;
pub mod error;
pub mod traits;
pub mod types;
