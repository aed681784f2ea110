//! # Analysis Module
//!
//! Derived analytics over normalized play-by-play.
//!
//! ## Submodules
//!
//! - `events` - Event classifiers (royal road, rush, zone entry, momentum, coverage)
//! - `metrics` - Per-game aggregates, rolling windows, trends, movement fingerprints
//! - `report` - One-call analysis of a single game

pub mod events;
pub mod metrics;
pub mod report;

pub use report::{analyze_game, GameAnalysis};
