//! # rink_core - Hockey Derived-Analytics Engine
//!
//! Turns normalized play-by-play into derived hockey analytics.
//!
//! ## Features
//! - Expected-goals model with configurable coefficients and multipliers
//! - Per-game Corsi / Fenwick / xG aggregation for teams and skaters
//! - Rolling PDO and share metrics with trend detection
//! - Royal-road, rush, zone-entry, momentum and coverage classifiers
//! - Directional movement fingerprints
//! - JSON API for easy integration
//!
//! All analysis functions are synchronous and deterministic: the same events
//! and configuration always produce bit-identical results.

// Doc formatting lints - purely cosmetic, fix incrementally
#![allow(clippy::doc_lazy_continuation)]
// Struct initialization pattern used intentionally
#![allow(clippy::field_reassign_with_default)]
#![allow(clippy::too_many_arguments)]

pub mod analysis;
pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod xg;

// Re-export main API functions
pub use api::{analyze_game_json, analyze_season_json, fingerprint_json, SCHEMA_VERSION};
pub use error::{AnalyticsError, ConfigError, Result, SourceError};

pub use analysis::metrics::{
    aggregate_game, calculate_fingerprint, compute_rolling, GameMetrics, MovementFingerprint,
    MovementSample, RollingMetrics,
};
pub use analysis::{analyze_game, GameAnalysis};
pub use config::AnalyticsConfig;
pub use models::{GameFeed, PlayEvent, Subject};
pub use pipeline::{run_season, CancellationToken, GameSource, SeasonOutcome, SeasonReport, SeasonRequest};
pub use xg::{XgModel, XgScorer};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
