//! # Pipeline
//!
//! Season-level orchestration over a pluggable [`GameSource`].
//!
//! - `source` - the fetch seam and an in-memory implementation
//! - `cancel` - cooperative cancellation token
//! - `season` - sequential per-game aggregation into rolling series

pub mod cancel;
pub mod season;
pub mod source;

pub use cancel::CancellationToken;
pub use season::{run_season, SeasonOutcome, SeasonReport, SeasonRequest, SkippedGame};
pub use source::{GameSource, MemorySource};
