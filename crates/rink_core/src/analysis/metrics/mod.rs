//! # Metrics Module
//!
//! - `game_metrics` - one game reduced to one record per subject
//! - `rolling` - trailing-window series (PDO, Corsi%, Fenwick%, xG%)
//! - `trend` - early vs recent comparison over a rolling series
//! - `movement` - directional movement fingerprints

pub mod game_metrics;
pub mod movement;
pub mod rolling;
pub mod trend;

pub use game_metrics::{aggregate_game, GameMetrics};
pub use movement::{
    calculate_fingerprint, calculate_fingerprints, fingerprint_similarity, DirectionBucket,
    FingerprintBuilder, MovementFingerprint, MovementSample,
};
pub use rolling::{compute_rolling, RollingMetrics};
pub use trend::{all_metric_trends, detect_trend, metric_trend, MetricTrend, RollingMetric, Trend, TrendDirection};
