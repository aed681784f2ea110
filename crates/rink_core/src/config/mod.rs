//! # Analytics Configuration
//!
//! Every tunable used by the engine, grouped per component. Nothing here is
//! read from the environment: callers build an [`AnalyticsConfig`] (or load
//! one from a file) and pass it into each computation.
//!
//! ## Usage
//! ```rust
//! use rink_core::config::AnalyticsConfig;
//!
//! let config = AnalyticsConfig::default();
//! assert!(config.validate().is_ok());
//! let tracking = AnalyticsConfig::tracking();
//! assert_eq!(tracking.fingerprint.bucket_count.get(), 16);
//! ```

mod thresholds_config;
mod window_config;
mod xg_config;

pub use thresholds_config::{MomentumConfig, RoyalRoadConfig, RushConfig, ZoneEntryConfig};
pub use window_config::{BucketCount, FingerprintConfig, RollingConfig};
pub use xg_config::{
    DangerThresholds, ShotContextConfig, ShotTypeMultipliers, StrengthMultipliers, XgConfig,
    HIGH_DANGER_THRESHOLD, MAX_REASONABLE_XG, MEDIUM_DANGER_THRESHOLD, MIN_REASONABLE_XG,
};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AnalyticsConfig {
    pub xg: XgConfig,
    pub shot_context: ShotContextConfig,
    pub rolling: RollingConfig,
    pub royal_road: RoyalRoadConfig,
    pub rush: RushConfig,
    pub zone_entry: ZoneEntryConfig,
    pub momentum: MomentumConfig,
    pub fingerprint: FingerprintConfig,
}

impl AnalyticsConfig {
    /// Defaults suited to league play-by-play feeds.
    pub fn play_by_play() -> Self {
        Self::default()
    }

    /// Puck/player-tracking feeds: dense events, finer headings.
    pub fn tracking() -> Self {
        let mut cfg = Self::default();
        cfg.zone_entry.continuity_gap_s = 1.0;
        cfg.royal_road.max_pass_gap_s = 1.5;
        cfg.momentum.bucket_s = 15.0;
        cfg.fingerprint.bucket_count = BucketCount::Sixteen;
        cfg.fingerprint.min_speed = 1.0;
        cfg
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.xg.validate()?;
        self.shot_context.validate()?;
        self.rolling.validate()?;
        self.royal_road.validate()?;
        self.rush.validate()?;
        self.zone_entry.validate()?;
        self.momentum.validate()?;
        self.fingerprint.validate()
    }
}
