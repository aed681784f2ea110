//! Event classifier thresholds.
//!
//! These defaults were tuned by eye against broadcast tape rather than fitted,
//! so they live here as per-call parameters instead of constants in the
//! classifiers.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoyalRoadConfig {
    /// Minimum |Δy| in feet for a cross-ice pass.
    pub min_cross_ice_ft: f64,
    /// Slot x-range on |x|, feet from center ice.
    pub slot_min_x: f64,
    pub slot_max_x: f64,
    /// Longest gap between passer and receiver events.
    pub max_pass_gap_s: f64,
    /// Receiver shot must come within this long after the reception.
    pub shot_follow_up_s: f64,
}

impl Default for RoyalRoadConfig {
    fn default() -> Self {
        Self {
            min_cross_ice_ft: 20.0,
            slot_min_x: 54.0,
            slot_max_x: 89.0,
            max_pass_gap_s: 3.0,
            shot_follow_up_s: 3.0,
        }
    }
}

impl RoyalRoadConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        non_negative(&[
            ("royal_road.min_cross_ice_ft", self.min_cross_ice_ft),
            ("royal_road.slot_min_x", self.slot_min_x),
            ("royal_road.max_pass_gap_s", self.max_pass_gap_s),
            ("royal_road.shot_follow_up_s", self.shot_follow_up_s),
        ])?;
        if !(self.slot_max_x.is_finite() && self.slot_max_x > self.slot_min_x) {
            return Err(ConfigError::OutOfRange {
                field: "royal_road.slot_max_x",
                value: self.slot_max_x,
                expected: "greater than slot_min_x",
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RushConfig {
    /// Defensive-zone possession to shot must be quicker than this.
    pub max_transition_s: f64,
    /// Defender counts at or below this are breakaways.
    pub breakaway_max_defenders: u8,
    /// Defender counts at or below this (and above breakaway) are odd-man rushes.
    pub odd_man_max_defenders: u8,
}

impl Default for RushConfig {
    fn default() -> Self {
        Self {
            max_transition_s: 10.0,
            breakaway_max_defenders: 0,
            odd_man_max_defenders: 1,
        }
    }
}

impl RushConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.max_transition_s.is_finite() && self.max_transition_s > 0.0) {
            return Err(ConfigError::OutOfRange {
                field: "rush.max_transition_s",
                value: self.max_transition_s,
                expected: "positive",
            });
        }
        if self.odd_man_max_defenders < self.breakaway_max_defenders {
            return Err(ConfigError::OutOfRange {
                field: "rush.odd_man_max_defenders",
                value: f64::from(self.odd_man_max_defenders),
                expected: "at least breakaway_max_defenders",
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoneEntryConfig {
    /// Longest gap that still counts as possession continuity across the line.
    pub continuity_gap_s: f64,
    /// Window for linking an entry to the next shot.
    pub shot_follow_up_s: f64,
}

impl Default for ZoneEntryConfig {
    fn default() -> Self {
        Self {
            continuity_gap_s: 2.0,
            shot_follow_up_s: 10.0,
        }
    }
}

impl ZoneEntryConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        non_negative(&[
            ("zone_entry.continuity_gap_s", self.continuity_gap_s),
            ("zone_entry.shot_follow_up_s", self.shot_follow_up_s),
        ])
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MomentumConfig {
    pub bucket_s: f64,
    /// Trailing window each sample looks back over.
    pub window_s: f64,
    /// Bucket-to-bucket change that counts as a swing.
    pub swing_threshold: f64,
}

impl Default for MomentumConfig {
    fn default() -> Self {
        Self {
            bucket_s: 30.0,
            window_s: 120.0,
            swing_threshold: 0.5,
        }
    }
}

impl MomentumConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [("momentum.bucket_s", self.bucket_s), ("momentum.window_s", self.window_s)] {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::OutOfRange { field, value, expected: "positive" });
            }
        }
        if !(self.swing_threshold.is_finite() && (0.0..=2.0).contains(&self.swing_threshold)) {
            return Err(ConfigError::OutOfRange {
                field: "momentum.swing_threshold",
                value: self.swing_threshold,
                expected: "within [0, 2]",
            });
        }
        Ok(())
    }
}

fn non_negative(values: &[(&'static str, f64)]) -> Result<(), ConfigError> {
    for &(field, value) in values {
        if !(value.is_finite() && value >= 0.0) {
            return Err(ConfigError::OutOfRange { field, value, expected: "non-negative" });
        }
    }
    Ok(())
}
