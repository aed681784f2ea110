//! # Expected-Goals Model
//!
//! Logistic base on distance and angle, scaled by shot-type and strength
//! multipliers, plus flat rebound/rush bonuses, clamped to the configured
//! bounds.

use serde::{Deserialize, Serialize};

use super::features::XGFeatures;
use crate::config::{DangerThresholds, XgConfig};
use crate::error::ConfigError;

/// Coarse shot-quality class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DangerTier {
    Low,
    Medium,
    High,
}

impl DangerTier {
    pub fn from_xg(x_goal: f64, thresholds: &DangerThresholds) -> Self {
        if x_goal >= thresholds.high {
            DangerTier::High
        } else if x_goal >= thresholds.medium {
            DangerTier::Medium
        } else {
            DangerTier::Low
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct XGPrediction {
    /// Goal probability within the model's clamp bounds.
    pub x_goal: f64,
    pub tier: DangerTier,
}

#[inline]
fn logistic(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

#[derive(Debug, Clone, Default)]
pub struct XgModel {
    config: XgConfig,
}

impl XgModel {
    /// Rejects configs whose clamp bounds or coefficients could not score.
    pub fn new(config: XgConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &XgConfig {
        &self.config
    }

    /// Logistic output before multipliers, bonuses and clamping.
    pub fn base_probability(&self, distance_ft: f64, angle_deg: f64) -> f64 {
        let cfg = &self.config;
        logistic(cfg.intercept + cfg.distance_coef * distance_ft + cfg.angle_coef * angle_deg)
    }

    pub fn predict(&self, features: &XGFeatures) -> XGPrediction {
        let cfg = &self.config;

        let raw = if features.distance_ft <= 0.0 {
            // At the net the angle term is meaningless; treat as the best chance possible.
            cfg.max_xg
        } else {
            let mut p = self.base_probability(features.distance_ft, features.angle_deg)
                * cfg.shot_type_multipliers.get(features.shot_type)
                * cfg.strength_multipliers.get(features.strength);
            if features.is_rebound {
                p += cfg.rebound_bonus;
            }
            if features.is_rush {
                p += cfg.rush_bonus;
            }
            p
        };

        let x_goal = if raw.is_finite() {
            raw.clamp(cfg.min_xg, cfg.max_xg)
        } else {
            cfg.min_xg
        };

        XGPrediction {
            x_goal,
            tier: DangerTier::from_xg(x_goal, &cfg.tiers),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{MAX_REASONABLE_XG, MIN_REASONABLE_XG};
    use crate::models::{ShotType, Strength};

    fn features(distance_ft: f64, angle_deg: f64) -> XGFeatures {
        XGFeatures {
            distance_ft,
            angle_deg,
            shot_type: ShotType::Wrist,
            strength: Strength::EvenFive,
            is_rebound: false,
            is_rush: false,
        }
    }

    #[test]
    fn test_slot_wrister_is_high_danger() {
        let model = XgModel::default();
        let p = model.predict(&features(10.0, 0.0));
        assert!(p.x_goal >= 0.15, "got {}", p.x_goal);
        assert_eq!(p.tier, DangerTier::High);
    }

    #[test]
    fn test_point_wrister_is_low_danger() {
        let model = XgModel::default();
        let p = model.predict(&features(60.0, 0.0));
        assert!(p.x_goal < 0.08, "got {}", p.x_goal);
        assert_eq!(p.tier, DangerTier::Low);
    }

    #[test]
    fn test_zero_distance_is_max() {
        let model = XgModel::default();
        let p = model.predict(&features(0.0, 90.0));
        assert_eq!(p.x_goal, MAX_REASONABLE_XG);
        assert_eq!(p.tier, DangerTier::High);
    }

    #[test]
    fn test_bonuses_are_additive() {
        let model = XgModel::default();
        let plain = model.predict(&features(40.0, 20.0)).x_goal;
        let mut f = features(40.0, 20.0);
        f.is_rebound = true;
        let rebound = model.predict(&f).x_goal;
        assert!((rebound - plain - 0.05).abs() < 1e-12);
        f.is_rush = true;
        let both = model.predict(&f).x_goal;
        assert!((both - plain - 0.08).abs() < 1e-12);
    }

    #[test]
    fn test_unknown_categories_score_like_neutral() {
        let model = XgModel::default();
        let mut f = features(25.0, 15.0);
        let wrist = model.predict(&f).x_goal;
        f.shot_type = ShotType::Other;
        f.strength = Strength::Other;
        assert_eq!(model.predict(&f).x_goal, wrist);
    }

    #[test]
    fn test_far_shot_hits_floor() {
        let model = XgModel::default();
        let p = model.predict(&features(190.0, 10.0));
        assert_eq!(p.x_goal, MIN_REASONABLE_XG);
    }

    #[test]
    fn test_nan_features_fall_to_floor() {
        let model = XgModel::default();
        let p = model.predict(&features(f64::NAN, 0.0));
        assert_eq!(p.x_goal, MIN_REASONABLE_XG);
    }

    #[test]
    fn test_tier_boundaries_are_inclusive() {
        let t = DangerThresholds::default();
        assert_eq!(DangerTier::from_xg(0.15, &t), DangerTier::High);
        assert_eq!(DangerTier::from_xg(0.08, &t), DangerTier::Medium);
        assert_eq!(DangerTier::from_xg(0.0799, &t), DangerTier::Low);
    }

    #[test]
    fn test_new_rejects_inverted_clamp() {
        let mut config = XgConfig::default();
        config.min_xg = 0.6;
        config.max_xg = 0.005;
        assert!(matches!(XgModel::new(config.clone()), Err(ConfigError::InvalidClamp { .. })));
        config.max_xg = f64::NAN;
        assert!(XgModel::new(config).is_err());
        assert!(XgModel::new(XgConfig::default()).is_ok());
    }
}
