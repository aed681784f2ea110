//! Expected-goals model parameters.
//!
//! | Group | Contents |
//! |-------|----------|
//! | Logistic | intercept, distance and angle coefficients |
//! | Multipliers | per shot type, per strength state |
//! | Bonuses | rebound / rush, additive in probability space |
//! | Bounds | clamp floor and cap |
//! | Tiers | medium / high danger thresholds |

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::models::{ShotType, Strength};

/// Lowest probability the model reports.
pub const MIN_REASONABLE_XG: f64 = 0.005;
/// Highest probability the model reports.
pub const MAX_REASONABLE_XG: f64 = 0.60;
pub const HIGH_DANGER_THRESHOLD: f64 = 0.15;
pub const MEDIUM_DANGER_THRESHOLD: f64 = 0.08;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct XgConfig {
    pub intercept: f64,
    /// Per foot of distance.
    pub distance_coef: f64,
    /// Per degree off the center line.
    pub angle_coef: f64,
    pub shot_type_multipliers: ShotTypeMultipliers,
    pub strength_multipliers: StrengthMultipliers,
    pub rebound_bonus: f64,
    pub rush_bonus: f64,
    pub min_xg: f64,
    pub max_xg: f64,
    pub tiers: DangerThresholds,
}

impl Default for XgConfig {
    fn default() -> Self {
        Self {
            intercept: -1.0,
            distance_coef: -0.05,
            angle_coef: -0.01,
            shot_type_multipliers: ShotTypeMultipliers::default(),
            strength_multipliers: StrengthMultipliers::default(),
            rebound_bonus: 0.05,
            rush_bonus: 0.03,
            min_xg: MIN_REASONABLE_XG,
            max_xg: MAX_REASONABLE_XG,
            tiers: DangerThresholds::default(),
        }
    }
}

impl XgConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let finite = [
            ("xg.intercept", self.intercept),
            ("xg.distance_coef", self.distance_coef),
            ("xg.angle_coef", self.angle_coef),
        ];
        for (field, value) in finite {
            if !value.is_finite() {
                return Err(ConfigError::OutOfRange { field, value, expected: "finite" });
            }
        }
        // Monotonicity in distance relies on a non-positive coefficient.
        if self.distance_coef > 0.0 {
            return Err(ConfigError::OutOfRange {
                field: "xg.distance_coef",
                value: self.distance_coef,
                expected: "zero or negative",
            });
        }
        for (field, value) in [("xg.rebound_bonus", self.rebound_bonus), ("xg.rush_bonus", self.rush_bonus)] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ConfigError::OutOfRange { field, value, expected: "non-negative" });
            }
        }
        if !(self.min_xg >= 0.0 && self.max_xg <= 1.0 && self.min_xg < self.max_xg) {
            return Err(ConfigError::InvalidClamp { floor: self.min_xg, cap: self.max_xg });
        }
        self.shot_type_multipliers.validate()?;
        self.strength_multipliers.validate()?;
        self.tiers.validate()
    }
}

/// Multiplier per shot type; unmapped types score at 1.0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShotTypeMultipliers {
    pub wrist: f64,
    pub slap: f64,
    pub snap: f64,
    pub backhand: f64,
    pub tip: f64,
    pub wrap: f64,
}

impl Default for ShotTypeMultipliers {
    fn default() -> Self {
        Self {
            wrist: 1.0,
            slap: 0.9,
            snap: 1.05,
            backhand: 0.85,
            tip: 1.25,
            wrap: 0.7,
        }
    }
}

impl ShotTypeMultipliers {
    pub fn get(&self, shot_type: ShotType) -> f64 {
        match shot_type {
            ShotType::Wrist => self.wrist,
            ShotType::Slap => self.slap,
            ShotType::Snap => self.snap,
            ShotType::Backhand => self.backhand,
            ShotType::Tip => self.tip,
            ShotType::Wrap => self.wrap,
            ShotType::Other => 1.0,
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        check_multipliers(&[
            ("xg.shot_type_multipliers.wrist", self.wrist),
            ("xg.shot_type_multipliers.slap", self.slap),
            ("xg.shot_type_multipliers.snap", self.snap),
            ("xg.shot_type_multipliers.backhand", self.backhand),
            ("xg.shot_type_multipliers.tip", self.tip),
            ("xg.shot_type_multipliers.wrap", self.wrap),
        ])
    }
}

/// Multiplier per strength state; unmapped states score at 1.0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrengthMultipliers {
    pub even_strength: f64,
    pub power_play: f64,
    pub short_handed: f64,
    pub four_on_four: f64,
    pub three_on_three: f64,
}

impl Default for StrengthMultipliers {
    fn default() -> Self {
        Self {
            even_strength: 1.0,
            power_play: 1.15,
            short_handed: 0.85,
            four_on_four: 1.05,
            three_on_three: 1.1,
        }
    }
}

impl StrengthMultipliers {
    pub fn get(&self, strength: Strength) -> f64 {
        match strength {
            Strength::EvenFive => self.even_strength,
            Strength::PowerPlay => self.power_play,
            Strength::ShortHanded => self.short_handed,
            Strength::FourOnFour => self.four_on_four,
            Strength::ThreeOnThree => self.three_on_three,
            Strength::Other => 1.0,
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        check_multipliers(&[
            ("xg.strength_multipliers.even_strength", self.even_strength),
            ("xg.strength_multipliers.power_play", self.power_play),
            ("xg.strength_multipliers.short_handed", self.short_handed),
            ("xg.strength_multipliers.four_on_four", self.four_on_four),
            ("xg.strength_multipliers.three_on_three", self.three_on_three),
        ])
    }
}

fn check_multipliers(values: &[(&'static str, f64)]) -> Result<(), ConfigError> {
    for &(field, value) in values {
        if !(value.is_finite() && value > 0.0) {
            return Err(ConfigError::OutOfRange { field, value, expected: "positive" });
        }
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DangerThresholds {
    pub medium: f64,
    pub high: f64,
}

impl Default for DangerThresholds {
    fn default() -> Self {
        Self {
            medium: MEDIUM_DANGER_THRESHOLD,
            high: HIGH_DANGER_THRESHOLD,
        }
    }
}

impl DangerThresholds {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.medium.is_finite() && self.high.is_finite() && self.medium <= self.high {
            Ok(())
        } else {
            Err(ConfigError::InvalidTierThresholds { medium: self.medium, high: self.high })
        }
    }
}

/// Look-back windows used to derive the rebound and rush flags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShotContextConfig {
    /// A prior attempt by the same team this recently makes a rebound.
    pub rebound_window_s: f64,
    /// The puck was outside the offensive zone this recently makes a rush chance.
    pub rush_window_s: f64,
}

impl Default for ShotContextConfig {
    fn default() -> Self {
        Self {
            rebound_window_s: 3.0,
            rush_window_s: 4.0,
        }
    }
}

impl ShotContextConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("shot_context.rebound_window_s", self.rebound_window_s),
            ("shot_context.rush_window_s", self.rush_window_s),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ConfigError::OutOfRange { field, value, expected: "non-negative" });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_default_config_is_valid() {
        assert!(XgConfig::default().validate().is_ok());
        assert!(ShotContextConfig::default().validate().is_ok());
    }

    #[test]
    fn test_unmapped_categories_are_neutral() {
        let config = XgConfig::default();
        assert_eq!(config.shot_type_multipliers.get(ShotType::Other), 1.0);
        assert_eq!(config.strength_multipliers.get(Strength::Other), 1.0);
    }

    #[test]
    fn test_every_category_has_positive_multiplier() {
        let config = XgConfig::default();
        for shot_type in ShotType::iter() {
            assert!(config.shot_type_multipliers.get(shot_type) > 0.0);
        }
        for strength in Strength::iter() {
            assert!(config.strength_multipliers.get(strength) > 0.0);
        }
    }

    #[test]
    fn test_rejects_inverted_clamp() {
        let config = XgConfig { min_xg: 0.5, max_xg: 0.1, ..XgConfig::default() };
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvalidClamp { floor: 0.5, cap: 0.1 })
        );
    }

    #[test]
    fn test_rejects_positive_distance_coef() {
        let config = XgConfig { distance_coef: 0.01, ..XgConfig::default() };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::OutOfRange { field: "xg.distance_coef", .. })
        ));
    }

    #[test]
    fn test_partial_yaml_like_json_keeps_defaults() {
        let config: XgConfig =
            serde_json::from_str(r#"{"rush_bonus": 0.04, "shot_type_multipliers": {"tip": 1.4}}"#).unwrap();
        assert_eq!(config.rush_bonus, 0.04);
        assert_eq!(config.shot_type_multipliers.tip, 1.4);
        assert_eq!(config.shot_type_multipliers.wrist, 1.0);
        assert_eq!(config.max_xg, MAX_REASONABLE_XG);
    }
}
