use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RollingConfig {
    /// Trailing window W in games.
    pub window: usize,
}

impl Default for RollingConfig {
    fn default() -> Self {
        Self { window: 10 }
    }
}

impl RollingConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window == 0 {
            Err(ConfigError::ZeroWindow)
        } else {
            Ok(())
        }
    }
}

/// Number of equal angular sectors in a movement fingerprint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum BucketCount {
    Eight,
    Sixteen,
}

impl BucketCount {
    pub fn get(self) -> usize {
        match self {
            BucketCount::Eight => 8,
            BucketCount::Sixteen => 16,
        }
    }

    /// Sector width in degrees.
    pub fn sector_deg(self) -> f64 {
        360.0 / self.get() as f64
    }
}

impl TryFrom<u8> for BucketCount {
    type Error = ConfigError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            8 => Ok(BucketCount::Eight),
            16 => Ok(BucketCount::Sixteen),
            other => Err(ConfigError::InvalidBucketCount(other)),
        }
    }
}

impl From<BucketCount> for u8 {
    fn from(count: BucketCount) -> Self {
        count.get() as u8
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FingerprintConfig {
    pub bucket_count: BucketCount,
    /// Samples slower than this (ft/s) are standing still and carry no heading.
    pub min_speed: f64,
}

impl Default for FingerprintConfig {
    fn default() -> Self {
        Self {
            bucket_count: BucketCount::Eight,
            min_speed: 0.0,
        }
    }
}

impl FingerprintConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.min_speed.is_finite() && self.min_speed >= 0.0) {
            return Err(ConfigError::OutOfRange {
                field: "fingerprint.min_speed",
                value: self.min_speed,
                expected: "non-negative",
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bucket_count_serde() {
        let count: BucketCount = serde_json::from_str("16").unwrap();
        assert_eq!(count, BucketCount::Sixteen);
        assert_eq!(serde_json::to_string(&BucketCount::Eight).unwrap(), "8");
        assert!(serde_json::from_str::<BucketCount>("12").is_err());
    }

    #[test]
    fn test_sector_width() {
        assert_eq!(BucketCount::Eight.sector_deg(), 45.0);
        assert_eq!(BucketCount::Sixteen.sector_deg(), 22.5);
    }

    #[test]
    fn test_zero_window_rejected() {
        assert_eq!(RollingConfig { window: 0 }.validate(), Err(ConfigError::ZeroWindow));
        assert!(RollingConfig::default().validate().is_ok());
    }
}
