use thiserror::Error;

use crate::models::GameId;

/// Rejected configuration values.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("{field} must be {expected}, got {value}")]
    OutOfRange {
        field: &'static str,
        value: f64,
        expected: &'static str,
    },

    #[error("xG floor {floor} must be below cap {cap}")]
    InvalidClamp { floor: f64, cap: f64 },

    #[error("danger thresholds must satisfy medium ({medium}) <= high ({high})")]
    InvalidTierThresholds { medium: f64, high: f64 },

    #[error("bucket count must be 8 or 16, got {0}")]
    InvalidBucketCount(u8),

    #[error("rolling window must be at least 1")]
    ZeroWindow,
}

/// Failure to obtain one game's events from the fetch layer.
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Game {game_id} not found")]
    NotFound { game_id: GameId },

    #[error("Game {game_id} unavailable: {reason}")]
    Unavailable { game_id: GameId, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed game feed: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum AnalyticsError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unsupported schema version: found {found}, expected {expected}")]
    UnsupportedSchema { found: u8, expected: u8 },

    #[error("Subject team {team_id} did not play in game {game_id}")]
    SubjectNotInGame { team_id: u32, game_id: GameId },
}

impl AnalyticsError {
    /// Whether the caller can fix the request and retry.
    pub fn is_recoverable(&self) -> bool {
        match self {
            AnalyticsError::Config(_) => true,
            AnalyticsError::Json(_) => true,
            AnalyticsError::UnsupportedSchema { .. } => false,
            AnalyticsError::SubjectNotInGame { .. } => true,
        }
    }
}

pub type Result<T> = std::result::Result<T, AnalyticsError>;
