use serde::{Deserialize, Serialize};

use crate::analysis::metrics::{calculate_fingerprint, MovementSample};
use crate::analysis::{analyze_game, GameAnalysis};
use crate::config::{AnalyticsConfig, FingerprintConfig};
use crate::error::AnalyticsError;
use crate::models::{GameFeed, Subject};
use crate::pipeline::{run_season, CancellationToken, MemorySource, SeasonOutcome, SeasonRequest};

/// Request/response schema understood by this build.
pub const SCHEMA_VERSION: u8 = 1;

fn check_schema(found: u8) -> Result<(), AnalyticsError> {
    if found != SCHEMA_VERSION {
        return Err(AnalyticsError::UnsupportedSchema {
            found,
            expected: SCHEMA_VERSION,
        });
    }
    Ok(())
}

#[derive(Debug, Deserialize)]
pub struct GameAnalysisRequest {
    pub schema_version: u8,
    pub game: GameFeed,
    pub subject: Subject,
    #[serde(default)]
    pub config: AnalyticsConfig,
}

#[derive(Debug, Serialize)]
pub struct GameAnalysisResponse {
    pub schema_version: u8,
    #[serde(flatten)]
    pub analysis: GameAnalysis,
}

/// Analyse one game from a JSON request and return the analysis as JSON.
pub fn analyze_game_json(request_json: &str) -> Result<String, AnalyticsError> {
    let request: GameAnalysisRequest = serde_json::from_str(request_json)?;
    check_schema(request.schema_version)?;

    let analysis = analyze_game(&request.game, &request.subject, &request.config)?;
    let response = GameAnalysisResponse {
        schema_version: SCHEMA_VERSION,
        analysis,
    };
    Ok(serde_json::to_string(&response)?)
}

#[derive(Debug, Deserialize)]
pub struct SeasonAnalysisRequest {
    pub schema_version: u8,
    pub subject: Subject,
    /// Oldest first.
    pub games: Vec<GameFeed>,
    #[serde(default)]
    pub config: AnalyticsConfig,
}

/// Season report over games embedded in the request.
pub fn analyze_season_json(request_json: &str) -> Result<String, AnalyticsError> {
    let request: SeasonAnalysisRequest = serde_json::from_str(request_json)?;
    check_schema(request.schema_version)?;

    let game_ids = request.games.iter().map(|g| g.game_id).collect();
    let source: MemorySource = request.games.into_iter().collect();
    let season = SeasonRequest {
        subject: request.subject,
        game_ids,
        config: request.config,
    };
    let outcome: SeasonOutcome = run_season(&source, &season, &CancellationToken::new())?;
    Ok(serde_json::to_string(&outcome)?)
}

#[derive(Debug, Deserialize)]
pub struct FingerprintRequest {
    pub schema_version: u8,
    pub samples: Vec<MovementSample>,
    #[serde(default)]
    pub config: FingerprintConfig,
}

pub fn fingerprint_json(request_json: &str) -> Result<String, AnalyticsError> {
    let request: FingerprintRequest = serde_json::from_str(request_json)?;
    check_schema(request.schema_version)?;
    request.config.validate()?;

    let fingerprint = calculate_fingerprint(&request.samples, &request.config);
    Ok(serde_json::to_string(&fingerprint)?)
}
