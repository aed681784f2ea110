pub mod json_api;

pub use json_api::{
    analyze_game_json, analyze_season_json, fingerprint_json, FingerprintRequest,
    GameAnalysisRequest, GameAnalysisResponse, SeasonAnalysisRequest, SCHEMA_VERSION,
};
