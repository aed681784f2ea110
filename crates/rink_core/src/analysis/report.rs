//! Single-game analysis: aggregate metrics plus every classifier, run for one
//! subject with one configuration.

use serde::{Deserialize, Serialize};

use super::events::{
    analyze_coverage, classify_zone_entries, detect_royal_road_passes, detect_rush_attacks,
    track_momentum, DefensiveCoverage, MomentumTimeline, RoyalRoadPass, RoyalRoadSummary,
    RushAttack, RushSummary, ZoneEntry, ZoneEntrySummary,
};
use super::metrics::{aggregate_game, GameMetrics};
use crate::config::AnalyticsConfig;
use crate::error::AnalyticsError;
use crate::models::{GameFeed, GameId, Subject};
use crate::xg::XgScorer;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameAnalysis {
    pub game_id: GameId,
    pub subject: Subject,
    pub metrics: GameMetrics,
    pub royal_road_passes: Vec<RoyalRoadPass>,
    pub royal_road: RoyalRoadSummary,
    pub rush_attacks: Vec<RushAttack>,
    pub rush: RushSummary,
    pub zone_entries: Vec<ZoneEntry>,
    pub zone_entry: ZoneEntrySummary,
    pub momentum: MomentumTimeline,
    pub coverage: DefensiveCoverage,
}

/// Run every analysis for `subject` over one game.
///
/// Classified events are scoped to the subject's team; for a player they
/// are further narrowed to the plays the player took part in.
pub fn analyze_game(
    feed: &GameFeed,
    subject: &Subject,
    config: &AnalyticsConfig,
) -> Result<GameAnalysis, AnalyticsError> {
    config.validate()?;
    let team_id = subject.team_id();
    if feed.opponent_of(team_id).is_none() {
        return Err(AnalyticsError::SubjectNotInGame {
            team_id,
            game_id: feed.game_id,
        });
    }

    let scorer = XgScorer::from_config(config)?;
    let events = &feed.events;
    let player = subject.player_id();

    let mut royal_road_passes = detect_royal_road_passes(events, Some(team_id), &scorer, &config.royal_road);
    let mut rush_attacks = detect_rush_attacks(events, Some(team_id), &scorer, &config.rush);
    let mut zone_entries = classify_zone_entries(events, team_id, &scorer, &config.zone_entry);
    if let Some(player_id) = player {
        royal_road_passes.retain(|p| p.passer_id == player_id || p.receiver_id == player_id);
        rush_attacks.retain(|a| a.shooter_id == player_id);
        zone_entries.retain(|e| e.player_id == Some(player_id));
    }

    let analysis = GameAnalysis {
        game_id: feed.game_id,
        subject: *subject,
        metrics: aggregate_game(feed, subject, &scorer),
        royal_road: RoyalRoadSummary::from_passes(&royal_road_passes),
        royal_road_passes,
        rush: RushSummary::from_attacks(&rush_attacks),
        rush_attacks,
        zone_entry: ZoneEntrySummary::from_entries(&zone_entries),
        zone_entries,
        momentum: track_momentum(events, team_id, &config.momentum),
        coverage: analyze_coverage(events, subject, &scorer),
    };

    log::debug!(
        "game {} analysed: {} royal-road, {} rushes, {} entries",
        feed.game_id,
        analysis.royal_road.passes,
        analysis.rush.rushes,
        analysis.zone_entry.entries
    );
    Ok(analysis)
}
