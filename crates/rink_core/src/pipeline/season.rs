//! # Season Orchestration
//!
//! Fetches a subject's games one at a time, aggregates each, then builds the
//! rolling series and trends.
//!
//! - A game that fails to fetch (or did not involve the subject) is logged,
//!   recorded in `skipped_games` and left out; it never fails the season
//! - The cancellation token is checked before every game; a cancelled run
//!   discards everything gathered so far
//! - Nothing is returned until the whole sequence has been processed

use serde::{Deserialize, Serialize};

use super::cancel::CancellationToken;
use super::source::GameSource;
use crate::analysis::metrics::{aggregate_game, all_metric_trends, compute_rolling, GameMetrics, MetricTrend, RollingMetrics};
use crate::config::AnalyticsConfig;
use crate::error::AnalyticsError;
use crate::models::{GameId, Subject};
use crate::xg::XgScorer;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonRequest {
    pub subject: Subject,
    /// Oldest first.
    pub game_ids: Vec<GameId>,
    #[serde(default)]
    pub config: AnalyticsConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedGame {
    pub game_id: GameId,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonReport {
    pub subject: Subject,
    pub games_requested: usize,
    pub games_used: usize,
    pub skipped_games: Vec<SkippedGame>,
    pub game_metrics: Vec<GameMetrics>,
    pub rolling: Vec<RollingMetrics>,
    pub trends: Vec<MetricTrend>,
}

impl SeasonReport {
    /// Some requested games could not be used.
    pub fn is_partial(&self) -> bool {
        !self.skipped_games.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SeasonOutcome {
    Complete(SeasonReport),
    /// Stopped by the caller; no aggregates are published.
    Cancelled { games_processed: usize },
}

impl SeasonOutcome {
    pub fn report(&self) -> Option<&SeasonReport> {
        match self {
            SeasonOutcome::Complete(report) => Some(report),
            SeasonOutcome::Cancelled { .. } => None,
        }
    }

    pub fn into_report(self) -> Option<SeasonReport> {
        match self {
            SeasonOutcome::Complete(report) => Some(report),
            SeasonOutcome::Cancelled { .. } => None,
        }
    }
}

pub fn run_season<S: GameSource>(
    source: &S,
    request: &SeasonRequest,
    token: &CancellationToken,
) -> Result<SeasonOutcome, AnalyticsError> {
    request.config.validate()?;
    let scorer = XgScorer::from_config(&request.config)?;
    let team_id = request.subject.team_id();

    let mut game_metrics = Vec::with_capacity(request.game_ids.len());
    let mut skipped_games = Vec::new();

    for (processed, &game_id) in request.game_ids.iter().enumerate() {
        if token.is_cancelled() {
            log::info!(
                "season for {:?} cancelled after {} of {} games",
                request.subject,
                processed,
                request.game_ids.len()
            );
            return Ok(SeasonOutcome::Cancelled {
                games_processed: processed,
            });
        }

        let feed = match source.fetch_game(game_id) {
            Ok(feed) => feed,
            Err(e) => {
                log::warn!("skipping game {}: {}", game_id, e);
                skipped_games.push(SkippedGame {
                    game_id,
                    reason: e.to_string(),
                });
                continue;
            }
        };

        if feed.opponent_of(team_id).is_none() {
            let err = AnalyticsError::SubjectNotInGame { team_id, game_id };
            log::warn!("skipping game {}: {}", game_id, err);
            skipped_games.push(SkippedGame {
                game_id,
                reason: err.to_string(),
            });
            continue;
        }

        game_metrics.push(aggregate_game(&feed, &request.subject, &scorer));
    }

    let rolling = compute_rolling(&game_metrics, request.config.rolling.window);
    let trends = all_metric_trends(&rolling);

    log::info!(
        "season for {:?}: {} of {} games used, {} rolling entries",
        request.subject,
        game_metrics.len(),
        request.game_ids.len(),
        rolling.len()
    );

    Ok(SeasonOutcome::Complete(SeasonReport {
        subject: request.subject,
        games_requested: request.game_ids.len(),
        games_used: game_metrics.len(),
        skipped_games,
        game_metrics,
        rolling,
        trends,
    }))
}
