//! # Game Metrics Aggregator
//!
//! Reduces one game's play-by-play into a single [`GameMetrics`] record for a
//! team or a skater.
//!
//! ## Algorithm
//! 1. Score every well-formed shot attempt (malformed ones are skipped)
//! 2. Split attempts into for / against using the subject's on-ice membership
//! 3. Count attempts (Corsi), unblocked attempts (Fenwick) and shots on goal
//! 4. Sum xG in event order so repeated runs are bit-identical
//! 5. Goals, assists and points come from goal events

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{EventType, GameFeed, GameId, Subject};
use crate::xg::{ScoredShot, XgScorer};

/// One subject's totals for one game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameMetrics {
    pub game_id: GameId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub game_date: Option<NaiveDate>,
    pub subject: Subject,
    pub goals: u32,
    pub assists: u32,
    pub points: u32,
    /// Corsi for / against.
    pub shot_attempts_for: u32,
    pub shot_attempts_against: u32,
    /// Fenwick for / against.
    pub unblocked_for: u32,
    pub unblocked_against: u32,
    pub shots_on_goal_for: u32,
    pub shots_on_goal_against: u32,
    pub goals_for: u32,
    pub goals_against: u32,
    pub xg_for: f64,
    pub xg_against: f64,
}

impl GameMetrics {
    /// Zeroed record for a subject and game.
    pub fn empty(game_id: GameId, game_date: Option<NaiveDate>, subject: Subject) -> Self {
        Self {
            game_id,
            game_date,
            subject,
            goals: 0,
            assists: 0,
            points: 0,
            shot_attempts_for: 0,
            shot_attempts_against: 0,
            unblocked_for: 0,
            unblocked_against: 0,
            shots_on_goal_for: 0,
            shots_on_goal_against: 0,
            goals_for: 0,
            goals_against: 0,
            xg_for: 0.0,
            xg_against: 0.0,
        }
    }

    /// On-ice shooting percentage as a fraction.
    pub fn shooting_pct(&self) -> Option<f64> {
        ratio(self.goals_for as f64, self.shots_on_goal_for as f64)
    }

    /// On-ice save percentage as a fraction.
    pub fn save_pct(&self) -> Option<f64> {
        ratio(
            self.shots_on_goal_against.saturating_sub(self.goals_against) as f64,
            self.shots_on_goal_against as f64,
        )
    }

    pub fn corsi_pct(&self) -> Option<f64> {
        share_pct(self.shot_attempts_for as f64, self.shot_attempts_against as f64)
    }

    pub fn fenwick_pct(&self) -> Option<f64> {
        share_pct(self.unblocked_for as f64, self.unblocked_against as f64)
    }

    pub fn xg_pct(&self) -> Option<f64> {
        share_pct(self.xg_for, self.xg_against)
    }

    fn add_shot(&mut self, scored: &ScoredShot, is_for: bool) {
        let result = scored.shot.result;
        let (attempts, unblocked, on_goal, goals, xg) = if is_for {
            (
                &mut self.shot_attempts_for,
                &mut self.unblocked_for,
                &mut self.shots_on_goal_for,
                &mut self.goals_for,
                &mut self.xg_for,
            )
        } else {
            (
                &mut self.shot_attempts_against,
                &mut self.unblocked_against,
                &mut self.shots_on_goal_against,
                &mut self.goals_against,
                &mut self.xg_against,
            )
        };
        *attempts += 1;
        if result.is_unblocked() {
            *unblocked += 1;
        }
        if result.is_on_goal() {
            *on_goal += 1;
        }
        if result.is_goal() {
            *goals += 1;
        }
        *xg += scored.x_goal();
    }
}

/// `num / den`, or `None` when the denominator is zero.
pub(crate) fn ratio(num: f64, den: f64) -> Option<f64> {
    if den > 0.0 {
        Some(num / den)
    } else {
        None
    }
}

/// `for / (for + against)` as a percentage.
pub(crate) fn share_pct(for_value: f64, against_value: f64) -> Option<f64> {
    ratio(for_value, for_value + against_value).map(|share| share * 100.0)
}

/// Aggregate one game for `subject`.
pub fn aggregate_game(feed: &GameFeed, subject: &Subject, scorer: &XgScorer) -> GameMetrics {
    let mut metrics = GameMetrics::empty(feed.game_id, feed.game_date, *subject);

    for scored in scorer.score_all(&feed.events) {
        if subject.is_for(&scored.shot) {
            metrics.add_shot(&scored, true);
        } else if subject.is_against(&scored.shot) {
            metrics.add_shot(&scored, false);
        }
    }

    for event in feed.events.iter().filter(|e| e.event_type == EventType::Goal) {
        let Some(team_id) = event.team_id else {
            continue;
        };
        if team_id != subject.team_id() {
            continue;
        }
        match subject {
            Subject::Team { .. } => {
                metrics.goals += 1;
                metrics.assists += event.assists.len() as u32;
            }
            Subject::Player { player_id, .. } => {
                if event.player_id == Some(*player_id) {
                    metrics.goals += 1;
                }
                if event.assists.contains(player_id) {
                    metrics.assists += 1;
                }
            }
        }
    }
    metrics.points = metrics.goals + metrics.assists;

    log::debug!(
        "game {} {:?}: CF={} CA={} xGF={:.3} xGA={:.3}",
        feed.game_id,
        subject,
        metrics.shot_attempts_for,
        metrics.shot_attempts_against,
        metrics.xg_for,
        metrics.xg_against
    );

    metrics
}
