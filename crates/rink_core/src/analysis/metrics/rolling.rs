//! # Rolling Metrics
//!
//! Trailing-window series over per-game records ordered oldest to newest.
//! Entry `i` uses games `[i - W + 1, i]` and nothing after `i`.

use serde::{Deserialize, Serialize};

use super::game_metrics::{ratio, share_pct, GameMetrics};
use crate::models::GameId;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RollingMetrics {
    /// Index of the window's last game in the input sequence.
    pub game_index: usize,
    pub game_id: GameId,
    pub window: usize,
    /// (on-ice sh% + on-ice sv%) × 100; 100 is average.
    pub pdo: Option<f64>,
    /// Percent.
    pub shooting_pct: Option<f64>,
    /// Percent.
    pub save_pct: Option<f64>,
    pub corsi_pct: Option<f64>,
    pub fenwick_pct: Option<f64>,
    pub xg_pct: Option<f64>,
    pub points_per_game: f64,
}

/// Summed counts over one window.
#[derive(Debug, Clone, Copy, Default)]
struct WindowTotals {
    points: u32,
    attempts_for: u32,
    attempts_against: u32,
    unblocked_for: u32,
    unblocked_against: u32,
    on_goal_for: u32,
    on_goal_against: u32,
    goals_for: u32,
    goals_against: u32,
    xg_for: f64,
    xg_against: f64,
}

impl WindowTotals {
    fn add(mut self, game: &GameMetrics) -> Self {
        self.points += game.points;
        self.attempts_for += game.shot_attempts_for;
        self.attempts_against += game.shot_attempts_against;
        self.unblocked_for += game.unblocked_for;
        self.unblocked_against += game.unblocked_against;
        self.on_goal_for += game.shots_on_goal_for;
        self.on_goal_against += game.shots_on_goal_against;
        self.goals_for += game.goals_for;
        self.goals_against += game.goals_against;
        self.xg_for += game.xg_for;
        self.xg_against += game.xg_against;
        self
    }

    fn shooting(&self) -> Option<f64> {
        ratio(self.goals_for as f64, self.on_goal_for as f64)
    }

    fn saving(&self) -> Option<f64> {
        ratio(
            self.on_goal_against.saturating_sub(self.goals_against) as f64,
            self.on_goal_against as f64,
        )
    }
}

/// Rolling series with window `window`; empty when `window` is 0 or exceeds
/// the number of games.
pub fn compute_rolling(games: &[GameMetrics], window: usize) -> Vec<RollingMetrics> {
    if window == 0 || games.len() < window {
        return Vec::new();
    }

    games
        .windows(window)
        .enumerate()
        .map(|(start, slice)| {
            let totals = slice.iter().fold(WindowTotals::default(), WindowTotals::add);
            let shooting = totals.shooting();
            let saving = totals.saving();
            let last = &slice[slice.len() - 1];

            RollingMetrics {
                game_index: start + window - 1,
                game_id: last.game_id,
                window,
                pdo: shooting.zip(saving).map(|(sh, sv)| (sh + sv) * 100.0),
                shooting_pct: shooting.map(|sh| sh * 100.0),
                save_pct: saving.map(|sv| sv * 100.0),
                corsi_pct: share_pct(totals.attempts_for as f64, totals.attempts_against as f64),
                fenwick_pct: share_pct(totals.unblocked_for as f64, totals.unblocked_against as f64),
                xg_pct: share_pct(totals.xg_for, totals.xg_against),
                points_per_game: totals.points as f64 / window as f64,
            }
        })
        .collect()
}
