//! # Rush Attack Classifier
//!
//! A shot is a rush when its team had the puck in its own defensive zone
//! shortly before, inside the same period.
//!
//! ## Sub-types
//! Decided by defenders between puck and net at shot time:
//! - ≤ breakaway threshold → `Breakaway`
//! - ≤ odd-man threshold → `OddMan`
//! - otherwise, or unknown → `Standard`

use serde::{Deserialize, Serialize};

use crate::analysis::metrics::game_metrics::ratio;
use crate::config::RushConfig;
use crate::models::{PlayEvent, PlayerId, TeamId, Zone};
use crate::xg::{ScoredShot, XgScorer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(test, derive(strum_macros::EnumIter))]
#[serde(rename_all = "snake_case")]
pub enum RushKind {
    Breakaway,
    OddMan,
    Standard,
}

impl RushKind {
    pub fn from_defenders(defenders_between: Option<u8>, config: &RushConfig) -> Self {
        match defenders_between {
            Some(n) if n <= config.breakaway_max_defenders => RushKind::Breakaway,
            Some(n) if n <= config.odd_man_max_defenders => RushKind::OddMan,
            _ => RushKind::Standard,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RushAttack {
    pub shot_event_id: u64,
    /// Defensive-zone possession the rush started from.
    pub origin_event_id: u64,
    pub team_id: TeamId,
    pub shooter_id: PlayerId,
    pub period: u8,
    pub period_time_s: f64,
    /// Seconds from the origin event to the shot.
    pub transition_s: f64,
    pub kind: RushKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub defenders_between: Option<u8>,
    pub x_goal: f64,
    pub is_goal: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RushSummary {
    pub rushes: u32,
    pub breakaways: u32,
    pub odd_man: u32,
    pub standard: u32,
    pub goals: u32,
    pub xg: f64,
    /// goals / rushes; `None` without rushes.
    pub conversion_rate: Option<f64>,
}

impl RushSummary {
    pub fn from_attacks(attacks: &[RushAttack]) -> Self {
        let mut summary = attacks.iter().fold(Self::default(), |mut acc, a| {
            acc.rushes += 1;
            match a.kind {
                RushKind::Breakaway => acc.breakaways += 1,
                RushKind::OddMan => acc.odd_man += 1,
                RushKind::Standard => acc.standard += 1,
            }
            if a.is_goal {
                acc.goals += 1;
            }
            acc.xg += a.x_goal;
            acc
        });
        summary.conversion_rate = ratio(summary.goals as f64, summary.rushes as f64);
        summary
    }
}

/// Most recent defensive-zone possession by `team_id` less than
/// `max_transition_s` before `events[shot_idx]`.
fn rush_origin(events: &[PlayEvent], shot_idx: usize, team_id: TeamId, max_transition_s: f64) -> Option<&PlayEvent> {
    let shot = &events[shot_idx];
    events[..shot_idx]
        .iter()
        .rev()
        .filter(|e| e.has_valid_time())
        .take_while(|e| e.same_period(shot) && shot.period_time_s - e.period_time_s < max_transition_s)
        .find(|e| {
            e.team_id == Some(team_id)
                && e.event_type.implies_possession()
                && e.zone_for(team_id) == Some(Zone::Defensive)
        })
}

pub fn classify_rush(events: &[PlayEvent], scored: &ScoredShot, config: &RushConfig) -> Option<RushAttack> {
    let shot = &scored.shot;
    let origin = rush_origin(events, scored.event_index, shot.team_id, config.max_transition_s)?;
    let defenders_between = events[scored.event_index].defenders_between;

    Some(RushAttack {
        shot_event_id: shot.event_id,
        origin_event_id: origin.event_id,
        team_id: shot.team_id,
        shooter_id: shot.shooter_id,
        period: shot.period,
        period_time_s: shot.period_time_s,
        transition_s: shot.period_time_s - origin.period_time_s,
        kind: RushKind::from_defenders(defenders_between, config),
        defenders_between,
        x_goal: scored.x_goal(),
        is_goal: scored.is_goal(),
    })
}

/// Every rush shot in the game, optionally restricted to one team.
pub fn detect_rush_attacks(
    events: &[PlayEvent],
    team_filter: Option<TeamId>,
    scorer: &XgScorer,
    config: &RushConfig,
) -> Vec<RushAttack> {
    let attacks: Vec<RushAttack> = scorer
        .score_all(events)
        .iter()
        .filter(|s| team_filter.map_or(true, |t| s.shot.team_id == t))
        .filter_map(|s| classify_rush(events, s, config))
        .collect();
    log::debug!("rush attacks detected: {}", attacks.len());
    attacks
}
