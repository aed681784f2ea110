//! # Royal-Road Pass Detector
//!
//! Cross-ice passes through the slot's center line that force the goalie to
//! move laterally.
//!
//! ## Algorithm
//! 1. Walk consecutive event pairs A → B
//! 2. Require same team, different players, same period, gap ≤ max pass gap,
//!    and possession controlled by that team at A
//! 3. Qualify on geometry: |yB - yA| ≥ min cross-ice distance, y changes
//!    sign, |xB| inside the slot range
//! 4. Link the receiver's first shot attempt within the follow-up window
//!    (B itself included)
//!
//! No explicit pass event type is needed; any two consecutive actions by
//! teammates count as a pass between them.

use serde::{Deserialize, Serialize};

use super::possession::{possession_timeline, PossessionState};
use crate::config::RoyalRoadConfig;
use crate::models::{PlayEvent, PlayerId, TeamId};
use crate::xg::geometry::{crosses_center_line, in_slot_range, lateral_displacement};
use crate::xg::{ScoredShot, XgScorer};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoyalRoadPass {
    pub source_event_id: u64,
    pub receiving_event_id: u64,
    pub team_id: TeamId,
    pub passer_id: PlayerId,
    pub receiver_id: PlayerId,
    pub period: u8,
    pub period_time_s: f64,
    pub from: (f64, f64),
    pub to: (f64, f64),
    pub lateral_ft: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shot_event_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shot_xg: Option<f64>,
    pub resulted_in_goal: bool,
}

impl RoyalRoadPass {
    pub fn led_to_shot(&self) -> bool {
        self.shot_event_id.is_some()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoyalRoadSummary {
    pub passes: u32,
    pub shots: u32,
    pub goals: u32,
    pub xg: f64,
}

impl RoyalRoadSummary {
    pub fn from_passes(passes: &[RoyalRoadPass]) -> Self {
        passes.iter().fold(Self::default(), |mut acc, p| {
            acc.passes += 1;
            if p.led_to_shot() {
                acc.shots += 1;
            }
            if p.resulted_in_goal {
                acc.goals += 1;
            }
            acc.xg += p.shot_xg.unwrap_or(0.0);
            acc
        })
    }
}

/// Passes between teammates A → B where both events are usable.
fn pass_pair(a: &PlayEvent, b: &PlayEvent, max_gap_s: f64) -> Option<(TeamId, PlayerId, PlayerId)> {
    if !a.has_valid_time() || !b.has_valid_time() || !a.same_period(b) {
        return None;
    }
    let team_id = a.team_id?;
    if b.team_id != Some(team_id) {
        return None;
    }
    let passer = a.player_id?;
    let receiver = b.player_id?;
    if passer == receiver {
        return None;
    }
    let gap = b.period_time_s - a.period_time_s;
    if !(0.0..=max_gap_s).contains(&gap) {
        return None;
    }
    Some((team_id, passer, receiver))
}

fn follow_up_shot(
    events: &[PlayEvent],
    receive_idx: usize,
    receiver: PlayerId,
    window_s: f64,
    scorer: &XgScorer,
) -> Option<ScoredShot> {
    let received = &events[receive_idx];
    events[receive_idx..]
        .iter()
        .enumerate()
        .take_while(|(_, e)| {
            e.same_period(received) && e.period_time_s - received.period_time_s <= window_s
        })
        .filter(|(_, e)| e.is_shot_attempt() && e.player_id == Some(receiver))
        .find_map(|(offset, _)| scorer.score_event(events, receive_idx + offset))
}

/// All royal-road passes in the game, optionally restricted to one team.
pub fn detect_royal_road_passes(
    events: &[PlayEvent],
    team_filter: Option<TeamId>,
    scorer: &XgScorer,
    config: &RoyalRoadConfig,
) -> Vec<RoyalRoadPass> {
    let timeline = possession_timeline(events);
    let mut passes = Vec::new();

    for i in 0..events.len().saturating_sub(1) {
        let (a, b) = (&events[i], &events[i + 1]);
        let Some((team_id, passer_id, receiver_id)) = pass_pair(a, b, config.max_pass_gap_s) else {
            continue;
        };
        if team_filter.is_some_and(|t| t != team_id) {
            continue;
        }
        if timeline[i] != PossessionState::Controlled(team_id) {
            continue;
        }
        let (Some(from), Some(to)) = (a.position(), b.position()) else {
            continue;
        };
        let lateral_ft = lateral_displacement(from.1, to.1);
        if lateral_ft < config.min_cross_ice_ft
            || !crosses_center_line(from.1, to.1)
            || !in_slot_range(to.0, config.slot_min_x, config.slot_max_x)
        {
            continue;
        }

        let shot = follow_up_shot(events, i + 1, receiver_id, config.shot_follow_up_s, scorer);
        passes.push(RoyalRoadPass {
            source_event_id: a.event_id,
            receiving_event_id: b.event_id,
            team_id,
            passer_id,
            receiver_id,
            period: b.period,
            period_time_s: b.period_time_s,
            from,
            to,
            lateral_ft,
            shot_event_id: shot.as_ref().map(|s| s.shot.event_id),
            shot_xg: shot.as_ref().map(ScoredShot::x_goal),
            resulted_in_goal: shot.as_ref().is_some_and(ScoredShot::is_goal),
        });
    }

    log::debug!("royal-road passes detected: {}", passes.len());
    passes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EventType, Zone};

    fn ev(id: u64, t: f64, event_type: EventType, team: TeamId, player: PlayerId, x: f64, y: f64) -> PlayEvent {
        let mut e = PlayEvent::new(id, 1, t, event_type);
        e.team_id = Some(team);
        e.player_id = Some(player);
        e.x = Some(x);
        e.y = Some(y);
        e.zone = Some(Zone::Offensive);
        e
    }

    fn cross_ice_sequence() -> Vec<PlayEvent> {
        vec![
            ev(1, 100.0, EventType::Possession, 1, 10, 60.0, 15.0),
            ev(2, 101.0, EventType::Pass, 1, 11, 70.0, -12.0),
            ev(3, 102.0, EventType::Goal, 1, 11, 75.0, -10.0),
        ]
    }

    #[test]
    fn test_detects_cross_ice_pass_and_links_goal() {
        let passes = detect_royal_road_passes(
            &cross_ice_sequence(),
            None,
            &XgScorer::default(),
            &RoyalRoadConfig::default(),
        );
        // 1 → 2 qualifies; 2 → 3 is the same player.
        assert_eq!(passes.len(), 1);
        let p = &passes[0];
        assert_eq!(p.source_event_id, 1);
        assert_eq!(p.receiving_event_id, 2);
        assert_eq!(p.lateral_ft, 27.0);
        assert_eq!(p.shot_event_id, Some(3));
        assert!(p.resulted_in_goal);
        assert!(p.shot_xg.unwrap() > 0.0);

        let summary = RoyalRoadSummary::from_passes(&passes);
        assert_eq!(summary.passes, 1);
        assert_eq!(summary.shots, 1);
        assert_eq!(summary.goals, 1);
    }

    #[test]
    fn test_same_side_pass_is_ignored() {
        let mut events = cross_ice_sequence();
        events[1].y = Some(40.0);
        assert!(detect_royal_road_passes(&events, None, &XgScorer::default(), &RoyalRoadConfig::default()).is_empty());
    }

    #[test]
    fn test_receiver_outside_slot_is_ignored() {
        let mut events = cross_ice_sequence();
        events[1].x = Some(40.0);
        assert!(detect_royal_road_passes(&events, None, &XgScorer::default(), &RoyalRoadConfig::default()).is_empty());
    }

    #[test]
    fn test_requires_possession_at_source() {
        let mut events = cross_ice_sequence();
        // A hit does not establish possession.
        events[0].event_type = EventType::Hit;
        assert!(detect_royal_road_passes(&events, None, &XgScorer::default(), &RoyalRoadConfig::default()).is_empty());
    }

    #[test]
    fn test_slow_pass_is_ignored() {
        let mut events = cross_ice_sequence();
        events[1].period_time_s = 104.0;
        events[2].period_time_s = 105.0;
        assert!(detect_royal_road_passes(&events, None, &XgScorer::default(), &RoyalRoadConfig::default()).is_empty());
    }

    #[test]
    fn test_receiving_event_can_be_the_shot() {
        let mut events = cross_ice_sequence();
        events.truncate(1);
        events.push(ev(2, 101.0, EventType::ShotOnGoal, 1, 11, 78.0, -8.0));
        let passes = detect_royal_road_passes(&events, None, &XgScorer::default(), &RoyalRoadConfig::default());
        assert_eq!(passes.len(), 1);
        assert_eq!(passes[0].shot_event_id, Some(2));
        assert!(!passes[0].resulted_in_goal);
    }

    #[test]
    fn test_late_shot_is_not_linked() {
        let mut events = cross_ice_sequence();
        events[2].period_time_s = 110.0;
        let passes = detect_royal_road_passes(&events, None, &XgScorer::default(), &RoyalRoadConfig::default());
        assert_eq!(passes.len(), 1);
        assert_eq!(passes[0].shot_event_id, None);
        assert_eq!(RoyalRoadSummary::from_passes(&passes).xg, 0.0);
    }

    #[test]
    fn test_team_filter() {
        let passes = detect_royal_road_passes(
            &cross_ice_sequence(),
            Some(2),
            &XgScorer::default(),
            &RoyalRoadConfig::default(),
        );
        assert!(passes.is_empty());
    }
}
