//! xG feature extraction: shot geometry plus the rebound and rush flags,
//! both derived from the events immediately preceding the shot.

use serde::{Deserialize, Serialize};

use super::geometry::shot_geometry;
use crate::config::ShotContextConfig;
use crate::models::{EventType, PlayEvent, ShotEvent, ShotType, Strength, TeamId, Zone};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct XGFeatures {
    pub distance_ft: f64,
    pub angle_deg: f64,
    pub shot_type: ShotType,
    pub strength: Strength,
    pub is_rebound: bool,
    pub is_rush: bool,
}

impl XGFeatures {
    pub fn from_shot(shot: &ShotEvent, is_rebound: bool, is_rush: bool) -> Self {
        let geometry = shot_geometry(shot.x, shot.y);
        Self {
            distance_ft: geometry.distance_ft,
            angle_deg: geometry.angle_deg,
            shot_type: shot.shot_type,
            strength: shot.strength,
            is_rebound,
            is_rush,
        }
    }
}

/// Walk backwards from `shot_idx` over same-period events no older than `window_s`.
fn recent_events<'a>(
    events: &'a [PlayEvent],
    shot_idx: usize,
    window_s: f64,
) -> impl Iterator<Item = &'a PlayEvent> + 'a {
    let shot = &events[shot_idx];
    events[..shot_idx]
        .iter()
        .rev()
        .take_while(move |e| e.same_period(shot) && shot.period_time_s - e.period_time_s <= window_s)
}

/// Another attempt by the same team landed within the rebound window.
pub fn is_rebound(events: &[PlayEvent], shot_idx: usize, team_id: TeamId, window_s: f64) -> bool {
    if shot_idx >= events.len() {
        return false;
    }
    recent_events(events, shot_idx, window_s)
        .any(|e| e.is_shot_attempt() && e.team_id == Some(team_id))
}

/// The shooting team entered the zone within the rush window: either a
/// `zone-entry` event of its own, or the puck seen outside the zone followed
/// directly by one of its events inside it. The shot itself counts as inside.
pub fn is_rush_chance(events: &[PlayEvent], shot_idx: usize, team_id: TeamId, window_s: f64) -> bool {
    if shot_idx >= events.len() {
        return false;
    }
    let mut later_in_zone = true;
    for e in recent_events(events, shot_idx, window_s) {
        if e.event_type == EventType::ZoneEntry && e.team_id == Some(team_id) {
            return true;
        }
        let outside = matches!(e.zone_for(team_id), Some(Zone::Neutral) | Some(Zone::Defensive));
        if outside && later_in_zone {
            return true;
        }
        later_in_zone = e.team_id == Some(team_id) && e.zone_for(team_id) == Some(Zone::Offensive);
    }
    false
}

pub fn extract_features(
    events: &[PlayEvent],
    shot_idx: usize,
    shot: &ShotEvent,
    context: &ShotContextConfig,
) -> XGFeatures {
    XGFeatures::from_shot(
        shot,
        is_rebound(events, shot_idx, shot.team_id, context.rebound_window_s),
        is_rush_chance(events, shot_idx, shot.team_id, context.rush_window_s),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ev(id: u64, t: f64, event_type: EventType, team: TeamId) -> PlayEvent {
        let mut e = PlayEvent::new(id, 1, t, event_type);
        e.team_id = Some(team);
        e.player_id = Some(id);
        e.x = Some(75.0);
        e.y = Some(5.0);
        e.zone = Some(Zone::Offensive);
        e
    }

    #[test]
    fn test_rebound_within_window() {
        let events = vec![
            ev(1, 100.0, EventType::ShotOnGoal, 1),
            ev(2, 102.0, EventType::ShotOnGoal, 1),
        ];
        assert!(is_rebound(&events, 1, 1, 3.0));
        assert!(!is_rebound(&events, 1, 1, 1.5));
    }

    #[test]
    fn test_opponent_attempt_is_not_rebound() {
        let events = vec![
            ev(1, 100.0, EventType::MissedShot, 2),
            ev(2, 101.0, EventType::ShotOnGoal, 1),
        ];
        assert!(!is_rebound(&events, 1, 1, 3.0));
    }

    #[test]
    fn test_rebound_does_not_cross_periods() {
        let mut first = ev(1, 1199.0, EventType::ShotOnGoal, 1);
        first.period = 1;
        let mut second = ev(2, 0.5, EventType::ShotOnGoal, 1);
        second.period = 2;
        assert!(!is_rebound(&[first, second], 1, 1, 3.0));
    }

    #[test]
    fn test_rush_from_neutral_zone_event() {
        let mut carry = ev(1, 50.0, EventType::Possession, 1);
        carry.zone = Some(Zone::Neutral);
        let shot = ev(2, 53.0, EventType::ShotOnGoal, 1);
        assert!(is_rush_chance(&[carry.clone(), shot.clone()], 1, 1, 4.0));
        assert!(!is_rush_chance(&[carry, shot], 1, 1, 2.0));
    }

    #[test]
    fn test_rush_from_opponent_offensive_zone_event() {
        // Opponent event in its offensive zone = shooting team's defensive zone.
        let mut opp = ev(1, 50.0, EventType::MissedShot, 2);
        opp.zone = Some(Zone::Offensive);
        let shot = ev(2, 53.0, EventType::ShotOnGoal, 1);
        assert!(is_rush_chance(&[opp, shot], 1, 1, 4.0));
    }

    #[test]
    fn test_explicit_entry_is_rush() {
        let entry = ev(1, 50.0, EventType::ZoneEntry, 1);
        let shot = ev(2, 52.0, EventType::ShotOnGoal, 1);
        assert!(is_rush_chance(&[entry, shot], 1, 1, 4.0));
    }

    #[test]
    fn test_opponent_entry_is_not_rush() {
        let entry = ev(1, 50.0, EventType::ZoneEntry, 2);
        let mut cleared = ev(2, 51.0, EventType::Giveaway, 2);
        cleared.zone = Some(Zone::Defensive);
        let shot = ev(3, 53.0, EventType::ShotOnGoal, 1);
        assert!(!is_rush_chance(&[entry, cleared, shot], 2, 1, 4.0));
    }

    #[test]
    fn test_neutral_zone_play_without_crossing_is_not_rush() {
        // Puck goes back out to neutral after the team was already in the zone,
        // and the crossing back in is by the opponent.
        let mut out = ev(1, 50.0, EventType::Possession, 1);
        out.zone = Some(Zone::Neutral);
        let mut back_in = ev(2, 51.0, EventType::Hit, 2);
        back_in.zone = Some(Zone::Defensive);
        let mut settled = ev(3, 52.0, EventType::Pass, 2);
        settled.zone = Some(Zone::Defensive);
        let shot = ev(4, 53.0, EventType::ShotOnGoal, 1);
        assert!(!is_rush_chance(&[out, back_in, settled, shot], 3, 1, 4.0));
    }

    #[test]
    fn test_settled_zone_play_is_not_rush() {
        let events = vec![
            ev(1, 50.0, EventType::Pass, 1),
            ev(2, 52.0, EventType::Pass, 1),
            ev(3, 53.0, EventType::ShotOnGoal, 1),
        ];
        assert!(!is_rush_chance(&events, 2, 1, 4.0));
    }

    #[test]
    fn test_out_of_range_index_is_false() {
        assert!(!is_rebound(&[], 0, 1, 3.0));
        assert!(!is_rush_chance(&[], 3, 1, 3.0));
    }

    #[test]
    fn test_features_carry_geometry() {
        let e = ev(1, 10.0, EventType::ShotOnGoal, 1);
        let shot = ShotEvent::from_event(&e).unwrap();
        let f = extract_features(std::slice::from_ref(&e), 0, &shot, &ShotContextConfig::default());
        assert!((f.distance_ft - (14.0f64.hypot(5.0))).abs() < 1e-9);
        assert!(!f.is_rebound && !f.is_rush);
    }
}
