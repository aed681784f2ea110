use serde::{Deserialize, Serialize};

use super::game::{PlayerId, TeamId};
use super::shot::{ShotType, Strength};

/// Regulation period length used to lay periods end to end on one clock.
pub const PERIOD_LENGTH_S: f64 = 1200.0;

/// A normalized play-by-play record.
///
/// Only `event_id`, `period`, `period_time_s` and `event_type` are structural.
/// Everything else is optional because upstream feeds drop fields freely;
/// each analysis skips the events that lack what it needs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlayEvent {
    pub event_id: u64,
    pub period: u8,
    /// Seconds elapsed in the period.
    pub period_time_s: f64,
    #[serde(rename = "type")]
    pub event_type: EventType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_id: Option<TeamId>,
    /// Primary actor (shooter, passer, faceoff winner, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub player_id: Option<PlayerId>,
    /// Rink coordinates in feet, center ice at (0, 0).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    /// Zone relative to `team_id`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zone: Option<Zone>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shot_type: Option<ShotType>,
    /// Strength state from the point of view of `team_id`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strength: Option<Strength>,
    /// Skaters on ice for `team_id`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub on_ice_for: Vec<PlayerId>,
    /// Skaters on ice for the opponent.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub on_ice_against: Vec<PlayerId>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub assists: Vec<PlayerId>,
    /// Pass receiver, for sources that tag passes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_player_id: Option<PlayerId>,
    /// Defending skaters between puck and net at shot time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub defenders_between: Option<u8>,
    /// Entry label, for sources that tag zone entries.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entry_kind: Option<EntryKind>,
}

impl PlayEvent {
    /// Bare event with only the structural fields set.
    pub fn new(event_id: u64, period: u8, period_time_s: f64, event_type: EventType) -> Self {
        Self {
            event_id,
            period,
            period_time_s,
            event_type,
            team_id: None,
            player_id: None,
            x: None,
            y: None,
            zone: None,
            shot_type: None,
            strength: None,
            on_ice_for: Vec::new(),
            on_ice_against: Vec::new(),
            assists: Vec::new(),
            target_player_id: None,
            defenders_between: None,
            entry_kind: None,
        }
    }

    /// Seconds since the opening faceoff, periods laid end to end.
    pub fn game_time_s(&self) -> f64 {
        f64::from(self.period.saturating_sub(1)) * PERIOD_LENGTH_S + self.period_time_s
    }

    /// Both coordinates, when present and finite.
    pub fn position(&self) -> Option<(f64, f64)> {
        match (self.x, self.y) {
            (Some(x), Some(y)) if x.is_finite() && y.is_finite() => Some((x, y)),
            _ => None,
        }
    }

    /// Zone seen from `team_id`, flipping the event team's zone for the opponent.
    pub fn zone_for(&self, team_id: TeamId) -> Option<Zone> {
        let event_team = self.team_id?;
        let zone = self.zone?;
        if event_team == team_id {
            Some(zone)
        } else {
            Some(zone.flipped())
        }
    }

    pub fn is_shot_attempt(&self) -> bool {
        self.event_type.is_shot_attempt()
    }

    pub fn same_period(&self, other: &PlayEvent) -> bool {
        self.period == other.period
    }

    /// Event has a usable clock reading: a real period and a time inside it.
    pub fn has_valid_time(&self) -> bool {
        self.period > 0 && (0.0..=PERIOD_LENGTH_S).contains(&self.period_time_s)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[cfg_attr(test, derive(strum_macros::EnumIter))]
#[serde(rename_all = "kebab-case")]
pub enum EventType {
    Faceoff,
    Hit,
    Giveaway,
    Takeaway,
    Pass,
    #[serde(alias = "entry")]
    ZoneEntry,
    #[serde(alias = "carry", alias = "puck-recovery")]
    Possession,
    #[serde(alias = "shot", alias = "shot_on_goal")]
    ShotOnGoal,
    #[serde(alias = "miss", alias = "missed_shot")]
    MissedShot,
    #[serde(alias = "block", alias = "blocked_shot")]
    BlockedShot,
    Goal,
    Penalty,
    Stoppage,
    PeriodStart,
    PeriodEnd,
    /// Anything the engine does not interpret.
    #[serde(other)]
    Other,
}

impl EventType {
    /// Parse an upstream free-text label ("Shot on Goal", "missed_shot", ...).
    pub fn from_label(label: &str) -> Self {
        let normalized: String = label
            .trim()
            .to_ascii_lowercase()
            .chars()
            .map(|c| if c == '_' || c == ' ' { '-' } else { c })
            .collect();
        match normalized.as_str() {
            "faceoff" => EventType::Faceoff,
            "hit" => EventType::Hit,
            "giveaway" => EventType::Giveaway,
            "takeaway" => EventType::Takeaway,
            "pass" => EventType::Pass,
            "zone-entry" | "entry" => EventType::ZoneEntry,
            "possession" | "carry" | "puck-recovery" => EventType::Possession,
            "shot-on-goal" | "shot" => EventType::ShotOnGoal,
            "missed-shot" | "miss" => EventType::MissedShot,
            "blocked-shot" | "block" => EventType::BlockedShot,
            "goal" => EventType::Goal,
            "penalty" => EventType::Penalty,
            "stoppage" => EventType::Stoppage,
            "period-start" => EventType::PeriodStart,
            "period-end" => EventType::PeriodEnd,
            _ => EventType::Other,
        }
    }

    /// Corsi event: any shot attempt, blocked or not.
    pub fn is_shot_attempt(&self) -> bool {
        matches!(
            self,
            EventType::ShotOnGoal | EventType::MissedShot | EventType::BlockedShot | EventType::Goal
        )
    }

    /// The acting team has the puck on its stick when this is recorded.
    pub fn implies_possession(&self) -> bool {
        matches!(
            self,
            EventType::Faceoff
                | EventType::Takeaway
                | EventType::Pass
                | EventType::ZoneEntry
                | EventType::Possession
        )
    }

    /// Play is dead or the puck is loose afterwards.
    pub fn ends_possession(&self) -> bool {
        self.is_shot_attempt()
            || matches!(
                self,
                EventType::Giveaway
                    | EventType::Penalty
                    | EventType::Stoppage
                    | EventType::PeriodStart
                    | EventType::PeriodEnd
            )
    }
}

/// Rink zone relative to a team.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Zone {
    #[serde(alias = "O", alias = "off")]
    Offensive,
    #[serde(alias = "N", alias = "neu")]
    Neutral,
    #[serde(alias = "D", alias = "def")]
    Defensive,
}

impl Zone {
    /// Same area seen from the other bench.
    pub fn flipped(self) -> Self {
        match self {
            Zone::Offensive => Zone::Defensive,
            Zone::Neutral => Zone::Neutral,
            Zone::Defensive => Zone::Offensive,
        }
    }
}

/// How the puck got into the offensive zone.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    /// Carried in with possession.
    Controlled,
    /// Shot or chipped in without possession continuity.
    Dump,
    /// Received across the line from a teammate.
    Pass,
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_game_time_lays_periods_end_to_end() {
        let e = PlayEvent::new(1, 2, 30.0, EventType::Hit);
        assert_eq!(e.game_time_s(), 1230.0);
        let first = PlayEvent::new(2, 1, 0.0, EventType::Faceoff);
        assert_eq!(first.game_time_s(), 0.0);
    }

    #[test]
    fn test_valid_time_stays_inside_one_period() {
        assert!(PlayEvent::new(1, 1, 0.0, EventType::Hit).has_valid_time());
        assert!(PlayEvent::new(1, 3, PERIOD_LENGTH_S, EventType::Hit).has_valid_time());
        assert!(!PlayEvent::new(1, 0, 10.0, EventType::Hit).has_valid_time());
        assert!(!PlayEvent::new(1, 1, -1.0, EventType::Hit).has_valid_time());
        assert!(!PlayEvent::new(1, 1, 1e12, EventType::Hit).has_valid_time());
        assert!(!PlayEvent::new(1, 1, f64::NAN, EventType::Hit).has_valid_time());
    }

    #[test]
    fn test_position_requires_both_finite() {
        let mut e = PlayEvent::new(1, 1, 0.0, EventType::Hit);
        assert_eq!(e.position(), None);
        e.x = Some(10.0);
        assert_eq!(e.position(), None);
        e.y = Some(f64::NAN);
        assert_eq!(e.position(), None);
        e.y = Some(-5.0);
        assert_eq!(e.position(), Some((10.0, -5.0)));
    }

    #[test]
    fn test_zone_for_flips_for_opponent() {
        let mut e = PlayEvent::new(1, 1, 0.0, EventType::Takeaway);
        e.team_id = Some(1);
        e.zone = Some(Zone::Defensive);
        assert_eq!(e.zone_for(1), Some(Zone::Defensive));
        assert_eq!(e.zone_for(2), Some(Zone::Offensive));
        e.zone = Some(Zone::Neutral);
        assert_eq!(e.zone_for(2), Some(Zone::Neutral));
    }

    #[test]
    fn test_unknown_event_type_deserializes_to_other() {
        let json = r#"{"event_id": 7, "period": 1, "period_time_s": 12.5, "type": "delayed-penalty"}"#;
        let event: PlayEvent = serde_json::from_str(json).unwrap();
        assert_eq!(event.event_type, EventType::Other);
        assert_eq!(event.team_id, None);
    }

    #[test]
    fn test_event_type_aliases() {
        let json = r#"{"event_id": 7, "period": 1, "period_time_s": 1.0, "type": "shot", "zone": "O"}"#;
        let event: PlayEvent = serde_json::from_str(json).unwrap();
        assert_eq!(event.event_type, EventType::ShotOnGoal);
        assert_eq!(event.zone, Some(Zone::Offensive));
    }

    #[test]
    fn test_from_label_round_trips_canonical_names() {
        for event_type in EventType::iter() {
            let label = serde_json::to_value(event_type).unwrap();
            let label = label.as_str().unwrap();
            assert_eq!(EventType::from_label(label), event_type, "label {}", label);
        }
        assert_eq!(EventType::from_label("Shot on Goal"), EventType::ShotOnGoal);
        assert_eq!(EventType::from_label("BLOCKED_SHOT"), EventType::BlockedShot);
    }

    #[test]
    fn test_possession_flags_are_disjoint() {
        for event_type in EventType::iter() {
            assert!(
                !(event_type.implies_possession() && event_type.ends_possession()),
                "{:?}",
                event_type
            );
        }
    }
}
