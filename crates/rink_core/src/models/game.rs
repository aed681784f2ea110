use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::events::PlayEvent;
use super::shot::ShotEvent;

pub type GameId = u64;
pub type TeamId = u32;
pub type PlayerId = u64;

/// One game's normalized play-by-play, as handed over by the fetch layer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GameFeed {
    pub game_id: GameId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub game_date: Option<NaiveDate>,
    pub home_team: TeamId,
    pub away_team: TeamId,
    /// Chronologically ordered events.
    #[serde(default)]
    pub events: Vec<PlayEvent>,
}

impl GameFeed {
    /// The other team in this game, if `team_id` played in it.
    pub fn opponent_of(&self, team_id: TeamId) -> Option<TeamId> {
        if team_id == self.home_team {
            Some(self.away_team)
        } else if team_id == self.away_team {
            Some(self.home_team)
        } else {
            None
        }
    }
}

/// Whose point of view a metric is computed from.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Subject {
    Team { team_id: TeamId },
    /// A skater; `team_id` is the team the player dressed for.
    Player { player_id: PlayerId, team_id: TeamId },
}

impl Subject {
    pub fn team_id(&self) -> TeamId {
        match self {
            Subject::Team { team_id } | Subject::Player { team_id, .. } => *team_id,
        }
    }

    pub fn player_id(&self) -> Option<PlayerId> {
        match self {
            Subject::Team { .. } => None,
            Subject::Player { player_id, .. } => Some(*player_id),
        }
    }

    /// Shot taken by the subject's side while the subject was involved.
    ///
    /// A player counts as involved when listed on ice for the shooting team
    /// or when they took the shot themselves (on-ice lists are often absent).
    pub fn is_for(&self, shot: &ShotEvent) -> bool {
        match self {
            Subject::Team { team_id } => shot.team_id == *team_id,
            Subject::Player { player_id, team_id } => {
                shot.team_id == *team_id
                    && (shot.shooter_id == *player_id || shot.on_ice_for.contains(player_id))
            }
        }
    }

    /// Shot taken against the subject's side while the subject was on ice.
    pub fn is_against(&self, shot: &ShotEvent) -> bool {
        match self {
            Subject::Team { team_id } => shot.team_id != *team_id,
            Subject::Player { player_id, team_id } => {
                shot.team_id != *team_id && shot.on_ice_against.contains(player_id)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::shot::{ShotResult, ShotType, Strength};

    fn shot(team_id: TeamId, shooter_id: PlayerId) -> ShotEvent {
        ShotEvent {
            event_id: 1,
            period: 1,
            period_time_s: 10.0,
            x: 70.0,
            y: 0.0,
            shooter_id,
            team_id,
            result: ShotResult::ShotOnGoal,
            shot_type: ShotType::Wrist,
            strength: Strength::EvenFive,
            on_ice_for: vec![11, 12],
            on_ice_against: vec![21, 22],
        }
    }

    #[test]
    fn test_team_subject_membership() {
        let subject = Subject::Team { team_id: 1 };
        assert!(subject.is_for(&shot(1, 11)));
        assert!(!subject.is_against(&shot(1, 11)));
        assert!(subject.is_against(&shot(2, 21)));
    }

    #[test]
    fn test_player_subject_uses_on_ice_lists() {
        let on_ice = Subject::Player { player_id: 12, team_id: 1 };
        assert!(on_ice.is_for(&shot(1, 11)));

        let bench = Subject::Player { player_id: 19, team_id: 1 };
        assert!(!bench.is_for(&shot(1, 11)));
        assert!(bench.is_for(&shot(1, 19)), "shooter always counts");

        let defender = Subject::Player { player_id: 21, team_id: 2 };
        let mut against = shot(1, 11);
        against.on_ice_against = vec![21];
        assert!(defender.is_against(&against));
    }

    #[test]
    fn test_opponent_of() {
        let feed = GameFeed {
            game_id: 1,
            game_date: None,
            home_team: 10,
            away_team: 20,
            events: vec![],
        };
        assert_eq!(feed.opponent_of(10), Some(20));
        assert_eq!(feed.opponent_of(20), Some(10));
        assert_eq!(feed.opponent_of(30), None);
    }
}
