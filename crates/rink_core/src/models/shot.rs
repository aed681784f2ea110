use serde::{Deserialize, Serialize};

use super::events::{EventType, PlayEvent};
use super::game::{PlayerId, TeamId};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[cfg_attr(test, derive(strum_macros::EnumIter))]
#[serde(rename_all = "kebab-case")]
pub enum ShotResult {
    Goal,
    ShotOnGoal,
    MissedShot,
    BlockedShot,
}

impl ShotResult {
    pub fn from_event_type(event_type: EventType) -> Option<Self> {
        match event_type {
            EventType::Goal => Some(ShotResult::Goal),
            EventType::ShotOnGoal => Some(ShotResult::ShotOnGoal),
            EventType::MissedShot => Some(ShotResult::MissedShot),
            EventType::BlockedShot => Some(ShotResult::BlockedShot),
            _ => None,
        }
    }

    /// Fenwick event.
    pub fn is_unblocked(&self) -> bool {
        !matches!(self, ShotResult::BlockedShot)
    }

    /// Reached the goaltender (or the net).
    pub fn is_on_goal(&self) -> bool {
        matches!(self, ShotResult::Goal | ShotResult::ShotOnGoal)
    }

    pub fn is_goal(&self) -> bool {
        matches!(self, ShotResult::Goal)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[cfg_attr(test, derive(strum_macros::EnumIter))]
#[serde(rename_all = "kebab-case")]
pub enum ShotType {
    #[serde(alias = "wrist-shot")]
    Wrist,
    #[serde(alias = "slap-shot")]
    Slap,
    #[serde(alias = "snap-shot")]
    Snap,
    Backhand,
    #[serde(alias = "tip-in", alias = "deflected")]
    Tip,
    #[serde(alias = "wrap-around")]
    Wrap,
    /// Unrecognised upstream label; scored with a neutral multiplier.
    #[serde(other)]
    Other,
}

impl ShotType {
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().replace(['_', ' '], "-").as_str() {
            "wrist" | "wrist-shot" => ShotType::Wrist,
            "slap" | "slap-shot" => ShotType::Slap,
            "snap" | "snap-shot" => ShotType::Snap,
            "backhand" => ShotType::Backhand,
            "tip" | "tip-in" | "deflected" => ShotType::Tip,
            "wrap" | "wrap-around" => ShotType::Wrap,
            _ => ShotType::Other,
        }
    }
}

/// Manpower situation from the shooting team's point of view.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[cfg_attr(test, derive(strum_macros::EnumIter))]
pub enum Strength {
    #[serde(rename = "5v5", alias = "ev", alias = "even")]
    EvenFive,
    #[serde(rename = "PP", alias = "pp", alias = "power-play")]
    PowerPlay,
    #[serde(rename = "SH", alias = "sh", alias = "short-handed")]
    ShortHanded,
    #[serde(rename = "4v4")]
    FourOnFour,
    #[serde(rename = "3v3")]
    ThreeOnThree,
    #[serde(other)]
    Other,
}

impl Strength {
    /// Infer the situation from skater counts (goaltenders excluded).
    pub fn from_skaters(shooting: usize, defending: usize) -> Self {
        match (shooting, defending) {
            (5, 5) => Strength::EvenFive,
            (4, 4) => Strength::FourOnFour,
            (3, 3) => Strength::ThreeOnThree,
            (s, d) if s > d && d >= 3 => Strength::PowerPlay,
            (s, d) if s < d && s >= 3 => Strength::ShortHanded,
            _ => Strength::Other,
        }
    }
}

/// A single shot attempt extracted from the play-by-play.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ShotEvent {
    pub event_id: u64,
    pub period: u8,
    pub period_time_s: f64,
    pub x: f64,
    pub y: f64,
    pub shooter_id: PlayerId,
    /// Shooting team, also for blocked shots.
    pub team_id: TeamId,
    pub result: ShotResult,
    pub shot_type: ShotType,
    pub strength: Strength,
    pub on_ice_for: Vec<PlayerId>,
    pub on_ice_against: Vec<PlayerId>,
}

impl ShotEvent {
    /// Build from a play event; `None` when the event is not a shot attempt
    /// or lacks a shooter, team, or coordinates.
    pub fn from_event(event: &PlayEvent) -> Option<Self> {
        let result = ShotResult::from_event_type(event.event_type)?;
        if !event.has_valid_time() {
            return None;
        }
        let (x, y) = event.position()?;
        let team_id = event.team_id?;
        let shooter_id = event.player_id?;

        let strength = event.strength.unwrap_or_else(|| {
            if event.on_ice_for.is_empty() || event.on_ice_against.is_empty() {
                Strength::Other
            } else {
                Strength::from_skaters(event.on_ice_for.len(), event.on_ice_against.len())
            }
        });

        Some(Self {
            event_id: event.event_id,
            period: event.period,
            period_time_s: event.period_time_s,
            x,
            y,
            shooter_id,
            team_id,
            result,
            shot_type: event.shot_type.unwrap_or(ShotType::Other),
            strength,
            on_ice_for: event.on_ice_for.clone(),
            on_ice_against: event.on_ice_against.clone(),
        })
    }
}
