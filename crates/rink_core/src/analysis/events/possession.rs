//! # Possession State Machine
//!
//! Derived puck-control state shared by the event classifiers.
//!
//! - Possession-implying events (possession, pass, zone entry, takeaway,
//!   faceoff) give control to the event's team
//! - Shot attempts, giveaways, stoppages, penalties and period boundaries
//!   return to neutral
//! - A change of period always resets to neutral first
//! - Anything else (hits, unknown events, events without a team) leaves the
//!   state unchanged

use serde::{Deserialize, Serialize};

use crate::models::{PlayEvent, TeamId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(tag = "state", content = "team_id", rename_all = "snake_case")]
pub enum PossessionState {
    #[default]
    Neutral,
    Controlled(TeamId),
}

impl PossessionState {
    pub fn is_controlled_by(&self, team_id: TeamId) -> bool {
        *self == PossessionState::Controlled(team_id)
    }
}

#[derive(Debug, Clone, Default)]
pub struct PossessionTracker {
    state: PossessionState,
    period: Option<u8>,
}

impl PossessionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> PossessionState {
        self.state
    }

    /// Apply one event and return the state after it.
    pub fn advance(&mut self, event: &PlayEvent) -> PossessionState {
        if self.period != Some(event.period) {
            self.state = PossessionState::Neutral;
            self.period = Some(event.period);
        }

        let event_type = event.event_type;
        if event_type.ends_possession() {
            self.state = PossessionState::Neutral;
        } else if event_type.implies_possession() {
            if let Some(team_id) = event.team_id {
                self.state = PossessionState::Controlled(team_id);
            }
        }
        self.state
    }
}

/// State after each event, index-aligned with `events`.
pub fn possession_timeline(events: &[PlayEvent]) -> Vec<PossessionState> {
    let mut tracker = PossessionTracker::new();
    events.iter().map(|e| tracker.advance(e)).collect()
}
