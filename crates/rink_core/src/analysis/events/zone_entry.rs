//! # Zone-Entry Classifier
//!
//! Detects offensive-zone entries for one team and labels how the puck got
//! there.
//!
//! ## Detection
//! - The puck's zone relative to the team moves from neutral/defensive to
//!   offensive (opponent events count with their zone flipped)
//! - An explicit `zone-entry` event by the team counts unless the puck is
//!   already tracked in the zone; then its tag relabels the open entry
//! - Faceoffs, stoppages and period boundaries only reset the tracked zone
//!
//! ## Labels
//! An `entry_kind` tag on the event wins. Otherwise the entering event is
//! compared with the event just before it: same team, inside the continuity
//! gap, with the team in possession. Same carrier → `Controlled`, another
//! teammate → `Pass`, no continuity → `Dump`.

use serde::{Deserialize, Serialize};

use super::possession::{possession_timeline, PossessionState};
use crate::analysis::metrics::game_metrics::ratio;
use crate::config::ZoneEntryConfig;
use crate::models::{EntryKind, EventType, PlayEvent, PlayerId, TeamId, Zone};
use crate::xg::{ScoredShot, XgScorer};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneEntry {
    /// Event at which the puck was first seen in the zone.
    pub event_id: u64,
    pub team_id: TeamId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub player_id: Option<PlayerId>,
    pub period: u8,
    pub period_time_s: f64,
    pub kind: EntryKind,
    /// Label came from the feed rather than inference.
    pub tagged: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shot_event_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shot_xg: Option<f64>,
}

impl ZoneEntry {
    pub fn led_to_shot(&self) -> bool {
        self.shot_event_id.is_some()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ZoneEntrySummary {
    pub entries: u32,
    pub controlled: u32,
    pub dump: u32,
    pub pass: u32,
    /// controlled / entries; `None` without entries.
    pub controlled_rate: Option<f64>,
    pub entries_with_shot: u32,
    pub shot_xg: f64,
}

impl ZoneEntrySummary {
    pub fn from_entries(entries: &[ZoneEntry]) -> Self {
        let mut summary = entries.iter().fold(Self::default(), |mut acc, e| {
            acc.entries += 1;
            match e.kind {
                EntryKind::Controlled => acc.controlled += 1,
                EntryKind::Dump => acc.dump += 1,
                EntryKind::Pass => acc.pass += 1,
            }
            if e.led_to_shot() {
                acc.entries_with_shot += 1;
            }
            acc.shot_xg += e.shot_xg.unwrap_or(0.0);
            acc
        });
        summary.controlled_rate = ratio(summary.controlled as f64, summary.entries as f64);
        summary
    }
}

fn resets_zone(event_type: EventType) -> bool {
    matches!(
        event_type,
        EventType::Faceoff | EventType::Stoppage | EventType::PeriodStart | EventType::PeriodEnd
    )
}

/// Infer the label from the event preceding the entering one.
fn infer_kind(
    entering: &PlayEvent,
    previous: Option<(&PlayEvent, PossessionState)>,
    team_id: TeamId,
    continuity_gap_s: f64,
) -> EntryKind {
    if entering.team_id != Some(team_id) {
        return EntryKind::Dump;
    }
    let Some((prev, state)) = previous else {
        return EntryKind::Dump;
    };
    let continuous = prev.team_id == Some(team_id)
        && state.is_controlled_by(team_id)
        && entering.period_time_s - prev.period_time_s <= continuity_gap_s;
    if !continuous {
        return EntryKind::Dump;
    }
    match (prev.player_id, entering.player_id) {
        (Some(a), Some(b)) if a == b => EntryKind::Controlled,
        (Some(_), Some(_)) => EntryKind::Pass,
        _ => EntryKind::Dump,
    }
}

/// First shot by the team inside the follow-up window while the puck stays in.
fn follow_up_shot(
    events: &[PlayEvent],
    entry_idx: usize,
    team_id: TeamId,
    window_s: f64,
    scorer: &XgScorer,
) -> Option<ScoredShot> {
    let entering = &events[entry_idx];
    for (offset, e) in events[entry_idx..].iter().enumerate() {
        if !e.same_period(entering) || e.period_time_s - entering.period_time_s > window_s {
            return None;
        }
        if matches!(e.zone_for(team_id), Some(Zone::Neutral) | Some(Zone::Defensive)) {
            return None;
        }
        if e.is_shot_attempt() && e.team_id == Some(team_id) {
            if let Some(scored) = scorer.score_event(events, entry_idx + offset) {
                return Some(scored);
            }
        }
    }
    None
}

pub fn classify_zone_entries(
    events: &[PlayEvent],
    team_id: TeamId,
    scorer: &XgScorer,
    config: &ZoneEntryConfig,
) -> Vec<ZoneEntry> {
    let timeline = possession_timeline(events);
    let mut entries: Vec<ZoneEntry> = Vec::new();
    let mut zone: Option<Zone> = None;
    let mut period: Option<u8> = None;
    let mut previous: Option<usize> = None;
    // Entry whose zone stay has not ended yet.
    let mut open_entry: Option<usize> = None;

    for (idx, event) in events.iter().enumerate() {
        if !event.has_valid_time() {
            continue;
        }
        if period != Some(event.period) {
            period = Some(event.period);
            zone = None;
            previous = None;
            open_entry = None;
        }

        let current = event.zone_for(team_id);
        if resets_zone(event.event_type) {
            zone = current;
            previous = Some(idx);
            open_entry = None;
            continue;
        }

        let explicit = event.event_type == EventType::ZoneEntry && event.team_id == Some(team_id);
        let crossed = matches!(zone, Some(Zone::Neutral) | Some(Zone::Defensive))
            && current == Some(Zone::Offensive);

        if explicit && zone == Some(Zone::Offensive) {
            if let (Some(open), Some(kind)) = (open_entry, event.entry_kind) {
                let entry = &mut entries[open];
                if !entry.tagged {
                    entry.kind = kind;
                    entry.tagged = true;
                }
            }
        } else if explicit || crossed {
            let (kind, tagged) = match event.entry_kind {
                Some(kind) if event.team_id == Some(team_id) => (kind, true),
                _ => (
                    infer_kind(
                        event,
                        previous.map(|p| (&events[p], timeline[p])),
                        team_id,
                        config.continuity_gap_s,
                    ),
                    false,
                ),
            };
            let shot = follow_up_shot(events, idx, team_id, config.shot_follow_up_s, scorer);
            entries.push(ZoneEntry {
                event_id: event.event_id,
                team_id,
                player_id: event.player_id.filter(|_| event.team_id == Some(team_id)),
                period: event.period,
                period_time_s: event.period_time_s,
                kind,
                tagged,
                shot_event_id: shot.as_ref().map(|s| s.shot.event_id),
                shot_xg: shot.as_ref().map(ScoredShot::x_goal),
            });
            zone = Some(Zone::Offensive);
            open_entry = Some(entries.len() - 1);
        } else if current.is_some() {
            zone = current;
            if current != Some(Zone::Offensive) {
                open_entry = None;
            }
        }
        previous = Some(idx);
    }

    log::debug!("team {} zone entries: {}", team_id, entries.len());
    entries
}
