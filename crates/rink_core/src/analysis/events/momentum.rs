//! # Momentum Tracker
//!
//! Shot-attempt share over a trailing window, sampled at fixed bucket ends
//! on the game clock (`(period - 1) * 1200 + period_time_s`).
//!
//! Value at time `t` is `(for - against) / (for + against)` over attempts in
//! `(t - window, t]`, or 0 when there are none. A swing is recorded when two
//! consecutive samples differ by more than the threshold.

use serde::{Deserialize, Serialize};

use crate::config::MomentumConfig;
use crate::models::{PlayEvent, TeamId};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MomentumSample {
    pub game_time_s: f64,
    pub attempts_for: u32,
    pub attempts_against: u32,
    /// In [-1, 1]; positive favours the tracked team.
    pub value: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MomentumSwing {
    pub game_time_s: f64,
    pub from: f64,
    pub to: f64,
    /// to - from
    pub delta: f64,
    /// Shot attempt nearest the sample time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trigger_event_id: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MomentumTimeline {
    pub team_id: TeamId,
    pub samples: Vec<MomentumSample>,
    pub swings: Vec<MomentumSwing>,
}

/// (game time, event id, is_for) for every attempt with a team and a clock.
fn attempts(events: &[PlayEvent], team_id: TeamId) -> Vec<(f64, u64, bool)> {
    events
        .iter()
        .filter(|e| e.is_shot_attempt() && e.has_valid_time())
        .filter_map(|e| e.team_id.map(|t| (e.game_time_s(), e.event_id, t == team_id)))
        .collect()
}

fn nearest_attempt(attempts: &[(f64, u64, bool)], t: f64) -> Option<u64> {
    let mut best: Option<(f64, f64, u64)> = None;
    for &(time, id, _) in attempts {
        let dist = (time - t).abs();
        let better = match best {
            None => true,
            Some((best_dist, best_time, _)) => dist < best_dist || (dist == best_dist && time < best_time),
        };
        if better {
            best = Some((dist, time, id));
        }
    }
    best.map(|(_, _, id)| id)
}

pub fn track_momentum(events: &[PlayEvent], team_id: TeamId, config: &MomentumConfig) -> MomentumTimeline {
    let mut timeline = MomentumTimeline {
        team_id,
        ..MomentumTimeline::default()
    };

    let end = events
        .iter()
        .filter(|e| e.has_valid_time())
        .map(PlayEvent::game_time_s)
        .fold(f64::NEG_INFINITY, f64::max);
    if !end.is_finite() || config.bucket_s <= 0.0 {
        return timeline;
    }

    let attempts = attempts(events, team_id);
    let bucket_count = (end / config.bucket_s).ceil().max(1.0) as usize;

    for k in 1..=bucket_count {
        let t = k as f64 * config.bucket_s;
        let (mut attempts_for, mut attempts_against) = (0u32, 0u32);
        for &(time, _, is_for) in &attempts {
            if time > t - config.window_s && time <= t {
                if is_for {
                    attempts_for += 1;
                } else {
                    attempts_against += 1;
                }
            }
        }
        let total = attempts_for + attempts_against;
        let value = if total > 0 {
            (attempts_for as f64 - attempts_against as f64) / total as f64
        } else {
            0.0
        };

        if let Some(prev) = timeline.samples.last() {
            let delta = value - prev.value;
            if delta.abs() > config.swing_threshold {
                timeline.swings.push(MomentumSwing {
                    game_time_s: t,
                    from: prev.value,
                    to: value,
                    delta,
                    trigger_event_id: nearest_attempt(&attempts, t),
                });
            }
        }

        timeline.samples.push(MomentumSample {
            game_time_s: t,
            attempts_for,
            attempts_against,
            value,
        });
    }

    log::debug!(
        "team {} momentum: {} samples, {} swings",
        team_id,
        timeline.samples.len(),
        timeline.swings.len()
    );
    timeline
}
