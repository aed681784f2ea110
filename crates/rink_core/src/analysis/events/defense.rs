//! Defensive coverage: shots against while the subject was on ice, split by
//! danger tier, with the save rate on high-danger shots on goal.

use serde::{Deserialize, Serialize};

use crate::analysis::metrics::game_metrics::ratio;
use crate::models::{PlayEvent, Subject};
use crate::xg::{DangerTier, XgScorer};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TierCoverage {
    pub tier: DangerTier,
    pub shots_against: u32,
    pub goals_against: u32,
    pub xg_against: f64,
}

impl TierCoverage {
    fn empty(tier: DangerTier) -> Self {
        Self {
            tier,
            shots_against: 0,
            goals_against: 0,
            xg_against: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefensiveCoverage {
    pub subject: Subject,
    /// Low, medium, high.
    pub by_tier: [TierCoverage; 3],
    pub high_danger_shots_against: u32,
    pub high_danger_on_goal: u32,
    pub high_danger_saves: u32,
    /// saves / high-danger shots on goal; `None` without any.
    pub high_danger_save_pct: Option<f64>,
    pub xg_against: f64,
}

impl DefensiveCoverage {
    pub fn tier(&self, tier: DangerTier) -> &TierCoverage {
        &self.by_tier[tier_slot(tier)]
    }
}

fn tier_slot(tier: DangerTier) -> usize {
    match tier {
        DangerTier::Low => 0,
        DangerTier::Medium => 1,
        DangerTier::High => 2,
    }
}

pub fn analyze_coverage(events: &[PlayEvent], subject: &Subject, scorer: &XgScorer) -> DefensiveCoverage {
    let mut by_tier = [
        TierCoverage::empty(DangerTier::Low),
        TierCoverage::empty(DangerTier::Medium),
        TierCoverage::empty(DangerTier::High),
    ];
    let mut high_danger_on_goal = 0u32;
    let mut high_danger_saves = 0u32;
    let mut xg_against = 0.0;

    for scored in scorer.score_all(events) {
        if !subject.is_against(&scored.shot) {
            continue;
        }
        let tier = scored.prediction.tier;
        let slot = &mut by_tier[tier_slot(tier)];
        slot.shots_against += 1;
        slot.xg_against += scored.x_goal();
        xg_against += scored.x_goal();
        if scored.is_goal() {
            slot.goals_against += 1;
        }

        if tier == DangerTier::High && scored.shot.result.is_on_goal() {
            high_danger_on_goal += 1;
            if !scored.is_goal() {
                high_danger_saves += 1;
            }
        }
    }

    DefensiveCoverage {
        subject: *subject,
        high_danger_shots_against: by_tier[tier_slot(DangerTier::High)].shots_against,
        by_tier,
        high_danger_on_goal,
        high_danger_saves,
        high_danger_save_pct: ratio(high_danger_saves as f64, high_danger_on_goal as f64),
        xg_against,
    }
}
