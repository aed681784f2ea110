//! # Expected Goals
//!
//! - `geometry` - distance/angle from rink coordinates to the net
//! - `features` - per-shot model inputs, including rebound/rush context
//! - `model` - logistic xG model with category multipliers
//!
//! [`XgScorer`] bundles the model with its context windows so classifiers
//! can score any shot in an event list by index.

pub mod features;
pub mod geometry;
pub mod model;

pub use features::{extract_features, is_rebound, is_rush_chance, XGFeatures};
pub use geometry::{shot_geometry, ShotGeometry, GOAL_LINE_X};
pub use model::{DangerTier, XGPrediction, XgModel};

use serde::{Deserialize, Serialize};

use crate::config::{AnalyticsConfig, ShotContextConfig};
use crate::error::ConfigError;
use crate::models::{PlayEvent, ShotEvent};

/// A shot attempt together with its inputs and prediction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredShot {
    /// Position of the shot in the game's event list.
    pub event_index: usize,
    pub shot: ShotEvent,
    pub features: XGFeatures,
    pub prediction: XGPrediction,
}

impl ScoredShot {
    pub fn x_goal(&self) -> f64 {
        self.prediction.x_goal
    }

    pub fn is_goal(&self) -> bool {
        self.shot.result.is_goal()
    }
}

#[derive(Debug, Clone, Default)]
pub struct XgScorer {
    model: XgModel,
    context: ShotContextConfig,
}

impl XgScorer {
    pub fn new(model: XgModel, context: ShotContextConfig) -> Self {
        Self { model, context }
    }

    pub fn from_config(config: &AnalyticsConfig) -> Result<Self, ConfigError> {
        config.shot_context.validate()?;
        Ok(Self::new(XgModel::new(config.xg.clone())?, config.shot_context.clone()))
    }

    pub fn model(&self) -> &XgModel {
        &self.model
    }

    /// Score `events[idx]`; `None` if it is not a well-formed shot attempt.
    pub fn score_event(&self, events: &[PlayEvent], idx: usize) -> Option<ScoredShot> {
        let shot = ShotEvent::from_event(events.get(idx)?)?;
        let features = extract_features(events, idx, &shot, &self.context);
        let prediction = self.model.predict(&features);
        Some(ScoredShot {
            event_index: idx,
            shot,
            features,
            prediction,
        })
    }

    /// Every well-formed shot attempt, in event order.
    pub fn score_all(&self, events: &[PlayEvent]) -> Vec<ScoredShot> {
        (0..events.len())
            .filter_map(|idx| self.score_event(events, idx))
            .collect()
    }
}
