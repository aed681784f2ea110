//! # Shot Geometry
//!
//! Rink coordinates are in feet with center ice at (0, 0). Goal lines sit at
//! |x| = 89, so a shot is measured against the net at the end of the rink it
//! was taken in.

use serde::{Deserialize, Serialize};

/// Distance from center ice to either goal line.
pub const GOAL_LINE_X: f64 = 89.0;
pub const RINK_HALF_LENGTH_FT: f64 = 100.0;
pub const RINK_HALF_WIDTH_FT: f64 = 42.5;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShotGeometry {
    pub distance_ft: f64,
    /// 0 = straight on, 90 = on the goal line, > 90 = behind the net.
    pub angle_deg: f64,
}

/// Distance and angle to the nearer net.
pub fn shot_geometry(x: f64, y: f64) -> ShotGeometry {
    let longitudinal = GOAL_LINE_X - x.abs();
    let lateral = y.abs();
    ShotGeometry {
        distance_ft: longitudinal.hypot(lateral),
        angle_deg: shot_angle(longitudinal, lateral),
    }
}

pub fn shot_distance(x: f64, y: f64) -> f64 {
    shot_geometry(x, y).distance_ft
}

pub fn shot_angle_deg(x: f64, y: f64) -> f64 {
    shot_geometry(x, y).angle_deg
}

fn shot_angle(longitudinal: f64, lateral: f64) -> f64 {
    if lateral == 0.0 && longitudinal >= 0.0 {
        // Center line, including the net itself.
        return 0.0;
    }
    if longitudinal == 0.0 {
        return 90.0;
    }
    lateral.atan2(longitudinal).to_degrees()
}

/// Absolute cross-ice travel between two points.
pub fn lateral_displacement(y_from: f64, y_to: f64) -> f64 {
    (y_to - y_from).abs()
}

/// Puck moved from one side of the center line (y = 0) to the other.
pub fn crosses_center_line(y_from: f64, y_to: f64) -> bool {
    y_from != 0.0 && y_to != 0.0 && y_from.signum() != y_to.signum()
}

/// |x| within the slot's longitudinal range.
pub fn in_slot_range(x: f64, slot_min_x: f64, slot_max_x: f64) -> bool {
    let depth = x.abs();
    depth >= slot_min_x && depth <= slot_max_x
}
