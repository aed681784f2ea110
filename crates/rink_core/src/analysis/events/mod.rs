//! # Event Classifiers
//!
//! Pure functions over one game's chronologically ordered events. Malformed
//! events are skipped, never reported as errors.
//!
//! - `possession` - neutral / controlled state machine shared by the others
//! - `royal_road` - cross-ice passes through the slot
//! - `rush` - shots shortly after own-zone possession
//! - `zone_entry` - offensive-zone entries (controlled, dump, pass)
//! - `momentum` - trailing shot-attempt share on the game clock
//! - `defense` - shots against by danger tier

pub mod defense;
pub mod momentum;
pub mod possession;
pub mod royal_road;
pub mod rush;
pub mod zone_entry;

pub use defense::{analyze_coverage, DefensiveCoverage, TierCoverage};
pub use momentum::{track_momentum, MomentumSample, MomentumSwing, MomentumTimeline};
pub use possession::{possession_timeline, PossessionState, PossessionTracker};
pub use royal_road::{detect_royal_road_passes, RoyalRoadPass, RoyalRoadSummary};
pub use rush::{classify_rush, detect_rush_attacks, RushAttack, RushKind, RushSummary};
pub use zone_entry::{classify_zone_entries, ZoneEntry, ZoneEntrySummary};
