pub mod events;
pub mod game;
pub mod shot;

pub use events::{EntryKind, EventType, PlayEvent, Zone, PERIOD_LENGTH_S};
pub use game::{GameFeed, GameId, PlayerId, Subject, TeamId};
pub use shot::{ShotEvent, ShotResult, ShotType, Strength};
