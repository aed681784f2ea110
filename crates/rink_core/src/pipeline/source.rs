//! Fetch-layer seam. The orchestration only sees [`GameSource`]; where the
//! events come from (files, HTTP, a cache) is the implementor's concern.

use std::collections::HashMap;

use crate::error::SourceError;
use crate::models::{GameFeed, GameId};

pub trait GameSource {
    fn fetch_game(&self, game_id: GameId) -> Result<GameFeed, SourceError>;
}

impl<S: GameSource + ?Sized> GameSource for &S {
    fn fetch_game(&self, game_id: GameId) -> Result<GameFeed, SourceError> {
        (**self).fetch_game(game_id)
    }
}

/// In-memory source, used by the JSON API and in tests.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    games: HashMap<GameId, GameFeed>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, feed: GameFeed) {
        self.games.insert(feed.game_id, feed);
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }
}

impl FromIterator<GameFeed> for MemorySource {
    fn from_iter<I: IntoIterator<Item = GameFeed>>(iter: I) -> Self {
        let mut source = Self::new();
        for feed in iter {
            source.insert(feed);
        }
        source
    }
}

impl GameSource for MemorySource {
    fn fetch_game(&self, game_id: GameId) -> Result<GameFeed, SourceError> {
        self.games
            .get(&game_id)
            .cloned()
            .ok_or(SourceError::NotFound { game_id })
    }
}
