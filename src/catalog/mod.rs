use std::sync::Arc;

use crate::models::GameRecord;

pub mod loader;

pub use loader::{load_catalog, load_catalog_from_reader};

/// Read-only games catalog shared by every request
///
/// Loaded once at startup; cloning only bumps a reference count.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    games: Arc<[GameRecord]>,
}

impl Catalog {
    pub fn new(games: Vec<GameRecord>) -> Self {
        Self {
            games: games.into(),
        }
    }

    pub fn games(&self) -> &[GameRecord] {
        &self.games
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }
}

impl From<Vec<GameRecord>> for Catalog {
    fn from(games: Vec<GameRecord>) -> Self {
        Self::new(games)
    }
}
