//! Store doubles: an in-memory [`DocumentStore`] and failing stores.

use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::adapter::outbound::memory::MemoryKeyValueStore;
use crate::domain::{Game, GameId, Player, PlayerId};
use crate::error::StoreError;
use crate::port::{DocumentStore, KeyValueStore};

#[derive(Default)]
pub struct MemoryDocumentStore {
    players: RwLock<BTreeMap<PlayerId, Player>>,
    games: RwLock<BTreeMap<GameId, Game>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn player_count(&self) -> usize {
        self.players.read().len()
    }

    pub fn game_count(&self) -> usize {
        self.games.read().len()
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn upsert_players(&self, players: &[Player]) -> Result<usize, StoreError> {
        let mut map = self.players.write();
        for player in players {
            map.insert(player.player_id.clone(), player.clone());
        }
        Ok(players.len())
    }

    async fn upsert_games(&self, games: &[Game]) -> Result<usize, StoreError> {
        let mut map = self.games.write();
        for game in games {
            map.insert(game.game_id.clone(), game.clone());
        }
        Ok(games.len())
    }

    async fn find_players_by_team(&self, team: &str) -> Result<Vec<Player>, StoreError> {
        let mut players: Vec<Player> = self
            .players
            .read()
            .values()
            .filter(|p| p.team.as_deref() == Some(team))
            .cloned()
            .collect();
        players.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(players)
    }

    async fn find_games(&self, season: i32, week: Option<u32>) -> Result<Vec<Game>, StoreError> {
        Ok(self
            .games
            .read()
            .values()
            .filter(|g| g.season == season && week.map_or(true, |w| g.week == w))
            .cloned()
            .collect())
    }
}

/// Every operation fails.
pub struct FailingDocumentStore;

#[async_trait]
impl DocumentStore for FailingDocumentStore {
    async fn upsert_players(&self, _players: &[Player]) -> Result<usize, StoreError> {
        Err(StoreError::Unavailable("document store offline".into()))
    }

    async fn upsert_games(&self, _games: &[Game]) -> Result<usize, StoreError> {
        Err(StoreError::Unavailable("document store offline".into()))
    }

    async fn find_players_by_team(&self, _team: &str) -> Result<Vec<Player>, StoreError> {
        Err(StoreError::Unavailable("document store offline".into()))
    }

    async fn find_games(
        &self,
        _season: i32,
        _week: Option<u32>,
    ) -> Result<Vec<Game>, StoreError> {
        Err(StoreError::Unavailable("document store offline".into()))
    }
}

/// Which side of a [`FailingKeyValueStore`] is broken.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureMode {
    Reads,
    Writes,
    Everything,
}

/// In-memory key-value store with injected failures.
pub struct FailingKeyValueStore {
    inner: MemoryKeyValueStore,
    mode: FailureMode,
}

impl FailingKeyValueStore {
    pub fn new(mode: FailureMode) -> Self {
        Self {
            inner: MemoryKeyValueStore::new(),
            mode,
        }
    }

    fn reads_fail(&self) -> bool {
        matches!(self.mode, FailureMode::Reads | FailureMode::Everything)
    }

    fn writes_fail(&self) -> bool {
        matches!(self.mode, FailureMode::Writes | FailureMode::Everything)
    }

    fn offline() -> StoreError {
        StoreError::Unavailable("key-value store offline".into())
    }
}

#[async_trait]
impl KeyValueStore for FailingKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        if self.reads_fail() {
            return Err(Self::offline());
        }
        self.inner.get(key).await
    }

    async fn set_with_ttl(&self, key: &str, value: &str, ttl: Duration) -> Result<(), StoreError> {
        if self.writes_fail() {
            return Err(Self::offline());
        }
        self.inner.set_with_ttl(key, value, ttl).await
    }

    async fn delete(&self, key: &str) -> Result<bool, StoreError> {
        if self.writes_fail() {
            return Err(Self::offline());
        }
        self.inner.delete(key).await
    }

    async fn keys(&self, pattern: &str) -> Result<Vec<String>, StoreError> {
        if self.reads_fail() {
            return Err(Self::offline());
        }
        self.inner.keys(pattern).await
    }
}
