//! Change cache: last-broadcast snapshots keyed by natural key.
//!
//! Keys live in two namespaces under a configurable prefix:
//! `{prefix}player-stats:{player_id}-{week}` and `{prefix}game-scores:{game_id}`.
//! Values are JSON. Expiration is set on every write and never refreshed on
//! reads.

use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::domain::{Game, GameId, PlayerId, PlayerStats};
use crate::error::StoreError;
use crate::port::KeyValueStore;

/// Default namespace prefix.
pub const DEFAULT_KEY_PREFIX: &str = "nfl:";

/// Default expiration for cached observations (24 hours).
pub const DEFAULT_TTL: Duration = Duration::from_secs(86_400);

const PLAYER_NAMESPACE: &str = "player-stats";
const GAME_NAMESPACE: &str = "game-scores";

/// Result of looking up a cached observation.
#[derive(Debug)]
pub enum Cached<T> {
    Found(T),
    Missing,
    /// A value exists but could not be decoded.
    Undecodable(String),
}

impl<T> Cached<T> {
    /// The decoded value, if any.
    pub fn into_option(self) -> Option<T> {
        match self {
            Self::Found(value) => Some(value),
            Self::Missing | Self::Undecodable(_) => None,
        }
    }
}

/// Typed snapshot cache over an expiring key-value store.
pub struct ChangeCache {
    store: Arc<dyn KeyValueStore>,
    prefix: String,
    ttl: Duration,
}

impl ChangeCache {
    pub fn new(store: Arc<dyn KeyValueStore>, prefix: impl Into<String>, ttl: Duration) -> Self {
        Self {
            store,
            prefix: prefix.into(),
            ttl,
        }
    }

    /// Cache with the default prefix and 24 hour expiration.
    pub fn with_defaults(store: Arc<dyn KeyValueStore>) -> Self {
        Self::new(store, DEFAULT_KEY_PREFIX, DEFAULT_TTL)
    }

    #[must_use]
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    #[must_use]
    pub fn player_key(&self, player_id: &PlayerId, week: u32) -> String {
        format!("{}{PLAYER_NAMESPACE}:{player_id}-{week}", self.prefix)
    }

    #[must_use]
    pub fn game_key(&self, game_id: &GameId) -> String {
        format!("{}{GAME_NAMESPACE}:{game_id}", self.prefix)
    }

    pub async fn get_player(
        &self,
        player_id: &PlayerId,
        week: u32,
    ) -> Result<Cached<PlayerStats>, StoreError> {
        self.get(&self.player_key(player_id, week)).await
    }

    pub async fn put_player(&self, stats: &PlayerStats) -> Result<(), StoreError> {
        self.put(&self.player_key(&stats.player_id, stats.week), stats)
            .await
    }

    pub async fn get_game(&self, game_id: &GameId) -> Result<Cached<Game>, StoreError> {
        self.get(&self.game_key(game_id)).await
    }

    pub async fn put_game(&self, game: &Game) -> Result<(), StoreError> {
        self.put(&self.game_key(&game.game_id), game).await
    }

    /// Delete keys under the prefix matching `pattern` (all when `None`).
    /// Returns the number of keys removed.
    pub async fn clear(&self, pattern: Option<&str>) -> Result<usize, StoreError> {
        let pattern = format!("{}{}", self.prefix, pattern.unwrap_or("*"));
        let keys = self.store.keys(&pattern).await?;
        let mut deleted = 0;
        for key in &keys {
            if self.store.delete(key).await? {
                deleted += 1;
            }
        }
        debug!(pattern = %pattern, deleted, "Cleared cached observations");
        Ok(deleted)
    }

    pub async fn cached_player_count(&self) -> Result<usize, StoreError> {
        let pattern = format!("{}{PLAYER_NAMESPACE}:*", self.prefix);
        Ok(self.store.keys(&pattern).await?.len())
    }

    pub async fn cached_game_count(&self) -> Result<usize, StoreError> {
        let pattern = format!("{}{GAME_NAMESPACE}:*", self.prefix);
        Ok(self.store.keys(&pattern).await?.len())
    }

    async fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Cached<T>, StoreError> {
        let Some(raw) = self.store.get(key).await? else {
            return Ok(Cached::Missing);
        };
        Ok(match serde_json::from_str(&raw) {
            Ok(value) => Cached::Found(value),
            Err(e) => Cached::Undecodable(e.to_string()),
        })
    }

    async fn put<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        let raw = serde_json::to_string(value).map_err(|e| StoreError::Encode(e.to_string()))?;
        self.store.set_with_ttl(key, &raw, self.ttl).await
    }
}
