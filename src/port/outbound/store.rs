//! Persistent document store port.

use async_trait::async_trait;

use crate::domain::{Game, Player};
use crate::error::StoreError;

/// Upsert-and-find storage for rosters and schedules.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Insert or replace players by id. Returns rows written.
    async fn upsert_players(&self, players: &[Player]) -> Result<usize, StoreError>;

    /// Insert or replace games by id. Returns rows written.
    async fn upsert_games(&self, games: &[Game]) -> Result<usize, StoreError>;

    async fn find_players_by_team(&self, team: &str) -> Result<Vec<Player>, StoreError>;

    /// Games for a season, optionally narrowed to one week.
    async fn find_games(&self, season: i32, week: Option<u32>) -> Result<Vec<Game>, StoreError>;
}
