//! Raw sports data source port.

use async_trait::async_trait;

use crate::domain::{Game, Player, PlayerStats};
use crate::error::SourceError;

/// Provider of player stats, schedules and rosters.
///
/// Implementations are slow and occasionally incomplete. Rows that cannot be
/// coerced into domain types are skipped with a warning rather than failing
/// the whole call.
#[async_trait]
pub trait NflDataSource: Send + Sync {
    /// Weekly stat lines for every player who recorded stats.
    async fn get_player_stats(&self, season: i32, week: u32)
        -> Result<Vec<PlayerStats>, SourceError>;

    /// Full season schedule with scores where known.
    async fn get_schedule(&self, season: i32) -> Result<Vec<Game>, SourceError>;

    /// Current rosters for all teams.
    async fn get_rosters(&self, season: i32) -> Result<Vec<Player>, SourceError>;

    /// Week number of the next unplayed game.
    async fn get_current_week(&self) -> Result<u32, SourceError>;

    /// Season year in progress.
    async fn get_current_season(&self) -> Result<i32, SourceError>;
}
