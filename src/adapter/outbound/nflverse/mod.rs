//! nflverse feed adapter implementing [`NflDataSource`].

pub mod calendar;
pub mod client;
pub mod row;

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use tracing::{info, warn};

pub use client::NflverseClient;

use crate::domain::{Game, Player, PlayerStats};
use crate::error::{Error, SourceError};
use crate::port::NflDataSource;

/// Data source backed by an nflverse JSON feed.
pub struct NflverseSource {
    client: NflverseClient,
}

impl NflverseSource {
    /// # Errors
    ///
    /// Returns an error if `base_url` does not parse.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, Error> {
        Ok(Self {
            client: NflverseClient::new(base_url, timeout)?,
        })
    }
}

/// Parse every row, skipping and logging those that fail.
fn parse_rows<T, E: std::fmt::Display>(
    table: &str,
    rows: &[Value],
    parse: impl Fn(&Value) -> Result<T, E>,
) -> Vec<T> {
    let mut parsed = Vec::with_capacity(rows.len());
    for (index, raw) in rows.iter().enumerate() {
        match parse(raw) {
            Ok(value) => parsed.push(value),
            Err(e) => warn!(table, index, error = %e, "Skipping unparseable row"),
        }
    }
    parsed
}

#[async_trait]
impl NflDataSource for NflverseSource {
    async fn get_player_stats(
        &self,
        season: i32,
        week: u32,
    ) -> Result<Vec<PlayerStats>, SourceError> {
        let rows = self.client.rows("weekly", season).await?;
        let stats: Vec<PlayerStats> =
            parse_rows("weekly", &rows, |raw| row::player_stats(raw, season, week))
                .into_iter()
                .filter(|s| s.week == week)
                .collect();
        info!(season, week, count = stats.len(), "Loaded player stats");
        Ok(stats)
    }

    async fn get_schedule(&self, season: i32) -> Result<Vec<Game>, SourceError> {
        let rows = self.client.rows("schedules", season).await?;
        let now = Utc::now();
        let games = parse_rows("schedules", &rows, |raw| row::game(raw, season, now));
        info!(season, count = games.len(), "Loaded schedule");
        Ok(games)
    }

    async fn get_rosters(&self, season: i32) -> Result<Vec<Player>, SourceError> {
        let rows = self.client.rows("rosters", season).await?;
        let players = parse_rows("rosters", &rows, row::player);
        info!(season, count = players.len(), "Loaded rosters");
        Ok(players)
    }

    async fn get_current_week(&self) -> Result<u32, SourceError> {
        let season = self.get_current_season().await?;
        let games = self.get_schedule(season).await?;
        Ok(calendar::current_week(&games, Utc::now()))
    }

    async fn get_current_season(&self) -> Result<i32, SourceError> {
        Ok(calendar::current_season(Utc::now()))
    }
}
