//! Database row types and conversions to domain documents.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use super::schema::{games, players};
use crate::domain::{Game, GameStatus, Player};
use crate::error::StoreError;

/// Database row for a roster entry.
#[derive(Queryable, Selectable, Insertable, Debug, Clone)]
#[diesel(table_name = players)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct PlayerRow {
    pub player_id: String,
    pub name: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub position: Option<String>,
    pub team: Option<String>,
    pub jersey_number: Option<i32>,
    pub status: String,
    pub updated_at: String,
}

impl PlayerRow {
    pub fn from_player(player: &Player, updated_at: DateTime<Utc>) -> Self {
        Self {
            player_id: player.player_id.to_string(),
            name: player.name.clone(),
            first_name: player.first_name.clone(),
            last_name: player.last_name.clone(),
            position: player.position.clone(),
            team: player.team.clone(),
            jersey_number: player.jersey_number.and_then(|n| i32::try_from(n).ok()),
            status: player.status.clone(),
            updated_at: updated_at.to_rfc3339(),
        }
    }

    pub fn into_player(self) -> Player {
        Player {
            player_id: self.player_id.into(),
            name: self.name,
            first_name: self.first_name,
            last_name: self.last_name,
            position: self.position,
            team: self.team,
            jersey_number: self.jersey_number.and_then(|n| u32::try_from(n).ok()),
            status: self.status,
        }
    }
}

/// Database row for a scheduled game.
#[derive(Queryable, Selectable, Insertable, Debug, Clone)]
#[diesel(table_name = games)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct GameRow {
    pub game_id: String,
    pub season: i32,
    pub week: i32,
    pub home_team: String,
    pub away_team: String,
    pub home_score: Option<i32>,
    pub away_score: Option<i32>,
    pub status: String,
    pub quarter: Option<String>,
    pub time_remaining: Option<String>,
    pub kickoff: Option<String>,
    pub venue: Option<String>,
    pub updated_at: String,
}

fn to_db_int(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

impl GameRow {
    pub fn from_game(game: &Game, updated_at: DateTime<Utc>) -> Self {
        Self {
            game_id: game.game_id.to_string(),
            season: game.season,
            week: to_db_int(game.week),
            home_team: game.home_team.clone(),
            away_team: game.away_team.clone(),
            home_score: game.home_score.map(to_db_int),
            away_score: game.away_score.map(to_db_int),
            status: game.status.as_str().to_string(),
            quarter: game.quarter.clone(),
            time_remaining: game.time_remaining.clone(),
            kickoff: game.kickoff.map(|k| k.to_rfc3339()),
            venue: game.venue.clone(),
            updated_at: updated_at.to_rfc3339(),
        }
    }

    /// Convert back to a domain game.
    ///
    /// # Errors
    /// Returns an error if a stored status or timestamp is malformed.
    pub fn into_game(self) -> Result<Game, StoreError> {
        let status = GameStatus::parse(&self.status).ok_or_else(|| {
            StoreError::Database(format!("unknown game status '{}'", self.status))
        })?;
        let kickoff = self
            .kickoff
            .as_deref()
            .map(DateTime::parse_from_rfc3339)
            .transpose()
            .map_err(|e| StoreError::Database(e.to_string()))?
            .map(|k| k.with_timezone(&Utc));

        Ok(Game {
            game_id: self.game_id.into(),
            season: self.season,
            week: u32::try_from(self.week).unwrap_or_default(),
            home_team: self.home_team,
            away_team: self.away_team,
            home_score: self.home_score.and_then(|s| u32::try_from(s).ok()),
            away_score: self.away_score.and_then(|s| u32::try_from(s).ok()),
            status,
            quarter: self.quarter,
            time_remaining: self.time_remaining,
            kickoff,
            venue: self.venue,
        })
    }
}
