//! Loose row parsing for nflverse-style tabular JSON.
//!
//! Feed rows are flat objects keyed by nflverse column names. Numeric
//! columns may arrive as integers, floats, numeric strings or null; all are
//! coerced, with null and absent columns reading as zero.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde_json::{Map, Value};
use thiserror::Error;

use super::calendar::derive_status;
use crate::domain::{Game, Player, PlayerStats};

/// A row that could not be turned into a domain record.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RowError {
    #[error("row is not an object")]
    NotAnObject,

    #[error("missing column '{0}'")]
    Missing(&'static str),

    #[error("column '{column}' is not numeric: {value}")]
    NotNumeric { column: &'static str, value: String },
}

type Row = Map<String, Value>;

fn as_object(value: &Value) -> Result<&Row, RowError> {
    value.as_object().ok_or(RowError::NotAnObject)
}

fn text(row: &Row, column: &str) -> Option<String> {
    match row.get(column)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn required_text(row: &Row, column: &'static str) -> Result<String, RowError> {
    text(row, column).ok_or(RowError::Missing(column))
}

/// Numeric column as i64, `None` when null or absent.
fn number(row: &Row, column: &'static str) -> Result<Option<i64>, RowError> {
    let not_numeric = |value: &Value| RowError::NotNumeric {
        column,
        value: value.to_string(),
    };
    match row.get(column) {
        None | Some(Value::Null) => Ok(None),
        Some(value @ Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f as i64))
            .map(Some)
            .ok_or_else(|| not_numeric(value)),
        Some(value @ Value::String(s)) => {
            let s = s.trim();
            if s.is_empty() {
                return Ok(None);
            }
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().filter(|f| f.is_finite()).map(|f| f as i64))
                .map(Some)
                .ok_or_else(|| not_numeric(value))
        }
        Some(value) => Err(not_numeric(value)),
    }
}

fn signed(row: &Row, column: &'static str) -> Result<i32, RowError> {
    Ok(number(row, column)?
        .map(|n| n.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32)
        .unwrap_or(0))
}

fn count(row: &Row, column: &'static str) -> Result<u32, RowError> {
    Ok(optional_count(row, column)?.unwrap_or(0))
}

fn optional_count(row: &Row, column: &'static str) -> Result<Option<u32>, RowError> {
    Ok(number(row, column)?.map(|n| n.clamp(0, i64::from(u32::MAX)) as u32))
}

/// Sum of several count columns, saturating at `u32::MAX`.
fn count_sum(row: &Row, columns: &[&'static str]) -> Result<u32, RowError> {
    let mut total = 0u32;
    for &column in columns {
        total = total.saturating_add(count(row, column)?);
    }
    Ok(total)
}

/// Parse one weekly stats row.
pub fn player_stats(value: &Value, season: i32, week: u32) -> Result<PlayerStats, RowError> {
    let row = as_object(value)?;
    let player_id = required_text(row, "player_id")?;
    let name = text(row, "player_display_name")
        .or_else(|| text(row, "player_name"))
        .unwrap_or_default();
    let season = number(row, "season")?.map_or(season, |s| s as i32);
    let week = optional_count(row, "week")?.unwrap_or(week);

    let mut stats = PlayerStats::new(player_id, name, season, week);
    stats.team = text(row, "recent_team").or_else(|| text(row, "team"));
    stats.position = text(row, "position");

    stats.passing_yards = signed(row, "passing_yards")?;
    stats.passing_tds = count(row, "passing_tds")?;
    stats.interceptions = count(row, "interceptions")?;
    stats.passing_attempts = count(row, "attempts")?;
    stats.passing_completions = count(row, "completions")?;

    stats.rushing_yards = signed(row, "rushing_yards")?;
    stats.rushing_tds = count(row, "rushing_tds")?;
    stats.rushing_attempts = count(row, "carries")?;

    stats.receptions = count(row, "receptions")?;
    stats.receiving_yards = signed(row, "receiving_yards")?;
    stats.receiving_tds = count(row, "receiving_tds")?;
    stats.targets = count(row, "targets")?;

    stats.two_point_conversions = count_sum(
        row,
        &[
            "passing_2pt_conversions",
            "rushing_2pt_conversions",
            "receiving_2pt_conversions",
        ],
    )?;
    stats.fumbles_lost = count_sum(
        row,
        &[
            "sack_fumbles_lost",
            "rushing_fumbles_lost",
            "receiving_fumbles_lost",
        ],
    )?;

    stats.fg_made_0_19 = count(row, "fg_made_0_19")?;
    stats.fg_made_20_29 = count(row, "fg_made_20_29")?;
    stats.fg_made_30_39 = count(row, "fg_made_30_39")?;
    stats.fg_made_40_49 = count(row, "fg_made_40_49")?;
    stats.fg_made_50_plus = count_sum(row, &["fg_made_50_59", "fg_made_60_"])?;
    stats.pat_made = count(row, "pat_made")?;

    Ok(stats)
}

fn kickoff(row: &Row) -> Option<DateTime<Utc>> {
    let date = NaiveDate::parse_from_str(&text(row, "gameday")?, "%Y-%m-%d").ok()?;
    let time = text(row, "gametime")
        .and_then(|t| NaiveTime::parse_from_str(&t, "%H:%M").ok())
        .unwrap_or(NaiveTime::MIN);
    Some(NaiveDateTime::new(date, time).and_utc())
}

/// Parse one schedule row, deriving status relative to `now`.
pub fn game(value: &Value, season: i32, now: DateTime<Utc>) -> Result<Game, RowError> {
    let row = as_object(value)?;
    let game_id = required_text(row, "game_id")?;
    let season = number(row, "season")?.map_or(season, |s| s as i32);
    let week = count(row, "week")?;
    let home_team = required_text(row, "home_team")?;
    let away_team = required_text(row, "away_team")?;

    let mut game = Game::new(game_id, season, week, home_team, away_team);
    game.home_score = optional_count(row, "home_score")?;
    game.away_score = optional_count(row, "away_score")?;
    game.kickoff = kickoff(row);
    game.venue = text(row, "stadium");
    game.status = derive_status(game.home_score, game.away_score, game.kickoff, now);
    Ok(game)
}

/// Parse one roster row.
pub fn player(value: &Value) -> Result<Player, RowError> {
    let row = as_object(value)?;
    let player_id = text(row, "player_id")
        .or_else(|| text(row, "gsis_id"))
        .ok_or(RowError::Missing("player_id"))?;
    let name = text(row, "player_name")
        .or_else(|| text(row, "full_name"))
        .unwrap_or_default();

    let mut player = Player::new(player_id, name);
    player.first_name = text(row, "first_name");
    player.last_name = text(row, "last_name");
    player.position = text(row, "position");
    player.team = text(row, "team");
    player.jersey_number = optional_count(row, "jersey_number")?;
    if let Some(status) = text(row, "status") {
        player.status = status;
    }
    Ok(player)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::GameStatus;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn weekly_row_maps_nflverse_columns() {
        let row = json!({
            "player_id": "00-0033873",
            "player_display_name": "Patrick Mahomes",
            "recent_team": "KC",
            "position": "QB",
            "season": 2024,
            "week": 18,
            "passing_yards": 325.0,
            "passing_tds": 3,
            "interceptions": "1",
            "attempts": 40,
            "completions": 28,
            "rushing_yards": 28,
            "carries": 4,
            "passing_2pt_conversions": 1,
            "rushing_2pt_conversions": null,
            "sack_fumbles_lost": 1
        });

        let stats = player_stats(&row, 2024, 18).unwrap();
        assert_eq!(stats.player_name, "Patrick Mahomes");
        assert_eq!(stats.team.as_deref(), Some("KC"));
        assert_eq!(stats.passing_yards, 325);
        assert_eq!(stats.interceptions, 1);
        assert_eq!(stats.passing_attempts, 40);
        assert_eq!(stats.rushing_attempts, 4);
        assert_eq!(stats.two_point_conversions, 1);
        assert_eq!(stats.fumbles_lost, 1);
        assert_eq!(stats.receptions, 0);
    }

    #[test]
    fn oversized_counts_saturate() {
        let row = json!({
            "player_id": "p",
            "passing_2pt_conversions": 4_294_967_295u64,
            "rushing_2pt_conversions": 1,
            "sack_fumbles_lost": 1e12,
            "rushing_fumbles_lost": 5,
            "fg_made_50_59": u64::MAX,
            "fg_made_60_": 2,
        });
        let stats = player_stats(&row, 2024, 1).unwrap();
        assert_eq!(stats.two_point_conversions, u32::MAX);
        assert_eq!(stats.fumbles_lost, u32::MAX);
        assert_eq!(stats.fg_made_50_plus, u32::MAX);
    }

    #[test]
    fn negative_yardage_survives() {
        let row = json!({"player_id": "p", "rushing_yards": -4});
        assert_eq!(player_stats(&row, 2024, 1).unwrap().rushing_yards, -4);
    }

    #[test]
    fn bad_rows_are_rejected() {
        assert_eq!(player_stats(&json!([1, 2]), 2024, 1), Err(RowError::NotAnObject));
        assert_eq!(
            player_stats(&json!({"player_name": "x"}), 2024, 1),
            Err(RowError::Missing("player_id"))
        );
        assert!(matches!(
            player_stats(&json!({"player_id": "p", "receptions": "lots"}), 2024, 1),
            Err(RowError::NotNumeric { column: "receptions", .. })
        ));
    }

    #[test]
    fn schedule_row_derives_status() {
        let now = Utc.with_ymd_and_hms(2024, 9, 8, 20, 0, 0).unwrap();
        let played = json!({
            "game_id": "2024_01_BAL_KC", "season": 2024, "week": 1,
            "home_team": "KC", "away_team": "BAL",
            "home_score": 27, "away_score": 20,
            "gameday": "2024-09-05", "gametime": "20:20", "stadium": "GEHA Field"
        });
        let live = json!({
            "game_id": "2024_01_PIT_ATL", "week": 1,
            "home_team": "ATL", "away_team": "PIT",
            "gameday": "2024-09-08", "gametime": "13:00"
        });
        let upcoming = json!({
            "game_id": "2024_02_CIN_KC", "week": 2,
            "home_team": "KC", "away_team": "CIN",
            "gameday": "2024-09-15", "gametime": "16:25"
        });

        let played = game(&played, 2024, now).unwrap();
        assert_eq!(played.status, GameStatus::Final);
        assert_eq!(played.venue.as_deref(), Some("GEHA Field"));
        assert_eq!(game(&live, 2024, now).unwrap().status, GameStatus::InProgress);
        assert_eq!(game(&upcoming, 2024, now).unwrap().status, GameStatus::Scheduled);
    }

    #[test]
    fn roster_row_falls_back_to_gsis_id() {
        let row = json!({
            "gsis_id": "00-0036389", "player_name": "Jalen Hurts",
            "team": "PHI", "position": "QB", "jersey_number": 1.0
        });
        let player = player(&row).unwrap();
        assert_eq!(player.player_id.as_str(), "00-0036389");
        assert_eq!(player.jersey_number, Some(1));
        assert_eq!(player.status, "ACTIVE");
    }
}
