//! Builders for domain values used across tests.

use crate::domain::{Game, GameStatus, Player, PlayerStats};

pub const SEASON: i32 = 2024;

/// Empty stat line in [`SEASON`].
pub fn stat_line(player_id: &str, week: u32) -> PlayerStats {
    PlayerStats::new(player_id, format!("Player {player_id}"), SEASON, week)
}

/// Stat line with only rushing yards set.
pub fn rusher(player_id: &str, week: u32, rushing_yards: i32) -> PlayerStats {
    let mut stats = stat_line(player_id, week);
    stats.position = Some("RB".into());
    stats.rushing_yards = rushing_yards;
    stats
}

/// 325 pass yd, 3 pass TD, 1 INT, 28 rush yd, 1 fumble lost: 23.80 standard.
pub fn quarterback(player_id: &str, week: u32) -> PlayerStats {
    let mut stats = stat_line(player_id, week);
    stats.position = Some("QB".into());
    stats.passing_yards = 325;
    stats.passing_tds = 3;
    stats.interceptions = 1;
    stats.rushing_yards = 28;
    stats.fumbles_lost = 1;
    stats
}

/// Receiver with `receptions` catches and nothing else.
pub fn receiver(player_id: &str, week: u32, receptions: u32, yards: i32) -> PlayerStats {
    let mut stats = stat_line(player_id, week);
    stats.position = Some("WR".into());
    stats.receptions = receptions;
    stats.receiving_yards = yards;
    stats
}

/// Scheduled game in [`SEASON`].
pub fn game(game_id: &str, week: u32) -> Game {
    Game::new(game_id, SEASON, week, "KC", "BUF")
}

/// In-progress game with a score.
pub fn live_game(game_id: &str, week: u32, home: u32, away: u32, quarter: &str) -> Game {
    let mut game = game(game_id, week);
    game.status = GameStatus::InProgress;
    game.home_score = Some(home);
    game.away_score = Some(away);
    game.quarter = Some(quarter.into());
    game
}

pub fn player(player_id: &str, name: &str, team: &str) -> Player {
    let mut player = Player::new(player_id, name);
    player.team = Some(team.into());
    player
}
