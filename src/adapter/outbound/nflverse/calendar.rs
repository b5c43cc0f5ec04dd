//! Season, week and status derivation.

use chrono::{DateTime, Datelike, Utc};

use crate::domain::{Game, GameStatus};

/// Season in progress at `now`. January and February belong to the
/// previous year's season.
#[must_use]
pub fn current_season(now: DateTime<Utc>) -> i32 {
    if now.month() < 3 {
        now.year() - 1
    } else {
        now.year()
    }
}

/// Week of the earliest game still to kick off, or the last scheduled week
/// once every game has started. Defaults to week 1.
#[must_use]
pub fn current_week(games: &[Game], now: DateTime<Utc>) -> u32 {
    let mut timed: Vec<&Game> = games.iter().filter(|g| g.kickoff.is_some()).collect();
    timed.sort_by_key(|g| g.kickoff);

    let mut week = 1;
    for game in timed {
        if game.kickoff.is_some_and(|k| k > now) {
            return game.week.max(1);
        }
        week = game.week;
    }
    week.max(1)
}

/// Final once both scores are known, in progress once kickoff has passed.
#[must_use]
pub fn derive_status(
    home_score: Option<u32>,
    away_score: Option<u32>,
    kickoff: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> GameStatus {
    if home_score.is_some() && away_score.is_some() {
        GameStatus::Final
    } else if kickoff.is_some_and(|k| k < now) {
        GameStatus::InProgress
    } else {
        GameStatus::Scheduled
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
    }

    fn game(week: u32, kickoff: DateTime<Utc>) -> Game {
        let mut g = Game::new(format!("g{week}"), 2024, week, "H", "A");
        g.kickoff = Some(kickoff);
        g
    }

    #[test]
    fn season_rolls_over_in_march() {
        assert_eq!(current_season(at(2025, 2, 9)), 2024);
        assert_eq!(current_season(at(2025, 3, 1)), 2025);
        assert_eq!(current_season(at(2024, 9, 5)), 2024);
    }

    #[test]
    fn week_is_next_unplayed_game() {
        let games = vec![
            game(2, at(2024, 9, 15)),
            game(1, at(2024, 9, 8)),
            game(3, at(2024, 9, 22)),
        ];
        assert_eq!(current_week(&games, at(2024, 9, 10)), 2);
        assert_eq!(current_week(&games, at(2024, 12, 1)), 3);
        assert_eq!(current_week(&[], at(2024, 9, 10)), 1);
    }
}
