//! Game schedule and score snapshot.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::GameId;

/// Lifecycle status of a game.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GameStatus {
    #[default]
    Scheduled,
    InProgress,
    Halftime,
    Final,
    Postponed,
    Cancelled,
}

impl GameStatus {
    /// Wire name of the status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Scheduled => "SCHEDULED",
            Self::InProgress => "IN_PROGRESS",
            Self::Halftime => "HALFTIME",
            Self::Final => "FINAL",
            Self::Postponed => "POSTPONED",
            Self::Cancelled => "CANCELLED",
        }
    }

    /// Parse a wire name, case-insensitively.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_uppercase().as_str() {
            "SCHEDULED" => Some(Self::Scheduled),
            "IN_PROGRESS" => Some(Self::InProgress),
            "HALFTIME" => Some(Self::Halftime),
            "FINAL" => Some(Self::Final),
            "POSTPONED" => Some(Self::Postponed),
            "CANCELLED" => Some(Self::Cancelled),
            _ => None,
        }
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A game as observed in a single poll.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    pub game_id: GameId,
    pub season: i32,
    pub week: u32,
    pub home_team: String,
    pub away_team: String,
    #[serde(default)]
    pub home_score: Option<u32>,
    #[serde(default)]
    pub away_score: Option<u32>,
    #[serde(default)]
    pub status: GameStatus,
    #[serde(default)]
    pub quarter: Option<String>,
    #[serde(default)]
    pub time_remaining: Option<String>,
    #[serde(default)]
    pub kickoff: Option<DateTime<Utc>>,
    #[serde(default)]
    pub venue: Option<String>,
}

impl Game {
    /// Create a scheduled game without scores.
    pub fn new(
        game_id: impl Into<GameId>,
        season: i32,
        week: u32,
        home_team: impl Into<String>,
        away_team: impl Into<String>,
    ) -> Self {
        Self {
            game_id: game_id.into(),
            season,
            week,
            home_team: home_team.into(),
            away_team: away_team.into(),
            home_score: None,
            away_score: None,
            status: GameStatus::Scheduled,
            quarter: None,
            time_remaining: None,
            kickoff: None,
            venue: None,
        }
    }

    /// Whether score, status or quarter differ from `other`.
    #[must_use]
    pub fn differs_from(&self, other: &Self) -> bool {
        self.home_score != other.home_score
            || self.away_score != other.away_score
            || self.status != other.status
            || self.quarter != other.quarter
    }
}
