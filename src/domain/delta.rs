//! Change records produced by delta detection.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::game::Game;
use super::id::{GameId, PlayerId};
use super::score::FantasyPoints;
use super::stats::PlayerStats;

/// A change in a player's weekly stat line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerStatsDelta {
    pub previous: Option<PlayerStats>,
    pub current: PlayerStats,
    /// Attached by the orchestrator after scoring.
    pub points: Option<FantasyPoints>,
    pub timestamp: DateTime<Utc>,
}

impl PlayerStatsDelta {
    #[must_use]
    pub fn new(previous: Option<PlayerStats>, current: PlayerStats) -> Self {
        Self {
            previous,
            current,
            points: None,
            timestamp: Utc::now(),
        }
    }

    #[must_use]
    pub fn player_id(&self) -> &PlayerId {
        &self.current.player_id
    }

    /// True when the player had no cached observation.
    #[must_use]
    pub fn is_first_sighting(&self) -> bool {
        self.previous.is_none()
    }
}

/// A change in a game's score, status or quarter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameScoreDelta {
    pub previous: Option<Game>,
    pub current: Game,
    pub timestamp: DateTime<Utc>,
}

impl GameScoreDelta {
    #[must_use]
    pub fn new(previous: Option<Game>, current: Game) -> Self {
        Self {
            previous,
            current,
            timestamp: Utc::now(),
        }
    }

    #[must_use]
    pub fn game_id(&self) -> &GameId {
        &self.current.game_id
    }
}
