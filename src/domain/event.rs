//! Typed events pushed to live subscribers.
//!
//! Events serialize to JSON objects tagged by `type`, e.g.
//! `{"type":"PLAYER_STATS","timestamp":...,"count":2,"deltas":[...]}`.

use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::delta::{GameScoreDelta, PlayerStatsDelta};
use super::game::GameStatus;
use super::id::{GameId, JobId, LeagueId, PlayerId};
use super::job::{SyncJob, SyncJobStatus, SyncJobType};
use super::score::ScoreBreakdown;
use super::stats::PlayerStats;

/// Subscription namespace a client can scope itself to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionScope {
    League,
    Player,
}

impl fmt::Display for SubscriptionScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::League => f.write_str("league"),
            Self::Player => f.write_str("player"),
        }
    }
}

/// One changed player inside a `PLAYER_STATS` batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerDeltaView {
    pub player_id: PlayerId,
    pub player_name: String,
    pub week: u32,
    pub season: i32,
    #[serde(with = "rust_decimal::serde::float_option", default)]
    pub fantasy_points: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::float_option", default)]
    pub fantasy_points_ppr: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::float_option", default)]
    pub fantasy_points_half_ppr: Option<Decimal>,
    pub stats: PlayerStats,
}

impl From<&PlayerStatsDelta> for PlayerDeltaView {
    fn from(delta: &PlayerStatsDelta) -> Self {
        let current = &delta.current;
        Self {
            player_id: current.player_id.clone(),
            player_name: current.player_name.clone(),
            week: current.week,
            season: current.season,
            fantasy_points: delta.points.map(|p| p.standard),
            fantasy_points_ppr: delta.points.map(|p| p.ppr),
            fantasy_points_half_ppr: delta.points.map(|p| p.half_ppr),
            stats: current.clone(),
        }
    }
}

/// Payload of a `PLAYER_UPDATE` sent to one player's subscribers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerUpdateView {
    pub player_id: PlayerId,
    pub player_name: String,
    #[serde(with = "rust_decimal::serde::float_option", default)]
    pub fantasy_points: Option<Decimal>,
    #[serde(default)]
    pub breakdown: Option<ScoreBreakdown>,
    pub stats: PlayerStats,
}

/// One changed game inside a `GAME_SCORES` batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameDeltaView {
    pub game_id: GameId,
    pub home_team: String,
    pub away_team: String,
    pub home_score: Option<u32>,
    pub away_score: Option<u32>,
    pub status: GameStatus,
    pub quarter: Option<String>,
    pub time_remaining: Option<String>,
}

impl From<&GameScoreDelta> for GameDeltaView {
    fn from(delta: &GameScoreDelta) -> Self {
        let game = &delta.current;
        Self {
            game_id: game.game_id.clone(),
            home_team: game.home_team.clone(),
            away_team: game.away_team.clone(),
            home_score: game.home_score,
            away_score: game.away_score,
            status: game.status,
            quarter: game.quarter.clone(),
            time_remaining: game.time_remaining.clone(),
        }
    }
}

/// Summary of a finished live sync.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncStatusView {
    pub job_id: JobId,
    pub job_type: SyncJobType,
    pub status: SyncJobStatus,
    pub player_updates: usize,
    pub game_updates: usize,
    pub records_failed: usize,
}

/// Event pushed over the live channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PushEvent {
    PlayerStats {
        timestamp: DateTime<Utc>,
        count: usize,
        deltas: Vec<PlayerDeltaView>,
    },
    PlayerUpdate {
        timestamp: DateTime<Utc>,
        data: PlayerUpdateView,
    },
    GameScores {
        timestamp: DateTime<Utc>,
        count: usize,
        deltas: Vec<GameDeltaView>,
    },
    LeaderboardUpdate {
        timestamp: DateTime<Utc>,
        league_id: LeagueId,
        leaderboard: Vec<serde_json::Value>,
    },
    SyncStatus {
        timestamp: DateTime<Utc>,
        status: SyncStatusView,
    },
    Subscribed {
        scope: SubscriptionScope,
        id: String,
    },
    Unsubscribed {
        scope: SubscriptionScope,
        id: String,
    },
    Pong {
        timestamp: DateTime<Utc>,
    },
    Error {
        message: String,
    },
}

impl PushEvent {
    #[must_use]
    pub fn player_stats(deltas: &[PlayerStatsDelta]) -> Self {
        Self::PlayerStats {
            timestamp: Utc::now(),
            count: deltas.len(),
            deltas: deltas.iter().map(PlayerDeltaView::from).collect(),
        }
    }

    #[must_use]
    pub fn player_update(delta: &PlayerStatsDelta, breakdown: Option<ScoreBreakdown>) -> Self {
        let current = &delta.current;
        Self::PlayerUpdate {
            timestamp: Utc::now(),
            data: PlayerUpdateView {
                player_id: current.player_id.clone(),
                player_name: current.player_name.clone(),
                fantasy_points: delta.points.map(|p| p.standard),
                breakdown,
                stats: current.clone(),
            },
        }
    }

    #[must_use]
    pub fn game_scores(deltas: &[GameScoreDelta]) -> Self {
        Self::GameScores {
            timestamp: Utc::now(),
            count: deltas.len(),
            deltas: deltas.iter().map(GameDeltaView::from).collect(),
        }
    }

    #[must_use]
    pub fn leaderboard(league_id: LeagueId, leaderboard: Vec<serde_json::Value>) -> Self {
        Self::LeaderboardUpdate {
            timestamp: Utc::now(),
            league_id,
            leaderboard,
        }
    }

    #[must_use]
    pub fn sync_status(job: &SyncJob, player_updates: usize, game_updates: usize) -> Self {
        Self::SyncStatus {
            timestamp: Utc::now(),
            status: SyncStatusView {
                job_id: job.job_id.clone(),
                job_type: job.job_type,
                status: job.status,
                player_updates,
                game_updates,
                records_failed: job.records_failed,
            },
        }
    }

    #[must_use]
    pub fn pong() -> Self {
        Self::Pong {
            timestamp: Utc::now(),
        }
    }

    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
        }
    }

    /// Wire name of the event type.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::PlayerStats { .. } => "PLAYER_STATS",
            Self::PlayerUpdate { .. } => "PLAYER_UPDATE",
            Self::GameScores { .. } => "GAME_SCORES",
            Self::LeaderboardUpdate { .. } => "LEADERBOARD_UPDATE",
            Self::SyncStatus { .. } => "SYNC_STATUS",
            Self::Subscribed { .. } => "SUBSCRIBED",
            Self::Unsubscribed { .. } => "UNSUBSCRIBED",
            Self::Pong { .. } => "PONG",
            Self::Error { .. } => "ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FantasyPoints, Game};
    use rust_decimal_macros::dec;

    #[test]
    fn player_stats_event_is_tagged() {
        let mut delta =
            PlayerStatsDelta::new(None, PlayerStats::new("p1", "Player One", 2024, 3));
        delta.points = Some(FantasyPoints {
            standard: dec!(12.5),
            ppr: dec!(14.5),
            half_ppr: dec!(13.5),
        });

        let json = serde_json::to_value(PushEvent::player_stats(&[delta])).unwrap();
        assert_eq!(json["type"], "PLAYER_STATS");
        assert_eq!(json["count"], 1);
        assert_eq!(json["deltas"][0]["player_id"], "p1");
        assert_eq!(json["deltas"][0]["fantasy_points"], 12.5);
        assert_eq!(json["deltas"][0]["fantasy_points_ppr"], 14.5);
    }

    #[test]
    fn game_scores_carry_status_wire_name() {
        let mut game = Game::new("g1", 2024, 3, "KC", "BUF");
        game.status = GameStatus::InProgress;
        game.home_score = Some(7);
        let delta = GameScoreDelta::new(None, game);

        let json = serde_json::to_value(PushEvent::game_scores(&[delta])).unwrap();
        assert_eq!(json["type"], "GAME_SCORES");
        assert_eq!(json["deltas"][0]["status"], "IN_PROGRESS");
        assert_eq!(json["deltas"][0]["home_score"], 7);
    }

    #[test]
    fn acknowledgement_round_trips() {
        let event = PushEvent::Subscribed {
            scope: SubscriptionScope::Player,
            id: "p1".into(),
        };
        let text = serde_json::to_string(&event).unwrap();
        assert!(text.contains("\"type\":\"SUBSCRIBED\""));
        assert_eq!(serde_json::from_str::<PushEvent>(&text).unwrap(), event);
        assert_eq!(event.kind(), "SUBSCRIBED");
    }
}
