//! Sport-agnostic core types: snapshots, deltas, scoring and job records.
//!
//! Nothing in this module performs I/O.

pub mod delta;
pub mod event;
pub mod game;
pub mod id;
pub mod job;
pub mod player;
pub mod score;
pub mod stats;

pub use delta::{GameScoreDelta, PlayerStatsDelta};
pub use event::{PushEvent, SubscriptionScope};
pub use game::{Game, GameStatus};
pub use id::{ConnectionId, GameId, JobId, LeagueId, PlayerId};
pub use job::{SyncJob, SyncJobStatus, SyncJobType};
pub use player::Player;
pub use score::{FantasyPoints, ScoreBreakdown, Scorer, ScoringFormat, ScoringRules};
pub use stats::PlayerStats;
