//! Sync scheduling configuration.

use serde::{Deserialize, Serialize};

use crate::application::sync::DEFAULT_HISTORY_CAPACITY;
use crate::domain::ScoringFormat;

/// Schedules and limits for the sync orchestrator.
///
/// Cron expressions use six fields with seconds first.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SyncConfig {
    /// Start the scheduled triggers. Manual triggers work either way.
    pub enabled: bool,
    /// Live stats and scores polling interval.
    pub live_interval_secs: u64,
    /// Roster sync schedule (daily at 06:00 by default).
    pub roster_cron: String,
    /// Schedule sync schedule (Mondays at midnight by default).
    pub schedule_cron: String,
    pub history_capacity: usize,
    /// Format used for per-player breakdowns in `PLAYER_UPDATE` events.
    pub scoring_format: ScoringFormat,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            live_interval_secs: 60,
            roster_cron: "0 0 6 * * *".into(),
            schedule_cron: "0 0 0 * * Mon".into(),
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            scoring_format: ScoringFormat::Ppr,
        }
    }
}
