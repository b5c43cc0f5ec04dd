//! Sync job records and their lifecycle.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::JobId;
use crate::error::SyncError;

/// Category of scheduled work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncJobType {
    /// Roster sync.
    Players,
    /// Season schedule sync.
    Schedules,
    /// Live stats and scores.
    LiveScores,
    /// Alias for the live sync.
    PlayerStats,
}

impl SyncJobType {
    pub const ALL: [Self; 4] = [
        Self::Players,
        Self::Schedules,
        Self::LiveScores,
        Self::PlayerStats,
    ];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Players => "players",
            Self::Schedules => "schedules",
            Self::LiveScores => "live_scores",
            Self::PlayerStats => "player_stats",
        }
    }

    /// The job type whose run function and concurrency guard this type uses.
    #[must_use]
    pub const fn canonical(self) -> Self {
        match self {
            Self::PlayerStats => Self::LiveScores,
            other => other,
        }
    }
}

impl fmt::Display for SyncJobType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SyncJobType {
    type Err = SyncError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == normalized)
            .ok_or_else(|| SyncError::UnknownJobType(s.to_string()))
    }
}

/// Status of a sync job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncJobStatus {
    Pending,
    InProgress,
    Completed,
    PartialFailure,
    Failed,
}

impl SyncJobStatus {
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::PartialFailure | Self::Failed)
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::PartialFailure => "partial_failure",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for SyncJobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Record of a single sync run.
///
/// Mutated only through the transition methods; once a terminal status is
/// reached further transitions are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncJob {
    pub job_id: JobId,
    pub job_type: SyncJobType,
    pub status: SyncJobStatus,
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub records_processed: usize,
    pub records_updated: usize,
    pub records_failed: usize,
    pub error_message: Option<String>,
}

impl SyncJob {
    /// Create a pending job of the given type.
    #[must_use]
    pub fn new(job_type: SyncJobType) -> Self {
        Self {
            job_id: JobId::new(),
            job_type,
            status: SyncJobStatus::Pending,
            started_at: None,
            completed_at: None,
            records_processed: 0,
            records_updated: 0,
            records_failed: 0,
            error_message: None,
        }
    }

    /// Move from pending to in progress.
    pub fn start(&mut self) {
        if self.status == SyncJobStatus::Pending {
            self.status = SyncJobStatus::InProgress;
            self.started_at = Some(Utc::now());
        }
    }

    /// Finish with counts. Any failed records make the run a partial failure.
    pub fn finish(&mut self, processed: usize, updated: usize, failed: usize) {
        if self.status.is_terminal() {
            return;
        }
        self.records_processed = processed;
        self.records_updated = updated;
        self.records_failed = failed;
        self.status = if failed > 0 {
            SyncJobStatus::PartialFailure
        } else {
            SyncJobStatus::Completed
        };
        self.completed_at = Some(Utc::now());
    }

    /// Finish as failed with a captured error message.
    pub fn fail(&mut self, message: impl Into<String>) {
        if self.status.is_terminal() {
            return;
        }
        self.status = SyncJobStatus::Failed;
        self.error_message = Some(message.into());
        self.completed_at = Some(Utc::now());
    }

    /// Wall-clock duration once both timestamps are known.
    #[must_use]
    pub fn duration_seconds(&self) -> Option<f64> {
        match (self.started_at, self.completed_at) {
            (Some(start), Some(end)) => {
                Some((end - start).num_milliseconds() as f64 / 1000.0)
            }
            _ => None,
        }
    }
}
