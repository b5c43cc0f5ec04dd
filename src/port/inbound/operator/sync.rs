//! Sync job control and status projections.

use async_trait::async_trait;
use serde::Serialize;

use crate::domain::{JobId, SyncJob, SyncJobType};
use crate::error::Result;

/// Whether any sync run is executing right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SchedulerState {
    Busy,
    Idle,
}

/// Health projection over recent job history.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HealthReport {
    pub healthy: bool,
    pub scheduler: SchedulerState,
    /// Failed runs among the most recent five.
    pub recent_failures: usize,
    pub last_sync: Option<SyncJob>,
}

/// Aggregate counters over the retained job history.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SyncMetrics {
    pub total_jobs: usize,
    pub completed_jobs: usize,
    pub failed_jobs: usize,
    pub partial_failures: usize,
    pub total_records_processed: usize,
    pub total_records_updated: usize,
    pub average_duration_seconds: f64,
    /// Percentage of completed runs; 100 when no history exists.
    pub success_rate: f64,
}

/// Sync use cases for operator-facing adapters.
///
/// # Thread Safety
///
/// Implementations must be thread-safe (`Send + Sync`).
#[async_trait]
pub trait SyncOperator: Send + Sync {
    /// Run a job of the given type to completion and return its record.
    ///
    /// # Errors
    ///
    /// Returns an error if a run of the same type is already executing.
    async fn trigger(&self, job_type: SyncJobType) -> Result<SyncJob>;

    /// The most recently started run that has not finished.
    fn current_job(&self) -> Option<SyncJob>;

    /// Up to `limit` records, most recent first.
    fn history(&self, limit: usize) -> Vec<SyncJob>;

    fn job(&self, job_id: &JobId) -> Option<SyncJob>;

    /// Up to `limit` records of one type, most recent first.
    fn history_by_type(&self, job_type: SyncJobType, limit: usize) -> Vec<SyncJob>;

    fn health(&self) -> HealthReport;

    fn metrics(&self) -> SyncMetrics;
}
