//! Health and metrics projections over job history.

use crate::domain::{SyncJob, SyncJobStatus};
use crate::port::inbound::operator::{HealthReport, SchedulerState, SyncMetrics};

/// Number of most recent jobs inspected for health.
pub const HEALTH_WINDOW: usize = 5;

/// Failures within the window at which the scheduler reports degraded.
pub const DEGRADED_FAILURE_THRESHOLD: usize = 3;

/// Build a health report from the newest-first `recent` records.
#[must_use]
pub fn health_report(recent: &[SyncJob], busy: bool) -> HealthReport {
    let recent_failures = recent
        .iter()
        .take(HEALTH_WINDOW)
        .filter(|job| job.status == SyncJobStatus::Failed)
        .count();

    HealthReport {
        healthy: recent_failures < DEGRADED_FAILURE_THRESHOLD,
        scheduler: if busy {
            SchedulerState::Busy
        } else {
            SchedulerState::Idle
        },
        recent_failures,
        last_sync: recent.first().cloned(),
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Aggregate counters over `history`.
#[must_use]
pub fn sync_metrics(history: &[SyncJob]) -> SyncMetrics {
    let count = |status: SyncJobStatus| history.iter().filter(|j| j.status == status).count();
    let total_jobs = history.len();
    let completed_jobs = count(SyncJobStatus::Completed);

    let durations: Vec<f64> = history.iter().filter_map(SyncJob::duration_seconds).collect();
    let average_duration_seconds = if durations.is_empty() {
        0.0
    } else {
        round2(durations.iter().sum::<f64>() / durations.len() as f64)
    };

    let success_rate = if total_jobs == 0 {
        100.0
    } else {
        round2(completed_jobs as f64 / total_jobs as f64 * 100.0)
    };

    SyncMetrics {
        total_jobs,
        completed_jobs,
        failed_jobs: count(SyncJobStatus::Failed),
        partial_failures: count(SyncJobStatus::PartialFailure),
        total_records_processed: history.iter().map(|j| j.records_processed).sum(),
        total_records_updated: history.iter().map(|j| j.records_updated).sum(),
        average_duration_seconds,
        success_rate,
    }
}
