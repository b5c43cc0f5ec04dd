//! Sync orchestration: job runs, overlap guards and job history.

mod guard;
mod history;
mod service;
mod status;

pub use guard::{RunGuards, RunPermit};
pub use history::{JobHistory, DEFAULT_HISTORY_CAPACITY};
pub use service::{SyncService, SyncSettings};
pub use status::{health_report, sync_metrics, DEGRADED_FAILURE_THRESHOLD, HEALTH_WINDOW};
