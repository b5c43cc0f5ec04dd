//! Operator-facing inbound ports consumed by CLI and admin adapters.

pub mod sync;

pub use sync::{HealthReport, SchedulerState, SyncMetrics, SyncOperator};
