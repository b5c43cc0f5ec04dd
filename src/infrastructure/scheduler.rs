//! Timer-driven sync triggers.
//!
//! Live scores poll on a fixed interval; rosters and schedules run on cron
//! expressions. A fire that lands while the previous run of the same type is
//! still executing is dropped by the service's run guard.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_cron_scheduler::{Job, JobScheduler};
use tracing::{debug, info};

use crate::application::sync::SyncService;
use crate::domain::SyncJobType;
use crate::error::Result;
use crate::infrastructure::config::sync::SyncConfig;

/// Owns the live polling loop and the cron jobs.
pub struct SyncScheduler {
    service: Arc<SyncService>,
    live_interval: Duration,
    roster_cron: String,
    schedule_cron: String,
}

impl SyncScheduler {
    pub fn new(service: Arc<SyncService>, config: &SyncConfig) -> Self {
        Self {
            service,
            live_interval: Duration::from_secs(config.live_interval_secs),
            roster_cron: config.roster_cron.clone(),
            schedule_cron: config.schedule_cron.clone(),
        }
    }

    /// Start all triggers. The first live poll fires immediately.
    ///
    /// # Errors
    ///
    /// Returns an error if a cron expression is rejected or the cron
    /// scheduler cannot start.
    pub async fn start(self) -> Result<SchedulerHandle> {
        let cron = JobScheduler::new().await?;
        cron.add(cron_job(
            &self.roster_cron,
            SyncJobType::Players,
            Arc::clone(&self.service),
        )?)
        .await?;
        cron.add(cron_job(
            &self.schedule_cron,
            SyncJobType::Schedules,
            Arc::clone(&self.service),
        )?)
        .await?;
        cron.start().await?;

        let (stop_tx, stop_rx) = watch::channel(false);
        let live = tokio::spawn(live_loop(
            Arc::clone(&self.service),
            self.live_interval,
            stop_rx,
        ));

        info!(
            live_interval_secs = self.live_interval.as_secs(),
            roster_cron = %self.roster_cron,
            schedule_cron = %self.schedule_cron,
            "Sync scheduler started"
        );

        Ok(SchedulerHandle {
            cron,
            live,
            stop: stop_tx,
        })
    }
}

fn cron_job(expr: &str, job_type: SyncJobType, service: Arc<SyncService>) -> Result<Job> {
    let job = Job::new_async(expr, move |_uuid, _scheduler| {
        let service = Arc::clone(&service);
        Box::pin(async move {
            service.run_scheduled(job_type).await;
        })
    })?;
    Ok(job)
}

async fn live_loop(service: Arc<SyncService>, every: Duration, mut stop: watch::Receiver<bool>) {
    let mut interval = tokio::time::interval(every);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            result = stop.changed() => {
                if result.is_err() || *stop.borrow() {
                    debug!("Live polling stopped");
                    break;
                }
            }
            _ = interval.tick() => {
                let service = Arc::clone(&service);
                tokio::spawn(async move {
                    service.run_scheduled(SyncJobType::LiveScores).await;
                });
            }
        }
    }
}

/// Running triggers. Dropping the handle leaves them running.
pub struct SchedulerHandle {
    cron: JobScheduler,
    live: JoinHandle<()>,
    stop: watch::Sender<bool>,
}

impl SchedulerHandle {
    /// Stop every trigger. Runs already in progress finish on their own.
    pub async fn shutdown(mut self) -> Result<()> {
        let _ = self.stop.send(true);
        let _ = self.live.await;
        self.cron.shutdown().await?;
        info!("Sync scheduler stopped");
        Ok(())
    }
}
