//! Sync service: runs jobs, tracks in-flight records and history.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;
use tracing::{debug, error, info};

use super::guard::RunGuards;
use super::history::{JobHistory, DEFAULT_HISTORY_CAPACITY};
use super::status::{health_report, sync_metrics, HEALTH_WINDOW};
use crate::application::broadcast::Broadcaster;
use crate::application::cache::ChangeCache;
use crate::application::delta::DeltaDetector;
use crate::domain::{Game, JobId, PushEvent, Scorer, ScoringFormat, SyncJob, SyncJobType};
use crate::error::{Result, SyncError};
use crate::port::inbound::operator::{HealthReport, SyncMetrics, SyncOperator};
use crate::port::{DocumentStore, NflDataSource};

/// Tunables for the sync service.
#[derive(Debug, Clone)]
pub struct SyncSettings {
    /// Format used for the per-player breakdown in `PLAYER_UPDATE`.
    pub scoring_format: ScoringFormat,
    pub history_capacity: usize,
}

impl Default for SyncSettings {
    fn default() -> Self {
        Self {
            scoring_format: ScoringFormat::Ppr,
            history_capacity: DEFAULT_HISTORY_CAPACITY,
        }
    }
}

#[derive(Debug, Default, Clone, Copy)]
struct RunCounts {
    processed: usize,
    updated: usize,
    failed: usize,
    player_updates: usize,
    game_updates: usize,
}

/// Removes a job from the in-flight table when dropped, including on unwind.
struct InFlightEntry<'a> {
    jobs: &'a RwLock<HashMap<SyncJobType, SyncJob>>,
    job_type: SyncJobType,
}

impl Drop for InFlightEntry<'_> {
    fn drop(&mut self) {
        self.jobs.write().remove(&self.job_type);
    }
}

/// Drives the fetch, detect, score and broadcast pipeline.
pub struct SyncService {
    source: Arc<dyn NflDataSource>,
    documents: Arc<dyn DocumentStore>,
    detector: DeltaDetector,
    scorer: Scorer,
    broadcaster: Arc<Broadcaster>,
    guards: RunGuards,
    history: JobHistory,
    in_flight: RwLock<HashMap<SyncJobType, SyncJob>>,
    settings: SyncSettings,
}

impl SyncService {
    pub fn new(
        source: Arc<dyn NflDataSource>,
        documents: Arc<dyn DocumentStore>,
        cache: Arc<ChangeCache>,
        broadcaster: Arc<Broadcaster>,
        settings: SyncSettings,
    ) -> Self {
        Self {
            source,
            documents,
            detector: DeltaDetector::new(cache),
            scorer: Scorer::default(),
            broadcaster,
            guards: RunGuards::new(),
            history: JobHistory::new(settings.history_capacity),
            in_flight: RwLock::new(HashMap::new()),
            settings,
        }
    }

    #[must_use]
    pub fn with_scorer(mut self, scorer: Scorer) -> Self {
        self.scorer = scorer;
        self
    }

    #[must_use]
    pub fn guards(&self) -> &RunGuards {
        &self.guards
    }

    #[must_use]
    pub fn job_history(&self) -> &JobHistory {
        &self.history
    }

    #[must_use]
    pub fn broadcaster(&self) -> &Arc<Broadcaster> {
        &self.broadcaster
    }

    /// Run a job to completion.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::AlreadyRunning`] if a run of the same type is
    /// executing. Failures inside the run are captured in the returned record.
    pub async fn run(&self, job_type: SyncJobType) -> Result<SyncJob> {
        let job_type = job_type.canonical();
        let Some(_permit) = self.guards.try_acquire(job_type) else {
            return Err(SyncError::AlreadyRunning(job_type).into());
        };
        Ok(self.execute(job_type).await)
    }

    /// Run on a timer fire. Overlapping fires are dropped.
    pub async fn run_scheduled(&self, job_type: SyncJobType) -> Option<SyncJob> {
        match self.run(job_type).await {
            Ok(job) => Some(job),
            Err(_) => {
                debug!(job_type = %job_type, "Previous run still active, skipping fire");
                None
            }
        }
    }

    async fn execute(&self, job_type: SyncJobType) -> SyncJob {
        let mut job = SyncJob::new(job_type);
        job.start();
        self.in_flight.write().insert(job_type, job.clone());
        let in_flight = InFlightEntry {
            jobs: &self.in_flight,
            job_type,
        };
        info!(job_id = %job.job_id, job_type = %job_type, "Sync started");

        let result = match job_type {
            SyncJobType::Players => self.sync_players().await,
            SyncJobType::Schedules => self.sync_schedules().await,
            SyncJobType::LiveScores | SyncJobType::PlayerStats => self.sync_live().await,
        };

        let counts = match result {
            Ok(counts) => {
                job.finish(counts.processed, counts.updated, counts.failed);
                info!(
                    job_id = %job.job_id,
                    job_type = %job_type,
                    status = %job.status,
                    processed = counts.processed,
                    updated = counts.updated,
                    failed = counts.failed,
                    "Sync finished"
                );
                counts
            }
            Err(e) => {
                error!(job_id = %job.job_id, job_type = %job_type, error = %e, "Sync failed");
                job.fail(e.to_string());
                RunCounts::default()
            }
        };

        drop(in_flight);
        self.history.push(job.clone());

        if job_type == SyncJobType::LiveScores {
            let event = PushEvent::sync_status(&job, counts.player_updates, counts.game_updates);
            self.broadcaster.broadcast_global(&event).await;
        }

        job
    }

    async fn sync_live(&self) -> Result<RunCounts> {
        let season = self.source.get_current_season().await?;
        let week = self.source.get_current_week().await?;

        let stats = self.source.get_player_stats(season, week).await?;
        let mut players = self.detector.detect_players(&stats).await;
        for delta in &mut players.deltas {
            delta.points = Some(self.scorer.score_all(&delta.current));
        }
        self.broadcaster
            .broadcast_player_deltas(&players.deltas, &self.scorer, self.settings.scoring_format)
            .await;

        let games: Vec<Game> = self
            .source
            .get_schedule(season)
            .await?
            .into_iter()
            .filter(|game| game.week == week)
            .collect();
        let games_outcome = self.detector.detect_games(&games).await;
        self.broadcaster
            .broadcast_game_deltas(&games_outcome.deltas)
            .await;

        debug!(
            season,
            week,
            player_deltas = players.deltas.len(),
            game_deltas = games_outcome.deltas.len(),
            "Live sync detected changes"
        );

        Ok(RunCounts {
            processed: stats.len() + games.len(),
            updated: players.deltas.len() + games_outcome.deltas.len(),
            failed: players.failed + games_outcome.failed,
            player_updates: players.deltas.len(),
            game_updates: games_outcome.deltas.len(),
        })
    }

    async fn sync_players(&self) -> Result<RunCounts> {
        let season = self.source.get_current_season().await?;
        let players = self.source.get_rosters(season).await?;
        let written = self.documents.upsert_players(&players).await?;
        Ok(RunCounts {
            processed: players.len(),
            updated: written,
            ..RunCounts::default()
        })
    }

    async fn sync_schedules(&self) -> Result<RunCounts> {
        let season = self.source.get_current_season().await?;
        let games = self.source.get_schedule(season).await?;
        let written = self.documents.upsert_games(&games).await?;
        Ok(RunCounts {
            processed: games.len(),
            updated: written,
            ..RunCounts::default()
        })
    }
}

#[async_trait]
impl SyncOperator for SyncService {
    async fn trigger(&self, job_type: SyncJobType) -> Result<SyncJob> {
        info!(job_type = %job_type, "Manual sync triggered");
        self.run(job_type).await
    }

    fn current_job(&self) -> Option<SyncJob> {
        self.in_flight
            .read()
            .values()
            .max_by_key(|job| job.started_at)
            .cloned()
    }

    fn history(&self, limit: usize) -> Vec<SyncJob> {
        self.history.recent(limit)
    }

    fn job(&self, job_id: &JobId) -> Option<SyncJob> {
        self.in_flight
            .read()
            .values()
            .find(|job| &job.job_id == job_id)
            .cloned()
            .or_else(|| self.history.find(job_id))
    }

    fn history_by_type(&self, job_type: SyncJobType, limit: usize) -> Vec<SyncJob> {
        self.history.recent_by_type(job_type.canonical(), limit)
    }

    fn health(&self) -> HealthReport {
        health_report(&self.history.recent(HEALTH_WINDOW), self.guards.any_running())
    }

    fn metrics(&self) -> SyncMetrics {
        sync_metrics(&self.history.recent(self.history.capacity()))
    }
}
