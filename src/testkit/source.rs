//! Scripted [`NflDataSource`] for driving sync runs in tests.
//!
//! Each `get_player_stats` call pops the next scripted poll. Once the script
//! is exhausted the last successful poll repeats, which models a feed that
//! has stopped changing. Errors are scripted as `Err(message)`.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::Notify;

use crate::domain::{Game, Player, PlayerStats};
use crate::error::SourceError;
use crate::port::NflDataSource;

type Poll = Result<Vec<PlayerStats>, String>;

/// Pauses a stats fetch until released.
#[derive(Clone, Default)]
pub struct Gate {
    entered: Arc<Notify>,
    release: Arc<Notify>,
}

impl Gate {
    /// Wait until a fetch is parked at the gate.
    pub async fn entered(&self) {
        self.entered.notified().await;
    }

    /// Let the parked fetch continue.
    pub fn release(&self) {
        self.release.notify_one();
    }
}

pub struct ScriptedSource {
    season: i32,
    week: u32,
    polls: Mutex<VecDeque<Poll>>,
    last: Mutex<Vec<PlayerStats>>,
    schedule: Mutex<Result<Vec<Game>, String>>,
    rosters: Mutex<Vec<Player>>,
    gate: Mutex<Option<Gate>>,
    stats_calls: AtomicU32,
}

impl ScriptedSource {
    pub fn new(season: i32, week: u32) -> Self {
        Self {
            season,
            week,
            polls: Mutex::new(VecDeque::new()),
            last: Mutex::new(Vec::new()),
            schedule: Mutex::new(Ok(Vec::new())),
            rosters: Mutex::new(Vec::new()),
            gate: Mutex::new(None),
            stats_calls: AtomicU32::new(0),
        }
    }

    pub fn with_polls(self, polls: Vec<Vec<PlayerStats>>) -> Self {
        *self.polls.lock() = polls.into_iter().map(Ok).collect();
        self
    }

    pub fn with_schedule(self, games: Vec<Game>) -> Self {
        *self.schedule.lock() = Ok(games);
        self
    }

    pub fn with_rosters(self, players: Vec<Player>) -> Self {
        *self.rosters.lock() = players;
        self
    }

    /// Append a poll to the script.
    pub fn push_poll(&self, stats: Vec<PlayerStats>) {
        self.polls.lock().push_back(Ok(stats));
    }

    /// Append a failing poll to the script.
    pub fn push_failure(&self, message: &str) {
        self.polls.lock().push_back(Err(message.to_string()));
    }

    pub fn set_schedule(&self, games: Vec<Game>) {
        *self.schedule.lock() = Ok(games);
    }

    pub fn fail_schedule(&self, message: &str) {
        *self.schedule.lock() = Err(message.to_string());
    }

    /// Park the next stats fetch until the returned gate is released.
    pub fn hold_next(&self) -> Gate {
        let gate = Gate::default();
        *self.gate.lock() = Some(gate.clone());
        gate
    }

    pub fn stats_calls(&self) -> u32 {
        self.stats_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl NflDataSource for ScriptedSource {
    async fn get_player_stats(
        &self,
        _season: i32,
        week: u32,
    ) -> Result<Vec<PlayerStats>, SourceError> {
        self.stats_calls.fetch_add(1, Ordering::SeqCst);

        let gate = self.gate.lock().take();
        if let Some(gate) = gate {
            gate.entered.notify_one();
            gate.release.notified().await;
        }

        let next = self.polls.lock().pop_front();
        let stats = match next {
            Some(Ok(stats)) => {
                self.last.lock().clone_from(&stats);
                stats
            }
            Some(Err(message)) => return Err(SourceError::Unavailable(message)),
            None => self.last.lock().clone(),
        };
        Ok(stats.into_iter().filter(|s| s.week == week).collect())
    }

    async fn get_schedule(&self, _season: i32) -> Result<Vec<Game>, SourceError> {
        self.schedule
            .lock()
            .clone()
            .map_err(SourceError::Unavailable)
    }

    async fn get_rosters(&self, _season: i32) -> Result<Vec<Player>, SourceError> {
        Ok(self.rosters.lock().clone())
    }

    async fn get_current_week(&self) -> Result<u32, SourceError> {
        Ok(self.week)
    }

    async fn get_current_season(&self) -> Result<i32, SourceError> {
        Ok(self.season)
    }
}
