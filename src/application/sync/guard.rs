//! Per-job-type overlap guards.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::domain::SyncJobType;

/// One flag per canonical job type.
///
/// A run acquires its flag with a compare-and-set before starting and the
/// returned permit clears it on drop, so a panic or early return cannot
/// leave a job type wedged.
#[derive(Debug, Default)]
pub struct RunGuards {
    players: AtomicBool,
    schedules: AtomicBool,
    live: AtomicBool,
}

impl RunGuards {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn flag(&self, job_type: SyncJobType) -> &AtomicBool {
        match job_type.canonical() {
            SyncJobType::Players => &self.players,
            SyncJobType::Schedules => &self.schedules,
            SyncJobType::LiveScores | SyncJobType::PlayerStats => &self.live,
        }
    }

    /// Claim the guard for `job_type`. `None` if a run is already active.
    #[must_use]
    pub fn try_acquire(&self, job_type: SyncJobType) -> Option<RunPermit<'_>> {
        let flag = self.flag(job_type);
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| RunPermit { flag })
    }

    #[must_use]
    pub fn is_running(&self, job_type: SyncJobType) -> bool {
        self.flag(job_type).load(Ordering::Acquire)
    }

    #[must_use]
    pub fn any_running(&self) -> bool {
        [&self.players, &self.schedules, &self.live]
            .iter()
            .any(|flag| flag.load(Ordering::Acquire))
    }
}

/// Held for the duration of a run.
#[derive(Debug)]
pub struct RunPermit<'a> {
    flag: &'a AtomicBool,
}

impl Drop for RunPermit<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_acquire_is_refused_until_drop() {
        let guards = RunGuards::new();
        let permit = guards.try_acquire(SyncJobType::LiveScores);
        assert!(permit.is_some());
        assert!(guards.try_acquire(SyncJobType::LiveScores).is_none());
        assert!(guards.try_acquire(SyncJobType::PlayerStats).is_none());
        assert!(guards.try_acquire(SyncJobType::Players).is_some());

        drop(permit);
        assert!(!guards.is_running(SyncJobType::LiveScores));
        assert!(guards.try_acquire(SyncJobType::LiveScores).is_some());
    }
}
