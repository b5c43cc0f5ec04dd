//! Bounded in-memory job history.

use std::collections::VecDeque;

use parking_lot::RwLock;

use crate::domain::{JobId, SyncJob, SyncJobType};

pub const DEFAULT_HISTORY_CAPACITY: usize = 100;

/// FIFO of finished job records; the oldest is evicted past capacity.
#[derive(Debug)]
pub struct JobHistory {
    records: RwLock<VecDeque<SyncJob>>,
    capacity: usize,
}

impl JobHistory {
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            records: RwLock::new(VecDeque::with_capacity(capacity)),
            capacity,
        }
    }

    pub fn push(&self, job: SyncJob) {
        let mut records = self.records.write();
        if records.len() >= self.capacity {
            records.pop_front();
        }
        records.push_back(job);
    }

    /// Up to `limit` records, newest first.
    #[must_use]
    pub fn recent(&self, limit: usize) -> Vec<SyncJob> {
        self.records.read().iter().rev().take(limit).cloned().collect()
    }

    /// Up to `limit` records of one type, newest first.
    #[must_use]
    pub fn recent_by_type(&self, job_type: SyncJobType, limit: usize) -> Vec<SyncJob> {
        self.records
            .read()
            .iter()
            .rev()
            .filter(|job| job.job_type == job_type)
            .take(limit)
            .cloned()
            .collect()
    }

    #[must_use]
    pub fn find(&self, job_id: &JobId) -> Option<SyncJob> {
        self.records
            .read()
            .iter()
            .find(|job| &job.job_id == job_id)
            .cloned()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for JobHistory {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn evicts_oldest_past_capacity() {
        let history = JobHistory::new(3);
        let jobs: Vec<SyncJob> = (0..5).map(|_| SyncJob::new(SyncJobType::LiveScores)).collect();
        for job in &jobs {
            history.push(job.clone());
        }

        assert_eq!(history.len(), 3);
        assert!(history.find(&jobs[0].job_id).is_none());
        assert!(history.find(&jobs[1].job_id).is_none());
        let recent = history.recent(10);
        assert_eq!(recent[0].job_id, jobs[4].job_id);
        assert_eq!(recent[2].job_id, jobs[2].job_id);
    }

    #[test]
    fn filters_by_type_before_limiting() {
        let history = JobHistory::default();
        history.push(SyncJob::new(SyncJobType::Players));
        for _ in 0..4 {
            history.push(SyncJob::new(SyncJobType::LiveScores));
        }

        assert_eq!(history.recent_by_type(SyncJobType::Players, 2).len(), 1);
        assert_eq!(history.recent_by_type(SyncJobType::LiveScores, 2).len(), 2);
        assert_eq!(history.recent(2).len(), 2);
    }
}
