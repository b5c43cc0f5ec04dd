//! In-process expiring key-value store.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;

use crate::error::StoreError;
use crate::port::KeyValueStore;

#[derive(Debug, Clone)]
struct Entry {
    value: String,
    expires_at: DateTime<Utc>,
}

impl Entry {
    fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

/// Stored-entry count below which writes never sweep.
const MIN_SWEEP_THRESHOLD: usize = 64;

/// Thread-safe map with per-key expiration.
///
/// Expired entries are invisible to reads. A write sweeps them out once the
/// map has grown to twice its size after the previous sweep, so memory stays
/// bounded by the live key set.
#[derive(Debug)]
pub struct MemoryKeyValueStore {
    entries: RwLock<HashMap<String, Entry>>,
    sweep_at: AtomicUsize,
}

impl Default for MemoryKeyValueStore {
    fn default() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            sweep_at: AtomicUsize::new(MIN_SWEEP_THRESHOLD),
        }
    }
}

impl MemoryKeyValueStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove expired entries. Returns the number removed.
    pub fn prune_expired(&self) -> usize {
        let now = Utc::now();
        let mut entries = self.entries.write();
        let before = entries.len();
        entries.retain(|_, entry| !entry.is_expired(now));
        before - entries.len()
    }

    /// Expiration instant of a live key.
    #[must_use]
    pub fn expires_at(&self, key: &str) -> Option<DateTime<Utc>> {
        let now = Utc::now();
        self.entries
            .read()
            .get(key)
            .filter(|entry| !entry.is_expired(now))
            .map(|entry| entry.expires_at)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        let now = Utc::now();
        self.entries
            .read()
            .values()
            .filter(|entry| !entry.is_expired(now))
            .count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Glob match where `*` matches any run of characters and `?` one character.
pub(crate) fn glob_match(pattern: &str, candidate: &str) -> bool {
    let pattern: Vec<char> = pattern.chars().collect();
    let candidate: Vec<char> = candidate.chars().collect();
    let (mut p, mut c) = (0, 0);
    let mut backtrack: Option<(usize, usize)> = None;

    while c < candidate.len() {
        match pattern.get(p) {
            Some(&'*') => {
                backtrack = Some((p, c));
                p += 1;
            }
            Some(&ch) if ch == '?' || ch == candidate[c] => {
                p += 1;
                c += 1;
            }
            _ => match backtrack {
                Some((star, matched)) => {
                    p = star + 1;
                    c = matched + 1;
                    backtrack = Some((star, matched + 1));
                }
                None => return false,
            },
        }
    }
    pattern[p..].iter().all(|&ch| ch == '*')
}

#[async_trait]
impl KeyValueStore for MemoryKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let now = Utc::now();
        Ok(self
            .entries
            .read()
            .get(key)
            .filter(|entry| !entry.is_expired(now))
            .map(|entry| entry.value.clone()))
    }

    async fn set_with_ttl(
        &self,
        key: &str,
        value: &str,
        ttl: Duration,
    ) -> Result<(), StoreError> {
        let ttl = chrono::Duration::from_std(ttl)
            .map_err(|e| StoreError::Encode(format!("ttl out of range: {e}")))?;
        let entry = Entry {
            value: value.to_string(),
            expires_at: Utc::now() + ttl,
        };
        let now = Utc::now();
        let mut entries = self.entries.write();
        if entries.len() >= self.sweep_at.load(Ordering::Relaxed) {
            entries.retain(|_, entry| !entry.is_expired(now));
            self.sweep_at.store(
                (entries.len() * 2).max(MIN_SWEEP_THRESHOLD),
                Ordering::Relaxed,
            );
        }
        entries.insert(key.to_string(), entry);
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<bool, StoreError> {
        let now = Utc::now();
        Ok(self
            .entries
            .write()
            .remove(key)
            .is_some_and(|entry| !entry.is_expired(now)))
    }

    async fn keys(&self, pattern: &str) -> Result<Vec<String>, StoreError> {
        let now = Utc::now();
        let mut keys: Vec<String> = self
            .entries
            .read()
            .iter()
            .filter(|(key, entry)| !entry.is_expired(now) && glob_match(pattern, key))
            .map(|(key, _)| key.clone())
            .collect();
        keys.sort();
        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn glob_patterns() {
        assert!(glob_match("nfl:*", "nfl:player-stats:p1-1"));
        assert!(glob_match("nfl:player-stats:*", "nfl:player-stats:p1-1"));
        assert!(!glob_match("nfl:game-scores:*", "nfl:player-stats:p1-1"));
        assert!(glob_match("*-1", "nfl:player-stats:p1-1"));
        assert!(glob_match("nfl:player-stats:p?-1", "nfl:player-stats:p1-1"));
        assert!(!glob_match("nfl:", "nfl:x"));
        assert!(glob_match("*", ""));
    }

    #[tokio::test]
    async fn expired_entries_are_invisible() {
        let store = MemoryKeyValueStore::new();
        store
            .set_with_ttl("a", "1", Duration::from_millis(1))
            .await
            .unwrap();
        store
            .set_with_ttl("b", "2", Duration::from_secs(60))
            .await
            .unwrap();
        tokio::time::sleep(Duration::from_millis(10)).await;

        assert_eq!(store.get("a").await.unwrap(), None);
        assert_eq!(store.get("b").await.unwrap().as_deref(), Some("2"));
        assert_eq!(store.keys("*").await.unwrap(), vec!["b".to_string()]);
        assert_eq!(store.prune_expired(), 1);
    }

    #[tokio::test]
    async fn writes_sweep_expired_entries() {
        let store = MemoryKeyValueStore::new();
        for week in 0..MIN_SWEEP_THRESHOLD {
            store
                .set_with_ttl(&format!("p1-{week}"), "{}", Duration::from_millis(1))
                .await
                .unwrap();
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
        assert_eq!(store.entries.read().len(), MIN_SWEEP_THRESHOLD);

        store
            .set_with_ttl("p1-next", "{}", Duration::from_secs(60))
            .await
            .unwrap();
        assert_eq!(store.entries.read().len(), 1);
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn reads_do_not_refresh_expiration() {
        let store = MemoryKeyValueStore::new();
        store
            .set_with_ttl("k", "v", Duration::from_secs(60))
            .await
            .unwrap();
        let first = store.expires_at("k").unwrap();
        store.get("k").await.unwrap();
        assert_eq!(store.expires_at("k"), Some(first));
    }

    #[tokio::test]
    async fn delete_reports_existence() {
        let store = MemoryKeyValueStore::new();
        store
            .set_with_ttl("k", "v", Duration::from_secs(60))
            .await
            .unwrap();
        assert!(store.delete("k").await.unwrap());
        assert!(!store.delete("k").await.unwrap());
    }
}
