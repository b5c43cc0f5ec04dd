//! Expiring key-value store port backing the change cache.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::StoreError;

/// String-keyed store with per-key expiration.
///
/// Patterns passed to [`keys`](KeyValueStore::keys) use glob syntax where
/// `*` matches any run of characters.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Write a value, replacing any existing one and resetting its expiration.
    async fn set_with_ttl(&self, key: &str, value: &str, ttl: Duration)
        -> Result<(), StoreError>;

    /// Remove a key. Returns whether it existed.
    async fn delete(&self, key: &str) -> Result<bool, StoreError>;

    /// Live keys matching `pattern`.
    async fn keys(&self, pattern: &str) -> Result<Vec<String>, StoreError>;
}
