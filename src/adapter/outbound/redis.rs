//! Redis-backed key-value store.

use std::time::Duration;

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::AsyncCommands;
use tracing::info;

use crate::error::StoreError;
use crate::port::KeyValueStore;

/// Key-value store over a multiplexed, auto-reconnecting Redis connection.
#[derive(Clone)]
pub struct RedisKeyValueStore {
    manager: ConnectionManager,
}

impl RedisKeyValueStore {
    /// Connect to `url` (e.g. `redis://localhost:6379`).
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid or the server is unreachable.
    pub async fn connect(url: &str) -> Result<Self, StoreError> {
        let client = redis::Client::open(url)?;
        let manager = ConnectionManager::new(client)
            .await
            .map_err(|e| StoreError::Connection(e.to_string()))?;
        info!(url = %url, "Connected to Redis");
        Ok(Self { manager })
    }
}

#[async_trait]
impl KeyValueStore for RedisKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let mut conn = self.manager.clone();
        Ok(conn.get(key).await?)
    }

    async fn set_with_ttl(
        &self,
        key: &str,
        value: &str,
        ttl: Duration,
    ) -> Result<(), StoreError> {
        let mut conn = self.manager.clone();
        let secs = ttl.as_secs().max(1);
        let _: () = conn.set_ex(key, value, secs).await?;
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<bool, StoreError> {
        let mut conn = self.manager.clone();
        let removed: i64 = conn.del(key).await?;
        Ok(removed > 0)
    }

    async fn keys(&self, pattern: &str) -> Result<Vec<String>, StoreError> {
        let mut conn = self.manager.clone();
        Ok(conn.keys(pattern).await?)
    }
}

#[cfg(all(test, feature = "redis-integration"))]
mod tests {
    use super::*;

    fn redis_url() -> String {
        std::env::var("NFLSYNC_REDIS_URL").unwrap_or_else(|_| "redis://127.0.0.1:6379".into())
    }

    #[tokio::test]
    async fn set_get_delete_against_live_server() {
        let store = RedisKeyValueStore::connect(&redis_url()).await.unwrap();
        let key = format!("nflsync-test:{}", uuid::Uuid::new_v4());

        store
            .set_with_ttl(&key, "value", Duration::from_secs(30))
            .await
            .unwrap();
        assert_eq!(store.get(&key).await.unwrap().as_deref(), Some("value"));
        assert_eq!(store.keys(&key).await.unwrap(), vec![key.clone()]);
        assert!(store.delete(&key).await.unwrap());
        assert_eq!(store.get(&key).await.unwrap(), None);
    }
}
