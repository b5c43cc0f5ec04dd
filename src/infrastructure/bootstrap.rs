//! Composition root: builds adapters and services from configuration.

use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use crate::adapter::outbound::memory::MemoryKeyValueStore;
use crate::adapter::outbound::nflverse::NflverseSource;
use crate::adapter::outbound::redis::RedisKeyValueStore;
use crate::adapter::outbound::sqlite::{create_pool, run_migrations, SqliteDocumentStore};
use crate::application::broadcast::{Broadcaster, SubscriptionRegistry};
use crate::application::cache::ChangeCache;
use crate::application::sync::{SyncService, SyncSettings};
use crate::error::Result;
use crate::infrastructure::config::cache::{CacheBackend, CacheConfig};
use crate::infrastructure::config::settings::Config;
use crate::infrastructure::config::source::SourceConfig;
use crate::infrastructure::config::store::StoreConfig;
use crate::port::{DocumentStore, KeyValueStore, NflDataSource};

/// Fully wired services shared by the scheduler, server and CLI.
pub struct Services {
    pub sync: Arc<SyncService>,
    pub registry: Arc<SubscriptionRegistry>,
    pub broadcaster: Arc<Broadcaster>,
    pub cache: Arc<ChangeCache>,
}

/// Connect the configured key-value backend.
pub async fn build_key_value_store(config: &CacheConfig) -> Result<Arc<dyn KeyValueStore>> {
    let store: Arc<dyn KeyValueStore> = match config.backend {
        CacheBackend::Memory => Arc::new(MemoryKeyValueStore::new()),
        CacheBackend::Redis => Arc::new(RedisKeyValueStore::connect(&config.redis_url).await?),
    };
    info!(backend = ?config.backend, "Change cache backend ready");
    Ok(store)
}

/// Open the SQLite document store, applying pending migrations.
pub fn build_document_store(config: &StoreConfig) -> Result<Arc<dyn DocumentStore>> {
    let pool = create_pool(&config.database)?;
    run_migrations(&pool)?;
    info!(database = %config.database, "Document store initialized");
    Ok(Arc::new(SqliteDocumentStore::new(pool)))
}

pub fn build_source(config: &SourceConfig) -> Result<Arc<dyn NflDataSource>> {
    let source = NflverseSource::new(
        &config.base_url,
        Duration::from_secs(config.request_timeout_secs),
    )?;
    Ok(Arc::new(source))
}

/// Wire services around explicit adapters.
pub fn assemble(
    config: &Config,
    source: Arc<dyn NflDataSource>,
    documents: Arc<dyn DocumentStore>,
    store: Arc<dyn KeyValueStore>,
) -> Services {
    let cache = Arc::new(ChangeCache::new(
        store,
        config.cache.key_prefix.clone(),
        Duration::from_secs(config.cache.ttl_secs),
    ));
    let registry = Arc::new(SubscriptionRegistry::new());
    let broadcaster = Arc::new(Broadcaster::new(
        Arc::clone(&registry),
        config.server.send_timeout(),
    ));
    let settings = SyncSettings {
        scoring_format: config.sync.scoring_format,
        history_capacity: config.sync.history_capacity,
    };
    let sync = Arc::new(SyncService::new(
        source,
        documents,
        Arc::clone(&cache),
        Arc::clone(&broadcaster),
        settings,
    ));

    Services {
        sync,
        registry,
        broadcaster,
        cache,
    }
}

/// Build every service from configuration.
pub async fn build_services(config: &Config) -> Result<Services> {
    let store = build_key_value_store(&config.cache).await?;
    let documents = build_document_store(&config.store)?;
    let source = build_source(&config.source)?;
    Ok(assemble(config, source, documents, store))
}
