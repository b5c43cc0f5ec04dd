//! Fully wired sync service over in-memory adapters.

use std::sync::Arc;
use std::time::Duration;

use nflsync::adapter::outbound::memory::MemoryKeyValueStore;
use nflsync::application::broadcast::{Broadcaster, SubscriptionRegistry};
use nflsync::application::cache::ChangeCache;
use nflsync::application::sync::{SyncService, SyncSettings, DEFAULT_HISTORY_CAPACITY};
use nflsync::domain::SubscriptionScope;
use nflsync::port::{Connection, KeyValueStore};
use nflsync::testkit::connection::RecordingConnection;
use nflsync::testkit::source::ScriptedSource;
use nflsync::testkit::store::MemoryDocumentStore;

pub const SEND_TIMEOUT: Duration = Duration::from_millis(100);

pub struct Harness {
    pub source: Arc<ScriptedSource>,
    pub documents: Arc<MemoryDocumentStore>,
    pub cache: Arc<ChangeCache>,
    pub registry: Arc<SubscriptionRegistry>,
    pub service: Arc<SyncService>,
}

impl Harness {
    pub fn new(source: ScriptedSource) -> Self {
        Self::build(
            source,
            Arc::new(MemoryKeyValueStore::new()),
            DEFAULT_HISTORY_CAPACITY,
        )
    }

    pub fn with_history_capacity(source: ScriptedSource, capacity: usize) -> Self {
        Self::build(source, Arc::new(MemoryKeyValueStore::new()), capacity)
    }

    pub fn with_store(source: ScriptedSource, store: Arc<dyn KeyValueStore>) -> Self {
        Self::build(source, store, DEFAULT_HISTORY_CAPACITY)
    }

    fn build(source: ScriptedSource, store: Arc<dyn KeyValueStore>, capacity: usize) -> Self {
        let source = Arc::new(source);
        let documents = Arc::new(MemoryDocumentStore::new());
        let cache = Arc::new(ChangeCache::with_defaults(store));
        let registry = Arc::new(SubscriptionRegistry::new());
        let broadcaster = Arc::new(Broadcaster::new(Arc::clone(&registry), SEND_TIMEOUT));
        let settings = SyncSettings {
            history_capacity: capacity,
            ..SyncSettings::default()
        };
        let service = Arc::new(SyncService::new(
            source.clone(),
            documents.clone(),
            Arc::clone(&cache),
            broadcaster,
            settings,
        ));

        Self {
            source,
            documents,
            cache,
            registry,
            service,
        }
    }

    /// Register a new recording client.
    pub fn connect(&self) -> Arc<RecordingConnection> {
        let connection = RecordingConnection::new();
        self.registry.register(connection.clone());
        connection
    }

    /// Register a new recording client subscribed to `player_id`.
    pub fn watch_player(&self, player_id: &str) -> Arc<RecordingConnection> {
        let connection = self.connect();
        self.registry
            .subscribe(connection.id(), SubscriptionScope::Player, player_id);
        connection
    }
}
