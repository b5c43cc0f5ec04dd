//! Registry of live connections and their subscriptions.

use std::collections::HashSet;
use std::sync::Arc;

use dashmap::DashMap;
use serde::Serialize;
use tracing::{debug, info};

use crate::domain::{ConnectionId, SubscriptionScope};
use crate::port::Connection;

/// Counts exposed for status displays.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RegistryStats {
    pub active_connections: usize,
    pub league_subscriptions: usize,
    pub player_subscriptions: usize,
}

/// Concurrent registry of connections and subscription sets.
///
/// Subscription maps hold connection ids only; recipients are resolved into
/// a snapshot `Vec` before any send, so no map guard is held across an await.
#[derive(Default)]
pub struct SubscriptionRegistry {
    connections: DashMap<ConnectionId, Arc<dyn Connection>>,
    leagues: DashMap<String, HashSet<ConnectionId>>,
    players: DashMap<String, HashSet<ConnectionId>>,
}

impl SubscriptionRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn scope_map(&self, scope: SubscriptionScope) -> &DashMap<String, HashSet<ConnectionId>> {
        match scope {
            SubscriptionScope::League => &self.leagues,
            SubscriptionScope::Player => &self.players,
        }
    }

    pub fn register(&self, connection: Arc<dyn Connection>) {
        let id = connection.id();
        self.connections.insert(id, connection);
        info!(
            connection_id = %id,
            total = self.connections.len(),
            "Connection registered"
        );
    }

    /// Remove a connection and every subscription it holds.
    ///
    /// Returns `false` if the connection was not registered.
    pub fn unregister(&self, id: ConnectionId) -> bool {
        let removed = self.connections.remove(&id).is_some();
        for map in [&self.leagues, &self.players] {
            map.retain(|_, members| {
                members.remove(&id);
                !members.is_empty()
            });
        }
        if removed {
            info!(
                connection_id = %id,
                total = self.connections.len(),
                "Connection unregistered"
            );
        }
        removed
    }

    /// Add a subscription. Idempotent. Returns `false` for unknown connections.
    pub fn subscribe(&self, id: ConnectionId, scope: SubscriptionScope, key: &str) -> bool {
        if !self.connections.contains_key(&id) {
            return false;
        }
        self.scope_map(scope)
            .entry(key.to_string())
            .or_default()
            .insert(id);
        // An unregister that raced the insert has already swept the maps.
        if !self.connections.contains_key(&id) {
            self.remove_member(scope, key, id);
            return false;
        }
        debug!(connection_id = %id, scope = %scope, key, "Subscribed");
        true
    }

    fn remove_member(&self, scope: SubscriptionScope, key: &str, id: ConnectionId) -> bool {
        let map = self.scope_map(scope);
        let removed = map
            .get_mut(key)
            .map(|mut members| members.remove(&id))
            .unwrap_or(false);
        map.remove_if(key, |_, members| members.is_empty());
        removed
    }

    /// Remove a subscription. Returns whether it existed.
    pub fn unsubscribe(&self, id: ConnectionId, scope: SubscriptionScope, key: &str) -> bool {
        let removed = self.remove_member(scope, key, id);
        if removed {
            debug!(connection_id = %id, scope = %scope, key, "Unsubscribed");
        }
        removed
    }

    #[must_use]
    pub fn is_subscribed(&self, id: ConnectionId, scope: SubscriptionScope, key: &str) -> bool {
        self.scope_map(scope)
            .get(key)
            .is_some_and(|members| members.contains(&id))
    }

    #[must_use]
    pub fn is_registered(&self, id: ConnectionId) -> bool {
        self.connections.contains_key(&id)
    }

    /// Snapshot of every registered connection.
    #[must_use]
    pub fn all(&self) -> Vec<Arc<dyn Connection>> {
        self.connections
            .iter()
            .map(|entry| Arc::clone(entry.value()))
            .collect()
    }

    /// Snapshot of the connections subscribed to `key` in `scope`.
    #[must_use]
    pub fn subscribers(&self, scope: SubscriptionScope, key: &str) -> Vec<Arc<dyn Connection>> {
        let ids: Vec<ConnectionId> = match self.scope_map(scope).get(key) {
            Some(members) => members.iter().copied().collect(),
            None => return Vec::new(),
        };
        ids.iter()
            .filter_map(|id| self.connections.get(id).map(|c| Arc::clone(c.value())))
            .collect()
    }

    #[must_use]
    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    #[must_use]
    pub fn stats(&self) -> RegistryStats {
        RegistryStats {
            active_connections: self.connections.len(),
            league_subscriptions: self.leagues.len(),
            player_subscriptions: self.players.len(),
        }
    }
}
