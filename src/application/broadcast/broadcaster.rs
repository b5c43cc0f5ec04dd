//! Best-effort fan-out of push events.
//!
//! Every send runs concurrently under its own timeout. A connection whose
//! send fails or times out is evicted from the registry; nothing is retried.

use std::sync::Arc;
use std::time::Duration;

use futures_util::future::join_all;
use tracing::{debug, info, warn};

use super::registry::SubscriptionRegistry;
use crate::domain::{
    GameScoreDelta, LeagueId, PlayerStatsDelta, PushEvent, Scorer, ScoringFormat,
    SubscriptionScope,
};
use crate::error::DeliveryError;
use crate::port::Connection;

/// Default per-connection send timeout.
pub const DEFAULT_SEND_TIMEOUT: Duration = Duration::from_secs(5);

/// Outcome of one fan-out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeliveryReport {
    pub recipients: usize,
    pub delivered: usize,
    pub evicted: usize,
}

impl DeliveryReport {
    fn merge(&mut self, other: Self) {
        self.recipients += other.recipients;
        self.delivered += other.delivered;
        self.evicted += other.evicted;
    }
}

/// Pushes events to registered connections.
pub struct Broadcaster {
    registry: Arc<SubscriptionRegistry>,
    send_timeout: Duration,
}

impl Broadcaster {
    pub fn new(registry: Arc<SubscriptionRegistry>, send_timeout: Duration) -> Self {
        Self {
            registry,
            send_timeout,
        }
    }

    #[must_use]
    pub fn registry(&self) -> &Arc<SubscriptionRegistry> {
        &self.registry
    }

    /// Send to every registered connection.
    pub async fn broadcast_global(&self, event: &PushEvent) -> DeliveryReport {
        let recipients = self.registry.all();
        self.deliver(recipients, event).await
    }

    /// Send to the subscribers of `key`. No-op when nobody is subscribed.
    pub async fn broadcast_scoped(
        &self,
        scope: SubscriptionScope,
        key: &str,
        event: &PushEvent,
    ) -> DeliveryReport {
        let recipients = self.registry.subscribers(scope, key);
        if recipients.is_empty() {
            return DeliveryReport::default();
        }
        self.deliver(recipients, event).await
    }

    /// Send to a single connection, evicting it on failure.
    pub async fn send_to(&self, connection: &Arc<dyn Connection>, event: &PushEvent) -> bool {
        self.deliver(vec![Arc::clone(connection)], event).await.delivered == 1
    }

    /// `PLAYER_STATS` batch to everyone, then `PLAYER_UPDATE` to each
    /// changed player's subscribers once the batch has gone out.
    pub async fn broadcast_player_deltas(
        &self,
        deltas: &[PlayerStatsDelta],
        scorer: &Scorer,
        format: ScoringFormat,
    ) -> DeliveryReport {
        if deltas.is_empty() {
            return DeliveryReport::default();
        }

        let mut report = self.broadcast_global(&PushEvent::player_stats(deltas)).await;

        for delta in deltas {
            let key = delta.player_id().as_str();
            if self.registry.subscribers(SubscriptionScope::Player, key).is_empty() {
                continue;
            }
            let breakdown = scorer.breakdown(&delta.current, format);
            let event = PushEvent::player_update(delta, Some(breakdown));
            report.merge(
                self.broadcast_scoped(SubscriptionScope::Player, key, &event)
                    .await,
            );
        }

        info!(
            count = deltas.len(),
            delivered = report.delivered,
            "Broadcast player stat updates"
        );
        report
    }

    /// `GAME_SCORES` batch to everyone.
    pub async fn broadcast_game_deltas(&self, deltas: &[GameScoreDelta]) -> DeliveryReport {
        if deltas.is_empty() {
            return DeliveryReport::default();
        }
        let report = self.broadcast_global(&PushEvent::game_scores(deltas)).await;
        info!(
            count = deltas.len(),
            delivered = report.delivered,
            "Broadcast game score updates"
        );
        report
    }

    /// `LEADERBOARD_UPDATE` to one league's subscribers.
    pub async fn broadcast_leaderboard(
        &self,
        league_id: &LeagueId,
        leaderboard: Vec<serde_json::Value>,
    ) -> DeliveryReport {
        let event = PushEvent::leaderboard(league_id.clone(), leaderboard);
        let report = self
            .broadcast_scoped(SubscriptionScope::League, league_id.as_str(), &event)
            .await;
        debug!(league_id = %league_id, delivered = report.delivered, "Broadcast leaderboard");
        report
    }

    async fn deliver(
        &self,
        recipients: Vec<Arc<dyn Connection>>,
        event: &PushEvent,
    ) -> DeliveryReport {
        let timeout = self.send_timeout;
        let sends = recipients.iter().map(|connection| async move {
            let result = match tokio::time::timeout(timeout, connection.send(event)).await {
                Ok(result) => result,
                Err(_) => Err(DeliveryError::Timeout {
                    millis: u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
                }),
            };
            (connection.id(), result)
        });
        let results = join_all(sends).await;

        let mut report = DeliveryReport {
            recipients: results.len(),
            ..DeliveryReport::default()
        };
        for (id, result) in results {
            match result {
                Ok(()) => report.delivered += 1,
                Err(e) => {
                    warn!(
                        connection_id = %id,
                        event = event.kind(),
                        error = %e,
                        "Delivery failed, evicting connection"
                    );
                    if self.registry.unregister(id) {
                        report.evicted += 1;
                    }
                }
            }
        }
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PlayerStats;
    use crate::testkit::connection::{FailingConnection, RecordingConnection, StalledConnection};

    fn broadcaster() -> Broadcaster {
        Broadcaster::new(Arc::new(SubscriptionRegistry::new()), Duration::from_millis(50))
    }

    #[tokio::test]
    async fn global_reaches_every_connection() {
        let broadcaster = broadcaster();
        let a = RecordingConnection::new();
        let b = RecordingConnection::new();
        broadcaster.registry().register(a.clone());
        broadcaster.registry().register(b.clone());

        let report = broadcaster.broadcast_global(&PushEvent::pong()).await;
        assert_eq!(report.delivered, 2);
        assert_eq!(a.kinds(), vec!["PONG"]);
        assert_eq!(b.kinds(), vec!["PONG"]);
    }

    #[tokio::test]
    async fn scoped_without_subscribers_is_noop() {
        let broadcaster = broadcaster();
        let a = RecordingConnection::new();
        broadcaster.registry().register(a.clone());

        let report = broadcaster
            .broadcast_scoped(SubscriptionScope::League, "L1", &PushEvent::pong())
            .await;
        assert_eq!(report, DeliveryReport::default());
        assert!(a.kinds().is_empty());
    }

    #[tokio::test]
    async fn failing_and_stalled_connections_are_evicted() {
        let broadcaster = broadcaster();
        let ok = RecordingConnection::new();
        let failing = FailingConnection::new();
        let stalled = StalledConnection::new();
        broadcaster.registry().register(ok.clone());
        broadcaster.registry().register(failing.clone());
        broadcaster.registry().register(stalled.clone());

        let report = broadcaster.broadcast_global(&PushEvent::pong()).await;
        assert_eq!(report.recipients, 3);
        assert_eq!(report.delivered, 1);
        assert_eq!(report.evicted, 2);
        assert_eq!(broadcaster.registry().connection_count(), 1);
    }

    #[tokio::test]
    async fn player_update_goes_to_subscribers_only() {
        let broadcaster = broadcaster();
        let watcher = RecordingConnection::new();
        let bystander = RecordingConnection::new();
        broadcaster.registry().register(watcher.clone());
        broadcaster.registry().register(bystander.clone());
        broadcaster
            .registry()
            .subscribe(watcher.id(), SubscriptionScope::Player, "p1");

        let deltas = vec![
            PlayerStatsDelta::new(None, PlayerStats::new("p1", "One", 2024, 1)),
            PlayerStatsDelta::new(None, PlayerStats::new("p2", "Two", 2024, 1)),
        ];
        broadcaster
            .broadcast_player_deltas(&deltas, &Scorer::default(), ScoringFormat::Ppr)
            .await;

        assert_eq!(watcher.kinds(), vec!["PLAYER_STATS", "PLAYER_UPDATE"]);
        assert_eq!(bystander.kinds(), vec!["PLAYER_STATS"]);
    }
}
