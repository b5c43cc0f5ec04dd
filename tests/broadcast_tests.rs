//! Fan-out through the registry and broadcaster.

mod support;

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;

use nflsync::application::broadcast::{Broadcaster, SubscriptionRegistry};
use nflsync::domain::{LeagueId, PushEvent, SubscriptionScope, SyncJobStatus, SyncJobType};
use nflsync::port::{Connection, SyncOperator};
use nflsync::testkit::connection::{FailingConnection, RecordingConnection, StalledConnection};
use nflsync::testkit::domain::quarterback;
use nflsync::testkit::source::ScriptedSource;
use support::harness::Harness;

fn broadcaster() -> Broadcaster {
    Broadcaster::new(Arc::new(SubscriptionRegistry::new()), Duration::from_millis(50))
}

#[tokio::test]
async fn leaderboard_goes_to_league_subscribers() {
    let broadcaster = broadcaster();
    let member = RecordingConnection::new();
    let other_league = RecordingConnection::new();
    broadcaster.registry().register(member.clone());
    broadcaster.registry().register(other_league.clone());
    broadcaster
        .registry()
        .subscribe(member.id(), SubscriptionScope::League, "L1");
    broadcaster
        .registry()
        .subscribe(other_league.id(), SubscriptionScope::League, "L2");

    let report = broadcaster
        .broadcast_leaderboard(&LeagueId::new("L1"), vec![json!({"team": "A", "points": 101.5})])
        .await;

    assert_eq!(report.delivered, 1);
    assert_eq!(member.kinds(), vec!["LEADERBOARD_UPDATE"]);
    assert!(other_league.kinds().is_empty());
}

#[tokio::test]
async fn stalled_client_does_not_hold_up_others() {
    let broadcaster = broadcaster();
    let fast = RecordingConnection::new();
    let stalled = StalledConnection::new();
    broadcaster.registry().register(fast.clone());
    broadcaster.registry().register(stalled.clone());

    let started = tokio::time::Instant::now();
    let report = broadcaster.broadcast_global(&PushEvent::pong()).await;

    assert!(started.elapsed() < Duration::from_secs(1));
    assert_eq!(report.delivered, 1);
    assert_eq!(report.evicted, 1);
    assert!(!broadcaster.registry().is_registered(stalled.id()));
    assert_eq!(fast.kinds(), vec!["PONG"]);
}

#[tokio::test]
async fn send_to_evicts_on_failure() {
    let broadcaster = broadcaster();
    let failing = FailingConnection::new();
    broadcaster.registry().register(failing.clone());
    let target: Arc<dyn Connection> = failing.clone();

    assert!(!broadcaster.send_to(&target, &PushEvent::pong()).await);
    assert_eq!(broadcaster.registry().connection_count(), 0);
}

#[tokio::test]
async fn disconnect_mid_broadcast_clears_subscriptions() {
    let h = Harness::new(
        ScriptedSource::new(2024, 1).with_polls(vec![vec![quarterback("qb1", 1)]]),
    );
    let gone = FailingConnection::new();
    h.registry.register(gone.clone());
    h.registry
        .subscribe(gone.id(), SubscriptionScope::Player, "qb1");
    h.registry
        .subscribe(gone.id(), SubscriptionScope::League, "L1");
    let watcher = h.watch_player("qb1");

    let job = h.service.trigger(SyncJobType::LiveScores).await.unwrap();

    assert_eq!(job.status, SyncJobStatus::Completed);
    assert!(!h.registry.is_registered(gone.id()));
    assert!(!h.registry.is_subscribed(gone.id(), SubscriptionScope::League, "L1"));
    assert_eq!(h.registry.stats().league_subscriptions, 0);
    assert_eq!(h.registry.stats().player_subscriptions, 1);
    assert_eq!(
        watcher.kinds(),
        vec!["PLAYER_STATS", "PLAYER_UPDATE", "SYNC_STATUS"]
    );
}
