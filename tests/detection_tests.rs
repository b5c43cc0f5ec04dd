//! Delta detection behavior when the change cache misbehaves.

mod support;

use std::sync::Arc;
use std::time::Duration;

use nflsync::adapter::outbound::memory::MemoryKeyValueStore;
use nflsync::application::cache::ChangeCache;
use nflsync::application::delta::DeltaDetector;
use nflsync::domain::{GameId, SyncJobStatus, SyncJobType};
use nflsync::port::{KeyValueStore, SyncOperator};
use nflsync::testkit::domain::{game, live_game, rusher};
use nflsync::testkit::source::ScriptedSource;
use nflsync::testkit::store::{FailingKeyValueStore, FailureMode};
use support::harness::Harness;

fn detector_over(store: Arc<dyn KeyValueStore>) -> DeltaDetector {
    DeltaDetector::new(Arc::new(ChangeCache::with_defaults(store)))
}

#[tokio::test]
async fn write_failure_still_emits_delta() {
    let detector = detector_over(Arc::new(FailingKeyValueStore::new(FailureMode::Writes)));

    let outcome = detector
        .detect_players(&[rusher("rb1", 3, 10), rusher("rb2", 3, 20)])
        .await;

    assert_eq!(outcome.deltas.len(), 2);
    assert_eq!(outcome.failed, 2);

    // Nothing was cached, so the same snapshots are reported again.
    let again = detector.detect_players(&[rusher("rb1", 3, 10)]).await;
    assert_eq!(again.deltas.len(), 1);
}

#[tokio::test]
async fn read_failure_skips_entity() {
    let detector = detector_over(Arc::new(FailingKeyValueStore::new(FailureMode::Reads)));

    let outcome = detector.detect_games(&[game("g1", 3), game("g2", 3)]).await;

    assert!(outcome.deltas.is_empty());
    assert_eq!(outcome.checked, 2);
    assert_eq!(outcome.failed, 2);
}

#[tokio::test]
async fn undecodable_entry_is_treated_as_unseen() {
    let store = Arc::new(MemoryKeyValueStore::new());
    store
        .set_with_ttl("nfl:game-scores:g1", "{broken", Duration::from_secs(60))
        .await
        .unwrap();
    let detector = detector_over(store.clone());

    let outcome = detector.detect_games(&[live_game("g1", 3, 14, 10, "Q3")]).await;

    assert_eq!(outcome.deltas.len(), 1);
    assert!(outcome.deltas[0].previous.is_none());
    assert_eq!(outcome.failed, 1);
    let cached = detector
        .cache()
        .get_game(&GameId::new("g1"))
        .await
        .unwrap()
        .into_option()
        .unwrap();
    assert_eq!(cached.home_score, Some(14));
}

#[tokio::test]
async fn unchanged_observation_keeps_original_expiry() {
    let store = Arc::new(MemoryKeyValueStore::new());
    let detector = detector_over(store.clone());
    detector.detect_games(&[game("g1", 3)]).await;
    let first_expiry = store.expires_at("nfl:game-scores:g1").unwrap();

    tokio::time::sleep(Duration::from_millis(20)).await;
    let outcome = detector.detect_games(&[game("g1", 3)]).await;

    assert!(outcome.deltas.is_empty());
    assert_eq!(store.expires_at("nfl:game-scores:g1").unwrap(), first_expiry);
}

#[tokio::test]
async fn cache_write_failures_mark_run_partial() {
    let source = ScriptedSource::new(2024, 3)
        .with_polls(vec![vec![rusher("rb1", 3, 10)]])
        .with_schedule(vec![game("g1", 3)]);
    let h = Harness::with_store(source, Arc::new(FailingKeyValueStore::new(FailureMode::Writes)));
    let client = h.connect();

    let job = h.service.trigger(SyncJobType::LiveScores).await.unwrap();

    assert_eq!(job.status, SyncJobStatus::PartialFailure);
    assert_eq!(job.records_updated, 2);
    assert_eq!(job.records_failed, 2);
    assert_eq!(client.kinds(), vec!["PLAYER_STATS", "GAME_SCORES", "SYNC_STATUS"]);
}

#[tokio::test]
async fn cache_outage_does_not_fail_the_run() {
    let source = ScriptedSource::new(2024, 3).with_polls(vec![vec![rusher("rb1", 3, 10)]]);
    let h = Harness::with_store(
        source,
        Arc::new(FailingKeyValueStore::new(FailureMode::Everything)),
    );

    let job = h.service.trigger(SyncJobType::LiveScores).await.unwrap();

    assert_eq!(job.status, SyncJobStatus::PartialFailure);
    assert_eq!(job.records_updated, 0);
    assert!(job.error_message.is_none());
}
