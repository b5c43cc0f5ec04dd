//! Delta detection against the change cache.
//!
//! A detection pass never fails as a whole. Each snapshot is compared with
//! its cached observation independently; a store error affects only that
//! snapshot and is reported through [`DetectionOutcome::failed`].

use std::sync::Arc;

use tracing::{debug, warn};

use crate::application::cache::{Cached, ChangeCache};
use crate::domain::{Game, GameScoreDelta, PlayerStats, PlayerStatsDelta};

/// Deltas found in one pass plus per-entity failure counts.
#[derive(Debug, Clone, PartialEq)]
pub struct DetectionOutcome<D> {
    pub deltas: Vec<D>,
    /// Snapshots examined.
    pub checked: usize,
    /// Snapshots whose cache lookup, decode or write failed.
    pub failed: usize,
}

impl<D> DetectionOutcome<D> {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            deltas: Vec::with_capacity(capacity),
            checked: 0,
            failed: 0,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.deltas.is_empty()
    }
}

/// Compares fresh snapshots with cached observations.
pub struct DeltaDetector {
    cache: Arc<ChangeCache>,
}

impl DeltaDetector {
    pub fn new(cache: Arc<ChangeCache>) -> Self {
        Self { cache }
    }

    #[must_use]
    pub fn cache(&self) -> &Arc<ChangeCache> {
        &self.cache
    }

    /// Emit a delta for every player whose stat line is new or changed.
    pub async fn detect_players(
        &self,
        current: &[PlayerStats],
    ) -> DetectionOutcome<PlayerStatsDelta> {
        let mut outcome = DetectionOutcome::with_capacity(current.len());

        for stats in current {
            outcome.checked += 1;

            let previous = match self.cache.get_player(&stats.player_id, stats.week).await {
                Ok(Cached::Found(previous)) => Some(previous),
                Ok(Cached::Missing) => None,
                Ok(Cached::Undecodable(reason)) => {
                    warn!(
                        player_id = %stats.player_id,
                        week = stats.week,
                        reason = %reason,
                        "Cached player stats undecodable, treating as unseen"
                    );
                    outcome.failed += 1;
                    None
                }
                Err(e) => {
                    warn!(
                        player_id = %stats.player_id,
                        week = stats.week,
                        error = %e,
                        "Player stats cache lookup failed"
                    );
                    outcome.failed += 1;
                    continue;
                }
            };

            if let Some(prev) = &previous {
                if !stats.differs_from(prev) {
                    continue;
                }
            }

            if let Err(e) = self.cache.put_player(stats).await {
                warn!(
                    player_id = %stats.player_id,
                    week = stats.week,
                    error = %e,
                    "Failed to cache player stats"
                );
                outcome.failed += 1;
            }

            debug!(
                player_id = %stats.player_id,
                first_sighting = previous.is_none(),
                "Player stats changed"
            );
            outcome
                .deltas
                .push(PlayerStatsDelta::new(previous, stats.clone()));
        }

        outcome
    }

    /// Emit a delta for every game whose score, status or quarter is new or changed.
    pub async fn detect_games(&self, current: &[Game]) -> DetectionOutcome<GameScoreDelta> {
        let mut outcome = DetectionOutcome::with_capacity(current.len());

        for game in current {
            outcome.checked += 1;

            let previous = match self.cache.get_game(&game.game_id).await {
                Ok(Cached::Found(previous)) => Some(previous),
                Ok(Cached::Missing) => None,
                Ok(Cached::Undecodable(reason)) => {
                    warn!(
                        game_id = %game.game_id,
                        reason = %reason,
                        "Cached game undecodable, treating as unseen"
                    );
                    outcome.failed += 1;
                    None
                }
                Err(e) => {
                    warn!(game_id = %game.game_id, error = %e, "Game cache lookup failed");
                    outcome.failed += 1;
                    continue;
                }
            };

            if let Some(prev) = &previous {
                if !game.differs_from(prev) {
                    continue;
                }
            }

            if let Err(e) = self.cache.put_game(game).await {
                warn!(game_id = %game.game_id, error = %e, "Failed to cache game");
                outcome.failed += 1;
            }

            debug!(game_id = %game.game_id, status = %game.status, "Game changed");
            outcome.deltas.push(GameScoreDelta::new(previous, game.clone()));
        }

        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::outbound::memory::MemoryKeyValueStore;
    use crate::domain::{GameStatus, PlayerId};

    fn detector() -> DeltaDetector {
        let store = Arc::new(MemoryKeyValueStore::new());
        DeltaDetector::new(Arc::new(ChangeCache::with_defaults(store)))
    }

    fn stats(yards: i32) -> PlayerStats {
        let mut s = PlayerStats::new("p1", "Player", 2024, 5);
        s.rushing_yards = yards;
        s
    }

    #[tokio::test]
    async fn unseen_player_produces_bootstrap_delta() {
        let detector = detector();
        let outcome = detector.detect_players(&[stats(40)]).await;

        assert_eq!(outcome.deltas.len(), 1);
        assert!(outcome.deltas[0].is_first_sighting());
        assert_eq!(outcome.failed, 0);
    }

    #[tokio::test]
    async fn unchanged_player_is_skipped() {
        let detector = detector();
        detector.detect_players(&[stats(40)]).await;

        let mut same = stats(40);
        same.team = Some("KC".into());
        let outcome = detector.detect_players(&[same]).await;

        assert!(outcome.is_empty());
        assert_eq!(outcome.checked, 1);
        let cached = detector
            .cache()
            .get_player(&PlayerId::new("p1"), 5)
            .await
            .unwrap()
            .into_option()
            .unwrap();
        assert_eq!(cached.team, None);
    }

    #[tokio::test]
    async fn changed_player_overwrites_cache() {
        let detector = detector();
        detector.detect_players(&[stats(40)]).await;

        let outcome = detector.detect_players(&[stats(55)]).await;
        assert_eq!(outcome.deltas.len(), 1);
        assert_eq!(outcome.deltas[0].previous.as_ref().unwrap().rushing_yards, 40);
        assert_eq!(outcome.deltas[0].current.rushing_yards, 55);

        assert!(detector.detect_players(&[stats(55)]).await.is_empty());
    }

    #[tokio::test]
    async fn game_status_change_is_detected() {
        let detector = detector();
        let mut game = Game::new("g1", 2024, 5, "KC", "BUF");
        detector.detect_games(&[game.clone()]).await;

        game.status = GameStatus::InProgress;
        let outcome = detector.detect_games(&[game]).await;
        assert_eq!(outcome.deltas.len(), 1);
        assert_eq!(
            outcome.deltas[0].previous.as_ref().unwrap().status,
            GameStatus::Scheduled
        );
    }
}
