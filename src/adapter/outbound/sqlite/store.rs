//! SQLite document store implementation.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use tracing::debug;

use super::connection::DbPool;
use super::model::{GameRow, PlayerRow};
use super::schema::{games, players};
use crate::domain::{Game, Player};
use crate::error::StoreError;
use crate::port::DocumentStore;

/// SQLite-backed roster and schedule store.
///
/// Upserts are `REPLACE INTO` keyed by the natural id, run in one
/// transaction per batch.
pub struct SqliteDocumentStore {
    pool: DbPool,
}

impl SqliteDocumentStore {
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Run `work` on a pooled connection off the async workers.
    async fn blocking<T, F>(&self, work: F) -> Result<T, StoreError>
    where
        T: Send + 'static,
        F: FnOnce(&mut SqliteConnection) -> Result<T, StoreError> + Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut conn = pool
                .get()
                .map_err(|e| StoreError::Connection(e.to_string()))?;
            work(&mut conn)
        })
        .await
        .map_err(|e| StoreError::Unavailable(format!("database task failed: {e}")))?
    }
}

fn database_error(e: diesel::result::Error) -> StoreError {
    StoreError::Database(e.to_string())
}

#[async_trait]
impl DocumentStore for SqliteDocumentStore {
    async fn upsert_players(&self, batch: &[Player]) -> Result<usize, StoreError> {
        let now = Utc::now();
        let rows: Vec<PlayerRow> = batch
            .iter()
            .map(|p| PlayerRow::from_player(p, now))
            .collect();

        let written = self
            .blocking(move |conn| {
                conn.transaction::<usize, diesel::result::Error, _>(|conn| {
                    let mut written = 0;
                    for row in &rows {
                        written += diesel::replace_into(players::table)
                            .values(row)
                            .execute(conn)?;
                    }
                    Ok(written)
                })
                .map_err(database_error)
            })
            .await?;

        debug!(count = written, "Upserted players");
        Ok(written)
    }

    async fn upsert_games(&self, batch: &[Game]) -> Result<usize, StoreError> {
        let now = Utc::now();
        let rows: Vec<GameRow> = batch.iter().map(|g| GameRow::from_game(g, now)).collect();

        let written = self
            .blocking(move |conn| {
                conn.transaction::<usize, diesel::result::Error, _>(|conn| {
                    let mut written = 0;
                    for row in &rows {
                        written += diesel::replace_into(games::table)
                            .values(row)
                            .execute(conn)?;
                    }
                    Ok(written)
                })
                .map_err(database_error)
            })
            .await?;

        debug!(count = written, "Upserted games");
        Ok(written)
    }

    async fn find_players_by_team(&self, team: &str) -> Result<Vec<Player>, StoreError> {
        let team = team.to_string();
        let rows: Vec<PlayerRow> = self
            .blocking(move |conn| {
                players::table
                    .filter(players::team.eq(team))
                    .order(players::name.asc())
                    .select(PlayerRow::as_select())
                    .load(conn)
                    .map_err(database_error)
            })
            .await?;
        Ok(rows.into_iter().map(PlayerRow::into_player).collect())
    }

    async fn find_games(&self, season: i32, week: Option<u32>) -> Result<Vec<Game>, StoreError> {
        let rows: Vec<GameRow> = self
            .blocking(move |conn| {
                let mut query = games::table
                    .filter(games::season.eq(season))
                    .order((games::week.asc(), games::kickoff.asc(), games::game_id.asc()))
                    .select(GameRow::as_select())
                    .into_boxed();
                if let Some(week) = week {
                    query = query.filter(games::week.eq(i32::try_from(week).unwrap_or(i32::MAX)));
                }
                query.load(conn).map_err(database_error)
            })
            .await?;
        rows.into_iter().map(GameRow::into_game).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::outbound::sqlite::connection::{create_pool, run_migrations};
    use crate::domain::GameStatus;

    fn store() -> (tempfile::TempDir, SqliteDocumentStore) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nflsync.db");
        let pool = create_pool(path.to_str().unwrap()).unwrap();
        run_migrations(&pool).unwrap();
        (dir, SqliteDocumentStore::new(pool))
    }

    #[tokio::test]
    async fn upsert_replaces_players_by_id() {
        let (_dir, store) = store();
        let mut player = Player::new("p1", "Patrick Mahomes");
        player.team = Some("KC".into());
        player.jersey_number = Some(15);
        store.upsert_players(&[player.clone()]).await.unwrap();

        player.status = "INACTIVE".into();
        store.upsert_players(&[player.clone()]).await.unwrap();

        let found = store.find_players_by_team("KC").await.unwrap();
        assert_eq!(found, vec![player]);
        assert!(store.find_players_by_team("BUF").await.unwrap().is_empty());
    }

    #[tokio::test(flavor = "current_thread")]
    async fn batch_writes_yield_to_other_tasks() {
        use std::sync::atomic::{AtomicBool, Ordering};
        use std::sync::Arc;

        let (_dir, store) = store();
        let roster: Vec<Player> = (0..500)
            .map(|i| Player::new(format!("p{i}"), format!("Player {i}")))
            .collect();

        let ticked = Arc::new(AtomicBool::new(false));
        let ticker = {
            let ticked = Arc::clone(&ticked);
            tokio::spawn(async move { ticked.store(true, Ordering::SeqCst) })
        };

        assert_eq!(store.upsert_players(&roster).await.unwrap(), 500);
        assert!(ticked.load(Ordering::SeqCst));
        ticker.await.unwrap();
    }

    #[tokio::test]
    async fn find_games_filters_by_week() {
        let (_dir, store) = store();
        let mut final_game = Game::new("2024_01_KC_BAL", 2024, 1, "KC", "BAL");
        final_game.home_score = Some(27);
        final_game.away_score = Some(20);
        final_game.status = GameStatus::Final;
        final_game.kickoff = Some(Utc::now());
        let later = Game::new("2024_02_KC_CIN", 2024, 2, "KC", "CIN");
        let other_season = Game::new("2023_01_KC_DET", 2023, 1, "KC", "DET");

        let written = store
            .upsert_games(&[final_game.clone(), later, other_season])
            .await
            .unwrap();
        assert_eq!(written, 3);

        assert_eq!(store.find_games(2024, None).await.unwrap().len(), 2);
        let week_one = store.find_games(2024, Some(1)).await.unwrap();
        assert_eq!(week_one.len(), 1);
        assert_eq!(week_one[0].status, GameStatus::Final);
        assert_eq!(week_one[0].home_score, Some(27));
    }
}
