use quiz_core::model::{LEADERBOARD_CAPACITY, LeaderboardEntry};

use super::SqliteRepository;
use super::mapping::{conn, map_score_row, usize_to_i64};
use crate::repository::StorageError;

impl SqliteRepository {
    pub(super) async fn insert_score(&self, entry: &LeaderboardEntry) -> Result<(), StorageError> {
        let series_id = match entry.series_name.as_deref() {
            Some(name) => Some(self.series_id(name).await?.ok_or(StorageError::NotFound)?),
            None => None,
        };

        sqlx::query(
            r"
            INSERT INTO leaderboard (username, score, series_id, recorded_at)
            VALUES (?1, ?2, ?3, ?4)
            ",
        )
        .bind(entry.username.as_str())
        .bind(i64::from(entry.score))
        .bind(series_id)
        .bind(entry.recorded_at)
        .execute(&self.pool)
        .await
        .map_err(conn)?;

        Ok(())
    }

    /// Ties resolve by row id, i.e. insertion order.
    pub(super) async fn top_scores(&self) -> Result<Vec<LeaderboardEntry>, StorageError> {
        let rows = sqlx::query(
            r"
            SELECT l.username, l.score, s.name AS series_name, l.recorded_at
            FROM leaderboard l
            LEFT JOIN question_series s ON s.id = l.series_id
            ORDER BY l.score DESC, l.id ASC
            LIMIT ?1
            ",
        )
        .bind(usize_to_i64("limit", LEADERBOARD_CAPACITY)?)
        .fetch_all(&self.pool)
        .await
        .map_err(conn)?;

        rows.iter().map(map_score_row).collect()
    }
}
