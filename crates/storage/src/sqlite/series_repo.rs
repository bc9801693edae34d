use quiz_core::model::Question;
use sqlx::Row;
use tracing::debug;

use super::SqliteRepository;
use super::mapping::{conn, map_question_row, ser, usize_to_i64, write_err};
use crate::repository::StorageError;

impl SqliteRepository {
    pub(super) async fn insert_series(
        &self,
        name: &str,
        questions: &[Question],
    ) -> Result<(), StorageError> {
        let mut tx = self.pool.begin().await.map_err(conn)?;

        let res = sqlx::query("INSERT INTO question_series (name) VALUES (?1)")
            .bind(name)
            .execute(&mut *tx)
            .await
            .map_err(write_err)?;
        let series_id = res.last_insert_rowid();

        for (position, question) in questions.iter().enumerate() {
            let [c1, c2, c3, c4] = question.choices();
            sqlx::query(
                r"
                INSERT INTO questions (
                    series_id, position, question_text,
                    choice_1, choice_2, choice_3, choice_4, correct_choice
                )
                VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
                ",
            )
            .bind(series_id)
            .bind(usize_to_i64("position", position)?)
            .bind(question.text())
            .bind(c1.as_str())
            .bind(c2.as_str())
            .bind(c3.as_str())
            .bind(c4.as_str())
            .bind(usize_to_i64("correct_choice", question.correct_choice())?)
            .execute(&mut *tx)
            .await
            .map_err(write_err)?;
        }

        tx.commit().await.map_err(conn)?;
        debug!(series = name, series_id, questions = questions.len(), "series inserted");
        Ok(())
    }

    pub(super) async fn series_names(&self) -> Result<Vec<String>, StorageError> {
        let rows = sqlx::query("SELECT name FROM question_series ORDER BY id ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(conn)?;

        rows.iter()
            .map(|row| row.try_get::<String, _>("name").map_err(ser))
            .collect()
    }

    pub(super) async fn questions_for(&self, name: &str) -> Result<Vec<Question>, StorageError> {
        let series_id: i64 = sqlx::query("SELECT id FROM question_series WHERE name = ?1")
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(conn)?
            .ok_or(StorageError::NotFound)?
            .try_get("id")
            .map_err(ser)?;

        let rows = sqlx::query(
            r"
            SELECT question_text, choice_1, choice_2, choice_3, choice_4, correct_choice
            FROM questions
            WHERE series_id = ?1
            ORDER BY position ASC
            ",
        )
        .bind(series_id)
        .fetch_all(&self.pool)
        .await
        .map_err(conn)?;

        rows.iter().map(map_question_row).collect()
    }

    pub(super) async fn series_id(&self, name: &str) -> Result<Option<i64>, StorageError> {
        let row = sqlx::query("SELECT id FROM question_series WHERE name = ?1")
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(conn)?;

        row.map(|row| row.try_get::<i64, _>("id").map_err(ser))
            .transpose()
    }
}
