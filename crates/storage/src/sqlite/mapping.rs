use quiz_core::model::{LeaderboardEntry, Question};
use sqlx::Row;
use sqlx::sqlite::SqliteRow;

use crate::repository::StorageError;

pub(crate) fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

pub(crate) fn conn<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Connection(e.to_string())
}

/// Unique-constraint violations become `Conflict`; anything else is a connection error.
pub(crate) fn write_err(e: sqlx::Error) -> StorageError {
    let unique = e
        .as_database_error()
        .is_some_and(|db| db.is_unique_violation());
    if unique {
        StorageError::Conflict
    } else {
        conn(e)
    }
}

pub(crate) fn usize_to_i64(field: &'static str, v: usize) -> Result<i64, StorageError> {
    i64::try_from(v).map_err(|_| StorageError::Serialization(format!("{field} overflow")))
}

pub(crate) fn map_question_row(row: &SqliteRow) -> Result<Question, StorageError> {
    let text: String = row.try_get("question_text").map_err(ser)?;
    let choices = [
        row.try_get::<String, _>("choice_1").map_err(ser)?,
        row.try_get::<String, _>("choice_2").map_err(ser)?,
        row.try_get::<String, _>("choice_3").map_err(ser)?,
        row.try_get::<String, _>("choice_4").map_err(ser)?,
    ];
    let correct: i64 = row.try_get("correct_choice").map_err(ser)?;
    let correct = usize::try_from(correct)
        .map_err(|_| StorageError::Serialization(format!("invalid correct_choice: {correct}")))?;

    Question::new(text, choices, correct).map_err(ser)
}

pub(crate) fn map_score_row(row: &SqliteRow) -> Result<LeaderboardEntry, StorageError> {
    let score: i64 = row.try_get("score").map_err(ser)?;
    let score = u32::try_from(score)
        .map_err(|_| StorageError::Serialization(format!("invalid score: {score}")))?;

    Ok(LeaderboardEntry::new(
        row.try_get::<String, _>("username").map_err(ser)?,
        score,
        row.try_get::<Option<String>, _>("series_name").map_err(ser)?,
        row.try_get("recorded_at").map_err(ser)?,
    ))
}
