use async_trait::async_trait;
use quiz_core::model::{Leaderboard, LeaderboardEntry, Question};
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("conflict")]
    Conflict,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

/// Repository contract for question series and the leaderboard.
///
/// Every backend returns the leaderboard already ranked and truncated.
#[async_trait]
pub trait QuestionRepository: Send + Sync {
    /// Persist a new series under a unique name.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Conflict` if the name is taken, or other storage errors.
    async fn save_series(&self, name: &str, questions: &[Question]) -> Result<(), StorageError>;

    /// Names of all stored series, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    async fn list_series_names(&self) -> Result<Vec<String>, StorageError>;

    /// Fetch the questions of a series in presentation order.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if no series has that name.
    async fn load_series(&self, name: &str) -> Result<Vec<Question>, StorageError>;

    /// Append one quiz result.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the entry names a series that does
    /// not exist, or other storage errors.
    async fn append_score(&self, entry: &LeaderboardEntry) -> Result<(), StorageError>;

    /// Top scores, highest first.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    async fn load_leaderboard(&self) -> Result<Vec<LeaderboardEntry>, StorageError>;

    /// Release any handles held by the backend.
    async fn close(&self) {}
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    series: Arc<Mutex<Vec<(String, Vec<Question>)>>>,
    scores: Arc<Mutex<Vec<LeaderboardEntry>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned<E: std::fmt::Display>(e: E) -> StorageError {
    StorageError::Connection(e.to_string())
}

#[async_trait]
impl QuestionRepository for InMemoryRepository {
    async fn save_series(&self, name: &str, questions: &[Question]) -> Result<(), StorageError> {
        let mut guard = self.series.lock().map_err(poisoned)?;
        if guard.iter().any(|(existing, _)| existing == name) {
            return Err(StorageError::Conflict);
        }
        guard.push((name.to_owned(), questions.to_vec()));
        Ok(())
    }

    async fn list_series_names(&self) -> Result<Vec<String>, StorageError> {
        let guard = self.series.lock().map_err(poisoned)?;
        Ok(guard.iter().map(|(name, _)| name.clone()).collect())
    }

    async fn load_series(&self, name: &str) -> Result<Vec<Question>, StorageError> {
        let guard = self.series.lock().map_err(poisoned)?;
        guard
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, questions)| questions.clone())
            .ok_or(StorageError::NotFound)
    }

    async fn append_score(&self, entry: &LeaderboardEntry) -> Result<(), StorageError> {
        if let Some(series_name) = entry.series_name.as_deref() {
            let guard = self.series.lock().map_err(poisoned)?;
            if !guard.iter().any(|(existing, _)| existing == series_name) {
                return Err(StorageError::NotFound);
            }
        }
        self.scores.lock().map_err(poisoned)?.push(entry.clone());
        Ok(())
    }

    async fn load_leaderboard(&self) -> Result<Vec<LeaderboardEntry>, StorageError> {
        let guard = self.scores.lock().map_err(poisoned)?;
        Ok(Leaderboard::rank(guard.clone()).into_entries())
    }
}

/// The repository selected at startup, behind a trait object for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub questions: Arc<dyn QuestionRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            questions: Arc::new(InMemoryRepository::new()),
        }
    }

    #[must_use]
    pub fn from_repository(questions: Arc<dyn QuestionRepository>) -> Self {
        Self { questions }
    }

    /// Release the backend's handles. Call once on shutdown.
    pub async fn close(&self) {
        self.questions.close().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::time::fixed_now;

    fn question(text: &str, correct: usize) -> Question {
        Question::new(text, ["a", "b", "c", "d"], correct).unwrap()
    }

    #[tokio::test]
    async fn round_trips_series_in_order() {
        let repo = InMemoryRepository::new();
        let questions = vec![question("Q1", 0), question("Q2", 3)];
        repo.save_series("First", &questions).await.unwrap();
        repo.save_series("Second", &questions[..1]).await.unwrap();

        assert_eq!(
            repo.list_series_names().await.unwrap(),
            vec!["First".to_string(), "Second".to_string()]
        );
        assert_eq!(repo.load_series("First").await.unwrap(), questions);
    }

    #[tokio::test]
    async fn duplicate_series_name_conflicts() {
        let repo = InMemoryRepository::new();
        repo.save_series("Dup", &[question("Q", 0)]).await.unwrap();
        let err = repo.save_series("Dup", &[question("Q", 1)]).await.unwrap_err();
        assert!(matches!(err, StorageError::Conflict));
    }

    #[tokio::test]
    async fn missing_series_is_not_found() {
        let repo = InMemoryRepository::new();
        assert!(matches!(
            repo.load_series("nope").await.unwrap_err(),
            StorageError::NotFound
        ));
        let entry = LeaderboardEntry::new("alice", 1, Some("nope".into()), fixed_now());
        assert!(matches!(
            repo.append_score(&entry).await.unwrap_err(),
            StorageError::NotFound
        ));
    }

    #[tokio::test]
    async fn leaderboard_is_ranked_on_load() {
        let repo = InMemoryRepository::new();
        for (name, score) in [("a", 5), ("b", 9), ("c", 9), ("d", 3)] {
            repo.append_score(&LeaderboardEntry::new(name, score, None, fixed_now()))
                .await
                .unwrap();
        }
        let names: Vec<_> = repo
            .load_leaderboard()
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.username)
            .collect();
        assert_eq!(names, ["b", "c", "a", "d"]);
    }
}
