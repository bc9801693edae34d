use std::sync::Arc;

use quiz_core::Clock;
use quiz_core::model::{Leaderboard, LeaderboardEntry};
use storage::{QuestionRepository, StorageError};
use tracing::{info, warn};

use crate::error::LeaderboardServiceError;

/// A stored score together with the board it landed on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedScore {
    pub entry: LeaderboardEntry,
    /// 1-based position, `None` if the score did not make the board.
    pub rank: Option<usize>,
    pub leaderboard: Leaderboard,
}

/// Reads and appends leaderboard results.
#[derive(Clone)]
pub struct LeaderboardService {
    clock: Clock,
    questions: Arc<dyn QuestionRepository>,
}

impl LeaderboardService {
    #[must_use]
    pub fn new(clock: Clock, questions: Arc<dyn QuestionRepository>) -> Self {
        Self { clock, questions }
    }

    /// Current top scores.
    ///
    /// # Errors
    ///
    /// Returns `LeaderboardServiceError::Storage` if the backend cannot be read.
    pub async fn leaderboard(&self) -> Result<Leaderboard, LeaderboardServiceError> {
        let entries = self.questions.load_leaderboard().await?;
        // Backends already rank; re-ranking keeps the invariant local.
        Ok(Leaderboard::rank(entries))
    }

    /// Append a result stamped with the service clock.
    ///
    /// A blank username is not recorded and yields `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns `LeaderboardServiceError::UnknownSeries` if `series_name`
    /// names no stored series, or `LeaderboardServiceError::Storage`.
    pub async fn record_score(
        &self,
        username: &str,
        score: u32,
        series_name: Option<&str>,
    ) -> Result<Option<RecordedScore>, LeaderboardServiceError> {
        let username = username.trim();
        if username.is_empty() {
            warn!(score, "blank username, score not recorded");
            return Ok(None);
        }

        let entry = LeaderboardEntry::new(
            username,
            score,
            series_name.map(str::to_owned),
            self.clock.now(),
        );
        match self.questions.append_score(&entry).await {
            Ok(()) => {}
            Err(StorageError::NotFound) => {
                return Err(LeaderboardServiceError::UnknownSeries(
                    series_name.unwrap_or_default().to_owned(),
                ));
            }
            Err(err) => return Err(err.into()),
        }

        let leaderboard = self.leaderboard().await?;
        let rank = leaderboard.position_of(&entry);
        info!(username, score, rank = ?rank, "score recorded");
        Ok(Some(RecordedScore {
            entry,
            rank,
            leaderboard,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use quiz_core::model::Question;
    use quiz_core::time::fixed_now;
    use storage::InMemoryRepository;

    struct UnreachableStore;

    #[async_trait::async_trait]
    impl QuestionRepository for UnreachableStore {
        async fn save_series(&self, _name: &str, _questions: &[Question]) -> Result<(), StorageError> {
            Err(StorageError::Connection("offline".to_string()))
        }

        async fn list_series_names(&self) -> Result<Vec<String>, StorageError> {
            Err(StorageError::Connection("offline".to_string()))
        }

        async fn load_series(&self, _name: &str) -> Result<Vec<Question>, StorageError> {
            Err(StorageError::Connection("offline".to_string()))
        }

        async fn append_score(&self, _entry: &LeaderboardEntry) -> Result<(), StorageError> {
            Err(StorageError::Connection("offline".to_string()))
        }

        async fn load_leaderboard(&self) -> Result<Vec<LeaderboardEntry>, StorageError> {
            Err(StorageError::Connection("offline".to_string()))
        }
    }

    fn service() -> (LeaderboardService, Arc<InMemoryRepository>) {
        let repo = Arc::new(InMemoryRepository::new());
        let service = LeaderboardService::new(Clock::fixed(fixed_now()), repo.clone());
        (service, repo)
    }

    #[tokio::test]
    async fn recorded_scores_are_ranked() {
        let (service, _) = service();
        for (name, score) in [("a", 5), ("b", 9), ("c", 9), ("d", 3)] {
            service.record_score(name, score, None).await.unwrap();
        }

        let board = service.leaderboard().await.unwrap();
        let names: Vec<_> = board.entries().iter().map(|e| e.username.as_str()).collect();
        assert_eq!(names, ["b", "c", "a", "d"]);
    }

    #[tokio::test]
    async fn record_reports_rank_and_timestamp() {
        let (service, _) = service();
        service.record_score("first", 7, None).await.unwrap();
        let recorded = service
            .record_score("  second ", 8, None)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(recorded.entry.username, "second");
        assert_eq!(recorded.entry.recorded_at, fixed_now());
        assert_eq!(recorded.rank, Some(1));
        assert_eq!(recorded.leaderboard.len(), 2);
    }

    #[tokio::test]
    async fn blank_username_is_skipped() {
        let (service, _) = service();
        assert!(service.record_score("   ", 4, None).await.unwrap().is_none());
        assert!(service.leaderboard().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn low_score_misses_a_full_board() {
        let (service, _) = service();
        for i in 0..10 {
            service.record_score(&format!("p{i}"), 5, None).await.unwrap();
        }
        let recorded = service.record_score("late", 1, None).await.unwrap().unwrap();
        assert_eq!(recorded.rank, None);
        assert_eq!(recorded.leaderboard.len(), 10);
    }

    #[tokio::test]
    async fn unknown_series_is_rejected() {
        let (service, repo) = service();
        let q = Question::new("Q?", ["a", "b", "c", "d"], 0).unwrap();
        repo.save_series("Known", &[q]).await.unwrap();

        service.record_score("ann", 1, Some("Known")).await.unwrap();
        let err = service
            .record_score("bob", 1, Some("Missing"))
            .await
            .unwrap_err();
        assert!(matches!(err, LeaderboardServiceError::UnknownSeries(name) if name == "Missing"));
    }

    #[tokio::test]
    async fn repeated_identical_result_reports_its_own_rank() {
        let (service, _) = service();
        service.record_score("alice", 5, None).await.unwrap();
        service.record_score("bob", 5, None).await.unwrap();
        let recorded = service.record_score("alice", 5, None).await.unwrap().unwrap();
        assert_eq!(recorded.rank, Some(3));
    }

    #[tokio::test]
    async fn storage_failures_surface_as_storage_errors() {
        let service = LeaderboardService::new(Clock::fixed(fixed_now()), Arc::new(UnreachableStore));

        let err = service.record_score("ann", 3, None).await.unwrap_err();
        assert!(matches!(err, LeaderboardServiceError::Storage(StorageError::Connection(_))));

        let err = service.leaderboard().await.unwrap_err();
        assert!(matches!(err, LeaderboardServiceError::Storage(_)));
    }
}
