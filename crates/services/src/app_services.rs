use std::sync::Arc;

use quiz_core::model::{Question, QuestionError};
use storage::{Storage, StorageBackend};
use tracing::info;

use crate::Clock;
use crate::error::{AppServicesError, SeriesServiceError};
use crate::leaderboard_service::LeaderboardService;
use crate::quiz::QuizLoopService;
use crate::series_service::SeriesService;

/// Name of the series written by [`AppServices::ensure_sample_series`].
pub const SAMPLE_SERIES_NAME: &str = "General Knowledge";

/// Assembles app-facing services over one storage backend.
#[derive(Clone)]
pub struct AppServices {
    storage: Storage,
    series: Arc<SeriesService>,
    quiz_loop: Arc<QuizLoopService>,
    leaderboard: Arc<LeaderboardService>,
}

impl AppServices {
    /// Open `backend` and build services on top of it.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError::StorageInit` if the backend cannot be opened.
    pub async fn open(backend: &StorageBackend, clock: Clock) -> Result<Self, AppServicesError> {
        let storage = Storage::open(backend).await?;
        Ok(Self::from_storage(storage, clock))
    }

    #[must_use]
    pub fn from_storage(storage: Storage, clock: Clock) -> Self {
        let series = Arc::new(SeriesService::new(Arc::clone(&storage.questions)));
        let quiz_loop = Arc::new(QuizLoopService::new(clock, Arc::clone(&storage.questions)));
        let leaderboard = Arc::new(LeaderboardService::new(
            clock,
            Arc::clone(&storage.questions),
        ));
        Self {
            storage,
            series,
            quiz_loop,
            leaderboard,
        }
    }

    #[must_use]
    pub fn in_memory(clock: Clock) -> Self {
        Self::from_storage(Storage::in_memory(), clock)
    }

    #[must_use]
    pub fn series(&self) -> Arc<SeriesService> {
        Arc::clone(&self.series)
    }

    #[must_use]
    pub fn quiz_loop(&self) -> Arc<QuizLoopService> {
        Arc::clone(&self.quiz_loop)
    }

    #[must_use]
    pub fn leaderboard(&self) -> Arc<LeaderboardService> {
        Arc::clone(&self.leaderboard)
    }

    /// Write the bundled sample series unless one with that name exists.
    /// Returns whether it was written.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if the lookup or save fails.
    pub async fn ensure_sample_series(&self) -> Result<bool, AppServicesError> {
        let names = self.series.list_series_names().await?;
        if names.iter().any(|name| name == SAMPLE_SERIES_NAME) {
            return Ok(false);
        }
        let questions = sample_questions().map_err(SeriesServiceError::from)?;
        self.series.save_series(SAMPLE_SERIES_NAME, &questions).await?;
        info!(series = SAMPLE_SERIES_NAME, "sample series written");
        Ok(true)
    }

    /// Release the storage backend.
    pub async fn close(&self) {
        self.storage.close().await;
    }
}

fn sample_questions() -> Result<Vec<Question>, QuestionError> {
    Ok(vec![
        Question::new(
            "What is the capital of France?",
            ["Berlin", "Paris", "Madrid", "Rome"],
            1,
        )?,
        Question::new(
            "How many continents are there?",
            ["Five", "Six", "Seven", "Eight"],
            2,
        )?,
        Question::new(
            "Which planet is closest to the sun?",
            ["Mercury", "Venus", "Earth", "Mars"],
            0,
        )?,
        Question::new(
            "What is the chemical symbol for gold?",
            ["Ag", "Gd", "Go", "Au"],
            3,
        )?,
    ])
}
