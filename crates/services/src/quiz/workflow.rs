use std::sync::Arc;
use std::time::Duration;

use quiz_core::model::QuestionSeries;
use quiz_core::{Clock, QuizSession};
use storage::{QuestionRepository, StorageError};
use tracing::info;

use super::run::{QuizResult, QuizRun};
use crate::error::QuizError;
use crate::leaderboard_service::{LeaderboardService, RecordedScore};

/// Starts quiz runs and records their results.
#[derive(Clone)]
pub struct QuizLoopService {
    questions: Arc<dyn QuestionRepository>,
    leaderboard: LeaderboardService,
    tick_period: Duration,
}

impl QuizLoopService {
    #[must_use]
    pub fn new(clock: Clock, questions: Arc<dyn QuestionRepository>) -> Self {
        Self {
            leaderboard: LeaderboardService::new(clock, Arc::clone(&questions)),
            questions,
            tick_period: Duration::from_secs(1),
        }
    }

    /// Override the countdown period (one tick removes one second of the
    /// question's time budget).
    #[must_use]
    pub fn with_tick_period(mut self, tick_period: Duration) -> Self {
        self.tick_period = tick_period;
        self
    }

    /// Load `series_name` and start a run with a live countdown.
    ///
    /// Must be called from within a tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::SeriesNotFound` if no such series exists,
    /// `QuizError::Session` if it has no questions, or `QuizError::Storage`.
    pub async fn start_quiz(&self, series_name: &str) -> Result<QuizRun, QuizError> {
        let session = self.start_session(series_name).await?;
        info!(series = series_name, questions = session.total_questions(), "quiz started");
        Ok(QuizRun::with_countdown(session, self.tick_period))
    }

    /// Like [`start_quiz`](Self::start_quiz) but without a background timer.
    ///
    /// # Errors
    ///
    /// Same as [`start_quiz`](Self::start_quiz).
    pub async fn start_manual_quiz(&self, series_name: &str) -> Result<QuizRun, QuizError> {
        Ok(QuizRun::manual(self.start_session(series_name).await?))
    }

    /// Record a finished run under `username` and return the refreshed board.
    ///
    /// Yields `Ok(None)` for a blank username.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::NotFinished` if the run still has open questions,
    /// or `QuizError::Leaderboard` if recording fails.
    pub async fn record_score(
        &self,
        run: &QuizRun,
        username: &str,
    ) -> Result<Option<RecordedScore>, QuizError> {
        let result = run.result().ok_or(QuizError::NotFinished)?;
        self.record_result(&result, username).await
    }

    /// Record an already extracted result.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Leaderboard` if recording fails.
    pub async fn record_result(
        &self,
        result: &QuizResult,
        username: &str,
    ) -> Result<Option<RecordedScore>, QuizError> {
        Ok(self
            .leaderboard
            .record_score(username, result.score, Some(&result.series_name))
            .await?)
    }

    async fn start_session(&self, series_name: &str) -> Result<QuizSession, QuizError> {
        let questions = match self.questions.load_series(series_name).await {
            Ok(questions) => questions,
            Err(StorageError::NotFound) => {
                return Err(QuizError::SeriesNotFound(series_name.to_owned()));
            }
            Err(err) => return Err(err.into()),
        };
        let series = QuestionSeries::new(series_name, questions)?;
        Ok(QuizSession::start(series)?)
    }
}
