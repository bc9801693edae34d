//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::SessionError;
use quiz_core::model::{QuestionError, SeriesError};
use storage::{StorageError, StorageInitError};

/// Errors emitted by `SeriesService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SeriesServiceError {
    #[error(transparent)]
    Series(#[from] SeriesError),
    #[error(transparent)]
    Question(#[from] QuestionError),
    #[error("a series named `{0}` already exists")]
    DuplicateName(String),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `LeaderboardService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LeaderboardServiceError {
    #[error("series `{0}` does not exist")]
    UnknownSeries(String),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted while starting or finishing a quiz.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizError {
    #[error("series `{0}` was not found")]
    SeriesNotFound(String),
    #[error("quiz is still in progress")]
    NotFinished,
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error(transparent)]
    Series(#[from] SeriesError),
    #[error(transparent)]
    Leaderboard(#[from] LeaderboardServiceError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    StorageInit(#[from] StorageInitError),
    #[error(transparent)]
    Series(#[from] SeriesServiceError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}
