use dioxus::prelude::*;
use services::{LeaderboardServiceError, QuizError, SeriesServiceError};
use storage::StorageError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewError {
    Unknown,
    NotFound,
    EmptySeries,
    Storage,
}

impl ViewError {
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            ViewError::Unknown => "Something went wrong. Please try again.",
            ViewError::NotFound => "That question series no longer exists.",
            ViewError::EmptySeries => "That question series has no questions yet.",
            ViewError::Storage => "Could not reach the question store. Please try again.",
        }
    }

    #[must_use]
    pub fn from_quiz(err: &QuizError) -> Self {
        match err {
            QuizError::SeriesNotFound(_) => ViewError::NotFound,
            QuizError::Session(_) => ViewError::EmptySeries,
            QuizError::Storage(err) => Self::from_storage(err),
            QuizError::Leaderboard(err) => Self::from_leaderboard(err),
            _ => ViewError::Unknown,
        }
    }

    #[must_use]
    pub fn from_series(err: &SeriesServiceError) -> Self {
        match err {
            SeriesServiceError::Storage(err) => Self::from_storage(err),
            _ => ViewError::Unknown,
        }
    }

    #[must_use]
    pub fn from_leaderboard(err: &LeaderboardServiceError) -> Self {
        match err {
            LeaderboardServiceError::UnknownSeries(_) => ViewError::NotFound,
            LeaderboardServiceError::Storage(err) => Self::from_storage(err),
            _ => ViewError::Unknown,
        }
    }

    fn from_storage(err: &StorageError) -> Self {
        match err {
            StorageError::NotFound => ViewError::NotFound,
            _ => ViewError::Storage,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ViewState<T> {
    Idle,
    Loading,
    Ready(T),
    Error(ViewError),
}

#[must_use]
pub fn view_state_from_resource<T: Clone>(
    resource: &Resource<Result<T, ViewError>>,
) -> ViewState<T> {
    match resource.state().cloned() {
        UseResourceState::Pending => ViewState::Loading,
        UseResourceState::Ready => match resource.value().read().as_ref() {
            Some(Ok(data)) => ViewState::Ready(data.clone()),
            Some(Err(err)) => ViewState::Error(*err),
            None => ViewState::Error(ViewError::Unknown),
        },
        UseResourceState::Paused | UseResourceState::Stopped => ViewState::Idle,
    }
}
