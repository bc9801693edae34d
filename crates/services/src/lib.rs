#![forbid(unsafe_code)]

pub mod app_services;
pub mod error;
pub mod leaderboard_service;
pub mod quiz;
pub mod series_service;

pub use quiz_core::Clock;

pub use app_services::{AppServices, SAMPLE_SERIES_NAME};
pub use error::{AppServicesError, LeaderboardServiceError, QuizError, SeriesServiceError};
pub use leaderboard_service::{LeaderboardService, RecordedScore};
pub use quiz::{Countdown, QuizLoopService, QuizResult, QuizRun, Tick, TickReceiver};
pub use series_service::SeriesService;
