use std::sync::Arc;

use services::{LeaderboardService, QuizLoopService, SeriesService};

/// Services the views need, supplied by the composition root (`crates/app`).
pub trait UiApp: Send + Sync {
    fn series_service(&self) -> Arc<SeriesService>;
    fn quiz_loop(&self) -> Arc<QuizLoopService>;
    fn leaderboard(&self) -> Arc<LeaderboardService>;
}

#[derive(Clone)]
pub struct AppContext {
    series_service: Arc<SeriesService>,
    quiz_loop: Arc<QuizLoopService>,
    leaderboard: Arc<LeaderboardService>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            series_service: app.series_service(),
            quiz_loop: app.quiz_loop(),
            leaderboard: app.leaderboard(),
        }
    }

    #[must_use]
    pub fn series_service(&self) -> Arc<SeriesService> {
        Arc::clone(&self.series_service)
    }

    #[must_use]
    pub fn quiz_loop(&self) -> Arc<QuizLoopService> {
        Arc::clone(&self.quiz_loop)
    }

    #[must_use]
    pub fn leaderboard(&self) -> Arc<LeaderboardService> {
        Arc::clone(&self.leaderboard)
    }
}

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
