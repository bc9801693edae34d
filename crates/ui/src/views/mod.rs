mod author;
mod home;
mod leaderboard;
mod quiz;
mod select;
mod state;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use author::AuthorView;
pub use home::HomeView;
pub use leaderboard::LeaderboardView;
pub use quiz::QuizView;
pub use select::SelectView;
pub use state::{ViewError, ViewState, view_state_from_resource};
