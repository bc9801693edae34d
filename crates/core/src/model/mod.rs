mod leaderboard;
mod question;
mod series;

pub use leaderboard::{LEADERBOARD_CAPACITY, Leaderboard, LeaderboardEntry, record};
pub use question::{CHOICE_COUNT, Question, QuestionError, validate_question};
pub use series::{QuestionSeries, SeriesDraft, SeriesError, validate_series_name};
