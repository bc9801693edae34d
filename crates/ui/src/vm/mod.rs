mod author_vm;
mod leaderboard_vm;
mod quiz_vm;
mod time_fmt;

pub use author_vm::{AuthorStep, QuestionFormVm};
pub use leaderboard_vm::{LeaderboardRowVm, map_leaderboard_rows};
pub use quiz_vm::{FeedbackVm, QuestionVm, QuizVm, start_quiz};
