#![forbid(unsafe_code)]

pub mod model;
pub mod session;
pub mod time;

pub use session::{
    AnswerFeedback, QUESTION_TIME_LIMIT_SECS, QuizSession, SessionError, SessionState, TickOutcome,
};
pub use time::Clock;
