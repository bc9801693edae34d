mod countdown;
mod run;
mod workflow;

pub use countdown::{Countdown, Tick, TickReceiver};
pub use run::{QuizResult, QuizRun};
pub use workflow::QuizLoopService;
