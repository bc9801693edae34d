use quiz_core::TickOutcome;
use services::{QuizLoopService, QuizResult, QuizRun, Tick, TickReceiver};

use crate::views::ViewError;

/// Notice shown after a question resolves.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FeedbackVm {
    Correct,
    Wrong { correct_answer: String },
    TimedOut { correct_answer: String },
}

impl FeedbackVm {
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            FeedbackVm::Correct => "Correct!".to_string(),
            FeedbackVm::Wrong { correct_answer } => {
                format!("Wrong! The correct answer was: {correct_answer}")
            }
            FeedbackVm::TimedOut { correct_answer } => {
                format!("Time's up! The correct answer was: {correct_answer}")
            }
        }
    }

    #[must_use]
    pub fn is_correct(&self) -> bool {
        matches!(self, FeedbackVm::Correct)
    }
}

/// What the quiz screen renders for the open question.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuestionVm {
    /// 1-based.
    pub number: usize,
    pub total: usize,
    pub text: String,
    pub choices: Vec<String>,
    pub remaining_secs: u32,
    pub score: u32,
}

pub struct QuizVm {
    run: QuizRun,
    feedback: Option<FeedbackVm>,
}

impl QuizVm {
    #[must_use]
    pub fn new(run: QuizRun) -> Self {
        Self {
            run,
            feedback: None,
        }
    }

    #[must_use]
    pub fn question(&self) -> Option<QuestionVm> {
        let session = self.run.session();
        let index = session.current_index()?;
        let question = session.current_question()?;
        Some(QuestionVm {
            number: index + 1,
            total: session.total_questions(),
            text: question.text().to_string(),
            choices: question.choices().to_vec(),
            remaining_secs: session.remaining_secs(),
            score: session.score(),
        })
    }

    #[must_use]
    pub fn feedback(&self) -> Option<&FeedbackVm> {
        self.feedback.as_ref()
    }

    #[must_use]
    pub fn result(&self) -> Option<QuizResult> {
        self.run.result()
    }

    #[must_use]
    pub fn series_name(&self) -> &str {
        self.run.session().series_name()
    }

    pub fn choose(&mut self, choice: usize) {
        if let Some(feedback) = self.run.submit(choice) {
            self.feedback = Some(if feedback.correct {
                FeedbackVm::Correct
            } else {
                FeedbackVm::Wrong {
                    correct_answer: feedback.correct_choice_text,
                }
            });
        }
    }

    pub fn on_tick(&mut self, tick: Tick) {
        if let TickOutcome::TimedOut {
            correct_choice_text,
            ..
        } = self.run.on_tick(tick)
        {
            self.feedback = Some(FeedbackVm::TimedOut {
                correct_answer: correct_choice_text,
            });
        }
    }

    /// Take the tick receiver so the view can pump it.
    pub fn take_ticks(&mut self) -> Option<TickReceiver> {
        self.run.take_ticks()
    }

    pub fn abandon(&mut self) {
        self.run.abandon();
    }
}

/// # Errors
///
/// Returns `ViewError::NotFound` or `ViewError::EmptySeries` when the series
/// cannot be played, or `ViewError::Storage` for backend failures.
pub async fn start_quiz(quiz_loop: &QuizLoopService, series: &str) -> Result<QuizVm, ViewError> {
    quiz_loop
        .start_quiz(series)
        .await
        .map(QuizVm::new)
        .map_err(|err| ViewError::from_quiz(&err))
}
