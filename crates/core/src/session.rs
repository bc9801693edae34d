use thiserror::Error;

use crate::model::{Question, QuestionSeries};

/// Seconds a question stays open before it times out.
pub const QUESTION_TIME_LIMIT_SECS: u32 = 15;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionError {
    #[error("series `{name}` has no questions")]
    EmptySeries { name: String },
}

//
// ─── STATES AND OUTCOMES ───────────────────────────────────────────────────────
//

/// Where a session currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    AwaitingAnswer { index: usize },
    Finished { score: u32, total: usize },
}

/// Feedback for a timely submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerFeedback {
    pub question_index: usize,
    pub chosen: usize,
    pub correct: bool,
    pub correct_choice: usize,
    pub correct_choice_text: String,
}

/// What a single clock tick did to the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    /// No question was accepting answers; nothing changed.
    Ignored,
    /// The current question is still open.
    Running { remaining_secs: u32 },
    /// The current question ran out of time and the session moved on.
    TimedOut {
        question_index: usize,
        correct_choice_text: String,
    },
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// One attempt at a question series.
///
/// Every question is resolved exactly once, either by a timely
/// [`submit`](Self::submit) or by the countdown reaching zero in
/// [`tick`](Self::tick). Both paths clear the accepting flag before moving
/// to the next question, so a late submission is silently ignored and can
/// never score.
///
/// # Examples
///
/// ```
/// # use quiz_core::model::{Question, QuestionSeries};
/// # use quiz_core::session::{QuizSession, SessionState};
/// let q = Question::new("2 + 2?", ["3", "4", "5", "22"], 1)?;
/// let series = QuestionSeries::new("Maths", vec![q])?;
///
/// let mut session = QuizSession::start(series)?;
/// let feedback = session.submit(1).expect("question is open");
/// assert!(feedback.correct);
/// assert_eq!(session.state(), SessionState::Finished { score: 1, total: 1 });
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct QuizSession {
    series: QuestionSeries,
    current: usize,
    score: u32,
    remaining_secs: u32,
    accepting: bool,
}

impl QuizSession {
    /// Begin a session on the first question with a full countdown.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::EmptySeries` if the series has no questions.
    pub fn start(series: QuestionSeries) -> Result<Self, SessionError> {
        if series.is_empty() {
            return Err(SessionError::EmptySeries {
                name: series.name().to_owned(),
            });
        }
        Ok(Self {
            series,
            current: 0,
            score: 0,
            remaining_secs: QUESTION_TIME_LIMIT_SECS,
            accepting: true,
        })
    }

    /// Count down one second on the open question.
    ///
    /// Reaching zero resolves the question without credit and advances.
    /// Calling this when no question is accepting answers is a no-op.
    pub fn tick(&mut self) -> TickOutcome {
        if !self.accepting || self.remaining_secs == 0 {
            return TickOutcome::Ignored;
        }
        let Some(question) = self.series.question(self.current) else {
            return TickOutcome::Ignored;
        };

        self.remaining_secs -= 1;
        if self.remaining_secs > 0 {
            return TickOutcome::Running {
                remaining_secs: self.remaining_secs,
            };
        }

        let outcome = TickOutcome::TimedOut {
            question_index: self.current,
            correct_choice_text: question.correct_choice_text().to_owned(),
        };
        self.accepting = false;
        self.advance();
        outcome
    }

    /// Answer the open question.
    ///
    /// Returns `None` without touching the score when no question is
    /// accepting answers. An index outside the choices counts as wrong.
    pub fn submit(&mut self, choice: usize) -> Option<AnswerFeedback> {
        if !self.accepting {
            return None;
        }
        let question = self.series.question(self.current)?;

        self.accepting = false;
        let correct = question.is_correct(choice);
        let feedback = AnswerFeedback {
            question_index: self.current,
            chosen: choice,
            correct,
            correct_choice: question.correct_choice(),
            correct_choice_text: question.correct_choice_text().to_owned(),
        };
        if correct {
            self.score += 1;
        }
        self.advance();
        Some(feedback)
    }

    fn advance(&mut self) {
        self.current += 1;
        if self.current < self.series.len() {
            self.remaining_secs = QUESTION_TIME_LIMIT_SECS;
            self.accepting = true;
        } else {
            self.remaining_secs = 0;
            self.accepting = false;
        }
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        if self.current < self.series.len() {
            SessionState::AwaitingAnswer {
                index: self.current,
            }
        } else {
            SessionState::Finished {
                score: self.score,
                total: self.series.len(),
            }
        }
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        matches!(self.state(), SessionState::Finished { .. })
    }

    /// `(score, total_questions)` once finished.
    #[must_use]
    pub fn final_score(&self) -> Option<(u32, usize)> {
        match self.state() {
            SessionState::Finished { score, total } => Some((score, total)),
            SessionState::AwaitingAnswer { .. } => None,
        }
    }

    #[must_use]
    pub fn series(&self) -> &QuestionSeries {
        &self.series
    }

    #[must_use]
    pub fn series_name(&self) -> &str {
        self.series.name()
    }

    #[must_use]
    pub fn current_index(&self) -> Option<usize> {
        (self.current < self.series.len()).then_some(self.current)
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        self.series.question(self.current)
    }

    #[must_use]
    pub fn total_questions(&self) -> usize {
        self.series.len()
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    #[must_use]
    pub fn is_accepting(&self) -> bool {
        self.accepting
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
