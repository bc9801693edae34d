use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Every question offers exactly this many choices.
pub const CHOICE_COUNT: usize = 4;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

/// Reasons a question fails authoring validation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question text cannot be empty")]
    EmptyText,

    #[error("a question needs exactly {expected} choices, got {got}")]
    WrongChoiceCount { expected: usize, got: usize },

    #[error("choice {position} cannot be empty")]
    EmptyChoice { position: usize },

    #[error("correct choice index must be in 0..4, got {index}")]
    CorrectChoiceOutOfRange { index: usize },
}

//
// ─── VALIDATION ────────────────────────────────────────────────────────────────
//

/// Check the authoring rules for a single question.
///
/// Text must be non-blank, there must be exactly [`CHOICE_COUNT`] non-blank
/// choices and `correct_index` must point at one of them. Pure: callers decide
/// how to re-prompt.
///
/// # Errors
///
/// Returns the first `QuestionError` encountered, checking text, choice count,
/// each choice in order and finally the correct index.
///
/// # Examples
///
/// ```
/// # use quiz_core::model::{validate_question, QuestionError};
/// assert!(validate_question("Q?", &["a", "b", "c", "d"], 2).is_ok());
/// assert_eq!(
///     validate_question("Q?", &["a", "b", "c", ""], 2),
///     Err(QuestionError::EmptyChoice { position: 4 }),
/// );
/// ```
pub fn validate_question<S: AsRef<str>>(
    text: &str,
    choices: &[S],
    correct_index: usize,
) -> Result<(), QuestionError> {
    if text.trim().is_empty() {
        return Err(QuestionError::EmptyText);
    }
    if choices.len() != CHOICE_COUNT {
        return Err(QuestionError::WrongChoiceCount {
            expected: CHOICE_COUNT,
            got: choices.len(),
        });
    }
    if let Some(idx) = choices.iter().position(|c| c.as_ref().trim().is_empty()) {
        return Err(QuestionError::EmptyChoice { position: idx + 1 });
    }
    if correct_index >= CHOICE_COUNT {
        return Err(QuestionError::CorrectChoiceOutOfRange {
            index: correct_index,
        });
    }
    Ok(())
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

/// A validated multiple-choice question.
///
/// Immutable once built. Deserialization goes through the same validation as
/// [`Question::new`], so a persisted question can never break the invariants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "QuestionParts", into = "QuestionParts")]
pub struct Question {
    text: String,
    choices: [String; CHOICE_COUNT],
    correct_choice: usize,
}

impl Question {
    /// Build a question from authoring input.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` if the input fails [`validate_question`].
    pub fn new<T, I, C>(text: T, choices: I, correct_choice: usize) -> Result<Self, QuestionError>
    where
        T: Into<String>,
        I: IntoIterator<Item = C>,
        C: Into<String>,
    {
        let text = text.into();
        let choices: Vec<String> = choices.into_iter().map(Into::into).collect();
        validate_question(&text, &choices, correct_choice)?;

        let got = choices.len();
        let choices: [String; CHOICE_COUNT] = choices
            .try_into()
            .map_err(|_| QuestionError::WrongChoiceCount {
                expected: CHOICE_COUNT,
                got,
            })?;

        Ok(Self {
            text,
            choices,
            correct_choice,
        })
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn choices(&self) -> &[String; CHOICE_COUNT] {
        &self.choices
    }

    #[must_use]
    pub fn choice(&self, index: usize) -> Option<&str> {
        self.choices.get(index).map(String::as_str)
    }

    #[must_use]
    pub fn correct_choice(&self) -> usize {
        self.correct_choice
    }

    #[must_use]
    pub fn correct_choice_text(&self) -> &str {
        &self.choices[self.correct_choice]
    }

    #[must_use]
    pub fn is_correct(&self, choice: usize) -> bool {
        self.correct_choice == choice
    }
}

/// Wire shape used by serde; converted through validation.
#[derive(Serialize, Deserialize)]
struct QuestionParts {
    text: String,
    choices: Vec<String>,
    correct_choice: usize,
}

impl TryFrom<QuestionParts> for Question {
    type Error = QuestionError;

    fn try_from(parts: QuestionParts) -> Result<Self, Self::Error> {
        Question::new(parts.text, parts.choices, parts.correct_choice)
    }
}

impl From<Question> for QuestionParts {
    fn from(q: Question) -> Self {
        Self {
            text: q.text,
            choices: q.choices.into(),
            correct_choice: q.correct_choice,
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
