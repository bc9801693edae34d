use thiserror::Error;

use crate::model::question::{Question, QuestionError};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SeriesError {
    #[error("series name cannot be empty")]
    EmptyName,

    #[error("series `{name}` needs at least one question")]
    NoQuestions { name: String },
}

/// Normalize and check a series name.
///
/// # Errors
///
/// Returns `SeriesError::EmptyName` for blank input.
pub fn validate_series_name(name: &str) -> Result<String, SeriesError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(SeriesError::EmptyName);
    }
    Ok(trimmed.to_owned())
}

//
// ─── SERIES ────────────────────────────────────────────────────────────────────
//

/// A named, ordered set of questions.
///
/// Question order is presentation order. A series read back from storage may
/// legitimately be empty; starting a quiz on it is what fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionSeries {
    name: String,
    questions: Vec<Question>,
}

impl QuestionSeries {
    /// # Errors
    ///
    /// Returns `SeriesError::EmptyName` if the name is blank.
    pub fn new(name: impl AsRef<str>, questions: Vec<Question>) -> Result<Self, SeriesError> {
        let name = validate_series_name(name.as_ref())?;
        Ok(Self { name, questions })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn question(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

//
// ─── AUTHORING DRAFT ───────────────────────────────────────────────────────────
//

/// A series being authored one question at a time.
///
/// Only validated questions ever enter the draft, so a rejected question
/// leaves the previous ones untouched and the author can simply try again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeriesDraft {
    name: String,
    questions: Vec<Question>,
}

impl SeriesDraft {
    /// # Errors
    ///
    /// Returns `SeriesError::EmptyName` if the name is blank.
    pub fn new(name: impl AsRef<str>) -> Result<Self, SeriesError> {
        Ok(Self {
            name: validate_series_name(name.as_ref())?,
            questions: Vec::new(),
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Validate and append a question.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` when the input is rejected; the draft is unchanged.
    pub fn add_question<S: AsRef<str>>(
        &mut self,
        text: &str,
        choices: &[S],
        correct_index: usize,
    ) -> Result<&Question, QuestionError> {
        let question = Question::new(
            text,
            choices.iter().map(|c| c.as_ref().to_owned()),
            correct_index,
        )?;
        self.questions.push(question);
        Ok(&self.questions[self.questions.len() - 1])
    }

    /// Close the draft into a saveable series.
    ///
    /// # Errors
    ///
    /// Returns `SeriesError::NoQuestions` if nothing was added.
    pub fn finish(self) -> Result<QuestionSeries, SeriesError> {
        if self.questions.is_empty() {
            return Err(SeriesError::NoQuestions { name: self.name });
        }
        Ok(QuestionSeries {
            name: self.name,
            questions: self.questions,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn series_name_is_trimmed() {
        let series = QuestionSeries::new("  Rust basics ", Vec::new()).unwrap();
        assert_eq!(series.name(), "Rust basics");
        assert!(series.is_empty());
    }

    #[test]
    fn blank_series_name_is_rejected() {
        assert_eq!(SeriesDraft::new("  ").unwrap_err(), SeriesError::EmptyName);
    }

    #[test]
    fn draft_keeps_questions_after_rejected_input() {
        let mut draft = SeriesDraft::new("Capitals").unwrap();
        draft
            .add_question("France?", &["Paris", "Rome", "Oslo", "Bern"], 0)
            .unwrap();

        let err = draft
            .add_question("Italy?", &["Paris", "", "Oslo", "Bern"], 1)
            .unwrap_err();
        assert_eq!(err, QuestionError::EmptyChoice { position: 2 });
        assert_eq!(draft.len(), 1);

        draft
            .add_question("Italy?", &["Paris", "Rome", "Oslo", "Bern"], 1)
            .unwrap();
        let series = draft.finish().unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series.questions()[1].text(), "Italy?");
    }

    #[test]
    fn empty_draft_cannot_finish() {
        let draft = SeriesDraft::new("Nothing").unwrap();
        assert_eq!(
            draft.finish().unwrap_err(),
            SeriesError::NoQuestions {
                name: "Nothing".into()
            }
        );
    }
}
