use quiz_core::model::{CHOICE_COUNT, SeriesDraft};

/// Input fields of the "add question" form.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QuestionFormVm {
    pub text: String,
    pub choices: [String; CHOICE_COUNT],
    pub correct: usize,
}

impl QuestionFormVm {
    /// Validate the form into `draft`. On success the form is cleared;
    /// on failure it is left untouched and the message is returned.
    ///
    /// # Errors
    ///
    /// Returns a user-facing message describing the first invalid field.
    pub fn add_to(&mut self, draft: &mut SeriesDraft) -> Result<(), String> {
        draft
            .add_question(&self.text, &self.choices, self.correct)
            .map_err(|err| err.to_string())?;
        *self = Self::default();
        Ok(())
    }
}

/// Progress of one authoring pass.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AuthorStep {
    Naming,
    Questions(SeriesDraft),
    Saved { name: String, questions: usize },
}

impl AuthorStep {
    #[must_use]
    pub fn question_count(&self) -> usize {
        match self {
            AuthorStep::Naming => 0,
            AuthorStep::Questions(draft) => draft.len(),
            AuthorStep::Saved { questions, .. } => *questions,
        }
    }
}
