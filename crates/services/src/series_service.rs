use std::sync::Arc;

use quiz_core::model::{Question, QuestionSeries, SeriesDraft, validate_series_name};
use storage::{QuestionRepository, StorageError};
use tracing::{debug, info};

use crate::error::SeriesServiceError;

/// Orchestrates series authoring and lookup.
#[derive(Clone)]
pub struct SeriesService {
    questions: Arc<dyn QuestionRepository>,
}

impl SeriesService {
    #[must_use]
    pub fn new(questions: Arc<dyn QuestionRepository>) -> Self {
        Self { questions }
    }

    /// Open an authoring draft, rejecting names that are blank or taken.
    ///
    /// # Errors
    ///
    /// Returns `SeriesServiceError::Series` for a blank name,
    /// `SeriesServiceError::DuplicateName` if a series already uses it, or
    /// `SeriesServiceError::Storage` if the lookup fails.
    pub async fn begin_draft(&self, name: &str) -> Result<SeriesDraft, SeriesServiceError> {
        let draft = SeriesDraft::new(name)?;
        if self.exists(draft.name()).await? {
            return Err(SeriesServiceError::DuplicateName(draft.name().to_owned()));
        }
        Ok(draft)
    }

    /// Persist a finished draft.
    ///
    /// # Errors
    ///
    /// Returns `SeriesServiceError::Series` if the draft has no questions,
    /// `SeriesServiceError::DuplicateName` if the name was taken meanwhile, or
    /// `SeriesServiceError::Storage` if persistence fails.
    pub async fn save_draft(&self, draft: SeriesDraft) -> Result<QuestionSeries, SeriesServiceError> {
        let series = draft.finish()?;
        self.save_series(series.name(), series.questions()).await?;
        Ok(series)
    }

    /// Persist a series given as a name and validated questions.
    ///
    /// # Errors
    ///
    /// Returns `SeriesServiceError::Series` for a blank name or an empty list,
    /// `SeriesServiceError::DuplicateName` on a name clash, or
    /// `SeriesServiceError::Storage` if persistence fails.
    pub async fn save_series(
        &self,
        name: &str,
        questions: &[Question],
    ) -> Result<(), SeriesServiceError> {
        let name = validate_series_name(name)?;
        if questions.is_empty() {
            return Err(quiz_core::model::SeriesError::NoQuestions { name }.into());
        }
        match self.questions.save_series(&name, questions).await {
            Ok(()) => {
                info!(series = %name, questions = questions.len(), "series saved");
                Ok(())
            }
            Err(StorageError::Conflict) => Err(SeriesServiceError::DuplicateName(name)),
            Err(err) => Err(err.into()),
        }
    }

    /// # Errors
    ///
    /// Returns `SeriesServiceError::Storage` if repository access fails.
    pub async fn list_series_names(&self) -> Result<Vec<String>, SeriesServiceError> {
        Ok(self.questions.list_series_names().await?)
    }

    /// Load a stored series. The result may be empty if the backend holds a
    /// series row without questions.
    ///
    /// # Errors
    ///
    /// Returns `SeriesServiceError::Storage` (`NotFound` when absent).
    pub async fn load_series(&self, name: &str) -> Result<QuestionSeries, SeriesServiceError> {
        let questions = self.questions.load_series(name).await?;
        debug!(series = name, questions = questions.len(), "series loaded");
        Ok(QuestionSeries::new(name, questions)?)
    }

    async fn exists(&self, name: &str) -> Result<bool, SeriesServiceError> {
        let names = self.questions.list_series_names().await?;
        Ok(names.iter().any(|n| n == name))
    }
}
