use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use quiz_core::model::{Leaderboard, LeaderboardEntry, Question};
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::debug;

use crate::repository::{QuestionRepository, Storage, StorageError};

mod document;

use document::{LeaderboardDocument, SeriesDocument, StoredSeries, read_document, write_document};

pub const SERIES_FILE: &str = "series.json";
pub const LEADERBOARD_FILE: &str = "leaderboard.json";

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FileInitError {
    #[error("cannot prepare data directory {path}: {source}")]
    DataDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Flat-file backend: one JSON document for all series, one for the leaderboard.
///
/// Writes are serialized through a process-local lock and land atomically via
/// rename. The leaderboard document is kept ranked, so loading never re-sorts.
#[derive(Clone)]
pub struct FileRepository {
    dir: PathBuf,
    write_lock: Arc<Mutex<()>>,
}

impl FileRepository {
    /// Open (and create if needed) a data directory.
    ///
    /// # Errors
    ///
    /// Returns `FileInitError::DataDir` if the directory cannot be created.
    pub async fn open(dir: impl AsRef<Path>) -> Result<Self, FileInitError> {
        let dir = dir.as_ref().to_path_buf();
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|source| FileInitError::DataDir {
                path: dir.clone(),
                source,
            })?;
        Ok(Self {
            dir,
            write_lock: Arc::new(Mutex::new(())),
        })
    }

    fn series_path(&self) -> PathBuf {
        self.dir.join(SERIES_FILE)
    }

    fn leaderboard_path(&self) -> PathBuf {
        self.dir.join(LEADERBOARD_FILE)
    }
}

#[async_trait]
impl QuestionRepository for FileRepository {
    async fn save_series(&self, name: &str, questions: &[Question]) -> Result<(), StorageError> {
        let _guard = self.write_lock.lock().await;
        let path = self.series_path();
        let mut doc: SeriesDocument = read_document(&path).await?;
        if doc.find(name).is_some() {
            return Err(StorageError::Conflict);
        }
        doc.series.push(StoredSeries {
            name: name.to_owned(),
            questions: questions.to_vec(),
        });
        write_document(&path, &doc).await?;
        debug!(series = name, questions = questions.len(), "series written");
        Ok(())
    }

    async fn list_series_names(&self) -> Result<Vec<String>, StorageError> {
        let doc: SeriesDocument = read_document(&self.series_path()).await?;
        Ok(doc.series.into_iter().map(|s| s.name).collect())
    }

    async fn load_series(&self, name: &str) -> Result<Vec<Question>, StorageError> {
        let doc: SeriesDocument = read_document(&self.series_path()).await?;
        doc.series
            .into_iter()
            .find(|s| s.name == name)
            .map(|s| s.questions)
            .ok_or(StorageError::NotFound)
    }

    async fn append_score(&self, entry: &LeaderboardEntry) -> Result<(), StorageError> {
        let _guard = self.write_lock.lock().await;
        if let Some(series_name) = entry.series_name.as_deref() {
            let series: SeriesDocument = read_document(&self.series_path()).await?;
            if series.find(series_name).is_none() {
                return Err(StorageError::NotFound);
            }
        }

        let path = self.leaderboard_path();
        let doc: LeaderboardDocument = read_document(&path).await?;
        let board = Leaderboard::rank(doc.entries).record(entry.clone());
        write_document(
            &path,
            &LeaderboardDocument {
                entries: board.into_entries(),
            },
        )
        .await
    }

    async fn load_leaderboard(&self) -> Result<Vec<LeaderboardEntry>, StorageError> {
        let doc: LeaderboardDocument = read_document(&self.leaderboard_path()).await?;
        Ok(doc.entries)
    }
}

impl Storage {
    /// Build a `Storage` backed by JSON files in `dir`.
    ///
    /// # Errors
    ///
    /// Returns `FileInitError` if the data directory cannot be prepared.
    pub async fn file(dir: impl AsRef<Path>) -> Result<Self, FileInitError> {
        let repo = FileRepository::open(dir).await?;
        Ok(Self::from_repository(Arc::new(repo)))
    }
}
