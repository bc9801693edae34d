use std::fmt;
use std::path::PathBuf;

use thiserror::Error;
use tracing::info;

use crate::file::FileInitError;
use crate::repository::Storage;
use crate::sqlite::SqliteInitError;

/// Which backend to open at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageBackend {
    /// JSON documents in a data directory.
    File { dir: PathBuf },
    /// A `SQLite` database URL.
    Sqlite { url: String },
}

impl fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageBackend::File { dir } => write!(f, "file:{}", dir.display()),
            StorageBackend::Sqlite { url } => write!(f, "{url}"),
        }
    }
}

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageInitError {
    #[error(transparent)]
    File(#[from] FileInitError),
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
}

impl Storage {
    /// Open the selected backend.
    ///
    /// # Errors
    ///
    /// Returns `StorageInitError` if the backend cannot be prepared.
    pub async fn open(backend: &StorageBackend) -> Result<Self, StorageInitError> {
        let storage = match backend {
            StorageBackend::File { dir } => Self::file(dir).await?,
            StorageBackend::Sqlite { url } => Self::sqlite(url).await?,
        };
        info!(%backend, "storage opened");
        Ok(storage)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn opens_file_backend_in_fresh_directory() {
        let dir = tempfile::tempdir().unwrap();
        let data_dir = dir.path().join("nested").join("data");
        let storage = Storage::open(&StorageBackend::File {
            dir: data_dir.clone(),
        })
        .await
        .unwrap();

        assert!(data_dir.is_dir());
        assert!(storage.questions.list_series_names().await.unwrap().is_empty());
        storage.close().await;
    }

    #[test]
    fn backend_display_names_location() {
        let sqlite = StorageBackend::Sqlite {
            url: "sqlite::memory:".into(),
        };
        assert_eq!(sqlite.to_string(), "sqlite::memory:");
    }
}
