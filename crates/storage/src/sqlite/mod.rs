use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use quiz_core::model::{LeaderboardEntry, Question};
use sqlx::{SqlitePool, sqlite::SqlitePoolOptions};
use thiserror::Error;
use tracing::debug;

use crate::repository::{QuestionRepository, Storage, StorageError};

mod mapping;
mod migrate;
mod score_repo;
mod series_repo;

#[derive(Clone)]
pub struct SqliteRepository {
    pool: SqlitePool,
}

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SqliteInitError {
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

impl SqliteRepository {
    /// Connect to `SQLite` using the given URL.
    ///
    /// # Errors
    ///
    /// Returns `SqliteInitError` if the connection cannot be established or if
    /// enforcing foreign key constraints fails during setup.
    pub async fn connect(database_url: &str) -> Result<Self, SqliteInitError> {
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(5))
            .after_connect(|conn, _meta| {
                Box::pin(async move {
                    sqlx::query("PRAGMA foreign_keys = ON;")
                        .execute(&mut *conn)
                        .await?;
                    sqlx::query("PRAGMA journal_mode = WAL;")
                        .execute(&mut *conn)
                        .await?;
                    sqlx::query("PRAGMA busy_timeout = 5000;")
                        .execute(&mut *conn)
                        .await?;
                    Ok(())
                })
            })
            .connect(database_url)
            .await?;
        debug!(url = database_url, "sqlite pool opened");
        Ok(Self { pool })
    }

    #[must_use]
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Create tables if they do not exist.
    ///
    /// # Errors
    ///
    /// Returns `SqliteInitError` if migration queries fail.
    pub async fn migrate(&self) -> Result<(), SqliteInitError> {
        migrate::run_migrations(&self.pool).await
    }
}

#[async_trait]
impl QuestionRepository for SqliteRepository {
    async fn save_series(&self, name: &str, questions: &[Question]) -> Result<(), StorageError> {
        self.insert_series(name, questions).await
    }

    async fn list_series_names(&self) -> Result<Vec<String>, StorageError> {
        self.series_names().await
    }

    async fn load_series(&self, name: &str) -> Result<Vec<Question>, StorageError> {
        self.questions_for(name).await
    }

    async fn append_score(&self, entry: &LeaderboardEntry) -> Result<(), StorageError> {
        self.insert_score(entry).await
    }

    async fn load_leaderboard(&self) -> Result<Vec<LeaderboardEntry>, StorageError> {
        self.top_scores().await
    }

    async fn close(&self) {
        self.pool.close().await;
        debug!("sqlite pool closed");
    }
}

impl Storage {
    /// Build a `Storage` backed by `SQLite`.
    ///
    /// # Errors
    ///
    /// Returns `SqliteInitError` if connection or migrations cannot be
    /// completed.
    pub async fn sqlite(database_url: &str) -> Result<Self, SqliteInitError> {
        let repo = SqliteRepository::connect(database_url).await?;
        repo.migrate().await?;
        Ok(Self::from_repository(Arc::new(repo)))
    }
}
