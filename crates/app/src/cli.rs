use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use storage::StorageBackend;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid --db value: {raw}")]
    InvalidDbUrl { raw: String },
    #[error("cannot prepare database file {path}: {source}")]
    DbFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Parser, Debug)]
#[command(name = "quiz", version, about = "Desktop quiz application", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Where question series and scores are stored
    #[arg(long, env = "QUIZ_BACKEND", value_enum, default_value_t = BackendKind::File, global = true)]
    pub backend: BackendKind,

    /// Data directory for the file backend
    #[arg(long, env = "QUIZ_DATA_DIR", default_value = "quiz-data", global = true)]
    pub data_dir: PathBuf,

    /// Database URL or path for the sqlite backend
    #[arg(long = "db", env = "QUIZ_DB_URL", default_value = "sqlite://quiz.sqlite3", global = true)]
    pub db_url: String,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Open the quiz window (default)
    Ui,
    /// Write a sample question series if it is missing
    Seed,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    File,
    Sqlite,
}

impl Cli {
    #[must_use]
    pub fn command(&self) -> Command {
        self.command.unwrap_or(Command::Ui)
    }

    /// Resolve the storage backend, creating the `SQLite` file when needed.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` for an unusable database URL.
    pub fn storage_backend(&self) -> Result<StorageBackend, ConfigError> {
        match self.backend {
            BackendKind::File => Ok(StorageBackend::File {
                dir: self.data_dir.clone(),
            }),
            BackendKind::Sqlite => {
                if self.db_url.trim().is_empty() {
                    return Err(ConfigError::InvalidDbUrl {
                        raw: self.db_url.clone(),
                    });
                }
                let url = normalize_sqlite_url(&self.db_url);
                prepare_sqlite_file(&url)?;
                Ok(StorageBackend::Sqlite { url })
            }
        }
    }
}

/// Relative paths become absolute `sqlite://` URLs; URLs pass through.
#[must_use]
pub fn normalize_sqlite_url(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed == "sqlite::memory:" || trimmed.starts_with("sqlite://") {
        return trimmed.to_string();
    }

    let path_str = trimmed.strip_prefix("sqlite:").unwrap_or(trimmed);
    let path = Path::new(path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}

/// Make sure the database file and its parent directories exist.
///
/// # Errors
///
/// Returns `ConfigError` if the URL has no path or the file cannot be created.
pub fn prepare_sqlite_file(db_url: &str) -> Result<(), ConfigError> {
    if db_url == "sqlite::memory:" {
        return Ok(());
    }

    let invalid = || ConfigError::InvalidDbUrl {
        raw: db_url.to_string(),
    };
    let path = db_url.strip_prefix("sqlite://").ok_or_else(invalid)?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        return Err(invalid());
    }

    let path = Path::new(path);
    let io_err = |source| ConfigError::DbFile {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(io_err)?;
    }
    if !path.exists() {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)
            .map_err(io_err)?;
    }
    Ok(())
}
