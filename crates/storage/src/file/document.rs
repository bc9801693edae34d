use std::io::ErrorKind;
use std::path::Path;

use quiz_core::model::{LeaderboardEntry, Question};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::repository::StorageError;

fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

/// Persisted shape of `series.json`.
#[derive(Debug, Default, Serialize, Deserialize)]
pub(super) struct SeriesDocument {
    pub series: Vec<StoredSeries>,
}

#[derive(Debug, Serialize, Deserialize)]
pub(super) struct StoredSeries {
    pub name: String,
    pub questions: Vec<Question>,
}

impl SeriesDocument {
    pub fn find(&self, name: &str) -> Option<&StoredSeries> {
        self.series.iter().find(|s| s.name == name)
    }
}

/// Persisted shape of `leaderboard.json`: already ranked and truncated.
#[derive(Debug, Default, Serialize, Deserialize)]
pub(super) struct LeaderboardDocument {
    pub entries: Vec<LeaderboardEntry>,
}

/// Read a JSON document, treating a missing file as empty.
pub(super) async fn read_document<T>(path: &Path) -> Result<T, StorageError>
where
    T: DeserializeOwned + Default,
{
    match tokio::fs::read(path).await {
        Ok(bytes) => serde_json::from_slice(&bytes).map_err(ser),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(T::default()),
        Err(e) => Err(e.into()),
    }
}

/// Replace a JSON document through a sibling temp file so readers never see a partial write.
pub(super) async fn write_document<T: Serialize>(path: &Path, value: &T) -> Result<(), StorageError> {
    let bytes = serde_json::to_vec_pretty(value).map_err(ser)?;
    let tmp = path.with_extension("json.tmp");
    tokio::fs::write(&tmp, bytes).await?;
    tokio::fs::rename(&tmp, path).await?;
    Ok(())
}
