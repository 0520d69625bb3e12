use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tenantbill_core::AppError;

/// Generic whole-collection store over JSON files.
///
/// Each collection lives at `<data_dir>/<name>.json` as a single array of
/// records. Reads never fail the caller: a missing or corrupt file reads as
/// an empty collection with a logged diagnostic. Writes replace the whole
/// file and surface failures for the caller to judge.
#[derive(Clone, Debug)]
pub struct FileStore {
    data_dir: PathBuf,
}

impl FileStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Path of a collection's backing file.
    pub fn collection_path(&self, name: &str) -> PathBuf {
        self.data_dir.join(format!("{}.json", name))
    }

    /// Create the data directory if it does not exist yet.
    pub async fn ensure_data_dir(&self) -> Result<(), AppError> {
        tokio::fs::create_dir_all(&self.data_dir).await.map_err(|e| {
            AppError::Store(format!(
                "Failed to create data directory {}: {}",
                self.data_dir.display(),
                e
            ))
        })
    }

    /// Read a whole collection. Missing or unparseable files yield an empty
    /// vec; the caller never sees a read error.
    pub async fn read_collection<T: DeserializeOwned>(&self, name: &str) -> Vec<T> {
        let path = self.collection_path(name);
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::warn!(collection = name, path = %path.display(), error = %e, "Failed to read collection file, treating as empty");
                return Vec::new();
            }
        };
        match serde_json::from_slice(&bytes) {
            Ok(records) => records,
            Err(e) => {
                tracing::warn!(collection = name, path = %path.display(), error = %e, "Failed to parse collection file, treating as empty");
                Vec::new()
            }
        }
    }

    /// Serialize and replace a whole collection. Pretty-printed to keep the
    /// files hand-inspectable, matching the seeded data format.
    pub async fn write_collection<T: Serialize>(
        &self,
        name: &str,
        records: &[T],
    ) -> Result<(), AppError> {
        let path = self.collection_path(name);
        let json = serde_json::to_vec_pretty(records)
            .map_err(|e| AppError::Store(format!("Failed to serialize {}: {}", name, e)))?;
        tokio::fs::write(&path, json).await.map_err(|e| {
            tracing::error!(collection = name, path = %path.display(), error = %e, "Failed to write collection file");
            AppError::Store(format!("Failed to write {}: {}", name, e))
        })
    }
}
