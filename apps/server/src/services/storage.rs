//! JSON file storage for the lesson library.
//!
//! The file holds the same envelope as an exported backup, so a backup can be
//! dropped in place of the data file and vice versa.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::Utc;
use study_core::backup::{self, Backup};
use study_core::StudyError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid data file: {0}")]
    Invalid(#[from] StudyError),
}

/// Reads and writes the library file.
pub struct StorageService {
    path: PathBuf,
}

impl StorageService {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the saved library, or `None` if nothing has been saved yet.
    pub async fn load(&self) -> Result<Option<Backup>, StorageError> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(self.io_error(e)),
        };

        let backup = backup::parse(&content, Utc::now())?;
        tracing::info!(
            path = %self.path.display(),
            lessons = backup.lessons.len(),
            "library loaded"
        );
        Ok(Some(backup))
    }

    /// Write the library, replacing the previous file.
    pub async fn save(&self, library: &Backup) -> Result<(), StorageError> {
        let json = backup::to_json(library, Utc::now())?;

        // Write beside the target and rename so a crash never leaves half a file.
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, json)
            .await
            .map_err(|e| self.io_error(e))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| self.io_error(e))?;

        tracing::debug!(path = %self.path.display(), "library saved");
        Ok(())
    }

    fn io_error(&self, source: std::io::Error) -> StorageError {
        StorageError::Io {
            path: self.path.display().to_string(),
            source,
        }
    }
}
