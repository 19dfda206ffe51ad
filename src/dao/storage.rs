use std::{io, path::PathBuf};
use thiserror::Error;

/// Result alias for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Error raised by high-score backends.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The file could not be read or written.
    #[error("high-score file `{path}` unavailable")]
    Io {
        /// File that failed.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// The file holds something other than a score list.
    #[error("high-score file `{path}` is malformed")]
    Malformed {
        /// File that failed.
        path: PathBuf,
        /// Underlying encoding failure.
        #[source]
        source: serde_json::Error,
    },
}

impl StorageError {
    /// I/O failure on `path`.
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        StorageError::Io {
            path: path.into(),
            source,
        }
    }

    /// Encoding failure on `path`.
    pub fn malformed(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        StorageError::Malformed {
            path: path.into(),
            source,
        }
    }
}
