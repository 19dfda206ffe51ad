use std::{
    fs::{self, File},
    io::{BufWriter, ErrorKind, Write},
    path::PathBuf,
    sync::Mutex,
};

use crate::dao::{
    models::ScoreEntry,
    storage::{StorageError, StorageResult},
};

/// Abstraction over where the high-score list lives.
pub trait HighScoreStore: Send {
    /// Read the whole list. A missing list is an empty one.
    fn load(&self) -> StorageResult<Vec<ScoreEntry>>;
    /// Replace the whole list.
    fn save(&self, scores: &[ScoreEntry]) -> StorageResult<()>;
}

/// JSON file rewritten whole on every save.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Store backed by the file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl HighScoreStore for JsonFileStore {
    fn load(&self) -> StorageResult<Vec<ScoreEntry>> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => serde_json::from_str(&contents)
                .map_err(|source| StorageError::malformed(&self.path, source)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(Vec::new()),
            Err(err) => Err(StorageError::io(&self.path, err)),
        }
    }

    fn save(&self, scores: &[ScoreEntry]) -> StorageResult<()> {
        let file = File::create(&self.path).map_err(|err| StorageError::io(&self.path, err))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer(&mut writer, scores)
            .map_err(|source| StorageError::malformed(&self.path, source))?;
        writer
            .flush()
            .map_err(|err| StorageError::io(&self.path, err))
    }
}

/// Volatile store used when no file should be touched.
#[derive(Debug, Default)]
pub struct MemoryStore {
    scores: Mutex<Vec<ScoreEntry>>,
}

impl MemoryStore {
    /// Store seeded with `scores`, which must already be ranked.
    pub fn with_scores(scores: Vec<ScoreEntry>) -> Self {
        Self {
            scores: Mutex::new(scores),
        }
    }
}

impl HighScoreStore for MemoryStore {
    fn load(&self) -> StorageResult<Vec<ScoreEntry>> {
        Ok(self
            .scores
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default())
    }

    fn save(&self, scores: &[ScoreEntry]) -> StorageResult<()> {
        if let Ok(mut guard) = self.scores.lock() {
            *guard = scores.to_vec();
        }
        Ok(())
    }
}
