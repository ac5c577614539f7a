//! High-score persistence: one integer in a text file.
//!
//! Loading falls back to 0 and saving is best-effort. Failures are logged
//! here and go no further.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::StorageError;

const DEFAULT_FILE_NAME: &str = ".space_war_highscore";

/// `$HOME/.space_war_highscore`, or the working directory when `HOME` is
/// unset.
pub fn default_highscore_path() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(DEFAULT_FILE_NAME)
}

#[derive(Clone, Debug)]
pub struct HighScoreFile {
    path: PathBuf,
}

impl HighScoreFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Stored high score, or 0 when the file is missing or unreadable.
    pub fn load(&self) -> u32 {
        match self.try_load() {
            Ok(score) => score,
            Err(StorageError::Io(err)) if err.kind() == std::io::ErrorKind::NotFound => 0,
            Err(err) => {
                tracing::warn!(path = %self.path.display(), %err, "ignoring high score file");
                0
            }
        }
    }

    pub fn save(&self, score: u32) {
        if let Err(err) = self.try_save(score) {
            tracing::warn!(path = %self.path.display(), %err, "could not save high score");
        }
    }

    pub fn try_load(&self) -> Result<u32, StorageError> {
        let contents = fs::read_to_string(&self.path)?;
        let trimmed = contents.trim();
        trimmed
            .parse()
            .map_err(|_| StorageError::Malformed(trimmed.to_string()))
    }

    pub fn try_save(&self, score: u32) -> Result<(), StorageError> {
        fs::write(&self.path, score.to_string())?;
        Ok(())
    }
}
