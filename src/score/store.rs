//! High-score persistence.
//!
//! A single number survives across sessions, keyed by a fixed file path.
//! The file is a small JSON document so a curious player can read it; a
//! missing or malformed file simply loads as zero.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Persisted best score across sessions
pub trait ScoreStore {
    fn get(&self) -> u32;
    fn set(&mut self, score: u32) -> Result<()>;
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct SavedScores {
    high_score: u32,
}

/// [`ScoreStore`] backed by a JSON file
pub struct FileScoreStore {
    path: PathBuf,
    cached: u32,
}

impl FileScoreStore {
    /// Open the store, loading the current high score. Any read or parse
    /// failure is treated as an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let cached = Self::load(&path);
        Self { path, cached }
    }

    fn load(path: &Path) -> u32 {
        match fs::read_to_string(path) {
            Ok(text) => {
                let saved: SavedScores = serde_json::from_str(&text).unwrap_or_else(|err| {
                    tracing::warn!(path = %path.display(), %err, "malformed score file, starting at 0");
                    SavedScores::default()
                });
                saved.high_score
            }
            Err(_) => 0,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ScoreStore for FileScoreStore {
    fn get(&self) -> u32 {
        self.cached
    }

    fn set(&mut self, score: u32) -> Result<()> {
        self.cached = score;
        let text = serde_json::to_string_pretty(&SavedScores { high_score: score })?;
        fs::write(&self.path, text)
            .with_context(|| format!("failed to write score file {}", self.path.display()))?;
        Ok(())
    }
}
