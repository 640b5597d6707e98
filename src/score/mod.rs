//! Persistent high-score storage.
//!
//! A single JSON file on disk. The driver consults it once per game, at
//! game-over entry: load, compare, and persist only an improvement. A
//! missing or unreadable file reads as a high score of zero rather than an
//! error, so a fresh install plays without setup.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ScoreRecord {
    high_score: u32,
}

/// File-backed high-score store.
pub struct HighScoreStore {
    path: PathBuf,
}

impl HighScoreStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Read the stored high score; 0 when no score has been saved yet.
    pub fn load(&self) -> u32 {
        let Ok(contents) = fs::read_to_string(&self.path) else {
            return 0;
        };
        serde_json::from_str::<ScoreRecord>(&contents)
            .map(|record| record.high_score)
            .unwrap_or(0)
    }

    /// Persist `score`, creating parent directories if needed.
    pub fn save(&self, score: u32) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create score directory {}", parent.display())
                })?;
            }
        }

        let record = ScoreRecord { high_score: score };
        let contents =
            serde_json::to_string_pretty(&record).context("Failed to serialize high score")?;
        fs::write(&self.path, contents)
            .with_context(|| format!("Failed to write high score to {}", self.path.display()))?;
        Ok(())
    }

    /// Save `score` if it beats the stored one; returns the new high score.
    pub fn record_if_best(&self, score: u32) -> Result<u32> {
        let best = self.load();
        if score > best {
            self.save(score)?;
            Ok(score)
        } else {
            Ok(best)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_reads_as_zero() {
        let dir = tempdir().unwrap();
        let store = HighScoreStore::new(dir.path().join("highscore.json"));
        assert_eq!(store.load(), 0);
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempdir().unwrap();
        let store = HighScoreStore::new(dir.path().join("highscore.json"));

        store.save(42).unwrap();
        assert_eq!(store.load(), 42);
    }

    #[test]
    fn test_save_creates_parent_directories() {
        let dir = tempdir().unwrap();
        let store = HighScoreStore::new(dir.path().join("nested/scores/highscore.json"));

        store.save(7).unwrap();
        assert_eq!(store.load(), 7);
    }

    #[test]
    fn test_record_if_best_keeps_maximum() {
        let dir = tempdir().unwrap();
        let store = HighScoreStore::new(dir.path().join("highscore.json"));

        assert_eq!(store.record_if_best(10).unwrap(), 10);
        assert_eq!(store.record_if_best(5).unwrap(), 10);
        assert_eq!(store.load(), 10);
        assert_eq!(store.record_if_best(15).unwrap(), 15);
        assert_eq!(store.load(), 15);
    }

    #[test]
    fn test_corrupt_file_reads_as_zero() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("highscore.json");
        std::fs::write(&path, "not json").unwrap();

        let store = HighScoreStore::new(&path);
        assert_eq!(store.load(), 0);
    }
}
