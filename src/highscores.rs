//! High score persistence
//!
//! A single best score. Persisted to LocalStorage on web and to a small JSON
//! file natively.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::platform::HighScoreStore;

/// Error from the file-backed store
#[derive(Debug)]
pub enum HighScoreError {
    Io(std::io::Error),
    Parse(serde_json::Error),
}

impl fmt::Display for HighScoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HighScoreError::Io(e) => write!(f, "high score file: {e}"),
            HighScoreError::Parse(e) => write!(f, "high score data: {e}"),
        }
    }
}

impl std::error::Error for HighScoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            HighScoreError::Io(e) => Some(e),
            HighScoreError::Parse(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for HighScoreError {
    fn from(e: std::io::Error) -> Self {
        HighScoreError::Io(e)
    }
}

impl From<serde_json::Error> for HighScoreError {
    fn from(e: serde_json::Error) -> Self {
        HighScoreError::Parse(e)
    }
}

/// Stored record
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreRecord {
    pub high_score: u64,
}

/// In-memory store, used by tests and as the native fallback
#[derive(Debug, Clone, Default)]
pub struct MemoryHighScore {
    value: u64,
}

impl MemoryHighScore {
    pub fn new(value: u64) -> Self {
        Self { value }
    }
}

impl HighScoreStore for MemoryHighScore {
    fn get_high_score(&self) -> u64 {
        self.value
    }

    fn set_high_score(&mut self, score: u64) {
        self.value = score;
    }
}

/// JSON file store for the native runner
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone)]
pub struct FileHighScore {
    path: std::path::PathBuf,
}

#[cfg(not(target_arch = "wasm32"))]
impl FileHighScore {
    pub fn new(path: impl Into<std::path::PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Read the stored record; a missing file is an empty record
    pub fn load(&self) -> Result<HighScoreRecord, HighScoreError> {
        match std::fs::read_to_string(&self.path) {
            Ok(json) => Ok(serde_json::from_str(&json)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(HighScoreRecord::default()),
            Err(e) => Err(e.into()),
        }
    }

    pub fn save(&self, record: HighScoreRecord) -> Result<(), HighScoreError> {
        let json = serde_json::to_string_pretty(&record)?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl HighScoreStore for FileHighScore {
    fn get_high_score(&self) -> u64 {
        match self.load() {
            Ok(record) => record.high_score,
            Err(e) => {
                log::warn!("Ignoring unreadable high score at {}: {e}", self.path.display());
                0
            }
        }
    }

    fn set_high_score(&mut self, score: u64) {
        match self.save(HighScoreRecord { high_score: score }) {
            Ok(()) => log::info!("High score {score} saved"),
            Err(e) => log::warn!("Failed to save high score: {e}"),
        }
    }
}

/// LocalStorage store (WASM only)
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Default)]
pub struct LocalStorageHighScore;

#[cfg(target_arch = "wasm32")]
impl LocalStorageHighScore {
    const STORAGE_KEY: &'static str = "sword_arena_high_score";

    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
    }
}

#[cfg(target_arch = "wasm32")]
impl HighScoreStore for LocalStorageHighScore {
    fn get_high_score(&self) -> u64 {
        let Some(storage) = Self::storage() else {
            log::warn!("LocalStorage unavailable, high score starts at 0");
            return 0;
        };
        storage
            .get_item(Self::STORAGE_KEY)
            .ok()
            .flatten()
            .and_then(|s| s.parse().ok())
            .unwrap_or(0)
    }

    fn set_high_score(&mut self, score: u64) {
        if let Some(storage) = Self::storage() {
            let _ = storage.set_item(Self::STORAGE_KEY, &score.to_string());
            log::info!("High score {score} saved");
        }
    }
}
