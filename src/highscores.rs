//! High score persistence
//!
//! A single integer under one key. Read once at startup, written at most once
//! per run. Storage trouble never reaches the game: reads fall back to 0 and
//! failed writes are logged and dropped.

use std::num::ParseIntError;

use thiserror::Error;

use crate::persistence::{KeyValueStore, MemoryStore, StorageError};

/// Storage key for the best score
pub const HIGH_SCORE_KEY: &str = "high-score";

#[derive(Debug, Error)]
pub enum HighScoreError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("stored high score `{raw}` is not a number")]
    Parse {
        raw: String,
        #[source]
        source: ParseIntError,
    },
}

/// Reads and writes the persisted high score
pub struct HighScoreStore {
    store: Box<dyn KeyValueStore>,
}

impl HighScoreStore {
    pub fn new(store: impl KeyValueStore + 'static) -> Self {
        Self {
            store: Box::new(store),
        }
    }

    /// Non-durable store (native builds, tests)
    pub fn memory() -> Self {
        Self::new(MemoryStore::new())
    }

    /// Browser LocalStorage
    #[cfg(target_arch = "wasm32")]
    pub fn local_storage() -> Self {
        Self::new(crate::persistence::LocalStorageStore)
    }

    /// Read the stored score; a missing key is 0
    pub fn try_load(&self) -> Result<u64, HighScoreError> {
        let Some(raw) = self.store.get(HIGH_SCORE_KEY)? else {
            return Ok(0);
        };
        raw.trim()
            .parse()
            .map_err(|source| HighScoreError::Parse { raw, source })
    }

    /// Read the stored score, treating any failure as no score
    pub fn load(&self) -> u64 {
        match self.try_load() {
            Ok(score) => {
                log::info!("Loaded high score {}", score);
                score
            }
            Err(e) => {
                log::warn!("Could not load high score, starting from 0: {}", e);
                0
            }
        }
    }

    pub fn try_save(&mut self, score: u64) -> Result<(), HighScoreError> {
        self.store.set(HIGH_SCORE_KEY, &score.to_string())?;
        Ok(())
    }

    /// Persist the score; returns whether it was durably written
    pub fn save(&mut self, score: u64) -> bool {
        match self.try_save(score) {
            Ok(()) => {
                log::info!("High score {} saved", score);
                true
            }
            Err(e) => {
                log::warn!("Could not save high score {}: {}", score, e);
                false
            }
        }
    }
}

impl Default for HighScoreStore {
    fn default() -> Self {
        Self::memory()
    }
}

impl std::fmt::Debug for HighScoreStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HighScoreStore").finish_non_exhaustive()
    }
}
