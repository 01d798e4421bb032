//! Best score stored in browser LocalStorage

use super::{BestScoreRecord, ScoreStore};

/// LocalStorage-backed score cell
#[derive(Debug, Clone)]
pub struct LocalStorageScore {
    key: String,
    cached: u64,
}

impl LocalStorageScore {
    pub const DEFAULT_KEY: &'static str = "flappy_sim_best_score";

    pub fn new() -> Self {
        Self::with_key(Self::DEFAULT_KEY)
    }

    pub fn with_key(key: &str) -> Self {
        let cached = Self::storage()
            .and_then(|s| s.get_item(key).ok().flatten())
            .and_then(|json| BestScoreRecord::parse(&json))
            .map(|r| r.best_score)
            .unwrap_or(0);
        log::info!("Loaded best score {} from LocalStorage", cached);
        Self {
            key: key.to_string(),
            cached,
        }
    }

    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
    }
}

impl Default for LocalStorageScore {
    fn default() -> Self {
        Self::new()
    }
}

impl ScoreStore for LocalStorageScore {
    fn get(&self) -> u64 {
        self.cached
    }

    fn set(&mut self, value: u64) {
        self.cached = value;
        match Self::storage() {
            Some(storage) => match BestScoreRecord { best_score: value }.to_json() {
                Ok(json) => {
                    if storage.set_item(&self.key, &json).is_err() {
                        log::warn!("Failed to write best score to LocalStorage");
                    }
                }
                Err(e) => log::warn!("Failed to serialize best score: {}", e),
            },
            None => log::warn!("LocalStorage unavailable, best score not saved"),
        }
    }
}
