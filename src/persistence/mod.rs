//! Best-score persistence
//!
//! The simulation only needs a get/set cell for one number. Implementations:
//! - `MemoryScore`: in-process, used by tests and headless runs
//! - `FileScore`: JSON file on disk (native)
//! - `LocalStorageScore`: browser LocalStorage (wasm32)

#[cfg(not(target_arch = "wasm32"))]
pub mod file;
#[cfg(target_arch = "wasm32")]
pub mod local_storage;

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileScore;
#[cfg(target_arch = "wasm32")]
pub use local_storage::LocalStorageScore;

use serde::{Deserialize, Serialize};

/// Key-value cell holding the best score
pub trait ScoreStore {
    /// Stored best score, 0 when nothing has been stored yet
    fn get(&self) -> u64;
    fn set(&mut self, value: u64);
}

/// On-disk / in-storage representation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BestScoreRecord {
    pub best_score: u64,
}

impl BestScoreRecord {
    /// Parse a stored record, treating anything unreadable as empty
    pub fn parse(json: &str) -> Option<Self> {
        match serde_json::from_str(json) {
            Ok(record) => Some(record),
            Err(e) => {
                log::warn!("Ignoring unreadable best score record: {}", e);
                None
            }
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// In-memory score cell
#[derive(Debug, Clone, Default)]
pub struct MemoryScore {
    value: u64,
    writes: u32,
}

impl MemoryScore {
    pub fn new(value: u64) -> Self {
        Self { value, writes: 0 }
    }

    /// Number of `set` calls so far
    pub fn writes(&self) -> u32 {
        self.writes
    }
}

impl ScoreStore for MemoryScore {
    fn get(&self) -> u64 {
        self.value
    }

    fn set(&mut self, value: u64) {
        self.value = value;
        self.writes += 1;
    }
}

impl<T: ScoreStore + ?Sized> ScoreStore for Box<T> {
    fn get(&self) -> u64 {
        (**self).get()
    }

    fn set(&mut self, value: u64) {
        (**self).set(value)
    }
}
