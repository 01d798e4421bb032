//! Best score stored as a small JSON file

use std::path::{Path, PathBuf};

use super::{BestScoreRecord, ScoreStore};

/// File-backed score cell. The value is cached after the first read.
#[derive(Debug, Clone)]
pub struct FileScore {
    path: PathBuf,
    cached: u64,
}

impl FileScore {
    /// Open (or lazily create) the score file at `path`
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let cached = Self::read(&path);
        Self { path, cached }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write(&self, value: u64) -> std::io::Result<()> {
        let json = BestScoreRecord { best_score: value }.to_json()?;
        std::fs::write(&self.path, json)
    }

    fn read(path: &Path) -> u64 {
        match std::fs::read_to_string(path) {
            Ok(json) => {
                let best = BestScoreRecord::parse(&json).map(|r| r.best_score).unwrap_or(0);
                log::info!("Loaded best score {} from {}", best, path.display());
                best
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No best score file at {}, starting fresh", path.display());
                0
            }
            Err(e) => {
                log::warn!("Failed to read {}: {}", path.display(), e);
                0
            }
        }
    }
}

impl ScoreStore for FileScore {
    fn get(&self) -> u64 {
        self.cached
    }

    fn set(&mut self, value: u64) {
        self.cached = value;
        match self.write(value) {
            Ok(()) => log::debug!("Best score {} saved to {}", value, self.path.display()),
            Err(e) => log::warn!("Failed to save best score to {}: {}", self.path.display(), e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("flappy_sim_{}_{}.json", name, std::process::id()))
    }

    #[test]
    fn test_missing_file_reads_zero() {
        let path = temp_path("missing");
        let _ = std::fs::remove_file(&path);
        let store = FileScore::open(&path);
        assert_eq!(store.get(), 0);
    }

    #[test]
    fn test_set_persists_across_instances() {
        let path = temp_path("persist");
        let mut store = FileScore::open(&path);
        store.set(17);
        assert_eq!(store.get(), 17);

        let reopened = FileScore::open(&path);
        assert_eq!(reopened.get(), 17);
        assert_eq!(reopened.path(), path.as_path());
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_corrupt_file_reads_zero() {
        let path = temp_path("corrupt");
        std::fs::write(&path, "{ nope").unwrap();
        assert_eq!(FileScore::open(&path).get(), 0);
        let _ = std::fs::remove_file(&path);
    }
}
