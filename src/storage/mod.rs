//! Roster and standings files.
//!
//! The engine itself never touches the filesystem. This layer is what the
//! command-line front end uses to load roster snapshots and write results:
//! - Roster snapshots as JSONL, one competitor per line
//! - Ranked standings as JSONL or a single JSON snapshot document

mod jsonl;

pub use jsonl::*;

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Path not found: {0}")]
    PathNotFound(PathBuf),
}

/// Configuration for storage paths.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
}

impl StorageConfig {
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    pub fn rosters_dir(&self) -> PathBuf {
        self.data_dir.join("rosters")
    }

    pub fn standings_dir(&self) -> PathBuf {
        self.data_dir.join("standings")
    }

    /// Path of a named file of the given kind.
    pub fn path_for(&self, kind: EntityType, name: &str) -> PathBuf {
        let dir = match kind {
            EntityType::Roster => self.rosters_dir(),
            EntityType::Standings => self.standings_dir(),
        };
        dir.join(format!("{}.{}", name, kind.extension()))
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self::new(PathBuf::from("./data"))
    }
}
