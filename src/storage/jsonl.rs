//! JSONL (JSON Lines) roster and standings files.
//!
//! Each line is a valid JSON object representing one entity.

use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::StorageError;
use crate::models::{Competitor, LeaderboardFilter, RankedCompetitor};

/// Kinds of files kept in the data directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityType {
    Roster,
    Standings,
}

impl EntityType {
    pub fn extension(&self) -> &'static str {
        match self {
            EntityType::Roster => "jsonl",
            EntityType::Standings => "json",
        }
    }
}

/// JSONL file writer.
pub struct JsonlWriter<T> {
    path: PathBuf,
    _marker: PhantomData<T>,
}

impl<T: Serialize> JsonlWriter<T> {
    /// Create a new JSONL writer for the given path.
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            _marker: PhantomData,
        }
    }

    /// Write entities, replacing the entire file.
    pub fn write_all(&self, entities: &[T]) -> Result<usize, StorageError> {
        ensure_parent(&self.path)?;

        let file = File::create(&self.path)?;
        let mut writer = BufWriter::new(file);
        let mut count = 0;

        for entity in entities {
            let json = serde_json::to_string(entity)?;
            writeln!(writer, "{}", json)?;
            count += 1;
        }

        writer.flush()?;
        info!("Wrote {} entities to {:?}", count, self.path);

        Ok(count)
    }
}

/// JSONL file reader.
pub struct JsonlReader<T> {
    path: PathBuf,
    _marker: PhantomData<T>,
}

impl<T: DeserializeOwned> JsonlReader<T> {
    /// Create a new JSONL reader for the given path.
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            _marker: PhantomData,
        }
    }

    /// Read all entities, skipping blank and unparseable lines.
    pub fn read_all(&self) -> Result<Vec<T>, StorageError> {
        if !self.path.exists() {
            return Err(StorageError::PathNotFound(self.path.clone()));
        }

        let file = File::open(&self.path)?;
        let reader = BufReader::new(file);
        let mut entities = Vec::new();

        for (line_num, line) in reader.lines().enumerate() {
            let line = line?;

            if line.trim().is_empty() {
                continue;
            }

            match serde_json::from_str(&line) {
                Ok(entity) => entities.push(entity),
                Err(e) => {
                    warn!(
                        "Failed to parse line {} in {:?}: {}",
                        line_num + 1,
                        self.path,
                        e
                    );
                }
            }
        }

        debug!("Read {} entities from {:?}", entities.len(), self.path);
        Ok(entities)
    }
}

/// Load a roster snapshot, deriving ids for rows that lack one.
pub fn read_roster(path: &Path) -> Result<Vec<Competitor>, StorageError> {
    let mut roster: Vec<Competitor> = JsonlReader::new(path.to_path_buf()).read_all()?;
    for competitor in &mut roster {
        competitor.ensure_id();
    }
    info!("Loaded {} competitors from {:?}", roster.len(), path);
    Ok(roster)
}

/// A ranked leaderboard as written to disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardSnapshot {
    pub generated_at: DateTime<Utc>,
    pub filter: LeaderboardFilter,
    pub entries: Vec<RankedCompetitor>,
}

impl LeaderboardSnapshot {
    pub fn new(filter: LeaderboardFilter, entries: Vec<RankedCompetitor>) -> Self {
        Self {
            generated_at: Utc::now(),
            filter,
            entries,
        }
    }

    /// Write as one pretty-printed JSON document.
    pub fn write_to(&self, path: &Path) -> Result<(), StorageError> {
        ensure_parent(path)?;
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.flush()?;
        info!("Wrote {} standings to {:?}", self.entries.len(), path);
        Ok(())
    }

    pub fn read_from(path: &Path) -> Result<Self, StorageError> {
        if !path.exists() {
            return Err(StorageError::PathNotFound(path.to_path_buf()));
        }
        let file = File::open(path)?;
        Ok(serde_json::from_reader(BufReader::new(file))?)
    }
}

fn ensure_parent(path: &Path) -> Result<(), StorageError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}
