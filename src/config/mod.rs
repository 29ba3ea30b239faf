//! Configuration loading and validation.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::warn;

use crate::calculate::CohortGrouping;
use crate::models::{EventConfigs, EventSlot, ScoringMode};

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Main application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Placement cohorts: "division" or "division_and_sex"
    #[serde(default)]
    pub grouping: CohortGrouping,

    /// Event tables keyed by slot (`[events.w1]`, ...). Absent slots are disabled.
    #[serde(default = "default_events")]
    pub events: EventConfigs,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./data")
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Three unpublished reps events named 26.1..26.3.
fn default_events() -> EventConfigs {
    EventConfigs::uniform(ScoringMode::HigherIsBetter, false)
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_level: default_log_level(),
            grouping: CohortGrouping::default(),
            events: default_events(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Parse and validate configuration text.
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load the file if it exists, otherwise fall back to defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::from_file(path)
        } else {
            warn!("Config file {:?} not found, using defaults", path);
            Ok(Self::default())
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (slot, event) in self.events.iter() {
            if event.id != *slot {
                return Err(ConfigError::ValidationError(format!(
                    "Event table {} declares id {}",
                    slot, event.id
                )));
            }

            if event.scoring == ScoringMode::CappedCompletion && event.time_cap == Some(0) {
                return Err(ConfigError::ValidationError(format!(
                    "Event {} has a zero time cap",
                    slot
                )));
            }
        }

        let missing: Vec<EventSlot> = EventSlot::ALL
            .into_iter()
            .filter(|slot| self.events.get(*slot).is_none())
            .collect();
        if !missing.is_empty() {
            warn!("No configuration for {:?}; treating as unpublished", missing);
        }

        Ok(())
    }
}
