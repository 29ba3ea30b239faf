//! Event (workout) configuration.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use super::{Competitor, EventSlot};

/// How raw results for an event are ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScoringMode {
    /// Reps or load: larger wins.
    #[serde(rename = "reps", alias = "weight", alias = "higher_is_better")]
    HigherIsBetter,
    /// For time: smaller wins.
    #[serde(rename = "time", alias = "lower_is_better")]
    LowerIsBetter,
    /// For time under a cap; non-finishers are scored by reps completed.
    #[serde(rename = "time_cap_reps", alias = "capped_completion")]
    CappedCompletion,
}

impl fmt::Display for ScoringMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScoringMode::HigherIsBetter => write!(f, "higher is better"),
            ScoringMode::LowerIsBetter => write!(f, "lower is better"),
            ScoringMode::CappedCompletion => write!(f, "time cap + reps"),
        }
    }
}

/// Configuration for one event, supplied by the organizers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventConfig {
    pub id: EventSlot,

    /// Display name (e.g. "26.1")
    #[serde(default)]
    pub name: String,

    #[serde(rename = "score_type", alias = "scoring")]
    pub scoring: ScoringMode,

    /// Unit label for display
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,

    /// Whether the event counts toward the leaderboard.
    #[serde(default)]
    pub published: bool,

    /// Break equal primary results by tiebreak time.
    #[serde(default)]
    pub has_tiebreaker: bool,

    /// Cap in seconds for capped events.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_cap: Option<u32>,
}

impl EventConfig {
    pub fn new(id: EventSlot, name: impl Into<String>, scoring: ScoringMode) -> Self {
        Self {
            id,
            name: name.into(),
            scoring,
            unit: None,
            published: false,
            has_tiebreaker: false,
            time_cap: None,
        }
    }

    /// Builder method to publish the event.
    pub fn published(mut self) -> Self {
        self.published = true;
        self
    }

    /// Builder method to enable tiebreaks.
    pub fn with_tiebreaker(mut self) -> Self {
        self.has_tiebreaker = true;
        self
    }

    /// Builder method to set the cap.
    pub fn with_time_cap(mut self, seconds: u32) -> Self {
        self.time_cap = Some(seconds);
        self
    }

    /// Builder method to set the unit label.
    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }
}

/// The contest's event configurations, keyed by slot.
///
/// A slot without an entry is treated as disabled.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventConfigs(BTreeMap<EventSlot, EventConfig>);

impl EventConfigs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Same configuration for every slot, named `26.1`..`26.3`.
    pub fn uniform(scoring: ScoringMode, published: bool) -> Self {
        let mut configs = Self::new();
        for slot in EventSlot::ALL {
            let mut config = EventConfig::new(slot, format!("26.{}", slot.index() + 1), scoring);
            config.published = published;
            configs.insert(config);
        }
        configs
    }

    /// Insert a configuration under its own slot.
    pub fn insert(&mut self, config: EventConfig) {
        self.0.insert(config.id, config);
    }

    /// Builder form of [`EventConfigs::insert`].
    pub fn with(mut self, config: EventConfig) -> Self {
        self.insert(config);
        self
    }

    pub fn get(&self, slot: EventSlot) -> Option<&EventConfig> {
        self.0.get(&slot)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&EventSlot, &EventConfig)> {
        self.0.iter()
    }

    /// Whether the slot is configured and published.
    pub fn is_enabled(&self, slot: EventSlot) -> bool {
        self.get(slot).is_some_and(|c| c.published)
    }

    /// Enabled events that have at least one submitted result in the roster.
    pub fn live_events(&self, roster: &[Competitor]) -> Vec<EventSlot> {
        EventSlot::ALL
            .into_iter()
            .filter(|slot| self.is_enabled(*slot))
            .filter(|slot| roster.iter().any(|c| c.result(*slot).is_submitted()))
            .collect()
    }
}
