//! Competitor roster model.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::{lenient, CompetitorId};

/// Number of events in a contest.
pub const EVENT_COUNT: usize = 3;

/// Competitive division, ordered from most to least advanced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Division {
    Rx,
    Scaled,
    Foundations,
}

impl Division {
    /// All divisions in precedence order.
    pub const ALL: [Division; 3] = [Division::Rx, Division::Scaled, Division::Foundations];

    pub fn as_str(&self) -> &'static str {
        match self {
            Division::Rx => "Rx",
            Division::Scaled => "Scaled",
            Division::Foundations => "Foundations",
        }
    }
}

impl fmt::Display for Division {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Division {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rx" => Ok(Division::Rx),
            "scaled" => Ok(Division::Scaled),
            "foundations" => Ok(Division::Foundations),
            other => Err(format!("unknown division: {}", other)),
        }
    }
}

/// Sex category used for cohorting and filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Sex {
    #[serde(rename = "M")]
    Male,
    #[serde(rename = "F")]
    Female,
}

impl Sex {
    pub const ALL: [Sex; 2] = [Sex::Male, Sex::Female];

    pub fn as_str(&self) -> &'static str {
        match self {
            Sex::Male => "M",
            Sex::Female => "F",
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Sex {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "M" | "MALE" => Ok(Sex::Male),
            "F" | "FEMALE" => Ok(Sex::Female),
            other => Err(format!("unknown sex: {}", other)),
        }
    }
}

/// One of the contest's fixed event slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventSlot {
    W1,
    W2,
    W3,
}

impl EventSlot {
    pub const ALL: [EventSlot; EVENT_COUNT] = [EventSlot::W1, EventSlot::W2, EventSlot::W3];

    /// Position of this slot in per-event arrays.
    pub fn index(&self) -> usize {
        match self {
            EventSlot::W1 => 0,
            EventSlot::W2 => 1,
            EventSlot::W3 => 2,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EventSlot::W1 => "w1",
            EventSlot::W2 => "w2",
            EventSlot::W3 => "w3",
        }
    }
}

impl fmt::Display for EventSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// A competitor's submission for one event.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EventResult {
    /// Raw result: reps, load, or seconds depending on the event. 0 = not submitted.
    /// Only set through [`EventResult::new`] or the lenient decoder, so it is
    /// always finite and non-negative.
    #[serde(default, deserialize_with = "lenient::score")]
    score: f64,

    /// Capped events only: true when the competitor did not finish inside the
    /// cap, so `score` is partial progress rather than a time.
    #[serde(default)]
    pub capped: bool,

    /// Tiebreak time in seconds.
    #[serde(
        default,
        deserialize_with = "lenient::tiebreak",
        skip_serializing_if = "Option::is_none"
    )]
    pub tiebreak: Option<u32>,
}

impl EventResult {
    pub fn new(score: f64) -> Self {
        Self {
            score: lenient::sanitize_score(score),
            capped: false,
            tiebreak: None,
        }
    }

    /// Builder method to mark the result as capped (did not finish).
    pub fn capped(mut self) -> Self {
        self.capped = true;
        self
    }

    /// Builder method to set a tiebreak time.
    pub fn with_tiebreak(mut self, seconds: u32) -> Self {
        self.tiebreak = (seconds > 0).then_some(seconds);
        self
    }

    pub fn score(&self) -> f64 {
        self.score
    }

    /// Whether anything was submitted.
    pub fn is_submitted(&self) -> bool {
        self.score > 0.0
    }
}

/// Per-slot results, serialized as `w1`/`w2`/`w3`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EventResults {
    #[serde(default)]
    pub w1: EventResult,
    #[serde(default)]
    pub w2: EventResult,
    #[serde(default)]
    pub w3: EventResult,
}

impl EventResults {
    pub fn get(&self, slot: EventSlot) -> &EventResult {
        match slot {
            EventSlot::W1 => &self.w1,
            EventSlot::W2 => &self.w2,
            EventSlot::W3 => &self.w3,
        }
    }

    pub fn get_mut(&mut self, slot: EventSlot) -> &mut EventResult {
        match slot {
            EventSlot::W1 => &mut self.w1,
            EventSlot::W2 => &mut self.w2,
            EventSlot::W3 => &mut self.w3,
        }
    }
}

/// One person entered in the contest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Competitor {
    #[serde(default)]
    pub id: CompetitorId,

    pub name: String,

    pub division: Division,

    #[serde(alias = "gender")]
    pub sex: Sex,

    /// Age in years; `None` when the source value was unusable.
    #[serde(default, deserialize_with = "lenient::age")]
    pub age: Option<u32>,

    /// Affiliate/gym code
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gym_id: Option<String>,

    #[serde(default)]
    pub results: EventResults,
}

impl Competitor {
    /// Create a competitor with an id derived from name, division and sex.
    pub fn new(name: impl Into<String>, division: Division, sex: Sex) -> Self {
        let name = name.into();
        let id = CompetitorId::generate(&[&name, division.as_str(), sex.as_str()]);
        Self {
            id,
            name,
            division,
            sex,
            age: None,
            gym_id: None,
            results: EventResults::default(),
        }
    }

    /// Builder method to set the age.
    pub fn with_age(mut self, age: u32) -> Self {
        self.age = Some(age);
        self
    }

    /// Builder method to set the gym.
    pub fn with_gym(mut self, gym_id: impl Into<String>) -> Self {
        self.gym_id = Some(gym_id.into());
        self
    }

    /// Builder method to set one event's result.
    pub fn with_result(mut self, slot: EventSlot, result: EventResult) -> Self {
        *self.results.get_mut(slot) = result;
        self
    }

    /// Builder method to set a plain score for one event.
    pub fn with_score(self, slot: EventSlot, score: f64) -> Self {
        self.with_result(slot, EventResult::new(score))
    }

    pub fn result(&self, slot: EventSlot) -> &EventResult {
        self.results.get(slot)
    }

    /// Fill in a derived id when the source record had none.
    pub fn ensure_id(&mut self) {
        if self.id.is_empty() {
            self.id =
                CompetitorId::generate(&[&self.name, self.division.as_str(), self.sex.as_str()]);
        }
    }
}
