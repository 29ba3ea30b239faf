//! Leaderboard display filters.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use super::{Competitor, Division, Sex};

/// Rejected filter input.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FilterError {
    #[error("Unknown age group: {0}")]
    UnknownAgeGroup(String),

    #[error("Unknown division: {0}")]
    UnknownDivision(String),

    #[error("Unknown sex: {0}")]
    UnknownSex(String),
}

/// Age groups, both ends inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AgeBracket {
    #[serde(rename = "14-17")]
    Teen,
    #[serde(rename = "18-34")]
    Open,
    #[serde(rename = "35-39")]
    Masters35,
    #[serde(rename = "40-44")]
    Masters40,
    #[serde(rename = "45-49")]
    Masters45,
    #[serde(rename = "50-54")]
    Masters50,
    #[serde(rename = "55+")]
    Masters55,
}

impl AgeBracket {
    pub const ALL: [AgeBracket; 7] = [
        AgeBracket::Teen,
        AgeBracket::Open,
        AgeBracket::Masters35,
        AgeBracket::Masters40,
        AgeBracket::Masters45,
        AgeBracket::Masters50,
        AgeBracket::Masters55,
    ];

    /// Inclusive `(min, max)`; `max` is `None` for the open-ended group.
    pub fn bounds(&self) -> (u32, Option<u32>) {
        match self {
            AgeBracket::Teen => (14, Some(17)),
            AgeBracket::Open => (18, Some(34)),
            AgeBracket::Masters35 => (35, Some(39)),
            AgeBracket::Masters40 => (40, Some(44)),
            AgeBracket::Masters45 => (45, Some(49)),
            AgeBracket::Masters50 => (50, Some(54)),
            AgeBracket::Masters55 => (55, None),
        }
    }

    /// Unknown ages never match.
    pub fn contains(&self, age: Option<u32>) -> bool {
        let Some(age) = age else {
            return false;
        };
        let (min, max) = self.bounds();
        age >= min && max.map_or(true, |max| age <= max)
    }

    pub fn key(&self) -> &'static str {
        match self {
            AgeBracket::Teen => "14-17",
            AgeBracket::Open => "18-34",
            AgeBracket::Masters35 => "35-39",
            AgeBracket::Masters40 => "40-44",
            AgeBracket::Masters45 => "45-49",
            AgeBracket::Masters50 => "50-54",
            AgeBracket::Masters55 => "55+",
        }
    }
}

impl fmt::Display for AgeBracket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.key())
    }
}

impl FromStr for AgeBracket {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim();
        AgeBracket::ALL
            .into_iter()
            .find(|b| b.key() == key)
            .ok_or_else(|| FilterError::UnknownAgeGroup(key.to_string()))
    }
}

/// Caller-supplied display filters. `None` means "all".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardFilter {
    pub division: Option<Division>,
    pub sex: Option<Sex>,
    pub age_bracket: Option<AgeBracket>,
    /// Case-insensitive substring of the name.
    pub search: Option<String>,
    pub gym: Option<String>,
}

impl LeaderboardFilter {
    /// Build from command-line style strings, where `"all"` or empty means no filter.
    pub fn from_keys(
        division: Option<&str>,
        sex: Option<&str>,
        age_group: Option<&str>,
        search: Option<&str>,
        gym: Option<&str>,
    ) -> Result<Self, FilterError> {
        let division = selected(division)
            .map(|d| d.parse::<Division>().map_err(|_| FilterError::UnknownDivision(d.to_string())))
            .transpose()?;
        let sex = selected(sex)
            .map(|s| s.parse::<Sex>().map_err(|_| FilterError::UnknownSex(s.to_string())))
            .transpose()?;
        let age_bracket = selected(age_group).map(str::parse::<AgeBracket>).transpose()?;

        Ok(Self {
            division,
            sex,
            age_bracket,
            search: selected(search).map(str::to_string),
            gym: selected(gym).map(str::to_string),
        })
    }

    /// Whether a competitor passes every active filter.
    pub fn matches(&self, competitor: &Competitor) -> bool {
        if self.division.is_some_and(|d| d != competitor.division) {
            return false;
        }
        if self.sex.is_some_and(|s| s != competitor.sex) {
            return false;
        }
        if let Some(bracket) = self.age_bracket {
            if !bracket.contains(competitor.age) {
                return false;
            }
        }
        if let Some(gym) = &self.gym {
            if competitor.gym_id.as_deref() != Some(gym.as_str()) {
                return false;
            }
        }
        if let Some(term) = &self.search {
            if !competitor
                .name
                .to_lowercase()
                .contains(&term.to_lowercase())
            {
                return false;
            }
        }
        true
    }
}

fn selected(value: Option<&str>) -> Option<&str> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty() && !v.eq_ignore_ascii_case("all"))
}
