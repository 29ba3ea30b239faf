//! Splitting the roster into placement cohorts.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::models::{Competitor, Division, Sex};

/// How the roster is grouped into placement ladders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CohortGrouping {
    /// One ladder per event; both sexes ranked together within a division.
    #[default]
    Division,
    /// One ladder per event and sex.
    DivisionAndSex,
}

impl fmt::Display for CohortGrouping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CohortGrouping::Division => write!(f, "division"),
            CohortGrouping::DivisionAndSex => write!(f, "division_and_sex"),
        }
    }
}

impl FromStr for CohortGrouping {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "division" => Ok(CohortGrouping::Division),
            "division_and_sex" => Ok(CohortGrouping::DivisionAndSex),
            other => Err(format!("unknown cohort grouping: {}", other)),
        }
    }
}

/// Competitors of one division (and possibly one sex), as roster indices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cohort {
    pub division: Division,
    pub sex: Option<Sex>,
    pub members: Vec<usize>,
    /// Competitors in higher-precedence cohorts of the same ladder.
    pub offset: u32,
    /// Size of the whole division across the roster.
    pub division_size: u32,
}

impl Cohort {
    /// Points charged for a missing result on a live event: the division's
    /// size plus one. The ladder offset is not part of it.
    pub fn penalty(&self) -> u32 {
        self.division_size + 1
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// One continuous placement sequence: cohorts in division precedence order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ladder {
    pub sex: Option<Sex>,
    pub cohorts: Vec<Cohort>,
}

/// Partition the roster into ladders of division cohorts.
///
/// Every competitor lands in exactly one cohort. Empty cohorts are kept so that
/// each ladder always lists every division.
pub fn partition(roster: &[Competitor], grouping: CohortGrouping) -> Vec<Ladder> {
    let division_size = |division: Division| -> u32 {
        roster.iter().filter(|c| c.division == division).count() as u32
    };

    let sexes: Vec<Option<Sex>> = match grouping {
        CohortGrouping::Division => vec![None],
        CohortGrouping::DivisionAndSex => Sex::ALL.into_iter().map(Some).collect(),
    };

    sexes
        .into_iter()
        .map(|sex| {
            let mut offset = 0;
            let cohorts = Division::ALL
                .into_iter()
                .map(|division| {
                    let members: Vec<usize> = roster
                        .iter()
                        .enumerate()
                        .filter(|(_, c)| c.division == division && sex.map_or(true, |s| c.sex == s))
                        .map(|(i, _)| i)
                        .collect();
                    let cohort = Cohort {
                        division,
                        sex,
                        offset,
                        division_size: division_size(division),
                        members,
                    };
                    offset += cohort.len() as u32;
                    cohort
                })
                .collect();
            Ladder { sex, cohorts }
        })
        .collect()
}
