//! Total points and participation.

use super::cohort::Ladder;
use super::ranker::Placements;
use crate::models::{Competitor, EventSlot};

/// Aggregate figures for one competitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Tally {
    pub total_points: u32,
    pub participation: u32,
}

/// Sum placements over live events, charging the cohort penalty for missing
/// results. Division precedence is already inside the placements, so it is
/// not added again here.
pub fn aggregate(
    roster: &[Competitor],
    live: &[EventSlot],
    ladders: &[Ladder],
    placements: &Placements,
) -> Vec<Tally> {
    let mut tallies = vec![Tally::default(); roster.len()];
    if live.is_empty() {
        return tallies;
    }

    let mut penalties = vec![0u32; roster.len()];
    for cohort in ladders.iter().flat_map(|ladder| &ladder.cohorts) {
        let penalty = cohort.penalty();
        for &index in &cohort.members {
            penalties[index] = penalty;
        }
    }

    for (index, competitor) in roster.iter().enumerate() {
        let tally = &mut tallies[index];
        for &slot in live {
            if competitor.result(slot).is_submitted() {
                tally.total_points += placements.get(index, slot).unwrap_or(penalties[index]);
                tally.participation += 1;
            } else {
                tally.total_points += penalties[index];
            }
        }
    }

    tallies
}
