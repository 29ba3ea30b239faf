//! Display filtering and the final leaderboard order.

use std::cmp::Ordering;

use crate::models::{LeaderboardFilter, RankedCompetitor};

/// Participation first (more is better), then total points (fewer is better).
pub fn leaderboard_order(a: &RankedCompetitor, b: &RankedCompetitor) -> Ordering {
    b.participation
        .cmp(&a.participation)
        .then_with(|| a.total_points.cmp(&b.total_points))
}

/// Keep competitors passing the filter, in leaderboard order. The sort is
/// stable, so equal rows keep roster order.
pub fn standings(ranked: Vec<RankedCompetitor>, filter: &LeaderboardFilter) -> Vec<RankedCompetitor> {
    let mut rows: Vec<RankedCompetitor> = ranked
        .into_iter()
        .filter(|row| filter.matches(&row.competitor))
        .collect();
    rows.sort_by(leaderboard_order);
    rows
}
