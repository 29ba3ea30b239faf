//! Ranked leaderboard rows.

use serde::{Deserialize, Serialize};

use super::{Competitor, EventSlot, EVENT_COUNT};

/// A competitor with per-event placements and aggregate points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedCompetitor {
    #[serde(flatten)]
    pub competitor: Competitor,

    /// Placement per event slot on the cross-division ladder.
    pub placements: [Option<u32>; EVENT_COUNT],

    /// Sum of placements and penalties over live events (lower is better).
    pub total_points: u32,

    /// Number of live events with a submitted result.
    pub participation: u32,
}

impl RankedCompetitor {
    pub fn new(competitor: Competitor) -> Self {
        Self {
            competitor,
            placements: [None; EVENT_COUNT],
            total_points: 0,
            participation: 0,
        }
    }

    pub fn placement(&self, slot: EventSlot) -> Option<u32> {
        self.placements[slot.index()]
    }

    pub fn name(&self) -> &str {
        &self.competitor.name
    }
}
