//! Per-event placement ladders.

use tracing::debug;

use super::classifier::ResultOrder;
use super::cohort::Ladder;
use crate::models::{Competitor, EventConfigs, EventSlot, EVENT_COUNT};

/// Placements per roster index and event slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placements(Vec<[Option<u32>; EVENT_COUNT]>);

impl Placements {
    fn new(len: usize) -> Self {
        Self(vec![[None; EVENT_COUNT]; len])
    }

    pub fn get(&self, index: usize, slot: EventSlot) -> Option<u32> {
        self.0.get(index).and_then(|row| row[slot.index()])
    }

    pub fn row(&self, index: usize) -> [Option<u32>; EVENT_COUNT] {
        self.0.get(index).copied().unwrap_or([None; EVENT_COUNT])
    }
}

/// Rank every event over every ladder, whether or not the event is live.
pub fn rank_events(roster: &[Competitor], configs: &EventConfigs, ladders: &[Ladder]) -> Placements {
    let mut placements = Placements::new(roster.len());

    for slot in EventSlot::ALL {
        let order = configs
            .get(slot)
            .map(ResultOrder::for_event)
            .unwrap_or_else(ResultOrder::fallback);

        for ladder in ladders {
            for cohort in &ladder.cohorts {
                for (index, place) in rank_cohort(roster, &cohort.members, slot, order) {
                    placements.0[index][slot.index()] = Some(place + cohort.offset);
                }
            }
        }
        debug!("Ranked {} with {:?}", slot, order);
    }

    placements
}

/// Sort one cohort for one event and assign standard competition ranks
/// (1, 1, 3, ...). Returns `(roster index, placement)` pairs in finishing order.
pub fn rank_cohort(
    roster: &[Competitor],
    members: &[usize],
    slot: EventSlot,
    order: ResultOrder,
) -> Vec<(usize, u32)> {
    let mut sorted = members.to_vec();
    sorted.sort_by(|&a, &b| order.compare(roster[a].result(slot), roster[b].result(slot)));

    let mut ranked: Vec<(usize, u32)> = Vec::with_capacity(sorted.len());
    for (position, &index) in sorted.iter().enumerate() {
        let place = match ranked.last() {
            Some(&(prev, prev_place))
                if order.ties(roster[prev].result(slot), roster[index].result(slot)) =>
            {
                prev_place
            }
            _ => position as u32 + 1,
        };
        ranked.push((index, place));
    }
    ranked
}
