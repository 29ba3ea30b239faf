//! Per-event result ordering.
//!
//! An event's scoring mode is resolved once into a [`ResultOrder`]; the ranker
//! then sorts with it without looking at the configuration again.

use std::cmp::Ordering;

use crate::models::{EventConfig, EventResult, ScoringMode};

/// Comparison rule for one event. `Less` means the left result ranks first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultOrder {
    HigherIsBetter { tiebreak: bool },
    LowerIsBetter { tiebreak: bool },
    CappedCompletion,
}

impl ResultOrder {
    /// Resolve the rule for a configured event.
    pub fn for_event(config: &EventConfig) -> Self {
        let tiebreak = config.has_tiebreaker;
        match config.scoring {
            ScoringMode::HigherIsBetter => ResultOrder::HigherIsBetter { tiebreak },
            ScoringMode::LowerIsBetter => ResultOrder::LowerIsBetter { tiebreak },
            ScoringMode::CappedCompletion => ResultOrder::CappedCompletion,
        }
    }

    /// Rule used for slots with no configuration.
    pub fn fallback() -> Self {
        ResultOrder::HigherIsBetter { tiebreak: false }
    }

    /// Order two results. Missing results sink below every submission and tie
    /// with each other.
    pub fn compare(&self, a: &EventResult, b: &EventResult) -> Ordering {
        match (a.is_submitted(), b.is_submitted()) {
            (false, false) => return Ordering::Equal,
            (false, true) => return Ordering::Greater,
            (true, false) => return Ordering::Less,
            (true, true) => {}
        }

        match self {
            ResultOrder::HigherIsBetter { tiebreak } => {
                let primary = b.score().total_cmp(&a.score());
                if *tiebreak {
                    primary.then_with(|| compare_tiebreak(a, b))
                } else {
                    primary
                }
            }
            ResultOrder::LowerIsBetter { tiebreak } => {
                let primary = a.score().total_cmp(&b.score());
                if *tiebreak {
                    primary.then_with(|| compare_tiebreak(a, b))
                } else {
                    primary
                }
            }
            ResultOrder::CappedCompletion => match (a.capped, b.capped) {
                (false, false) => a.score().total_cmp(&b.score()),
                (false, true) => Ordering::Less,
                (true, false) => Ordering::Greater,
                (true, true) => b
                    .score()
                    .total_cmp(&a.score())
                    .then_with(|| compare_tiebreak(a, b)),
            },
        }
    }

    /// Whether two results share a placement.
    pub fn ties(&self, a: &EventResult, b: &EventResult) -> bool {
        self.compare(a, b) == Ordering::Equal
    }
}

/// Faster tiebreak wins and a recorded time beats none. Only equal times
/// (or two missing ones) tie, so the order stays total.
fn compare_tiebreak(a: &EventResult, b: &EventResult) -> Ordering {
    match (a.tiebreak, b.tiebreak) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
