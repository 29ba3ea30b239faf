//! Leaderboard calculation engine.
//!
//! Turns a roster snapshot and event configurations into ranked standings:
//! - Event ordering rules per scoring mode
//! - Division cohorts and cross-division placement ladders
//! - Missing-result penalties and total points
//! - Display filters and the final participation/points order
//!
//! Every call works on its own copies of the input and keeps no state, so the
//! engine can be called from several threads at once.

pub mod classifier;
pub mod cohort;
pub mod points;
pub mod ranker;
pub mod standings;

use tracing::debug;

use crate::models::{Competitor, EventConfigs, LeaderboardFilter, RankedCompetitor};

pub use classifier::ResultOrder;
pub use cohort::CohortGrouping;
pub use standings::leaderboard_order;

/// Rank the whole roster. Rows come back in roster order, unfiltered.
pub fn rank_roster(
    roster: &[Competitor],
    configs: &EventConfigs,
    grouping: CohortGrouping,
) -> Vec<RankedCompetitor> {
    let ladders = cohort::partition(roster, grouping);
    let placements = ranker::rank_events(roster, configs, &ladders);
    let live = configs.live_events(roster);
    debug!(
        "Ranking {} competitors ({} grouping), live events: {:?}",
        roster.len(),
        grouping,
        live
    );
    let tallies = points::aggregate(roster, &live, &ladders, &placements);

    roster
        .iter()
        .zip(tallies)
        .enumerate()
        .map(|(index, (competitor, tally))| RankedCompetitor {
            competitor: competitor.clone(),
            placements: placements.row(index),
            total_points: tally.total_points,
            participation: tally.participation,
        })
        .collect()
}

/// Compute the displayed leaderboard with the default division grouping.
pub fn calculate_rankings(
    roster: &[Competitor],
    configs: &EventConfigs,
    filter: &LeaderboardFilter,
) -> Vec<RankedCompetitor> {
    calculate_rankings_grouped(roster, configs, filter, CohortGrouping::default())
}

/// Compute the displayed leaderboard with an explicit cohort grouping.
pub fn calculate_rankings_grouped(
    roster: &[Competitor],
    configs: &EventConfigs,
    filter: &LeaderboardFilter,
    grouping: CohortGrouping,
) -> Vec<RankedCompetitor> {
    standings::standings(rank_roster(roster, configs, grouping), filter)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        AgeBracket, Division, EventConfig, EventResult, EventSlot, ScoringMode, Sex, EVENT_COUNT,
    };
    use pretty_assertions::assert_eq;

    fn athlete(name: &str) -> Competitor {
        Competitor::new(name, Division::Rx, Sex::Male).with_age(25)
    }

    fn reps() -> EventConfigs {
        EventConfigs::uniform(ScoringMode::HigherIsBetter, true)
    }

    fn all() -> LeaderboardFilter {
        LeaderboardFilter::default()
    }

    fn find<'a>(rows: &'a [RankedCompetitor], name: &str) -> &'a RankedCompetitor {
        rows.iter().find(|r| r.name() == name).unwrap()
    }

    fn names(rows: &[RankedCompetitor]) -> Vec<&str> {
        rows.iter().map(|r| r.name()).collect()
    }

    #[test]
    fn test_unpublished_events_award_nothing() {
        let roster = vec![
            athlete("A").with_score(EventSlot::W1, 100.0),
            athlete("B").with_score(EventSlot::W1, 200.0),
        ];
        let configs = EventConfigs::uniform(ScoringMode::HigherIsBetter, false);
        let rows = calculate_rankings(&roster, &configs, &all());

        assert!(rows.iter().all(|r| r.total_points == 0 && r.participation == 0));
    }

    #[test]
    fn test_reps_ranking() {
        let roster = vec![
            athlete("Low").with_score(EventSlot::W1, 100.0),
            athlete("High").with_score(EventSlot::W1, 200.0),
            athlete("Mid").with_score(EventSlot::W1, 150.0),
        ];
        let rows = calculate_rankings(&roster, &reps(), &all());

        assert_eq!(names(&rows), vec!["High", "Mid", "Low"]);
        let w1: Vec<_> = rows.iter().map(|r| r.placement(EventSlot::W1)).collect();
        assert_eq!(w1, vec![Some(1), Some(2), Some(3)]);
    }

    #[test]
    fn test_shared_placement_for_ties() {
        let roster = vec![
            athlete("A").with_score(EventSlot::W1, 150.0),
            athlete("B").with_score(EventSlot::W1, 150.0),
            athlete("C").with_score(EventSlot::W1, 100.0),
        ];
        let rows = calculate_rankings(&roster, &reps(), &all());

        assert_eq!(find(&rows, "A").placement(EventSlot::W1), Some(1));
        assert_eq!(find(&rows, "B").placement(EventSlot::W1), Some(1));
        assert_eq!(find(&rows, "C").placement(EventSlot::W1), Some(3));
    }

    #[test]
    fn test_time_ranking() {
        let roster = vec![
            athlete("Slow").with_score(EventSlot::W1, 600.0),
            athlete("Fast").with_score(EventSlot::W1, 300.0),
            athlete("Mid").with_score(EventSlot::W1, 450.0),
        ];
        let configs = EventConfigs::uniform(ScoringMode::LowerIsBetter, true);
        let rows = calculate_rankings(&roster, &configs, &all());

        assert_eq!(names(&rows), vec!["Fast", "Mid", "Slow"]);
    }

    #[test]
    fn test_division_precedence_in_totals() {
        let roster = vec![
            Competitor::new("Rx-1", Division::Rx, Sex::Male).with_score(EventSlot::W1, 200.0),
            Competitor::new("Rx-2", Division::Rx, Sex::Male).with_score(EventSlot::W1, 100.0),
            Competitor::new("Scaled-1", Division::Scaled, Sex::Male)
                .with_score(EventSlot::W1, 300.0),
            Competitor::new("Scaled-2", Division::Scaled, Sex::Male)
                .with_score(EventSlot::W1, 250.0),
            Competitor::new("Found-1", Division::Foundations, Sex::Male)
                .with_score(EventSlot::W1, 400.0),
        ];
        let rows = calculate_rankings(&roster, &reps(), &all());

        assert_eq!(
            names(&rows),
            vec!["Rx-1", "Rx-2", "Scaled-1", "Scaled-2", "Found-1"]
        );
        let totals: Vec<u32> = rows.iter().map(|r| r.total_points).collect();
        assert_eq!(totals, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_weak_rx_beats_strong_scaled() {
        let roster = vec![
            Competitor::new("Scaled-High", Division::Scaled, Sex::Male)
                .with_score(EventSlot::W1, 300.0),
            Competitor::new("Rx-Low", Division::Rx, Sex::Male).with_score(EventSlot::W1, 100.0),
        ];
        let rows = calculate_rankings(&roster, &reps(), &all());

        assert!(find(&rows, "Rx-Low").total_points < find(&rows, "Scaled-High").total_points);
        assert_eq!(names(&rows), vec!["Rx-Low", "Scaled-High"]);
    }

    #[test]
    fn test_missing_score_penalty() {
        let roster = vec![
            athlete("Complete")
                .with_score(EventSlot::W1, 150.0)
                .with_score(EventSlot::W2, 200.0)
                .with_score(EventSlot::W3, 100.0),
            athlete("Missing")
                .with_score(EventSlot::W1, 150.0)
                .with_score(EventSlot::W3, 100.0),
        ];
        let rows = calculate_rankings(&roster, &reps(), &all());

        assert_eq!(find(&rows, "Complete").total_points, 3);
        assert_eq!(find(&rows, "Missing").total_points, 5);
    }

    #[test]
    fn test_sum_of_placements() {
        let roster = vec![
            athlete("A")
                .with_score(EventSlot::W1, 200.0)
                .with_score(EventSlot::W2, 100.0)
                .with_score(EventSlot::W3, 150.0),
            athlete("B")
                .with_score(EventSlot::W1, 150.0)
                .with_score(EventSlot::W2, 200.0)
                .with_score(EventSlot::W3, 100.0),
        ];
        let rows = calculate_rankings(&roster, &reps(), &all());

        let a = find(&rows, "A");
        assert_eq!(a.placements, [Some(1), Some(2), Some(1)]);
        assert_eq!(a.total_points, 4);
        let b = find(&rows, "B");
        assert_eq!(b.placements, [Some(2), Some(1), Some(2)]);
        assert_eq!(b.total_points, 5);
    }

    #[test]
    fn test_participation_first() {
        let roster = vec![
            athlete("TwoEvents")
                .with_score(EventSlot::W1, 100.0)
                .with_score(EventSlot::W2, 100.0),
            athlete("ThreeEvents")
                .with_score(EventSlot::W1, 50.0)
                .with_score(EventSlot::W2, 50.0)
                .with_score(EventSlot::W3, 50.0),
        ];
        let rows = calculate_rankings(&roster, &reps(), &all());

        assert_eq!(names(&rows), vec!["ThreeEvents", "TwoEvents"]);
        assert_eq!(rows[0].participation, 3);
        assert_eq!(rows[1].participation, 2);
    }

    #[test]
    fn test_sexes_ranked_together_by_default() {
        let roster = vec![
            Competitor::new("Male-Low", Division::Rx, Sex::Male).with_score(EventSlot::W1, 100.0),
            Competitor::new("Male-High", Division::Rx, Sex::Male).with_score(EventSlot::W1, 200.0),
            Competitor::new("Female-Low", Division::Rx, Sex::Female)
                .with_score(EventSlot::W1, 150.0),
            Competitor::new("Female-High", Division::Rx, Sex::Female)
                .with_score(EventSlot::W1, 250.0),
        ];
        let rows = calculate_rankings(&roster, &reps(), &all());

        assert_eq!(
            names(&rows),
            vec!["Female-High", "Male-High", "Female-Low", "Male-Low"]
        );
    }

    #[test]
    fn test_sex_grouping_ranks_separately() {
        let roster = vec![
            Competitor::new("Male-Low", Division::Rx, Sex::Male).with_score(EventSlot::W1, 100.0),
            Competitor::new("Male-High", Division::Rx, Sex::Male).with_score(EventSlot::W1, 200.0),
            Competitor::new("Female-High", Division::Rx, Sex::Female)
                .with_score(EventSlot::W1, 250.0),
        ];
        let rows =
            calculate_rankings_grouped(&roster, &reps(), &all(), CohortGrouping::DivisionAndSex);

        assert_eq!(find(&rows, "Male-High").placement(EventSlot::W1), Some(1));
        assert_eq!(find(&rows, "Female-High").placement(EventSlot::W1), Some(1));
        assert_eq!(find(&rows, "Male-Low").placement(EventSlot::W1), Some(2));
    }

    #[test]
    fn test_filters() {
        let roster = vec![
            Competitor::new("John Smith", Division::Rx, Sex::Male)
                .with_age(20)
                .with_score(EventSlot::W1, 100.0),
            Competitor::new("Jane Doe", Division::Scaled, Sex::Female)
                .with_age(40)
                .with_score(EventSlot::W1, 200.0),
        ];

        let by_division = LeaderboardFilter {
            division: Some(Division::Rx),
            ..Default::default()
        };
        assert_eq!(
            names(&calculate_rankings(&roster, &reps(), &by_division)),
            vec!["John Smith"]
        );

        let by_sex = LeaderboardFilter {
            sex: Some(Sex::Female),
            ..Default::default()
        };
        assert_eq!(
            names(&calculate_rankings(&roster, &reps(), &by_sex)),
            vec!["Jane Doe"]
        );

        let by_age = LeaderboardFilter {
            age_bracket: Some(AgeBracket::Open),
            ..Default::default()
        };
        assert_eq!(
            names(&calculate_rankings(&roster, &reps(), &by_age)),
            vec!["John Smith"]
        );

        let by_name = LeaderboardFilter {
            search: Some("JOHN".to_string()),
            ..Default::default()
        };
        assert_eq!(
            names(&calculate_rankings(&roster, &reps(), &by_name)),
            vec!["John Smith"]
        );
    }

    #[test]
    fn test_filtered_rows_keep_full_roster_points() {
        let roster = vec![
            Competitor::new("Rx", Division::Rx, Sex::Male).with_score(EventSlot::W1, 100.0),
            Competitor::new("Scaled", Division::Scaled, Sex::Female)
                .with_score(EventSlot::W1, 200.0),
        ];
        let filter = LeaderboardFilter {
            division: Some(Division::Scaled),
            ..Default::default()
        };
        let rows = calculate_rankings(&roster, &reps(), &filter);

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].total_points, 2);
    }

    #[test]
    fn test_mixed_scoring_open_scenario() {
        let configs = EventConfigs::new()
            .with(
                EventConfig::new(EventSlot::W1, "26.1", ScoringMode::CappedCompletion)
                    .with_time_cap(900)
                    .published(),
            )
            .with(
                EventConfig::new(EventSlot::W2, "26.2", ScoringMode::HigherIsBetter)
                    .with_tiebreaker()
                    .published(),
            )
            .with(EventConfig::new(EventSlot::W3, "26.3", ScoringMode::LowerIsBetter).published());

        let roster = vec![
            athlete("Mike")
                .with_score(EventSlot::W1, 480.0)
                .with_result(EventSlot::W2, EventResult::new(150.0).with_tiebreak(300))
                .with_score(EventSlot::W3, 600.0),
            athlete("John")
                .with_score(EventSlot::W1, 520.0)
                .with_result(EventSlot::W2, EventResult::new(150.0).with_tiebreak(360))
                .with_score(EventSlot::W3, 540.0),
            athlete("Dave")
                .with_result(EventSlot::W1, EventResult::new(245.0).capped())
                .with_score(EventSlot::W2, 180.0)
                .with_score(EventSlot::W3, 720.0),
        ];
        let rows = calculate_rankings(&roster, &configs, &all());

        assert_eq!(find(&rows, "Mike").placements, [Some(1), Some(2), Some(2)]);
        assert_eq!(find(&rows, "John").placements, [Some(2), Some(3), Some(1)]);
        assert_eq!(find(&rows, "Dave").placements, [Some(3), Some(1), Some(3)]);

        let totals: Vec<(&str, u32)> = rows.iter().map(|r| (r.name(), r.total_points)).collect();
        assert_eq!(totals, vec![("Mike", 5), ("John", 6), ("Dave", 7)]);
    }

    #[test]
    fn test_empty_roster() {
        assert!(calculate_rankings(&[], &reps(), &all()).is_empty());
    }

    #[test]
    fn test_missing_configs_count_as_disabled() {
        let roster = vec![athlete("A").with_score(EventSlot::W1, 100.0)];
        let rows = calculate_rankings(&roster, &EventConfigs::new(), &all());

        assert_eq!(rows[0].total_points, 0);
        assert_eq!(rows[0].placement(EventSlot::W1), Some(1));
    }

    #[test]
    fn test_input_left_untouched_across_threads() {
        let roster: Vec<Competitor> = (0..40)
            .map(|i| {
                let division = Division::ALL[i % 3];
                let sex = Sex::ALL[i % 2];
                Competitor::new(format!("Athlete {i}"), division, sex)
                    .with_score(EventSlot::W1, ((i * 37) % 50) as f64)
                    .with_score(EventSlot::W2, ((i * 11) % 7) as f64)
            })
            .collect();
        let snapshot = roster.clone();
        let configs = reps();
        let expected = calculate_rankings(&roster, &configs, &all());

        std::thread::scope(|scope| {
            let handles: Vec<_> = (0..4)
                .map(|_| scope.spawn(|| calculate_rankings(&roster, &configs, &all())))
                .collect();
            for handle in handles {
                assert_eq!(handle.join().unwrap(), expected);
            }
        });

        assert_eq!(roster, snapshot);
    }

    fn by_id(rows: &[RankedCompetitor]) -> Vec<(String, [Option<u32>; EVENT_COUNT], u32, u32)> {
        let mut keyed: Vec<_> = rows
            .iter()
            .map(|r| {
                (
                    r.competitor.id.to_string(),
                    r.placements,
                    r.total_points,
                    r.participation,
                )
            })
            .collect();
        keyed.sort();
        keyed
    }

    #[test]
    fn test_roster_order_does_not_change_results() {
        let configs = EventConfigs::new()
            .with(
                EventConfig::new(EventSlot::W1, "26.1", ScoringMode::HigherIsBetter)
                    .with_tiebreaker()
                    .published(),
            )
            .with(
                EventConfig::new(EventSlot::W2, "26.2", ScoringMode::CappedCompletion)
                    .with_time_cap(900)
                    .published(),
            );

        let roster = vec![
            athlete("T300").with_result(EventSlot::W1, EventResult::new(150.0).with_tiebreak(300)),
            athlete("NoTiebreak").with_score(EventSlot::W1, 150.0),
            athlete("T500")
                .with_result(EventSlot::W1, EventResult::new(150.0).with_tiebreak(500))
                .with_result(EventSlot::W2, EventResult::new(200.0).capped()),
            Competitor::new("Scaled", Division::Scaled, Sex::Female)
                .with_score(EventSlot::W1, 150.0)
                .with_score(EventSlot::W2, 600.0),
            Competitor::new("Scaled-T", Division::Scaled, Sex::Male)
                .with_result(EventSlot::W1, EventResult::new(150.0).with_tiebreak(200)),
            athlete("Finisher").with_score(EventSlot::W2, 480.0),
        ];
        let expected = by_id(&calculate_rankings(&roster, &configs, &all()));

        let t500 = calculate_rankings(&roster, &configs, &all());
        assert_eq!(find(&t500, "T300").placement(EventSlot::W1), Some(1));
        assert_eq!(find(&t500, "T500").placement(EventSlot::W1), Some(2));
        assert_eq!(find(&t500, "NoTiebreak").placement(EventSlot::W1), Some(3));
        assert_eq!(find(&t500, "Scaled-T").placement(EventSlot::W1), Some(5));
        assert_eq!(find(&t500, "Scaled").placement(EventSlot::W1), Some(6));

        let mut reversed = roster.clone();
        reversed.reverse();
        assert_eq!(by_id(&calculate_rankings(&reversed, &configs, &all())), expected);

        for shift in 1..roster.len() {
            let mut rotated = roster.clone();
            rotated.rotate_left(shift);
            assert_eq!(by_id(&calculate_rankings(&rotated, &configs, &all())), expected);
        }

        let mut swapped = roster.clone();
        swapped.swap(0, 1);
        swapped.swap(2, 4);
        assert_eq!(by_id(&calculate_rankings(&swapped, &configs, &all())), expected);
    }
}
