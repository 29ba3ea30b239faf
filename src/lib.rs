//! # Open Leaderboard
//!
//! Standings for multi-event fitness competitions.
//!
//! ## Architecture
//!
//! - **models**: Competitors, event configurations, filters, ranked rows
//! - **time**: `MM:SS` duration text codec
//! - **calculate**: The ranking and scoring engine
//! - **config**: Configuration loading and validation
//! - **storage**: Roster and standings files for the command-line front end
//!
//! ```
//! use open_leaderboard::calculate::calculate_rankings;
//! use open_leaderboard::models::{
//!     Competitor, Division, EventConfigs, EventSlot, LeaderboardFilter, ScoringMode, Sex,
//! };
//!
//! let roster = vec![
//!     Competitor::new("Mike", Division::Rx, Sex::Male).with_score(EventSlot::W1, 150.0),
//!     Competitor::new("Jane", Division::Rx, Sex::Female).with_score(EventSlot::W1, 180.0),
//! ];
//! let configs = EventConfigs::uniform(ScoringMode::HigherIsBetter, true);
//!
//! let standings = calculate_rankings(&roster, &configs, &LeaderboardFilter::default());
//! assert_eq!(standings[0].name(), "Jane");
//! assert_eq!(standings[0].total_points, 1);
//! ```

pub mod calculate;
pub mod config;
pub mod models;
pub mod storage;
pub mod time;

pub use models::*;
