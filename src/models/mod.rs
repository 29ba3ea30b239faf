//! Core data models for the leaderboard engine.

mod competitor;
mod event_config;
mod filter;
mod ids;
pub mod lenient;
mod ranked;

pub use competitor::*;
pub use event_config::*;
pub use filter::*;
pub use ids::*;
pub use ranked::*;
