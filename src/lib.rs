//! The Beer Distribution Game: a four-tier supply chain where the player
//! runs the factory for 26 weeks.
//!
//! [`simulation::engine`] holds the weekly state transition,
//! [`scoreboard`] turns finished games into a top-5 leaderboard.

pub mod error;
pub mod io;
pub mod model;
pub mod scoreboard;
pub mod simulation;
pub mod strategy;

pub use error::GameError;
pub use model::order::FactoryOrder;
pub use model::state::{SimulationState, Tier, WeekSnapshot};
pub use scoreboard::leaderboard::{compute_score, Leaderboard, ScoreEntry};
pub use scoreboard::service::{ScoreReport, ScoreboardService};
pub use simulation::chance::{ChanceSource, RandomChance, ScriptedChance};
pub use simulation::engine::{advance, initial_state, maybe_trigger_campaign, GameSession, TurnOutcome};
