//! Scenario-wide state and the tick loop that drives triggers and missions

pub mod runner;
pub mod state;

pub use runner::{ScenarioRunner, TickReport};
pub use state::{GlobalFlags, MissionTimer, ScenarioState};
