//! The turn orchestrator and its REPL commands.

mod command;
mod errors;
mod orchestrator;

pub use command::ReplCommand;
pub use errors::SimulatorError;
pub use orchestrator::{
    ScamSimulator, SimulationStatus, SimulatorSettings, TurnOutcome, FALLBACK_RESPONSE,
};
