//! Application layer - Orchestrates domain logic through the ports.
//!
//! - `audience` - `AudienceCoordinator`, one round of suggestion, moderation and vote
//! - `simulator` - `ScamSimulator`, the turn loop, and REPL commands

pub mod audience;
pub mod simulator;

pub use audience::{AudienceCoordinator, AudienceSettings};
pub use simulator::{
    ReplCommand, ScamSimulator, SimulationStatus, SimulatorError, SimulatorSettings, TurnOutcome,
    FALLBACK_RESPONSE,
};
