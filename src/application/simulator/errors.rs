//! Simulator errors.

use thiserror::Error;

/// Errors returned by `ScamSimulator::run_turn`.
///
/// External capability failures never show up here; they are replaced by
/// their fallbacks inside the turn.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SimulatorError {
    #[error("the session reached its limit of {limit} turns, reset to continue")]
    TurnLimitReached { limit: u64 },

    #[error("scammer input cannot be empty")]
    EmptyInput,
}
