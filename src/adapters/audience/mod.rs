//! Audience Adapters - Suggestion sources and vote collectors per mode.
//!
//! - `ConsoleSuggestionSource` / `ConsoleVoteCollector` - one person at the terminal
//! - `SimulatedSuggestionSource` / `SimulatedVoteCollector` - canned input, random votes
//! - `SilentSuggestionSource` - nobody suggests anything

mod console;
mod silent;
mod simulated;

pub use console::{Console, ConsoleSuggestionSource, ConsoleVoteCollector, SharedConsole, StdConsole};
pub use silent::SilentSuggestionSource;
pub use simulated::{SimulatedSuggestionSource, SimulatedVoteCollector, SIMULATED_SUGGESTIONS};
