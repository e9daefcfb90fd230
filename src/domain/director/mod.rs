//! Director Module - Scenario supervision for the victim.
//!
//! Reads the conversation history against the active script and produces a
//! [`DirectorUpdate`] every turn. Everything here is pure: the update is a
//! deterministic function of `(history, script)`.
//!
//! # Components
//!
//! - `progress` - which stage the scammer has reached, which are done
//! - `risk` - how close the call came to a disclosure (0-3)
//! - `directive` - the situational guidance text for the responder
//! - `update` - `analyze_conversation`, composing the three

mod directive;
mod errors;
mod progress;
mod risk;
mod update;

pub use directive::{build_context, DEFENSIVE_REMINDERS};
pub use errors::DirectorError;
pub use progress::{determine_stage, StageProgress};
pub use risk::{score_risk, RiskLevel};
pub use update::{analyze_conversation, DirectorUpdate};
