//! Audience Module - Disruptive events proposed and voted by the audience.
//!
//! - `EventCandidate` - a label plus one-sentence consequence
//! - `EventSlate` - exactly three candidates put to the vote
//! - `AudienceEvent` - the winner of a vote, immutable once recorded
//! - `AudienceRoundState` - turn counter, active constraint and audit logs
//! - `parse_event_list` - reads the moderator's numbered list format

mod defaults;
mod event;
mod parser;
mod slate;
mod state;

pub use defaults::{default_pool, INSPIRATION_EVENTS};
pub use event::{AudienceEvent, AudienceStatistics, EventCandidate};
pub use parser::{format_suggestions, parse_event_list, DEFAULT_DESCRIPTION};
pub use slate::{EventSlate, SLATE_SIZE};
pub use state::{AudienceHistory, AudienceRoundState, SuggestionRecord};
