//! Ports - Interfaces for external capabilities.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the simulation core and the outside world. Adapters implement these ports.
//!
//! ## Generation Ports
//!
//! - `TextGenerator` - Language-model completions
//! - `Responder` - The simulated victim's replies
//! - `EventModerator` - Turns audience suggestions into vote candidates
//!
//! ## Audience Ports
//!
//! - `SuggestionSource` - Free-text event suggestions
//! - `VoteCollector` - Picks the winning candidate
//!
//! ## Storage Ports
//!
//! - `ScriptRepository` - Scenario definitions

mod audience;
mod event_moderator;
mod responder;
mod script_repository;
mod text_generator;

pub use audience::{AudienceError, SuggestionSource, VoteCollector, VoteOutcome};
pub use event_moderator::{EventModerator, ModerationError};
pub use responder::{Responder, ResponderError, ResponderInput, ResponderState};
pub use script_repository::{ScriptError, ScriptRepository};
pub use text_generator::{
    CompletionRequest, CompletionResponse, GenerationError, Message, MessageRole, ProviderInfo,
    TextGenerator,
};
