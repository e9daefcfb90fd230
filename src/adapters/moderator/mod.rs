//! Moderator Adapters - EventModerator backed by a language model.

mod llm_moderator;

pub use llm_moderator::{moderator_system_prompt, LlmEventModerator, ModeratorSettings};
