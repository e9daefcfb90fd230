//! Victim Adapters - The Responder played by a language model.

mod prompt;
mod victim_responder;

pub use prompt::{victim_system_prompt, INITIAL_OBJECTIVE};
pub use victim_responder::{VictimResponder, VictimSettings};
