//! Scenario module - Scam scripts and the conversation they are played against.
//!
//! - `Script` / `Stage` - immutable, validated scenario definition
//! - `ConversationHistory` - append-only record of scammer and victim lines

mod history;
mod script;

pub use history::{ConversationHistory, Speaker, Turn};
pub use script::{Script, ScriptDocument, Stage, StageDocument, DEFAULT_OBJECTIVE};
