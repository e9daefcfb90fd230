//! Adapters - Implementations of port interfaces.
//!
//! - `ai` - Text generation (OpenAI, mock)
//! - `victim` - The victim responder built on a text generator
//! - `moderator` - Audience event moderation built on a text generator
//! - `audience` - Console, simulated and silent audiences
//! - `scripts` - Scenario files on disk

pub mod ai;
pub mod audience;
pub mod moderator;
pub mod scripts;
pub mod victim;
