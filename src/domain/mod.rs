//! Domain layer containing the simulation's pure logic and types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared primitives (ids, timestamps, validation errors)
//! - `scenario` - Scam scripts and the conversation history
//! - `director` - Stage progress, risk scoring and the per-turn directive
//! - `audience` - Disruptive events, vote slates and round state

pub mod audience;
pub mod director;
pub mod foundation;
pub mod scenario;
