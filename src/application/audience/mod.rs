//! Audience rounds: suggestion intake, moderation, vote and constraint.

mod coordinator;

pub use coordinator::{AudienceCoordinator, AudienceSettings};
