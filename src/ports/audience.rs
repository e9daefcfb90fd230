//! Audience Ports - Where suggestions and votes come from.
//!
//! Each mode (console, simulated, silent, or a networked front end) is one
//! implementation chosen at startup. The coordinator only sees these traits.

use async_trait::async_trait;
use serde::Serialize;

use crate::domain::audience::EventCandidate;

/// Port for collecting free-text event suggestions.
#[async_trait]
pub trait SuggestionSource: Send + Sync {
    /// Returns at most `max` suggestions.
    async fn collect(&self, max: usize) -> Result<Vec<String>, AudienceError>;
}

/// Port for resolving a vote between candidates.
#[async_trait]
pub trait VoteCollector: Send + Sync {
    /// Returns the winning index into `candidates` with its tally.
    async fn conduct(&self, candidates: &[EventCandidate]) -> Result<VoteOutcome, AudienceError>;
}

/// Result of a vote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VoteOutcome {
    pub index: usize,
    pub votes: u32,
}

impl VoteOutcome {
    pub fn new(index: usize, votes: u32) -> Self {
        Self { index, votes }
    }
}

/// Audience I/O errors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AudienceError {
    #[error("audience I/O failed: {0}")]
    Io(String),

    #[error("no candidates to vote on")]
    NoCandidates,

    #[error("audience channel closed")]
    Closed,
}

impl From<std::io::Error> for AudienceError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}
