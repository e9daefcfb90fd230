//! Event Moderator Port - Filters audience suggestions into vote candidates.

use async_trait::async_trait;

use crate::domain::audience::EventCandidate;

use super::GenerationError;

/// Port for turning raw audience input into candidate events.
#[async_trait]
pub trait EventModerator: Send + Sync {
    /// Picks up to three appropriate events out of the suggestions.
    async fn filter_and_select(
        &self,
        suggestions: &[String],
        context: &str,
        objective: &str,
    ) -> Result<Vec<EventCandidate>, ModerationError>;

    /// Invents events from the context alone, used when nobody suggested anything.
    async fn generate_fallback_events(
        &self,
        context: &str,
    ) -> Result<Vec<EventCandidate>, ModerationError>;
}

/// Moderation errors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ModerationError {
    #[error("moderation call failed: {0}")]
    Generation(#[from] GenerationError),
}

impl ModerationError {
    pub fn is_transient(&self) -> bool {
        match self {
            ModerationError::Generation(e) => e.is_transient(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transience_follows_the_generation_error() {
        assert!(ModerationError::from(GenerationError::network("reset")).is_transient());
        assert!(!ModerationError::from(GenerationError::parse("garbage")).is_transient());
    }
}
