//! Responder Port - The simulated victim that answers the scammer.

use async_trait::async_trait;
use serde::Serialize;

use super::GenerationError;

/// Port for the victim's dialogue generation.
///
/// The responder owns its own conversational memory, separate from the
/// orchestrator's history.
#[async_trait]
pub trait Responder: Send + Sync {
    /// Produces the victim's reply to one scammer line.
    async fn respond(&self, input: ResponderInput) -> Result<String, ResponderError>;

    /// Forgets every exchanged line and the last objective and constraint.
    async fn reset_memory(&self);

    /// Snapshot of the responder's memory.
    async fn state(&self) -> ResponderState;
}

/// Everything the responder needs for one reply.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponderInput {
    pub scammer_text: String,
    pub objective: String,
    /// Situational guidance for this turn: scenario, stage, reminders.
    pub directive: String,
    /// Empty when no audience event applies to this turn.
    pub audience_constraint: String,
}

impl ResponderInput {
    pub fn new(scammer_text: impl Into<String>, objective: impl Into<String>) -> Self {
        Self {
            scammer_text: scammer_text.into(),
            objective: objective.into(),
            directive: String::new(),
            audience_constraint: String::new(),
        }
    }

    pub fn with_directive(mut self, directive: impl Into<String>) -> Self {
        self.directive = directive.into();
        self
    }

    pub fn with_constraint(mut self, constraint: impl Into<String>) -> Self {
        self.audience_constraint = constraint.into();
        self
    }
}

/// Responder memory snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResponderState {
    pub history_length: usize,
    pub current_objective: Option<String>,
    pub audience_constraint: Option<String>,
}

/// Responder errors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ResponderError {
    #[error("generation failed: {0}")]
    Generation(#[from] GenerationError),

    #[error("responder produced an empty reply")]
    EmptyReply,
}

impl ResponderError {
    pub fn is_transient(&self) -> bool {
        match self {
            ResponderError::Generation(e) => e.is_transient(),
            ResponderError::EmptyReply => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_defaults_to_no_constraint() {
        let input = ResponderInput::new("Hello", "Stay cautious");
        assert!(input.audience_constraint.is_empty());

        let input = input.with_constraint("The doorbell rings");
        assert_eq!(input.audience_constraint, "The doorbell rings");
    }

    #[test]
    fn directive_is_empty_until_set() {
        let input = ResponderInput::new("Hello", "Stay cautious");
        assert!(input.directive.is_empty());

        let input = input.with_directive("Current stage: introduction");
        assert_eq!(input.directive, "Current stage: introduction");
    }

    #[test]
    fn generation_error_converts() {
        let err: ResponderError = GenerationError::AuthenticationFailed.into();
        assert_eq!(err.to_string(), "generation failed: authentication failed");
    }

    #[test]
    fn transience_follows_the_generation_error() {
        assert!(ResponderError::from(GenerationError::rate_limited(5)).is_transient());
        assert!(!ResponderError::from(GenerationError::AuthenticationFailed).is_transient());
        assert!(!ResponderError::EmptyReply.is_transient());
    }
}
