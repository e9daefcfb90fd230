//! Audience events and their projection into a responder constraint.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::Timestamp;

/// A proposed disruptive event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventCandidate {
    /// Short label, e.g. "The doorbell rings".
    pub label: String,
    /// One-sentence consequence.
    pub description: String,
}

impl EventCandidate {
    pub fn new(label: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            description: description.into(),
        }
    }
}

/// The winning event of a vote.
///
/// Created once per round and appended to the event log; never modified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudienceEvent {
    pub event: String,
    pub description: String,
    pub votes: u32,
    pub timestamp: Timestamp,
}

impl AudienceEvent {
    /// Records a winning candidate.
    pub fn from_winner(candidate: &EventCandidate, votes: u32, timestamp: Timestamp) -> Self {
        Self {
            event: candidate.label.clone(),
            description: candidate.description.clone(),
            votes,
            timestamp,
        }
    }

    /// Projects the event into the directive fragment for the responder.
    pub fn constraint(&self) -> String {
        format!(
            "DISRUPTIVE EVENT (AUDIENCE):\n\
             {}\n\
             \n\
             Consequence: {}\n\
             \n\
             You MUST weave this event naturally into your next reply.\n\
             Use it to stall for time and unsettle the scammer.",
            self.event, self.description
        )
    }
}

/// Counters exposed for the status screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AudienceStatistics {
    pub total_turns: u64,
    pub total_suggestions: usize,
    pub total_events: usize,
    pub last_event: Option<AudienceEvent>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constraint_contains_label_consequence_and_instruction() {
        let candidate = EventCandidate::new("The doorbell rings", "The postman is at the door");
        let event = AudienceEvent::from_winner(&candidate, 42, Timestamp::now());

        let constraint = event.constraint();

        assert!(constraint.starts_with("DISRUPTIVE EVENT (AUDIENCE):\nThe doorbell rings\n"));
        assert!(constraint.contains("Consequence: The postman is at the door"));
        assert!(constraint.contains("weave this event naturally into your next reply"));
    }

    #[test]
    fn from_winner_copies_candidate() {
        let candidate = EventCandidate::new("Cough", "Needs water");
        let event = AudienceEvent::from_winner(&candidate, 7, Timestamp::now());

        assert_eq!(event.event, "Cough");
        assert_eq!(event.description, "Needs water");
        assert_eq!(event.votes, 7);
    }
}
