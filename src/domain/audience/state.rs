//! Audience round state.
//!
//! Owned by the coordinator and mutated only through these methods. Logs
//! are append-only; `reset` leaves them alone, `clear_history` wipes them.

use serde::Serialize;

use crate::domain::foundation::{Timestamp, ValidationError};

use super::event::{AudienceEvent, AudienceStatistics};

/// A raw audience suggestion as received.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SuggestionRecord {
    pub suggestion: String,
    pub timestamp: Timestamp,
}

/// Audit export of both logs.
#[derive(Debug, Clone, Serialize)]
pub struct AudienceHistory<'a> {
    pub suggestions: &'a [SuggestionRecord],
    pub events: &'a [AudienceEvent],
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudienceRoundState {
    turn_counter: u64,
    vote_frequency: u64,
    current_constraint: Option<String>,
    last_event: Option<AudienceEvent>,
    suggestion_history: Vec<SuggestionRecord>,
    event_history: Vec<AudienceEvent>,
}

impl AudienceRoundState {
    /// Creates the state for a vote every `vote_frequency` turns.
    ///
    /// # Errors
    ///
    /// `ValidationError` when `vote_frequency` is zero.
    pub fn new(vote_frequency: u64) -> Result<Self, ValidationError> {
        if vote_frequency == 0 {
            return Err(ValidationError::below_minimum("vote_frequency", 1, 0));
        }

        Ok(Self {
            turn_counter: 0,
            vote_frequency,
            current_constraint: None,
            last_event: None,
            suggestion_history: Vec::new(),
            event_history: Vec::new(),
        })
    }

    /// Counts one turn and reports whether it is a voting turn.
    ///
    /// Call exactly once per orchestrated turn. Extra or missing calls shift
    /// the period away from the real turn numbers.
    pub fn should_trigger(&mut self) -> bool {
        self.turn_counter += 1;
        self.turn_counter % self.vote_frequency == 0
    }

    pub fn turn_counter(&self) -> u64 {
        self.turn_counter
    }

    pub fn vote_frequency(&self) -> u64 {
        self.vote_frequency
    }

    pub fn record_suggestions(&mut self, suggestions: &[String], timestamp: Timestamp) {
        self.suggestion_history
            .extend(suggestions.iter().map(|s| SuggestionRecord {
                suggestion: s.clone(),
                timestamp,
            }));
    }

    /// Logs the winning event and makes it the active constraint.
    ///
    /// Returns the constraint text.
    pub fn record_event(&mut self, event: AudienceEvent) -> String {
        let constraint = event.constraint();
        self.event_history.push(event.clone());
        self.last_event = Some(event);
        self.current_constraint = Some(constraint.clone());
        constraint
    }

    pub fn current_constraint(&self) -> Option<&str> {
        self.current_constraint.as_deref()
    }

    pub fn last_event(&self) -> Option<&AudienceEvent> {
        self.last_event.as_ref()
    }

    /// Idempotent.
    pub fn clear_constraint(&mut self) {
        self.current_constraint = None;
    }

    /// Back to turn zero with no active event. Logs are kept.
    pub fn reset(&mut self) {
        self.turn_counter = 0;
        self.current_constraint = None;
        self.last_event = None;
    }

    pub fn clear_history(&mut self) {
        self.suggestion_history.clear();
        self.event_history.clear();
    }

    pub fn suggestion_history(&self) -> &[SuggestionRecord] {
        &self.suggestion_history
    }

    pub fn event_history(&self) -> &[AudienceEvent] {
        &self.event_history
    }

    pub fn history(&self) -> AudienceHistory<'_> {
        AudienceHistory {
            suggestions: &self.suggestion_history,
            events: &self.event_history,
        }
    }

    pub fn statistics(&self) -> AudienceStatistics {
        AudienceStatistics {
            total_turns: self.turn_counter,
            total_suggestions: self.suggestion_history.len(),
            total_events: self.event_history.len(),
            last_event: self.last_event.clone(),
        }
    }
}
