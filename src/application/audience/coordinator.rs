//! AudienceCoordinator - Runs audience rounds on a fixed period.
//!
//! Every step talks to an external capability that may fail. None of those
//! failures abort the round: intake or moderation failure falls back to the
//! default event pool, a failed vote picks the first candidate.

use std::sync::Arc;

use crate::domain::audience::{
    AudienceEvent, AudienceRoundState, AudienceStatistics, EventCandidate, EventSlate,
    SuggestionRecord,
};
use crate::domain::foundation::{Timestamp, ValidationError};
use crate::ports::{EventModerator, SuggestionSource, VoteCollector, VoteOutcome};

/// Round settings taken from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AudienceSettings {
    pub vote_frequency: u64,
    pub max_suggestions: usize,
}

impl Default for AudienceSettings {
    fn default() -> Self {
        Self {
            vote_frequency: 5,
            max_suggestions: 10,
        }
    }
}

/// Coordinates audience rounds and owns their state.
pub struct AudienceCoordinator {
    suggestions: Arc<dyn SuggestionSource>,
    moderator: Arc<dyn EventModerator>,
    voter: Arc<dyn VoteCollector>,
    max_suggestions: usize,
    state: AudienceRoundState,
}

impl AudienceCoordinator {
    /// # Errors
    ///
    /// `ValidationError` when the vote frequency is zero.
    pub fn new(
        suggestions: Arc<dyn SuggestionSource>,
        moderator: Arc<dyn EventModerator>,
        voter: Arc<dyn VoteCollector>,
        settings: AudienceSettings,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            suggestions,
            moderator,
            voter,
            max_suggestions: settings.max_suggestions,
            state: AudienceRoundState::new(settings.vote_frequency)?,
        })
    }

    /// Counts the current turn; true when a round is due.
    pub fn should_trigger(&mut self) -> bool {
        self.state.should_trigger()
    }

    /// Runs one full round and returns the constraint for the responder.
    ///
    /// Never fails and never returns an empty constraint.
    pub async fn run_round(&mut self, context: &str, objective: &str) -> String {
        tracing::info!(turn = self.state.turn_counter(), "audience round started");

        let slate = self.select_candidates(context, objective).await;
        let (winner, votes) = self.resolve_vote(&slate).await;

        let event = AudienceEvent::from_winner(winner, votes, Timestamp::now());
        tracing::info!(event = %event.event, votes = event.votes, "audience event selected");

        self.state.record_event(event)
    }

    async fn select_candidates(&mut self, context: &str, objective: &str) -> EventSlate {
        let suggestions = match self.suggestions.collect(self.max_suggestions).await {
            Ok(suggestions) => suggestions,
            Err(e) => {
                tracing::warn!("Suggestion intake failed, using default events: {}", e);
                return EventSlate::defaults();
            }
        };

        let suggestions: Vec<String> = suggestions
            .into_iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .take(self.max_suggestions)
            .collect();
        self.state.record_suggestions(&suggestions, Timestamp::now());

        let candidates = if suggestions.is_empty() {
            tracing::info!("no audience suggestions, generating events from context");
            self.moderator.generate_fallback_events(context).await
        } else {
            tracing::info!(count = suggestions.len(), "moderating audience suggestions");
            self.moderator
                .filter_and_select(&suggestions, context, objective)
                .await
        };

        match candidates {
            Ok(candidates) => EventSlate::from_candidates(candidates),
            Err(e) => {
                if e.is_transient() {
                    tracing::warn!("Event moderation failed, using default events: {}", e);
                } else {
                    tracing::error!("Event moderation failed, using default events: {}", e);
                }
                EventSlate::defaults()
            }
        }
    }

    async fn resolve_vote<'s>(&self, slate: &'s EventSlate) -> (&'s EventCandidate, u32) {
        let fallback = VoteOutcome::new(0, 0);
        let outcome = match self.voter.conduct(slate.candidates()).await {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::warn!("Vote failed, picking the first candidate: {}", e);
                fallback
            }
        };

        match slate.get(outcome.index) {
            Some(winner) => (winner, outcome.votes),
            None => {
                tracing::warn!(index = outcome.index, "Vote returned an unknown candidate");
                (&slate.candidates()[0], 0)
            }
        }
    }

    /// The constraint waiting to be delivered, if any.
    pub fn current_constraint(&self) -> Option<&str> {
        self.state.current_constraint()
    }

    pub fn clear_constraint(&mut self) {
        self.state.clear_constraint();
    }

    /// Zeroes the turn counter and drops the active event. Logs survive.
    pub fn reset(&mut self) {
        self.state.reset();
    }

    pub fn clear_history(&mut self) {
        self.state.clear_history();
    }

    pub fn statistics(&self) -> AudienceStatistics {
        self.state.statistics()
    }

    pub fn suggestion_history(&self) -> &[SuggestionRecord] {
        self.state.suggestion_history()
    }

    pub fn event_history(&self) -> &[AudienceEvent] {
        self.state.event_history()
    }

    /// Pretty-printed audit export of suggestions and events.
    pub fn history_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.state.history())
    }

    pub fn vote_frequency(&self) -> u64 {
        self.state.vote_frequency()
    }
}
