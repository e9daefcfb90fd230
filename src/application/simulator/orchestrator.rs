//! ScamSimulator - Drives one conversation turn at a time.
//!
//! A turn runs strictly in this order:
//!
//! 1. record the scammer line
//! 2. analyze the full history (stage, objective, risk)
//! 3. run an audience round if one is due
//! 4. ask the responder for the victim's reply
//! 5. record the reply
//!
//! The simulator is the boundary of recoverability: responder failures
//! become an apology line and analysis failures fall back to the entry
//! stage. The turn still counts in both cases.

use std::sync::Arc;

use serde::Serialize;

use crate::application::audience::AudienceCoordinator;
use crate::domain::audience::AudienceStatistics;
use crate::domain::director::{analyze_conversation, score_risk, DirectorError, DirectorUpdate};
use crate::domain::foundation::{ScriptId, SessionId};
use crate::domain::scenario::{ConversationHistory, Script};
use crate::ports::{Responder, ResponderInput, ResponderState};

use super::errors::SimulatorError;

/// Victim line used when the responder fails.
pub const FALLBACK_RESPONSE: &str =
    "Oh dear... I'm sorry, I got confused. Could you repeat that please?";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulatorSettings {
    /// Turns allowed before a reset is required.
    pub max_conversation_turns: u64,
}

impl Default for SimulatorSettings {
    fn default() -> Self {
        Self {
            max_conversation_turns: 50,
        }
    }
}

/// Result of one turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnOutcome {
    pub turn: u64,
    pub response: String,
    pub update: DirectorUpdate,
    /// Constraint delivered to the responder this turn, if any.
    pub audience_constraint: Option<String>,
    /// True when the response is the apology fallback.
    pub used_fallback: bool,
}

/// Snapshot for the `status` command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SimulationStatus {
    pub session_id: SessionId,
    pub script_id: ScriptId,
    pub script_title: String,
    pub turn_count: u64,
    pub max_turns: u64,
    pub message_count: usize,
    pub last_update: Option<DirectorUpdate>,
    pub audience: Option<AudienceStatistics>,
}

pub struct ScamSimulator {
    session_id: SessionId,
    script: Script,
    history: ConversationHistory,
    responder: Arc<dyn Responder>,
    audience: Option<AudienceCoordinator>,
    settings: SimulatorSettings,
    turn_count: u64,
    last_update: Option<DirectorUpdate>,
}

impl ScamSimulator {
    pub fn new(script: Script, responder: Arc<dyn Responder>, settings: SimulatorSettings) -> Self {
        Self {
            session_id: SessionId::new(),
            script,
            history: ConversationHistory::new(),
            responder,
            audience: None,
            settings,
            turn_count: 0,
            last_update: None,
        }
    }

    /// Enables audience rounds.
    pub fn with_audience(mut self, coordinator: AudienceCoordinator) -> Self {
        self.audience = Some(coordinator);
        self
    }

    /// Plays one scammer line and returns the victim's reply.
    ///
    /// # Errors
    ///
    /// - `EmptyInput` for a blank line
    /// - `TurnLimitReached` once the session is full
    ///
    /// Neither error changes any state.
    pub async fn run_turn(&mut self, scammer_text: &str) -> Result<TurnOutcome, SimulatorError> {
        let scammer_text = scammer_text.trim();
        if scammer_text.is_empty() {
            return Err(SimulatorError::EmptyInput);
        }
        if self.turn_count >= self.settings.max_conversation_turns {
            return Err(SimulatorError::TurnLimitReached {
                limit: self.settings.max_conversation_turns,
            });
        }

        self.history.push_scammer(scammer_text);
        self.turn_count += 1;

        let update = self.analyze();
        tracing::info!(
            session_id = %self.session_id,
            turn = self.turn_count,
            stage_id = %update.stage_id,
            risk_level = update.risk_level.value(),
            "turn analyzed"
        );

        let audience_constraint = self.audience_constraint(&update, scammer_text).await;

        let input = ResponderInput::new(scammer_text, update.next_objective_for_victim.clone())
            .with_directive(update.dynamic_context_from_director.clone())
            .with_constraint(audience_constraint.clone().unwrap_or_default());
        let result = self.responder.respond(input).await;

        if audience_constraint.is_some() {
            if let Some(audience) = self.audience.as_mut() {
                audience.clear_constraint();
            }
        }

        let (response, used_fallback) = match result {
            Ok(response) => (response, false),
            Err(e) if e.is_transient() => {
                tracing::warn!("Responder failed, using fallback line: {}", e);
                (FALLBACK_RESPONSE.to_string(), true)
            }
            Err(e) => {
                tracing::error!("Responder failed, using fallback line: {}", e);
                (FALLBACK_RESPONSE.to_string(), true)
            }
        };

        self.history.push_victim(response.clone());
        self.last_update = Some(update.clone());

        Ok(TurnOutcome {
            turn: self.turn_count,
            response,
            update,
            audience_constraint,
            used_fallback,
        })
    }

    fn analyze(&self) -> DirectorUpdate {
        analyze_conversation(&self.history, &self.script)
            .unwrap_or_else(|e| self.entry_update_after(e))
    }

    /// Analysis and script disagree. Logged as a bug; the turn goes on at
    /// the entry stage.
    fn entry_update_after(&self, error: DirectorError) -> DirectorUpdate {
        tracing::error!(
            session_id = %self.session_id,
            "Director analysis failed, falling back to entry stage: {}",
            error
        );
        DirectorUpdate::entry(&self.script, score_risk(&self.history))
    }

    async fn audience_constraint(
        &mut self,
        update: &DirectorUpdate,
        scammer_text: &str,
    ) -> Option<String> {
        let audience = self.audience.as_mut()?;

        if audience.should_trigger() {
            let context = format!(
                "Script: {}\nStage: {}\nLast scammer line: {}",
                self.script.title(),
                update.stage_id,
                scammer_text
            );
            audience
                .run_round(&context, &update.next_objective_for_victim)
                .await;
        }

        audience
            .current_constraint()
            .filter(|c| !c.is_empty())
            .map(str::to_string)
    }

    /// Starts over: empty history, fresh responder memory, turn zero.
    ///
    /// Audience logs are kept; the audience counter and constraint are reset.
    pub async fn reset(&mut self) {
        self.history.clear();
        self.responder.reset_memory().await;
        self.last_update = None;
        self.turn_count = 0;
        if let Some(audience) = self.audience.as_mut() {
            audience.reset();
        }
        self.session_id = SessionId::new();
        tracing::info!(session_id = %self.session_id, "simulation reset");
    }

    pub fn status(&self) -> SimulationStatus {
        SimulationStatus {
            session_id: self.session_id,
            script_id: self.script.script_id().clone(),
            script_title: self.script.title().to_string(),
            turn_count: self.turn_count,
            max_turns: self.settings.max_conversation_turns,
            message_count: self.history.len(),
            last_update: self.last_update.clone(),
            audience: self.audience.as_ref().map(AudienceCoordinator::statistics),
        }
    }

    pub async fn responder_state(&self) -> ResponderState {
        self.responder.state().await
    }

    pub fn history(&self) -> &ConversationHistory {
        &self.history
    }

    pub fn script(&self) -> &Script {
        &self.script
    }

    pub fn audience(&self) -> Option<&AudienceCoordinator> {
        self.audience.as_ref()
    }

    pub fn turn_count(&self) -> u64 {
        self.turn_count
    }
}
