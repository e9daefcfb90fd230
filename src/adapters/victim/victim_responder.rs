//! VictimResponder - Jeanne, backed by a TextGenerator.
//!
//! Keeps its own memory of the exchange as chat messages. A failed
//! generation leaves the memory untouched, so the next turn sees a clean
//! history and the orchestrator's apology line is never fed back.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::ports::{
    CompletionRequest, Message, MessageRole, Responder, ResponderError, ResponderInput,
    ResponderState, TextGenerator,
};

use super::prompt::{victim_system_prompt, INITIAL_OBJECTIVE};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VictimSettings {
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for VictimSettings {
    fn default() -> Self {
        Self {
            temperature: 0.8,
            max_tokens: 400,
        }
    }
}

#[derive(Debug)]
struct Memory {
    messages: Vec<Message>,
    objective: String,
    last_constraint: Option<String>,
}

impl Memory {
    fn new() -> Self {
        Self {
            messages: Vec::new(),
            objective: INITIAL_OBJECTIVE.to_string(),
            last_constraint: None,
        }
    }
}

pub struct VictimResponder {
    generator: Arc<dyn TextGenerator>,
    settings: VictimSettings,
    memory: Mutex<Memory>,
}

impl VictimResponder {
    pub fn new(generator: Arc<dyn TextGenerator>, settings: VictimSettings) -> Self {
        Self {
            generator,
            settings,
            memory: Mutex::new(Memory::new()),
        }
    }
}

#[async_trait]
impl Responder for VictimResponder {
    async fn respond(&self, input: ResponderInput) -> Result<String, ResponderError> {
        let mut memory = self.memory.lock().await;

        if !input.objective.trim().is_empty() {
            memory.objective = input.objective.trim().to_string();
        }
        let constraint = input.audience_constraint.trim();
        memory.last_constraint = (!constraint.is_empty()).then(|| constraint.to_string());

        let request = CompletionRequest::new()
            .with_system_prompt(victim_system_prompt(
                &memory.objective,
                &input.directive,
                constraint,
            ))
            .with_messages(memory.messages.iter().cloned())
            .with_message(MessageRole::User, input.scammer_text.clone())
            .with_temperature(self.settings.temperature)
            .with_max_tokens(self.settings.max_tokens);

        let response = self.generator.complete(request).await?;
        let reply = response.content.trim().to_string();
        if reply.is_empty() {
            return Err(ResponderError::EmptyReply);
        }

        memory.messages.push(Message::user(input.scammer_text));
        memory.messages.push(Message::assistant(reply.clone()));

        Ok(reply)
    }

    async fn reset_memory(&self) {
        *self.memory.lock().await = Memory::new();
    }

    async fn state(&self) -> ResponderState {
        let memory = self.memory.lock().await;
        ResponderState {
            history_length: memory.messages.len(),
            current_objective: Some(memory.objective.clone()),
            audience_constraint: memory.last_constraint.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::{MockError, MockTextGenerator};
    use crate::ports::GenerationError;

    fn responder(generator: &MockTextGenerator) -> VictimResponder {
        VictimResponder::new(Arc::new(generator.clone()), VictimSettings::default())
    }

    #[tokio::test]
    async fn reply_is_trimmed_and_remembered() {
        let generator = MockTextGenerator::new().with_response("  Allô ? Qui est là ?  \n");
        let victim = responder(&generator);

        let reply = victim
            .respond(ResponderInput::new("Hello, Microsoft here", "Ask who is calling"))
            .await
            .unwrap();

        assert_eq!(reply, "Allô ? Qui est là ?");
        let state = victim.state().await;
        assert_eq!(state.history_length, 2);
        assert_eq!(state.current_objective.as_deref(), Some("Ask who is calling"));
    }

    #[tokio::test]
    async fn request_carries_prompt_memory_and_settings() {
        let generator = MockTextGenerator::new()
            .with_response("Oui ?")
            .with_response("Un virus ?");
        let victim = responder(&generator);

        victim.respond(ResponderInput::new("Hello", "obj")).await.unwrap();
        victim
            .respond(ResponderInput::new("You have a virus", "").with_constraint("The doorbell rings"))
            .await
            .unwrap();

        let calls = generator.get_calls();
        let second = &calls[1];
        let system = second.system_prompt.as_deref().unwrap();
        assert!(system.contains("CURRENT OBJECTIVE: obj"));
        assert!(system.contains("The doorbell rings"));
        assert_eq!(second.temperature, Some(0.8));
        assert_eq!(second.max_tokens, Some(400));

        let roles: Vec<MessageRole> = second.messages.iter().map(|m| m.role).collect();
        assert_eq!(
            roles,
            vec![MessageRole::User, MessageRole::Assistant, MessageRole::User]
        );
        assert_eq!(second.last_user_message(), Some("You have a virus"));
    }

    #[tokio::test]
    async fn constraint_is_not_carried_to_next_reply() {
        let generator = MockTextGenerator::new();
        let victim = responder(&generator);

        victim
            .respond(ResponderInput::new("one", "obj").with_constraint("Jeanne coughs"))
            .await
            .unwrap();
        victim.respond(ResponderInput::new("two", "obj")).await.unwrap();

        let calls = generator.get_calls();
        assert!(!calls[1].system_prompt.as_deref().unwrap().contains("Jeanne coughs"));
        assert!(victim.state().await.audience_constraint.is_none());
    }

    #[tokio::test]
    async fn failure_leaves_memory_untouched() {
        let generator = MockTextGenerator::new().with_error(MockError::Unavailable {
            message: "down".to_string(),
        });
        let victim = responder(&generator);

        let result = victim.respond(ResponderInput::new("Hello", "obj")).await;

        assert_eq!(
            result,
            Err(ResponderError::Generation(GenerationError::unavailable("down")))
        );
        assert_eq!(victim.state().await.history_length, 0);
    }

    #[tokio::test]
    async fn blank_reply_is_an_error() {
        let generator = MockTextGenerator::new().with_response("   ");
        let victim = responder(&generator);

        let result = victim.respond(ResponderInput::new("Hello", "obj")).await;

        assert_eq!(result, Err(ResponderError::EmptyReply));
        assert_eq!(victim.state().await.history_length, 0);
    }

    #[tokio::test]
    async fn reset_memory_restores_initial_state() {
        let generator = MockTextGenerator::new();
        let victim = responder(&generator);
        victim
            .respond(ResponderInput::new("Hello", "Stall"))
            .await
            .unwrap();

        victim.reset_memory().await;

        let state = victim.state().await;
        assert_eq!(state.history_length, 0);
        assert_eq!(state.current_objective.as_deref(), Some(INITIAL_OBJECTIVE));
    }
}
