//! LlmEventModerator - Filters audience suggestions with a model call.
//!
//! The model is asked for a numbered list (`1. [Label] - impact`), which is
//! parsed leniently. Filtering always hands back exactly three events,
//! padding from the default pool. Fallback generation hands back what it
//! parsed, capped at three, or the default pool when nothing parsed.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::audience::{
    default_pool, format_suggestions, parse_event_list, EventCandidate, EventSlate,
    INSPIRATION_EVENTS, SLATE_SIZE,
};
use crate::ports::{CompletionRequest, EventModerator, MessageRole, ModerationError, TextGenerator};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModeratorSettings {
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for ModeratorSettings {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            max_tokens: 400,
        }
    }
}

/// System prompt with the filtering rules and example events.
pub fn moderator_system_prompt() -> String {
    let examples = INSPIRATION_EVENTS
        .iter()
        .map(|(label, description)| format!("- {}: {}", label, description))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "You moderate disruptive events for an educational phone-scam simulator.\n\
         \n\
         CONTEXT:\n\
         An elderly lady (Mme Jeanne Dubois, 78) is on the phone with a likely scammer. \
         The audience proposes everyday events that disrupt the call and help Jeanne stall.\n\
         \n\
         FILTERING RULES:\n\
         1. REJECT anything violent, vulgar or inappropriate\n\
         2. REJECT impossible or far-fetched events\n\
         3. PREFER realistic everyday events in an elderly person's home\n\
         4. KEEP events consistent with the current conversation\n\
         5. FAVOUR events that are funny and unsettle the scammer\n\
         \n\
         GOOD EXAMPLES:\n\
         {}\n\
         \n\
         ALWAYS REJECT:\n\
         - Physical or verbal violence\n\
         - Sexual or vulgar content\n\
         - Natural disasters or serious accidents\n\
         - Police or authorities arriving\n\
         - Anything that ends the call abruptly\n\
         - Complex technology events (hacking and the like)",
        examples
    )
}

const RESPONSE_FORMAT: &str = "\
Answer format (follow it exactly):
1. [Event name] - One sentence describing the impact
2. [Event name] - One sentence describing the impact
3. [Event name] - One sentence describing the impact";

pub struct LlmEventModerator {
    generator: Arc<dyn TextGenerator>,
    settings: ModeratorSettings,
    system_prompt: String,
}

impl LlmEventModerator {
    pub fn new(generator: Arc<dyn TextGenerator>, settings: ModeratorSettings) -> Self {
        Self {
            generator,
            settings,
            system_prompt: moderator_system_prompt(),
        }
    }

    async fn ask(&self, user_prompt: String) -> Result<Vec<EventCandidate>, ModerationError> {
        let request = CompletionRequest::new()
            .with_system_prompt(self.system_prompt.clone())
            .with_message(MessageRole::User, user_prompt)
            .with_temperature(self.settings.temperature)
            .with_max_tokens(self.settings.max_tokens);

        let response = self.generator.complete(request).await?;
        let events = parse_event_list(&response.content);
        tracing::debug!(parsed = events.len(), "moderator response parsed");
        Ok(events)
    }
}

#[async_trait]
impl EventModerator for LlmEventModerator {
    async fn filter_and_select(
        &self,
        suggestions: &[String],
        context: &str,
        objective: &str,
    ) -> Result<Vec<EventCandidate>, ModerationError> {
        if suggestions.is_empty() {
            return Ok(default_pool().to_vec());
        }

        let prompt = format!(
            "CONVERSATION CONTEXT:\n{}\n\n\
             JEANNE'S CURRENT OBJECTIVE:\n{}\n\n\
             AUDIENCE SUGGESTIONS ({}):\n{}\n\n\
             Your task:\n\
             1. Drop every suggestion that breaks the rules\n\
             2. Judge how well each remaining one fits the context\n\
             3. Select the 3 BEST suggestions\n\
             4. Give each a one-sentence description of its impact\n\n\
             {}\n\n\
             If fewer than 3 suggestions are acceptable, invent fitting events yourself.",
            context,
            objective,
            suggestions.len(),
            format_suggestions(suggestions),
            RESPONSE_FORMAT
        );

        let events = self.ask(prompt).await?;
        Ok(EventSlate::from_candidates(events).into_vec())
    }

    async fn generate_fallback_events(
        &self,
        context: &str,
    ) -> Result<Vec<EventCandidate>, ModerationError> {
        let prompt = format!(
            "CONTEXT:\n{}\n\n\
             Invent 3 realistic, disruptive events that could happen to Jeanne Dubois during this call.\n\
             They must be believable for a 78-year-old lady at home.\n\n\
             {}",
            context, RESPONSE_FORMAT
        );

        let mut events = self.ask(prompt).await?;
        if events.is_empty() {
            return Ok(default_pool().to_vec());
        }
        events.truncate(SLATE_SIZE);
        Ok(events)
    }
}
