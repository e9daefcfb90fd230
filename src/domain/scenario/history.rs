//! Conversation history - append-only record of the call.

use serde::{Deserialize, Serialize};

/// Who said a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    /// The human player.
    Scammer,
    /// The simulated elderly victim.
    Victim,
}

impl Speaker {
    pub fn label(&self) -> &'static str {
        match self {
            Speaker::Scammer => "Scammer",
            Speaker::Victim => "Victim",
        }
    }
}

/// A single line of dialogue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub role: Speaker,
    pub content: String,
}

impl Turn {
    pub fn new(role: Speaker, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn scammer(content: impl Into<String>) -> Self {
        Self::new(Speaker::Scammer, content)
    }

    pub fn victim(content: impl Into<String>) -> Self {
        Self::new(Speaker::Victim, content)
    }
}

/// Ordered, append-only sequence of turns.
///
/// Only the simulator mutates it; analysis components receive `&self`.
/// The only way to shrink it is [`ConversationHistory::clear`] on reset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConversationHistory {
    turns: Vec<Turn>,
}

impl ConversationHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a turn.
    pub fn push(&mut self, turn: Turn) {
        self.turns.push(turn);
    }

    pub fn push_scammer(&mut self, content: impl Into<String>) {
        self.push(Turn::scammer(content));
    }

    pub fn push_victim(&mut self, content: impl Into<String>) {
        self.push(Turn::victim(content));
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// All contents joined with spaces and lower-cased.
    pub fn merged_lowercase(&self) -> String {
        self.turns
            .iter()
            .map(|t| t.content.to_lowercase())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Drops every turn.
    pub fn clear(&mut self) {
        self.turns.clear();
    }
}

impl FromIterator<Turn> for ConversationHistory {
    fn from_iter<I: IntoIterator<Item = Turn>>(iter: I) -> Self {
        Self {
            turns: iter.into_iter().collect(),
        }
    }
}
