//! Script Repository Port - Loads scam scenarios.

use async_trait::async_trait;

use crate::domain::foundation::ValidationError;
use crate::domain::scenario::Script;

/// Port for reading scenario definitions.
#[async_trait]
pub trait ScriptRepository: Send + Sync {
    /// Loads and validates one script.
    async fn load(&self, script_id: &str) -> Result<Script, ScriptError>;

    /// Ids of every available script, sorted.
    async fn list(&self) -> Result<Vec<String>, ScriptError>;
}

/// Script loading errors.
#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    #[error("script not found: {0}")]
    NotFound(String),

    #[error("failed to read script {script_id}: {source}")]
    Io {
        script_id: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed script {script_id}: {message}")]
    Malformed { script_id: String, message: String },

    #[error("invalid script: {0}")]
    Invalid(#[from] ValidationError),
}

impl ScriptError {
    pub fn malformed(script_id: impl Into<String>, message: impl ToString) -> Self {
        Self::Malformed {
            script_id: script_id.into(),
            message: message.to_string(),
        }
    }
}
