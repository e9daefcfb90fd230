//! A source with no audience at all.

use async_trait::async_trait;

use crate::ports::{AudienceError, SuggestionSource};

/// Always returns no suggestions, so rounds use context-generated events.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentSuggestionSource;

#[async_trait]
impl SuggestionSource for SilentSuggestionSource {
    async fn collect(&self, _max: usize) -> Result<Vec<String>, AudienceError> {
        Ok(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn collects_nothing() {
        assert!(SilentSuggestionSource.collect(10).await.unwrap().is_empty());
    }
}
