//! Simulated audience for demos and tests.

use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Mutex;

use crate::domain::audience::EventCandidate;
use crate::ports::{AudienceError, SuggestionSource, VoteCollector, VoteOutcome};

pub const SIMULATED_SUGGESTIONS: &[&str] = &[
    "The dog starts barking like mad",
    "The doorbell rings, it's the postman",
    "Jeanne spills her coffee on herself",
    "Jeanne's mobile phone rings",
    "A neighbour shouts for help",
    "The television turns itself on",
    "Jeanne urgently needs the bathroom",
    "The oven timer goes off",
];

/// Returns the same canned suggestions every round.
#[derive(Debug, Clone)]
pub struct SimulatedSuggestionSource {
    suggestions: Vec<String>,
}

impl Default for SimulatedSuggestionSource {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulatedSuggestionSource {
    pub fn new() -> Self {
        Self::with_suggestions(SIMULATED_SUGGESTIONS.iter().map(|s| s.to_string()))
    }

    pub fn with_suggestions(suggestions: impl IntoIterator<Item = String>) -> Self {
        Self {
            suggestions: suggestions.into_iter().collect(),
        }
    }
}

#[async_trait]
impl SuggestionSource for SimulatedSuggestionSource {
    async fn collect(&self, max: usize) -> Result<Vec<String>, AudienceError> {
        Ok(self.suggestions.iter().take(max).cloned().collect())
    }
}

/// Draws a random tally in 10..=100 for each candidate; first maximum wins.
pub struct SimulatedVoteCollector {
    rng: Mutex<StdRng>,
}

impl Default for SimulatedVoteCollector {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulatedVoteCollector {
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Deterministic tallies for a given seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    fn draw(&self, count: usize) -> Vec<u32> {
        let mut rng = self
            .rng
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        (0..count).map(|_| rng.gen_range(10..=100)).collect()
    }
}

/// Index and value of the first maximum.
fn first_max(tallies: &[u32]) -> Option<(usize, u32)> {
    tallies
        .iter()
        .copied()
        .enumerate()
        .fold(None, |best, (i, votes)| match best {
            Some((_, top)) if top >= votes => best,
            _ => Some((i, votes)),
        })
}

#[async_trait]
impl VoteCollector for SimulatedVoteCollector {
    async fn conduct(&self, candidates: &[EventCandidate]) -> Result<VoteOutcome, AudienceError> {
        let tallies = self.draw(candidates.len());
        let (index, votes) = first_max(&tallies).ok_or(AudienceError::NoCandidates)?;

        for (candidate, tally) in candidates.iter().zip(&tallies) {
            tracing::info!(event = %candidate.label, votes = tally, "simulated vote");
        }

        Ok(VoteOutcome::new(index, votes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn candidates() -> Vec<EventCandidate> {
        vec![
            EventCandidate::new("a", "a"),
            EventCandidate::new("b", "b"),
            EventCandidate::new("c", "c"),
        ]
    }

    #[tokio::test]
    async fn canned_suggestions_respect_limit() {
        let source = SimulatedSuggestionSource::new();

        assert_eq!(source.collect(10).await.unwrap().len(), 8);
        assert_eq!(source.collect(3).await.unwrap().len(), 3);
    }

    #[test]
    fn first_max_breaks_ties_by_position() {
        assert_eq!(first_max(&[40, 90, 90]), Some((1, 90)));
        assert_eq!(first_max(&[100, 10, 100]), Some((0, 100)));
        assert_eq!(first_max(&[]), None);
    }

    #[tokio::test]
    async fn seeded_votes_are_deterministic() {
        let first = SimulatedVoteCollector::seeded(42).conduct(&candidates()).await.unwrap();
        let second = SimulatedVoteCollector::seeded(42).conduct(&candidates()).await.unwrap();

        assert_eq!(first, second);
        assert!(first.index < 3);
        assert!((10..=100).contains(&first.votes));
    }

    #[tokio::test]
    async fn no_candidates_is_an_error() {
        let voter = SimulatedVoteCollector::seeded(1);
        assert_eq!(voter.conduct(&[]).await, Err(AudienceError::NoCandidates));
    }

    proptest! {
        #[test]
        fn tallies_stay_in_range(seed in any::<u64>(), count in 1usize..10) {
            let tallies = SimulatedVoteCollector::seeded(seed).draw(count);

            prop_assert_eq!(tallies.len(), count);
            prop_assert!(tallies.iter().all(|v| (10..=100).contains(v)));

            let (index, votes) = first_max(&tallies).unwrap();
            prop_assert_eq!(votes, *tallies.iter().max().unwrap());
            prop_assert!(tallies[..index].iter().all(|v| *v < votes));
        }
    }
}
