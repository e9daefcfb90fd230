//! The slate of candidates put to a vote.

use serde::Serialize;

use super::defaults::default_pool;
use super::event::EventCandidate;

/// Number of candidates in every vote.
pub const SLATE_SIZE: usize = 3;

/// Exactly three candidates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct EventSlate([EventCandidate; SLATE_SIZE]);

impl EventSlate {
    /// Builds a slate from whatever the moderator produced.
    ///
    /// With fewer than three candidates the gap is filled from the default
    /// pool, starting at the pool position of the first missing slot: one
    /// parsed event is followed by pool entries 2 and 3. Extra candidates are
    /// dropped.
    pub fn from_candidates(candidates: Vec<EventCandidate>) -> Self {
        let pool = default_pool();
        let mut slots = candidates.into_iter().take(SLATE_SIZE);
        let slate = std::array::from_fn(|i| slots.next().unwrap_or_else(|| pool[i].clone()));
        Self(slate)
    }

    /// The default pool as a slate.
    pub fn defaults() -> Self {
        Self(default_pool())
    }

    pub fn candidates(&self) -> &[EventCandidate] {
        &self.0
    }

    pub fn get(&self, index: usize) -> Option<&EventCandidate> {
        self.0.get(index)
    }

    pub fn into_vec(self) -> Vec<EventCandidate> {
        self.0.into()
    }
}
