//! Simulation configuration

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;

/// Simulation configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SimulationConfig {
    /// Directory holding the scenario files
    #[serde(default = "default_scripts_dir")]
    pub scripts_dir: PathBuf,

    /// Script played when none is given on the command line
    #[serde(default = "default_script")]
    pub default_script: String,

    /// Whether audience rounds run at all
    #[serde(default)]
    pub audience_enabled: bool,

    /// An audience round runs every `vote_frequency` turns
    #[serde(default = "default_vote_frequency")]
    pub vote_frequency: u64,

    /// Cap on suggestions collected per round
    #[serde(default = "default_max_suggestions")]
    pub max_suggestions: usize,

    /// Turns allowed before a reset is required
    #[serde(default = "default_max_turns")]
    pub max_conversation_turns: u64,

    #[serde(default)]
    pub collect_mode: CollectMode,

    #[serde(default)]
    pub vote_mode: VoteMode,
}

/// Where audience suggestions come from
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum CollectMode {
    /// Typed at the terminal
    #[serde(alias = "console")]
    Interactive,
    /// Canned list
    #[default]
    Simulated,
    /// Nobody suggests; events come from the context
    Silent,
}

/// How the winning event is chosen
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum VoteMode {
    /// One voter at the terminal
    #[serde(alias = "console")]
    Interactive,
    /// Random tallies
    #[default]
    Simulated,
}

impl SimulationConfig {
    /// Validate simulation configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.default_script.trim().is_empty() {
            return Err(ValidationError::EmptyScriptId);
        }
        if self.vote_frequency == 0 {
            return Err(ValidationError::InvalidVoteFrequency);
        }
        if self.max_suggestions == 0 {
            return Err(ValidationError::InvalidMaxSuggestions);
        }
        if self.max_conversation_turns == 0 {
            return Err(ValidationError::InvalidMaxTurns);
        }
        Ok(())
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            scripts_dir: default_scripts_dir(),
            default_script: default_script(),
            audience_enabled: false,
            vote_frequency: default_vote_frequency(),
            max_suggestions: default_max_suggestions(),
            max_conversation_turns: default_max_turns(),
            collect_mode: CollectMode::default(),
            vote_mode: VoteMode::default(),
        }
    }
}

fn default_scripts_dir() -> PathBuf {
    PathBuf::from("scripts")
}

fn default_script() -> String {
    "microsoft_support".to_string()
}

fn default_vote_frequency() -> u64 {
    5
}

fn default_max_suggestions() -> usize {
    10
}

fn default_max_turns() -> u64 {
    50
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simulation_defaults() {
        let config = SimulationConfig::default();
        assert_eq!(config.scripts_dir, PathBuf::from("scripts"));
        assert_eq!(config.default_script, "microsoft_support");
        assert!(!config.audience_enabled);
        assert_eq!(config.vote_frequency, 5);
        assert_eq!(config.max_suggestions, 10);
        assert_eq!(config.max_conversation_turns, 50);
        assert_eq!(config.collect_mode, CollectMode::Simulated);
        assert_eq!(config.vote_mode, VoteMode::Simulated);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_values_rejected() {
        let config = SimulationConfig {
            vote_frequency: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidVoteFrequency));

        let config = SimulationConfig {
            max_suggestions: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidMaxSuggestions));

        let config = SimulationConfig {
            max_conversation_turns: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidMaxTurns));
    }

    #[test]
    fn test_blank_script_rejected() {
        let config = SimulationConfig {
            default_script: " ".to_string(),
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::EmptyScriptId));
    }

    #[test]
    fn test_modes_accept_console_alias() {
        let mode: CollectMode = serde_json::from_str("\"console\"").unwrap();
        assert_eq!(mode, CollectMode::Interactive);

        let mode: VoteMode = serde_json::from_str("\"simulated\"").unwrap();
        assert_eq!(mode, VoteMode::Simulated);
    }
}
