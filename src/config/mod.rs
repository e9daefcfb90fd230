//! Startup configuration.
//!
//! Everything is read from `SCAM_SIM__`-prefixed environment variables (and
//! a `.env` file when present). Sections nest with `__`, so
//! `SCAM_SIM__SIMULATION__VOTE_FREQUENCY=3` sets `simulation.vote_frequency`.
//! Every field has a default; an empty environment runs the offline mock.
//!
//! ```no_run
//! use scam_simulator::config::AppConfig;
//!
//! let config = AppConfig::load().expect("configuration");
//! config.validate().expect("valid configuration");
//! println!("Playing {}", config.simulation.default_script);
//! ```

mod error;
mod llm;
mod simulation;

pub use error::{ConfigError, ValidationError};
pub use llm::{LlmConfig, LlmProvider};
pub use simulation::{CollectMode, SimulationConfig, VoteMode};

use serde::Deserialize;

/// Root application configuration
///
/// Built once at startup and passed into constructors; nothing else reads
/// the environment.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Language model configuration
    #[serde(default)]
    pub llm: LlmConfig,

    /// Scenario, audience and session limits
    #[serde(default)]
    pub simulation: SimulationConfig,
}

impl AppConfig {
    /// Reads `.env`, then the `SCAM_SIM__*` variables.
    ///
    /// # Errors
    ///
    /// `ConfigError::LoadError` when a value does not parse into its field,
    /// e.g. `SCAM_SIM__SIMULATION__VOTE_FREQUENCY=often`.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("SCAM_SIM")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Checks both sections. Call after command-line overrides are applied.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.llm.validate()?;
        self.simulation.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Environment variables are process-global.
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const VARS: &[&str] = &[
        "SCAM_SIM__LLM__PROVIDER",
        "SCAM_SIM__LLM__API_KEY",
        "SCAM_SIM__LLM__VICTIM_TEMPERATURE",
        "SCAM_SIM__SIMULATION__VOTE_FREQUENCY",
        "SCAM_SIM__SIMULATION__AUDIENCE_ENABLED",
        "SCAM_SIM__SIMULATION__COLLECT_MODE",
        "SCAM_SIM__SIMULATION__DEFAULT_SCRIPT",
    ];

    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    fn test_load_defaults_from_empty_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let result = AppConfig::load();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(config.llm.provider, LlmProvider::Mock);
        assert_eq!(config.simulation.vote_frequency, 5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_nested_values() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("SCAM_SIM__LLM__PROVIDER", "openai");
        env::set_var("SCAM_SIM__LLM__API_KEY", "sk-test");
        env::set_var("SCAM_SIM__SIMULATION__VOTE_FREQUENCY", "3");
        env::set_var("SCAM_SIM__SIMULATION__AUDIENCE_ENABLED", "true");
        env::set_var("SCAM_SIM__SIMULATION__COLLECT_MODE", "silent");
        env::set_var("SCAM_SIM__SIMULATION__DEFAULT_SCRIPT", "bank_fraud");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.llm.provider, LlmProvider::OpenAI);
        assert!(config.llm.has_api_key());
        assert_eq!(config.simulation.vote_frequency, 3);
        assert!(config.simulation.audience_enabled);
        assert_eq!(config.simulation.collect_mode, CollectMode::Silent);
        assert_eq!(config.simulation.default_script, "bank_fraud");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_unparsable_value_fails_load() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("SCAM_SIM__SIMULATION__VOTE_FREQUENCY", "often");
        let result = AppConfig::load();
        clear_env();

        assert!(matches!(result, Err(ConfigError::LoadError(_))));
    }

    #[test]
    fn test_validate_catches_missing_key() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("SCAM_SIM__LLM__PROVIDER", "openai");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_api_key_is_redacted_in_debug() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("SCAM_SIM__LLM__API_KEY", "sk-super-secret");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert!(!format!("{:?}", config).contains("sk-super-secret"));
    }
}
