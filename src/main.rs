//! Scam Simulator - terminal front end.
//!
//! Type what the scammer says; Mme Jeanne Dubois answers. `status`, `reset`
//! and `quit` are handled by the REPL itself.

use anyhow::{Context, Result};
use clap::Parser;
use secrecy::ExposeSecret;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{fmt, EnvFilter};

use scam_simulator::adapters::ai::{MockTextGenerator, OpenAiConfig, OpenAiTextGenerator};
use scam_simulator::adapters::audience::{
    ConsoleSuggestionSource, ConsoleVoteCollector, SharedConsole, SilentSuggestionSource,
    SimulatedSuggestionSource, SimulatedVoteCollector, StdConsole,
};
use scam_simulator::adapters::moderator::{LlmEventModerator, ModeratorSettings};
use scam_simulator::adapters::scripts::FileScriptRepository;
use scam_simulator::adapters::victim::{VictimResponder, VictimSettings};
use scam_simulator::application::{
    AudienceCoordinator, AudienceSettings, ReplCommand, ScamSimulator, SimulatorError,
    SimulatorSettings, TurnOutcome,
};
use scam_simulator::config::{AppConfig, CollectMode, LlmConfig, LlmProvider, VoteMode};
use scam_simulator::domain::audience::INSPIRATION_EVENTS;
use scam_simulator::ports::{
    CompletionRequest, EventModerator, ScriptRepository, SuggestionSource, TextGenerator,
    VoteCollector,
};

type Terminal = SharedConsole<tokio::io::BufReader<tokio::io::Stdin>, tokio::io::Stdout>;

#[derive(Parser)]
#[command(name = "scam-simulator")]
#[command(about = "Educational phone-scam simulator with an audience")]
struct Args {
    /// Script to play (file stem in the scripts directory)
    script: Option<String>,

    /// Directory holding the scenario files
    #[arg(long, env = "SCAM_SIM__SIMULATION__SCRIPTS_DIR")]
    scripts_dir: Option<PathBuf>,

    /// Enable audience rounds
    #[arg(long)]
    audience: bool,

    /// Run an audience round every N turns
    #[arg(long)]
    vote_frequency: Option<u64>,

    /// Where suggestions come from
    #[arg(long, value_enum)]
    collect_mode: Option<CollectMode>,

    /// How the winning event is chosen
    #[arg(long, value_enum)]
    vote_mode: Option<VoteMode>,

    /// List available scripts and exit
    #[arg(long)]
    list_scripts: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("scam_simulator=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let mut config = AppConfig::load().context("loading configuration")?;
    apply_overrides(&mut config, &args);
    config.validate().context("invalid configuration")?;

    let repository = FileScriptRepository::new(&config.simulation.scripts_dir);

    if args.list_scripts {
        for script_id in repository.list().await? {
            println!("{}", script_id);
        }
        return Ok(());
    }

    let script = repository
        .load(&config.simulation.default_script)
        .await
        .with_context(|| format!("loading script '{}'", config.simulation.default_script))?;

    let generator = build_generator(&config.llm)?;
    tracing::info!(
        provider = %generator.provider_info().name,
        model = %generator.provider_info().model,
        script = %script.script_id(),
        "Simulator starting"
    );

    let console: Terminal = StdConsole::stdio().shared();

    let responder = Arc::new(VictimResponder::new(
        generator.clone(),
        VictimSettings {
            temperature: config.llm.victim_temperature,
            max_tokens: config.llm.max_tokens,
        },
    ));

    let mut simulator = ScamSimulator::new(
        script,
        responder,
        SimulatorSettings {
            max_conversation_turns: config.simulation.max_conversation_turns,
        },
    );

    if config.simulation.audience_enabled {
        simulator = simulator.with_audience(build_audience(&config, generator, &console)?);
    }

    run_repl(&mut simulator, &console).await
}

fn apply_overrides(config: &mut AppConfig, args: &Args) {
    let simulation = &mut config.simulation;
    if let Some(script) = &args.script {
        simulation.default_script = script.clone();
    }
    if let Some(dir) = &args.scripts_dir {
        simulation.scripts_dir = dir.clone();
    }
    if args.audience {
        simulation.audience_enabled = true;
    }
    if let Some(frequency) = args.vote_frequency {
        simulation.vote_frequency = frequency;
    }
    if let Some(mode) = args.collect_mode {
        simulation.collect_mode = mode;
    }
    if let Some(mode) = args.vote_mode {
        simulation.vote_mode = mode;
    }
}

fn build_generator(config: &LlmConfig) -> Result<Arc<dyn TextGenerator>> {
    match config.provider {
        LlmProvider::OpenAI => {
            let api_key = config
                .api_key
                .as_ref()
                .context("SCAM_SIM__LLM__API_KEY is required for the openai provider")?;
            let openai = OpenAiConfig::new(api_key.expose_secret().clone())
                .with_model(config.model.clone())
                .with_base_url(config.base_url.clone())
                .with_timeout(config.timeout());
            Ok(Arc::new(OpenAiTextGenerator::new(openai)?))
        }
        LlmProvider::Mock => Ok(Arc::new(MockTextGenerator::new().with_fallback(offline_reply))),
    }
}

/// Canned replies so the simulator runs without network access.
fn offline_reply(request: &CompletionRequest) -> String {
    let moderating = request
        .system_prompt
        .as_deref()
        .is_some_and(|p| p.contains("disruptive events"));

    if moderating {
        return INSPIRATION_EVENTS
            .iter()
            .take(3)
            .enumerate()
            .map(|(i, (label, description))| format!("{}. {} - {}", i + 1, label, description))
            .collect::<Vec<_>>()
            .join("\n");
    }

    match request.last_user_message() {
        Some(line) => format!(
            "Oh là là... \"{}\" ? Attendez, je n'entends pas bien, mon petit. Vous pouvez répéter ?",
            line
        ),
        None => "Allô ? Qui est à l'appareil ?".to_string(),
    }
}

fn build_audience(
    config: &AppConfig,
    generator: Arc<dyn TextGenerator>,
    console: &Terminal,
) -> Result<AudienceCoordinator> {
    let simulation = &config.simulation;

    let suggestions: Arc<dyn SuggestionSource> = match simulation.collect_mode {
        CollectMode::Interactive => Arc::new(ConsoleSuggestionSource::new(console.clone())),
        CollectMode::Simulated => Arc::new(SimulatedSuggestionSource::new()),
        CollectMode::Silent => Arc::new(SilentSuggestionSource),
    };

    let voter: Arc<dyn VoteCollector> = match simulation.vote_mode {
        VoteMode::Interactive => Arc::new(ConsoleVoteCollector::new(console.clone())),
        VoteMode::Simulated => Arc::new(SimulatedVoteCollector::new()),
    };

    let moderator: Arc<dyn EventModerator> = Arc::new(LlmEventModerator::new(
        generator,
        ModeratorSettings {
            temperature: config.llm.moderator_temperature,
            max_tokens: config.llm.max_tokens,
        },
    ));

    let coordinator = AudienceCoordinator::new(
        suggestions,
        moderator,
        voter,
        AudienceSettings {
            vote_frequency: simulation.vote_frequency,
            max_suggestions: simulation.max_suggestions,
        },
    )?;

    tracing::info!(
        vote_frequency = simulation.vote_frequency,
        collect_mode = ?simulation.collect_mode,
        vote_mode = ?simulation.vote_mode,
        "Audience enabled"
    );
    Ok(coordinator)
}

async fn run_repl(simulator: &mut ScamSimulator, console: &Terminal) -> Result<()> {
    {
        let mut c = console.lock().await;
        c.say(&format!("=== {} ===", simulator.script().title())).await?;
        c.say(simulator.script().description()).await?;
        c.say("You are the scammer. Commands: status, reset, quit.").await?;
    }

    loop {
        // Released before the turn runs; audience adapters lock it too.
        let line = console.lock().await.prompt("\nScammer > ").await?;
        let Some(line) = line else {
            break;
        };

        match ReplCommand::parse(&line) {
            ReplCommand::Quit => break,
            ReplCommand::Empty => continue,
            ReplCommand::Status => {
                let status = simulator.status();
                let memory = simulator.responder_state().await;
                let mut c = console.lock().await;
                c.say(&serde_json::to_string_pretty(&status)?).await?;
                c.say(&format!("Victim memory: {} message(s)", memory.history_length))
                    .await?;
            }
            ReplCommand::Reset => {
                simulator.reset().await;
                console.lock().await.say("Conversation reset.").await?;
            }
            ReplCommand::Say(text) => {
                let message = match simulator.run_turn(&text).await {
                    Ok(outcome) => render_turn(&outcome),
                    Err(SimulatorError::TurnLimitReached { limit }) => format!(
                        "Turn limit of {} reached. Type 'reset' to start over.",
                        limit
                    ),
                    Err(e) => e.to_string(),
                };
                console.lock().await.say(&message).await?;
            }
        }
    }

    console.lock().await.say("Au revoir !").await?;
    Ok(())
}

fn render_turn(outcome: &TurnOutcome) -> String {
    let mut out = format!(
        "[turn {} | stage: {} | risk: {}]\n",
        outcome.turn,
        outcome.update.stage_id,
        outcome.update.risk_level.label()
    );
    if outcome.audience_constraint.is_some() {
        out.push_str("(the audience has struck!)\n");
    }
    out.push_str(&format!("Jeanne: {}", outcome.response));
    out
}
