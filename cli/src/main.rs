//! `scenario-sim` - drive a scenario simulation from the command line
//!
//! Events go to stdout as JSON lines; logs go to stderr (`RUST_LOG`).

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use scenario_simulator_core_rs::config::{
    load_config, ConfigBuilder, Difficulty, Environment, Focus, ValidationReport,
    DEFAULT_DURATION_MINUTES,
};
use scenario_simulator_core_rs::core::time::MS_PER_SECOND;
use scenario_simulator_core_rs::rng::DEFAULT_SEED;
use scenario_simulator_core_rs::{
    create_custom_config, CustomOptions, InterruptionAction, InterruptionFrequency,
    RequirementStability, RngManager, ScenarioError, ScenarioSimulation, StakeholderActivity,
};
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "scenario-sim", version, about = "Stack Rush scenario simulator")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run a scenario to completion on the virtual clock
    Run(RunArgs),
    /// Print the resolved config for a challenge
    Resolve(ResolveArgs),
    /// Validate a config file
    Validate {
        /// JSON or YAML config file
        file: PathBuf,
    },
}

#[derive(Debug, Args)]
struct RunArgs {
    #[arg(long, required_unless_present = "config", conflicts_with = "config")]
    challenge: Option<String>,

    /// Run length in minutes
    #[arg(long, default_value_t = DEFAULT_DURATION_MINUTES, conflicts_with = "config")]
    duration: u32,

    #[arg(long, default_value_t = DEFAULT_SEED)]
    seed: u64,

    #[arg(long)]
    frequency: Option<InterruptionFrequency>,

    #[arg(long)]
    activity: Option<StakeholderActivity>,

    #[arg(long)]
    stability: Option<RequirementStability>,

    /// Start from a config file instead of `--challenge` and `--duration`
    #[arg(long)]
    config: Option<PathBuf>,

    /// Handle messages and interruptions, accept changes, as they arrive
    #[arg(long)]
    auto_respond: bool,

    /// Virtual time per step, in milliseconds
    #[arg(long, default_value_t = MS_PER_SECOND)]
    step_ms: u64,
}

#[derive(Debug, Args)]
struct ResolveArgs {
    #[arg(long)]
    challenge: String,

    #[arg(long, default_value_t = DEFAULT_DURATION_MINUTES)]
    duration: u32,

    #[arg(long)]
    difficulty: Option<Difficulty>,

    #[arg(long)]
    focus: Option<Focus>,

    #[arg(long)]
    environment: Option<Environment>,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn build_simulation(args: &RunArgs) -> Result<ScenarioSimulation> {
    let mut builder = match (&args.config, &args.challenge) {
        (Some(path), _) => ConfigBuilder::from_config(
            load_config(path).with_context(|| format!("loading {}", path.display()))?,
        ),
        (None, Some(challenge)) => ConfigBuilder::for_challenge(challenge, args.duration),
        (None, None) => bail!("either --challenge or --config is required"),
    };

    if let Some(f) = args.frequency {
        builder = builder.interruption_frequency(f);
    }
    if let Some(a) = args.activity {
        builder = builder.stakeholder_activity(a);
    }
    if let Some(s) = args.stability {
        builder = builder.requirement_stability(s);
    }

    let config = builder.build();
    config.validate().into_result()?;
    Ok(ScenarioSimulation::new(config, RngManager::new(args.seed)))
}

fn respond(sim: &mut ScenarioSimulation) {
    let messages: Vec<String> = sim.pending_messages().iter().map(|m| m.id.clone()).collect();
    for id in messages {
        sim.mark_message_handled(&id);
    }
    let interruptions: Vec<String> = sim
        .active_interruptions()
        .iter()
        .map(|i| i.id.clone())
        .collect();
    for id in interruptions {
        sim.handle_interruption(&id, InterruptionAction::Handle);
    }
    // Last: handled messages may have added clarifications
    let changes: Vec<String> = sim
        .requirement_changes()
        .iter()
        .map(|c| c.id.clone())
        .collect();
    for id in changes {
        sim.handle_requirement_change(&id, true);
    }
}

fn run(args: RunArgs) -> Result<ExitCode> {
    if args.step_ms == 0 {
        bail!("--step-ms must be positive");
    }
    let mut sim = build_simulation(&args)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut printed = 0;

    sim.start();
    loop {
        if args.auto_respond {
            respond(&mut sim);
        }
        for logged in &sim.event_log().events()[printed..] {
            writeln!(out, "{}", serde_json::to_string(logged)?)?;
        }
        printed = sim.event_log().len();

        if !sim.is_active() {
            break;
        }
        sim.advance_by(args.step_ms);
    }
    out.flush()?;

    let status = sim.get_status();
    tracing::info!(
        elapsed_ms = status.elapsed_time,
        events = printed,
        pending_messages = status.pending_messages,
        active_interruptions = status.active_interruptions,
        "run complete"
    );
    Ok(ExitCode::SUCCESS)
}

fn resolve(args: ResolveArgs) -> Result<ExitCode> {
    let config = create_custom_config(
        &args.challenge,
        args.duration,
        &CustomOptions {
            difficulty: args.difficulty,
            focus: args.focus,
            environment: args.environment,
        },
    );
    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(ExitCode::SUCCESS)
}

fn validate(file: PathBuf) -> Result<ExitCode> {
    let report = match load_config(&file) {
        Ok(config) => config.validate(),
        Err(ScenarioError::InvalidConfig(errors)) => ValidationReport {
            valid: false,
            errors,
        },
        Err(ScenarioError::Parse(message)) => ValidationReport {
            valid: false,
            errors: vec![message],
        },
        Err(err) => return Err(err).with_context(|| format!("validating {}", file.display())),
    };

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(if report.valid {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn main() -> Result<ExitCode> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Run(args) => run(args),
        Command::Resolve(args) => resolve(args),
        Command::Validate { file } => validate(file),
    }
}
