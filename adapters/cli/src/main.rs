#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that runs a Treasure Quest scenario.

mod demo;

use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, ValueEnum};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;
use treasure_quest_core::{Event, QuestSnapshot};
use treasure_quest_rendering::{RenderingBackend, Scene, TextBackend};
use treasure_quest_scenario::{format_final, format_scenario, parse_scenario};
use treasure_quest_system_bootstrap::{Bootstrap, MoveMode};
use treasure_quest_system_scheduler::{self as scheduler, run_to_completion, Scheduler};
use treasure_quest_world::query;

use demo::DEMO_SCENARIO;

const DEFAULT_SEED: u64 = 0x5EED;
const DEFAULT_RANDOM_TURNS: u64 = 100;

/// Format of the final state printed on stdout.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Scenario text records.
    Text,
    /// Pretty-printed JSON snapshot.
    Json,
}

#[derive(Parser, Debug)]
#[command(
    name = "treasure-quest",
    author,
    version,
    about = "Runs adventurers across a treasure map",
    long_about = None
)]
struct Cli {
    /// Scenario file to play; the built-in demo map is used when omitted.
    #[arg(long, value_name = "PATH")]
    file: Option<PathBuf>,
    /// Where the final state is written.
    #[arg(long, value_name = "PATH", default_value = "results.txt")]
    output: PathBuf,
    /// Also write a scenario that replays this run.
    #[arg(long, value_name = "PATH")]
    initial_state: Option<PathBuf>,
    /// Keep drawing random moves once an adventurer's script runs out.
    #[arg(long)]
    random: bool,
    /// Seed for random moves.
    #[arg(long, default_value_t = DEFAULT_SEED)]
    seed: u64,
    /// Turn budget; defaults to the longest script, or 100 turns with --random.
    #[arg(long)]
    turns: Option<u64>,
    /// End the quest once every treasure is collected.
    #[arg(long, value_name = "BOOL", default_value_t = true, action = ArgAction::Set)]
    stop_when_looted: bool,
    /// Print the map and leader board after every turn.
    #[arg(long)]
    render: bool,
    /// Format of the final state printed on stdout.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

/// Resolved settings for one run.
#[derive(Clone, Debug, PartialEq, Eq)]
struct RunConfig {
    scenario: Option<PathBuf>,
    output: PathBuf,
    initial_state: Option<PathBuf>,
    mode: MoveMode,
    turn_budget: Option<u64>,
    scheduler: scheduler::Config,
    render: bool,
    format: OutputFormat,
}

impl From<Cli> for RunConfig {
    fn from(cli: Cli) -> Self {
        let (mode, turn_budget) = if cli.random {
            (
                MoveMode::Improvised { seed: cli.seed },
                Some(cli.turns.unwrap_or(DEFAULT_RANDOM_TURNS)),
            )
        } else {
            (MoveMode::Scripted, cli.turns)
        };

        Self {
            scenario: cli.file,
            output: cli.output,
            initial_state: cli.initial_state,
            mode,
            turn_budget,
            scheduler: scheduler::Config::new(cli.stop_when_looted),
            render: cli.render,
            format: cli.format,
        }
    }
}

/// Entry point for the Treasure Quest command-line interface.
fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let config = RunConfig::from(Cli::parse());
    let snapshot = run(&config)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match config.format {
        OutputFormat::Text => write!(out, "{}", format_final(&snapshot))?,
        OutputFormat::Json => writeln!(out, "{}", serde_json::to_string_pretty(&snapshot)?)?,
    }
    Ok(())
}

fn run(config: &RunConfig) -> Result<QuestSnapshot> {
    let text = match &config.scenario {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("failed to read scenario {}", path.display()))?,
        None => DEMO_SCENARIO.to_owned(),
    };
    let scenario = parse_scenario(&text).with_context(|| match &config.scenario {
        Some(path) => format!("failed to parse scenario {}", path.display()),
        None => "failed to parse the demo scenario".to_owned(),
    })?;

    let bootstrap = Bootstrap::new(config.mode).with_turn_budget(config.turn_budget);
    let mut events = Vec::new();
    let mut world = bootstrap.build_world(&scenario, &mut events);
    log_events(&events);
    info!(
        mode = ?bootstrap.mode(),
        turn_budget = query::turn_budget(&world),
        treasure = query::treasure_total(&world),
        "quest ready"
    );

    let mut backend = TextBackend::new(io::stdout());
    let mut render_failure = None;
    if config.render {
        backend.present(&Scene::new(&query::final_snapshot(&world), 0))?;
    }

    let summary = run_to_completion(
        &mut world,
        &Scheduler::new(config.scheduler),
        |world, events| {
            log_events(events);
            if config.render && render_failure.is_none() {
                let scene = Scene::new(&query::final_snapshot(world), query::turn_index(world));
                render_failure = backend.present(&scene).err();
            }
        },
    );
    if let Some(error) = render_failure {
        return Err(error);
    }
    info!(turns = summary.turns, stop_reason = ?summary.stop_reason, "quest finished");

    let snapshot = query::final_snapshot(&world);
    write_file(&config.output, &format_final(&snapshot))?;
    if let Some(path) = &config.initial_state {
        write_file(path, &format_scenario(&query::initial_snapshot(&world)))?;
    }
    Ok(snapshot)
}

fn write_file(path: &Path, contents: &str) -> Result<()> {
    fs::write(path, contents).with_context(|| format!("failed to write {}", path.display()))?;
    info!(path = %path.display(), "wrote file");
    Ok(())
}

fn log_events(events: &[Event]) {
    for event in events {
        match event {
            Event::PlacementRejected {
                target,
                cell,
                reason,
            } => warn!(?target, ?cell, ?reason, "placement rejected"),
            Event::AdventurerRegistered {
                adventurer,
                name,
                cell,
                facing,
            } => info!(
                adventurer = adventurer.get(),
                %name,
                ?cell,
                ?facing,
                "adventurer registered"
            ),
            Event::AdventurerAdvanced {
                adventurer,
                from,
                to,
            } => info!(adventurer = adventurer.get(), ?from, ?to, "adventurer advanced"),
            Event::TreasureCollected {
                adventurer,
                cell,
                remaining,
            } => info!(adventurer = adventurer.get(), ?cell, remaining, "treasure collected"),
            Event::TurnCompleted { turn } => info!(turn, "turn completed"),
            other => debug!(event = ?other),
        }
    }
}
