use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use shared::{AntState, PheromoneChannel};
use swarmsim::{DriverAction, Simulator, load_scenario};

/// Command-line arguments for SwarmSim.
#[derive(Parser)]
#[command(name = "SwarmSim", version, about = "Headless ant foraging simulation")]
struct Cli {
    /// Path to the TOML scenario file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of ticks to run, overrides the scenario.
    #[arg(short, long)]
    ticks: Option<u64>,

    /// RNG seed, overrides the scenario.
    #[arg(short, long)]
    seed: Option<u64>,

    /// Log a census every N ticks (0 disables it).
    #[arg(short, long)]
    report_every: Option<u64>,

    /// Driver action applied after the startup population, e.g. `add-ants:0`. Repeatable.
    #[arg(short, long = "action")]
    actions: Vec<String>,
}

fn run(cli: Cli) -> Result<()> {
    let mut scenario = load_scenario(cli.config.as_deref())?;
    if let Some(seed) = cli.seed {
        scenario.seed = seed;
    }
    let ticks = cli.ticks.unwrap_or(scenario.driver.ticks);
    let report_every = cli.report_every.unwrap_or(scenario.driver.report_every);

    let actions = cli
        .actions
        .iter()
        .map(|action| action.parse::<DriverAction>())
        .collect::<Result<Vec<_>, _>>()
        .context("Invalid --action")?;

    let mut simulator = Simulator::new(scenario).context("Failed to build the environment")?;
    simulator.populate().context("Failed to populate the environment")?;
    for action in actions {
        simulator
            .apply(action)
            .with_context(|| format!("Failed to apply {:?}", action))?;
    }

    log::info!(
        "Running {} ticks with {} ants, {} nests and {} food sources",
        ticks,
        simulator.environment.number_of_ants(),
        simulator.environment.number_of_nests(),
        simulator.environment.number_of_foods()
    );

    simulator.unpause();
    for step in 1..=ticks {
        simulator
            .update()
            .with_context(|| format!("Tick {} failed", step))?;
        if report_every > 0 && step % report_every == 0 {
            let census = simulator.environment.census();
            let counts = AntState::ALL
                .iter()
                .map(|&state| format!("{} {}", state.as_str(), census.count(state)))
                .collect::<Vec<_>>()
                .join(", ");
            log::info!(
                "[{:>6}] {} (carrying food {})",
                step,
                counts,
                census.carrying_food
            );
        }
    }

    let census = simulator.environment.census();
    log::info!(
        "Finished after {} ticks: {} ants, {} carrying food",
        simulator.steps,
        census.total(),
        census.carrying_food
    );
    for channel in PheromoneChannel::ALL {
        log::info!(
            "{:?} pheromone left on the field: {}",
            channel,
            simulator.environment.pheromone_total(channel)
        );
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}
