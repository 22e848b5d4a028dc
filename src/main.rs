use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use wattshift::{
    engine::{EngineBuilder, EngineSettings},
    scenario::ScenarioLoader,
    systems::{
        BookkeepingSystem, EconomySystem, PollutionSystem, ScheduleSystem, WeatherSystem,
    },
    web::{self, WebServerConfig},
};

#[derive(Debug, Parser)]
#[command(author, version, about = "Household energy-transition idle game core")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run a scenario headless for a fixed number of ticks
    Run {
        /// Path to the scenario YAML file
        #[arg(long, default_value = "scenarios/fresh_start.yaml")]
        scenario: PathBuf,

        /// Override tick count (uses scenario default when omitted)
        #[arg(long)]
        ticks: Option<u64>,

        /// Override snapshot interval in ticks
        #[arg(long)]
        snapshot_interval: Option<u64>,

        /// Directory for snapshots
        #[arg(long)]
        snapshot_dir: Option<PathBuf>,
    },
    /// Serve the session to the browser client in real time
    Serve {
        /// Path to the scenario YAML file
        #[arg(long, default_value = "scenarios/fresh_start.yaml")]
        scenario: PathBuf,

        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        #[arg(long, default_value_t = 8080)]
        port: u16,

        /// Override snapshot interval in ticks
        #[arg(long)]
        snapshot_interval: Option<u64>,

        /// Directory for snapshots
        #[arg(long)]
        snapshot_dir: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let loader = ScenarioLoader::new(".");

    match cli.command {
        Command::Run {
            scenario,
            ticks,
            snapshot_interval,
            snapshot_dir,
        } => {
            let scenario = loader.load(&scenario)?;
            let mut world = scenario.build_world();
            let ticks = scenario.ticks(ticks);
            let settings = EngineSettings {
                scenario_name: scenario.name.clone(),
                seed: scenario.seed,
                snapshot_interval_ticks: snapshot_interval
                    .unwrap_or(scenario.snapshot_interval_ticks),
                snapshot_dir: snapshot_dir.unwrap_or_else(|| PathBuf::from("snapshots")),
            };
            let mut engine = EngineBuilder::new(settings)
                .with_system(WeatherSystem::new())
                .with_system(ScheduleSystem::new())
                .with_system(EconomySystem::new())
                .with_system(PollutionSystem::new())
                .with_system(BookkeepingSystem::new())
                .build();
            engine.run(&mut world, ticks)?;
            println!(
                "Scenario '{}' completed after {} ticks. Coins: {:.2}, pollution: {:.1}",
                scenario.name,
                ticks,
                world.resources().coins,
                world.pollution().level
            );
        }
        Command::Serve {
            scenario,
            host,
            port,
            snapshot_interval,
            snapshot_dir,
        } => {
            let scenario = loader.load(&scenario)?;
            let config = WebServerConfig {
                snapshot_interval: snapshot_interval.unwrap_or(scenario.snapshot_interval_ticks),
                snapshot_dir: snapshot_dir.unwrap_or_else(|| PathBuf::from("snapshots")),
                host,
                port,
                scenario,
            };
            web::run(config).await?;
        }
    }

    Ok(())
}
