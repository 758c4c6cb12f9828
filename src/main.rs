use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use raintag::{Config, CycleOutcome, CycleRunner, TaggingWorkflow};

/// raintag - automatic AI tagging for untagged Raindrop.io bookmarks
#[derive(Parser)]
#[command(name = "raintag")]
#[command(about = "Tags the newest untagged bookmark using AI suggestions")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand)]
enum Commands {
    /// Tag one bookmark per cycle, forever
    Run(RunCommand),
    /// Run a single tagging cycle and exit
    Once,
}

/// Run the tagging loop
#[derive(Parser)]
struct RunCommand {
    /// Seconds to wait between cycles (overrides CYCLE_TIMEOUT_SECONDS)
    #[arg(short, long, value_name = "SECONDS", value_parser = clap::value_parser!(u64).range(1..))]
    interval: Option<u64>,
}

fn main() {
    // A missing .env file is fine; variables may come from the environment
    let _ = dotenvy::dotenv();
    init_tracing();

    let cli = Cli::parse();

    match &cli.command {
        Commands::Run(cmd) => handle_run(cmd),
        Commands::Once => {
            let mut cycle = tag_cycle;
            if CycleRunner::new(Duration::ZERO).run_cycle(&mut cycle).is_none() {
                std::process::exit(1);
            }
        }
    }
}

/// Installs the stderr log subscriber, honoring `RUST_LOG` and defaulting to info.
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Handles the run command by looping over tagging cycles.
fn handle_run(cmd: &RunCommand) -> ! {
    let interval = cmd
        .interval
        .map(Duration::from_secs)
        .unwrap_or_else(Config::cycle_interval_from_env);

    CycleRunner::new(interval).run_forever(tag_cycle)
}

/// Executes one cycle with freshly loaded configuration.
///
/// Configuration is re-read every cycle so a missing token fails only the
/// current cycle.
fn tag_cycle() -> Result<CycleOutcome> {
    let config = Config::from_env()?;
    let client = config.client().context("Failed to create Raindrop client")?;
    let workflow = TaggingWorkflow::new(Arc::new(client), config.ignored_tags);

    workflow.run().context("Error fetching raindrops")
}
