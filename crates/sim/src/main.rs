//! Tick driver for the fleet combat runtime.
//!
//! Loads a scenario, runs one combat manager per AI owner and applies the
//! resulting decisions with a toy behavior executor.

mod commands;
mod dirs;
mod logging;
mod simulation;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use commands::{Inspect, Run};

/// Fleet combat simulation
#[derive(Parser)]
#[command(name = "fleet-sim")]
#[command(about = "Drive AI fleet combat arbitration over a scenario", long_about = None)]
#[command(version)]
struct Cli {
    /// Also write logs to DIR/fleet-sim.log
    #[arg(long, global = true, value_name = "DIR")]
    log_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Run a scenario for a number of ticks
    Run(Run),

    /// Print a saved combat state table
    Inspect(Inspect),
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (for FLEET_SAVE_DIR and RUST_LOG)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let _guard = logging::setup_logging(cli.log_dir.as_deref())?;

    match cli.command {
        Command::Run(cmd) => cmd.execute().await,
        Command::Inspect(cmd) => cmd.execute(),
    }
}
